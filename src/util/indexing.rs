use crate::util::*;

/// Number of cells in a 2D buffer with the given exclusive bounds.
pub fn buffer_size(exclusive_bounds: &Coord) -> usize {
    exclusive_bounds[0] * exclusive_bounds[1]
}

pub fn coord_to_linear(coord: &Coord, exclusive_bounds: &Coord) -> usize {
    debug_assert!(
        coord[0] < exclusive_bounds[0] && coord[1] < exclusive_bounds[1],
        "{:?} outside of {:?}",
        coord,
        exclusive_bounds
    );
    coord[0] * exclusive_bounds[1] + coord[1]
}

pub fn linear_to_coord(linear_index: usize, exclusive_bounds: &Coord) -> Coord {
    debug_assert!(linear_index < buffer_size(exclusive_bounds));
    let cols = exclusive_bounds[1];
    vector![linear_index / cols, linear_index % cols]
}

/// Mirror a coordinate along the row axis,
/// i.e. row 0 becomes the last row.
pub fn flip_rows(coord: &Coord, exclusive_bounds: &Coord) -> Coord {
    vector![exclusive_bounds[0] - 1 - coord[0], coord[1]]
}

/// Apply a signed offset, returning None when the result leaves the buffer.
pub fn offset_coord(
    coord: &Coord,
    offset: &Offset,
    exclusive_bounds: &Coord,
) -> Option<Coord> {
    let r = coord[0] as i64 + offset[0] as i64;
    let c = coord[1] as i64 + offset[1] as i64;
    if r < 0
        || c < 0
        || r >= exclusive_bounds[0] as i64
        || c >= exclusive_bounds[1] as i64
    {
        return None;
    }
    Some(vector![r as usize, c as usize])
}

/// Iterate over all coords of a buffer in linear ordering.
pub fn coord_iter(exclusive_bounds: Coord) -> impl Iterator<Item = Coord> {
    (0..buffer_size(&exclusive_bounds))
        .map(move |i| linear_to_coord(i, &exclusive_bounds))
}
