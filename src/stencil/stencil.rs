use crate::util::*;

/// For linear stencils, we can extract the weight for a neighbor
/// by passing in 1.0 for that neighbor and 0.0 for the others.
pub fn extract_weights<
    const NEIGHBORHOOD_SIZE: usize,
    F: Fn(&[f64; NEIGHBORHOOD_SIZE]) -> f64,
>(
    f: F,
) -> Values<NEIGHBORHOOD_SIZE> {
    let mut weights = Values::zeros();
    let mut arg_buffer = [0.0; NEIGHBORHOOD_SIZE];
    for n in 0..NEIGHBORHOOD_SIZE {
        arg_buffer[n] = 1.0;
        weights[n] = f(&arg_buffer);
        arg_buffer[n] = 0.0;
    }
    weights
}

/// A linear 2D stencil, viewed as a combination of
/// (row, column) neighbor offsets and weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Stencil<const NEIGHBORHOOD_SIZE: usize> {
    pub weights: Values<NEIGHBORHOOD_SIZE>,
    pub offsets: [Offset; NEIGHBORHOOD_SIZE],
}

impl<const NEIGHBORHOOD_SIZE: usize> Stencil<NEIGHBORHOOD_SIZE> {
    pub fn new<F: Fn(&[f64; NEIGHBORHOOD_SIZE]) -> f64>(
        offsets: [[i32; 2]; NEIGHBORHOOD_SIZE],
        operation: F,
    ) -> Self {
        let weights = extract_weights(operation);
        Stencil {
            offsets: std::array::from_fn(|i| {
                Offset::from_column_slice(&offsets[i])
            }),
            weights,
        }
    }

    pub fn weights(&self) -> &Values<NEIGHBORHOOD_SIZE> {
        &self.weights
    }

    pub fn offsets(&self) -> &[Offset; NEIGHBORHOOD_SIZE] {
        &self.offsets
    }

    /// Offset and weight pairs.
    pub fn neighbors(&self) -> impl Iterator<Item = (&Offset, f64)> + '_ {
        self.offsets.iter().zip(self.weights.iter().copied())
    }

    /// Weight of the center node, zero if the stencil has none.
    pub fn center_weight(&self) -> f64 {
        self.neighbors()
            .filter(|(o, _)| **o == Offset::zeros())
            .map(|(_, w)| w)
            .sum()
    }

    pub fn apply(&self, args: &Values<NEIGHBORHOOD_SIZE>) -> f64 {
        self.weights.component_mul(args).sum()
    }
}
