use crate::error::Result;
use crate::field::Field;
use crate::util::{buffer_size, coord_iter, coord_to_linear, vector};
use crate::writer::FieldWriter;
use std::path::Path;
use vtkio::model::*;

/// Unstructured quad mesh over the grid nodes with the field as point data.
/// The mesh lies in the z = 0 plane, y pointing towards the top edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct VtkWriter;

pub fn field_to_vtk(field: &Field) -> Vtk {
    let bounds = field.bounds();
    let (rows, cols) = (bounds[0], bounds[1]);

    // Collect the grid points as vertices in mesh
    let mut points = Vec::with_capacity(3 * buffer_size(&bounds));
    for coord in coord_iter(bounds) {
        points.push(coord[1] as f32);
        points.push((rows - 1 - coord[0]) as f32);
        points.push(0.0);
    }

    // Assemble counter clockwise quads from grid points
    let cell_bounds = vector![rows - 1, cols - 1];
    let n_cells = buffer_size(&cell_bounds);
    let mut connectivity = Vec::with_capacity(4 * n_cells);
    let mut offsets = Vec::with_capacity(n_cells);
    let mut cell_types = Vec::with_capacity(n_cells);
    let mut offset = 4;
    for cell in coord_iter(cell_bounds) {
        let vertices = [
            cell + vector![1, 0],
            cell + vector![1, 1],
            cell + vector![0, 1],
            cell,
        ];
        for v in vertices.iter() {
            connectivity.push(coord_to_linear(v, &bounds) as u64);
        }
        offsets.push(offset);
        cell_types.push(CellType::Quad);
        offset += 4;
    }

    let data: Vec<f64> = coord_iter(bounds).map(|c| field.get(&c)).collect();

    Vtk {
        version: Version::Auto,
        title: String::new(),
        byte_order: ByteOrder::LittleEndian,
        file_path: None,
        data: DataSet::inline(UnstructuredGridPiece {
            points: IOBuffer::F32(points),
            cells: Cells {
                cell_verts: VertexNumbers::XML {
                    connectivity,
                    offsets,
                },
                types: cell_types,
            },
            data: Attributes {
                point: vec![Attribute::DataArray(DataArray {
                    name: "values".to_string(),
                    elem: ElementType::Scalars {
                        num_comp: 1,
                        lookup_table: None,
                    },
                    data: IOBuffer::F64(data),
                })],
                cell: vec![],
            },
        }),
    }
}

impl FieldWriter for VtkWriter {
    fn extension(&self) -> &'static str {
        "vtu"
    }

    fn write_field(&self, field: &Field, path: &Path) -> Result<()> {
        tracing::debug!("writing vtk {:?}", path);
        field_to_vtk(field).export(path)?;
        Ok(())
    }
}
