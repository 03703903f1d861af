use glam::{Vec2, Vec3};
use instgrid_common::{DrawError, Vertex};

/// Base mesh shared by every instance of a draw.
///
/// `indices` describe a triangle list. When empty, vertices are consumed in
/// consecutive triples instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u16>) -> Self {
        Self { vertices, indices }
    }

    /// Unit quad centred on the origin in the XY plane, one color per corner.
    pub fn quad() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            Vertex::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec2::new(1.0, 0.0)),
            Vertex::new(Vec3::new( 0.5, -0.5, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec2::new(0.0, 0.0)),
            Vertex::new(Vec3::new( 0.5,  0.5, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec2::new(0.0, 1.0)),
            Vertex::new(Vec3::new(-0.5,  0.5, 0.0), Vec3::new(1.0, 1.0, 1.0), Vec2::new(1.0, 1.0)),
        ];
        let indices = vec![0, 1, 2, 2, 3, 0];
        Self { vertices, indices }
    }

    /// Check the mesh can be drawn as a triangle list.
    pub fn validate(&self) -> Result<(), DrawError> {
        if self.vertices.is_empty() {
            return Err(DrawError::EmptyMesh);
        }
        if self.indices.is_empty() {
            if self.vertices.len() % 3 != 0 {
                return Err(DrawError::IndexCountNotTriangles(self.vertices.len()));
            }
            return Ok(());
        }
        if self.indices.len() % 3 != 0 {
            return Err(DrawError::IndexCountNotTriangles(self.indices.len()));
        }
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&i| usize::from(i) >= self.vertices.len())
        {
            return Err(DrawError::IndexOutOfBounds {
                index: u32::from(index),
                vertex_count: self.vertices.len(),
            });
        }
        Ok(())
    }

    /// Number of indices a draw walks per instance.
    pub fn element_count(&self) -> usize {
        if self.indices.is_empty() {
            self.vertices.len()
        } else {
            self.indices.len()
        }
    }

    /// Vertex-index triples of every triangle.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        if self.indices.is_empty() {
            (0..self.vertices.len() / 3)
                .map(|t| [3 * t, 3 * t + 1, 3 * t + 2])
                .collect()
        } else {
            self.indices
                .chunks_exact(3)
                .map(|c| [usize::from(c[0]), usize::from(c[1]), usize::from(c[2])])
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_valid() {
        let quad = Mesh::quad();
        assert!(quad.validate().is_ok());
        assert_eq!(quad.triangles(), vec![[0, 1, 2], [2, 3, 0]]);
        assert_eq!(quad.element_count(), 6);
    }

    #[test]
    fn empty_mesh_rejected() {
        let mesh = Mesh::new(Vec::new(), Vec::new());
        assert_eq!(mesh.validate(), Err(DrawError::EmptyMesh));
    }

    #[test]
    fn partial_triangle_rejected() {
        let mut mesh = Mesh::quad();
        mesh.indices.truncate(4);
        assert_eq!(mesh.validate(), Err(DrawError::IndexCountNotTriangles(4)));
    }

    #[test]
    fn index_past_end_rejected() {
        let mut mesh = Mesh::quad();
        mesh.indices[5] = 4;
        assert_eq!(
            mesh.validate(),
            Err(DrawError::IndexOutOfBounds {
                index: 4,
                vertex_count: 4
            })
        );
    }

    #[test]
    fn non_indexed_triangles() {
        let quad = Mesh::quad();
        let vertices: Vec<_> = quad.indices.iter().map(|&i| quad.vertices[usize::from(i)]).collect();
        let mesh = Mesh::new(vertices, Vec::new());
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.triangles(), vec![[0, 1, 2], [3, 4, 5]]);

        let mut short = mesh.clone();
        short.vertices.pop();
        assert_eq!(short.validate(), Err(DrawError::IndexCountNotTriangles(5)));
    }
}
