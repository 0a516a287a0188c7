use std::ffi::c_void;

use thiserror::Error;

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: Option<&'a [u32]>,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
            indices: None,
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn with_indices(mut self, indices: &'a [u32]) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn build(self) -> Result<Geometry, GeometryError> {
        let stride = check_layout(self.data.len(), &self.attributes)?;

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                (self.data.len() * std::mem::size_of::<f32>()) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            if let Some(indices) = self.indices {
                gl::GenBuffers(1, &mut ebo);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);

                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    (indices.len() * std::mem::size_of::<u32>()) as isize,
                    indices.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );
            }

            let mut offset = 0;

            for (i, attr) in self.attributes.iter().enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (stride * std::mem::size_of::<f32>()) as i32,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                gl::EnableVertexAttribArray(i as u32);
                offset += attr.size();
            }

            // the element buffer stays bound to the VAO
            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        let vertices = match self.indices {
            Some(indices) => indices.len(),
            None => self.data.len() / stride,
        };

        Ok(Geometry {
            vao,
            vbo,
            ebo: self.indices.map(|_| ebo),
            vertices,
        })
    }
}

fn check_layout(data_len: usize, attributes: &[VertexAttribute]) -> Result<usize, GeometryError> {
    let stride: usize = attributes.iter().map(|a| a.size()).sum();

    if stride == 0 {
        return Err(GeometryError::NoAttributes);
    }

    if data_len % stride != 0 {
        return Err(GeometryError::InvalidDataLength);
    }

    Ok(stride)
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid data length for given attributes")]
    InvalidDataLength,
    #[error("geometry needs at least one vertex attribute")]
    NoAttributes,
}

pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    ebo: Option<u32>,
    vertices: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    /// Vertex count for array geometry, index count for indexed geometry.
    pub fn vertices(&self) -> usize {
        self.vertices
    }

    pub fn is_indexed(&self) -> bool {
        self.ebo.is_some()
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            if let Some(ebo) = self.ebo {
                gl::DeleteBuffers(1, &ebo);
            }
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_sums_attribute_sizes() {
        let attrs = [
            VertexAttribute::Vec3,
            VertexAttribute::Vec3,
            VertexAttribute::Vec2,
        ];

        assert_eq!(check_layout(32, &attrs).unwrap(), 8);
    }

    #[test]
    fn data_not_divisible_by_stride_is_rejected() {
        let attrs = [VertexAttribute::Vec3];

        assert!(matches!(
            check_layout(10, &attrs),
            Err(GeometryError::InvalidDataLength)
        ));
    }

    #[test]
    fn empty_attribute_list_is_rejected() {
        assert!(matches!(
            check_layout(12, &[]),
            Err(GeometryError::NoAttributes)
        ));
    }

    #[test]
    fn empty_data_with_attributes_is_accepted() {
        let attrs = [VertexAttribute::Vec2];

        assert_eq!(check_layout(0, &attrs).unwrap(), 2);
    }
}
