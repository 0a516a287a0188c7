use crate::geometry::Geometry;
use crate::program::Program;

pub struct GlRenderer;

impl GlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Binds the program and draws the geometry, indexed or not. The
    /// program is always rebound since uniform uploads may have switched
    /// the active program in between.
    pub fn draw(&self, geometry: &Geometry, program: &Program) {
        program.bind();

        unsafe {
            gl::BindVertexArray(geometry.vao());

            if geometry.is_indexed() {
                gl::DrawElements(
                    gl::TRIANGLES,
                    geometry.vertices() as i32,
                    gl::UNSIGNED_INT,
                    std::ptr::null(),
                );
            } else {
                gl::DrawArrays(gl::TRIANGLES, 0, geometry.vertices() as i32);
            }
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
