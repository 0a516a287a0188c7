//! RAII wrappers over raw OpenGL objects: shader programs, vertex
//! geometry, 2D textures and a minimal draw/clear renderer. Assumes a
//! current GL 3.3 core context on the calling thread.

pub mod geometry;
pub mod program;
pub mod renderer;
pub mod texture;
