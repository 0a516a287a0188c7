//! Shared plumbing for the sketches: run configuration, shader source
//! acquisition, window/context bring-up and pixel pattern generation.

pub mod config;
pub mod image;
pub mod source;
pub mod window;
