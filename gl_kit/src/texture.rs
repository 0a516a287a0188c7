use std::ffi::c_void;

use thiserror::Error;

pub struct Texture2D {
    id: u32,
}

impl Texture2D {
    pub fn new(
        width: u32,
        height: u32,
        pixels: &[u8],
        format: TextureFormat,
        filter: TextureFilter,
        wrap: TextureWrap,
    ) -> Result<Self, TextureError> {
        check_src_len(width, height, pixels.len(), format)?;

        let mut id = 0;

        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, wrap.gl_wrap() as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, wrap.gl_wrap() as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter.gl_min() as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter.gl_mag() as i32);

            // RGB rows are not 4-byte aligned for most widths
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                format.gl_format() as i32,
                width as i32,
                height as i32,
                0,
                format.gl_format(),
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const c_void,
            );
            gl::GenerateMipmap(gl::TEXTURE_2D);
        }

        Ok(Self { id })
    }

    pub fn bind(&self, unit: u8) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
            gl::BindTexture(gl::TEXTURE_2D, self.id);
        }
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

fn check_src_len(
    width: u32,
    height: u32,
    len: usize,
    format: TextureFormat,
) -> Result<(), TextureError> {
    if width as usize * height as usize * format.channels() as usize != len {
        return Err(TextureError::InvalidSrcLength);
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("invalid source data length")]
    InvalidSrcLength,
}

#[derive(Debug, Clone, Copy)]
pub enum TextureFormat {
    Rgb,
    Rgba,
}

impl TextureFormat {
    pub fn channels(&self) -> u8 {
        match self {
            TextureFormat::Rgb => 3,
            TextureFormat::Rgba => 4,
        }
    }

    fn gl_format(&self) -> u32 {
        match self {
            TextureFormat::Rgb => gl::RGB,
            TextureFormat::Rgba => gl::RGBA,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

impl TextureFilter {
    fn gl_min(&self) -> u32 {
        match self {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR_MIPMAP_LINEAR,
        }
    }

    fn gl_mag(&self) -> u32 {
        match self {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

impl TextureWrap {
    fn gl_wrap(&self) -> u32 {
        match self {
            TextureWrap::Repeat => gl::REPEAT,
            TextureWrap::ClampToEdge => gl::CLAMP_TO_EDGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn src_length_must_match_dimensions() {
        assert!(check_src_len(4, 4, 4 * 4 * 4, TextureFormat::Rgba).is_ok());
        assert!(check_src_len(4, 4, 4 * 4 * 3, TextureFormat::Rgb).is_ok());

        assert!(matches!(
            check_src_len(4, 4, 4 * 4 * 3, TextureFormat::Rgba),
            Err(TextureError::InvalidSrcLength)
        ));
    }

    #[test]
    fn formats_report_channel_counts() {
        assert_eq!(TextureFormat::Rgb.channels(), 3);
        assert_eq!(TextureFormat::Rgba.channels(), 4);
    }
}
