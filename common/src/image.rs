use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// 8-bit RGBA pixel data for texture upload.
#[derive(Debug)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Image {
    /// A `cells` x `cells` checkerboard over a square `size` x `size` image.
    pub fn checkerboard(size: u32, cells: u32, light: [u8; 3], dark: [u8; 3]) -> Self {
        let cell_px = (size / cells).max(1);
        let mut pixels = Vec::with_capacity(size as usize * size as usize * 4);

        for y in 0..size {
            for x in 0..size {
                let color = if (x / cell_px + y / cell_px) % 2 == 0 {
                    light
                } else {
                    dark
                };

                pixels.extend_from_slice(&color);
                pixels.push(255);
            }
        }

        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    /// A disc of `color` fading linearly to black towards the corners.
    pub fn radial_glow(size: u32, color: [u8; 3]) -> Self {
        let center = (size as f32 - 1.0) / 2.0;
        let reach = center * std::f32::consts::SQRT_2;
        let mut pixels = Vec::with_capacity(size as usize * size as usize * 4);

        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 - center;
                let dy = y as f32 - center;
                let falloff = (1.0 - (dx * dx + dy * dy).sqrt() / reach).clamp(0.0, 1.0);

                for channel in color {
                    pixels.push((channel as f32 * falloff) as u8);
                }
                pixels.push(255);
            }
        }

        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    /// Decodes an 8-bit RGB or RGBA PNG; RGB is expanded to opaque RGBA.
    pub fn from_png<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| ImageError::Input {
            path: path.to_path_buf(),
            source,
        })?;

        let decoder = png::Decoder::new(file);
        let mut reader = decoder.read_info()?;

        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        if info.bit_depth != png::BitDepth::Eight {
            return Err(ImageError::Unsupported {
                color_type: info.color_type,
                bit_depth: info.bit_depth,
            });
        }

        let pixels = match info.color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => {
                let mut rgba = Vec::with_capacity(buf.len() / 3 * 4);

                for rgb in buf.chunks_exact(3) {
                    rgba.extend_from_slice(rgb);
                    rgba.push(255);
                }

                rgba
            }
            other => {
                return Err(ImageError::Unsupported {
                    color_type: other,
                    bit_depth: info.bit_depth,
                })
            }
        };

        Ok(Self {
            width: info.width,
            height: info.height,
            pixels,
        })
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("could not open image {path:?}: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not decode image: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("unsupported image format: {color_type:?}, {bit_depth:?}")]
    Unsupported {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(image: &Image, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * image.width + x) * 4) as usize;

        image.pixels[i..i + 4].try_into().unwrap()
    }

    #[test]
    fn checkerboard_has_rgba_length() {
        let image = Image::checkerboard(64, 8, [255, 255, 255], [0, 0, 0]);

        assert_eq!(image.width, 64);
        assert_eq!(image.height, 64);
        assert_eq!(image.pixels.len(), 64 * 64 * 4);
    }

    #[test]
    fn checkerboard_cells_alternate() {
        let image = Image::checkerboard(64, 8, [200, 200, 200], [20, 20, 20]);

        // cell size is 8 px: (0,0) light, (8,0) dark, (8,8) light again
        assert_eq!(pixel(&image, 0, 0), [200, 200, 200, 255]);
        assert_eq!(pixel(&image, 8, 0), [20, 20, 20, 255]);
        assert_eq!(pixel(&image, 8, 8), [200, 200, 200, 255]);
    }

    #[test]
    fn radial_glow_fades_from_center() {
        let image = Image::radial_glow(65, [255, 128, 0]);

        let center = pixel(&image, 32, 32);
        let mid = pixel(&image, 48, 32);
        let corner = pixel(&image, 64, 64);

        assert!(center[0] > mid[0]);
        assert!(mid[0] > corner[0]);
        assert_eq!(center[3], 255);
    }

    #[test]
    fn png_roundtrip_rgba() {
        let source = Image::checkerboard(16, 4, [255, 0, 0], [0, 0, 255]);

        let path = std::env::temp_dir().join(format!("glsketch-rgba-{}.png", std::process::id()));
        write_png(&path, &source.pixels, 16, 16, png::ColorType::Rgba);

        let decoded = Image::from_png(&path).unwrap();

        assert_eq!(decoded.width, 16);
        assert_eq!(decoded.height, 16);
        assert_eq!(decoded.pixels, source.pixels);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn png_rgb_is_expanded_to_rgba() {
        let rgb: Vec<u8> = (0..4 * 4).flat_map(|i| [i as u8, 0, 255 - i as u8]).collect();

        let path = std::env::temp_dir().join(format!("glsketch-rgb-{}.png", std::process::id()));
        write_png(&path, &rgb, 4, 4, png::ColorType::Rgb);

        let decoded = Image::from_png(&path).unwrap();

        assert_eq!(decoded.pixels.len(), 4 * 4 * 4);
        assert_eq!(&decoded.pixels[..4], &[0, 0, 255, 255]);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_png_reports_its_path() {
        let err = Image::from_png("no/such/texture.png").unwrap_err();

        assert!(err.to_string().contains("no/such/texture.png"));
    }

    fn write_png(path: &Path, pixels: &[u8], width: u32, height: u32, color: png::ColorType) {
        let file = File::create(path).unwrap();

        let mut encoder = png::Encoder::new(file, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(pixels).unwrap();
    }
}
