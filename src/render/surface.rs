use std::io::Cursor;

use anyhow::Context;
use image::imageops::FilterType;

use crate::assets::decode::{DecodedImage, unpremultiply_rgba8_in_place};
use crate::foundation::color::Rgba8;
use crate::foundation::error::{PfpError, PfpResult};

/// Largest accepted surface edge in pixels.
pub const MAX_SURFACE_EDGE: u32 = 16_384;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Raster surface in premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> PfpResult<Self> {
        if width == 0 || height == 0 {
            return Err(PfpError::composition("surface dimensions must be > 0"));
        }
        if width > MAX_SURFACE_EDGE || height > MAX_SURFACE_EDGE {
            return Err(PfpError::composition(format!(
                "surface {width}x{height} exceeds {MAX_SURFACE_EDGE}px"
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| PfpError::composition("surface size overflows"))?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            PfpError::composition(format!("allocate {width}x{height} surface: {e}"))
        })?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        let px = color.to_premul();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Source-over `image` stretched to cover the whole surface.
    ///
    /// No cropping and no aspect preservation: non-square layers are distorted.
    pub fn draw_stretched(&mut self, image: &DecodedImage) -> PfpResult<()> {
        if image.width == self.width && image.height == self.height {
            return over_in_place(&mut self.data, &image.rgba8_premul);
        }

        let src =
            image::RgbaImage::from_raw(image.width, image.height, image.rgba8_premul.clone())
                .ok_or_else(|| {
                    PfpError::composition(format!(
                        "layer buffer does not match {}x{}",
                        image.width, image.height
                    ))
                })?;
        // Resampled in premultiplied space.
        let scaled = image::imageops::resize(&src, self.width, self.height, FilterType::Triangle);
        over_in_place(&mut self.data, scaled.as_raw())
    }

    /// Un-premultiply and encode as PNG.
    pub fn encode_png(&self) -> PfpResult<Vec<u8>> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        let img = image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| PfpError::composition("surface buffer size mismatch"))?;

        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")
            .map_err(|e| PfpError::composition(format!("{e:#}")))?;
        Ok(buf)
    }
}

/// Porter-Duff source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Source-over `src` onto `dst`; both are premultiplied RGBA8 buffers of equal length.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> PfpResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PfpError::composition(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
