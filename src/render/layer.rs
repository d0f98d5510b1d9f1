use crate::effects::composite::{over_in_place, under_in_place};
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::foundation::math::unpremul_u8;

/// An owned raster in premultiplied RGBA8, row-major, tightly packed.
///
/// Every intermediate of a zone render (marker layer, shadows, legend panel) is a `Layer` of the
/// base image size; they are combined with [`Layer::over`] / [`Layer::under`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Layer {
    /// Fully transparent layer.
    pub fn transparent(width: u32, height: u32) -> HuntmapResult<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Layer filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgba8Premul) -> HuntmapResult<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: color.to_array().repeat(len / 4),
        })
    }

    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> HuntmapResult<Self> {
        if data.len() != byte_len(width, height)? {
            return Err(HuntmapError::render(
                "layer bytes must match width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Import straight-alpha RGBA8 (what decoders hand out).
    pub fn from_straight_bytes(width: u32, height: u32, mut data: Vec<u8>) -> HuntmapResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul_bytes(width, height, data)
    }

    pub fn from_image(img: &image::RgbaImage) -> HuntmapResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_straight_bytes(width, height, img.as_raw().clone())
    }

    /// Export as straight-alpha RGBA8 for encoders.
    pub fn to_image(&self) -> HuntmapResult<image::RgbaImage> {
        let mut raw = self.data.clone();
        for px in raw.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = unpremul_u8(px[0], a);
            px[1] = unpremul_u8(px[1], a);
            px[2] = unpremul_u8(px[2], a);
        }
        image::RgbaImage::from_raw(self.width, self.height, raw)
            .ok_or_else(|| HuntmapError::render("layer bytes do not fit image dimensions"))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
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

    /// Alpha channel, one byte per pixel.
    pub fn alpha(&self) -> Vec<u8> {
        self.data.chunks_exact(4).map(|px| px[3]).collect()
    }

    /// Number of pixels with non-zero alpha.
    pub fn coverage(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Composite `src` over `self` in place.
    pub fn over(&mut self, src: &Layer) -> HuntmapResult<()> {
        self.check_same_size(src)?;
        over_in_place(&mut self.data, &src.data)
    }

    /// Composite `self` over `below`, keeping the result in `self`.
    pub fn under(&mut self, below: &Layer) -> HuntmapResult<()> {
        self.check_same_size(below)?;
        under_in_place(&mut self.data, &below.data)
    }

    fn check_same_size(&self, other: &Layer) -> HuntmapResult<()> {
        if self.size() != other.size() {
            return Err(HuntmapError::render(format!(
                "layer size mismatch: {}x{} vs {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        Ok(())
    }
}

fn byte_len(width: u32, height: u32) -> HuntmapResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| HuntmapError::render("layer buffer size overflow"))
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
