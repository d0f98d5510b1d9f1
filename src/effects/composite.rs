use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over on one premultiplied pixel.
#[inline]
pub fn over_pixel(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255 - u16::from(sa);
            std::array::from_fn(|i| src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv)))
        }
    }
}

/// `dst = src over dst` for two equal-length premultiplied RGBA8 buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> HuntmapResult<()> {
    check_buffers(dst, src)?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over_pixel([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// `dst = dst over below`, for putting shadows beneath a layer.
pub fn under_in_place(dst: &mut [u8], below: &[u8]) -> HuntmapResult<()> {
    check_buffers(dst, below)?;
    for (d, b) in dst.chunks_exact_mut(4).zip(below.chunks_exact(4)) {
        let out = over_pixel([b[0], b[1], b[2], b[3]], [d[0], d[1], d[2], d[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn check_buffers(a: &[u8], b: &[u8]) -> HuntmapResult<()> {
    if a.len() != b.len() || !a.len().is_multiple_of(4) {
        return Err(HuntmapError::render(format!(
            "compositing expects equal-length rgba8 buffers, got {} and {} bytes",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
