use crate::foundation::error::{HuntmapError, HuntmapResult};

/// Multiply a map's color channels by a parchment mask, keeping the map's alpha.
///
/// Both images are straight-alpha RGBA8 and must have the same size. Each color channel becomes
/// `floor(map * mask / 255)`.
pub fn blend_with_mask(
    map: &image::RgbaImage,
    mask: &image::RgbaImage,
) -> HuntmapResult<image::RgbaImage> {
    if map.dimensions() != mask.dimensions() {
        let (mw, mh) = map.dimensions();
        let (kw, kh) = mask.dimensions();
        return Err(HuntmapError::input(format!(
            "map size {mw}x{mh} does not match mask size {kw}x{kh}"
        )));
    }

    let mut out = map.clone();
    for (dst, k) in out.pixels_mut().zip(mask.pixels()) {
        for c in 0..3 {
            dst.0[c] = ((u16::from(dst.0[c]) * u16::from(k.0[c])) / 255) as u8;
        }
    }
    Ok(out)
}

/// Mask file stem for a zone's expansion tag.
///
/// Heavensward shares the A Realm Reborn parchment, and everything from Shadowbringers on
/// shares one texture.
pub fn mask_stem_for_expansion(expansion: &str) -> Option<&'static str> {
    match expansion {
        "ARR" | "HW" => Some("arrhw"),
        "SB" => Some("sb"),
        "SHB" | "EW" | "DT" => Some("shb"),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;
