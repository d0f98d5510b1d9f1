use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::assets::color::ColorDef;
use crate::effects::blur::blur_iterations;
use crate::foundation::core::Position;
use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::layer::Layer;

/// Number of rotated copies composing a radial shadow.
pub const RADIAL_STEPS: u32 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowDirection {
    /// One copy shifted by the offset.
    #[default]
    None,
    /// Copies shifted by the offset rotated in quarter turns, for an all-around halo.
    Radial,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowParams {
    pub offset: Position,
    pub color: ColorDef,
    pub iterations: u32,
    pub scale: f64,
    pub direction: ShadowDirection,
}

impl ShadowParams {
    pub fn directional(offset: Position, color: ColorDef, iterations: u32) -> Self {
        Self {
            offset,
            color,
            iterations,
            scale: 1.0,
            direction: ShadowDirection::None,
        }
    }
}

/// Put a blurred, tinted copy of `layer`'s silhouette beneath it.
///
/// The silhouette takes the shadow color with the layer's alpha, is blurred
/// `params.iterations` times, then resampled through `(scale, 0, -dx, 0, scale, -dy)`.
/// The original layer is composited on top, so the shadow only shows where the layer is not
/// opaque.
pub fn drop_shadow(layer: &Layer, params: &ShadowParams) -> HuntmapResult<Layer> {
    if !params.scale.is_finite() || params.scale <= 0.0 {
        return Err(HuntmapError::config(format!(
            "shadow scale must be finite and > 0, got {}",
            params.scale
        )));
    }

    let silhouette = tinted_silhouette(layer, params.color)?;
    let base = blur_iterations(&silhouette, params.iterations)?;

    let translate = params.offset.negate();
    let mut shadow = resample_affine(&base, params.scale, translate)?;
    if params.direction == ShadowDirection::Radial {
        let step = TAU / f64::from(RADIAL_STEPS);
        for k in 1..RADIAL_STEPS {
            let t = translate.rotate(step * f64::from(k));
            let copy = resample_affine(&base, params.scale, t)?;
            shadow.under(&copy)?;
        }
    }

    shadow.over(layer)?;
    Ok(shadow)
}

/// The layer's alpha tinted with `color`. The color's own alpha scales the silhouette, so a
/// translucent shadow color gives a lighter shadow rather than being ignored.
fn tinted_silhouette(layer: &Layer, color: ColorDef) -> HuntmapResult<Layer> {
    let tint = color.to_rgba8_premul().to_array();
    let mut data = Vec::with_capacity(layer.data().len());
    for a in layer.alpha() {
        let a = u16::from(a);
        data.extend(tint.iter().map(|&c| mul_div255_u8(u16::from(c), a)));
    }
    Layer::from_premul_bytes(layer.width(), layer.height(), data)
}

/// Nearest-neighbor inverse mapping: `out(x, y) = src(scale*x + t.x, scale*y + t.y)`, sampled at
/// pixel centers; samples outside `src` are transparent.
fn resample_affine(src: &Layer, scale: f64, t: Position) -> HuntmapResult<Layer> {
    let (w, h) = src.size();
    let mut out = Layer::transparent(w, h)?;
    let data = src.data();
    let dst = out.data_mut();
    for y in 0..h {
        let sy = (scale * (f64::from(y) + 0.5) + t.y).floor();
        if sy < 0.0 || sy >= f64::from(h) {
            continue;
        }
        let sy = sy as usize;
        for x in 0..w {
            let sx = (scale * (f64::from(x) + 0.5) + t.x).floor();
            if sx < 0.0 || sx >= f64::from(w) {
                continue;
            }
            let si = (sy * w as usize + sx as usize) * 4;
            let di = (y as usize * w as usize + x as usize) * 4;
            dst[di..di + 4].copy_from_slice(&data[si..si + 4]);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shadow.rs"]
mod tests;
