use crate::foundation::error::HuntmapResult;
use crate::render::layer::Layer;

/// Radius of the fixed blur kernel, in pixels.
pub const BLUR_RADIUS: u32 = 2;
/// Standard deviation of the fixed blur kernel.
pub const BLUR_SIGMA: f64 = 1.0;

const Q16_ONE: u32 = 1 << 16;

/// Apply the fixed small kernel `iterations` times.
///
/// Each pass is separable (horizontal then vertical) with edge clamping; repeating it widens the
/// spread. `iterations == 0` returns an unmodified copy.
pub fn blur_iterations(layer: &Layer, iterations: u32) -> HuntmapResult<Layer> {
    if iterations == 0 {
        return Ok(layer.clone());
    }
    let (width, height) = layer.size();
    let (w, h) = (width as usize, height as usize);
    let kernel = fixed_kernel_q16();

    let mut cur = layer.data().to_vec();
    let mut tmp = vec![0u8; cur.len()];
    for _ in 0..iterations {
        // Rows: neighbours are 1 pixel apart. Columns: neighbours are one row apart.
        convolve(&cur, &mut tmp, Axis { len: w, lines: h, step: 1, line_step: w }, &kernel);
        convolve(&tmp, &mut cur, Axis { len: h, lines: w, step: w, line_step: 1 }, &kernel);
    }
    Layer::from_premul_bytes(width, height, cur)
}

/// Normalized gaussian taps in Q16, summing to exactly `1 << 16`.
fn fixed_kernel_q16() -> [u32; 2 * BLUR_RADIUS as usize + 1] {
    let r = BLUR_RADIUS as i32;
    let denom = 2.0 * BLUR_SIGMA * BLUR_SIGMA;
    let mut weights = [0.0f64; 2 * BLUR_RADIUS as usize + 1];
    for (slot, i) in weights.iter_mut().zip(-r..=r) {
        *slot = (-f64::from(i * i) / denom).exp();
    }
    let sum: f64 = weights.iter().sum();

    let mut taps = weights.map(|w| ((w / sum) * f64::from(Q16_ONE)).round() as u32);
    let total: u32 = taps.iter().sum();
    let mid = BLUR_RADIUS as usize;
    // Rounding residue goes to the centre tap.
    taps[mid] = (taps[mid] + Q16_ONE).saturating_sub(total);
    taps
}

/// One blur direction over a pixel grid, in pixel units.
#[derive(Clone, Copy)]
struct Axis {
    /// Pixels along the blur direction.
    len: usize,
    /// Independent lines to blur.
    lines: usize,
    /// Distance between neighbours along the direction.
    step: usize,
    /// Distance between the starts of two lines.
    line_step: usize,
}

fn convolve(src: &[u8], dst: &mut [u8], axis: Axis, taps: &[u32]) {
    let radius = (taps.len() / 2) as isize;
    let last = axis.len.saturating_sub(1) as isize;
    for line in 0..axis.lines {
        let origin = line * axis.line_step;
        for i in 0..axis.len {
            let mut acc = [0u64; 4];
            for (k, &tap) in taps.iter().enumerate() {
                let j = (i as isize + k as isize - radius).clamp(0, last) as usize;
                let px = (origin + j * axis.step) * 4;
                for (c, slot) in acc.iter_mut().enumerate() {
                    *slot += u64::from(tap) * u64::from(src[px + c]);
                }
            }
            let out = (origin + i * axis.step) * 4;
            for (c, v) in acc.into_iter().enumerate() {
                dst[out + c] = ((v + (1 << 15)) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
