use serde::{Deserialize, Serialize};

use crate::assets::color::Palette;
use crate::foundation::core::{Point, Position, Rect};
use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::marks::model::{RankLabel, RankSet};
use crate::render::surface::DrawSurface;

/// Quadrant start angles in degrees, clockwise from 3 o'clock, in paint order.
pub const QUADRANTS: [(f64, RankLabel); 4] = [
    (180.0, RankLabel::B1),
    (270.0, RankLabel::B2),
    (0.0, RankLabel::A1),
    (90.0, RankLabel::A2),
];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Edge of the square box the glyph is inscribed in, in pixels.
    pub size: f64,
    /// Inner circle size relative to `size`.
    pub inner_size_scale: f64,
}

impl MarkerStyle {
    pub fn validate(&self) -> HuntmapResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(HuntmapError::config(format!(
                "marker size must be finite and > 0, got {}",
                self.size
            )));
        }
        if !self.inner_size_scale.is_finite() || self.inner_size_scale < 0.0 {
            return Err(HuntmapError::config(format!(
                "marker inner_size_scale must be finite and >= 0, got {}",
                self.inner_size_scale
            )));
        }
        Ok(())
    }
}

/// The glyph drawn for one spawn coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerGlyph {
    /// Pie quadrants for the letter ranks present, plus the inner circle when `S` is present.
    Composite { quadrants: RankSet, inner: bool },
    /// One full circle in the color of `SS` or `SSs`.
    Full(RankLabel),
}

impl MarkerGlyph {
    /// Pick the glyph for the ranks sharing one coordinate.
    ///
    /// `SS` and `SSs` own the whole marker, so they may not share a coordinate with any
    /// other rank.
    pub fn from_ranks(ranks: RankSet) -> HuntmapResult<Self> {
        if ranks.is_empty() {
            return Err(HuntmapError::input("no ranks at marker position"));
        }

        let mut quadrants = RankSet::default();
        let mut inner = false;
        let mut full = None;
        for label in ranks.iter() {
            match label {
                RankLabel::A1 | RankLabel::A2 | RankLabel::B1 | RankLabel::B2 => {
                    quadrants.insert(label)
                }
                RankLabel::S => inner = true,
                RankLabel::SS | RankLabel::SSs => full = Some(label),
            }
        }

        match full {
            Some(label) if ranks.len() == 1 => Ok(Self::Full(label)),
            Some(_) => Err(HuntmapError::input(format!(
                "ranks {} cannot share a spawn point",
                ranks
                    .iter()
                    .map(RankLabel::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
            None => Ok(Self::Composite { quadrants, inner }),
        }
    }
}

/// Queue the glyph for `ranks` centered on `center`.
pub fn draw_marker<'s>(
    surface: &'s mut DrawSurface,
    center: Position,
    ranks: RankSet,
    palette: &Palette,
    style: &MarkerStyle,
) -> HuntmapResult<&'s mut DrawSurface> {
    let glyph = MarkerGlyph::from_ranks(ranks)?;
    let c = center.to_point();
    let radius = style.size / 2.0;

    match glyph {
        MarkerGlyph::Composite { quadrants, inner } => {
            for (start, label) in QUADRANTS {
                if quadrants.contains(label) {
                    surface.fill_pie(c, radius, start, 90.0, palette.color(label));
                }
            }
            if inner {
                let r = radius * style.inner_size_scale;
                surface.fill_ellipse(centered_box(c, r), palette.color(RankLabel::S));
            }
        }
        MarkerGlyph::Full(label) => {
            surface.fill_ellipse(centered_box(c, radius), palette.color(label));
        }
    }

    Ok(surface)
}

fn centered_box(c: Point, half: f64) -> Rect {
    Rect::new(c.x - half, c.y - half, c.x + half, c.y + half)
}

#[cfg(test)]
#[path = "../../tests/unit/render/marker.rs"]
mod tests;
