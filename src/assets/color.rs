use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vello_cpu::peniko::color as css;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::marks::model::RankLabel;

/// A straight-alpha color with normalized `0..=1` channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDef {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ColorDef {
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        let a = self.a.clamp(0.0, 1.0);
        let r = (self.r.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let g = (self.g.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let b = (self.b.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);

        Rgba8Premul {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: to_u8(a),
        }
    }

    pub(crate) fn to_paint(self) -> vello_cpu::peniko::Color {
        let [r, g, b, a] = self.to_rgba8();
        vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
    }

    /// Parse a hex string or a CSS color (`darkred`, `rgb(255, 0, 0)`, `hsl(...)`).
    pub fn parse(s: &str) -> HuntmapResult<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return parse_hex(s).map_err(HuntmapError::config);
        }
        parse_css(s)
            .or_else(|| parse_hex(s).ok())
            .ok_or_else(|| HuntmapError::config(format!("unknown color \"{s}\"")))
    }
}

fn to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            HslaObj {
                h: f64,
                s: f64,
                l: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::HslaObj { h, s, l, a } => Ok(hsla_to_rgba(h, s, l, a)),
            Repr::Arr(v) => {
                if v.len() == 3 {
                    Ok(Self::rgba(v[0], v[1], v[2], 1.0))
                } else if v.len() == 4 {
                    Ok(Self::rgba(v[0], v[1], v[2], v[3]))
                } else {
                    Err(serde::de::Error::custom(
                        "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                    ))
                }
            }
        }
    }
}

/// CSS color syntax: every named color plus `rgb()`, `hsl()` and friends.
fn parse_css(s: &str) -> Option<ColorDef> {
    let color = css::parse_color(&s.to_ascii_lowercase())
        .ok()?
        .to_alpha_color::<css::Srgb>();
    let [r, g, b, a] = color.components.map(f64::from);
    Some(ColorDef::rgba(r, g, b, a))
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }

    let (r, g, b, a) = match s.len() {
        6 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            (r, g, b, 255)
        }
        8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = hex_byte(&s[6..8])?;
            (r, g, b, a)
        }
        _ => {
            return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
        }
    };

    Ok(ColorDef::from_rgba8(r, g, b, a))
}

fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> ColorDef {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return ColorDef::rgba(l, l, l, a);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    ColorDef::rgba(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
        a,
    )
}

/// Rank label to fill color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, ColorDef>",
    into = "BTreeMap<String, ColorDef>"
)]
pub struct Palette {
    colors: BTreeMap<RankLabel, ColorDef>,
}

impl Palette {
    /// Build a palette; every label of [`RankLabel::ALL`] must have a color.
    pub fn new(colors: BTreeMap<RankLabel, ColorDef>) -> HuntmapResult<Self> {
        let missing: Vec<&str> = RankLabel::ALL
            .iter()
            .filter(|l| !colors.contains_key(l))
            .map(|l| l.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(HuntmapError::config(format!(
                "missing colors for ranks: {}",
                missing.join(", ")
            )));
        }
        Ok(Self { colors })
    }

    pub fn color(&self, label: RankLabel) -> ColorDef {
        // Presence of every label is checked in `new`.
        self.colors.get(&label).copied().unwrap_or(ColorDef::BLACK)
    }
}

impl TryFrom<BTreeMap<String, ColorDef>> for Palette {
    type Error = HuntmapError;

    fn try_from(raw: BTreeMap<String, ColorDef>) -> HuntmapResult<Self> {
        let mut colors = BTreeMap::new();
        for (rank, color) in raw {
            let label: RankLabel = rank
                .parse()
                .map_err(|_| HuntmapError::config(format!("color given for unknown rank \"{rank}\"")))?;
            colors.insert(label, color);
        }
        Self::new(colors)
    }
}

impl From<Palette> for BTreeMap<String, ColorDef> {
    fn from(p: Palette) -> Self {
        p.colors
            .into_iter()
            .map(|(label, color)| (label.as_str().to_string(), color))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
