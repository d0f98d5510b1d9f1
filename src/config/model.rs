use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::color::{ColorDef, Palette};
use crate::effects::shadow::{ShadowDirection, ShadowParams};
use crate::foundation::core::Position;
use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::render::marker::MarkerStyle;
use crate::transform::coords::DEFAULT_SCALE;

/// Styling for every zone render. Immutable once loaded and shared by reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotateConfig {
    pub marker: MarkerConfig,
    pub legend: LegendConfig,
    pub colors: Palette,
    #[serde(default)]
    pub zones: BTreeMap<String, ZoneSettings>,
}

impl AnnotateConfig {
    pub fn from_json(json: &str) -> HuntmapResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> HuntmapResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            HuntmapError::config(format!("failed to read config \"{}\": {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> HuntmapResult<()> {
        self.marker.validate()?;
        self.legend.validate()?;
        for (name, zone) in &self.zones {
            zone.validate(name)?;
        }
        Ok(())
    }

    pub fn zone(&self, name: &str) -> HuntmapResult<&ZoneSettings> {
        self.zones
            .get(name)
            .ok_or_else(|| HuntmapError::config(format!("unknown zone \"{name}\"")))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub size: f64,
    pub inner_size_scale: f64,
    pub shadow_offset: Position,
    pub shadow_color: ColorDef,
    pub shadow_iterations: u32,
    #[serde(default = "default_shadow_scale")]
    pub shadow_scale: f64,
    #[serde(default)]
    pub shadow_direction: ShadowDirection,
}

impl MarkerConfig {
    pub fn style(&self) -> MarkerStyle {
        MarkerStyle {
            size: self.size,
            inner_size_scale: self.inner_size_scale,
        }
    }

    pub fn shadow(&self) -> ShadowParams {
        ShadowParams {
            offset: self.shadow_offset,
            color: self.shadow_color,
            iterations: self.shadow_iterations,
            scale: self.shadow_scale,
            direction: self.shadow_direction,
        }
    }

    fn validate(&self) -> HuntmapResult<()> {
        self.style().validate()?;
        if !self.shadow_scale.is_finite() || self.shadow_scale <= 0.0 {
            return Err(HuntmapError::config(format!(
                "marker shadow_scale must be finite and > 0, got {}",
                self.shadow_scale
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    /// Padding between the border and the items.
    pub inner_offset: Position,
    pub shadow_offset: Position,
    pub column_spacing: f64,
    pub line_spacing: f64,
    /// Legend dot diameter relative to the height of a lowercase letter.
    pub mark_scale: f64,
    pub font_stroke: f64,
    /// Gap between the outer and inner border rectangles.
    pub border_space: f64,
    pub font: PathBuf,
    pub font_size: f32,
    pub shadow_color: ColorDef,
    pub shadow_iterations: u32,
    #[serde(default = "default_text_color")]
    pub text_color: ColorDef,
    #[serde(default = "default_text_stroke_color")]
    pub text_stroke_color: ColorDef,
    #[serde(default = "default_border_fill")]
    pub border_fill: ColorDef,
    #[serde(default = "default_border_outline")]
    pub border_outline: ColorDef,
}

impl LegendConfig {
    pub fn shadow(&self) -> ShadowParams {
        ShadowParams::directional(self.shadow_offset, self.shadow_color, self.shadow_iterations)
    }

    fn validate(&self) -> HuntmapResult<()> {
        let non_negative = [
            ("column_spacing", self.column_spacing),
            ("line_spacing", self.line_spacing),
            ("mark_scale", self.mark_scale),
            ("font_stroke", self.font_stroke),
            ("border_space", self.border_space),
        ];
        for (field, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(HuntmapError::config(format!(
                    "legend {field} must be finite and >= 0, got {v}"
                )));
            }
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(HuntmapError::config(format!(
                "legend font_size must be finite and > 0, got {}",
                self.font_size
            )));
        }
        Ok(())
    }
}

/// Where and how tall a zone's legend is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendPlacement {
    pub rows: i64,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneSettings {
    /// Map scale in percent.
    #[serde(default = "default_zone_scale")]
    pub scale: f64,
    pub legend: LegendPlacement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zonename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansion: Option<String>,
}

impl ZoneSettings {
    pub fn new(scale: f64, rows: i64, position: Position) -> Self {
        Self {
            scale,
            legend: LegendPlacement { rows, position },
            region: None,
            filename: None,
            zonename: None,
            expansion: None,
        }
    }

    /// Map file stem for this zone, falling back to the zone's own name.
    pub fn file_stem<'a>(&'a self, zone: &'a str) -> &'a str {
        self.filename.as_deref().unwrap_or(zone)
    }

    fn validate(&self, zone: &str) -> HuntmapResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(HuntmapError::config(format!(
                "zone \"{zone}\": scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        if self.legend.rows <= 0 {
            return Err(HuntmapError::config(format!(
                "zone \"{zone}\": legend rows must be > 0, got {}",
                self.legend.rows
            )));
        }
        Ok(())
    }
}

fn default_shadow_scale() -> f64 {
    1.0
}

fn default_zone_scale() -> f64 {
    DEFAULT_SCALE
}

fn default_text_color() -> ColorDef {
    ColorDef::WHITE
}

fn default_text_stroke_color() -> ColorDef {
    ColorDef::BLACK
}

fn default_border_fill() -> ColorDef {
    ColorDef::from_rgba8(0xdd, 0xbf, 0x77, 0x7f)
}

fn default_border_outline() -> ColorDef {
    ColorDef::from_rgba8(0xa0, 0x7d, 0x4f, 0xff)
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
