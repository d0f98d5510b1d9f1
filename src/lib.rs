//! Huntmap annotates zone map rasters with hunt mark spawn markers and a legend.
//!
//! A zone render runs in four steps:
//!
//! 1. **Resolve**: letter ranks `A`/`B` are numbered per zone (`A1`, `A2`, ...) by mark name.
//! 2. **Group**: spawns are grouped by exact map coordinate; each coordinate gets one glyph.
//! 3. **Markers**: glyphs are drawn at pixel positions, shadowed and composited onto the map.
//! 4. **Legend**: entries are laid out column-major in a bordered, shadowed panel.
//!
//! Everything works on premultiplied RGBA8 [`Layer`]s. The core performs no file IO; the
//! base map and the legend font are handed in by the caller.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod effects;
mod foundation;
mod legend;
mod marks;
mod render;
mod transform;

pub use assets::color::{ColorDef, Palette};
pub use assets::font::{LegendFont, ParleyFont, TextExtent, TextStyle};
pub use config::model::{AnnotateConfig, LegendConfig, LegendPlacement, MarkerConfig, ZoneSettings};
pub use effects::blend::{blend_with_mask, mask_stem_for_expansion};
pub use effects::blur::{BLUR_RADIUS, BLUR_SIGMA, blur_iterations};
pub use effects::composite::{PremulRgba8, over_in_place, over_pixel, under_in_place};
pub use effects::shadow::{RADIAL_STEPS, ShadowDirection, ShadowParams, drop_shadow};
pub use foundation::core::{Affine, Operand, Point, Position, Rect, Rgba8Premul, Vec2};
pub use foundation::error::{HuntmapError, HuntmapResult};
pub use legend::draw::{INNER_BORDER_WIDTH, OUTER_BORDER_WIDTH, draw_legend};
pub use legend::layout::{
    LABEL_GAP_SCALE, LegendCell, LegendEntry, LegendPlan, METRIC_STROKE, compute_columns,
    plan_legend,
};
pub use marks::model::{Mark, MarkCatalog, Rank, RankLabel, RankSet, SpawnPoint};
pub use marks::remap::{ResolvedMark, remap_ranks};
pub use marks::spawns::{
    DEFAULT_NEAR_THRESHOLD, NearDuplicate, SpawnGroup, SpawnGroups, find_near_duplicate_spawns,
    find_near_duplicates, group_by_coordinate,
};
pub use render::layer::Layer;
pub use render::marker::{MarkerGlyph, MarkerStyle, QUADRANTS, draw_marker};
pub use render::pipeline::{MarkerPlacement, ZoneRender, render_zone};
pub use render::surface::DrawSurface;
pub use transform::coords::{
    DEFAULT_SCALE, MAP_EXTENT, PIXEL_EXTENT, map_to_pixel, pixel_to_map, pixels_per_map_unit,
    spawn_to_screen,
};
