use crate::assets::font::LegendFont;
use crate::config::model::{AnnotateConfig, ZoneSettings};
use crate::effects::shadow::drop_shadow;
use crate::foundation::core::Position;
use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::legend::draw::draw_legend;
use crate::legend::layout::{LegendEntry, LegendPlan, plan_legend};
use crate::marks::model::{Mark, RankSet, SpawnPoint};
use crate::marks::remap::remap_ranks;
use crate::marks::spawns::group_by_coordinate;
use crate::render::layer::Layer;
use crate::render::marker::draw_marker;
use crate::render::surface::DrawSurface;
use crate::transform::coords::spawn_to_screen;

/// One glyph drawn on the map.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerPlacement {
    pub spawn: SpawnPoint,
    pub screen: Position,
    pub ranks: RankSet,
    /// Names of the marks sharing this spawn, sorted.
    pub marks: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ZoneRender {
    pub image: Layer,
    /// In first-seen spawn order.
    pub placements: Vec<MarkerPlacement>,
    /// One entry per mark, in input order.
    pub entries: Vec<LegendEntry>,
    /// `None` when the zone has no marks.
    pub legend: Option<LegendPlan>,
}

/// Annotate one zone's map.
///
/// Letter ranks are numbered, spawns are grouped by exact coordinate and get one glyph each.
/// The shadowed marker layer goes over `base`, then the legend panel goes over that.
#[tracing::instrument(skip_all, fields(marks = marks.len(), scale = settings.scale))]
pub fn render_zone(
    base: &Layer,
    marks: &[&Mark],
    settings: &ZoneSettings,
    config: &AnnotateConfig,
    font: &mut dyn LegendFont,
) -> HuntmapResult<ZoneRender> {
    if !settings.scale.is_finite() || settings.scale <= 0.0 {
        return Err(HuntmapError::config(format!(
            "zone scale must be finite and > 0, got {}",
            settings.scale
        )));
    }
    let style = config.marker.style();
    style.validate()?;

    let resolved = remap_ranks(marks)?;
    let groups = group_by_coordinate(&resolved);

    let (width, height) = base.size();
    let mut surface = DrawSurface::transparent(width, height)?;
    let mut placements = Vec::with_capacity(groups.len());
    for group in groups.iter() {
        let (x, y) = group.point.as_tuple();
        let screen = spawn_to_screen(x, y, settings.scale);
        let ranks = group.labels();
        draw_marker(&mut surface, screen, ranks, &config.colors, &style).map_err(|e| match e {
            HuntmapError::Input(msg) => HuntmapError::input(format!("spawn {}: {msg}", group.point)),
            other => other,
        })?;
        placements.push(MarkerPlacement {
            spawn: group.point,
            screen,
            ranks,
            marks: group.marks.keys().map(|n| n.to_string()).collect(),
        });
    }
    tracing::debug!(placements = placements.len(), "markers drawn");

    let markers = drop_shadow(&surface.finish()?, &config.marker.shadow())?;
    let mut image = base.clone();
    image.over(&markers)?;

    let entries: Vec<LegendEntry> = resolved.iter().map(LegendEntry::from).collect();
    let legend = if entries.is_empty() {
        tracing::debug!("no marks, legend skipped");
        None
    } else {
        let plan = plan_legend(&entries, settings.legend.rows, &config.legend, font)?;
        let panel = draw_legend(
            (width, height),
            settings.legend.position,
            &entries,
            &plan,
            &config.legend,
            &config.colors,
            font,
        )?;
        image.over(&panel)?;
        Some(plan)
    };

    Ok(ZoneRender {
        image,
        placements,
        entries,
        legend,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
