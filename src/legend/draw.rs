use crate::assets::color::Palette;
use crate::assets::font::{LegendFont, TextStyle};
use crate::config::model::LegendConfig;
use crate::effects::shadow::drop_shadow;
use crate::foundation::core::{Position, Rect};
use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::legend::layout::{LABEL_GAP_SCALE, LegendEntry, LegendPlan};
use crate::render::layer::Layer;
use crate::render::surface::DrawSurface;

/// Outline width of the outer border rectangle.
pub const OUTER_BORDER_WIDTH: f64 = 3.0;
/// Outline width of the inner border rectangle.
pub const INNER_BORDER_WIDTH: f64 = 1.0;

/// Draw a planned legend onto a transparent layer of `canvas` size.
///
/// The item layer and the border layer are shadowed separately, then the items are
/// composited over the border. `position` is the panel's top-left corner.
pub fn draw_legend(
    canvas: (u32, u32),
    position: Position,
    entries: &[LegendEntry],
    plan: &LegendPlan,
    style: &LegendConfig,
    palette: &Palette,
    font: &mut dyn LegendFont,
) -> HuntmapResult<Layer> {
    if entries.len() != plan.cells.len() {
        return Err(HuntmapError::input(format!(
            "legend plan has {} cells for {} entries",
            plan.cells.len(),
            entries.len()
        )));
    }

    let items = draw_items(canvas, position + style.inner_offset, entries, plan, style, palette, font)?;
    let items = drop_shadow(&items, &style.shadow())?;

    let border = draw_border(canvas, position, plan.panel_size(style.inner_offset), style)?;
    let mut panel = drop_shadow(&border, &style.shadow())?;
    panel.over(&items)?;
    Ok(panel)
}

fn draw_items(
    canvas: (u32, u32),
    origin: Position,
    entries: &[LegendEntry],
    plan: &LegendPlan,
    style: &LegendConfig,
    palette: &Palette,
    font: &mut dyn LegendFont,
) -> HuntmapResult<Layer> {
    let mut surface = DrawSurface::transparent(canvas.0, canvas.1)?;
    let hc = plan.cap_height;
    let ms = style.mark_scale;
    let text_style = TextStyle {
        fill: style.text_color,
        stroke: style.text_stroke_color,
        stroke_width: style.font_stroke,
    };

    for cell in &plan.cells {
        let entry = &entries[cell.entry];
        if entry.name.is_empty() {
            continue;
        }
        let pos = origin + cell.offset;

        let top_left = pos + (0.0, (1.0 - ms) * 0.5 * hc);
        let bottom_right = pos + (ms * hc, (1.0 + ms) * 0.5 * hc);
        surface.fill_ellipse(
            Rect::from_points(top_left.to_point(), bottom_right.to_point()),
            palette.color(entry.label),
        );

        let text_origin = pos + (hc * ms * LABEL_GAP_SCALE, 0.0);
        font.draw(&mut surface, &entry.text(), text_origin.to_point(), &text_style)?;
    }

    surface.finish()
}

fn draw_border(
    canvas: (u32, u32),
    position: Position,
    size: Position,
    style: &LegendConfig,
) -> HuntmapResult<Layer> {
    let mut surface = DrawSurface::transparent(canvas.0, canvas.1)?;

    let outer = Rect::from_points(position.to_point(), (position + size).to_point());
    surface.fill_rect(outer, style.border_fill);
    surface.outline_rect(outer, OUTER_BORDER_WIDTH, style.border_outline);

    let space = style.border_space;
    let inner = Rect::from_points(
        (position + space).to_point(),
        (position + size - space).to_point(),
    );
    surface.outline_rect(inner, INNER_BORDER_WIDTH, style.border_outline);

    surface.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/legend/draw.rs"]
mod tests;
