use std::path::PathBuf;

use super::*;
use crate::assets::color::ColorDef;
use crate::assets::font::{TextExtent, TextStyle};
use crate::foundation::core::Point;
use crate::render::surface::DrawSurface;

/// Every character is a 10x20 block.
struct BlockFont {
    measured: Vec<String>,
}

impl LegendFont for BlockFont {
    fn measure(&mut self, text: &str, stroke: f64) -> HuntmapResult<TextExtent> {
        self.measured.push(text.to_string());
        Ok(TextExtent {
            width: 10.0 * text.chars().count() as f64 + 2.0 * stroke,
            height: 20.0 + 2.0 * stroke,
        })
    }

    fn draw(
        &mut self,
        _surface: &mut DrawSurface,
        _text: &str,
        _origin: Point,
        _style: &TextStyle,
    ) -> HuntmapResult<()> {
        Ok(())
    }
}

fn font() -> BlockFont {
    BlockFont {
        measured: Vec::new(),
    }
}

fn style() -> LegendConfig {
    LegendConfig {
        inner_offset: Position::new(10.0, 8.0),
        shadow_offset: Position::new(2.0, 2.0),
        column_spacing: 20.0,
        line_spacing: 5.0,
        mark_scale: 0.5,
        font_stroke: 0.0,
        border_space: 4.0,
        font: PathBuf::from("unused.otf"),
        font_size: 20.0,
        shadow_color: ColorDef::BLACK,
        shadow_iterations: 0,
        text_color: ColorDef::WHITE,
        text_stroke_color: ColorDef::BLACK,
        border_fill: ColorDef::WHITE,
        border_outline: ColorDef::BLACK,
    }
}

fn entries(names: &[&str]) -> Vec<LegendEntry> {
    names
        .iter()
        .map(|n| LegendEntry::new(*n, RankLabel::S))
        .collect()
}

#[test]
fn compute_columns_matches_reference_cases() {
    assert_eq!(compute_columns(10, 3).unwrap(), (3, 4));
    assert_eq!(compute_columns(9, 3).unwrap(), (3, 3));
    assert_eq!(compute_columns(5, 10).unwrap(), (5, 1));
    assert_eq!(compute_columns(1, 1).unwrap(), (1, 1));
    assert_eq!(compute_columns(4, 4).unwrap(), (4, 1));
}

#[test]
fn compute_columns_rejects_non_positive_counts() {
    assert!(matches!(compute_columns(4, 0), Err(HuntmapError::Input(_))));
    assert!(matches!(compute_columns(-5, 3), Err(HuntmapError::Input(_))));
    assert!(matches!(compute_columns(0, 3), Err(HuntmapError::Input(_))));
    assert!(matches!(compute_columns(3, -1), Err(HuntmapError::Input(_))));
}

#[test]
fn entry_text_uses_display_abbreviation() {
    assert_eq!(LegendEntry::new("Croque-mitaine", RankLabel::A2).text(), "Croque-mitaine (A)");
    assert_eq!(LegendEntry::new("Bonnacon", RankLabel::SSs).text(), "Bonnacon (SS)");
}

#[test]
fn cells_fill_column_major() {
    let plan = plan_legend(&entries(&["a", "b", "c", "d", "e"]), 2, &style(), &mut font()).unwrap();
    assert_eq!((plan.rows, plan.columns), (2, 3));
    let grid: Vec<(usize, usize)> = plan.cells.iter().map(|c| (c.row, c.column)).collect();
    assert_eq!(grid, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
}

#[test]
fn column_widths_track_the_widest_item() {
    // Widths use a 1px outline: dot advance = 22 * 0.5 * 1.75 = 19.25,
    // "xyz (S)" = 72 wide, "a (S)" = 52 wide.
    let plan = plan_legend(&entries(&["a", "xyz", "a"]), 2, &style(), &mut font()).unwrap();
    assert_eq!(plan.column_widths, vec![91.25, 71.25]);
    assert_eq!(plan.cells[2].offset, Position::new(91.25 + 20.0, 0.0));
    assert_eq!(plan.cells[1].offset, Position::new(0.0, 25.0));
    assert_eq!(plan.size, Position::new(20.0 + 91.25 + 71.25, 2.0 * 20.0 + 5.0));
    assert_eq!(plan.panel_size(style().inner_offset), Position::new(202.5, 61.0));
}

#[test]
fn only_row_height_follows_the_configured_outline() {
    let mut s = style();
    s.font_stroke = 3.0;
    let plan = plan_legend(&entries(&["a", "b"]), 5, &s, &mut font()).unwrap();
    assert_eq!(plan.row_height, 26.0);
    assert_eq!(plan.cap_height, 22.0);
    assert_eq!(plan.dot_diameter(s.mark_scale), 11.0);
    // 19.25 dot advance plus "a (S)" at a 1px outline.
    assert_eq!(plan.column_widths, vec![71.25]);
    assert_eq!((plan.rows, plan.columns), (2, 1));
}

#[test]
fn empty_names_keep_their_cell_without_measuring() {
    let mut f = font();
    let plan = plan_legend(&entries(&["a", "", "b"]), 3, &style(), &mut f).unwrap();
    assert_eq!(plan.cells.len(), 3);
    assert_eq!(plan.cells[1].width, 0.0);
    assert_eq!(plan.cells[2].offset, Position::new(0.0, 50.0));
    assert!(!f.measured.iter().any(|t| t.is_empty() || t == " (S)"));
}

#[test]
fn empty_legend_is_an_input_error() {
    assert!(matches!(
        plan_legend(&[], 3, &style(), &mut font()),
        Err(HuntmapError::Input(_))
    ));
}
