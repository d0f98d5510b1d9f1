use serde_json::json;

use super::*;
use crate::assets::font::{TextExtent, TextStyle};
use crate::foundation::core::{Point, Rect, Rgba8Premul};
use crate::marks::model::{MarkCatalog, RankLabel};

struct BlockFont;

impl LegendFont for BlockFont {
    fn measure(&mut self, text: &str, stroke: f64) -> HuntmapResult<TextExtent> {
        Ok(TextExtent {
            width: 6.0 * text.chars().count() as f64 + 2.0 * stroke,
            height: 10.0 + 2.0 * stroke,
        })
    }

    fn draw(
        &mut self,
        surface: &mut DrawSurface,
        text: &str,
        origin: Point,
        style: &TextStyle,
    ) -> HuntmapResult<()> {
        let ext = self.measure(text, style.stroke_width)?;
        surface.fill_rect(
            Rect::new(origin.x, origin.y, origin.x + ext.width, origin.y + ext.height),
            style.fill,
        );
        Ok(())
    }
}

fn config() -> AnnotateConfig {
    let v = json!({
        "marker": {
            "size": 12,
            "inner_size_scale": 0.5,
            "shadow_offset": [2, 2],
            "shadow_color": "black",
            "shadow_iterations": 0
        },
        "legend": {
            "inner_offset": [4, 4],
            "shadow_offset": [1, 1],
            "column_spacing": 8,
            "line_spacing": 2,
            "mark_scale": 0.6,
            "font_stroke": 0,
            "border_space": 2,
            "font": "unused.otf",
            "font_size": 10,
            "shadow_color": "black",
            "shadow_iterations": 0
        },
        "colors": {
            "A1": "#ff0000", "A2": "#00ff00", "B1": "#0000ff", "B2": "#ffff00",
            "S": "#ff00ff", "SS": "#00ffff", "SSs": "#808080"
        }
    });
    AnnotateConfig::from_json(&v.to_string()).unwrap()
}

fn catalog(v: serde_json::Value) -> MarkCatalog {
    MarkCatalog::from_json(&v.to_string()).unwrap()
}

fn base() -> Layer {
    Layer::filled(200, 200, Rgba8Premul::from_straight_rgba(255, 255, 255, 255)).unwrap()
}

fn settings() -> ZoneSettings {
    // Scale 10: map 10 -> px 45, map 20 -> px 95, map 30 -> px 145.
    ZoneSettings::new(10.0, 3, Position::new(150.0, 2.0))
}

#[test]
fn shared_spawns_become_one_glyph() {
    let cat = catalog(json!([
        {"name": "Zeta", "rank": "A", "zone": "Z", "spawns": [[10, 10], [20, 20]]},
        {"name": "Alpha", "rank": "A", "zone": "Z", "spawns": [[10, 10]]},
        {"name": "Boss", "rank": "S", "zone": "Z", "spawns": [[20, 20]]}
    ]));
    let marks = cat.zone("Z");
    let out = render_zone(&base(), &marks, &settings(), &config(), &mut BlockFont).unwrap();

    assert_eq!(out.placements.len(), 2);
    let first = &out.placements[0];
    assert_eq!(first.screen, Position::new(45.0, 45.0));
    assert_eq!(first.marks, vec!["Alpha".to_string(), "Zeta".to_string()]);
    assert!(first.ranks.contains(RankLabel::A1));
    assert!(first.ranks.contains(RankLabel::A2));
    let second = &out.placements[1];
    assert_eq!(second.screen, Position::new(95.0, 95.0));
    assert!(second.ranks.contains(RankLabel::S));

    // A1 (Alpha) lower right, A2 (Zeta) lower left.
    assert_eq!(out.image.pixel(48, 48).unwrap(), [255, 0, 0, 255]);
    assert_eq!(out.image.pixel(41, 48).unwrap(), [0, 255, 0, 255]);
    // Empty upper quadrants show the base.
    assert_eq!(out.image.pixel(41, 41).unwrap(), [255, 255, 255, 255]);

    let labels: Vec<(String, RankLabel)> = out
        .entries
        .iter()
        .map(|e| (e.name.clone(), e.label))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("Zeta".to_string(), RankLabel::A2),
            ("Alpha".to_string(), RankLabel::A1),
            ("Boss".to_string(), RankLabel::S),
        ]
    );
    let plan = out.legend.unwrap();
    assert_eq!((plan.rows, plan.columns), (3, 1));
}

#[test]
fn marker_shadow_lands_on_the_base() {
    let cat = catalog(json!([
        {"name": "Boss", "rank": "SS", "zone": "Z", "spawns": [[10, 10]]}
    ]));
    let marks = cat.zone("Z");
    let out = render_zone(&base(), &marks, &settings(), &config(), &mut BlockFont).unwrap();
    assert_eq!(out.image.pixel(45, 45).unwrap(), [0, 255, 255, 255]);
    // Just past the circle's lower-right edge, the offset shadow shows.
    assert_eq!(out.image.pixel(50, 50).unwrap(), [0, 0, 0, 255]);
}

#[test]
fn full_circle_rank_cannot_share_a_spawn() {
    let cat = catalog(json!([
        {"name": "Boss", "rank": "SS", "zone": "Z", "spawns": [[10, 10]]},
        {"name": "Minion", "rank": "B", "zone": "Z", "spawns": [[10, 10]]}
    ]));
    let marks = cat.zone("Z");
    let err = render_zone(&base(), &marks, &settings(), &config(), &mut BlockFont).unwrap_err();
    assert!(matches!(err, HuntmapError::Input(_)));
    assert!(err.to_string().contains("(10, 10)"), "{err}");
}

#[test]
fn empty_zone_skips_the_legend() {
    let out = render_zone(&base(), &[], &settings(), &config(), &mut BlockFont).unwrap();
    assert!(out.placements.is_empty());
    assert!(out.legend.is_none());
    assert_eq!(out.image, base());
}

#[test]
fn bad_zone_scale_fails_before_drawing() {
    let mut s = settings();
    s.scale = 0.0;
    assert!(matches!(
        render_zone(&base(), &[], &s, &config(), &mut BlockFont),
        Err(HuntmapError::Config(_))
    ));
}
