use crate::assets::color::ColorDef;
use crate::foundation::core::Point;
use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::render::surface::DrawSurface;

/// Size of a text box including its outline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Fill and outline of legend text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub fill: ColorDef,
    pub stroke: ColorDef,
    /// Outline width in pixels. The text box grows by this much on every side.
    pub stroke_width: f64,
}

/// Text measurement and drawing used by the legend.
///
/// `origin` passed to [`LegendFont::draw`] is the top-left corner of the box that
/// [`LegendFont::measure`] reports for the same text and stroke.
pub trait LegendFont {
    fn measure(&mut self, text: &str, stroke: f64) -> HuntmapResult<TextExtent>;

    fn draw(
        &mut self,
        surface: &mut DrawSurface,
        text: &str,
        origin: Point,
        style: &TextStyle,
    ) -> HuntmapResult<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextBrushRgba8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<ColorDef> for TextBrushRgba8 {
    fn from(c: ColorDef) -> Self {
        let [r, g, b, a] = c.to_rgba8();
        Self { r, g, b, a }
    }
}

/// A single font face shaped with `parley` and rasterized with `vello_cpu`.
pub struct ParleyFont {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    size_px: f32,
}

impl std::fmt::Debug for ParleyFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyFont")
            .field("family_name", &self.family_name)
            .field("size_px", &self.size_px)
            .finish_non_exhaustive()
    }
}

impl ParleyFont {
    pub fn from_bytes(bytes: Vec<u8>, size_px: f32) -> HuntmapResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(HuntmapError::config("font size must be finite and > 0"));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| HuntmapError::config("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| HuntmapError::config("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
            size_px,
        })
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    fn layout(&mut self, text: &str, brush: TextBrushRgba8) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl LegendFont for ParleyFont {
    fn measure(&mut self, text: &str, stroke: f64) -> HuntmapResult<TextExtent> {
        let layout = self.layout(text, TextBrushRgba8::default());
        let pad = 2.0 * stroke.max(0.0);
        Ok(TextExtent {
            width: f64::from(layout.width()) + pad,
            height: f64::from(layout.height()) + pad,
        })
    }

    fn draw(
        &mut self,
        surface: &mut DrawSurface,
        text: &str,
        origin: Point,
        style: &TextStyle,
    ) -> HuntmapResult<()> {
        let layout = self.layout(text, style.fill.into());
        let stroke = style.stroke_width.max(0.0);
        let ctx = surface.ctx_mut();
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            origin.x + stroke,
            origin.y + stroke,
        )));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let font_size = run.run().font_size();
                let glyphs = || {
                    run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                };

                if stroke > 0.0 {
                    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(2.0 * stroke));
                    ctx.set_paint(style.stroke.to_paint());
                    ctx.glyph_run(&self.font)
                        .font_size(font_size)
                        .stroke_glyphs(glyphs());
                }

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                ctx.glyph_run(&self.font)
                    .font_size(font_size)
                    .fill_glyphs(glyphs());
            }
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
