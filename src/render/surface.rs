use kurbo::{CircleSegment, Ellipse, Point, Rect, Shape};

use crate::assets::color::ColorDef;
use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::render::layer::Layer;

/// Flattening tolerance for curved shapes, in pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// A layer plus a `vello_cpu` context that shapes are queued into.
///
/// Shapes are painted in call order with source-over. Nothing touches the layer until
/// [`DrawSurface::finish`], which rasterizes the queue and composites it over the layer.
pub struct DrawSurface {
    layer: Layer,
    ctx: vello_cpu::RenderContext,
}

impl DrawSurface {
    pub fn new(layer: Layer) -> HuntmapResult<Self> {
        let (w, h) = dims_u16(&layer)?;
        Ok(Self {
            layer,
            ctx: vello_cpu::RenderContext::new(w, h),
        })
    }

    pub fn transparent(width: u32, height: u32) -> HuntmapResult<Self> {
        Self::new(Layer::transparent(width, height)?)
    }

    pub fn size(&self) -> (u32, u32) {
        self.layer.size()
    }

    /// Fill a pie slice. Angles are in degrees, clockwise from 3 o'clock (y points down).
    pub fn fill_pie(
        &mut self,
        center: Point,
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
        color: ColorDef,
    ) {
        let pie = CircleSegment::new(
            center,
            radius,
            0.0,
            start_deg.to_radians(),
            sweep_deg.to_radians(),
        );
        self.fill_shape(&pie, color);
    }

    /// Fill the ellipse inscribed in `bounds`.
    pub fn fill_ellipse(&mut self, bounds: Rect, color: ColorDef) {
        self.fill_shape(&Ellipse::from_rect(bounds), color);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: ColorDef) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_paint());
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Outline `rect` with a border of `width` pixels drawn inside its edges.
    pub fn outline_rect(&mut self, rect: Rect, width: f64, color: ColorDef) {
        let r = rect.abs();
        let w = width.max(0.0).min(r.width() / 2.0).min(r.height() / 2.0);
        if w <= 0.0 {
            return;
        }
        self.fill_rect(Rect::new(r.x0, r.y0, r.x1, r.y0 + w), color);
        self.fill_rect(Rect::new(r.x0, r.y1 - w, r.x1, r.y1), color);
        self.fill_rect(Rect::new(r.x0, r.y0 + w, r.x0 + w, r.y1 - w), color);
        self.fill_rect(Rect::new(r.x1 - w, r.y0 + w, r.x1, r.y1 - w), color);
    }

    pub(crate) fn ctx_mut(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    /// Rasterize every queued shape and composite it over the layer.
    pub fn finish(mut self) -> HuntmapResult<Layer> {
        let (w, h) = dims_u16(&self.layer)?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        crate::effects::composite::over_in_place(self.layer.data_mut(), pixmap.data_as_u8_slice())?;
        Ok(self.layer)
    }

    fn fill_shape(&mut self, shape: &impl Shape, color: ColorDef) {
        let path = bezpath_to_cpu(&shape.to_path(PATH_TOLERANCE));
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_paint());
        self.ctx.fill_path(&path);
    }
}

fn dims_u16(layer: &Layer) -> HuntmapResult<(u16, u16)> {
    let w: u16 = layer
        .width()
        .try_into()
        .map_err(|_| HuntmapError::render("surface width exceeds u16"))?;
    let h: u16 = layer
        .height()
        .try_into()
        .map_err(|_| HuntmapError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
