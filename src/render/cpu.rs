use std::collections::HashMap;

use kurbo::Affine;

use crate::config::RenderConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::{WrappedError, WrappedResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::frame::FrameRGBA;
use crate::render::text::{
    ResolvedFont, TextBrushRgba8, TextLayoutEngine, measure_width, resolve_font,
};
use crate::scene::model::{FrameScene, RectItem, SceneItem, TextItem};
use crate::timeline::clip::Gradient;

/// CPU rasterizer for [`FrameScene`]s, powered by `vello_cpu`.
///
/// Caches the text engine and one background per gradient. Every call returns a fresh opaque
/// buffer owned by the caller.
pub struct FrameRenderer {
    canvas: Canvas,
    text: TextLayoutEngine,
    ctx: Option<vello_cpu::RenderContext>,
    backgrounds: HashMap<Gradient, Vec<u8>>,
}

impl FrameRenderer {
    /// Build a renderer for `cfg.canvas`, resolving the caption font.
    ///
    /// A configured or system font that cannot be registered falls back to the bundled face.
    pub fn new(cfg: &RenderConfig) -> WrappedResult<Self> {
        let text = match TextLayoutEngine::new(resolve_font(cfg.font_path.as_deref())) {
            Ok(engine) => engine,
            Err(e) => {
                tracing::warn!(error = %e, "caption font unusable, using the bundled face");
                TextLayoutEngine::new(ResolvedFont::bundled())?
            }
        };
        tracing::debug!(
            family = text.family_name(),
            origin = ?text.origin(),
            "caption font resolved"
        );
        Self::with_text_engine(cfg.canvas, text)
    }

    pub(crate) fn with_text_engine(canvas: Canvas, text: TextLayoutEngine) -> WrappedResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(WrappedError::validation("canvas width/height must be > 0"));
        }
        if u16::try_from(canvas.width).is_err() || u16::try_from(canvas.height).is_err() {
            return Err(WrappedError::validation(
                "canvas width/height must fit in u16 for the CPU rasterizer",
            ));
        }
        Ok(Self {
            canvas,
            text,
            ctx: None,
            backgrounds: HashMap::new(),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Rasterize `scene` into a new opaque, straight-alpha frame.
    pub fn render(&mut self, scene: &FrameScene) -> WrappedResult<FrameRGBA> {
        let mut data = self.background(scene.gradient).to_vec();

        if !scene.items.is_empty() {
            let overlay = self.draw_items(scene)?;
            composite_over(&mut data, &overlay);
        }
        apply_fade(&mut data, scene.fade);

        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
            premultiplied: false,
        })
    }

    fn background(&mut self, gradient: Gradient) -> &[u8] {
        let canvas = self.canvas;
        self.backgrounds
            .entry(gradient)
            .or_insert_with(|| vertical_gradient(canvas, gradient))
    }

    fn draw_items(&mut self, scene: &FrameScene) -> WrappedResult<Vec<u8>> {
        // Fits: checked in the constructor.
        let w = self.canvas.width as u16;
        let h = self.canvas.height as u16;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        let base = Affine::scale(scene.layout.scale);
        let mut result = Ok(());
        for item in &scene.items {
            result = match item {
                SceneItem::Rect(r) => {
                    fill_rect(&mut ctx, base, r);
                    Ok(())
                }
                SceneItem::Text(t) => self.draw_text(&mut ctx, base, scene.layout.width, t),
            };
            if result.is_err() {
                break;
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        if result.is_ok() {
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
        }
        self.ctx = Some(ctx);
        result?;
        Ok(pixmap.data_as_u8_slice().to_vec())
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        base: Affine,
        layout_width: f64,
        item: &TextItem,
    ) -> WrappedResult<()> {
        let engine = &mut self.text;
        if item.text.is_empty() || item.opacity <= 0.0 {
            return Ok(());
        }

        let layout = engine.layout_line(&item.text, item.size_px as f32, item.color.into())?;
        let x = item.align.resolve_x(layout_width, measure_width(&layout));
        let tr = base * Affine::translate((x, item.y));

        let opacity = item.opacity.clamp(0.0, 1.0) as f32;
        ctx.set_transform(affine_to_cpu(tr));
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        for line in layout.lines() {
            for run_item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = run_item else {
                    continue;
                };
                let brush: TextBrushRgba8 = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                // Absolute positions: running advance along the line, y on the baseline.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(engine.font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }
}

fn fill_rect(ctx: &mut vello_cpu::RenderContext, base: Affine, item: &RectItem) {
    if item.rect.height() <= 0.0 || item.rect.width() <= 0.0 {
        return;
    }
    let c = item.color;
    ctx.set_transform(affine_to_cpu(base));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        item.rect.x0,
        item.rect.y0,
        item.rect.x1,
        item.rect.y1,
    ));
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

/// Opaque RGBA rows: row `y` takes `top.lerp(bottom, y / height)` with truncation.
pub(crate) fn vertical_gradient(canvas: Canvas, gradient: Gradient) -> Vec<u8> {
    let width = canvas.width as usize;
    let mut out = Vec::with_capacity(canvas.byte_len());
    for y in 0..canvas.height {
        let ratio = f64::from(y) / f64::from(canvas.height);
        let px = gradient.top.lerp_trunc(gradient.bottom, ratio).to_rgba8();
        for _ in 0..width {
            out.extend_from_slice(&px);
        }
    }
    out
}

/// Premultiplied source-over onto an opaque straight destination.
pub(crate) fn composite_over(dst: &mut [u8], src_premul: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        let inv = 255 - sa;
        for c in 0..3 {
            let v = u16::from(s[c]) + mul_div255_u16(u16::from(d[c]), inv);
            d[c] = v.min(255) as u8;
        }
        d[3] = 255;
    }
}

/// Scale colour channels toward black by `fade` in `[0, 1]`.
pub(crate) fn apply_fade(data: &mut [u8], fade: f64) {
    let fade = fade.clamp(0.0, 1.0);
    if fade >= 1.0 {
        return;
    }
    let k = (fade * 255.0).round() as u16;
    for px in data.chunks_exact_mut(4) {
        for c in &mut px[..3] {
            *c = mul_div255_u16(u16::from(*c), k) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
