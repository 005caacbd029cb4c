use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawCommand, PolylinePrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
    TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
    pub clips_pushed: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango renderer backend.
///
/// The offscreen surface is sized in physical pixels and is reallocated
/// whenever a frame arrives with a different backing size.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width_px: i32, height_px: i32) -> ChartResult<Self> {
        Ok(Self {
            surface: create_surface(width_px, height_px)?,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn ensure_surface_size(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let (width, height) = frame.viewport.backing_size_px();
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        if self.surface.width() != width || self.surface.height() != height {
            debug!(width, height, "reallocating cairo backing surface");
            self.surface = create_surface(width, height)?;
        }
        Ok(())
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        // Transform is reset every frame; all commands are logical pixels.
        context.identity_matrix();
        context.scale(frame.viewport.dpr, frame.viewport.dpr);
        context.set_antialias(cairo::Antialias::Default);

        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for command in &frame.commands {
            match command {
                DrawCommand::FillRect(rect) => {
                    context.rectangle(rect.x, rect.y, rect.width, rect.height);
                    apply_color(context, rect.fill_color);
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                    stats.rects_drawn += 1;
                }
                DrawCommand::StrokePolyline(line) => {
                    stroke_polyline(context, line)?;
                    stats.lines_drawn += 1;
                }
                DrawCommand::FillText(text) => {
                    draw_text(context, text);
                    stats.texts_drawn += 1;
                }
                DrawCommand::PushClip(clip) => {
                    context
                        .save()
                        .map_err(|err| map_backend_error("failed to save context", err))?;
                    context.rectangle(clip.x, clip.y, clip.width, clip.height);
                    context.clip();
                    stats.clips_pushed += 1;
                }
                DrawCommand::PopClip => {
                    context
                        .restore()
                        .map_err(|err| map_backend_error("failed to restore context", err))?;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        self.ensure_surface_size(frame)?;
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn stroke_polyline(context: &Context, line: &PolylinePrimitive) -> ChartResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    match line.dash {
        Some(dash) => context.set_dash(&[dash.on, dash.off], 0.0),
        None => context.set_dash(&[], 0.0),
    }
    let mut points = line.points.iter();
    if let Some((x, y)) = points.next() {
        context.move_to(*x, *y);
    }
    for (x, y) in points {
        context.line_to(*x, *y);
    }
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke polyline", err))
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };
    let y = match text.v_align {
        TextVAlign::Top => text.y,
        TextVAlign::Middle => text.y - f64::from(text_height) / 2.0,
        TextVAlign::Bottom => text.y - f64::from(text_height),
    };

    apply_color(context, text.color);
    context.move_to(x, y);
    pangocairo::functions::show_layout(context, &layout);
}

fn create_surface(width_px: i32, height_px: i32) -> ChartResult<ImageSurface> {
    if width_px <= 0 || height_px <= 0 {
        return Err(ChartError::Backend(
            "cairo surface size must be > 0".to_owned(),
        ));
    }
    ImageSurface::create(Format::ARgb32, width_px, height_px)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
