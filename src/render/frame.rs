use std::ops::Range;

use crate::core::{PaneId, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ClipRect, Color, DrawingSurface, PolylinePrimitive, RectPrimitive, TextPrimitive,
};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect(RectPrimitive),
    StrokePolyline(PolylinePrimitive),
    FillText(TextPrimitive),
    PushClip(ClipRect),
    PopClip,
}

/// Commands emitted by one renderer (or overlay step) of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    pub pane_id: Option<PaneId>,
    pub name: &'static str,
    pub commands: Range<usize>,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Commands keep the order the pipeline issued them in; backends replay
/// them sequentially.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    pub commands: Vec<DrawCommand>,
    pub passes: Vec<RenderPass>,
    open_pass: Option<(Option<PaneId>, &'static str, usize)>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: Color::rgb(1.0, 1.0, 1.0),
            commands: Vec::new(),
            passes: Vec::new(),
            open_pass: None,
        }
    }

    /// Starts attributing commands to `name`. An unfinished pass is closed.
    pub fn begin_pass(&mut self, pane_id: Option<PaneId>, name: &'static str) {
        self.end_pass();
        self.open_pass = Some((pane_id, name, self.commands.len()));
    }

    pub fn end_pass(&mut self) {
        if let Some((pane_id, name, start)) = self.open_pass.take() {
            self.passes.push(RenderPass {
                pane_id,
                name,
                commands: start..self.commands.len(),
            });
        }
    }

    /// Renderer names executed for `pane_id`, in order.
    #[must_use]
    pub fn pass_names(&self, pane_id: &PaneId) -> Vec<&'static str> {
        self.passes
            .iter()
            .filter(|pass| pass.pane_id.as_ref() == Some(pane_id))
            .map(|pass| pass.name)
            .collect()
    }

    /// Commands recorded by the first pass called `name`.
    #[must_use]
    pub fn pass_commands(&self, pane_id: Option<&PaneId>, name: &str) -> &[DrawCommand] {
        self.passes
            .iter()
            .find(|pass| pass.name == name && pass.pane_id.as_ref() == pane_id)
            .map_or(&[], |pass| &self.commands[pass.commands.clone()])
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect(_)))
            .count()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePolyline(_)))
            .count()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillText(_)))
            .count()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.view_width,
                height: self.viewport.view_height,
            });
        }
        self.background.validate()?;

        let mut clip_depth = 0usize;
        for command in &self.commands {
            match command {
                DrawCommand::FillRect(rect) => rect.validate()?,
                DrawCommand::StrokePolyline(line) => line.validate()?,
                DrawCommand::FillText(text) => text.validate()?,
                DrawCommand::PushClip(_) => clip_depth += 1,
                DrawCommand::PopClip => {
                    clip_depth = clip_depth.checked_sub(1).ok_or_else(|| {
                        ChartError::InvalidData("clip stack underflow".to_owned())
                    })?;
                }
            }
        }
        if clip_depth != 0 {
            return Err(ChartError::InvalidData(format!(
                "{clip_depth} clip region(s) left open"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl DrawingSurface for RenderFrame {
    fn begin_frame(&mut self, viewport: Viewport, background: Color) {
        self.viewport = viewport;
        self.background = background;
        self.commands.clear();
        self.passes.clear();
        self.open_pass = None;
    }

    fn fill_rect(&mut self, rect: RectPrimitive) {
        self.commands.push(DrawCommand::FillRect(rect));
    }

    fn stroke_polyline(&mut self, line: PolylinePrimitive) {
        self.commands.push(DrawCommand::StrokePolyline(line));
    }

    fn fill_text(&mut self, text: TextPrimitive) {
        self.commands.push(DrawCommand::FillText(text));
    }

    fn push_clip(&mut self, clip: ClipRect) {
        self.commands.push(DrawCommand::PushClip(clip));
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
    }
}
