//! `RenderSink` adapter that draws each snapshot to the terminal.

use anyhow::Result;

use crate::core::{GameSnapshot, RenderSink};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;

/// Owns the view, the reusable framebuffer and the renderer.
///
/// `RenderSink::render` cannot fail, so the first draw error is parked here
/// and later frames are skipped until the caller takes it.
pub struct TerminalSink {
    view: GameView,
    renderer: TerminalRenderer,
    fb: FrameBuffer,
    viewport: Viewport,
    error: Option<anyhow::Error>,
    frames: u64,
}

impl TerminalSink {
    pub fn new(view: GameView, renderer: TerminalRenderer, viewport: Viewport) -> Self {
        Self {
            view,
            renderer,
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
            error: None,
            frames: 0,
        }
    }

    /// Enter the alternate screen, sized to the current terminal.
    pub fn enter(&mut self) -> Result<()> {
        let (w, h) = crossterm::terminal::size()?;
        self.resize(w, h);
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        let viewport = Viewport::new(width, height);
        if viewport != self.viewport {
            self.viewport = viewport;
            self.renderer.invalidate();
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frames successfully flushed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.view.render_into(snapshot, self.viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)?;
        self.frames += 1;
        Ok(())
    }
}

impl RenderSink for TerminalSink {
    fn render(&mut self, snapshot: &GameSnapshot) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.draw(snapshot) {
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_updates_viewport() {
        let mut sink = TerminalSink::new(
            GameView::default(),
            TerminalRenderer::new(),
            Viewport::new(80, 24),
        );
        assert_eq!(sink.viewport(), Viewport::new(80, 24));
        sink.resize(100, 30);
        assert_eq!(sink.viewport(), Viewport::new(100, 30));
        assert!(sink.take_error().is_none());
        assert_eq!(sink.frames(), 0);
    }
}
