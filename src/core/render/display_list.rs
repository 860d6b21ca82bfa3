//=========================================================================
// Display List
//=========================================================================
//
// A `Surface` that records draw calls instead of rasterizing them.
//
// Commands accumulate during `render()`; `present()` moves them into the
// presented frame, which platforms and tests can inspect. A full-surface
// `fill` discards whatever was drawn before it in the same frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use log::trace;

//=== Internal Dependencies ===============================================

use super::{Anchor, Color, Rect, Surface};
use crate::core::assets::{Font, Image};

//=== DrawCommand =========================================================

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(Color),
    Text {
        text: String,
        font_size: u32,
        color: Color,
        rect: Rect,
    },
    Image {
        source: PathBuf,
        rect: Rect,
    },
}

//=== DisplayList =========================================================

/// Recording surface with a pending and a presented frame.
#[derive(Debug, Clone)]
pub struct DisplayList {
    size: (u32, u32),
    pending: Vec<DrawCommand>,
    presented: Vec<DrawCommand>,
    frames_presented: u64,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            pending: Vec::with_capacity(16),
            presented: Vec::new(),
            frames_presented: 0,
        }
    }

    /// Promotes the pending commands to the presented frame.
    pub fn present(&mut self) {
        trace!("Presenting frame {} ({} commands)", self.frames_presented, self.pending.len());
        self.presented = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }

    /// Commands of the last presented frame.
    pub fn presented(&self) -> &[DrawCommand] {
        &self.presented
    }

    /// Commands recorded since the last `present()`.
    pub fn pending(&self) -> &[DrawCommand] {
        &self.pending
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Texts of the last presented frame, in draw order.
    pub fn presented_texts(&self) -> impl Iterator<Item = &str> {
        self.presented.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn fill(&mut self, color: Color) {
        self.pending.clear();
        self.pending.push(DrawCommand::Fill(color));
    }

    fn draw_text(
        &mut self,
        font: &Font,
        text: &str,
        color: Color,
        anchor: Anchor,
        at: (i32, i32),
    ) -> Rect {
        let (width, height) = font.measure(text);
        let rect = Rect::anchored(width, height, anchor, at);
        self.pending.push(DrawCommand::Text {
            text: text.to_owned(),
            font_size: font.size(),
            color,
            rect,
        });
        rect
    }

    fn blit(&mut self, image: &Image, anchor: Anchor, at: (i32, i32)) -> Rect {
        let rect = Rect::anchored(image.width(), image.height(), anchor, at);
        self.pending.push(DrawCommand::Image {
            source: image.source().to_path_buf(),
            rect,
        });
        rect
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
