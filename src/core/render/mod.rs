//=========================================================================
// Render Surface
//=========================================================================
//
// The drawing contract scenes render against.
//
// The engine does not rasterize anything itself: a `Surface` is supplied
// by the platform and lent to the active scene's `render()` once per
// frame. Positioning follows the rectangle-anchor convention: a scene
// says "put the middle of the bottom edge of this text at (x, y)" and the
// surface works out the top-left corner.
//
//=========================================================================

//=== Module Declarations =================================================

mod display_list;

//=== Internal Dependencies ===============================================

use crate::core::assets::{Font, Image};

//=== Public API ==========================================================

pub use display_list::{DisplayList, DrawCommand};

//=== DisplayConfig =======================================================

/// Window/surface configuration shared by the platform and scene constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl DisplayConfig {
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
        }
    }

    /// Centre point of the surface.
    pub fn center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(800, 600, "Name of Game")
    }
}

//=== Color ===============================================================

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

//=== Anchor ==============================================================

/// Which point of a rectangle is pinned to the requested position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    MidTop,
    TopRight,
    MidLeft,
    Center,
    MidRight,
    BottomLeft,
    MidBottom,
    BottomRight,
}

//=== Rect ================================================================

/// Axis-aligned rectangle in surface pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Places a `width × height` rectangle so that `anchor` lands on `at`.
    pub fn anchored(width: u32, height: u32, anchor: Anchor, at: (i32, i32)) -> Self {
        let (w, h) = (width as i32, height as i32);
        let (ax, ay) = at;

        let x = match anchor {
            Anchor::TopLeft | Anchor::MidLeft | Anchor::BottomLeft => ax,
            Anchor::MidTop | Anchor::Center | Anchor::MidBottom => ax - w / 2,
            Anchor::TopRight | Anchor::MidRight | Anchor::BottomRight => ax - w,
        };
        let y = match anchor {
            Anchor::TopLeft | Anchor::MidTop | Anchor::TopRight => ay,
            Anchor::MidLeft | Anchor::Center | Anchor::MidRight => ay - h / 2,
            Anchor::BottomLeft | Anchor::MidBottom | Anchor::BottomRight => ay - h,
        };

        Self::new(x, y, width, height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width as i32 / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.height as i32 / 2
    }
}

//=== Surface Trait =======================================================

/// Drawing target lent to the active scene during `render()`.
///
/// Only the active scene ever receives the surface, so there is exactly
/// one writer per frame.
pub trait Surface {
    /// Surface dimensions in pixels.
    fn size(&self) -> (u32, u32);

    /// Clears the whole surface to `color`.
    fn fill(&mut self, color: Color);

    /// Draws `text` with `font`, anchored at `at`. Returns the covered area.
    fn draw_text(&mut self, font: &Font, text: &str, color: Color, anchor: Anchor, at: (i32, i32))
        -> Rect;

    /// Draws `image`, anchored at `at`. Returns the covered area.
    fn blit(&mut self, image: &Image, anchor: Anchor, at: (i32, i32)) -> Rect;

    /// Centre point of the surface.
    fn center(&self) -> (i32, i32) {
        let (width, height) = self.size();
        ((width / 2) as i32, (height / 2) as i32)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
