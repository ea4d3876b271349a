//! Render step output
//!
//! Games describe a frame as an ordered list of [`DrawCommand`]s. The browser
//! backend replays them on a 2D canvas; tests inspect them directly.

pub mod shapes;

use glam::Vec2;

use crate::sim::{Rect, Surface};

/// RGBA color, channels in 0..=255 and alpha in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::hex(0xFFFFFF);
    pub const BLACK: Color = Color::hex(0x000000);

    /// Opaque color from `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string
    pub fn css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a.max(0.0))
        }
    }
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Image assets loaded asynchronously by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    Shield,
    Boost,
}

/// Answers whether an image asset finished loading
pub trait AssetProbe {
    fn is_ready(&self, asset: AssetId) -> bool;
}

/// No assets available; every image falls back to its placeholder
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetProbe for NoAssets {
    fn is_ready(&self, _asset: AssetId) -> bool {
        false
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Fill(Color),
    /// Top-to-bottom gradient over the whole surface
    VerticalGradient { top: Color, bottom: Color },
    FillRect { rect: Rect, color: Color },
    FillRoundRect { rect: Rect, radius: f32, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeCircle { center: Vec2, radius: f32, width: f32, color: Color },
    FillEllipse { center: Vec2, radii: Vec2, rotation: f32, color: Color },
    StrokeEllipse { center: Vec2, radii: Vec2, rotation: f32, width: f32, color: Color },
    FillPolygon { points: Vec<Vec2>, color: Color },
    StrokeLines { segments: Vec<(Vec2, Vec2)>, width: f32, color: Color },
    Text { text: String, pos: Vec2, size: f32, align: TextAlign, color: Color },
    Image { asset: AssetId, rect: Rect },
}

/// A complete frame for one surface
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub surface: Surface,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            commands: Vec::with_capacity(64),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn fill(&mut self, color: Color) {
        self.push(DrawCommand::Fill(color));
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::FillRect { rect, color });
    }

    pub fn round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.push(DrawCommand::FillRoundRect { rect, radius, color });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn polygon(&mut self, points: Vec<Vec2>, color: Color) {
        if points.len() >= 3 {
            self.push(DrawCommand::FillPolygon { points, color });
        }
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, align: TextAlign, color: Color) {
        self.push(DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            align,
            color,
        });
    }

    /// Draw an image if it is ready, otherwise a centered text placeholder
    pub fn image_or_placeholder(&mut self, assets: &dyn AssetProbe, asset: AssetId, rect: Rect, placeholder: &str) {
        if assets.is_ready(asset) {
            self.push(DrawCommand::Image { asset, rect });
        } else {
            self.text(placeholder, rect.center(), 12.0, TextAlign::Center, Color::WHITE);
        }
    }

    /// Dimmed full-surface backdrop used under overlays
    pub fn dim(&mut self) {
        let rect = Rect::new(0.0, 0.0, self.surface.width, self.surface.height);
        self.rect(rect, Color::BLACK.with_alpha(0.7));
    }

    /// All text drawn in this frame, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether any drawn text contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AllReady;

    impl AssetProbe for AllReady {
        fn is_ready(&self, _asset: AssetId) -> bool {
            true
        }
    }

    #[test]
    fn test_css_color() {
        assert_eq!(Color::hex(0x4ade80).css(), "#4ade80");
        assert_eq!(Color::BLACK.with_alpha(0.7).css(), "rgba(0, 0, 0, 0.7)");
    }

    #[test]
    fn test_image_placeholder_until_ready() {
        let rect = Rect::new(0.0, 0.0, 20.0, 20.0);

        let mut frame = Frame::new(Surface::new(100.0, 100.0));
        frame.image_or_placeholder(&NoAssets, AssetId::Shield, rect, "S");
        assert_eq!(frame.texts(), vec!["S"]);

        let mut frame = Frame::new(Surface::new(100.0, 100.0));
        frame.image_or_placeholder(&AllReady, AssetId::Shield, rect, "S");
        assert!(frame.texts().is_empty());
        assert!(matches!(frame.commands[0], DrawCommand::Image { asset: AssetId::Shield, .. }));
    }

    #[test]
    fn test_degenerate_polygon_skipped() {
        let mut frame = Frame::new(Surface::new(10.0, 10.0));
        frame.polygon(vec![Vec2::ZERO, Vec2::ONE], Color::WHITE);
        assert!(frame.commands.is_empty());
    }
}
