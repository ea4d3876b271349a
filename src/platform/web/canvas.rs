//! Replays draw-command frames on a 2D canvas context

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::renderer::{AssetId, AssetProbe, DrawCommand, Frame, TextAlign};
use crate::sim::Rect;

const SHIELD_URL: &str = "assets/gohigh/shield.png";
const BOOST_URL: &str = "assets/gohigh/boost.png";
const FONT_FAMILY: &str = "Arial, sans-serif";

/// Power-up icons, loading in the background
pub struct ImageAssets {
    shield: HtmlImageElement,
    boost: HtmlImageElement,
}

impl ImageAssets {
    /// Start loading every image
    pub fn load() -> Result<Self, JsValue> {
        let shield = HtmlImageElement::new()?;
        shield.set_src(SHIELD_URL);
        let boost = HtmlImageElement::new()?;
        boost.set_src(BOOST_URL);
        Ok(Self { shield, boost })
    }

    fn image(&self, asset: AssetId) -> &HtmlImageElement {
        match asset {
            AssetId::Shield => &self.shield,
            AssetId::Boost => &self.boost,
        }
    }
}

impl AssetProbe for ImageAssets {
    fn is_ready(&self, asset: AssetId) -> bool {
        let img = self.image(asset);
        img.complete() && img.natural_height() != 0
    }
}

/// Draw a complete frame
pub fn draw(ctx: &CanvasRenderingContext2d, frame: &Frame, assets: &ImageAssets) -> Result<(), JsValue> {
    let w = f64::from(frame.surface.width);
    let h = f64::from(frame.surface.height);
    ctx.clear_rect(0.0, 0.0, w, h);

    for command in &frame.commands {
        match command {
            DrawCommand::Fill(color) => {
                ctx.set_fill_style_str(&color.css());
                ctx.fill_rect(0.0, 0.0, w, h);
            }
            DrawCommand::VerticalGradient { top, bottom } => {
                let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
                gradient.add_color_stop(0.0, &top.css())?;
                gradient.add_color_stop(1.0, &bottom.css())?;
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill_rect(0.0, 0.0, w, h);
            }
            DrawCommand::FillRect { rect, color } => {
                ctx.set_fill_style_str(&color.css());
                ctx.fill_rect(rect.x.into(), rect.y.into(), rect.w.into(), rect.h.into());
            }
            DrawCommand::FillRoundRect { rect, radius, color } => {
                ctx.set_fill_style_str(&color.css());
                round_rect_path(ctx, rect, *radius)?;
                ctx.fill();
            }
            DrawCommand::FillCircle { center, radius, color } => {
                ctx.set_fill_style_str(&color.css());
                circle_path(ctx, *center, *radius)?;
                ctx.fill();
            }
            DrawCommand::StrokeCircle {
                center,
                radius,
                width,
                color,
            } => {
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width((*width).into());
                circle_path(ctx, *center, *radius)?;
                ctx.stroke();
            }
            DrawCommand::FillEllipse {
                center,
                radii,
                rotation,
                color,
            } => {
                ctx.set_fill_style_str(&color.css());
                ellipse_path(ctx, *center, *radii, *rotation)?;
                ctx.fill();
            }
            DrawCommand::StrokeEllipse {
                center,
                radii,
                rotation,
                width,
                color,
            } => {
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width((*width).into());
                ellipse_path(ctx, *center, *radii, *rotation)?;
                ctx.stroke();
            }
            DrawCommand::FillPolygon { points, color } => {
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                ctx.set_fill_style_str(&color.css());
                ctx.begin_path();
                ctx.move_to(first.x.into(), first.y.into());
                for p in rest {
                    ctx.line_to(p.x.into(), p.y.into());
                }
                ctx.close_path();
                ctx.fill();
            }
            DrawCommand::StrokeLines { segments, width, color } => {
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width((*width).into());
                ctx.begin_path();
                for (a, b) in segments {
                    ctx.move_to(a.x.into(), a.y.into());
                    ctx.line_to(b.x.into(), b.y.into());
                }
                ctx.stroke();
            }
            DrawCommand::Text {
                text,
                pos,
                size,
                align,
                color,
            } => {
                ctx.set_fill_style_str(&color.css());
                ctx.set_font(&format!("{}px {}", size, FONT_FAMILY));
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                ctx.set_text_baseline("alphabetic");
                ctx.fill_text(text, pos.x.into(), pos.y.into())?;
            }
            DrawCommand::Image { asset, rect } => {
                ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    assets.image(*asset),
                    rect.x.into(),
                    rect.y.into(),
                    rect.w.into(),
                    rect.h.into(),
                )?;
            }
        }
    }
    Ok(())
}

fn circle_path(ctx: &CanvasRenderingContext2d, center: Vec2, radius: f32) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(center.x.into(), center.y.into(), f64::from(radius.max(0.0)), 0.0, TAU)
}

fn ellipse_path(ctx: &CanvasRenderingContext2d, center: Vec2, radii: Vec2, rotation: f32) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.ellipse(
        center.x.into(),
        center.y.into(),
        f64::from(radii.x.max(0.0)),
        f64::from(radii.y.max(0.0)),
        rotation.into(),
        0.0,
        TAU,
    )
}

fn round_rect_path(ctx: &CanvasRenderingContext2d, rect: &Rect, radius: f32) -> Result<(), JsValue> {
    let (x, y, w, h) = (
        f64::from(rect.x),
        f64::from(rect.y),
        f64::from(rect.w),
        f64::from(rect.h),
    );
    let r = f64::from(radius).min(w / 2.0).min(h / 2.0).max(0.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r)?;
    ctx.arc_to(x + w, y + h, x, y + h, r)?;
    ctx.arc_to(x, y + h, x, y, r)?;
    ctx.arc_to(x, y, x + w, y, r)?;
    ctx.close_path();
    Ok(())
}
