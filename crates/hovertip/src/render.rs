//! Tooltip rendering.
//!
//! Painting produces a flat list of [`RenderCommand`]s in global
//! coordinates, back to front. The host toolkit rasterizes them; nothing
//! here talks to a GPU or a window system.

use crate::config::TooltipConfig;
use crate::layout::{OverlayFrame, Point, Rect};
use crate::placement::Placement;
use crate::style::Color;
use crate::text::{Font, TextLayout};

/// Shadow padding around the tooltip content on every side, and the
/// number of shadow layers.
pub const DROP_SHADOW_SIZE: i32 = 5;

/// Corner radius of every shadow layer.
pub const DROP_SHADOW_RADIUS: i32 = 8;

/// Horizontal text alignment inside the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Flush left.
    Left,
    /// Centered.
    Center,
}

/// A render command for the tooltip overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: i32,
    },
    /// Rectangle outline.
    RectOutline {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: i32,
        /// Corner radius.
        corner_radius: i32,
    },
    /// Filled triangle with an optional outline along its two slanted
    /// edges.
    Triangle {
        /// Base start, tip, base end.
        points: [Point; 3],
        /// Fill color.
        fill: Color,
        /// Stroke color and width of the slanted edges.
        outline: Option<(Color, i32)>,
    },
    /// Text block.
    Text {
        /// Text content.
        text: String,
        /// Box the text is laid out in.
        bounds: Rect,
        /// Text color.
        color: Color,
        /// Font.
        font: Font,
        /// Horizontal alignment.
        align: TextAlign,
        /// Wrap width, `None` for unwrapped text.
        wrap_width: Option<i32>,
    },
}

/// Everything needed to paint one tooltip frame.
#[derive(Debug, Clone, Copy)]
pub struct TooltipPaint<'a> {
    /// Geometry from the last layout pass.
    pub frame: &'a OverlayFrame,
    /// Presentation settings.
    pub config: &'a TooltipConfig,
    /// Laid-out text.
    pub text: TextLayout,
    /// Overlay opacity in `[0, 1]`.
    pub opacity: f32,
}

impl TooltipPaint<'_> {
    /// Appends the draw commands for this frame.
    pub fn paint(&self, commands: &mut Vec<RenderCommand>) {
        let config = self.config;
        let opacity = self.opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }

        if config.drop_shadow_enabled {
            self.paint_shadow(commands, opacity);
        }

        let body = self.frame.global_body();
        let border = config.effective_border_width();
        commands.push(RenderCommand::Rect {
            bounds: body,
            color: config.background_color.fade(opacity),
            corner_radius: config.border_radius,
        });
        if border > 0 {
            commands.push(RenderCommand::RectOutline {
                bounds: body,
                color: config.border_color.fade(opacity),
                width: border,
                corner_radius: config.border_radius,
            });
        }

        if let Some(triangle) = self.frame.global_triangle() {
            commands.push(RenderCommand::Triangle {
                points: triangle_points(triangle, self.frame.placement),
                fill: config.background_color.fade(opacity),
                outline: (border > 0).then(|| (config.border_color.fade(opacity), border)),
            });
        }

        let inset = border;
        let text_box = Rect::new(
            body.x + inset + config.margins.left,
            body.y + inset + config.margins.top,
            (body.width - 2 * inset - config.margins.horizontal()).max(0),
            (body.height - 2 * inset - config.margins.vertical()).max(0),
        );
        commands.push(RenderCommand::Text {
            text: config.text.clone(),
            bounds: text_box,
            color: config.text_color.fade(opacity),
            font: config.font.clone(),
            align: if config.text_centering_enabled {
                TextAlign::Center
            } else {
                TextAlign::Left
            },
            wrap_width: self.text.wrap_width,
        });
    }

    fn paint_shadow(&self, commands: &mut Vec<RenderCommand>, opacity: f32) {
        let strength = self.config.drop_shadow_strength;
        for i in 0..DROP_SHADOW_SIZE {
            #[allow(clippy::cast_precision_loss)]
            let alpha = (i + 1) as f32 * 0.001 * strength;
            commands.push(RenderCommand::Rect {
                bounds: self.frame.global.shrink(i),
                color: Color::BLACK.with_alpha(alpha).fade(opacity),
                corner_radius: DROP_SHADOW_RADIUS,
            });
        }
    }
}

/// Corner points of the pointer triangle, tip toward the anchor.
#[must_use]
pub fn triangle_points(rect: Rect, placement: Placement) -> [Point; 3] {
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = rect;
    match placement {
        // Tooltip above the anchor: tip points down.
        Placement::Top => [Point::new(x, y), Point::new(x + w / 2, y + h), Point::new(x + w, y)],
        Placement::Bottom => [
            Point::new(x, y + h),
            Point::new(x + w / 2, y),
            Point::new(x + w, y + h),
        ],
        Placement::Left => [Point::new(x, y), Point::new(x + w, y + h / 2), Point::new(x, y + h)],
        Placement::Right | Placement::Auto => [
            Point::new(x + w, y),
            Point::new(x, y + h / 2),
            Point::new(x + w, y + h),
        ],
    }
}
