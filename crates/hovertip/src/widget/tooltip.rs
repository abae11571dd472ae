//! Anchored tooltip controller.
//!
//! A [`Tooltip`] ties the pieces together: it owns the configuration, the
//! visibility machine and the host watcher, runs the layout pass whenever
//! something that affects geometry changes, and paints itself on request.
//!
//! ## Layout pass
//!
//! ```text
//! text ──measure/fit──▶ body size ──resolve placement──▶ overlay frame
//!                         │                 │
//!                  margins + border   auto / fallbacks / screens
//! ```
//!
//! The pass is a no-op while the anchor is absent or dead; the last frame
//! is kept.

use tracing::debug;

use crate::animation::Easing;
use crate::config::TooltipConfig;
use crate::host::{Host, HostEvent};
use crate::layout::{FrameSpec, Margins, OverlayFrame, Point, Rect, Size};
use crate::placement::{fallback_placement, optimal_placement, Offsets, Placement, PlacementQuery};
use crate::render::{RenderCommand, TooltipPaint, DROP_SHADOW_SIZE};
use crate::style::Color;
use crate::text::{fit_text, Font, MonospaceMetrics, TextLayout, TextMeasure};
use crate::visibility::{TooltipEvent, VisibilityMachine, VisibilityState};
use crate::watcher::{HostWatcher, Reaction, WatchPolicy};

use super::WidgetId;

/// A tooltip attached to one anchor widget.
pub struct Tooltip<H: Host> {
    host: H,
    anchor: Option<WidgetId>,
    config: TooltipConfig,
    visibility: VisibilityMachine,
    watcher: HostWatcher,
    measure: Box<dyn TextMeasure>,
    text_layout: TextLayout,
    frame: Option<OverlayFrame>,
}

impl<H: Host> Tooltip<H> {
    /// Creates a tooltip for `anchor` with default settings.
    pub fn new(host: H, anchor: Option<WidgetId>, text: impl Into<String>) -> Self {
        Self::with_config(host, anchor, TooltipConfig::with_text(text))
    }

    /// Creates a tooltip from a full configuration.
    pub fn with_config(host: H, anchor: Option<WidgetId>, config: TooltipConfig) -> Self {
        let mut tooltip = Self {
            host,
            anchor,
            visibility: VisibilityMachine::new(config.timings()),
            config,
            watcher: HostWatcher::new(),
            measure: Box::new(MonospaceMetrics::default()),
            text_layout: TextLayout::default(),
            frame: None,
        };
        tooltip.watcher.subscribe(&tooltip.host, tooltip.anchor);
        tooltip.update();
        tooltip
    }

    /// Replaces the text measurer and re-runs layout.
    pub fn set_text_measure(&mut self, measure: Box<dyn TextMeasure>) {
        self.measure = measure;
        self.update();
    }

    /// The host the tooltip reads geometry from.
    pub fn host(&self) -> &H {
        &self.host
    }

    // ------------------------------------------------------------------
    // Anchor
    // ------------------------------------------------------------------

    /// Anchor widget, `None` once it was destroyed or never set.
    #[must_use]
    pub fn anchor(&self) -> Option<WidgetId> {
        self.anchor
    }

    /// Attaches the tooltip to a different widget.
    pub fn set_anchor(&mut self, anchor: Option<WidgetId>) {
        self.anchor = anchor;
        self.watcher.subscribe(&self.host, anchor);
        self.update();
    }

    /// Widgets whose events are observed, anchor first.
    #[must_use]
    pub fn watched(&self) -> &[WidgetId] {
        self.watcher.watched()
    }

    // ------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------

    /// Shows the tooltip after the show delay. Does nothing without a live
    /// anchor.
    pub fn show(&mut self) {
        self.update();
        if self.anchor.is_some() {
            self.visibility.show(true);
        }
    }

    /// Shows the tooltip without the show delay.
    pub fn show_immediately(&mut self) {
        self.update();
        if self.anchor.is_some() {
            self.visibility.show(false);
        }
    }

    /// Hides the tooltip after the hide delay.
    pub fn hide(&mut self) {
        self.visibility.hide(true);
    }

    /// Hides the tooltip without the hide delay.
    pub fn hide_immediately(&mut self) {
        self.visibility.hide(false);
    }

    /// Advances timers and fades.
    pub fn advance(&mut self, dt_ms: u64) {
        self.visibility.advance(dt_ms);
    }

    /// Takes the queued `Shown`/`Hidden` notifications.
    pub fn drain_events(&mut self) -> Vec<TooltipEvent> {
        self.visibility.drain_events()
    }

    /// Current visibility phase.
    #[must_use]
    pub fn visibility_state(&self) -> VisibilityState {
        self.visibility.state()
    }

    /// Returns true while the overlay is on screen.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility.is_overlay_visible()
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.visibility.opacity()
    }

    /// Overrides the opacity; a running fade continues from it.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.visibility.set_opacity(opacity);
    }

    // ------------------------------------------------------------------
    // Host events
    // ------------------------------------------------------------------

    /// Reacts to a host toolkit event.
    pub fn handle_event(&mut self, event: &HostEvent) {
        let policy = WatchPolicy {
            show_on_disabled: self.config.show_on_disabled,
            show_on_focus: self.config.show_on_focus,
        };

        match self.watcher.react(&self.host, event, policy) {
            Reaction::Ignore => {}
            Reaction::Show => self.show(),
            Reaction::Hide => self.hide(),
            Reaction::Relayout => self.update(),
            Reaction::Resubscribe => {
                self.watcher.subscribe(&self.host, self.anchor);
                self.update();
            }
            Reaction::Detach { anchor_lost } => {
                if anchor_lost {
                    debug!(anchor = event.target.raw(), "anchor destroyed");
                    self.anchor = None;
                }
                self.watcher.subscribe(&self.host, self.anchor);
                self.visibility.force_hide();
            }
        }
    }

    /// Forwards a batch of host events in order.
    pub fn handle_events<'a>(&mut self, events: impl IntoIterator<Item = &'a HostEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Runs the layout pass.
    pub fn update(&mut self) {
        let Some(anchor) = self.anchor else {
            return;
        };
        if !self.host.is_alive(anchor) {
            debug!(anchor = anchor.raw(), "anchor is gone, layout skipped");
            self.anchor = None;
            self.watcher.clear();
            self.visibility.force_hide();
            return;
        }
        let Some(anchor_rect) = self.host.global_rect(anchor) else {
            return;
        };
        let container = self
            .host
            .global_rect(self.host.top_level(anchor))
            .unwrap_or(anchor_rect);
        let screens = self.host.screens();

        let config = &self.config;
        let border = config.effective_border_width();
        let triangle = config.effective_triangle_size();
        let shadow = if config.drop_shadow_enabled { DROP_SHADOW_SIZE } else { 0 };

        let chrome = config.margins.horizontal() + 2 * border + triangle + 2 * shadow;
        let max_text_width = config.max_width.map(|max| max - chrome);
        self.text_layout = fit_text(&*self.measure, &config.text, &config.font, max_text_width);

        let mut body = self
            .text_layout
            .size
            .grow(config.margins)
            .grow(Margins::uniform(border));
        if let Some(max_height) = config.max_height {
            body.height = body.height.min(max_height);
        }

        let query = PlacementQuery {
            anchor: anchor_rect,
            screens: &screens,
            content: body,
            triangle_size: triangle,
            offsets: &config.offsets,
        };
        let placement = match config.placement {
            Placement::Auto => optimal_placement(&query, container),
            requested => fallback_placement(&query, requested, &config.fallback_placements)
                .unwrap_or(requested),
        };

        let frame = OverlayFrame::compute(&FrameSpec {
            anchor: anchor_rect,
            placement,
            body,
            triangle_size: triangle,
            border_width: border,
            shadow,
            offset: config.offsets.get(placement),
        });
        debug!(?placement, x = frame.global.x, y = frame.global.y, "tooltip laid out");
        self.frame = Some(frame);
    }

    /// Placement resolved by the last layout pass.
    #[must_use]
    pub fn actual_placement(&self) -> Option<Placement> {
        self.frame.map(|f| f.placement)
    }

    /// Geometry from the last layout pass.
    #[must_use]
    pub fn frame(&self) -> Option<&OverlayFrame> {
        self.frame.as_ref()
    }

    /// Overlay rectangle in global coordinates, shadow included.
    #[must_use]
    pub fn geometry(&self) -> Rect {
        self.frame.map_or(Rect::ZERO, |f| f.global)
    }

    /// Overlay position.
    #[must_use]
    pub fn pos(&self) -> Point {
        self.geometry().pos()
    }

    /// Overlay size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.geometry().size()
    }

    /// Overlay x coordinate.
    #[must_use]
    pub fn x(&self) -> i32 {
        self.geometry().x
    }

    /// Overlay y coordinate.
    #[must_use]
    pub fn y(&self) -> i32 {
        self.geometry().y
    }

    /// Overlay width.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.geometry().width
    }

    /// Overlay height.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.geometry().height
    }

    /// Laid-out text block.
    #[must_use]
    pub fn text_layout(&self) -> TextLayout {
        self.text_layout
    }

    /// Generates render commands for this tooltip.
    pub fn render(&self, commands: &mut Vec<RenderCommand>) {
        if !self.is_visible() {
            return;
        }
        if let Some(frame) = &self.frame {
            TooltipPaint {
                frame,
                config: &self.config,
                text: self.text_layout,
                opacity: self.opacity(),
            }
            .paint(commands);
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Full configuration.
    #[must_use]
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// Replaces the whole configuration.
    pub fn set_config(&mut self, config: TooltipConfig) {
        let timings = config.timings();
        self.config = config;
        self.visibility.set_show_delay(timings.show_delay_ms);
        self.visibility.set_hide_delay(timings.hide_delay_ms);
        self.visibility.set_fade_in_duration(timings.fade_in_ms);
        self.visibility.set_fade_out_duration(timings.fade_out_ms);
        self.visibility.set_fade_in_easing(timings.fade_in_easing);
        self.visibility.set_fade_out_easing(timings.fade_out_easing);
        self.visibility.set_duration(timings.duration_ms);
        self.update();
    }

    /// Tooltip text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.config.text
    }

    /// Sets the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.config.text = text.into();
        self.update();
    }

    /// Auto-hide timeout in ms, 0 when disabled.
    #[must_use]
    pub fn duration(&self) -> u64 {
        self.config.duration_ms
    }

    /// Sets the auto-hide timeout; 0 disables it.
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.config.duration_ms = duration_ms;
        self.visibility.set_duration(duration_ms);
    }

    /// Requested placement.
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.config.placement
    }

    /// Sets the requested placement.
    pub fn set_placement(&mut self, placement: Placement) {
        self.config.placement = placement;
        self.update();
    }

    /// Fallback placements.
    #[must_use]
    pub fn fallback_placements(&self) -> &[Placement] {
        &self.config.fallback_placements
    }

    /// Sets the fallback placements.
    pub fn set_fallback_placements(&mut self, placements: Vec<Placement>) {
        self.config.fallback_placements = placements;
        self.update();
    }

    /// Whether the pointer triangle is drawn.
    #[must_use]
    pub fn is_triangle_enabled(&self) -> bool {
        self.config.triangle_enabled
    }

    /// Enables or disables the pointer triangle.
    pub fn set_triangle_enabled(&mut self, enabled: bool) {
        self.config.triangle_enabled = enabled;
        self.update();
    }

    /// Pointer triangle depth.
    #[must_use]
    pub fn triangle_size(&self) -> i32 {
        self.config.triangle_size
    }

    /// Sets the pointer triangle depth; negative values become 0.
    pub fn set_triangle_size(&mut self, size: i32) {
        self.config.triangle_size = size.max(0);
        self.update();
    }

    /// Offset for one placement.
    #[must_use]
    pub fn offset_for(&self, placement: Placement) -> Point {
        self.config.offsets.get(placement)
    }

    /// Sets the offset for one placement.
    pub fn set_offset_for(&mut self, placement: Placement, offset: Point) {
        self.config.offsets.set(placement, offset);
        self.update();
    }

    /// All per-placement offsets.
    #[must_use]
    pub fn offsets(&self) -> Offsets {
        self.config.offsets
    }

    /// Replaces all per-placement offsets.
    pub fn set_offsets(&mut self, offsets: Offsets) {
        self.config.offsets = offsets;
        self.update();
    }

    /// Sets the same offset for every placement.
    pub fn set_offset_all(&mut self, offset: Point) {
        self.set_offsets(Offsets::uniform(offset));
    }

    /// Show delay in ms.
    #[must_use]
    pub fn show_delay(&self) -> u64 {
        self.config.show_delay_ms
    }

    /// Sets the show delay; applies from the next delayed show.
    pub fn set_show_delay(&mut self, delay_ms: u64) {
        self.config.show_delay_ms = delay_ms;
        self.visibility.set_show_delay(delay_ms);
    }

    /// Hide delay in ms.
    #[must_use]
    pub fn hide_delay(&self) -> u64 {
        self.config.hide_delay_ms
    }

    /// Sets the hide delay; applies from the next delayed hide.
    pub fn set_hide_delay(&mut self, delay_ms: u64) {
        self.config.hide_delay_ms = delay_ms;
        self.visibility.set_hide_delay(delay_ms);
    }

    /// Fade-in duration in ms.
    #[must_use]
    pub fn fade_in_duration(&self) -> u64 {
        self.config.fade_in_duration_ms
    }

    /// Sets the fade-in duration; applies from the next fade-in.
    pub fn set_fade_in_duration(&mut self, duration_ms: u64) {
        self.config.fade_in_duration_ms = duration_ms;
        self.visibility.set_fade_in_duration(duration_ms);
    }

    /// Fade-in curve.
    #[must_use]
    pub fn fade_in_easing(&self) -> Easing {
        self.config.fade_in_easing
    }

    /// Sets the fade-in curve; a running fade-in switches at once.
    pub fn set_fade_in_easing(&mut self, easing: Easing) {
        self.config.fade_in_easing = easing;
        self.visibility.set_fade_in_easing(easing);
    }

    /// Fade-out duration in ms.
    #[must_use]
    pub fn fade_out_duration(&self) -> u64 {
        self.config.fade_out_duration_ms
    }

    /// Sets the fade-out duration; applies from the next fade-out.
    pub fn set_fade_out_duration(&mut self, duration_ms: u64) {
        self.config.fade_out_duration_ms = duration_ms;
        self.visibility.set_fade_out_duration(duration_ms);
    }

    /// Fade-out curve.
    #[must_use]
    pub fn fade_out_easing(&self) -> Easing {
        self.config.fade_out_easing
    }

    /// Sets the fade-out curve; a running fade-out switches at once.
    pub fn set_fade_out_easing(&mut self, easing: Easing) {
        self.config.fade_out_easing = easing;
        self.visibility.set_fade_out_easing(easing);
    }

    /// Whether the text is centered.
    #[must_use]
    pub fn is_text_centering_enabled(&self) -> bool {
        self.config.text_centering_enabled
    }

    /// Enables or disables text centering.
    pub fn set_text_centering_enabled(&mut self, enabled: bool) {
        self.config.text_centering_enabled = enabled;
    }

    /// Corner radius of the body.
    #[must_use]
    pub fn border_radius(&self) -> i32 {
        self.config.border_radius
    }

    /// Sets the corner radius; negative values become 0.
    pub fn set_border_radius(&mut self, radius: i32) {
        self.config.border_radius = radius.max(0);
    }

    /// Whether the border is drawn.
    #[must_use]
    pub fn is_border_enabled(&self) -> bool {
        self.config.border_enabled
    }

    /// Enables or disables the border.
    pub fn set_border_enabled(&mut self, enabled: bool) {
        self.config.border_enabled = enabled;
        self.update();
    }

    /// Border width.
    #[must_use]
    pub fn border_width(&self) -> i32 {
        self.config.border_width
    }

    /// Sets the border width; negative values become 0.
    pub fn set_border_width(&mut self, width: i32) {
        self.config.border_width = width.max(0);
        self.update();
    }

    /// Body fill.
    #[must_use]
    pub fn background_color(&self) -> Color {
        self.config.background_color
    }

    /// Sets the body fill.
    pub fn set_background_color(&mut self, color: Color) {
        self.config.background_color = color;
    }

    /// Text color.
    #[must_use]
    pub fn text_color(&self) -> Color {
        self.config.text_color
    }

    /// Sets the text color.
    pub fn set_text_color(&mut self, color: Color) {
        self.config.text_color = color;
    }

    /// Border color.
    #[must_use]
    pub fn border_color(&self) -> Color {
        self.config.border_color
    }

    /// Sets the border color.
    pub fn set_border_color(&mut self, color: Color) {
        self.config.border_color = color;
    }

    /// Text font.
    #[must_use]
    pub fn font(&self) -> &Font {
        &self.config.font
    }

    /// Sets the font.
    pub fn set_font(&mut self, font: Font) {
        self.config.font = font;
        self.update();
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, point_size: u16) {
        self.config.font.point_size = point_size;
        self.update();
    }

    /// Sets the font weight.
    pub fn set_font_bold(&mut self, bold: bool) {
        self.config.font.bold = bold;
        self.update();
    }

    /// Text margins.
    #[must_use]
    pub fn margins(&self) -> Margins {
        self.config.margins
    }

    /// Sets all margins; negative values become 0.
    pub fn set_margins(&mut self, margins: Margins) {
        self.config.margins = Margins::new(
            margins.left.max(0),
            margins.top.max(0),
            margins.right.max(0),
            margins.bottom.max(0),
        );
        self.update();
    }

    /// Sets the left margin.
    pub fn set_margin_left(&mut self, margin: i32) {
        self.set_margins(Margins {
            left: margin,
            ..self.config.margins
        });
    }

    /// Sets the top margin.
    pub fn set_margin_top(&mut self, margin: i32) {
        self.set_margins(Margins {
            top: margin,
            ..self.config.margins
        });
    }

    /// Sets the right margin.
    pub fn set_margin_right(&mut self, margin: i32) {
        self.set_margins(Margins {
            right: margin,
            ..self.config.margins
        });
    }

    /// Sets the bottom margin.
    pub fn set_margin_bottom(&mut self, margin: i32) {
        self.set_margins(Margins {
            bottom: margin,
            ..self.config.margins
        });
    }

    /// Maximum overlay width.
    #[must_use]
    pub fn max_width(&self) -> Option<i32> {
        self.config.max_width
    }

    /// Sets the maximum overlay width; `None` removes the limit.
    pub fn set_max_width(&mut self, max_width: Option<i32>) {
        self.config.max_width = max_width.map(|w| w.max(0));
        self.update();
    }

    /// Maximum body height.
    #[must_use]
    pub fn max_height(&self) -> Option<i32> {
        self.config.max_height
    }

    /// Sets the maximum body height; `None` removes the limit.
    pub fn set_max_height(&mut self, max_height: Option<i32>) {
        self.config.max_height = max_height.map(|h| h.max(0));
        self.update();
    }

    /// Whether the drop shadow is drawn.
    #[must_use]
    pub fn is_drop_shadow_enabled(&self) -> bool {
        self.config.drop_shadow_enabled
    }

    /// Enables or disables the drop shadow.
    pub fn set_drop_shadow_enabled(&mut self, enabled: bool) {
        self.config.drop_shadow_enabled = enabled;
        self.update();
    }

    /// Drop shadow strength.
    #[must_use]
    pub fn drop_shadow_strength(&self) -> f32 {
        self.config.drop_shadow_strength
    }

    /// Sets the drop shadow strength, clamped to its valid range.
    pub fn set_drop_shadow_strength(&mut self, strength: f32) {
        self.config.drop_shadow_strength =
            strength.clamp(0.0, crate::config::MAX_DROP_SHADOW_STRENGTH);
    }

    /// Whether hover on a disabled anchor shows the tooltip.
    #[must_use]
    pub fn is_showing_on_disabled(&self) -> bool {
        self.config.show_on_disabled
    }

    /// Sets whether hover on a disabled anchor shows the tooltip.
    pub fn set_showing_on_disabled(&mut self, enabled: bool) {
        self.config.show_on_disabled = enabled;
    }

    /// Whether focus changes show and hide the tooltip.
    #[must_use]
    pub fn is_showing_on_focus(&self) -> bool {
        self.config.show_on_focus
    }

    /// Sets whether focus changes show and hide the tooltip.
    pub fn set_showing_on_focus(&mut self, enabled: bool) {
        self.config.show_on_focus = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetTree;

    fn fixture() -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let window = tree.add_root(Rect::new(0, 0, 800, 600));
        let button = tree.add_child(window, Rect::new(300, 250, 100, 30));
        (tree, button)
    }

    #[test]
    fn test_layout_runs_on_construction() {
        let (tree, button) = fixture();
        let tooltip = Tooltip::new(&tree, Some(button), "Tooltip");

        assert!(tooltip.actual_placement().is_some_and(Placement::is_concrete));
        assert!(tooltip.width() > 0);
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_without_anchor_layout_is_noop() {
        let tree = WidgetTree::new();
        let mut tooltip = Tooltip::new(&tree, None, "Tooltip");
        tooltip.update();

        assert_eq!(tooltip.actual_placement(), None);
        assert_eq!(tooltip.geometry(), Rect::ZERO);
    }

    #[test]
    fn test_setters_clamp_negative_sizes() {
        let (tree, button) = fixture();
        let mut tooltip = Tooltip::new(&tree, Some(button), "Tooltip");

        tooltip.set_triangle_size(-3);
        tooltip.set_border_width(-1);
        tooltip.set_margins(Margins::new(-1, 2, -3, 4));
        tooltip.set_drop_shadow_strength(-2.0);

        assert_eq!(tooltip.triangle_size(), 0);
        assert_eq!(tooltip.border_width(), 0);
        assert_eq!(tooltip.margins(), Margins::new(0, 2, 0, 4));
        assert!(tooltip.drop_shadow_strength().abs() < f32::EPSILON);
    }

    #[test]
    fn test_hover_drives_visibility() {
        let (mut tree, button) = fixture();
        tree.pointer_moved(Point::new(310, 260));
        let events = tree.drain_events();

        let mut tooltip = Tooltip::new(&tree, Some(button), "Tooltip");
        tooltip.handle_events(&events);
        assert_eq!(tooltip.visibility_state(), VisibilityState::PendingShow);

        tooltip.advance(50 + 150);
        assert_eq!(tooltip.visibility_state(), VisibilityState::Visible);
        assert_eq!(tooltip.drain_events(), vec![TooltipEvent::Shown]);

        let mut commands = Vec::new();
        tooltip.render(&mut commands);
        assert!(!commands.is_empty());
    }

    #[test]
    fn test_disabled_anchor_ignores_hover() {
        let (mut tree, button) = fixture();
        tree.set_enabled(button, false);
        tree.pointer_moved(Point::new(310, 260));
        let events = tree.drain_events();

        let mut tooltip = Tooltip::new(&tree, Some(button), "Tooltip");
        tooltip.handle_events(&events);
        assert_eq!(tooltip.visibility_state(), VisibilityState::Hidden);

        tooltip.set_showing_on_disabled(true);
        tooltip.handle_events(&events);
        assert_eq!(tooltip.visibility_state(), VisibilityState::PendingShow);
    }
}
