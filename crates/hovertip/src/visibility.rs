//! Visibility state machine.
//!
//! ## States
//!
//! ```text
//! Hidden ──show──> PendingShow ──delay──> FadingIn ──fade──> Visible
//!   ^                                                          │
//!   └──fade── FadingOut <──delay── PendingHide <──hide─────────┘
//! ```
//!
//! A show request always stops the hide-delay timer and a hide request
//! always stops the show-delay timer, so a stale timer never fires after the
//! opposite request. A fade that gets interrupted leaves the opacity where
//! it was; the next fade starts from there.
//!
//! Notifications are edge-triggered: `Shown` when the overlay becomes
//! visible at the windowing level, `Hidden` when it stops being visible.

use crate::animation::{Animation, Easing};
use crate::timer::Timer;

/// Phase of the visibility cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityState {
    /// Not on screen.
    Hidden,
    /// Waiting for the show delay.
    PendingShow,
    /// Opacity rising toward 1.
    FadingIn,
    /// Fully shown.
    Visible,
    /// Waiting for the hide delay.
    PendingHide,
    /// Opacity falling toward 0.
    FadingOut,
}

/// Notification emitted by the visibility machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TooltipEvent {
    /// The overlay became visible.
    Shown,
    /// The overlay became hidden.
    Hidden,
}

/// Delay, duration and easing settings of the visibility machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTimings {
    /// Delay before a delayed show starts fading in.
    pub show_delay_ms: u64,
    /// Delay before a delayed hide starts fading out.
    pub hide_delay_ms: u64,
    /// Fade-in duration.
    pub fade_in_ms: u64,
    /// Fade-out duration.
    pub fade_out_ms: u64,
    /// Fade-in curve.
    pub fade_in_easing: Easing,
    /// Fade-out curve.
    pub fade_out_easing: Easing,
    /// Auto-hide timeout after a completed fade-in, 0 to disable.
    pub duration_ms: u64,
}

impl Default for VisibilityTimings {
    fn default() -> Self {
        Self {
            show_delay_ms: 50,
            hide_delay_ms: 50,
            fade_in_ms: 150,
            fade_out_ms: 150,
            fade_in_easing: Easing::Linear,
            fade_out_easing: Easing::Linear,
            duration_ms: 0,
        }
    }
}

/// Drives delays, fades and auto-hide for one overlay.
#[derive(Debug, Clone)]
pub struct VisibilityMachine {
    state: VisibilityState,
    now_ms: u64,
    show_timer: Timer,
    hide_timer: Timer,
    duration_timer: Timer,
    fade: Animation,
    fade_in_ms: u64,
    fade_out_ms: u64,
    fade_in_easing: Easing,
    fade_out_easing: Easing,
    overlay_visible: bool,
    events: Vec<TooltipEvent>,
}

impl VisibilityMachine {
    /// Creates a hidden machine at opacity 0.
    #[must_use]
    pub fn new(timings: VisibilityTimings) -> Self {
        Self {
            state: VisibilityState::Hidden,
            now_ms: 0,
            show_timer: Timer::new(timings.show_delay_ms),
            hide_timer: Timer::new(timings.hide_delay_ms),
            duration_timer: Timer::new(timings.duration_ms),
            fade: Animation::new(0.0),
            fade_in_ms: timings.fade_in_ms,
            fade_out_ms: timings.fade_out_ms,
            fade_in_easing: timings.fade_in_easing,
            fade_out_easing: timings.fade_out_easing,
            overlay_visible: false,
            events: Vec::new(),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Current opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.fade.value()
    }

    /// Returns true while the overlay is shown at the windowing level.
    #[must_use]
    pub fn is_overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Machine clock in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Returns true if the show-delay timer is armed.
    #[must_use]
    pub fn is_show_pending(&self) -> bool {
        self.show_timer.is_active()
    }

    /// Returns true if the hide-delay timer is armed.
    #[must_use]
    pub fn is_hide_pending(&self) -> bool {
        self.hide_timer.is_active()
    }

    /// Returns true if the auto-hide timer is armed.
    #[must_use]
    pub fn is_duration_running(&self) -> bool {
        self.duration_timer.is_active()
    }

    /// Current settings.
    #[must_use]
    pub fn timings(&self) -> VisibilityTimings {
        VisibilityTimings {
            show_delay_ms: self.show_timer.interval_ms(),
            hide_delay_ms: self.hide_timer.interval_ms(),
            fade_in_ms: self.fade_in_ms,
            fade_out_ms: self.fade_out_ms,
            fade_in_easing: self.fade_in_easing,
            fade_out_easing: self.fade_out_easing,
            duration_ms: self.duration_timer.interval_ms(),
        }
    }

    /// Sets the show delay; a running delay keeps its deadline.
    pub fn set_show_delay(&mut self, delay_ms: u64) {
        self.show_timer.set_interval(delay_ms);
    }

    /// Sets the hide delay; a running delay keeps its deadline.
    pub fn set_hide_delay(&mut self, delay_ms: u64) {
        self.hide_timer.set_interval(delay_ms);
    }

    /// Sets the auto-hide timeout used after the next fade-in.
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_timer.set_interval(duration_ms);
    }

    /// Sets the fade-in duration used by the next fade-in.
    pub fn set_fade_in_duration(&mut self, duration_ms: u64) {
        self.fade_in_ms = duration_ms;
    }

    /// Sets the fade-out duration used by the next fade-out.
    pub fn set_fade_out_duration(&mut self, duration_ms: u64) {
        self.fade_out_ms = duration_ms;
    }

    /// Sets the fade-in curve, applied at once to a running fade-in.
    pub fn set_fade_in_easing(&mut self, easing: Easing) {
        self.fade_in_easing = easing;
        if self.state == VisibilityState::FadingIn {
            self.fade.set_easing(easing);
        }
    }

    /// Sets the fade-out curve, applied at once to a running fade-out.
    pub fn set_fade_out_easing(&mut self, easing: Easing) {
        self.fade_out_easing = easing;
        if self.state == VisibilityState::FadingOut {
            self.fade.set_easing(easing);
        }
    }

    /// Overrides the opacity.
    ///
    /// A running fade restarts from the new value toward its target.
    pub fn set_opacity(&mut self, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        match self.state {
            VisibilityState::FadingIn => self.begin_fade_in_from(opacity),
            VisibilityState::FadingOut => self.begin_fade_out_from(opacity),
            _ => self.fade.set_immediate(opacity),
        }
    }

    /// Requests the overlay to show, optionally after the show delay.
    pub fn show(&mut self, with_delay: bool) {
        self.hide_timer.stop();

        match self.state {
            VisibilityState::FadingIn => return,
            // Superseded: the next fade-in starts from the current opacity.
            VisibilityState::FadingOut => self.fade.stop(),
            _ => {}
        }

        if with_delay && self.show_timer.interval_ms() > 0 && self.state != VisibilityState::Visible {
            self.show_timer.start(self.now_ms);
            self.transition(VisibilityState::PendingShow);
        } else {
            self.show_timer.stop();
            self.begin_fade_in();
        }
    }

    /// Requests the overlay to hide, optionally after the hide delay.
    pub fn hide(&mut self, with_delay: bool) {
        self.show_timer.stop();

        if !self.overlay_visible {
            // Never made it on screen; nothing to fade.
            self.fade.stop();
            self.transition(VisibilityState::Hidden);
            return;
        }

        match self.state {
            VisibilityState::FadingOut => return,
            VisibilityState::FadingIn => self.fade.stop(),
            _ => {}
        }

        if with_delay && self.hide_timer.interval_ms() > 0 {
            self.hide_timer.start(self.now_ms);
            self.transition(VisibilityState::PendingHide);
        } else {
            self.hide_timer.stop();
            self.begin_fade_out();
        }
    }

    /// Hides at once: no delay, no fade.
    pub fn force_hide(&mut self) {
        self.show_timer.stop();
        self.hide_timer.stop();
        self.duration_timer.stop();
        self.fade.set_immediate(0.0);
        self.transition(VisibilityState::Hidden);

        if std::mem::take(&mut self.overlay_visible) {
            self.events.push(TooltipEvent::Hidden);
        }
    }

    /// Absolute time of the next timer expiry or fade completion.
    #[must_use]
    pub fn next_deadline_ms(&self) -> Option<u64> {
        [
            self.show_timer.deadline_ms(),
            self.hide_timer.deadline_ms(),
            self.duration_timer.deadline_ms(),
            self.fade.remaining_ms().map(|r| self.now_ms.saturating_add(r)),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Advances the clock by `dt_ms`.
    ///
    /// Every expiry inside the interval is handled at its own instant, in
    /// order, so one long step matches many short ones.
    pub fn advance(&mut self, dt_ms: u64) {
        let target = self.now_ms.saturating_add(dt_ms);

        while let Some(at) = self.next_deadline_ms().filter(|&at| at <= target) {
            self.step_to(at);
        }
        self.step_to(target);
    }

    /// Drains queued notifications.
    pub fn drain_events(&mut self) -> Vec<TooltipEvent> {
        std::mem::take(&mut self.events)
    }

    fn step_to(&mut self, at_ms: u64) {
        let dt = at_ms.saturating_sub(self.now_ms);
        self.now_ms = at_ms;

        if self.fade.update(dt) {
            match self.state {
                VisibilityState::FadingIn => self.finish_fade_in(),
                VisibilityState::FadingOut => self.finish_fade_out(),
                _ => {}
            }
        }
        if self.show_timer.poll(self.now_ms) {
            tracing::trace!(now_ms = self.now_ms, "show delay expired");
            self.begin_fade_in();
        }
        if self.hide_timer.poll(self.now_ms) {
            tracing::trace!(now_ms = self.now_ms, "hide delay expired");
            self.begin_fade_out();
        }
        if self.duration_timer.poll(self.now_ms) {
            tracing::trace!(now_ms = self.now_ms, "display duration expired");
            self.hide(false);
        }
    }

    fn begin_fade_in(&mut self) {
        let from = self.fade.value();
        self.begin_fade_in_from(from);
    }

    fn begin_fade_in_from(&mut self, from: f32) {
        if !self.overlay_visible {
            self.overlay_visible = true;
            self.events.push(TooltipEvent::Shown);
        }
        self.transition(VisibilityState::FadingIn);
        if self.fade.start(from, 1.0, self.fade_in_ms, self.fade_in_easing) {
            self.finish_fade_in();
        }
    }

    fn finish_fade_in(&mut self) {
        self.transition(VisibilityState::Visible);
        if self.duration_timer.interval_ms() > 0 {
            self.duration_timer.start(self.now_ms);
        }
    }

    fn begin_fade_out(&mut self) {
        let from = self.fade.value();
        self.begin_fade_out_from(from);
    }

    fn begin_fade_out_from(&mut self, from: f32) {
        self.duration_timer.stop();
        self.transition(VisibilityState::FadingOut);
        if self.fade.start(from, 0.0, self.fade_out_ms, self.fade_out_easing) {
            self.finish_fade_out();
        }
    }

    fn finish_fade_out(&mut self) {
        self.overlay_visible = false;
        self.transition(VisibilityState::Hidden);
        self.events.push(TooltipEvent::Hidden);
    }

    fn transition(&mut self, next: VisibilityState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, now_ms = self.now_ms, "visibility transition");
            self.state = next;
        }
    }
}

impl Default for VisibilityMachine {
    fn default() -> Self {
        Self::new(VisibilityTimings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> VisibilityMachine {
        VisibilityMachine::new(VisibilityTimings {
            show_delay_ms: 0,
            hide_delay_ms: 0,
            fade_in_ms: 0,
            fade_out_ms: 0,
            ..VisibilityTimings::default()
        })
    }

    #[test]
    fn test_delayed_show_cycle() {
        let mut vis = VisibilityMachine::default();

        vis.show(true);
        assert_eq!(vis.state(), VisibilityState::PendingShow);
        assert!(!vis.is_overlay_visible());

        vis.advance(49);
        assert_eq!(vis.state(), VisibilityState::PendingShow);

        vis.advance(1);
        assert_eq!(vis.state(), VisibilityState::FadingIn);
        assert!(vis.is_overlay_visible());
        assert_eq!(vis.drain_events(), vec![TooltipEvent::Shown]);

        vis.advance(75);
        assert!((vis.opacity() - 0.5).abs() < 0.01);

        vis.advance(75);
        assert_eq!(vis.state(), VisibilityState::Visible);
        assert!((vis.opacity() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_delayed_hide_cycle() {
        let mut vis = VisibilityMachine::default();
        vis.show(false);
        vis.advance(150);
        vis.drain_events();

        vis.hide(true);
        assert_eq!(vis.state(), VisibilityState::PendingHide);
        vis.advance(50);
        assert_eq!(vis.state(), VisibilityState::FadingOut);
        vis.advance(150);

        assert_eq!(vis.state(), VisibilityState::Hidden);
        assert!(!vis.is_overlay_visible());
        assert_eq!(vis.drain_events(), vec![TooltipEvent::Hidden]);
    }

    #[test]
    fn test_shown_is_edge_triggered() {
        let mut vis = instant();

        vis.show(false);
        vis.show(false);
        vis.show(true);
        vis.advance(100);

        assert_eq!(vis.drain_events(), vec![TooltipEvent::Shown]);
    }

    #[test]
    fn test_show_cancels_pending_hide() {
        let mut vis = VisibilityMachine::default();
        vis.show(false);
        vis.advance(150);

        vis.hide(true);
        assert!(vis.is_hide_pending());
        vis.show(true);
        assert!(!vis.is_hide_pending());

        vis.advance(500);
        assert_eq!(vis.state(), VisibilityState::Visible);
        assert!(vis.is_overlay_visible());
    }

    #[test]
    fn test_hide_cancels_pending_show() {
        let mut vis = VisibilityMachine::default();
        vis.show(true);
        vis.hide(true);

        assert!(!vis.is_show_pending());
        assert_eq!(vis.state(), VisibilityState::Hidden);
        vis.advance(500);
        assert!(!vis.is_overlay_visible());
        assert!(vis.drain_events().is_empty());
    }

    #[test]
    fn test_at_most_one_delay_timer() {
        let mut vis = VisibilityMachine::default();
        vis.show(false);
        vis.advance(150);

        for step in 0..10 {
            if step % 2 == 0 {
                vis.hide(true);
            } else {
                vis.show(true);
            }
            assert!(!(vis.is_show_pending() && vis.is_hide_pending()));
            vis.advance(10);
        }
    }

    #[test]
    fn test_fade_out_superseded_keeps_opacity() {
        let mut vis = VisibilityMachine::default();
        vis.show(false);
        vis.advance(150);

        vis.hide(false);
        vis.advance(75);
        let mid = vis.opacity();
        assert!(mid > 0.4 && mid < 0.6);

        vis.show(true);
        assert_eq!(vis.state(), VisibilityState::PendingShow);
        vis.advance(20);
        assert!((vis.opacity() - mid).abs() < f32::EPSILON);

        vis.advance(30);
        assert_eq!(vis.state(), VisibilityState::FadingIn);
        vis.advance(1);
        assert!(vis.opacity() > mid);
        assert_eq!(vis.drain_events(), vec![TooltipEvent::Shown]);
    }

    #[test]
    fn test_duration_auto_hides() {
        let mut vis = instant();
        vis.set_duration(50);

        vis.show(false);
        assert!(vis.is_duration_running());
        vis.advance(49);
        assert!(vis.is_overlay_visible());
        vis.advance(1);

        assert!(!vis.is_overlay_visible());
        assert_eq!(vis.drain_events(), vec![TooltipEvent::Shown, TooltipEvent::Hidden]);
    }

    #[test]
    fn test_long_step_runs_whole_cycle() {
        let mut vis = VisibilityMachine::default();
        vis.set_duration(50);

        vis.show(true);
        vis.advance(1000);

        assert_eq!(vis.state(), VisibilityState::Hidden);
        assert_eq!(vis.drain_events(), vec![TooltipEvent::Shown, TooltipEvent::Hidden]);
        assert_eq!(vis.now_ms(), 1000);
    }

    #[test]
    fn test_force_hide() {
        let mut vis = VisibilityMachine::default();
        vis.show(false);
        vis.advance(20);
        vis.drain_events();

        vis.force_hide();
        assert_eq!(vis.state(), VisibilityState::Hidden);
        assert!(vis.opacity().abs() < f32::EPSILON);
        assert_eq!(vis.drain_events(), vec![TooltipEvent::Hidden]);

        vis.force_hide();
        assert!(vis.drain_events().is_empty());
    }

    #[test]
    fn test_hide_when_hidden_is_silent() {
        let mut vis = instant();
        vis.hide(false);
        vis.hide(true);
        assert!(vis.drain_events().is_empty());
    }

    #[test]
    fn test_delay_change_applies_on_next_start() {
        let mut vis = VisibilityMachine::default();
        vis.show(true);
        vis.set_show_delay(500);

        vis.advance(50);
        assert_eq!(vis.state(), VisibilityState::FadingIn);
        assert_eq!(vis.timings().show_delay_ms, 500);
    }

    #[test]
    fn test_easing_change_hits_running_fade() {
        let mut vis = VisibilityMachine::default();
        vis.show(false);
        vis.advance(75);

        vis.set_fade_in_easing(Easing::InQuad);
        assert!((vis.opacity() - 0.25).abs() < 0.01);
        vis.set_fade_out_easing(Easing::OutCubic);
        assert!((vis.opacity() - 0.25).abs() < 0.01);
    }
}
