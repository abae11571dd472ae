//! Host event watcher.
//!
//! Keeps the list of widgets whose events matter to a tooltip (the anchor
//! and all of its ancestors) and translates host events into reactions.
//! The watcher decides; the controller acts.

use tracing::debug;

use crate::host::{Host, HostEvent, HostEventKind};
use crate::widget::WidgetId;

/// Flags that gate hover and focus reactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchPolicy {
    /// React to hover even when the anchor is disabled.
    pub show_on_disabled: bool,
    /// React to focus changes of the anchor.
    pub show_on_focus: bool,
}

/// What the controller should do about an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Event is irrelevant.
    Ignore,
    /// Delayed show.
    Show,
    /// Delayed hide.
    Hide,
    /// Run a layout pass.
    Relayout,
    /// The ancestor chain changed: rebuild subscriptions, then lay out.
    Resubscribe,
    /// A watched widget died: rebuild subscriptions and hide at once.
    Detach {
        /// The anchor itself was destroyed.
        anchor_lost: bool,
    },
}

/// Observer list for one tooltip.
#[derive(Debug, Clone, Default)]
pub struct HostWatcher {
    /// Anchor first, then ancestors nearest first.
    watched: Vec<WidgetId>,
}

impl HostWatcher {
    /// Creates a watcher with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the observer list for `anchor`.
    ///
    /// Dead widgets are dropped from the list; a dead or absent anchor
    /// leaves it empty.
    pub fn subscribe<H: Host + ?Sized>(&mut self, host: &H, anchor: Option<WidgetId>) {
        self.watched.clear();
        let Some(anchor) = anchor.filter(|&id| host.is_alive(id)) else {
            debug!("watcher cleared, no live anchor");
            return;
        };
        self.watched.push(anchor);
        self.watched
            .extend(host.ancestors(anchor).into_iter().filter(|&id| host.is_alive(id)));
        debug!(anchor = anchor.raw(), watched = self.watched.len(), "watcher subscribed");
    }

    /// Drops every subscription.
    pub fn clear(&mut self) {
        self.watched.clear();
    }

    /// Watched widgets, anchor first.
    #[must_use]
    pub fn watched(&self) -> &[WidgetId] {
        &self.watched
    }

    /// The subscribed anchor.
    #[must_use]
    pub fn anchor(&self) -> Option<WidgetId> {
        self.watched.first().copied()
    }

    /// Returns true if events of `id` are observed.
    #[must_use]
    pub fn is_watching(&self, id: WidgetId) -> bool {
        self.watched.contains(&id)
    }

    /// Maps a host event to a reaction.
    pub fn react<H: Host + ?Sized>(
        &self,
        host: &H,
        event: &HostEvent,
        policy: WatchPolicy,
    ) -> Reaction {
        if !self.is_watching(event.target) {
            return Reaction::Ignore;
        }
        let on_anchor = self.anchor() == Some(event.target);

        match event.kind {
            HostEventKind::HoverEnter if on_anchor => {
                if host.is_enabled(event.target) || policy.show_on_disabled {
                    Reaction::Show
                } else {
                    Reaction::Ignore
                }
            }
            HostEventKind::HoverLeave if on_anchor => Reaction::Hide,
            HostEventKind::FocusIn if on_anchor && policy.show_on_focus => Reaction::Show,
            HostEventKind::FocusOut if on_anchor && policy.show_on_focus => Reaction::Hide,
            HostEventKind::ParentChanged => Reaction::Resubscribe,
            HostEventKind::Destroyed => Reaction::Detach {
                anchor_lost: on_anchor,
            },
            kind if kind.affects_geometry() => Reaction::Relayout,
            _ => Reaction::Ignore,
        }
    }
}
