//! # Host Toolkit Interface
//!
//! The tooltip never owns the widgets it decorates. Everything it needs
//! from the surrounding UI toolkit goes through [`Host`]: geometry in
//! global coordinates, the parent chain, liveness and the screen list.
//! Toolkit notifications reach the tooltip as [`HostEvent`] values.
//!
//! Widgets are referred to by [`WidgetId`] only, so a destroyed anchor is a
//! dead id rather than a dangling reference; every query re-checks it.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::layout::Rect;
use crate::widget::WidgetId;

/// Read access to the host UI toolkit.
pub trait Host {
    /// Returns true while the widget exists.
    fn is_alive(&self, id: WidgetId) -> bool;

    /// Parent of a widget, `None` for top-level widgets and dead ids.
    fn parent(&self, id: WidgetId) -> Option<WidgetId>;

    /// Widget rectangle in global coordinates, `None` for dead ids.
    fn global_rect(&self, id: WidgetId) -> Option<Rect>;

    /// Returns true if the widget accepts input.
    fn is_enabled(&self, id: WidgetId) -> bool;

    /// Returns true if the widget is shown.
    fn is_visible(&self, id: WidgetId) -> bool;

    /// Available screens in global coordinates.
    fn screens(&self) -> Vec<Rect>;

    /// Ancestors of `id`, nearest first.
    fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == id || chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            current = self.parent(parent);
        }
        chain
    }

    /// Outermost ancestor of `id`, or `id` itself when it has no parent.
    fn top_level(&self, id: WidgetId) -> WidgetId {
        self.ancestors(id).last().copied().unwrap_or(id)
    }
}

impl<H: Host + ?Sized> Host for &H {
    fn is_alive(&self, id: WidgetId) -> bool {
        (**self).is_alive(id)
    }

    fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        (**self).parent(id)
    }

    fn global_rect(&self, id: WidgetId) -> Option<Rect> {
        (**self).global_rect(id)
    }

    fn is_enabled(&self, id: WidgetId) -> bool {
        (**self).is_enabled(id)
    }

    fn is_visible(&self, id: WidgetId) -> bool {
        (**self).is_visible(id)
    }

    fn screens(&self) -> Vec<Rect> {
        (**self).screens()
    }
}

/// Shared hosts: the embedder keeps mutating the tree while tooltips read
/// it between events.
impl<H: Host> Host for Arc<RwLock<H>> {
    fn is_alive(&self, id: WidgetId) -> bool {
        self.read().is_alive(id)
    }

    fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.read().parent(id)
    }

    fn global_rect(&self, id: WidgetId) -> Option<Rect> {
        self.read().global_rect(id)
    }

    fn is_enabled(&self, id: WidgetId) -> bool {
        self.read().is_enabled(id)
    }

    fn is_visible(&self, id: WidgetId) -> bool {
        self.read().is_visible(id)
    }

    fn screens(&self) -> Vec<Rect> {
        self.read().screens()
    }

    fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        self.read().ancestors(id)
    }
}

/// What happened to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    /// Pointer entered the widget.
    HoverEnter,
    /// Pointer left the widget.
    HoverLeave,
    /// Widget gained keyboard focus.
    FocusIn,
    /// Widget lost keyboard focus.
    FocusOut,
    /// Widget moved relative to its parent.
    Move,
    /// Widget changed size.
    Resize,
    /// Widget was shown.
    Show,
    /// Widget was hidden.
    Hide,
    /// Widget got a new parent.
    ParentChanged,
    /// Widget was destroyed.
    Destroyed,
}

impl HostEventKind {
    /// Returns true for events that change where a widget is on screen.
    #[must_use]
    pub const fn affects_geometry(self) -> bool {
        matches!(self, Self::Move | Self::Resize | Self::Show | Self::Hide)
    }
}

/// A notification from the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostEvent {
    /// Widget the event happened to.
    pub target: WidgetId,
    /// Event kind.
    pub kind: HostEventKind,
}

impl HostEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(target: WidgetId, kind: HostEventKind) -> Self {
        Self { target, kind }
    }
}
