//! Widget tree for hierarchical UI management.
//!
//! A retained, in-memory host toolkit: widgets with parent-relative
//! geometry, a screen list, pointer hover tracking and focus. Every
//! mutation queues the matching [`HostEvent`]s, which the embedder drains
//! and forwards to its tooltips.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{WidgetFlags, WidgetId, WidgetState};
use crate::host::{Host, HostEvent, HostEventKind};
use crate::layout::{Point, Rect, Size};

/// A widget tree shared between the embedder and its tooltips.
pub type SharedWidgetTree = Arc<RwLock<WidgetTree>>;

/// Manages the widget hierarchy.
pub struct WidgetTree {
    /// Widget states indexed by ID.
    widgets: HashMap<WidgetId, WidgetState>,
    /// Top-level widget IDs.
    roots: Vec<WidgetId>,
    /// Parent-child relationships.
    children: HashMap<WidgetId, Vec<WidgetId>>,
    /// Screens in global coordinates.
    screens: Vec<Rect>,
    /// Hovered widget and its ancestors, deepest first.
    hover_path: Vec<WidgetId>,
    /// Focused widget.
    focused: Option<WidgetId>,
    /// Queued notifications.
    events: Vec<HostEvent>,
    /// ID counter for generating unique IDs.
    next_id: u64,
}

impl WidgetTree {
    /// Creates an empty tree with one 1920x1080 screen at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::with_screens(vec![Rect::new(0, 0, 1920, 1080)])
    }

    /// Creates an empty tree with the given screens.
    #[must_use]
    pub fn with_screens(screens: Vec<Rect>) -> Self {
        Self {
            widgets: HashMap::with_capacity(64),
            roots: Vec::with_capacity(4),
            children: HashMap::with_capacity(64),
            screens,
            hover_path: Vec::new(),
            focused: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Wraps the tree for sharing with tooltips.
    #[must_use]
    pub fn into_shared(self) -> SharedWidgetTree {
        Arc::new(RwLock::new(self))
    }

    /// Replaces the screen list.
    pub fn set_screens(&mut self, screens: Vec<Rect>) {
        self.screens = screens;
    }

    fn next_id(&mut self) -> WidgetId {
        let id = WidgetId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Adds a top-level widget at a global position.
    pub fn add_root(&mut self, rect: Rect) -> WidgetId {
        let id = self.next_id();
        self.widgets.insert(id, WidgetState::new(id, rect));
        self.roots.push(id);
        self.children.insert(id, Vec::new());
        id
    }

    /// Adds a child widget positioned relative to `parent`.
    ///
    /// A dead parent makes the new widget top-level.
    pub fn add_child(&mut self, parent: WidgetId, rect: Rect) -> WidgetId {
        if !self.widgets.contains_key(&parent) {
            return self.add_root(rect);
        }
        let id = self.next_id();
        let mut state = WidgetState::new(id, rect);
        state.parent = Some(parent);

        self.widgets.insert(id, state);
        self.children.entry(parent).or_default().push(id);
        self.children.insert(id, Vec::new());
        id
    }

    /// Gets a widget state by ID.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&WidgetState> {
        self.widgets.get(&id)
    }

    /// Returns the children of a widget.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns all top-level widgets.
    #[must_use]
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    /// Number of live widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns true if the tree has no widgets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Moves a widget to a new parent-relative position.
    pub fn move_to(&mut self, id: WidgetId, pos: Point) {
        let Some(state) = self.widgets.get_mut(&id) else {
            return;
        };
        if state.rect.pos() != pos {
            state.rect = Rect::from_pos_size(pos, state.rect.size());
            self.push_event(id, HostEventKind::Move);
        }
    }

    /// Moves a widget by a delta.
    pub fn move_by(&mut self, id: WidgetId, delta: Point) {
        if let Some(pos) = self.widgets.get(&id).map(|s| s.rect.pos()) {
            self.move_to(id, pos.offset(delta));
        }
    }

    /// Resizes a widget.
    pub fn resize(&mut self, id: WidgetId, size: Size) {
        let Some(state) = self.widgets.get_mut(&id) else {
            return;
        };
        if state.rect.size() != size {
            state.rect = Rect::from_pos_size(state.rect.pos(), size);
            self.push_event(id, HostEventKind::Resize);
        }
    }

    /// Shows or hides a widget.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        let Some(state) = self.widgets.get_mut(&id) else {
            return;
        };
        if state.flags.assign(WidgetFlags::VISIBLE, visible) {
            let kind = if visible { HostEventKind::Show } else { HostEventKind::Hide };
            self.push_event(id, kind);
        }
    }

    /// Enables or disables a widget.
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        if let Some(state) = self.widgets.get_mut(&id) {
            state.flags.assign(WidgetFlags::ENABLED, enabled);
        }
    }

    /// Moves a widget under a new parent, keeping its relative position.
    /// `None` makes it top-level.
    ///
    /// Returns false (and changes nothing) if either widget is dead or the
    /// move would create a cycle.
    pub fn set_parent(&mut self, id: WidgetId, parent: Option<WidgetId>) -> bool {
        if !self.widgets.contains_key(&id) {
            return false;
        }
        if let Some(parent) = parent {
            if !self.widgets.contains_key(&parent)
                || parent == id
                || self.ancestors(parent).contains(&id)
            {
                return false;
            }
        }

        let old_parent = self.widgets.get(&id).and_then(|s| s.parent);
        match old_parent {
            Some(old) => {
                if let Some(siblings) = self.children.get_mut(&old) {
                    siblings.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }
        match parent {
            Some(new) => self.children.entry(new).or_default().push(id),
            None => self.roots.push(id),
        }
        if let Some(state) = self.widgets.get_mut(&id) {
            state.parent = parent;
        }

        self.push_event(id, HostEventKind::ParentChanged);
        true
    }

    /// Destroys a widget and all its descendants.
    ///
    /// A `Destroyed` event is queued for every removed widget, children
    /// before their parent.
    pub fn destroy(&mut self, id: WidgetId) {
        if !self.widgets.contains_key(&id) {
            return;
        }

        if let Some(parent) = self.widgets.get(&id).and_then(|s| s.parent) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|&c| c != id);
            }
        }
        self.roots.retain(|&r| r != id);

        let mut doomed = Vec::new();
        self.collect_post_order(id, &mut doomed);
        for dead in doomed {
            self.widgets.remove(&dead);
            self.children.remove(&dead);
            self.hover_path.retain(|&h| h != dead);
            if self.focused == Some(dead) {
                self.focused = None;
            }
            self.push_event(dead, HostEventKind::Destroyed);
        }
    }

    fn collect_post_order(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        for &child in self.children(id) {
            self.collect_post_order(child, out);
        }
        out.push(id);
    }

    /// Returns all widget IDs in depth-first order.
    pub fn iter_dfs(&self) -> impl Iterator<Item = WidgetId> + '_ {
        WidgetDfsIterator {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Returns all widget IDs in reverse depth-first order (for hit testing).
    pub fn iter_reverse(&self) -> impl Iterator<Item = WidgetId> + '_ {
        // Collect all in DFS order then reverse
        let all: Vec<_> = self.iter_dfs().collect();
        all.into_iter().rev()
    }

    /// Topmost visible widget under a global point.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<WidgetId> {
        self.iter_reverse().find(|&id| {
            self.is_visible(id) && self.global_rect(id).is_some_and(|r| r.contains(point))
        })
    }

    /// Currently hovered widget.
    #[must_use]
    pub fn hovered(&self) -> Option<WidgetId> {
        self.hover_path.first().copied()
    }

    /// Updates hover state for a pointer at a global position.
    ///
    /// Widgets the pointer left get `HoverLeave` (deepest first), widgets it
    /// entered get `HoverEnter` (outermost first).
    pub fn pointer_moved(&mut self, point: Point) {
        let path: Vec<WidgetId> = match self.hit_test(point) {
            Some(hit) => std::iter::once(hit).chain(self.ancestors(hit)).collect(),
            None => Vec::new(),
        };

        let old = std::mem::take(&mut self.hover_path);
        for &left in old.iter().filter(|id| !path.contains(*id)) {
            if let Some(state) = self.widgets.get_mut(&left) {
                state.flags.clear(WidgetFlags::HOVERED);
            }
            self.push_event(left, HostEventKind::HoverLeave);
        }
        for &entered in path.iter().rev().filter(|id| !old.contains(*id)) {
            if let Some(state) = self.widgets.get_mut(&entered) {
                state.flags.set(WidgetFlags::HOVERED);
            }
            self.push_event(entered, HostEventKind::HoverEnter);
        }
        self.hover_path = path;
    }

    /// Pointer left every widget.
    pub fn pointer_left(&mut self) {
        let old = std::mem::take(&mut self.hover_path);
        for left in old {
            if let Some(state) = self.widgets.get_mut(&left) {
                state.flags.clear(WidgetFlags::HOVERED);
            }
            self.push_event(left, HostEventKind::HoverLeave);
        }
    }

    /// Moves keyboard focus.
    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        let id = id.filter(|target| self.widgets.contains_key(target));
        if self.focused == id {
            return;
        }
        if let Some(old) = self.focused.take() {
            if let Some(state) = self.widgets.get_mut(&old) {
                state.flags.clear(WidgetFlags::FOCUSED);
            }
            self.push_event(old, HostEventKind::FocusOut);
        }
        if let Some(new) = id {
            if let Some(state) = self.widgets.get_mut(&new) {
                state.flags.set(WidgetFlags::FOCUSED);
            }
            self.push_event(new, HostEventKind::FocusIn);
        }
        self.focused = id;
    }

    /// Focused widget.
    #[must_use]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Takes the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, target: WidgetId, kind: HostEventKind) {
        self.events.push(HostEvent::new(target, kind));
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for WidgetTree {
    fn is_alive(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.widgets.get(&id).and_then(|s| s.parent)
    }

    fn global_rect(&self, id: WidgetId) -> Option<Rect> {
        let local = self.widgets.get(&id)?.rect;
        let origin = self
            .ancestors(id)
            .into_iter()
            .filter_map(|a| self.widgets.get(&a))
            .fold(Point::ZERO, |acc, s| acc.offset(s.rect.pos()));
        Some(local.translate(origin))
    }

    fn is_enabled(&self, id: WidgetId) -> bool {
        self.widgets.get(&id).is_some_and(WidgetState::is_enabled)
            && self
                .ancestors(id)
                .iter()
                .all(|a| self.widgets.get(a).is_some_and(WidgetState::is_enabled))
    }

    fn is_visible(&self, id: WidgetId) -> bool {
        self.widgets.get(&id).is_some_and(WidgetState::is_visible)
            && self
                .ancestors(id)
                .iter()
                .all(|a| self.widgets.get(a).is_some_and(WidgetState::is_visible))
    }

    fn screens(&self) -> Vec<Rect> {
        self.screens.clone()
    }
}

/// Depth-first iterator over widget tree.
struct WidgetDfsIterator<'a> {
    tree: &'a WidgetTree,
    stack: Vec<WidgetId>,
}

impl Iterator for WidgetDfsIterator<'_> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // Push children in reverse order so they're processed left-to-right
        if let Some(children) = self.tree.children.get(&id) {
            for &child in children.iter().rev() {
                self.stack.push(child);
            }
        }

        Some(id)
    }
}
