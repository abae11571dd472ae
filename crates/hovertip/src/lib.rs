//! # Hovertip
//!
//! Anchored tooltip overlays for retained-mode UI toolkits:
//! - Screen-aware placement on the side with the most room
//! - Configurable fallbacks when the requested side does not fit
//! - Show/hide delays, fades and auto-hide on an explicit clock
//! - Follows the anchor through moves, resizes, re-parents and deletion
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        TOOLTIP PIPELINE                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Host Events → Watcher → Controller → Layout → Render Commands │
//! │                             ↓           ↓                      │
//! │                     Visibility Machine  Placement Engine       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host toolkit is reached only through the [`Host`] trait and
//! [`HostEvent`] values; [`WidgetTree`] is a ready-made in-memory host.
//!
//! ## Example
//!
//! ```
//! use hovertip::{Host, Point, Rect, Tooltip, TooltipEvent, WidgetTree};
//!
//! let mut tree = WidgetTree::new();
//! let window = tree.add_root(Rect::new(0, 0, 800, 600));
//! let button = tree.add_child(window, Rect::new(350, 280, 100, 30));
//! let tree = tree.into_shared();
//!
//! let mut tooltip = Tooltip::new(tree.clone(), Some(button), "Save the document");
//!
//! tree.write().pointer_moved(Point::new(360, 290));
//! let events = tree.write().drain_events();
//! tooltip.handle_events(&events);
//!
//! tooltip.advance(200);
//! assert_eq!(tooltip.drain_events(), vec![TooltipEvent::Shown]);
//! assert!(tree.global_rect(button).is_some());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod config;
pub mod error;
pub mod host;
pub mod layout;
pub mod placement;
pub mod render;
pub mod style;
pub mod text;
pub mod timer;
pub mod visibility;
pub mod watcher;
pub mod widget;

pub use animation::{Animation, Easing};
pub use config::TooltipConfig;
pub use error::{ConfigError, ConfigResult};
pub use host::{Host, HostEvent, HostEventKind};
pub use layout::{Margins, OverlayFrame, Point, Rect, Size};
pub use placement::{Offsets, Placement};
pub use render::{RenderCommand, TextAlign, DROP_SHADOW_SIZE};
pub use style::Color;
pub use text::{Font, MonospaceMetrics, TextLayout, TextMeasure};
pub use visibility::{TooltipEvent, VisibilityMachine, VisibilityState};
pub use widget::{SharedWidgetTree, Tooltip, WidgetId, WidgetTree};
