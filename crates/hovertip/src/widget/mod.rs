//! Widget system: the in-memory host tree and the tooltip controller.
//!
//! Tooltips decorate widgets they do not own. [`WidgetTree`] is a complete
//! [`Host`](crate::host::Host) for embedders without a toolkit of their
//! own, and for tests.

mod core;
mod tooltip;
mod tree;

pub use core::{WidgetFlags, WidgetId, WidgetState};
pub use tooltip::Tooltip;
pub use tree::{SharedWidgetTree, WidgetTree};
