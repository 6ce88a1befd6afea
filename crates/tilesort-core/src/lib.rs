//! TileSort Core Library
//!
//! Headless drag-and-drop sorting engine: layout strategies, click/drag
//! disambiguation, and cross-container coordination for ordered collections
//! of uniquely identified items. The host owns the data and the rendering;
//! the engine owns gesture state, layout geometry, and settle animation.

pub mod container;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod hooks;
pub mod input;
pub mod layout;
pub mod scope;
pub mod settle;

pub use container::{ContainerId, SortableContainer};
pub use drag::{DragConfig, DragPhase, Gesture};
pub use error::SortError;
pub use hooks::{HookError, HookResult, Hooks};
pub use input::{MouseButton, PointerEvent};
pub use layout::{
    Alignment, Axis, FlowGrid, Hit, LayoutContext, LayoutResult, LayoutStrategy, Linear,
};
pub use scope::SortableScope;
pub use settle::{SETTLE_DURATION_MS, Settle};
