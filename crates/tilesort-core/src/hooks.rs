//! Owner-supplied callbacks invoked at drag session transitions.
//!
//! Every hook is optional and returns a [`HookResult`]; a failing hook is
//! logged and otherwise ignored so the session state machine always reaches
//! its next transition.

use std::fmt;

use thiserror::Error;

use crate::input::PointerEvent;

/// Error returned from an owner hook. Logged by the engine; never fatal.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HookError(pub String);

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self(message.to_owned())
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

pub type HookResult = Result<(), HookError>;

type ClickFn<T> = Box<dyn FnMut(&T, usize, &PointerEvent) -> HookResult>;
type DragStartFn<T> = Box<dyn FnMut(&T, usize) -> HookResult>;
type DragEndFn<T> = Box<dyn FnMut(&T, usize, usize) -> HookResult>;
type MoveFn<T> = Box<dyn FnMut(&T, usize, usize) -> HookResult>;
type IndexFn<T> = Box<dyn FnMut(&T, usize) -> HookResult>;

/// The hook set for one container.
///
/// The owner is solely responsible for mutating its backing sequence in
/// response to `on_move`/`on_remove`/`on_insert`; the engine never touches
/// the caller's data itself.
pub struct Hooks<T> {
    pub(crate) on_click: Option<ClickFn<T>>,
    pub(crate) on_drag_start: Option<DragStartFn<T>>,
    pub(crate) on_drag_end: Option<DragEndFn<T>>,
    pub(crate) on_move: Option<MoveFn<T>>,
    pub(crate) on_remove: Option<IndexFn<T>>,
    pub(crate) on_insert: Option<IndexFn<T>>,
}

impl<T> Default for Hooks<T> {
    fn default() -> Self {
        Self {
            on_click: None,
            on_drag_start: None,
            on_drag_end: None,
            on_move: None,
            on_remove: None,
            on_insert: None,
        }
    }
}

impl<T> Hooks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired when a gesture classifies as a click: item, index at release,
    /// and the originating event.
    pub fn on_click(
        mut self,
        f: impl FnMut(&T, usize, &PointerEvent) -> HookResult + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Fired exactly once when the click thresholds are crossed.
    pub fn on_drag_start(mut self, f: impl FnMut(&T, usize) -> HookResult + 'static) -> Self {
        self.on_drag_start = Some(Box::new(f));
        self
    }

    /// Fired when a drag gesture ends: item, starting index, final index.
    pub fn on_drag_end(
        mut self,
        f: impl FnMut(&T, usize, usize) -> HookResult + 'static,
    ) -> Self {
        self.on_drag_end = Some(Box::new(f));
        self
    }

    /// Fired for a reorder within this container: item, from, to. The owner
    /// applies it as remove-at-`from` followed by insert-at-`to`.
    pub fn on_move(mut self, f: impl FnMut(&T, usize, usize) -> HookResult + 'static) -> Self {
        self.on_move = Some(Box::new(f));
        self
    }

    /// Fired when the dragged item leaves this container for a sibling.
    pub fn on_remove(mut self, f: impl FnMut(&T, usize) -> HookResult + 'static) -> Self {
        self.on_remove = Some(Box::new(f));
        self
    }

    /// Fired when the dragged item enters this container from a sibling.
    pub fn on_insert(mut self, f: impl FnMut(&T, usize) -> HookResult + 'static) -> Self {
        self.on_insert = Some(Box::new(f));
        self
    }
}

impl<T> fmt::Debug for Hooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_click", &self.on_click.is_some())
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .field("on_move", &self.on_move.is_some())
            .field("on_remove", &self.on_remove.is_some())
            .field("on_insert", &self.on_insert.is_some())
            .finish()
    }
}

/// Run an optional hook invocation, logging (and swallowing) a failure.
pub(crate) fn fire(name: &str, result: Option<HookResult>) {
    if let Some(Err(err)) = result {
        log::warn!("{name} hook failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_builder_sets_hooks() {
        let hooks: Hooks<u32> = Hooks::new()
            .on_click(|_, _, _| Ok(()))
            .on_move(|_, _, _| Ok(()));
        assert!(hooks.on_click.is_some());
        assert!(hooks.on_move.is_some());
        assert!(hooks.on_drag_start.is_none());
    }

    #[test]
    fn test_fire_swallows_errors() {
        let called = Rc::new(Cell::new(0));
        let counter = called.clone();
        let mut hooks: Hooks<u32> = Hooks::new().on_remove(move |_, _| {
            counter.set(counter.get() + 1);
            Err("owner failed".into())
        });

        // Both invocations run; the error never escapes.
        fire("on_remove", hooks.on_remove.as_mut().map(|f| f(&1, 0)));
        fire("on_remove", hooks.on_remove.as_mut().map(|f| f(&1, 0)));
        assert_eq!(called.get(), 2);
    }
}
