//! Sortable container: binds one ordered sequence of items to a layout
//! strategy, reconciles the sequence against mounted elements, and drives
//! the settle animation for non-dragged items.

use std::collections::HashMap;
use std::hash::Hash;

use kurbo::{Point, Size};
use uuid::Uuid;

use crate::error::SortError;
use crate::hooks::Hooks;
use crate::layout::{LayoutContext, LayoutResult, LayoutStrategy};
use crate::settle::Settle;

/// Identifier for a registered container.
pub type ContainerId = Uuid;

/// Render state for one mounted element, in container-local coordinates.
#[derive(Debug, Clone, Copy)]
struct ElementState {
    size: Size,
    /// Position currently rendered. None until the first layout.
    current: Option<Point>,
    /// Layout-assigned target position.
    target: Option<Point>,
    settle: Option<Settle>,
}

impl ElementState {
    fn new(size: Size) -> Self {
        Self {
            size,
            current: None,
            target: None,
            settle: None,
        }
    }

    /// Advance any in-flight settle and return the rendered position.
    fn sample(&mut self, now_ms: f64) -> Option<Point> {
        if let Some(settle) = self.settle {
            let position = settle.at(now_ms);
            self.current = Some(position);
            if settle.finished(now_ms) {
                self.settle = None;
            }
            return Some(position);
        }
        self.current
    }

    /// Drop any in-flight settle, freezing at the sampled position.
    fn freeze(&mut self, now_ms: f64) {
        if let Some(settle) = self.settle.take() {
            self.current = Some(settle.at(now_ms));
        }
    }

    /// Assign a new layout target. The very first assignment is applied
    /// immediately so newly mounted elements do not fly in from the origin;
    /// later changes ease over the settle duration.
    fn retarget(&mut self, position: Point, now_ms: f64) {
        if self.target == Some(position) {
            return;
        }
        self.target = Some(position);
        match self.current {
            None => {
                self.current = Some(position);
                self.settle = None;
            }
            Some(current) => {
                let from = self.settle.map(|s| s.at(now_ms)).unwrap_or(current);
                self.settle = Some(Settle::new(from, position, now_ms));
            }
        }
    }

    /// Pin the element at an explicit position (used when a dragged item is
    /// dropped); clearing the target forces the next retarget to animate.
    fn place(&mut self, position: Point) {
        self.current = Some(position);
        self.target = None;
        self.settle = None;
    }
}

/// One ordered collection of items with its layout strategy and hooks.
///
/// The container never mutates the item sequence itself; the owner passes a
/// fresh sequence through [`SortableContainer::set_items`] in response to
/// the structural hooks.
pub struct SortableContainer<T> {
    id: ContainerId,
    items: Vec<T>,
    elements: HashMap<T, ElementState>,
    strategy: Box<dyn LayoutStrategy>,
    pub(crate) hooks: Hooks<T>,
    ctx: LayoutContext,
    layout: LayoutResult,
    dirty: bool,
}

impl<T: Clone + Eq + Hash> SortableContainer<T> {
    pub(crate) fn new(mut strategy: Box<dyn LayoutStrategy>, hooks: Hooks<T>) -> Self {
        let ctx = LayoutContext::default();
        strategy.mount(&ctx);
        Self {
            id: Uuid::new_v4(),
            items: Vec::new(),
            elements: HashMap::new(),
            strategy,
            hooks,
            ctx,
            layout: LayoutResult::empty(),
            dirty: true,
        }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// The current ordered sequence, as last supplied by the owner.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }

    /// Replace the ordered sequence. Layout stays untouched until the
    /// element map catches up with the new membership.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.dirty = true;
    }

    /// Register the rendered element for an item, with its measured size.
    pub fn element_mounted(&mut self, item: T, size: Size) {
        self.elements.insert(item, ElementState::new(size));
        self.dirty = true;
    }

    /// Drop the rendered element for an item.
    pub fn element_unmounted(&mut self, item: &T) {
        if self.elements.remove(item).is_some() {
            self.dirty = true;
        }
    }

    /// Update the measured size of a mounted element.
    pub fn set_element_size(&mut self, item: &T, size: Size) -> Result<(), SortError> {
        let element = self.elements.get_mut(item).ok_or(SortError::UnknownItem)?;
        if element.size != size {
            element.size = size;
            self.dirty = true;
        }
        Ok(())
    }

    pub fn element_size(&self, item: &T) -> Option<Size> {
        self.elements.get(item).map(|e| e.size)
    }

    /// Page-space origin of the container.
    pub fn origin(&self) -> Point {
        self.ctx.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        if self.ctx.origin != origin {
            self.ctx.origin = origin;
            self.dirty = true;
        }
    }

    /// Push the available space (the host's resize-observer signal).
    pub fn set_viewport(&mut self, viewport: Size) {
        if self.ctx.viewport != viewport {
            self.ctx.viewport = viewport;
            self.dirty = true;
        }
    }

    /// Force a relayout on the next refresh, for invalidations the engine
    /// cannot observe itself.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Whether the element map matches the sequence's membership. Until it
    /// does, the previous layout stays in effect.
    pub fn is_reconciled(&self) -> bool {
        self.items.len() == self.elements.len()
            && self.items.iter().all(|item| self.elements.contains_key(item))
    }

    /// The most recent layout result.
    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    /// Recompute the layout if invalidated and reconciled, then reassign
    /// targets for every element except the dragged one.
    pub(crate) fn refresh(&mut self, now_ms: f64, dragged: Option<&T>) {
        if self.dirty && self.is_reconciled() {
            let sizes: Vec<Size> = self
                .items
                .iter()
                .filter_map(|item| self.elements.get(item))
                .map(|element| element.size)
                .collect();
            self.layout = self.strategy.layout(&self.ctx, &sizes);
            self.dirty = false;
        }
        self.apply_targets(now_ms, dragged);
    }

    /// Assign each element its layout position, animating changes. The
    /// dragged item is skipped: the session positions it freely.
    pub(crate) fn apply_targets(&mut self, now_ms: f64, dragged: Option<&T>) {
        for (index, item) in self.items.iter().enumerate() {
            if Some(item) == dragged {
                continue;
            }
            let Some(position) = self.layout.position_of(index) else {
                continue;
            };
            if let Some(element) = self.elements.get_mut(item) {
                element.retarget(position, now_ms);
            }
        }
    }

    /// Rendered (possibly mid-settle) container-local position of an item.
    pub fn sample_position(&mut self, item: &T, now_ms: f64) -> Option<Point> {
        self.elements.get_mut(item).and_then(|e| e.sample(now_ms))
    }

    /// Cancel an in-flight settle the instant the item starts dragging.
    pub(crate) fn freeze_settle(&mut self, item: &T, now_ms: f64) {
        if let Some(element) = self.elements.get_mut(item) {
            element.freeze(now_ms);
        }
    }

    /// Pin a dropped item at its release position so it settles from there
    /// into its slot.
    pub(crate) fn place(&mut self, item: &T, position: Point) {
        if let Some(element) = self.elements.get_mut(item) {
            element.place(position);
        }
    }

    pub(crate) fn strategy_unmount(&mut self) {
        self.strategy.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FlowGrid;
    use crate::settle::SETTLE_DURATION_MS;

    const CELL: Size = Size::new(100.0, 100.0);

    fn container(items: &[&'static str]) -> SortableContainer<&'static str> {
        let mut c = SortableContainer::new(Box::new(FlowGrid::new()), Hooks::new());
        c.set_viewport(Size::new(250.0, 600.0));
        c.set_items(items.to_vec());
        for &item in items {
            c.element_mounted(item, CELL);
        }
        c
    }

    #[test]
    fn test_first_layout_applies_positions_immediately() {
        let mut c = container(&["a", "b", "c"]);
        c.refresh(0.0, None);

        // No fly-in: the first assignment is not animated.
        assert_eq!(c.sample_position(&"a", 0.0), Some(Point::new(25.0, 0.0)));
        assert_eq!(c.sample_position(&"b", 0.0), Some(Point::new(125.0, 0.0)));
        assert_eq!(c.sample_position(&"c", 0.0), Some(Point::new(25.0, 100.0)));
    }

    #[test]
    fn test_layout_deferred_until_reconciled() {
        let mut c = container(&["a", "b"]);
        c.refresh(0.0, None);
        let before = c.layout().positions().to_vec();

        // Sequence grows but the element is not mounted yet: the previous
        // layout stays in effect.
        c.set_items(vec!["a", "b", "c"]);
        assert!(!c.is_reconciled());
        c.refresh(10.0, None);
        assert_eq!(c.layout().positions(), before.as_slice());

        c.element_mounted("c", CELL);
        assert!(c.is_reconciled());
        c.refresh(20.0, None);
        assert_eq!(c.layout().len(), 3);
    }

    #[test]
    fn test_reorder_starts_settle_animation() {
        let mut c = container(&["a", "b"]);
        c.refresh(0.0, None);

        c.set_items(vec!["b", "a"]);
        c.refresh(1000.0, None);

        // Mid-animation, "a" is between its old and new slots.
        let mid = c.sample_position(&"a", 1000.0 + SETTLE_DURATION_MS / 2.0).unwrap();
        assert!(mid.x > 25.0 && mid.x < 125.0);

        // Settled afterwards.
        let done = c.sample_position(&"a", 1000.0 + SETTLE_DURATION_MS).unwrap();
        assert_eq!(done, Point::new(125.0, 0.0));
        assert_eq!(
            c.sample_position(&"b", 1000.0 + SETTLE_DURATION_MS),
            Some(Point::new(25.0, 0.0))
        );
    }

    #[test]
    fn test_dragged_item_keeps_stale_target() {
        let mut c = container(&["a", "b"]);
        c.refresh(0.0, None);

        c.set_items(vec!["b", "a"]);
        c.refresh(0.0, Some(&"a"));

        // "b" moves to slot 0; "a" is left alone for the session to place.
        assert_eq!(
            c.sample_position(&"b", SETTLE_DURATION_MS),
            Some(Point::new(25.0, 0.0))
        );
        assert_eq!(c.sample_position(&"a", SETTLE_DURATION_MS), Some(Point::new(25.0, 0.0)));
    }

    #[test]
    fn test_place_then_retarget_settles_from_drop_point() {
        let mut c = container(&["a", "b"]);
        c.refresh(0.0, None);

        c.place(&"a", Point::new(60.0, 40.0));
        c.apply_targets(2000.0, None);

        assert_eq!(c.sample_position(&"a", 2000.0), Some(Point::new(60.0, 40.0)));
        assert_eq!(
            c.sample_position(&"a", 2000.0 + SETTLE_DURATION_MS),
            Some(Point::new(25.0, 0.0))
        );
    }

    #[test]
    fn test_freeze_settle_stops_animation() {
        let mut c = container(&["a", "b"]);
        c.refresh(0.0, None);
        c.set_items(vec!["b", "a"]);
        c.refresh(1000.0, None);

        let halfway = 1000.0 + SETTLE_DURATION_MS / 2.0;
        let frozen_at = c.sample_position(&"a", halfway).unwrap();
        c.freeze_settle(&"a", halfway);

        // Time passes; the element no longer moves.
        assert_eq!(c.sample_position(&"a", halfway + 1000.0), Some(frozen_at));
    }

    #[test]
    fn test_set_element_size_unknown_item() {
        let mut c = container(&["a"]);
        assert!(matches!(
            c.set_element_size(&"zzz", CELL),
            Err(SortError::UnknownItem)
        ));
        assert!(c.set_element_size(&"a", Size::new(50.0, 50.0)).is_ok());
    }

    #[test]
    fn test_viewport_change_invalidates() {
        let mut c = container(&["a", "b", "c"]);
        c.refresh(0.0, None);
        assert_eq!(c.layout().position_of(2), Some(Point::new(25.0, 100.0)));

        // Widen to three columns: item 2 moves up to the first row.
        c.set_viewport(Size::new(320.0, 600.0));
        c.refresh(0.0, None);
        assert_eq!(c.layout().position_of(2), Some(Point::new(210.0, 0.0)));
    }
}
