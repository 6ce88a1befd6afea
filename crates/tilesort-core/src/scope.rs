//! Container registry and pointer event routing.
//!
//! A [`SortableScope`] holds a set of sibling containers and the single
//! drag session they share. It is an explicit value the host passes around,
//! not ambient state, so independent page regions stay isolated.

use std::hash::Hash;

use kurbo::Point;

use crate::container::{ContainerId, SortableContainer};
use crate::drag::{ActiveDrag, DragConfig, DragPhase, Gesture};
use crate::error::SortError;
use crate::geometry::{local_to_page, rect_at};
use crate::hooks::{Hooks, fire};
use crate::input::{MouseButton, PointerEvent};
use crate::layout::{Hit, LayoutStrategy};

/// A set of sibling sortable containers sharing one drag session.
///
/// All pointer routing is synchronous: the structural decision for an event
/// (move, transfer, click, drag end) is made before `handle_pointer_event`
/// returns. Layout recomputation reacts lazily through each container's
/// dirty flag.
pub struct SortableScope<T> {
    /// Registration order; also the cross-container hit-test order.
    containers: Vec<SortableContainer<T>>,
    session: Option<ActiveDrag<T>>,
    config: DragConfig,
}

impl<T: Clone + Eq + Hash> SortableScope<T> {
    pub fn new() -> Self {
        Self::with_config(DragConfig::default())
    }

    pub fn with_config(config: DragConfig) -> Self {
        Self {
            containers: Vec::new(),
            session: None,
            config,
        }
    }

    pub fn config(&self) -> DragConfig {
        self.config
    }

    /// Register a container. Containers are hit-tested in registration
    /// order (after the drag's source container, which always goes first).
    pub fn add_container(
        &mut self,
        strategy: Box<dyn LayoutStrategy>,
        hooks: Hooks<T>,
    ) -> ContainerId {
        let container = SortableContainer::new(strategy, hooks);
        let id = container.id();
        self.containers.push(container);
        id
    }

    /// Unregister a container. An active session whose item lives in this
    /// container is terminated first, so page-global state never leaks past
    /// the container's lifetime.
    pub fn remove_container(&mut self, id: ContainerId) -> Result<(), SortError> {
        if self.session.as_ref().is_some_and(|s| s.source == id) {
            let session = self.session.take();
            if let Some(session) = session {
                if session.dragging {
                    if let Some(container) = self.container_mut(id) {
                        let end = container
                            .index_of(&session.item)
                            .unwrap_or(session.origin_index);
                        fire(
                            "on_drag_end",
                            container
                                .hooks
                                .on_drag_end
                                .as_mut()
                                .map(|f| f(&session.item, session.origin_index, end)),
                        );
                    }
                }
                log::debug!("drag session terminated: source container removed");
            }
        }
        let position = self
            .containers
            .iter()
            .position(|c| c.id() == id)
            .ok_or(SortError::UnknownContainer(id))?;
        let mut container = self.containers.remove(position);
        container.strategy_unmount();
        Ok(())
    }

    pub fn container(&self, id: ContainerId) -> Option<&SortableContainer<T>> {
        self.containers.iter().find(|c| c.id() == id)
    }

    pub fn container_mut(&mut self, id: ContainerId) -> Option<&mut SortableContainer<T>> {
        self.containers.iter_mut().find(|c| c.id() == id)
    }

    fn container_index(&self, id: ContainerId) -> Option<usize> {
        self.containers.iter().position(|c| c.id() == id)
    }

    /// Phase of the shared drag session.
    pub fn phase(&self) -> DragPhase {
        match &self.session {
            None => DragPhase::Idle,
            Some(session) => session.phase(),
        }
    }

    /// The item held by the active session, if any.
    pub fn dragged_item(&self) -> Option<&T> {
        self.session.as_ref().map(|s| &s.item)
    }

    pub fn is_dragged(&self, item: &T) -> bool {
        self.session.as_ref().is_some_and(|s| s.item == *item)
    }

    /// Route a raw pointer event. `Down` events are resolved to an item by
    /// hit-testing the press position against the rendered elements; hosts
    /// with dedicated drag handles can call [`SortableScope::press`]
    /// directly instead.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
                time_ms,
            } => {
                if self.session.is_some() {
                    log::debug!("pointer down ignored: a drag session is active");
                    return;
                }
                if let Some((container, item)) = self.item_at(*position, *time_ms) {
                    if let Err(err) = self.press(container, &item, event) {
                        log::debug!("press rejected: {err}");
                    }
                }
            }
            PointerEvent::Down { .. } => {}
            PointerEvent::Move { position, time_ms } => self.update(Some(*position), *time_ms),
            // Scrolling re-runs the structural hit test against the origins
            // the host has pushed, without adding pointer travel.
            PointerEvent::Scroll { time_ms, .. } => self.update(None, *time_ms),
            PointerEvent::Up {
                button: MouseButton::Left,
                ..
            } => self.release(event),
            PointerEvent::Up { .. } => {}
        }
    }

    /// Begin a session from a press on an item's handle. Only a primary
    /// button `Down` starts a session; a second concurrent press is
    /// rejected without touching the active session.
    pub fn press(
        &mut self,
        container: ContainerId,
        item: &T,
        event: &PointerEvent,
    ) -> Result<(), SortError> {
        let PointerEvent::Down {
            position,
            button: MouseButton::Left,
            time_ms,
        } = event
        else {
            return Ok(());
        };
        if self.session.is_some() {
            return Err(SortError::SessionActive);
        }

        let index = self
            .container_index(container)
            .ok_or(SortError::UnknownContainer(container))?;
        let c = &mut self.containers[index];
        c.refresh(*time_ms, None);
        let item_index = c.index_of(item).ok_or(SortError::UnknownItem)?;
        let local = c
            .sample_position(item, *time_ms)
            .or_else(|| c.layout().position_of(item_index))
            .unwrap_or(Point::ZERO);
        let top_left = local_to_page(local, c.origin());
        let anchor = *position - top_left;

        self.session = Some(ActiveDrag::new(
            item.clone(),
            container,
            item_index,
            anchor,
            *position,
            *time_ms,
        ));
        Ok(())
    }

    /// Reset the session without a pointer release. Fires `on_drag_end` if
    /// the gesture had already become a drag; never fires structural hooks.
    pub fn cancel_drag(&mut self, now_ms: f64) {
        let Some(session) = self.session.take() else {
            return;
        };
        if session.dragging {
            if let Some(container) = self.container_mut(session.source) {
                let origin = container.origin();
                let end = container
                    .index_of(&session.item)
                    .unwrap_or(session.origin_index);
                container.place(&session.item, session.local_position(origin));
                container.apply_targets(now_ms, None);
                fire(
                    "on_drag_end",
                    container
                        .hooks
                        .on_drag_end
                        .as_mut()
                        .map(|f| f(&session.item, session.origin_index, end)),
                );
            }
        }
        log::debug!("drag session canceled");
    }

    /// Advance layouts and settle animations; call once per frame.
    pub fn tick(&mut self, now_ms: f64) {
        let dragged = self.session.as_ref().map(|s| s.item.clone());
        for container in &mut self.containers {
            container.refresh(now_ms, dragged.as_ref());
        }
    }

    /// Rendered container-local position of an item: the session's
    /// free-floating position while the item is being dragged, the settling
    /// layout position otherwise.
    pub fn item_position(
        &mut self,
        container: ContainerId,
        item: &T,
        now_ms: f64,
    ) -> Option<Point> {
        if let Some(session) = &self.session {
            if session.dragging && session.item == *item {
                let origin = self.container(session.source)?.origin();
                return Some(session.local_position(origin));
            }
        }
        let index = self.container_index(container)?;
        self.containers[index].sample_position(item, now_ms)
    }

    /// Find the topmost rendered element under a page-space point.
    fn item_at(&mut self, position: Point, now_ms: f64) -> Option<(ContainerId, T)> {
        for ci in 0..self.containers.len() {
            self.containers[ci].refresh(now_ms, None);
            let origin = self.containers[ci].origin();
            for i in 0..self.containers[ci].len() {
                let item = self.containers[ci].items()[i].clone();
                let Some(local) = self.containers[ci].sample_position(&item, now_ms) else {
                    continue;
                };
                let Some(size) = self.containers[ci].element_size(&item) else {
                    continue;
                };
                if rect_at(local_to_page(local, origin), size).contains(position) {
                    return Some((self.containers[ci].id(), item));
                }
            }
        }
        None
    }

    /// Pointer-move/scroll step: track travel, refresh layouts, promote
    /// `Armed -> Dragging` once both click thresholds are crossed, then run
    /// move detection.
    fn update(&mut self, position: Option<Point>, now_ms: f64) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        if let Some(position) = position {
            session.track(position);
        }
        for container in &mut self.containers {
            container.refresh(now_ms, Some(&session.item));
        }

        if !session.dragging && session.crossed(now_ms, &self.config) {
            session.dragging = true;
            self.begin_drag(&session, now_ms);
        }
        if session.dragging {
            self.detect_move(&mut session);
        }
        self.session = Some(session);
    }

    /// Fire the one-time drag-start notification and cancel any settle
    /// still easing the grabbed item.
    fn begin_drag(&mut self, session: &ActiveDrag<T>, now_ms: f64) {
        if let Some(container) = self.container_mut(session.source) {
            container.freeze_settle(&session.item, now_ms);
            let index = container
                .index_of(&session.item)
                .unwrap_or(session.origin_index);
            fire(
                "on_drag_start",
                container
                    .hooks
                    .on_drag_start
                    .as_mut()
                    .map(|f| f(&session.item, index)),
            );
        }
    }

    /// Hit-test the dragged item's rectangle: the source container first;
    /// if that yields no `Inside` hit, every other container in
    /// registration order. The first usable result wins.
    fn detect_move(&mut self, session: &mut ActiveDrag<T>) {
        let Some(source_index) = self.container_index(session.source) else {
            return;
        };
        // The owner may not have applied a previous mutation yet; until the
        // item shows up in its logical source, skip this tick.
        let Some(current) = self.containers[source_index].index_of(&session.item) else {
            return;
        };
        let Some(size) = self.containers[source_index].element_size(&session.item) else {
            return;
        };
        let rect = rect_at(session.page_position(), size);

        if let Some(Hit::Inside(to)) = self.containers[source_index].layout().hit_test(rect) {
            if to != current {
                let item = session.item.clone();
                let container = &mut self.containers[source_index];
                fire(
                    "on_move",
                    container
                        .hooks
                        .on_move
                        .as_mut()
                        .map(|f| f(&item, current, to)),
                );
            }
            return;
        }

        let target = self
            .containers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != source_index)
            .find_map(|(i, c)| c.layout().hit_test(rect).map(|hit| (i, hit)));
        let Some((target_index, hit)) = target else {
            return;
        };

        let item = session.item.clone();
        let to = hit.index();
        {
            let container = &mut self.containers[source_index];
            fire(
                "on_remove",
                container
                    .hooks
                    .on_remove
                    .as_mut()
                    .map(|f| f(&item, current)),
            );
        }
        let target_id = self.containers[target_index].id();
        {
            let container = &mut self.containers[target_index];
            fire(
                "on_insert",
                container.hooks.on_insert.as_mut().map(|f| f(&item, to)),
            );
        }
        // Subsequent hit tests use the new owner's coordinate space.
        session.source = target_id;
    }

    /// Pointer-up: classify the whole gesture exactly once and dispatch the
    /// terminal hook.
    fn release(&mut self, event: &PointerEvent) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        let now_ms = event.time_ms();
        session.track(event.position());
        for container in &mut self.containers {
            container.refresh(now_ms, Some(&session.item));
        }
        // A crossing observed only at release still owes its drag-start.
        if !session.dragging && session.crossed(now_ms, &self.config) {
            session.dragging = true;
            self.begin_drag(&session, now_ms);
        }

        match session.classify(now_ms, &self.config) {
            Gesture::Click => {
                if let Some(container) = self.container_mut(session.source) {
                    let index = container
                        .index_of(&session.item)
                        .unwrap_or(session.origin_index);
                    fire(
                        "on_click",
                        container
                            .hooks
                            .on_click
                            .as_mut()
                            .map(|f| f(&session.item, index, event)),
                    );
                }
            }
            Gesture::Drag => {
                if let Some(container) = self.container_mut(session.source) {
                    let origin = container.origin();
                    let end = container
                        .index_of(&session.item)
                        .unwrap_or(session.origin_index);
                    // Drop the item where it was released and let it settle
                    // into its slot.
                    container.place(&session.item, session.local_position(origin));
                    container.apply_targets(now_ms, None);
                    fire(
                        "on_drag_end",
                        container
                            .hooks
                            .on_drag_end
                            .as_mut()
                            .map(|f| f(&session.item, session.origin_index, end)),
                    );
                }
            }
        }
    }
}

impl<T: Clone + Eq + Hash> Default for SortableScope<T> {
    fn default() -> Self {
        Self::new()
    }
}
