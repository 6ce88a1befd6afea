//! Headless demo: a speed-dial tile grid plus a favorites toolbar.
//!
//! Scripts a click, a reorder and a cross-container transfer through the
//! engine's pointer event API, applying the structural hooks the way a real
//! rendering host would, then prints the resulting orders as JSON.
//!
//! Run with `RUST_LOG=debug` to watch the session transitions.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Size};
use serde_json::json;
use tilesort_core::{
    ContainerId, FlowGrid, Hooks, LayoutStrategy, Linear, MouseButton, PointerEvent, SortableScope,
};

type Item = &'static str;

/// A structural change requested by the engine, to be applied to the model.
#[derive(Debug, Clone, Copy)]
enum Mutation {
    Move { from: usize, to: usize },
    Remove { index: usize },
    Insert { item: Item, index: usize },
}

type Queue = Rc<RefCell<Vec<(ContainerId, Mutation)>>>;

/// One model sequence per container, with the tile size its elements use.
struct Model {
    id: ContainerId,
    items: Vec<Item>,
    tile: Size,
}

/// The demo page: engine scope, backing models, and the mutation queue the
/// hooks feed.
struct Board {
    scope: SortableScope<Item>,
    models: Vec<Model>,
    queue: Queue,
}

impl Board {
    fn new() -> Self {
        Self {
            scope: SortableScope::new(),
            models: Vec::new(),
            queue: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn add_container(
        &mut self,
        name: &'static str,
        strategy: Box<dyn LayoutStrategy>,
        origin: Point,
        viewport: Size,
        tile: Size,
        items: &[Item],
    ) -> ContainerId {
        // The id only exists after registration; the hooks read it from a cell.
        let id_cell: Rc<RefCell<Option<ContainerId>>> = Rc::new(RefCell::new(None));
        let (q1, q2, q3) = (self.queue.clone(), self.queue.clone(), self.queue.clone());
        let (c1, c2, c3) = (id_cell.clone(), id_cell.clone(), id_cell.clone());

        let hooks = Hooks::new()
            .on_click(move |item, index, _| {
                log::info!("[{name}] activated {item} (slot {index})");
                Ok(())
            })
            .on_drag_start(move |item, index| {
                log::info!("[{name}] picked up {item} from slot {index}");
                Ok(())
            })
            .on_drag_end(move |item, from, to| {
                log::info!("[{name}] dropped {item}: slot {from} -> {to}");
                Ok(())
            })
            .on_move(move |item, from, to| {
                log::info!("[{name}] move {item}: {from} -> {to}");
                let id = c1.borrow().unwrap_or_default();
                q1.borrow_mut().push((id, Mutation::Move { from, to }));
                Ok(())
            })
            .on_remove(move |item, index| {
                log::info!("[{name}] remove {item} at {index}");
                let id = c2.borrow().unwrap_or_default();
                q2.borrow_mut().push((id, Mutation::Remove { index }));
                Ok(())
            })
            .on_insert(move |item, index| {
                log::info!("[{name}] insert {item} at {index}");
                let id = c3.borrow().unwrap_or_default();
                q3.borrow_mut()
                    .push((id, Mutation::Insert { item: *item, index }));
                Ok(())
            });

        let id = self.scope.add_container(strategy, hooks);
        *id_cell.borrow_mut() = Some(id);

        let container = self
            .scope
            .container_mut(id)
            .expect("container was just registered");
        container.set_origin(origin);
        container.set_viewport(viewport);
        container.set_items(items.to_vec());
        for &item in items {
            container.element_mounted(item, tile);
        }

        log::debug!("registered {name} container {id}");
        self.models.push(Model {
            id,
            items: items.to_vec(),
            tile,
        });
        id
    }

    /// Apply queued mutations to the models and push the fresh sequences
    /// back, the way a reactive view layer re-renders after a hook.
    fn sync(&mut self) {
        let pending: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        for (id, mutation) in pending {
            let Some(model) = self.models.iter_mut().find(|m| m.id == id) else {
                continue;
            };
            let tile = model.tile;
            match mutation {
                Mutation::Move { from, to } => {
                    let item = model.items.remove(from);
                    model.items.insert(to, item);
                    let items = model.items.clone();
                    if let Some(container) = self.scope.container_mut(id) {
                        container.set_items(items);
                    }
                }
                Mutation::Remove { index } => {
                    let item = model.items.remove(index);
                    let items = model.items.clone();
                    if let Some(container) = self.scope.container_mut(id) {
                        container.set_items(items);
                        container.element_unmounted(&item);
                    }
                }
                Mutation::Insert { item, index } => {
                    model.items.insert(index, item);
                    let items = model.items.clone();
                    if let Some(container) = self.scope.container_mut(id) {
                        container.set_items(items);
                        container.element_mounted(item, tile);
                    }
                }
            }
        }
    }

    fn send(&mut self, event: PointerEvent) {
        self.scope.handle_pointer_event(&event);
        self.sync();
    }

    fn order(&self, id: ContainerId) -> Vec<Item> {
        self.models
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.items.clone())
            .unwrap_or_default()
    }
}

fn down(x: f64, y: f64, t: f64) -> PointerEvent {
    PointerEvent::Down {
        position: Point::new(x, y),
        button: MouseButton::Left,
        time_ms: t,
    }
}

fn mv(x: f64, y: f64, t: f64) -> PointerEvent {
    PointerEvent::Move {
        position: Point::new(x, y),
        time_ms: t,
    }
}

fn up(x: f64, y: f64, t: f64) -> PointerEvent {
    PointerEvent::Up {
        position: Point::new(x, y),
        button: MouseButton::Left,
        time_ms: t,
    }
}

fn main() {
    env_logger::init();
    log::info!("Starting TileSort demo");

    let mut board = Board::new();

    // A 250 px wide dial: 100 px tiles flow into two centered columns.
    let dial = board.add_container(
        "dial",
        Box::new(FlowGrid::new()),
        Point::ZERO,
        Size::new(250.0, 600.0),
        Size::new(100.0, 100.0),
        &["news", "mail", "maps", "music", "video"],
    );

    // A small favorites row below the dial.
    let toolbar = board.add_container(
        "toolbar",
        Box::new(Linear::horizontal().with_gap(8.0)),
        Point::new(0.0, 400.0),
        Size::new(250.0, 60.0),
        Size::new(40.0, 40.0),
        &["home", "search"],
    );

    // 1. A quick, short press on the second tile: a click, nothing moves.
    board.send(down(150.0, 30.0, 0.0));
    board.send(up(152.0, 31.0, 60.0));

    // 2. Drag the first tile onto its right neighbour's cell.
    board.send(down(50.0, 50.0, 1000.0));
    board.send(mv(175.0, 60.0, 1150.0));
    board.send(up(175.0, 60.0, 1200.0));

    // 3. Drag a tile down past the toolbar's last icon: a transfer.
    board.send(down(50.0, 150.0, 2000.0));
    board.send(mv(60.0, 430.0, 2200.0));
    board.send(up(60.0, 430.0, 2250.0));

    let report = json!({
        "dial": board.order(dial),
        "toolbar": board.order(toolbar),
    });
    println!("{report:#}");
}
