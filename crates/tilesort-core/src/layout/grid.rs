//! Wrapping flow grid: fixed-size tiles laid out row-major, centered
//! horizontally inside the available width.

use kurbo::{Point, Rect, Size};

use super::{Hit, LayoutContext, LayoutResult, LayoutStrategy};
use crate::geometry::{intersects, page_to_local, rect_at};

/// Flow-grid strategy. All items are treated as equally sized; the first
/// reported element size is used as the cell size.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowGrid;

impl FlowGrid {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutStrategy for FlowGrid {
    fn layout(&self, ctx: &LayoutContext, sizes: &[Size]) -> LayoutResult {
        let n = sizes.len();
        let width = ctx.viewport.width;
        if n == 0 {
            // Zero items: zero height, no valid hit.
            return LayoutResult::degenerate(Size::new(width.max(0.0), 0.0), Vec::new());
        }

        let cell = sizes[0];
        if cell.width <= 0.0 || cell.height <= 0.0 || width < cell.width {
            return LayoutResult::degenerate(Size::ZERO, vec![Point::ZERO; n]);
        }

        let columns = (width / cell.width).floor() as usize;
        let rows = n.div_ceil(columns);
        let margin = ((width % cell.width) / 2.0).floor();

        let positions: Vec<Point> = (0..n)
            .map(|i| {
                Point::new(
                    margin + cell.width * (i % columns) as f64,
                    cell.height * (i / columns) as f64,
                )
            })
            .collect();

        let footprint = Size::new(width, cell.height * rows as f64);
        let origin = ctx.origin;
        let hit = move |rect: Rect| -> Option<Hit> {
            let bounds = rect_at(origin, footprint);
            if !intersects(rect, bounds) {
                return None;
            }
            let center = page_to_local(rect.center(), origin);
            let col = ((center.x - margin) / cell.width)
                .floor()
                .clamp(0.0, (columns - 1) as f64) as usize;
            let row = (center.y / cell.height)
                .floor()
                .clamp(0.0, (rows - 1) as f64) as usize;
            let index = (row * columns + col).min(n);
            if index == n {
                Some(Hit::End(n))
            } else {
                Some(Hit::Inside(index))
            }
        };

        LayoutResult::new(footprint, positions, hit)
    }
}
