//! Single-axis list layout with configurable alignment, used for toolbar
//! rows and vertical lists.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use super::{Hit, LayoutContext, LayoutResult, LayoutStrategy};
use crate::geometry::{intersects, page_to_local, rect_at};

/// Main axis of a [`Linear`] layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Cross-axis placement of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
    /// Items are placed at the cross-axis start; the host stretches them.
    Stretch,
}

/// Linear (list) strategy: items along one axis with cumulative offsets.
#[derive(Debug, Clone, Copy)]
pub struct Linear {
    pub axis: Axis,
    pub align: Alignment,
    /// Main-axis spacing between consecutive items.
    pub gap: f64,
}

impl Linear {
    pub fn horizontal() -> Self {
        Self {
            axis: Axis::Horizontal,
            align: Alignment::Start,
            gap: 0.0,
        }
    }

    pub fn vertical() -> Self {
        Self {
            axis: Axis::Vertical,
            align: Alignment::Start,
            gap: 0.0,
        }
    }

    pub fn with_alignment(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap.max(0.0);
        self
    }

    fn main_of(&self, size: Size) -> f64 {
        match self.axis {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    fn cross_of(&self, size: Size) -> f64 {
        match self.axis {
            Axis::Horizontal => size.height,
            Axis::Vertical => size.width,
        }
    }

    fn point(&self, main: f64, cross: f64) -> Point {
        match self.axis {
            Axis::Horizontal => Point::new(main, cross),
            Axis::Vertical => Point::new(cross, main),
        }
    }

    fn size(&self, main: f64, cross: f64) -> Size {
        match self.axis {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }
}

impl LayoutStrategy for Linear {
    fn layout(&self, ctx: &LayoutContext, sizes: &[Size]) -> LayoutResult {
        let n = sizes.len();
        if n == 0 {
            return LayoutResult::degenerate(Size::ZERO, Vec::new());
        }

        let mut starts = Vec::with_capacity(n);
        let mut cursor = 0.0;
        let mut max_cross: f64 = 0.0;
        for size in sizes {
            starts.push(cursor);
            cursor += self.main_of(*size) + self.gap;
            max_cross = max_cross.max(self.cross_of(*size));
        }
        let main_total = cursor - self.gap;
        if main_total <= 0.0 {
            return LayoutResult::degenerate(Size::ZERO, vec![Point::ZERO; n]);
        }

        let cross_avail = {
            let viewport_cross = self.cross_of(ctx.viewport);
            if viewport_cross > 0.0 {
                viewport_cross
            } else {
                max_cross
            }
        };

        let positions: Vec<Point> = sizes
            .iter()
            .zip(&starts)
            .map(|(size, start)| {
                let cross = match self.align {
                    Alignment::Start | Alignment::Stretch => 0.0,
                    Alignment::Center => ((cross_avail - self.cross_of(*size)) / 2.0).max(0.0),
                    Alignment::End => (cross_avail - self.cross_of(*size)).max(0.0),
                };
                self.point(*start, cross)
            })
            .collect();

        // Insertion boundary at each item's main-axis midpoint.
        let mids: Vec<f64> = sizes
            .iter()
            .zip(&starts)
            .map(|(size, start)| start + self.main_of(*size) / 2.0)
            .collect();

        let footprint = self.size(main_total, cross_avail);
        let origin = ctx.origin;
        let axis = self.axis;
        let hit = move |rect: Rect| -> Option<Hit> {
            let bounds = rect_at(origin, footprint);
            if !intersects(rect, bounds) {
                return None;
            }
            let center = page_to_local(rect.center(), origin);
            let main = match axis {
                Axis::Horizontal => center.x,
                Axis::Vertical => center.y,
            };
            match mids.iter().position(|mid| main < *mid) {
                Some(i) => Some(Hit::Inside(i)),
                None => Some(Hit::End(n)),
            }
        };

        LayoutResult::new(footprint, positions, hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(n: usize, w: f64, h: f64) -> Vec<Size> {
        vec![Size::new(w, h); n]
    }

    fn ctx(origin: Point, viewport: Size) -> LayoutContext {
        LayoutContext { origin, viewport }
    }

    #[test]
    fn test_horizontal_offsets_with_gap() {
        let strategy = Linear::horizontal().with_gap(8.0);
        let layout = strategy.layout(
            &ctx(Point::ZERO, Size::new(500.0, 40.0)),
            &sizes(3, 40.0, 40.0),
        );

        assert_eq!(layout.position_of(0), Some(Point::new(0.0, 0.0)));
        assert_eq!(layout.position_of(1), Some(Point::new(48.0, 0.0)));
        assert_eq!(layout.position_of(2), Some(Point::new(96.0, 0.0)));
        assert_eq!(layout.footprint(), Size::new(136.0, 40.0));
    }

    #[test]
    fn test_vertical_center_alignment() {
        let strategy = Linear::vertical().with_alignment(Alignment::Center);
        let layout = strategy.layout(
            &ctx(Point::ZERO, Size::new(200.0, 0.0)),
            &[Size::new(100.0, 30.0), Size::new(60.0, 30.0)],
        );

        assert_eq!(layout.position_of(0), Some(Point::new(50.0, 0.0)));
        assert_eq!(layout.position_of(1), Some(Point::new(70.0, 30.0)));
    }

    #[test]
    fn test_end_alignment() {
        let strategy = Linear::horizontal().with_alignment(Alignment::End);
        let layout = strategy.layout(
            &ctx(Point::ZERO, Size::new(500.0, 60.0)),
            &[Size::new(40.0, 40.0)],
        );
        assert_eq!(layout.position_of(0), Some(Point::new(0.0, 20.0)));
    }

    #[test]
    fn test_hit_maps_midpoints_to_insertion_index() {
        let strategy = Linear::horizontal();
        let layout = strategy.layout(
            &ctx(Point::ZERO, Size::new(500.0, 40.0)),
            &sizes(3, 40.0, 40.0),
        );

        // Centers: 20, 60, 100. A probe centered before an item's midpoint
        // inserts before that item.
        let probe = |x: f64| layout.hit_test(Rect::new(x - 5.0, 0.0, x + 5.0, 40.0));
        assert_eq!(probe(10.0), Some(Hit::Inside(0)));
        assert_eq!(probe(30.0), Some(Hit::Inside(1)));
        assert_eq!(probe(70.0), Some(Hit::Inside(2)));
        assert_eq!(probe(110.0), Some(Hit::End(3)));
    }

    #[test]
    fn test_hit_outside_bounds_is_none() {
        let strategy = Linear::horizontal();
        let layout = strategy.layout(
            &ctx(Point::new(0.0, 400.0), Size::new(500.0, 40.0)),
            &sizes(2, 40.0, 40.0),
        );
        assert_eq!(layout.hit_test(Rect::new(0.0, 0.0, 40.0, 40.0)), None);
        assert_eq!(
            layout.hit_test(Rect::new(10.0, 400.0, 50.0, 440.0)),
            Some(Hit::Inside(0))
        );
    }

    #[test]
    fn test_degenerate_sizes() {
        let strategy = Linear::horizontal();
        let layout = strategy.layout(
            &ctx(Point::ZERO, Size::new(500.0, 40.0)),
            &sizes(3, 0.0, 0.0),
        );
        assert_eq!(layout.footprint(), Size::ZERO);
        assert_eq!(layout.hit_test(Rect::new(0.0, 0.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_zero_items() {
        let strategy = Linear::vertical();
        let layout = strategy.layout(&ctx(Point::ZERO, Size::new(100.0, 100.0)), &[]);
        assert!(layout.is_empty());
        assert_eq!(layout.hit_test(Rect::new(0.0, 0.0, 10.0, 10.0)), None);
    }
}
