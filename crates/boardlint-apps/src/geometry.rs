//! # Grid Geometry
//!
//! Placement rectangles on the dashboard grid and the overlap predicate
//! used to flag colliding layout items. Intervals are half-open, so two
//! items sharing an edge do not overlap.

use boardlint_core::WidgetId;

/// Horizontal unit count of the dashboard grid.
pub const GRID_COLUMNS: f64 = 40.0;

/// Coordinates assumed for layout items that omit them.
pub const DEFAULT_X: f64 = 0.0;
pub const DEFAULT_Y: f64 = 0.0;
pub const DEFAULT_W: f64 = 12.0;
pub const DEFAULT_H: f64 = 8.0;

/// An axis-aligned placement in grid units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// True when the placement reaches past the last grid column.
    pub fn exceeds_grid(&self) -> bool {
        self.right() > GRID_COLUMNS
    }
}

/// True unless one rectangle lies entirely left of, right of, above, or
/// below the other.
pub fn rectangles_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y)
}

/// A widget already placed on a tab's grid.
#[derive(Debug, Clone)]
pub struct Placement {
    pub widget: WidgetId,
    pub rect: Rect,
}

/// Placements seen so far within one tab's layout.
#[derive(Debug, Default)]
pub struct PlacementHistory {
    placements: Vec<Placement>,
}

impl PlacementHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first earlier placement overlapping `rect`.
    pub fn first_overlap(&self, rect: &Rect) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|p| rectangles_overlap(rect, &p.rect))
    }

    pub fn record(&mut self, widget: WidgetId, rect: Rect) {
        self.placements.push(Placement { widget, rect });
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_rectangles_overlap() {
        let r = Rect::new(0.0, 0.0, 12.0, 8.0);
        assert!(rectangles_overlap(&r, &r));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 12.0, 8.0);
        let right = Rect::new(12.0, 0.0, 12.0, 8.0);
        let below = Rect::new(0.0, 8.0, 12.0, 8.0);
        assert!(!rectangles_overlap(&a, &right));
        assert!(!rectangles_overlap(&a, &below));
    }

    #[test]
    fn partial_overlap() {
        let a = Rect::new(0.0, 0.0, 20.0, 10.0);
        let b = Rect::new(19.0, 9.0, 5.0, 5.0);
        assert!(rectangles_overlap(&a, &b));
    }

    #[test]
    fn grid_bounds() {
        assert!(Rect::new(35.0, 0.0, 10.0, 8.0).exceeds_grid());
        assert!(!Rect::new(30.0, 0.0, 10.0, 8.0).exceeds_grid());
    }

    #[test]
    fn history_reports_first_overlap_only() {
        let mut history = PlacementHistory::new();
        history.record(WidgetId::new("a"), Rect::new(0.0, 0.0, 12.0, 8.0));
        history.record(WidgetId::new("b"), Rect::new(0.0, 0.0, 12.0, 8.0));
        let hit = history.first_overlap(&Rect::new(4.0, 4.0, 4.0, 4.0)).unwrap();
        assert_eq!(hit.widget.as_str(), "a");
        assert!(history
            .first_overlap(&Rect::new(12.0, 0.0, 4.0, 4.0))
            .is_none());
        assert_eq!(history.len(), 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rect() -> impl Strategy<Value = Rect> {
        (0u32..40, 0u32..100, 1u32..40, 1u32..100)
            .prop_map(|(x, y, w, h)| Rect::new(x as f64, y as f64, w as f64, h as f64))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in rect(), b in rect()) {
            prop_assert_eq!(rectangles_overlap(&a, &b), rectangles_overlap(&b, &a));
        }

        #[test]
        fn positive_rectangles_overlap_themselves(r in rect()) {
            prop_assert!(rectangles_overlap(&r, &r));
        }

        #[test]
        fn side_by_side_never_overlap(r in rect(), gap in 0u32..10) {
            let neighbour = Rect::new(r.right() + gap as f64, r.y, r.w, r.h);
            prop_assert!(!rectangles_overlap(&r, &neighbour));
        }
    }
}
