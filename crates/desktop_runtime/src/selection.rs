//! Rubber-band selection over live icon geometry.
//!
//! The engine only owns the transient box. Membership is recomputed from scratch on every
//! pointer move against the bounds the caller supplies, and the committed result is handed back
//! to the caller (the icon grid owns the selected set).

use platform_host::elapsed_ms;

use crate::{
    config::DEFAULT_SELECTION_MIN_DURATION_MS,
    geometry::{rects_intersect, Point, Rect},
    model::IconId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Anchor and free corner of a rubber band, container-relative.
pub struct SelectionBox {
    pub start: Point,
    pub current: Point,
}

impl SelectionBox {
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.start, self.current)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveBand {
    bounds: SelectionBox,
    started_at_ms: u64,
    members: Vec<IconId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEngine {
    min_duration_ms: u64,
    active: Option<ActiveBand>,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SELECTION_MIN_DURATION_MS)
    }
}

impl SelectionEngine {
    pub fn new(min_duration_ms: u64) -> Self {
        Self {
            min_duration_ms,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Anchors a new box at `point`. Refused while another box is active.
    pub fn begin(&mut self, point: Point, at_ms: u64) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(ActiveBand {
            bounds: SelectionBox {
                start: point,
                current: point,
            },
            started_at_ms: at_ms,
            members: Vec::new(),
        });
        true
    }

    /// Moves the free corner and recomputes membership against `icon_bounds`.
    pub fn update(&mut self, point: Point, icon_bounds: &[(IconId, Rect)]) -> bool {
        let Some(band) = self.active.as_mut() else {
            return false;
        };
        band.bounds.current = point;
        let rect = band.bounds.rect();
        band.members = icon_bounds
            .iter()
            .filter(|(_, bounds)| rects_intersect(rect, *bounds))
            .map(|(id, _)| id.clone())
            .collect();
        true
    }

    /// Ends the gesture and returns the set to commit, or `None` when no box was active.
    ///
    /// Gestures shorter than the minimum duration are treated as clicks and commit the empty
    /// set.
    pub fn finish(&mut self, at_ms: u64) -> Option<Vec<IconId>> {
        let band = self.active.take()?;
        if elapsed_ms(band.started_at_ms, at_ms) >= self.min_duration_ms {
            Some(band.members)
        } else {
            Some(Vec::new())
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn selection_box(&self) -> Option<SelectionBox> {
        self.active.as_ref().map(|band| band.bounds)
    }

    /// Current normalised rectangle, for rendering the band.
    pub fn selection_rect(&self) -> Option<Rect> {
        self.selection_box().map(|bounds| bounds.rect())
    }

    /// Membership computed by the latest update.
    pub fn pending_members(&self) -> &[IconId] {
        match &self.active {
            Some(band) => &band.members,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scene() -> Vec<(IconId, Rect)> {
        vec![
            (IconId::new("a"), Rect::from_corners(Point::new(0, 0), Point::new(100, 100))),
            (IconId::new("b"), Rect::from_corners(Point::new(150, 150), Point::new(250, 250))),
            (IconId::new("c"), Rect::from_corners(Point::new(400, 400), Point::new(500, 500))),
        ]
    }

    #[test]
    fn held_drag_commits_overlapping_icons() {
        let mut engine = SelectionEngine::default();
        assert!(engine.begin(Point::new(10, 10), 1_000));
        engine.update(Point::new(120, 90), &scene());
        engine.update(Point::new(300, 300), &scene());

        assert_eq!(engine.selection_rect(), Some(Rect::new(10, 10, 290, 290)));
        assert_eq!(
            engine.finish(1_200),
            Some(vec![IconId::new("a"), IconId::new("b")])
        );
        assert!(!engine.is_active());
    }

    #[test]
    fn quick_gesture_commits_the_empty_set() {
        let mut engine = SelectionEngine::default();
        engine.begin(Point::new(10, 10), 1_000);
        engine.update(Point::new(300, 300), &scene());
        assert_eq!(engine.pending_members().len(), 2);
        assert_eq!(engine.finish(1_149), Some(Vec::new()));
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut engine = SelectionEngine::new(150);
        engine.begin(Point::new(10, 10), 0);
        engine.update(Point::new(60, 60), &scene());
        assert_eq!(engine.finish(150), Some(vec![IconId::new("a")]));
    }

    #[test]
    fn membership_has_no_history() {
        let mut engine = SelectionEngine::default();
        engine.begin(Point::new(10, 10), 0);
        engine.update(Point::new(300, 300), &scene());
        engine.update(Point::new(50, 50), &scene());
        assert_eq!(engine.pending_members(), &[IconId::new("a")]);
    }

    #[test]
    fn zero_area_box_selects_nothing() {
        let mut engine = SelectionEngine::default();
        engine.begin(Point::new(50, 50), 0);
        engine.update(Point::new(50, 50), &scene());
        assert!(engine.pending_members().is_empty());
        engine.update(Point::new(50, 200), &scene());
        assert!(engine.pending_members().is_empty());
        assert_eq!(engine.finish(500), Some(Vec::new()));
    }

    #[test]
    fn second_begin_is_refused_and_cancel_drops_the_box() {
        let mut engine = SelectionEngine::default();
        assert!(engine.begin(Point::new(0, 0), 0));
        assert!(!engine.begin(Point::new(5, 5), 10));
        assert_eq!(engine.selection_box().map(|b| b.start), Some(Point::new(0, 0)));

        assert!(engine.cancel());
        assert_eq!(engine.finish(1_000), None);
        assert!(!engine.update(Point::new(1, 1), &scene()));
    }

    #[test]
    fn clock_skew_counts_as_a_click() {
        let mut engine = SelectionEngine::default();
        engine.begin(Point::new(10, 10), 5_000);
        engine.update(Point::new(300, 300), &scene());
        assert_eq!(engine.finish(4_000), Some(Vec::new()));
    }
}
