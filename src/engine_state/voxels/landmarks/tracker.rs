//! Pinning state for the landmark plaque shown by the HUD.
//!
//! While a landmark is pinned the plaque keeps showing it, with a live distance,
//! however far the viewer walks. Otherwise the plaque follows the nearest
//! landmark in range.

use cgmath::Point3;

use super::{LandmarkHit, LandmarkLayout};

/// What the plaque should show this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaqueView<'a> {
    pub hit: LandmarkHit<'a>,
    pub pinned: bool,
}

#[derive(Debug, Default, Clone)]
pub struct LandmarkTracker {
    pinned_id: Option<String>,
}

impl LandmarkTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pinned_id(&self) -> Option<&str> {
        self.pinned_id.as_deref()
    }

    /// Handles one interact request: pins the nearby landmark, or clears the
    /// pin if nothing is nearby or the nearby landmark is already pinned.
    pub fn toggle_pin(&mut self, nearby: Option<LandmarkHit<'_>>) {
        self.pinned_id = match nearby {
            Some(hit) if self.pinned_id() != Some(hit.landmark.id.as_str()) => {
                Some(hit.landmark.id.clone())
            }
            _ => None,
        };
    }

    /// Resolves the plaque for a viewer at `position`.
    pub fn resolve<'a>(
        &self,
        layout: &'a LandmarkLayout,
        position: Point3<f32>,
        probe_distance: f32,
    ) -> Option<PlaqueView<'a>> {
        if let Some(landmark) = self.pinned_id().and_then(|id| layout.by_id(id)) {
            return Some(PlaqueView {
                hit: LandmarkHit {
                    landmark,
                    distance: landmark.planar_distance(position),
                },
                pinned: true,
            });
        }

        layout
            .nearest(position, probe_distance)
            .map(|hit| PlaqueView { hit, pinned: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::landmarks::{Landmark, StructureOverrides};

    fn layout() -> LandmarkLayout {
        LandmarkLayout {
            overrides: StructureOverrides::default(),
            landmarks: vec![
                Landmark::new("gate", "Gate", "", Point3::new(0.0, 0.0, 0.0), 10.0),
                Landmark::new("fort", "Fort", "", Point3::new(100.0, 0.0, 0.0), 10.0),
            ],
        }
    }

    #[test]
    fn pin_follows_the_viewer_out_of_range() {
        let layout = layout();
        let mut tracker = LandmarkTracker::new();

        tracker.toggle_pin(layout.nearest(Point3::new(1.0, 0.0, 0.0), 20.0));
        assert_eq!(tracker.pinned_id(), Some("gate"));

        let view = tracker.resolve(&layout, Point3::new(60.0, 0.0, 0.0), 20.0).unwrap();
        assert!(view.pinned);
        assert_eq!(view.hit.landmark.id, "gate");
        assert!((view.hit.distance - 60.0).abs() < 1e-4);
    }

    #[test]
    fn toggling_the_same_landmark_clears_the_pin() {
        let layout = layout();
        let mut tracker = LandmarkTracker::new();
        let nearby = layout.nearest(Point3::new(0.0, 0.0, 0.0), 20.0);

        tracker.toggle_pin(nearby);
        tracker.toggle_pin(nearby);

        assert_eq!(tracker.pinned_id(), None);
    }

    #[test]
    fn toggling_with_nothing_nearby_clears_the_pin() {
        let layout = layout();
        let mut tracker = LandmarkTracker::new();
        tracker.toggle_pin(layout.nearest(Point3::new(0.0, 0.0, 0.0), 20.0));

        tracker.toggle_pin(None);

        assert_eq!(tracker.pinned_id(), None);
        assert!(tracker.resolve(&layout, Point3::new(50.0, 0.0, 0.0), 20.0).is_none());
    }

    #[test]
    fn toggling_a_different_landmark_moves_the_pin() {
        let layout = layout();
        let mut tracker = LandmarkTracker::new();
        tracker.toggle_pin(layout.nearest(Point3::new(0.0, 0.0, 0.0), 20.0));
        tracker.toggle_pin(layout.nearest(Point3::new(100.0, 0.0, 0.0), 20.0));
        assert_eq!(tracker.pinned_id(), Some("fort"));
    }
}
