//! # Landmarks Module
//!
//! Hand-authored structures layered on top of procedural terrain, and the named
//! points of interest that go with them.
//!
//! ## Architecture
//!
//! * **stamp**: primitive box, palm and house stamps that write sparse overrides
//! * **layout**: the authored city, built from those stamps in a fixed order
//! * **tracker**: HUD-side pinning of a landmark plaque
//!
//! The layout depends only on fixed constants, so it is built once per process
//! and shared by every world through [`LandmarkLayout::shared`].

use std::sync::{Arc, OnceLock};

use cgmath::Point3;
use serde::{Deserialize, Serialize};

pub mod layout;
pub mod stamp;
pub mod tracker;

pub use layout::build_landmark_layout;
pub use stamp::{StructureOverrides, StructureStamper};
pub use tracker::LandmarkTracker;

/// Probe distance used when the caller does not supply one.
pub const DEFAULT_LANDMARK_DISTANCE: f32 = 18.0;

/// A named point of interest. Immutable once the layout is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: String,
    pub name: String,
    pub description: String,
    pub position: Point3<f32>,
    /// Distance within which the landmark counts as discovered.
    pub radius: f32,
}

impl Landmark {
    pub fn new(id: &str, name: &str, description: &str, position: Point3<f32>, radius: f32) -> Self {
        Landmark {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            position,
            radius,
        }
    }

    /// Distance to `point` measured in the XZ plane only.
    pub fn planar_distance(&self, point: Point3<f32>) -> f32 {
        let dx = point.x - self.position.x;
        let dz = point.z - self.position.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// A landmark found by a proximity query, with its XZ distance from the probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkHit<'a> {
    pub landmark: &'a Landmark,
    pub distance: f32,
}

/// The frozen override map plus the ordered landmark list.
#[derive(Debug, Default)]
pub struct LandmarkLayout {
    pub overrides: StructureOverrides,
    pub landmarks: Vec<Landmark>,
}

static SHARED_LAYOUT: OnceLock<Arc<LandmarkLayout>> = OnceLock::new();

impl LandmarkLayout {
    /// The authored city layout, built on first use and reused afterwards.
    pub fn shared() -> Arc<LandmarkLayout> {
        let layout = SHARED_LAYOUT.get_or_init(|| {
            let layout = build_landmark_layout();
            log::info!(
                "Built landmark layout: {} overrides, {} landmarks",
                layout.overrides.len(),
                layout.landmarks.len()
            );
            Arc::new(layout)
        });
        Arc::clone(layout)
    }

    /// Returns the closest landmark within `max_distance` (XZ plane) of
    /// `position`. On ties the earliest landmark in authoring order wins.
    pub fn nearest(&self, position: Point3<f32>, max_distance: f32) -> Option<LandmarkHit<'_>> {
        let mut best: Option<LandmarkHit<'_>> = None;

        for landmark in &self.landmarks {
            let distance = landmark.planar_distance(position);
            if distance > max_distance {
                continue;
            }
            if best.map_or(true, |hit| distance < hit.distance) {
                best = Some(LandmarkHit { landmark, distance });
            }
        }

        best
    }

    /// Looks a landmark up by id.
    pub fn by_id(&self, id: &str) -> Option<&Landmark> {
        self.landmarks.iter().find(|landmark| landmark.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_with(landmarks: Vec<Landmark>) -> LandmarkLayout {
        LandmarkLayout {
            overrides: StructureOverrides::default(),
            landmarks,
        }
    }

    #[test]
    fn nearest_ignores_height() {
        let layout = layout_with(vec![Landmark::new("a", "A", "", Point3::new(0.0, 50.0, 0.0), 5.0)]);
        let hit = layout.nearest(Point3::new(3.0, 0.0, 4.0), 10.0).unwrap();
        assert_eq!(hit.landmark.id, "a");
        assert!((hit.distance - 5.0).abs() < 1e-6);
    }

    #[test]
    fn nearest_respects_max_distance() {
        let layout = layout_with(vec![Landmark::new("a", "A", "", Point3::new(10.0, 0.0, 0.0), 5.0)]);
        assert!(layout.nearest(Point3::new(0.0, 0.0, 0.0), 9.9).is_none());
        assert!(layout.nearest(Point3::new(0.0, 0.0, 0.0), 10.0).is_some());
    }

    #[test]
    fn ties_go_to_the_first_landmark() {
        let layout = layout_with(vec![
            Landmark::new("west", "West", "", Point3::new(-4.0, 0.0, 0.0), 5.0),
            Landmark::new("east", "East", "", Point3::new(4.0, 0.0, 0.0), 5.0),
        ]);
        let hit = layout.nearest(Point3::new(0.0, 0.0, 0.0), 10.0).unwrap();
        assert_eq!(hit.landmark.id, "west");
    }

    #[test]
    fn by_id_returns_none_when_absent() {
        let layout = LandmarkLayout::shared();
        assert!(layout.by_id("el-morro").is_some());
        assert!(layout.by_id("atlantis").is_none());
    }

    #[test]
    fn shared_layout_is_built_once() {
        let first = LandmarkLayout::shared();
        let second = LandmarkLayout::shared();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(LandmarkLayout::shared().landmarks.len(), 5);
    }

    #[test]
    fn building_twice_gives_identical_layouts() {
        let first = build_landmark_layout();
        let second = build_landmark_layout();
        assert_eq!(first.landmarks, second.landmarks);
        assert_eq!(first.overrides.len(), second.overrides.len());
        for (world, id) in first.overrides.iter() {
            assert_eq!(second.overrides.get(world), Some(id));
        }
    }
}
