use crate::{
    geometry::SharedWall,
    placement::{PlacedRoom, PlacementMethod},
};

use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};

/// Bounding box of a whole layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// (0, 0, 0, 0) for an empty layout
    pub fn of(rooms: &[PlacedRoom]) -> Self {
        if rooms.is_empty() {
            return Self::default();
        }
        rooms.iter().fold(
            Self {
                min_x: f64::INFINITY,
                min_y: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
                max_y: f64::NEG_INFINITY,
            },
            |b, r| Self {
                min_x: b.min_x.min(r.x),
                min_y: b.min_y.min(r.y),
                max_x: b.max_x.max(r.x + r.width),
                max_y: b.max_y.max(r.y + r.height),
            },
        )
    }
}

/// Two rooms facing each other along a wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallContact {
    pub first: String,
    pub second: String,
    pub wall: SharedWall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSummary {
    pub num_rooms: usize,
    pub total_area: f64,
    pub bounds: Bounds,
    pub overlaps: usize,
    pub grid_fallbacks: usize,
    pub shared_walls: Vec<WallContact>,
}

/// Number of room pairs whose rectangles intersect (no margin)
pub fn count_overlaps(rooms: &[PlacedRoom]) -> usize {
    rooms
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.rect().intersects(&b.rect()))
        .count()
}

impl LayoutSummary {
    /// Summarizes a layout.
    ///
    /// `wall_tolerance` is the largest gap at which two facing edges still
    /// count as one shared wall.
    pub fn from_rooms(rooms: &[PlacedRoom], wall_tolerance: f64) -> Self {
        let shared_walls = rooms
            .iter()
            .tuple_combinations()
            .filter_map(|(a, b)| {
                a.rect()
                    .shared_wall(&b.rect(), wall_tolerance)
                    .map(|wall| WallContact {
                        first: a.name.clone(),
                        second: b.name.clone(),
                        wall,
                    })
            })
            .collect();

        Self {
            num_rooms: rooms.len(),
            total_area: rooms.iter().map(PlacedRoom::area).sum(),
            bounds: Bounds::of(rooms),
            overlaps: count_overlaps(rooms),
            grid_fallbacks: rooms
                .iter()
                .filter(|r| r.method == PlacementMethod::Grid)
                .count(),
            shared_walls,
        }
    }

    /// Total room area over bounding-box area
    pub fn coverage(&self) -> f64 {
        let footprint = self.bounds.width() * self.bounds.height();
        if footprint > 0.0 {
            self.total_area / footprint
        } else {
            0.0
        }
    }

    pub fn log_summary(&self) {
        info!("=== Layout Summary ===");
        info!("Rooms: {}", self.num_rooms);
        info!("Total area: {:.1} sqm", self.total_area);
        info!(
            "Bounds: ({:.2}, {:.2}) - ({:.2}, {:.2}), {:.1} x {:.1} m",
            self.bounds.min_x,
            self.bounds.min_y,
            self.bounds.max_x,
            self.bounds.max_y,
            self.bounds.width(),
            self.bounds.height()
        );
        info!("Coverage: {:.0}%", self.coverage() * 100.0);
        info!("Overlaps: {}", self.overlaps);
        info!("Grid fallbacks: {}", self.grid_fallbacks);
        for contact in &self.shared_walls {
            info!(
                "  {} | {} ({}, {:.2} m)",
                contact.first,
                contact.second,
                contact.wall.side,
                contact.wall.length()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::WallSide,
        rooms::{RoomRequest, RoomType},
    };

    fn room(name: &str, x: f64, y: f64, w: f64, h: f64, method: PlacementMethod) -> PlacedRoom {
        let req = RoomRequest::new(RoomType::Storage)
            .with_name(name)
            .with_size(w, h);
        PlacedRoom::from_request(&req, x, y, method)
    }

    #[test]
    fn test_empty_layout() {
        let summary = LayoutSummary::from_rooms(&[], 0.1);
        assert_eq!(summary.num_rooms, 0);
        assert_eq!(summary.bounds, Bounds::default());
        assert_eq!(summary.coverage(), 0.0);
    }

    #[test]
    fn test_bounds_and_area() {
        let rooms = vec![
            room("a", 0.0, 0.0, 4.0, 3.0, PlacementMethod::Seed),
            room("b", -2.5, 3.5, 2.0, 2.0, PlacementMethod::Scored),
        ];
        let summary = LayoutSummary::from_rooms(&rooms, 0.1);
        assert_eq!(summary.total_area, 16.0);
        assert_eq!(
            summary.bounds,
            Bounds {
                min_x: -2.5,
                min_y: 0.0,
                max_x: 4.0,
                max_y: 5.5
            }
        );
        assert_eq!(summary.overlaps, 0);
        assert!(summary.shared_walls.is_empty());
    }

    #[test]
    fn test_overlap_count() {
        let rooms = vec![
            room("a", 0.0, 0.0, 4.0, 4.0, PlacementMethod::Seed),
            room("b", 3.0, 3.0, 2.0, 2.0, PlacementMethod::Scored),
            room("c", 1.0, 1.0, 1.0, 1.0, PlacementMethod::Scored),
            room("d", 4.0, 0.0, 1.0, 1.0, PlacementMethod::Grid),
        ];
        assert_eq!(count_overlaps(&rooms), 2);

        let summary = LayoutSummary::from_rooms(&rooms, 0.1);
        assert_eq!(summary.overlaps, 2);
        assert_eq!(summary.grid_fallbacks, 1);
    }

    #[test]
    fn test_shared_walls_across_margin() {
        let rooms = vec![
            room("living", 0.0, 0.0, 5.0, 4.5, PlacementMethod::Seed),
            room("kitchen", -3.2, 0.0, 3.0, 4.0, PlacementMethod::Scored),
            room("bedroom", 0.0, 4.7, 3.5, 3.0, PlacementMethod::Scored),
        ];

        let summary = LayoutSummary::from_rooms(&rooms, 0.3);
        assert_eq!(summary.shared_walls.len(), 2);
        let west = &summary.shared_walls[0];
        assert_eq!((west.first.as_str(), west.second.as_str()), ("living", "kitchen"));
        assert_eq!(west.wall.side, WallSide::West);
        assert_eq!((west.wall.start, west.wall.end), (0.0, 4.0));
        assert_eq!(summary.shared_walls[1].wall.side, WallSide::North);

        // tighter tolerance than the gap
        let summary = LayoutSummary::from_rooms(&rooms, 0.1);
        assert!(summary.shared_walls.is_empty());
    }
}
