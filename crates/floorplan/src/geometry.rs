use crate::constants::GEOMETRY_EPSILON;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Axis-aligned rectangle, (x, y) is the lower-left corner (meters, y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Side of the first room on which a shared wall lies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WallSide {
    East,
    West,
    North,
    South,
}

/// Wall segment shared by two rooms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharedWall {
    pub side: WallSide,
    pub start: f64,
    pub end: f64,
}

impl SharedWall {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Grows the rectangle by `margin` on every side
    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    fn overlap_extents(&self, other: &Rect) -> (f64, f64) {
        let ox = self.right().min(other.right()) - self.x.max(other.x);
        let oy = self.top().min(other.top()) - self.y.max(other.y);
        (ox, oy)
    }

    /// True if the two rectangles intersect with positive area.
    /// Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (ox, oy) = self.overlap_extents(other);
        ox > GEOMETRY_EPSILON && oy > GEOMETRY_EPSILON
    }

    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let (ox, oy) = self.overlap_extents(other);
        ox.max(0.0) * oy.max(0.0)
    }

    pub fn center_distance(&self, other: &Rect) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (ax - bx).hypot(ay - by)
    }

    /// Wall segment where `other` faces this rectangle.
    ///
    /// Facing edges must be within `tolerance` of each other and overlap over
    /// a positive length. The side is reported relative to `self`.
    pub fn shared_wall(&self, other: &Rect, tolerance: f64) -> Option<SharedWall> {
        let y_start = self.y.max(other.y);
        let y_end = self.top().min(other.top());
        let x_start = self.x.max(other.x);
        let x_end = self.right().min(other.right());

        let vertical = y_end - y_start > GEOMETRY_EPSILON;
        let horizontal = x_end - x_start > GEOMETRY_EPSILON;

        let wall = |side, start, end| Some(SharedWall { side, start, end });

        if vertical && (self.right() - other.x).abs() < tolerance {
            return wall(WallSide::East, y_start, y_end);
        }
        if vertical && (self.x - other.right()).abs() < tolerance {
            return wall(WallSide::West, y_start, y_end);
        }
        if horizontal && (self.top() - other.y).abs() < tolerance {
            return wall(WallSide::North, x_start, x_end);
        }
        if horizontal && (self.y - other.top()).abs() < tolerance {
            return wall(WallSide::South, x_start, x_end);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_measures() {
        let r = Rect::new(1.0, 2.0, 4.0, 3.0);
        assert_eq!(r.right(), 5.0);
        assert_eq!(r.top(), 5.0);
        assert_eq!(r.center(), (3.0, 3.5));
        assert_eq!(r.area(), 12.0);
        assert_eq!(r.expanded(0.5), Rect::new(0.5, 1.5, 5.0, 4.0));
    }

    #[test]
    fn test_touching_is_not_intersecting() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(2.0, 0.0, 2.0, 2.0);
        assert!(!a.intersects(&b));
        assert_eq!(a.intersection_area(&b), 0.0);

        let c = Rect::new(1.0, 1.0, 2.0, 2.0);
        assert!(a.intersects(&c));
        assert_eq!(a.intersection_area(&c), 1.0);
    }

    #[test]
    fn test_margin_gap() {
        let a = Rect::new(0.0, 0.0, 3.0, 3.0);
        let b = Rect::new(3.2, 0.0, 2.0, 2.0);
        // exactly one margin apart
        assert!(!b.expanded(0.2).intersects(&a));
        assert!(b.expanded(0.3).intersects(&a));
    }

    #[test]
    fn test_center_distance() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(3.0, 4.0, 2.0, 2.0);
        assert!((a.center_distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_shared_wall_sides() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);

        let east = a.shared_wall(&Rect::new(4.0, 1.0, 2.0, 5.0), 1e-6).unwrap();
        assert_eq!(east.side, WallSide::East);
        assert_eq!((east.start, east.end), (1.0, 4.0));
        assert_eq!(east.length(), 3.0);

        let south = a.shared_wall(&Rect::new(-1.0, -2.0, 2.0, 2.0), 1e-6).unwrap();
        assert_eq!(south.side, WallSide::South);
        assert_eq!((south.start, south.end), (0.0, 1.0));

        // corner contact only
        assert!(a.shared_wall(&Rect::new(4.0, 4.0, 1.0, 1.0), 1e-6).is_none());
        // gap larger than tolerance
        assert!(a.shared_wall(&Rect::new(4.2, 0.0, 1.0, 1.0), 1e-6).is_none());
        assert_eq!(
            a.shared_wall(&Rect::new(4.2, 0.0, 1.0, 1.0), 0.3).map(|w| w.side),
            Some(WallSide::East)
        );
    }
}
