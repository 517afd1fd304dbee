use crate::{
    adjacency::AdjacencyTable,
    constants::{ADJACENCY_WEIGHT, ALIGNMENT_WEIGHT, COMPACTNESS_WEIGHT},
    geometry::Rect,
    rooms::RoomType,
};

use super::PlacedRoom;
use serde::{Deserialize, Serialize};

/// Weights of the three score terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub adjacency: f64,
    pub compactness: f64,
    pub alignment: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            adjacency: ADJACENCY_WEIGHT,
            compactness: COMPACTNESS_WEIGHT,
            alignment: ALIGNMENT_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub adjacency: f64,
    pub compactness: f64,
    pub alignment: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.adjacency + self.compactness + self.alignment
    }
}

/// Scores `candidate` for a room of `room_type` against the rooms placed so far.
///
/// - adjacency: `w / (1 + d)` per preferred neighbour, `d` between centers
/// - compactness: `w / (1 + |anchor|)`
/// - alignment: `w` per placed room sharing a wall with the candidate
pub fn score_candidate(
    room_type: RoomType,
    candidate: &Rect,
    placed: &[PlacedRoom],
    adjacency: &AdjacencyTable,
    weights: &ScoreWeights,
    alignment_epsilon: f64,
) -> ScoreBreakdown {
    let adjacency_score: f64 = placed
        .iter()
        .filter(|q| adjacency.prefers(room_type, q.room_type))
        .map(|q| weights.adjacency / (1.0 + candidate.center_distance(&q.rect())))
        .sum();

    let compactness = weights.compactness / (1.0 + candidate.x.hypot(candidate.y));

    let aligned = placed
        .iter()
        .filter(|q| candidate.shared_wall(&q.rect(), alignment_epsilon).is_some())
        .count();

    ScoreBreakdown {
        adjacency: adjacency_score,
        compactness,
        alignment: weights.alignment * aligned as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{placement::PlacementMethod, rooms::RoomRequest};

    fn placed(room_type: RoomType, x: f64, y: f64) -> PlacedRoom {
        PlacedRoom::from_request(&RoomRequest::new(room_type), x, y, PlacementMethod::Scored)
    }

    #[test]
    fn test_compactness_term() {
        let weights = ScoreWeights::default();
        let table = AdjacencyTable::new();
        let at_origin = Rect::new(0.0, 0.0, 2.0, 2.0);
        let far = Rect::new(3.0, 4.0, 2.0, 2.0);

        let s0 = score_candidate(RoomType::Study, &at_origin, &[], &table, &weights, 1e-6);
        let s1 = score_candidate(RoomType::Study, &far, &[], &table, &weights, 1e-6);
        assert_eq!(s0.compactness, 50.0);
        assert!((s1.compactness - 50.0 / 6.0).abs() < 1e-12);
        assert_eq!(s1.total(), s1.compactness);
    }

    #[test]
    fn test_adjacency_term_uses_centers() {
        let weights = ScoreWeights::default();
        let table = AdjacencyTable::standard();
        // kitchen 3x4 at origin, center (1.5, 2.0)
        let rooms = vec![placed(RoomType::Kitchen, 0.0, 0.0)];
        // dining 3.5x3 at (3.2, 0.0), center (4.95, 1.5)
        let candidate = Rect::new(3.2, 0.0, 3.5, 3.0);

        let s = score_candidate(RoomType::DiningRoom, &candidate, &rooms, &table, &weights, 1e-6);
        let d = (4.95f64 - 1.5).hypot(1.5 - 2.0);
        assert!((s.adjacency - 100.0 / (1.0 + d)).abs() < 1e-12);

        // no preference between bedroom and kitchen
        let s = score_candidate(RoomType::Bedroom, &candidate, &rooms, &table, &weights, 1e-6);
        assert_eq!(s.adjacency, 0.0);
    }

    #[test]
    fn test_alignment_needs_a_shared_wall() {
        let weights = ScoreWeights::default();
        let table = AdjacencyTable::new();
        let rooms = vec![placed(RoomType::Storage, 0.0, 0.0)];

        let flush = Rect::new(2.0, 0.0, 2.0, 2.0);
        let s = score_candidate(RoomType::Storage, &flush, &rooms, &table, &weights, 1e-6);
        assert_eq!(s.alignment, 10.0);

        let spaced = Rect::new(2.2, 0.0, 2.0, 2.0);
        let s = score_candidate(RoomType::Storage, &spaced, &rooms, &table, &weights, 1e-6);
        assert_eq!(s.alignment, 0.0);

        let corner = Rect::new(2.0, 2.0, 2.0, 2.0);
        let s = score_candidate(RoomType::Storage, &corner, &rooms, &table, &weights, 1e-6);
        assert_eq!(s.alignment, 0.0);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoreWeights {
            adjacency: 0.0,
            compactness: 10.0,
            alignment: 0.0,
        };
        let s = score_candidate(
            RoomType::Study,
            &Rect::new(0.0, 0.0, 1.0, 1.0),
            &[],
            &AdjacencyTable::new(),
            &weights,
            1e-6,
        );
        assert_eq!(s.total(), 10.0);
    }
}
