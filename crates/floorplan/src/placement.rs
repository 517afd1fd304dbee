pub mod fallback;
pub mod scoring;

use crate::{
    adjacency::AdjacencyTable,
    constants::{ALIGNMENT_EPSILON, DEFAULT_GRID_COLUMNS, SCORE_EPSILON},
    error::{FloorplanError, Result},
    geometry::Rect,
    rooms::{RoomRequest, RoomType},
};

use fallback::GridFallback;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::{cmp::Reverse, collections::VecDeque};
use strum_macros::Display;

pub use scoring::{ScoreBreakdown, ScoreWeights, score_candidate};

/// How a room's position was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlacementMethod {
    /// first room, at the origin
    Seed,
    /// best collision-free candidate
    Scored,
    /// grid fallback
    Grid,
}

/// Which placed rooms spawn candidate positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateScope {
    /// every placed room
    #[default]
    AllPlaced,
    /// placed rooms related by adjacency, or every placed room if none is related
    PreferredFirst,
}

/// A room with its committed position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub name: String,
    pub room_type: RoomType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub priority: i32,
    pub method: PlacementMethod,
}

impl PlacedRoom {
    pub fn from_request(request: &RoomRequest, x: f64, y: f64, method: PlacementMethod) -> Self {
        Self {
            name: request.name.clone(),
            room_type: request.room_type,
            x,
            y,
            width: request.width,
            height: request.height,
            priority: request.priority,
            method,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementOptions {
    pub weights: ScoreWeights,
    pub alignment_epsilon: f64,
    pub grid_columns: usize,
    pub candidate_scope: CandidateScope,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            alignment_epsilon: ALIGNMENT_EPSILON,
            grid_columns: DEFAULT_GRID_COLUMNS,
            candidate_scope: CandidateScope::AllPlaced,
        }
    }
}

/// Working set of a single run
struct PlacementState<'a> {
    pending: VecDeque<&'a RoomRequest>,
    placed: Vec<PlacedRoom>,
}

impl<'a> PlacementState<'a> {
    /// Pending queue sorted by descending priority, ties keep input order
    fn new(requests: &'a [RoomRequest]) -> Self {
        let mut order: Vec<&RoomRequest> = requests.iter().collect();
        order.sort_by_key(|r| Reverse(r.priority));
        Self {
            pending: order.into(),
            placed: Vec::with_capacity(requests.len()),
        }
    }
}

/// Places every request with the default options.
///
/// # Errors
/// Fails before any placement work on an empty request list, a non-positive
/// or non-finite dimension, or a negative spacing margin. Geometric
/// infeasibility is never an error.
pub fn place_rooms(
    requests: &[RoomRequest],
    adjacency: &AdjacencyTable,
    spacing_margin: f64,
) -> Result<Vec<PlacedRoom>> {
    place_rooms_with(
        requests,
        adjacency,
        spacing_margin,
        &PlacementOptions::default(),
    )
}

/// Places every request, returning rooms in placement order.
pub fn place_rooms_with(
    requests: &[RoomRequest],
    adjacency: &AdjacencyTable,
    spacing_margin: f64,
    options: &PlacementOptions,
) -> Result<Vec<PlacedRoom>> {
    validate_inputs(requests, spacing_margin, options)?;

    let grid = GridFallback::new(requests, spacing_margin, options.grid_columns);
    let mut state = PlacementState::new(requests);

    while let Some(request) = state.pending.pop_front() {
        let room = if state.placed.is_empty() {
            PlacedRoom::from_request(request, 0.0, 0.0, PlacementMethod::Seed)
        } else {
            match best_candidate(request, &state.placed, adjacency, spacing_margin, options) {
                Some((rect, score)) => {
                    debug!(
                        "{} -> ({:.2}, {:.2}) score {:.3} [adj {:.3}, compact {:.3}, align {:.1}]",
                        request.name,
                        rect.x,
                        rect.y,
                        score.total(),
                        score.adjacency,
                        score.compactness,
                        score.alignment
                    );
                    PlacedRoom::from_request(request, rect.x, rect.y, PlacementMethod::Scored)
                }
                None => {
                    let (slot, rect) = grid.place(request.width, request.height, &state.placed);
                    warn!(
                        "No collision-free candidate for {}, using grid slot {} at ({:.2}, {:.2})",
                        request.name, slot, rect.x, rect.y
                    );
                    PlacedRoom::from_request(request, rect.x, rect.y, PlacementMethod::Grid)
                }
            }
        };
        state.placed.push(room);
    }

    let fallbacks = state
        .placed
        .iter()
        .filter(|r| r.method == PlacementMethod::Grid)
        .count();
    info!(
        "Placed {} rooms ({} by grid fallback)",
        state.placed.len(),
        fallbacks
    );

    Ok(state.placed)
}

fn validate_inputs(
    requests: &[RoomRequest],
    spacing_margin: f64,
    options: &PlacementOptions,
) -> Result<()> {
    if requests.is_empty() {
        return Err(FloorplanError::EmptyRequest);
    }
    if !spacing_margin.is_finite() || spacing_margin < 0.0 {
        return Err(FloorplanError::InvalidMargin(spacing_margin));
    }
    for request in requests {
        request.validate()?;
    }
    if options.grid_columns == 0 {
        return Err(FloorplanError::Config(
            "grid_columns must be at least 1".to_string(),
        ));
    }
    if !options.alignment_epsilon.is_finite() || options.alignment_epsilon < 0.0 {
        return Err(FloorplanError::Config(format!(
            "alignment_epsilon must be finite and >= 0, got {}",
            options.alignment_epsilon
        )));
    }
    Ok(())
}

/// Eight anchors around `anchor` for a `width` x `height` room:
/// east, north, west, south, then NE, NW, SE, SW.
fn candidate_positions(anchor: &Rect, width: f64, height: f64, margin: f64) -> [(f64, f64); 8] {
    let east = anchor.right() + margin;
    let west = anchor.x - width - margin;
    let north = anchor.top() + margin;
    let south = anchor.y - height - margin;
    [
        (east, anchor.y),
        (anchor.x, north),
        (west, anchor.y),
        (anchor.x, south),
        (east, north),
        (west, north),
        (east, south),
        (west, south),
    ]
}

/// True if `rect`, grown by `margin`, intersects any placed room
pub(crate) fn collides(rect: &Rect, placed: &[PlacedRoom], margin: f64) -> bool {
    let grown = rect.expanded(margin);
    placed.iter().any(|q| grown.intersects(&q.rect()))
}

fn best_candidate(
    request: &RoomRequest,
    placed: &[PlacedRoom],
    adjacency: &AdjacencyTable,
    margin: f64,
    options: &PlacementOptions,
) -> Option<(Rect, ScoreBreakdown)> {
    let related: Vec<&PlacedRoom> = match options.candidate_scope {
        CandidateScope::AllPlaced => Vec::new(),
        CandidateScope::PreferredFirst => placed
            .iter()
            .filter(|q| adjacency.prefers(request.room_type, q.room_type))
            .collect(),
    };
    let anchors: Vec<&PlacedRoom> = if related.is_empty() {
        placed.iter().collect()
    } else {
        related
    };

    let mut best: Option<(Rect, ScoreBreakdown)> = None;
    for anchor in anchors {
        for (x, y) in candidate_positions(&anchor.rect(), request.width, request.height, margin) {
            let rect = Rect::new(x, y, request.width, request.height);
            if collides(&rect, placed, margin) {
                continue;
            }
            let score = score_candidate(
                request.room_type,
                &rect,
                placed,
                adjacency,
                &options.weights,
                options.alignment_epsilon,
            );
            // earlier candidates win ties and float-noise near-ties
            let better = match &best {
                None => true,
                Some((_, current)) => score.total() > current.total() + SCORE_EPSILON,
            };
            if better {
                best = Some((rect, score));
            }
        }
    }
    best
}
