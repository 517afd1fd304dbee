pub mod adjacency;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod geometry;
pub mod placement;
pub mod report;
pub mod rooms;
pub mod spec_reader;
pub mod visualization;

pub use adjacency::AdjacencyTable;
pub use config::Config;
pub use constants::{ALIGNMENT_EPSILON, DEFAULT_GRID_COLUMNS, DEFAULT_SPACING_MARGIN};
pub use error::{FloorplanError, Result};
pub use geometry::{Rect, SharedWall, WallSide};
pub use placement::{
    CandidateScope, PlacedRoom, PlacementMethod, PlacementOptions, ScoreWeights, place_rooms,
    place_rooms_with,
};
pub use report::{Bounds, LayoutSummary};
pub use rooms::{BuildingSpec, RoomDefaults, RoomRequest, RoomSpec, RoomType, Zone};
pub use spec_reader::{RoomSource, read_room_file};
