/// Layout settings (meters)
pub const DEFAULT_SPACING_MARGIN: f64 = 0.2;
pub const DEFAULT_GRID_COLUMNS: usize = 3;

/// Score weights
pub const ADJACENCY_WEIGHT: f64 = 100.0;
pub const COMPACTNESS_WEIGHT: f64 = 50.0;
pub const ALIGNMENT_WEIGHT: f64 = 10.0;

/// Tolerances
pub const ALIGNMENT_EPSILON: f64 = 1e-6; // coincident edges
pub const GEOMETRY_EPSILON: f64 = 1e-9; // positive-area intersection
pub const SCORE_EPSILON: f64 = 1e-9; // a later candidate must beat the best by more than this
pub const WALL_TOLERANCE: f64 = 0.1; // added to the margin when reporting shared walls

/// Expected headers in room CSV files
pub const EXPECTED_ROOM_HEADER: &str = "Room";
pub const EXPECTED_WIDTH_HEADER: &str = "Width";
pub const EXPECTED_HEIGHT_HEADER: &str = "Height";
pub const OPTIONAL_NAME_HEADER: &str = "Name";

/// Rendering (pixels)
pub const M2PX: f64 = 60.0; // meter -> px
pub const MARGIN: f64 = 40.0;
pub const FONT_SIZE: f64 = 14.0;
