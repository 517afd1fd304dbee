use crate::{
    adjacency::AdjacencyTable,
    constants::{ALIGNMENT_EPSILON, DEFAULT_GRID_COLUMNS, DEFAULT_SPACING_MARGIN, M2PX},
    error::{FloorplanError, Result},
    placement::{CandidateScope, PlacementOptions, ScoreWeights},
    rooms::{RoomDefaults, RoomType},
};

use log::info;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

/// Top-level configuration (TOML)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub weights: ScoreWeights,
    pub output: OutputConfig,
    /// 空でなければ標準の隣接テーブルを置き換える
    pub adjacency: Vec<AdjacencyEntry>,
    pub dimensions: BTreeMap<String, DimensionOverride>,
    pub priorities: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub spacing_margin: f64,
    pub grid_columns: usize,
    pub alignment_epsilon: f64,
    pub candidate_scope: CandidateScope,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing_margin: DEFAULT_SPACING_MARGIN,
            grid_columns: DEFAULT_GRID_COLUMNS,
            alignment_epsilon: ALIGNMENT_EPSILON,
            candidate_scope: CandidateScope::AllPlaced,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub format: String, // "csv" | "json" | "both"
    pub render: bool,
    pub pixels_per_meter: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
            format: "csv".to_string(),
            render: false,
            pixels_per_meter: M2PX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AdjacencyEntry {
    pub room: String,
    pub neighbors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct DimensionOverride {
    pub width: f64,
    pub height: f64,
}

fn parse_room_type(name: &str, context: &str) -> Result<RoomType> {
    name.trim().parse().map_err(|_| {
        FloorplanError::Config(format!("Unknown room type '{}' in {}", name, context))
    })
}

impl Config {
    /// 設定ファイルから読み込み
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FloorplanError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            FloorplanError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Falls back to the defaults when `path` does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!(
                "Config file {} not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// 設定の検証
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if !layout.spacing_margin.is_finite() || layout.spacing_margin < 0.0 {
            return Err(FloorplanError::Config(format!(
                "spacing_margin must be finite and >= 0, got {}",
                layout.spacing_margin
            )));
        }
        if layout.grid_columns == 0 {
            return Err(FloorplanError::Config(
                "grid_columns must be at least 1".to_string(),
            ));
        }
        if !layout.alignment_epsilon.is_finite() || layout.alignment_epsilon < 0.0 {
            return Err(FloorplanError::Config(format!(
                "alignment_epsilon must be finite and >= 0, got {}",
                layout.alignment_epsilon
            )));
        }

        let w = &self.weights;
        if [w.adjacency, w.compactness, w.alignment]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err(FloorplanError::Config(
                "score weights must be finite".to_string(),
            ));
        }

        match self.output.format.as_str() {
            "csv" | "json" | "both" => {}
            other => {
                return Err(FloorplanError::Config(format!(
                    "Invalid output format: {}. Must be 'csv', 'json', or 'both'",
                    other
                )));
            }
        }
        let ppm = self.output.pixels_per_meter;
        if !ppm.is_finite() || ppm <= 0.0 {
            return Err(FloorplanError::Config(format!(
                "pixels_per_meter must be > 0, got {}",
                ppm
            )));
        }

        // 型名の検証は変換処理と共通
        self.adjacency_table()?;
        self.room_defaults()?;
        Ok(())
    }

    pub fn placement_options(&self) -> PlacementOptions {
        PlacementOptions {
            weights: self.weights,
            alignment_epsilon: self.layout.alignment_epsilon,
            grid_columns: self.layout.grid_columns,
            candidate_scope: self.layout.candidate_scope,
        }
    }

    /// Configured table, or the standard one when no `[[adjacency]]` is given
    pub fn adjacency_table(&self) -> Result<AdjacencyTable> {
        if self.adjacency.is_empty() {
            return Ok(AdjacencyTable::standard());
        }

        let mut entries = Vec::with_capacity(self.adjacency.len());
        for entry in &self.adjacency {
            let room = parse_room_type(&entry.room, "[[adjacency]] room")?;
            let neighbors = entry
                .neighbors
                .iter()
                .map(|n| parse_room_type(n, "[[adjacency]] neighbors"))
                .collect::<Result<Vec<_>>>()?;
            entries.push((room, neighbors));
        }
        Ok(AdjacencyTable::from_entries(entries))
    }

    pub fn room_defaults(&self) -> Result<RoomDefaults> {
        let mut defaults = RoomDefaults::new();
        for (name, dim) in &self.dimensions {
            let room_type = parse_room_type(name, "[dimensions]")?;
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !valid(dim.width) || !valid(dim.height) {
                return Err(FloorplanError::Config(format!(
                    "dimensions.{} must be positive, got {} x {}",
                    name, dim.width, dim.height
                )));
            }
            defaults = defaults.with_dimensions(room_type, dim.width, dim.height);
        }
        for (name, &priority) in &self.priorities {
            let room_type = parse_room_type(name, "[priorities]")?;
            defaults = defaults.with_priority(room_type, priority);
        }
        Ok(defaults)
    }
}
