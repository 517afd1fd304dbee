use crate::constants::{
    EXPECTED_HEIGHT_HEADER, EXPECTED_ROOM_HEADER, EXPECTED_WIDTH_HEADER, OPTIONAL_NAME_HEADER,
};
use crate::error::{FloorplanError, Result};
use crate::rooms::{BuildingSpec, RoomDefaults, RoomRequest, RoomSpec, RoomType};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Room specification as found in an input file
#[derive(Debug, Clone, PartialEq)]
pub enum RoomSource {
    /// explicit room list
    Rooms(Vec<RoomSpec>),
    /// room counts, expanded with [`BuildingSpec::to_requests`]
    Building(BuildingSpec),
}

impl RoomSource {
    /// Resolves the specification into placement requests
    ///
    /// # Errors
    /// Returns `UnknownRoomType` for an entry whose type is not in the catalog
    pub fn into_requests(self, defaults: &RoomDefaults) -> Result<Vec<RoomRequest>> {
        match self {
            RoomSource::Rooms(specs) => specs
                .iter()
                .enumerate()
                .map(|(i, spec)| spec.resolve(i + 1, defaults))
                .collect(),
            RoomSource::Building(building) => Ok(building.to_requests(defaults)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonSpec {
    List(Vec<RoomSpec>),
    Wrapped { rooms: Vec<RoomSpec> },
    Building(BuildingSpec),
}

/// Reads a room specification file.
/// `.csv` files are read as CSV, everything else as JSON.
///
/// # Errors
/// Returns error if the file cannot be read or its content is malformed
pub fn read_room_file<P: AsRef<Path>>(path: P) -> Result<RoomSource> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    debug!("Reading room specification from {}", path.display());
    if is_csv {
        let file = std::fs::File::open(path)?;
        Ok(RoomSource::Rooms(read_rooms_csv_from_reader(file)?))
    } else {
        let content = std::fs::read_to_string(path)?;
        parse_room_json(&content)
    }
}

/// Accepts a list of rooms, `{"rooms": [...]}`, or a building object with counts
pub fn parse_room_json(content: &str) -> Result<RoomSource> {
    let source = match serde_json::from_str::<JsonSpec>(content)? {
        JsonSpec::List(rooms) | JsonSpec::Wrapped { rooms } => RoomSource::Rooms(rooms),
        JsonSpec::Building(building) => RoomSource::Building(building),
    };
    Ok(source)
}

/// Read CSV with `Room,Width,Height[,Name]` format.
/// - Width/Height may be left empty to use the catalog default
/// - Blank rows are skipped
pub fn read_rooms_csv_from_reader<R: Read>(reader: R) -> Result<Vec<RoomSpec>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let has_name = validate_csv_headers(&mut rdr)?;

    let mut specs = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2; // 1-indexed, +1 for header

        if let Some(spec) = parse_record(&rec, row, has_name)? {
            specs.push(spec);
        }
    }
    Ok(specs)
}

/// Validates headers, returns whether the optional name column is present
fn validate_csv_headers<R: Read>(csv_reader: &mut csv::Reader<R>) -> Result<bool> {
    let headers = csv_reader
        .headers()
        .map_err(|e| FloorplanError::CsvHeader(format!("Failed to read headers: {}", e)))?;

    let expected = [
        EXPECTED_ROOM_HEADER,
        EXPECTED_WIDTH_HEADER,
        EXPECTED_HEIGHT_HEADER,
    ];
    for (index, name) in expected.iter().enumerate() {
        let found = headers.get(index).ok_or_else(|| {
            FloorplanError::CsvHeader(format!("Missing '{}' column at index {}", name, index))
        })?;
        if !found.eq_ignore_ascii_case(name) {
            return Err(FloorplanError::CsvHeader(format!(
                "Expected '{}' in column {}, found '{}'",
                name, index, found
            )));
        }
    }

    Ok(headers
        .get(3)
        .is_some_and(|h| h.eq_ignore_ascii_case(OPTIONAL_NAME_HEADER)))
}

fn parse_record(rec: &StringRecord, row: usize, has_name: bool) -> Result<Option<RoomSpec>> {
    if rec.iter().all(|f| f.trim().is_empty()) {
        return Ok(None);
    }

    let room = rec
        .get(0)
        .map(str::trim)
        .ok_or(FloorplanError::CsvRow { row, got: rec.len() })?;
    if room.parse::<RoomType>().is_err() {
        return Err(FloorplanError::UnknownRoomType {
            row,
            name: room.to_string(),
        });
    }

    let name = if has_name {
        optional_field(rec, 3).map(str::to_string)
    } else {
        None
    };

    Ok(Some(RoomSpec {
        width: parse_optional_value(rec, 1, row)?,
        height: parse_optional_value(rec, 2, row)?,
        name,
        ..RoomSpec::new(room)
    }))
}

fn optional_field(rec: &StringRecord, column: usize) -> Option<&str> {
    rec.get(column).map(str::trim).filter(|v| !v.is_empty())
}

/// Parses a dimension cell, empty or missing means "use default"
fn parse_optional_value(rec: &StringRecord, column: usize, row: usize) -> Result<Option<f64>> {
    optional_field(rec, column)
        .map(|value| {
            value
                .parse::<f64>()
                .map_err(|source| FloorplanError::ValueParse {
                    row,
                    value: value.to_string(),
                    source,
                })
        })
        .transpose()
}
