use crate::error::{FloorplanError, Result};
use crate::placement::PlacedRoom;
use crate::report::LayoutSummary;

use chrono::Local;
use csv::WriterBuilder;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Timestamped file name, shared by every export of one run
pub fn layout_file_stem() -> String {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("layout_{timestamp}")
}

fn create_output_file(output_dir: Option<&Path>, filename: &str) -> Result<(PathBuf, File)> {
    let file_path = if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir).map_err(|e| FloorplanError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        dir.join(filename)
    } else {
        filename.into()
    };

    let file = File::create(&file_path).map_err(|e| FloorplanError::CreateFile {
        path: file_path.clone(),
        source: e,
    })?;
    Ok((file_path, file))
}

/// Writes one row per room: `Name,Type,X,Y,Width,Height,Method`
pub fn export_to_csv(rooms: &[PlacedRoom], output_dir: Option<&Path>, stem: &str) -> Result<PathBuf> {
    let (file_path, file) = create_output_file(output_dir, &format!("{stem}.csv"))?;

    let writer = BufWriter::new(file);
    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder = builder.terminator(Terminator::CRLF);
    }

    let mut wtr = builder.from_writer(writer);

    wtr.write_record(["Name", "Type", "X", "Y", "Width", "Height", "Method"])?;
    for room in rooms {
        wtr.write_record([
            room.name.clone(),
            room.room_type.to_string(),
            format!("{:.3}", room.x),
            format!("{:.3}", room.y),
            format!("{:.3}", room.width),
            format!("{:.3}", room.height),
            room.method.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(file_path)
}

#[derive(Serialize)]
struct LayoutDocument<'a> {
    summary: &'a LayoutSummary,
    rooms: &'a [PlacedRoom],
}

/// Writes `{"summary": ..., "rooms": [...]}` as pretty JSON
pub fn export_to_json(
    rooms: &[PlacedRoom],
    summary: &LayoutSummary,
    output_dir: Option<&Path>,
    stem: &str,
) -> Result<PathBuf> {
    let (file_path, file) = create_output_file(output_dir, &format!("{stem}.json"))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &LayoutDocument { summary, rooms })?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::PlacementMethod;
    use crate::rooms::{RoomRequest, RoomType};
    use tempfile::TempDir;

    fn sample_rooms() -> Vec<PlacedRoom> {
        vec![
            PlacedRoom::from_request(
                &RoomRequest::new(RoomType::LivingRoom),
                0.0,
                0.0,
                PlacementMethod::Seed,
            ),
            PlacedRoom::from_request(
                &RoomRequest::new(RoomType::Kitchen),
                -3.2,
                0.0,
                PlacementMethod::Scored,
            ),
        ]
    }

    #[test]
    fn test_file_stem_format() {
        let stem = layout_file_stem();
        assert!(stem.starts_with("layout_"));
        assert_eq!(stem.len(), "layout_2024-01-01_00-00-00".len());
    }

    #[test]
    fn test_export_to_csv_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = export_to_csv(&sample_rooms(), Some(temp_dir.path()), "layout_test").unwrap();
        assert!(path.ends_with("layout_test.csv"));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Name,Type,X,Y,Width,Height,Method");
        assert_eq!(lines[1], "living_room,living_room,0.000,0.000,5.000,4.500,seed");
        assert_eq!(lines[2], "kitchen,kitchen,-3.200,0.000,3.000,4.000,scored");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_empty_layout() {
        let temp_dir = TempDir::new().unwrap();
        let path = export_to_csv(&[], Some(temp_dir.path()), "empty").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_export_to_json() {
        let temp_dir = TempDir::new().unwrap();
        let rooms = sample_rooms();
        let summary = LayoutSummary::from_rooms(&rooms, 0.3);

        let path = export_to_json(&rooms, &summary, Some(temp_dir.path()), "layout_test").unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(value["summary"]["num_rooms"], 2);
        assert_eq!(value["rooms"][1]["room_type"], "kitchen");
        assert_eq!(value["rooms"][1]["method"], "scored");
        assert_eq!(value["summary"]["shared_walls"][0]["wall"]["side"], "west");
    }

    #[test]
    fn test_export_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let path = export_to_csv(&sample_rooms(), Some(&nested), "nested").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        // a regular file where a directory is expected
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let result = export_to_csv(&sample_rooms(), Some(&blocker.join("sub")), "x");
        assert!(matches!(result, Err(FloorplanError::CreateDir { .. })));
    }
}
