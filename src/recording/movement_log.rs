//! CSV movement log exchanged between the recorder and the trainer
//!
//! # Format
//!
//! ```text
//! timestamp,x_position,y_position,action
//! 0.02,168,536,idle
//! 0.03,173,536,right
//! ```

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write as IoWrite};
use std::path::Path;

use crate::game::MoveAction;

const HEADER: &str = "timestamp,x_position,y_position,action";

/// One recorded frame
#[derive(Debug, Clone, PartialEq)]
pub struct MovementRecord {
    /// Seconds since recording started
    pub timestamp: f64,
    pub x_position: f32,
    pub y_position: f32,
    pub action: MoveAction,
}

/// In-memory movement log, written once when recording ends
#[derive(Debug, Clone, Default)]
pub struct MovementLog {
    records: Vec<MovementRecord>,
}

impl MovementLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MovementRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MovementRecord] {
        &self.records
    }

    /// Write the log as CSV, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file at {:?}", path))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", HEADER)?;
        for record in &self.records {
            writeln!(
                writer,
                "{:.2},{},{},{}",
                record.timestamp, record.x_position, record.y_position, record.action
            )?;
        }
        writer.flush().context("Failed to flush movement log")?;

        Ok(())
    }
}

/// Read only the `x_position` column, which is all the trainer needs
pub fn read_x_positions(path: &Path) -> Result<Vec<f32>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read movement log {:?}", path))?;
    let mut lines = contents.lines();

    let header = lines.next().unwrap_or_default();
    let x_column = header
        .split(',')
        .position(|name| name.trim() == "x_position")
        .with_context(|| format!("{:?} has no x_position column", path))?;

    lines
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_no, line)| {
            let fields: Vec<&str> = line.split(',').collect();
            parse_field::<f32>(&fields, x_column, "x_position", line_no + 2)
        })
        .collect()
}

fn parse_field<T: std::str::FromStr>(
    fields: &[&str],
    index: usize,
    name: &str,
    row: usize,
) -> Result<T> {
    let raw = fields
        .get(index)
        .with_context(|| format!("row {}: missing {}", row, name))?;
    raw.trim()
        .parse::<T>()
        .map_err(|_| anyhow::anyhow!("row {}: invalid {} '{}'", row, name, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(timestamp: f64, x: f32, action: MoveAction) -> MovementRecord {
        MovementRecord {
            timestamp,
            x_position: x,
            y_position: 536.0,
            action,
        }
    }

    #[test]
    fn test_save_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movement_data.csv");

        let mut log = MovementLog::new();
        log.push(record(0.016, 168.0, MoveAction::Idle));
        log.push(record(0.033, 173.0, MoveAction::Right));
        log.save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "timestamp,x_position,y_position,action");
        assert_eq!(lines[1], "0.02,168,536,idle");
        assert_eq!(lines[2], "0.03,173,536,right");
    }

    #[test]
    fn test_saved_log_feeds_trainer_reader() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");

        let mut log = MovementLog::new();
        log.push(record(0.5, 100.0, MoveAction::Left));
        log.push(record(1.25, 95.0, MoveAction::Jump));
        log.save(&path).unwrap();

        assert_eq!(read_x_positions(&path).unwrap(), vec![100.0, 95.0]);
    }

    #[test]
    fn test_read_x_positions_any_column_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        std::fs::write(
            &path,
            "action,x_position,timestamp\nidle,10,0.0\nright,15,0.03\n\nleft,12.5,0.07\n",
        )
        .unwrap();

        let xs = read_x_positions(&path).unwrap();
        assert_eq!(xs, vec![10.0, 15.0, 12.5]);
    }

    #[test]
    fn test_read_x_positions_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        std::fs::write(&path, "timestamp,y_position\n0.0,3\n").unwrap();

        assert!(read_x_positions(&path).is_err());
    }

    #[test]
    fn test_read_x_positions_reports_bad_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        std::fs::write(&path, "x_position\n1\nabc\n").unwrap();

        let err = read_x_positions(&path).unwrap_err();
        assert!(err.to_string().contains("row 3"));
    }
}
