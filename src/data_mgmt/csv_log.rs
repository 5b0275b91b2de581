//! Per-device, per-day CSV log of readings
//!
//! The first reading written to a file fixes its header, made of the fields
//! that reading carries. Later rows are laid out by that header, so a file
//! stays aligned even if a device starts reporting its fields in another
//! order.
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use super::models::Reading;

const FILE_PREFIX: &str = "hw";
const FILE_DATE_FORMAT: &str = "%Y-%m-%d";
const SEPARATOR: &str = ",";

/// Nested data with no sensible flat representation
const STRIPPED_FIELDS: &[&str] = &["external"];

#[derive(Error, Debug)]
pub enum CsvLogError {
    #[error("could not write {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("could not serialize reading: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn file_path(output_folder: &Path, device_id: &str, timestamp: DateTime<Utc>) -> PathBuf {
    output_folder.join(format!(
        "{FILE_PREFIX}-{device_id}-{}.csv",
        timestamp.format(FILE_DATE_FORMAT)
    ))
}

pub fn append_reading(reading: &Reading, path: &Path) -> Result<(), CsvLogError> {
    let io_err = |source: io::Error| CsvLogError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut fields = reading.fields()?;
    fields.retain(|(name, _)| !STRIPPED_FIELDS.contains(&name.as_str()));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;

    let header = read_header(path).map_err(io_err)?;
    let line = match header {
        Some(header) => row_for_header(&header, &fields, path),
        None => {
            // A new file only gets columns for fields the device reported
            fields.retain(|(_, value)| !value.is_null());
            let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
            writeln!(file, "{}", header_line(&names)).map_err(io_err)?;
            fields.iter().map(|(_, value)| format_value(value)).collect()
        }
    };

    writeln!(file, "{}{SEPARATOR}", line.join(SEPARATOR)).map_err(io_err)
}

/// Column names of an existing file, or `None` if nothing was written yet
fn read_header(path: &Path) -> io::Result<Option<Vec<String>>> {
    let mut first_line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut first_line)?;

    let first_line = first_line.trim_end();
    if first_line.is_empty() {
        return Ok(None);
    }
    Ok(Some(
        first_line
            .split(SEPARATOR)
            .map(|name| name.trim_matches('"').to_string())
            .collect(),
    ))
}

fn header_line(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn row_for_header(header: &[String], fields: &[(String, Value)], path: &Path) -> Vec<String> {
    for (name, value) in fields {
        if !value.is_null() && !header.contains(name) {
            log::warn!("Field '{}' is not in the header of {:?}; dropped", name, path);
        }
    }
    header
        .iter()
        .map(|column| {
            fields
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| format_value(value))
                .unwrap_or_default()
        })
        .collect()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            // f64's Display drops a zero fraction: 500.0 -> "500"
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => format!("\"{s}\""),
        Value::Array(_) | Value::Object(_) => format!("'{value}'"),
    }
}

/// Create the output folder if it does not exist yet
pub fn ensure_output_folder(output_folder: &Path) -> io::Result<()> {
    if !output_folder.is_dir() {
        log::debug!("Creating output folder: {:?}", output_folder);
        fs::create_dir_all(output_folder)?;
    }
    Ok(())
}
