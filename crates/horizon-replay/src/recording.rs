//! JSONL recording reader
//!
//! A recording is one JSON object per line: `{"topic": "/imu", "schema":
//! "sensor_msgs/Imu", "message": {...}}`. Blank lines are skipped; a
//! malformed line fails with its line number.

use horizon_core::Topic;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Frame {
        line: usize,
        source: serde_json::Error,
    },
}

/// One captured frame of a recording.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedFrame {
    pub topic: String,
    pub schema: String,
    pub message: Value,
}

/// Read a full recording into memory.
pub fn read_recording(path: &Path) -> Result<Vec<RecordedFrame>, RecordingError> {
    let content = std::fs::read_to_string(path)?;
    let mut frames = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let frame = serde_json::from_str(line).map_err(|source| RecordingError::Frame {
            line: idx + 1,
            source,
        })?;
        frames.push(frame);
    }
    Ok(frames)
}

/// Derive the topic catalog from a recording's distinct topic/schema pairs,
/// in first-appearance order.
pub fn catalog_of(frames: &[RecordedFrame]) -> Vec<Topic> {
    let mut catalog: Vec<Topic> = Vec::new();
    for frame in frames {
        if !catalog.iter().any(|topic| topic.name == frame.topic) {
            catalog.push(Topic::new(frame.topic.clone(), frame.schema.clone()));
        }
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_recording(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("recording.jsonl");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_read_recording_skips_blank_lines() {
        let (_dir, path) = write_recording(
            "{\"topic\": \"/imu\", \"schema\": \"sensor_msgs/Imu\", \"message\": {}}\n\
             \n\
             {\"topic\": \"/odom\", \"schema\": \"nav_msgs/Odometry\", \"message\": {}}\n",
        );
        let frames = read_recording(&path).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].topic, "/odom");
    }

    #[test]
    fn test_read_recording_reports_line_number() {
        let (_dir, path) = write_recording(
            "{\"topic\": \"/imu\", \"schema\": \"sensor_msgs/Imu\", \"message\": {}}\n\
             not json\n",
        );
        let err = read_recording(&path).unwrap_err();
        match err {
            RecordingError::Frame { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_catalog_of_distinct_topics_in_order() {
        let (_dir, path) = write_recording(
            "{\"topic\": \"/b\", \"schema\": \"sensor_msgs/Imu\", \"message\": {}}\n\
             {\"topic\": \"/a\", \"schema\": \"nav_msgs/Odometry\", \"message\": {}}\n\
             {\"topic\": \"/b\", \"schema\": \"sensor_msgs/Imu\", \"message\": {}}\n",
        );
        let frames = read_recording(&path).unwrap();
        let catalog = catalog_of(&frames);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "/b");
        assert_eq!(catalog[1].name, "/a");
    }
}
