//! Topic catalog types and schema filtering

use serde::{Deserialize, Serialize};

/// Schemas known to carry an extractable orientation.
///
/// Extensible allow-list; catalog entries with any other schema are ignored.
pub const SUPPORTED_SCHEMAS: &[&str] = &["sensor_msgs/Imu", "nav_msgs/Odometry"];

/// One entry of the host environment's topic catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub schema_name: String,
}

impl Topic {
    pub fn new(name: impl Into<String>, schema_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema_name: schema_name.into(),
        }
    }
}

/// Filter a catalog down to orientation-capable topics, preserving order.
pub fn supported_topics(catalog: &[Topic]) -> Vec<Topic> {
    catalog
        .iter()
        .filter(|topic| SUPPORTED_SCHEMAS.contains(&topic.schema_name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_topics_filters_schemas() {
        let catalog = vec![
            Topic::new("/imu", "sensor_msgs/Imu"),
            Topic::new("/camera", "sensor_msgs/Image"),
            Topic::new("/odom", "nav_msgs/Odometry"),
            Topic::new("/scan", "sensor_msgs/LaserScan"),
        ];
        let supported = supported_topics(&catalog);
        let names: Vec<&str> = supported.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["/imu", "/odom"]);
    }

    #[test]
    fn test_supported_topics_empty_catalog() {
        assert!(supported_topics(&[]).is_empty());
    }
}
