//! Panel state model: per-topic configuration and global axis toggles
//!
//! All update operations are pure reducers taking the current state by
//! reference and returning a new value. The single-threaded update cycle
//! swaps whole states, never mutates shared ones in place.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the three Euler axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Roll,
    Pitch,
    Yaw,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Roll, Axis::Pitch, Axis::Yaw];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Roll => "roll",
            Axis::Pitch => "pitch",
            Axis::Yaw => "yaw",
        }
    }

    /// Parse a settings key, either the bare axis name or a show-flag key.
    pub fn from_key(key: &str) -> Option<Axis> {
        match key {
            "roll" | "showRoll" => Some(Axis::Roll),
            "pitch" | "showPitch" => Some(Axis::Pitch),
            "yaw" | "showYaw" => Some(Axis::Yaw),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-topic display configuration.
///
/// Created on the first enable of a previously unseen topic; never deleted
/// automatically, only overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopicConfig {
    pub enabled: bool,
    pub show_roll: bool,
    pub show_pitch: bool,
    pub show_yaw: bool,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            show_roll: true,
            show_pitch: true,
            show_yaw: true,
        }
    }
}

impl TopicConfig {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn shows(&self, axis: Axis) -> bool {
        match axis {
            Axis::Roll => self.show_roll,
            Axis::Pitch => self.show_pitch,
            Axis::Yaw => self.show_yaw,
        }
    }
}

/// Global per-axis display toggles, independent of any topic.
///
/// Gates whether an axis display exists at all, layered on top of the
/// per-topic show-flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisToggles {
    pub roll_enabled: bool,
    pub pitch_enabled: bool,
    pub yaw_enabled: bool,
}

impl Default for AxisToggles {
    fn default() -> Self {
        Self {
            roll_enabled: true,
            pitch_enabled: true,
            yaw_enabled: true,
        }
    }
}

impl AxisToggles {
    pub fn enabled(&self, axis: Axis) -> bool {
        match axis {
            Axis::Roll => self.roll_enabled,
            Axis::Pitch => self.pitch_enabled,
            Axis::Yaw => self.yaw_enabled,
        }
    }
}

/// Aggregate panel state: topic configurations plus global axis toggles.
///
/// `#[serde(default)]` at every level means a partial persisted value
/// restores merged over defaults; unknown fields are ignored and missing
/// nested keys never fail.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelState {
    pub topics: BTreeMap<String, TopicConfig>,
    pub axes: AxisToggles,
}

impl PanelState {
    /// Restore state from a persisted partial value.
    ///
    /// A missing or unparseable value degrades to defaults; restore never
    /// fails.
    pub fn restore(persisted: Option<&serde_json::Value>) -> PanelState {
        let Some(value) = persisted else {
            return PanelState::default();
        };
        match serde_json::from_value(value.clone()) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unparseable persisted state");
                PanelState::default()
            }
        }
    }
}

/// Enable or disable a topic, preserving existing show-flags.
///
/// A previously unseen topic gets a fresh config with all show-flags true.
/// Purging cached orientation data for a disabled topic is the caller's
/// responsibility, atomically with this call.
pub fn set_topic_enabled(state: &PanelState, topic: &str, enabled: bool) -> PanelState {
    let mut next = state.clone();
    next.topics
        .entry(topic.to_string())
        .and_modify(|config| config.enabled = enabled)
        .or_insert_with(|| TopicConfig::new(enabled));
    next
}

/// Set one of the three global axis toggles.
pub fn set_axis_enabled(state: &PanelState, axis: Axis, enabled: bool) -> PanelState {
    let mut next = state.clone();
    match axis {
        Axis::Roll => next.axes.roll_enabled = enabled,
        Axis::Pitch => next.axes.pitch_enabled = enabled,
        Axis::Yaw => next.axes.yaw_enabled = enabled,
    }
    next
}

/// Flip one per-topic show-flag, leaving everything else untouched.
///
/// A topic with no config yet is a no-op: the input state comes back
/// unchanged in value.
pub fn set_topic_axis_shown(state: &PanelState, topic: &str, axis: Axis, shown: bool) -> PanelState {
    let mut next = state.clone();
    if let Some(config) = next.topics.get_mut(topic) {
        match axis {
            Axis::Roll => config.show_roll = shown,
            Axis::Pitch => config.show_pitch = shown,
            Axis::Yaw => config.show_yaw = shown,
        }
    }
    next
}

/// Names of all enabled topics, in the mapping's iteration order.
pub fn enabled_topics(state: &PanelState) -> Vec<&str> {
    state
        .topics
        .iter()
        .filter(|(_, config)| config.enabled)
        .map(|(name, _)| name.as_str())
        .collect()
}
