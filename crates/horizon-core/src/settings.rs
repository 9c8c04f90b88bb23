//! Settings tree projection and edit routing
//!
//! The host's settings editor consumes a generic tree built from the panel
//! state and reports edits back as `(path, value)` actions. Building the
//! tree is pure and total: it never fails regardless of the state's current
//! shape. Routing an action onto the state reducers recovers from unknown
//! paths as a no-op.

use crate::state::{self, Axis, PanelState};
use crate::topic::Topic;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A boolean field in the settings tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsField {
    /// Path segment addressing this field in actions.
    pub key: String,
    pub label: String,
    pub value: bool,
}

impl SettingsField {
    fn new(key: &str, label: &str, value: bool) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value,
        }
    }
}

/// A labeled, collapsible node in the settings tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettingsNode {
    /// Path segment addressing this node in actions.
    pub key: String,
    pub label: String,
    /// For topic nodes, mirrors the topic's enabled flag.
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<SettingsField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SettingsNode>,
}

/// Build the settings tree for the current state and candidate topics.
///
/// One child node per candidate topic (visibility mirrors `enabled`; the
/// show-flag fields appear only while enabled, seeded from the topic's
/// config or defaulting to true), plus one global section for the axis
/// toggles.
pub fn build_settings(state: &PanelState, candidates: &[Topic]) -> SettingsNode {
    let topics = candidates
        .iter()
        .map(|topic| {
            let config = state.topics.get(&topic.name).copied().unwrap_or_default();
            let fields = if config.enabled {
                vec![
                    SettingsField::new("showRoll", "Show roll", config.show_roll),
                    SettingsField::new("showPitch", "Show pitch", config.show_pitch),
                    SettingsField::new("showYaw", "Show yaw", config.show_yaw),
                ]
            } else {
                Vec::new()
            };
            SettingsNode {
                key: topic.name.clone(),
                label: topic.name.clone(),
                visible: config.enabled,
                fields,
                children: Vec::new(),
            }
        })
        .collect();

    let axes = SettingsNode {
        key: "axes".to_string(),
        label: "Axes".to_string(),
        visible: true,
        fields: vec![
            SettingsField::new("roll", "Roll", state.axes.roll_enabled),
            SettingsField::new("pitch", "Pitch", state.axes.pitch_enabled),
            SettingsField::new("yaw", "Yaw", state.axes.yaw_enabled),
        ],
        children: Vec::new(),
    };

    SettingsNode {
        key: String::new(),
        label: "Attitude".to_string(),
        visible: true,
        fields: Vec::new(),
        children: vec![
            SettingsNode {
                key: "topics".to_string(),
                label: "Topics".to_string(),
                visible: true,
                fields: Vec::new(),
                children: topics,
            },
            axes,
        ],
    }
}

/// A settings edit reported by the host editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsAction {
    pub path: Vec<String>,
    pub value: bool,
}

impl SettingsAction {
    pub fn new(path: &[&str], value: bool) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
            value,
        }
    }
}

/// Route an editor action onto the state reducers.
///
/// Returns `None` when the path addresses nothing, leaving the caller's
/// state untouched. An action on a topic with no config yet routes through
/// the reducer's own no-op handling.
pub fn apply_settings_action(state: &PanelState, action: &SettingsAction) -> Option<PanelState> {
    let segments: Vec<&str> = action.path.iter().map(String::as_str).collect();
    match segments.as_slice() {
        ["topics", topic, "enabled"] => Some(state::set_topic_enabled(state, topic, action.value)),
        ["topics", topic, key] => match Axis::from_key(key) {
            Some(axis) => Some(state::set_topic_axis_shown(state, topic, axis, action.value)),
            None => {
                debug!(topic = %topic, key = %key, "unknown topic settings key");
                None
            }
        },
        ["axes", key] => match Axis::from_key(key) {
            Some(axis) => Some(state::set_axis_enabled(state, axis, action.value)),
            None => {
                debug!(key = %key, "unknown axis settings key");
                None
            }
        },
        _ => {
            debug!(path = ?action.path, "unroutable settings path");
            None
        }
    }
}
