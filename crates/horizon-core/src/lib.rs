//! Horizon Core - pure attitude pipeline
//!
//! This crate provides the foundational logic for the Horizon panel:
//! - Quaternion extraction from loosely structured messages
//! - Quaternion to roll/pitch/yaw conversion in degrees
//! - Panel state model with pure reducer-style update operations
//! - Settings tree projection for an external settings editor
//!
//! Everything here is synchronous and free of I/O; the panel runtime in
//! `horizon-panel` owns the update/render cycle built on top.

pub mod euler;
pub mod quaternion;
pub mod settings;
pub mod state;
pub mod topic;

pub use euler::{to_euler, EulerDegrees};
pub use quaternion::{extract, Quaternion};
pub use settings::{
    apply_settings_action, build_settings, SettingsAction, SettingsField, SettingsNode,
};
pub use state::{
    enabled_topics, set_axis_enabled, set_topic_axis_shown, set_topic_enabled, Axis, AxisToggles,
    PanelState, TopicConfig,
};
pub use topic::{supported_topics, Topic, SUPPORTED_SCHEMAS};
