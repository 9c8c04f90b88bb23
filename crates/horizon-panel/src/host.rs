//! Host-environment boundary
//!
//! The hosting environment delivers message batches, persists panel state,
//! and owns the actual presentation surface. These traits are the whole
//! contract: the pipeline's correctness is testable without any real UI.

use crate::colors::Rgb;
use horizon_core::{Axis, PanelState};
use serde_json::Value;

/// One message delivered by the host: the payload plus its topic of origin.
#[derive(Debug, Clone)]
pub struct MessageFrame {
    pub topic: String,
    pub message: Value,
}

impl MessageFrame {
    pub fn new(topic: impl Into<String>, message: Value) -> Self {
        Self {
            topic: topic.into(),
            message,
        }
    }
}

/// Host-side services: subscription control and state persistence.
pub trait PanelHost {
    /// Replace the active subscription set. An empty list unsubscribes all.
    fn set_subscriptions(&mut self, topics: Vec<String>);

    /// Persist the full panel state; called after every state change.
    fn save_state(&mut self, state: &PanelState);
}

/// A single indicator draw command.
///
/// Roll and pitch render as a line through center rotated by the angle;
/// yaw as a ray from center on a compass-style dial.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    pub topic: String,
    pub axis: Axis,
    /// Display slot 0..`MAX_DISPLAY_TOPICS`, stable while the topic stays
    /// live.
    pub slot: usize,
    pub angle_degrees: f64,
    pub color: Rgb,
}

/// Presentation surface the update/render cycle draws into.
pub trait IndicatorRenderer {
    /// A refresh pass starts; previous indicators are no longer current.
    fn begin_frame(&mut self);

    fn draw(&mut self, indicator: Indicator);

    fn end_frame(&mut self);

    /// Release globally installed presentation resources at teardown.
    fn release(&mut self) {}
}
