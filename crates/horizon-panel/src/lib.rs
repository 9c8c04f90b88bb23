//! Horizon Panel - panel runtime for the attitude pipeline
//!
//! This crate owns the update/render cycle on top of `horizon-core`:
//! - Host boundary traits (subscriptions, persistence, indicator rendering)
//! - The live orientation cache with stable display slots and colors
//! - Delivery-batch processing and the refresh throttle
//!
//! The host environment implements [`PanelHost`] and [`IndicatorRenderer`];
//! everything else runs in a single cooperative scheduling domain with no
//! blocking work.

pub mod colors;
pub mod host;
pub mod panel;

pub use colors::{Rgb, MAX_DISPLAY_TOPICS, PALETTE};
pub use host::{Indicator, IndicatorRenderer, MessageFrame, PanelHost};
pub use panel::{AttitudePanel, MIN_REFRESH_INTERVAL};
