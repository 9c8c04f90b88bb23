//! Update/render cycle
//!
//! [`AttitudePanel`] owns the panel state and the live orientation cache
//! and drives an [`IndicatorRenderer`] on each delivery batch. The whole
//! cycle is synchronous and bounded; suspension happens only at the host
//! boundary between deliveries.

use crate::colors::{MAX_DISPLAY_TOPICS, PALETTE};
use crate::host::{Indicator, IndicatorRenderer, MessageFrame, PanelHost};
use horizon_core::{
    apply_settings_action, build_settings, enabled_topics, extract, set_topic_enabled,
    supported_topics, to_euler, Axis, EulerDegrees, PanelState, SettingsAction, SettingsNode,
    Topic,
};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;

/// Minimum spacing between visual refresh passes.
///
/// A performance knob, not a correctness mechanism: a suppressed refresh
/// never drops cached orientations, the next pass draws the latest values.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(60);

/// The panel runtime: state, orientation cache, and refresh cycle.
pub struct AttitudePanel {
    state: PanelState,
    catalog: Vec<Topic>,
    /// Live orientations in insertion order; the order assigns display
    /// slots, keeping colors stable while a topic stays live.
    orientations: Vec<(String, EulerDegrees)>,
    last_refresh: Option<Instant>,
}

impl AttitudePanel {
    /// Create a panel, restoring state from a persisted partial value.
    pub fn new(persisted: Option<&Value>) -> Self {
        Self {
            state: PanelState::restore(persisted),
            catalog: Vec::new(),
            orientations: Vec::new(),
            last_refresh: None,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Orientation-capable topics from the last catalog update.
    pub fn catalog(&self) -> &[Topic] {
        &self.catalog
    }

    /// Last-known orientation for a topic, if any message has resolved.
    pub fn orientation(&self, topic: &str) -> Option<&EulerDegrees> {
        self.orientations
            .iter()
            .find(|(name, _)| name == topic)
            .map(|(_, euler)| euler)
    }

    /// Take a new topic catalog from the host, keeping only supported
    /// schemas.
    pub fn update_catalog(&mut self, catalog: &[Topic]) {
        self.catalog = supported_topics(catalog);
    }

    /// Current settings tree for the host's settings editor.
    pub fn settings(&self) -> SettingsNode {
        build_settings(&self.state, &self.catalog)
    }

    /// Enable or disable a topic.
    ///
    /// Disabling purges the topic's cached orientation in the same step, so
    /// stale visuals vanish immediately. Subscriptions and persisted state
    /// are synced afterwards.
    pub fn set_topic_enabled(&mut self, topic: &str, enabled: bool, host: &mut dyn PanelHost) {
        self.state = set_topic_enabled(&self.state, topic, enabled);
        if !enabled {
            self.purge(topic);
        }
        self.sync_subscriptions(host);
        host.save_state(&self.state);
    }

    /// Route a settings editor action into the state model.
    ///
    /// Returns false for paths that address nothing; the state is untouched
    /// then and nothing is persisted.
    pub fn apply_settings(&mut self, action: &SettingsAction, host: &mut dyn PanelHost) -> bool {
        let Some(next) = apply_settings_action(&self.state, action) else {
            return false;
        };
        self.state = next;
        let segments: Vec<&str> = action.path.iter().map(String::as_str).collect();
        if let ["topics", topic, "enabled"] = segments.as_slice() {
            if !action.value {
                self.purge(topic);
            }
            self.sync_subscriptions(host);
        }
        host.save_state(&self.state);
        true
    }

    /// Push the enabled-topic set to the host's subscription control.
    pub fn sync_subscriptions(&self, host: &mut dyn PanelHost) {
        let topics = enabled_topics(&self.state)
            .into_iter()
            .map(String::from)
            .collect();
        host.set_subscriptions(topics);
    }

    /// Process one delivery batch and refresh the display.
    ///
    /// Frames from topics that are not enabled are dropped (the
    /// subscription may have toggled off while the batch was in flight).
    /// Within a batch the last message per topic wins. A message without a
    /// resolvable quaternion keeps the previous orientation so the display
    /// holds the last-known value. The completion callback is invoked
    /// exactly once, empty batches included.
    pub fn deliver(
        &mut self,
        frames: &[MessageFrame],
        now: Instant,
        renderer: &mut dyn IndicatorRenderer,
        done: impl FnOnce(),
    ) {
        for frame in frames {
            if !self.is_enabled(&frame.topic) {
                debug!(topic = %frame.topic, "dropping frame from disabled topic");
                continue;
            }
            match extract(&frame.message) {
                Some(q) => self.store(&frame.topic, to_euler(&q)),
                None => debug!(topic = %frame.topic, "no quaternion in message"),
            }
        }
        self.refresh(now, renderer);
        done();
    }

    /// Unsubscribe everything and release presentation resources.
    pub fn teardown(&mut self, host: &mut dyn PanelHost, renderer: &mut dyn IndicatorRenderer) {
        host.set_subscriptions(Vec::new());
        renderer.release();
        self.orientations.clear();
    }

    fn is_enabled(&self, topic: &str) -> bool {
        self.state
            .topics
            .get(topic)
            .is_some_and(|config| config.enabled)
    }

    fn store(&mut self, topic: &str, euler: EulerDegrees) {
        match self.orientations.iter_mut().find(|(name, _)| name == topic) {
            Some(entry) => entry.1 = euler,
            None => self.orientations.push((topic.to_string(), euler)),
        }
    }

    fn purge(&mut self, topic: &str) {
        self.orientations.retain(|(name, _)| name != topic);
    }

    fn refresh(&mut self, now: Instant, renderer: &mut dyn IndicatorRenderer) {
        if let Some(last) = self.last_refresh {
            if now.duration_since(last) < MIN_REFRESH_INTERVAL {
                return;
            }
        }
        self.last_refresh = Some(now);

        renderer.begin_frame();
        for (slot, (topic, euler)) in self.orientations.iter().enumerate() {
            if slot >= MAX_DISPLAY_TOPICS {
                // Cached but undrawn: the cap bounds the display, not the
                // data.
                break;
            }
            let Some(config) = self.state.topics.get(topic) else {
                continue;
            };
            for axis in Axis::ALL {
                if self.state.axes.enabled(axis) && config.shows(axis) {
                    renderer.draw(Indicator {
                        topic: topic.clone(),
                        axis,
                        slot,
                        angle_degrees: euler.angle(axis),
                        color: PALETTE[slot],
                    });
                }
            }
        }
        renderer.end_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingHost {
        subscriptions: Vec<Vec<String>>,
        saves: usize,
    }

    impl PanelHost for RecordingHost {
        fn set_subscriptions(&mut self, topics: Vec<String>) {
            self.subscriptions.push(topics);
        }

        fn save_state(&mut self, _state: &PanelState) {
            self.saves += 1;
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        current: Vec<Indicator>,
        frames: usize,
        released: bool,
    }

    impl IndicatorRenderer for RecordingRenderer {
        fn begin_frame(&mut self) {
            self.current.clear();
        }

        fn draw(&mut self, indicator: Indicator) {
            self.current.push(indicator);
        }

        fn end_frame(&mut self) {
            self.frames += 1;
        }

        fn release(&mut self) {
            self.released = true;
        }
    }

    fn imu_frame(topic: &str, roll_deg: f64) -> MessageFrame {
        let q = horizon_core::Quaternion::from_euler_degrees(roll_deg, 0.0, 0.0);
        MessageFrame::new(
            topic,
            json!({"orientation": {"x": q.x, "y": q.y, "z": q.z, "w": q.w}}),
        )
    }

    fn enabled_panel(topics: &[&str]) -> (AttitudePanel, RecordingHost) {
        let mut panel = AttitudePanel::new(None);
        let mut host = RecordingHost::default();
        for topic in topics {
            panel.set_topic_enabled(topic, true, &mut host);
        }
        (panel, host)
    }

    fn later(start: Instant, n: u32) -> Instant {
        start + n * (MIN_REFRESH_INTERVAL + Duration::from_millis(1))
    }

    #[test]
    fn test_deliver_updates_orientation_and_draws() {
        let (mut panel, _host) = enabled_panel(&["/imu"]);
        let mut renderer = RecordingRenderer::default();
        panel.deliver(
            &[imu_frame("/imu", 45.0)],
            Instant::now(),
            &mut renderer,
            || {},
        );
        assert!((panel.orientation("/imu").unwrap().roll - 45.0).abs() < 0.1);
        assert_eq!(renderer.current.len(), 3);
        assert!(renderer
            .current
            .iter()
            .all(|i| i.topic == "/imu" && i.slot == 0));
    }

    #[test]
    fn test_completion_callback_called_exactly_once() {
        let (mut panel, _host) = enabled_panel(&["/imu"]);
        let mut renderer = RecordingRenderer::default();
        let start = Instant::now();

        let mut calls = 0;
        panel.deliver(&[], start, &mut renderer, || calls += 1);
        assert_eq!(calls, 1);

        let mut calls = 0;
        panel.deliver(
            &[imu_frame("/other", 1.0), imu_frame("/imu", 2.0)],
            later(start, 1),
            &mut renderer,
            || calls += 1,
        );
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_frames_from_disabled_topics_dropped() {
        let (mut panel, _host) = enabled_panel(&["/imu"]);
        let mut renderer = RecordingRenderer::default();
        panel.deliver(
            &[imu_frame("/ghost", 10.0)],
            Instant::now(),
            &mut renderer,
            || {},
        );
        assert!(panel.orientation("/ghost").is_none());
    }

    #[test]
    fn test_last_write_wins_within_batch() {
        let (mut panel, _host) = enabled_panel(&["/imu"]);
        let mut renderer = RecordingRenderer::default();
        panel.deliver(
            &[imu_frame("/imu", 10.0), imu_frame("/imu", 20.0)],
            Instant::now(),
            &mut renderer,
            || {},
        );
        assert!((panel.orientation("/imu").unwrap().roll - 20.0).abs() < 0.1);
        let roll = renderer
            .current
            .iter()
            .find(|i| i.axis == Axis::Roll)
            .unwrap();
        assert!((roll.angle_degrees - 20.0).abs() < 0.1);
    }

    #[test]
    fn test_unresolvable_message_keeps_previous_orientation() {
        let (mut panel, _host) = enabled_panel(&["/imu"]);
        let mut renderer = RecordingRenderer::default();
        let start = Instant::now();
        panel.deliver(&[imu_frame("/imu", 30.0)], start, &mut renderer, || {});
        panel.deliver(
            &[MessageFrame::new("/imu", json!({"velocity": 3.2}))],
            later(start, 1),
            &mut renderer,
            || {},
        );
        assert!((panel.orientation("/imu").unwrap().roll - 30.0).abs() < 0.1);
        assert_eq!(renderer.current.len(), 3);
    }

    #[test]
    fn test_disable_purges_orientation() {
        let (mut panel, mut host) = enabled_panel(&["/imu"]);
        let mut renderer = RecordingRenderer::default();
        panel.deliver(
            &[imu_frame("/imu", 15.0)],
            Instant::now(),
            &mut renderer,
            || {},
        );
        assert!(panel.orientation("/imu").is_some());

        panel.set_topic_enabled("/imu", false, &mut host);
        // Purged immediately, without waiting for new messages.
        assert!(panel.orientation("/imu").is_none());
        assert_eq!(host.subscriptions.last().unwrap().len(), 0);
    }

    #[test]
    fn test_disable_via_settings_action_purges() {
        let (mut panel, mut host) = enabled_panel(&["/imu"]);
        let mut renderer = RecordingRenderer::default();
        panel.deliver(
            &[imu_frame("/imu", 15.0)],
            Instant::now(),
            &mut renderer,
            || {},
        );

        let action = SettingsAction::new(&["topics", "/imu", "enabled"], false);
        assert!(panel.apply_settings(&action, &mut host));
        assert!(panel.orientation("/imu").is_none());
    }

    #[test]
    fn test_unroutable_action_changes_nothing() {
        let (mut panel, mut host) = enabled_panel(&["/imu"]);
        let saves_before = host.saves;
        let action = SettingsAction::new(&["nonsense"], true);
        assert!(!panel.apply_settings(&action, &mut host));
        assert_eq!(host.saves, saves_before);
    }

    #[test]
    fn test_display_cap_at_nine_topics() {
        let names: Vec<String> = (0..10).map(|i| format!("/imu{i}")).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (mut panel, _host) = enabled_panel(&name_refs);
        let mut renderer = RecordingRenderer::default();

        let frames: Vec<MessageFrame> = names.iter().map(|n| imu_frame(n, 5.0)).collect();
        panel.deliver(&frames, Instant::now(), &mut renderer, || {});

        let mut drawn: Vec<&str> = renderer
            .current
            .iter()
            .map(|i| i.topic.as_str())
            .collect();
        drawn.dedup();
        assert_eq!(drawn.len(), MAX_DISPLAY_TOPICS);
        // The tenth topic is cached but undrawn.
        assert!(panel.orientation("/imu9").is_some());
        assert!(!renderer.current.iter().any(|i| i.topic == "/imu9"));
        assert!(renderer.current.iter().all(|i| i.slot < MAX_DISPLAY_TOPICS));
    }

    #[test]
    fn test_slots_and_colors_follow_arrival_order() {
        let (mut panel, _host) = enabled_panel(&["/b", "/a"]);
        let mut renderer = RecordingRenderer::default();
        panel.deliver(
            &[imu_frame("/b", 1.0), imu_frame("/a", 2.0)],
            Instant::now(),
            &mut renderer,
            || {},
        );
        let slot_of = |topic: &str| {
            renderer
                .current
                .iter()
                .find(|i| i.topic == topic)
                .unwrap()
                .slot
        };
        // First arrival keeps slot 0 regardless of name ordering.
        assert_eq!(slot_of("/b"), 0);
        assert_eq!(slot_of("/a"), 1);
        assert_eq!(
            renderer.current.iter().find(|i| i.topic == "/b").unwrap().color,
            PALETTE[0]
        );
    }

    #[test]
    fn test_axis_gating() {
        let (mut panel, mut host) = enabled_panel(&["/imu"]);
        let mut renderer = RecordingRenderer::default();
        let start = Instant::now();

        // Global pitch toggle off.
        let action = SettingsAction::new(&["axes", "pitch"], false);
        panel.apply_settings(&action, &mut host);
        panel.deliver(&[imu_frame("/imu", 5.0)], start, &mut renderer, || {});
        assert!(!renderer.current.iter().any(|i| i.axis == Axis::Pitch));
        assert_eq!(renderer.current.len(), 2);

        // Per-topic yaw show-flag off on top of that.
        let action = SettingsAction::new(&["topics", "/imu", "showYaw"], false);
        panel.apply_settings(&action, &mut host);
        panel.deliver(&[imu_frame("/imu", 5.0)], later(start, 1), &mut renderer, || {});
        assert_eq!(renderer.current.len(), 1);
        assert_eq!(renderer.current[0].axis, Axis::Roll);
    }

    #[test]
    fn test_refresh_throttle_bounds_redraws() {
        let (mut panel, _host) = enabled_panel(&["/imu"]);
        let mut renderer = RecordingRenderer::default();
        let start = Instant::now();

        panel.deliver(&[imu_frame("/imu", 1.0)], start, &mut renderer, || {});
        assert_eq!(renderer.frames, 1);

        // Within the window: no redraw, but the cache still advances.
        panel.deliver(
            &[imu_frame("/imu", 2.0)],
            start + Duration::from_millis(1),
            &mut renderer,
            || {},
        );
        assert_eq!(renderer.frames, 1);
        assert!((panel.orientation("/imu").unwrap().roll - 2.0).abs() < 0.1);

        // Past the window the latest value is drawn.
        panel.deliver(&[], later(start, 1), &mut renderer, || {});
        assert_eq!(renderer.frames, 2);
        let roll = renderer
            .current
            .iter()
            .find(|i| i.axis == Axis::Roll)
            .unwrap();
        assert!((roll.angle_degrees - 2.0).abs() < 0.1);
    }

    #[test]
    fn test_catalog_filtering() {
        let mut panel = AttitudePanel::new(None);
        panel.update_catalog(&[
            Topic::new("/imu", "sensor_msgs/Imu"),
            Topic::new("/image", "sensor_msgs/Image"),
        ]);
        assert_eq!(panel.catalog().len(), 1);
        assert_eq!(panel.settings().children[0].children.len(), 1);
    }

    #[test]
    fn test_teardown_unsubscribes_and_releases() {
        let (mut panel, mut host) = enabled_panel(&["/imu"]);
        let mut renderer = RecordingRenderer::default();
        panel.deliver(
            &[imu_frame("/imu", 5.0)],
            Instant::now(),
            &mut renderer,
            || {},
        );

        panel.teardown(&mut host, &mut renderer);
        assert_eq!(host.subscriptions.last().unwrap().len(), 0);
        assert!(renderer.released);
        assert!(panel.orientation("/imu").is_none());
    }

    #[test]
    fn test_restored_state_drives_panel() {
        let persisted = json!({"topics": {"/imu": {"enabled": true}}});
        let mut panel = AttitudePanel::new(Some(&persisted));
        let mut renderer = RecordingRenderer::default();
        panel.deliver(
            &[imu_frame("/imu", 7.0)],
            Instant::now(),
            &mut renderer,
            || {},
        );
        assert!(panel.orientation("/imu").is_some());
    }
}
