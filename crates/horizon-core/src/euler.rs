//! Quaternion to Euler angle conversion
//!
//! The conversion is a fixed roll/pitch/yaw (ZYX) decomposition reported in
//! degrees. Downstream consumers compare literal degree values, so the
//! formulas here are contractual, including the inclusive gimbal-lock clamp.

use crate::quaternion::Quaternion;
use crate::state::Axis;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use tracing::warn;

/// Roll/pitch/yaw in degrees: roll/yaw in (-180, 180], pitch in [-90, 90].
///
/// One value per topic, always replaced as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerDegrees {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl EulerDegrees {
    pub fn angle(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Roll => self.roll,
            Axis::Pitch => self.pitch,
            Axis::Yaw => self.yaw,
        }
    }
}

/// Convert a quaternion to roll/pitch/yaw degrees.
///
/// Pure and deterministic. At the gimbal-lock boundary (|2(wy - zx)| >= 1,
/// boundary inclusive) pitch saturates to exactly +/-90 degrees. A
/// quaternion whose w is missing or non-numeric converts to all zeros with
/// a diagnostic rather than an error.
pub fn to_euler(q: &Quaternion) -> EulerDegrees {
    if !q.w.is_finite() {
        warn!(w = q.w, "quaternion has no numeric w component");
        return EulerDegrees::default();
    }
    let Quaternion { x, y, z, w } = *q;

    let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));

    let sinp = 2.0 * (w * y - z * x);
    let pitch = if sinp.abs() >= 1.0 {
        FRAC_PI_2.copysign(sinp)
    } else {
        sinp.asin()
    };

    let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));

    EulerDegrees {
        roll: roll.to_degrees(),
        pitch: pitch.to_degrees(),
        yaw: yaw.to_degrees(),
    }
}
