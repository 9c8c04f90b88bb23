//! Quaternion extraction from loosely structured messages
//!
//! Messages arrive as `serde_json::Value` and carry their quaternion at one
//! of several well-known locations depending on the schema: a bare
//! quaternion, an IMU `orientation`, a pose, a pose-with-covariance, or a
//! transform. Probing walks an ordered shape table; the first location that
//! resolves wins, so more specific nested shapes never shadow simpler ones.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A quaternion in xyzw convention, unit-norm by convention (not enforced).
///
/// Lives only for the duration of one extraction + conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Build a quaternion from roll/pitch/yaw degrees (ZYX convention).
    ///
    /// Reference construction for round-tripping against [`crate::to_euler`].
    pub fn from_euler_degrees(roll: f64, pitch: f64, yaw: f64) -> Self {
        let (sr, cr) = (roll.to_radians() / 2.0).sin_cos();
        let (sp, cp) = (pitch.to_radians() / 2.0).sin_cos();
        let (sy, cy) = (yaw.to_radians() / 2.0).sin_cos();
        Self {
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
            w: cr * cp * cy + sr * sp * sy,
        }
    }

    /// Read the component fields of a JSON object.
    ///
    /// Missing or non-numeric fields read as NaN; validity is judged at
    /// conversion time, not here.
    fn from_object(obj: &Value) -> Self {
        Self {
            x: component(obj, "x"),
            y: component(obj, "y"),
            z: component(obj, "z"),
            w: component(obj, "w"),
        }
    }
}

fn component(obj: &Value, key: &str) -> f64 {
    obj.get(key).and_then(Value::as_f64).unwrap_or(f64::NAN)
}

/// One entry in the shape table: where a quaternion may live in a message.
#[derive(Debug, Clone, Copy)]
enum Shape {
    /// The message itself has numeric x/y/z/w.
    Bare,
    /// The quaternion sits under a fixed nested path.
    Nested(&'static [&'static str]),
}

impl Shape {
    fn probe<'a>(&self, message: &'a Value) -> Option<&'a Value> {
        match self {
            Shape::Bare => {
                let numeric = ["x", "y", "z", "w"]
                    .iter()
                    .all(|key| message.get(key).is_some_and(Value::is_number));
                numeric.then_some(message)
            }
            Shape::Nested(path) => path
                .iter()
                .try_fold(message, |value, key| value.get(key))
                .filter(|value| value.is_object()),
        }
    }
}

/// Shape table in priority order. Order is load-bearing: a message carrying
/// both `orientation` and `pose.orientation` resolves via `orientation`.
const SHAPES: &[Shape] = &[
    Shape::Bare,
    Shape::Nested(&["orientation"]),
    Shape::Nested(&["pose", "orientation"]),
    Shape::Nested(&["pose", "pose", "orientation"]),
    Shape::Nested(&["rotation"]),
    Shape::Nested(&["transform", "rotation"]),
];

/// Locate a quaternion embedded in a message.
///
/// Returns `None` when no shape matches; malformed or foreign messages are
/// silently ignored rather than reported.
pub fn extract(message: &Value) -> Option<Quaternion> {
    SHAPES
        .iter()
        .find_map(|shape| shape.probe(message))
        .map(Quaternion::from_object)
}
