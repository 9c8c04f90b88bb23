//! Display colors and the concurrent-topic display cap

use serde::{Deserialize, Serialize};

/// Maximum number of concurrently drawn topics.
///
/// Doubles as the palette length, so slot index and color index stay in
/// lockstep; topics past the cap keep their cached orientation but are not
/// drawn.
pub const MAX_DISPLAY_TOPICS: usize = 9;

/// An RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Distinguishable hues for concurrent topic displays, indexed by slot.
pub const PALETTE: [Rgb; MAX_DISPLAY_TOPICS] = [
    Rgb(50, 200, 50),
    Rgb(255, 200, 50),
    Rgb(200, 50, 200),
    Rgb(50, 200, 200),
    Rgb(200, 100, 50),
    Rgb(50, 100, 200),
    Rgb(230, 70, 70),
    Rgb(160, 220, 90),
    Rgb(180, 180, 180),
];
