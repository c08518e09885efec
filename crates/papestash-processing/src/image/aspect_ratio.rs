//! Canonical aspect ratio classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed wallpaper aspect ratio buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "21:9")]
    Ultrawide,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "3:4")]
    StandardPortrait,
    #[serde(rename = "1:1")]
    Square,
}

/// Classification table. Order matters: on an exact tie the earlier entry wins.
const CANONICAL_RATIOS: [(u32, u32, AspectRatio); 6] = [
    (16, 9, AspectRatio::Widescreen),
    (9, 16, AspectRatio::Portrait),
    (21, 9, AspectRatio::Ultrawide),
    (4, 3, AspectRatio::Standard),
    (3, 4, AspectRatio::StandardPortrait),
    (1, 1, AspectRatio::Square),
];

impl AspectRatio {
    /// All labels in classification order.
    pub const ALL: [AspectRatio; 6] = [
        AspectRatio::Widescreen,
        AspectRatio::Portrait,
        AspectRatio::Ultrawide,
        AspectRatio::Standard,
        AspectRatio::StandardPortrait,
        AspectRatio::Square,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Ultrawide => "21:9",
            AspectRatio::Standard => "4:3",
            AspectRatio::StandardPortrait => "3:4",
            AspectRatio::Square => "1:1",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown aspect ratio '{0}' (expected one of 16:9, 9:16, 21:9, 4:3, 3:4, 1:1)")]
pub struct ParseAspectRatioError(pub String);

impl FromStr for AspectRatio {
    type Err = ParseAspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.label() == trimmed)
            .ok_or_else(|| ParseAspectRatioError(s.to_string()))
    }
}

/// Map a pixel size to the canonical ratio with the smallest absolute difference.
///
/// Every input yields a label. A zero height is treated as an infinitely wide
/// image and a zero width as an infinitely tall one.
pub fn classify(width: u32, height: u32) -> AspectRatio {
    let ratio = if height == 0 {
        f64::INFINITY
    } else {
        width as f64 / height as f64
    };

    let mut closest = CANONICAL_RATIOS[0].2;
    let mut min_difference = f64::MAX;
    for (w, h, label) in CANONICAL_RATIOS {
        let difference = (ratio - w as f64 / h as f64).abs();
        if difference < min_difference {
            min_difference = difference;
            closest = label;
        }
    }

    if ratio.is_infinite() {
        // Every difference is infinite; the widest bucket is the nearest.
        return AspectRatio::Ultrawide;
    }

    closest
}
