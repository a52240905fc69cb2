//! Magnitude to color-bucket mapping.
//!
//! Buckets are `floor(magnitude)` clamped to `[0, 10]`, with 0 and 1 merged.
//! Negative and NaN magnitudes land in the lowest bucket.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum MagnitudeBucket {
    OneOrLess = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    TenPlus = 10,
}

impl MagnitudeBucket {
    pub const ALL: [MagnitudeBucket; 10] = [
        MagnitudeBucket::OneOrLess,
        MagnitudeBucket::Two,
        MagnitudeBucket::Three,
        MagnitudeBucket::Four,
        MagnitudeBucket::Five,
        MagnitudeBucket::Six,
        MagnitudeBucket::Seven,
        MagnitudeBucket::Eight,
        MagnitudeBucket::Nine,
        MagnitudeBucket::TenPlus,
    ];

    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude.is_nan() {
            return MagnitudeBucket::OneOrLess;
        }
        // Clamping first keeps the cast in range for infinities.
        match magnitude.clamp(0.0, 10.0).floor() as u8 {
            0 | 1 => MagnitudeBucket::OneOrLess,
            2 => MagnitudeBucket::Two,
            3 => MagnitudeBucket::Three,
            4 => MagnitudeBucket::Four,
            5 => MagnitudeBucket::Five,
            6 => MagnitudeBucket::Six,
            7 => MagnitudeBucket::Seven,
            8 => MagnitudeBucket::Eight,
            9 => MagnitudeBucket::Nine,
            _ => MagnitudeBucket::TenPlus,
        }
    }

    /// Background color of the magnitude circle, as `#RRGGBB`.
    pub fn color_hex(self) -> &'static str {
        match self {
            MagnitudeBucket::OneOrLess => "#4A7BA7",
            MagnitudeBucket::Two => "#04B4B3",
            MagnitudeBucket::Three => "#10CAC9",
            MagnitudeBucket::Four => "#F5A623",
            MagnitudeBucket::Five => "#FF7D50",
            MagnitudeBucket::Six => "#FC6644",
            MagnitudeBucket::Seven => "#E75F40",
            MagnitudeBucket::Eight => "#E13A20",
            MagnitudeBucket::Nine => "#D93218",
            MagnitudeBucket::TenPlus => "#C03823",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MagnitudeBucket::OneOrLess => "0-1",
            MagnitudeBucket::Two => "2",
            MagnitudeBucket::Three => "3",
            MagnitudeBucket::Four => "4",
            MagnitudeBucket::Five => "5",
            MagnitudeBucket::Six => "6",
            MagnitudeBucket::Seven => "7",
            MagnitudeBucket::Eight => "8",
            MagnitudeBucket::Nine => "9",
            MagnitudeBucket::TenPlus => "10+",
        }
    }
}
