use std::str::FromStr;

use crate::foundation::error::{KenBurnsError, KenBurnsResult};

pub use kurbo::{Affine, Vec2};

/// Pixel dimensions of a viewport or of an image's intrinsic bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl FromStr for Size {
    type Err = KenBurnsError;

    /// Parses `WxH`, e.g. `600x800`.
    fn from_str(s: &str) -> KenBurnsResult<Self> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| KenBurnsError::invalid_argument(format!("size '{s}' must be WxH")))?;
        let parse = |v: &str| {
            v.trim().parse::<u32>().map_err(|_| {
                KenBurnsError::invalid_argument(format!("size '{s}' has a non-integer component"))
            })
        };
        Ok(Self::new(parse(w)?, parse(h)?))
    }
}

/// Integer translation of the displayed image, in pixels. Pan offsets are usually `<= 0`:
/// the image is shifted up/left so a window of it shows through the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanOffset {
    pub x: i32,
    pub y: i32,
}

impl PanOffset {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Truncates a live translation toward zero.
    pub fn from_translation(v: Vec2) -> Self {
        Self {
            x: v.x as i32,
            y: v.y as i32,
        }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.x), f64::from(self.y))
    }

    pub fn distance_to(self, other: Self) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

/// SplitMix64. Small, seedable, and good enough for picking pan targets.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seeds from the wall clock. Falls back to a fixed seed if the clock is before the epoch.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::new(nanos)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, bound)`. Returns 0 when `bound == 0`.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        // Lemire's multiply-shift; bias is negligible for pixel-sized bounds.
        ((u128::from(self.next_u64() >> 32) * u128::from(bound)) >> 32) as u32
    }
}
