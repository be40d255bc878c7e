use std::{fmt, sync::Arc};

use crate::foundation::error::{KenBurnsError, KenBurnsResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    /// Cosine ramp: slow start, slow end.
    AccelerateDecelerate,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::AccelerateDecelerate => ((t + 1.0) * std::f64::consts::PI).cos() / 2.0 + 0.5,
        }
    }
}

type CurveFn = dyn Fn(f64) -> f64 + Send + Sync;

/// Maps a tween's linear progress in `[0, 1]` to eased progress.
///
/// Named curves serialize as their [`Ease`]; custom closures are runtime-only.
#[derive(Clone)]
pub enum Curve {
    Ease(Ease),
    Custom(Arc<CurveFn>),
}

impl Curve {
    pub fn custom(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Custom curves may overshoot, but must stay finite at both endpoints.
    pub fn validate(&self) -> KenBurnsResult<()> {
        match self {
            Self::Ease(_) => Ok(()),
            Self::Custom(f) => {
                if f(0.0).is_finite() && f(1.0).is_finite() {
                    Ok(())
                } else {
                    Err(KenBurnsError::invalid_argument(
                        "interpolation curve must be finite at t=0 and t=1",
                    ))
                }
            }
        }
    }

    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Ease(e) => e.apply(t),
            Self::Custom(f) => {
                let v = f(t);
                if v.is_finite() { v } else { t }
            }
        }
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::Ease(Ease::Linear)
    }
}

impl From<Ease> for Curve {
    fn from(e: Ease) -> Self {
        Self::Ease(e)
    }
}

impl serde::Serialize for Curve {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Ease(e) => serde::Serialize::serialize(e, serializer),
            Self::Custom(_) => Err(serde::ser::Error::custom(
                "custom interpolation curves cannot be serialized",
            )),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Curve {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Ease as serde::Deserialize>::deserialize(deserializer).map(Self::Ease)
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ease(e) => f.debug_tuple("Ease").field(e).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
