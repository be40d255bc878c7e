use crate::{
    animation::ease::Curve,
    foundation::error::{KenBurnsError, KenBurnsResult},
};

pub const DEFAULT_START_DELAY_MS: u64 = 0;
pub const DEFAULT_TRANSLATE_MS_PER_PIXEL: u64 = 18;
pub const DEFAULT_FADE_IN_MS: u64 = 250;
pub const DEFAULT_FADE_OUT_MS: u64 = 300;

/// Opacity the outgoing image fades down to before the swap.
pub const FADE_FLOOR_OPACITY: f64 = 0.2;

/// Timing and easing for composed cycles. Changes apply from the next composed cycle on.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    pub start_delay_ms: u64,
    pub translate_ms_per_pixel: u64, // > 0
    pub fade_in_ms: u64,
    pub fade_out_ms: u64,
    pub curve: Curve,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: DEFAULT_START_DELAY_MS,
            translate_ms_per_pixel: DEFAULT_TRANSLATE_MS_PER_PIXEL,
            fade_in_ms: DEFAULT_FADE_IN_MS,
            fade_out_ms: DEFAULT_FADE_OUT_MS,
            curve: Curve::default(),
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> KenBurnsResult<()> {
        if self.translate_ms_per_pixel == 0 {
            return Err(KenBurnsError::invalid_argument(
                "translate_ms_per_pixel must be > 0",
            ));
        }
        self.curve.validate()
    }

    pub fn from_json_str(s: &str) -> KenBurnsResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| KenBurnsError::invalid_argument(format!("animation config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Fade-out and fade-in run back to back.
    pub fn fade_total_ms(&self) -> u64 {
        self.fade_out_ms.saturating_add(self.fade_in_ms)
    }

    /// Pan start inside a fading cycle, so the pan is visible before the fade-in finishes.
    pub fn pan_lead_in_ms(&self) -> u64 {
        self.fade_in_ms.min(self.fade_out_ms)
    }
}

/// Converts a host-supplied duration, rejecting negatives.
pub(crate) fn duration_ms(name: &str, value: i64) -> KenBurnsResult<u64> {
    u64::try_from(value)
        .map_err(|_| KenBurnsError::invalid_argument(format!("{name} must be >= 0, got {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ease::Ease;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = AnimationConfig::default();
        assert_eq!(cfg.start_delay_ms, 0);
        assert_eq!(cfg.translate_ms_per_pixel, 18);
        assert_eq!(cfg.fade_in_ms, 250);
        assert_eq!(cfg.fade_out_ms, 300);
        assert!(matches!(cfg.curve, Curve::Ease(Ease::Linear)));
        assert_eq!(cfg.pan_lead_in_ms(), 250);
        assert_eq!(cfg.fade_total_ms(), 550);
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg =
            AnimationConfig::from_json_str(r#"{ "fade_in_ms": 100, "curve": "InOutQuad" }"#)
                .unwrap();
        assert_eq!(cfg.fade_in_ms, 100);
        assert_eq!(cfg.fade_out_ms, 300);
        assert!(matches!(cfg.curve, Curve::Ease(Ease::InOutQuad)));
    }

    #[test]
    fn json_rejects_bad_values() {
        for bad in [
            r#"{ "translate_ms_per_pixel": 0 }"#,
            r#"{ "fade_in_ms": -5 }"#,
            r#"{ "curve": "Bouncy" }"#,
            r#"{ "zoom": 2 }"#,
        ] {
            let err = AnimationConfig::from_json_str(bad).unwrap_err();
            assert!(err.is_invalid_argument(), "{bad}");
        }
    }

    #[test]
    fn negative_durations_are_rejected() {
        assert_eq!(duration_ms("fade_in_ms", 0).unwrap(), 0);
        assert_eq!(duration_ms("fade_in_ms", 42).unwrap(), 42);
        let err = duration_ms("fade_in_ms", -1).unwrap_err();
        assert!(err.to_string().contains("fade_in_ms"));
    }
}
