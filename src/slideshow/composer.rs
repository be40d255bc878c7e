//! Builds one cycle's timeline: an optional cross-fade followed by a randomized pan that never
//! leaves the image bounds.

use crate::{
    animation::timeline::{Cue, CueKind, Property, Timeline, Tween},
    foundation::core::{PanOffset, Rng64, Size},
    slideshow::config::{AnimationConfig, FADE_FLOOR_OPACITY},
};

/// Start and end of one cycle's pan, plus how long it takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanPlan {
    pub from: PanOffset,
    pub to: PanOffset,
    pub duration_ms: u64,
}

/// Picks the signed target offset for one axis.
///
/// A raw draw `t` in `[0, image - viewport)` becomes `-t`, unless `t + prev` would run past the
/// image extent, in which case the pan reflects back toward the origin (`+t`). An image that does
/// not exceed the viewport on this axis does not pan on it: the offset is 0.
pub fn pick_axis_offset(rng: &mut Rng64, image_extent: u32, viewport_extent: u32, prev: i32) -> i32 {
    if image_extent <= viewport_extent {
        return 0;
    }
    let t = i64::from(rng.next_below(image_extent - viewport_extent));
    let target = if t + i64::from(prev) > i64::from(image_extent) {
        t
    } else {
        -t
    };
    // |target| < image_extent <= u32::MAX, but the offset type is i32.
    target.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// `round(|to - from| * ms_per_pixel)`, the distance measured once over both axes.
pub fn pan_duration_ms(from: PanOffset, to: PanOffset, ms_per_pixel: u64) -> u64 {
    (from.distance_to(to) * ms_per_pixel as f64).round() as u64
}

pub fn plan_pan(
    rng: &mut Rng64,
    image: Size,
    viewport: Size,
    prev: PanOffset,
    ms_per_pixel: u64,
) -> PanPlan {
    let x = pick_axis_offset(rng, image.width, viewport.width, prev.x);
    let y = pick_axis_offset(rng, image.height, viewport.height, prev.y);
    let to = PanOffset::new(x, y);
    PanPlan {
        from: prev,
        to,
        duration_ms: pan_duration_ms(prev, to, ms_per_pixel),
    }
}

/// Lays out one cycle.
///
/// With `fade`, the outgoing image fades to [`FADE_FLOOR_OPACITY`], a [`CueKind::SwapImage`] cue
/// fires, and the new image fades back in; the pan starts after
/// [`AnimationConfig::pan_lead_in_ms`]. Without it, the pan starts at once. The start delay and
/// curve apply to the whole timeline.
pub fn compose_cycle(plan: &PanPlan, fade: bool, config: &AnimationConfig) -> Timeline {
    let mut timeline = Timeline::new(config.start_delay_ms, config.curve.clone());

    let pan_start = if fade {
        timeline
            .push_tween(Tween::new(
                Property::Opacity,
                1.0,
                FADE_FLOOR_OPACITY,
                0,
                config.fade_out_ms,
            ))
            .push_cue(Cue {
                at_ms: config.fade_out_ms,
                kind: CueKind::SwapImage,
            })
            .push_tween(Tween::new(
                Property::Opacity,
                FADE_FLOOR_OPACITY,
                1.0,
                config.fade_out_ms,
                config.fade_in_ms,
            ));
        config.pan_lead_in_ms()
    } else {
        0
    };

    timeline
        .push_tween(Tween::new(
            Property::TranslateX,
            f64::from(plan.from.x),
            f64::from(plan.to.x),
            pan_start,
            plan.duration_ms,
        ))
        .push_tween(Tween::new(
            Property::TranslateY,
            f64::from(plan.from.y),
            f64::from(plan.to.y),
            pan_start,
            plan.duration_ms,
        ));
    timeline
}
