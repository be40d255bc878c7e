use crate::animation::ease::Curve;

/// Surface property a [`Tween`] drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Opacity,
    TranslateX,
    TranslateY,
}

/// Linear interpolation of one property over `[start_ms, start_ms + duration_ms]`,
/// in timeline-local time (start delay excluded).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub property: Property,
    pub from: f64,
    pub to: f64,
    pub start_ms: u64,
    pub duration_ms: u64,
}

impl Tween {
    pub fn new(property: Property, from: f64, to: f64, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            property,
            from,
            to,
            start_ms,
            duration_ms,
        }
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    pub fn has_started(&self, local_ms: u64) -> bool {
        local_ms >= self.start_ms
    }

    /// Linear progress in `[0, 1]`. Zero-length tweens jump straight to 1 once started.
    pub fn progress(&self, local_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return if self.has_started(local_ms) { 1.0 } else { 0.0 };
        }
        let elapsed = local_ms.saturating_sub(self.start_ms) as f64;
        (elapsed / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn sample(&self, local_ms: u64, curve: &Curve) -> f64 {
        let t = curve.apply(self.progress(local_ms));
        self.from + (self.to - self.from) * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueKind {
    /// Replace the displayed image with the cycle's target image.
    SwapImage,
}

/// One-shot event fired the first time local time reaches `at_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cue {
    pub at_ms: u64,
    pub kind: CueKind,
}

/// Property values a timeline dictates at one instant. `None` means no tween for that
/// property has started, so the surface keeps whatever it shows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub opacity: Option<f64>,
    pub translate_x: Option<f64>,
    pub translate_y: Option<f64>,
}

/// A composed set of tweens and cues sharing one start delay and one interpolation curve.
///
/// Timelines are plain data; whoever owns the clock samples them and applies the result.
#[derive(Clone, Debug)]
pub struct Timeline {
    start_delay_ms: u64,
    curve: Curve,
    tweens: Vec<Tween>,
    cues: Vec<Cue>, // sorted by at_ms
}

impl Timeline {
    pub fn new(start_delay_ms: u64, curve: Curve) -> Self {
        Self {
            start_delay_ms,
            curve,
            tweens: Vec::new(),
            cues: Vec::new(),
        }
    }

    /// Later-pushed tweens win over earlier ones on the same property once both have started.
    pub fn push_tween(&mut self, tween: Tween) -> &mut Self {
        self.tweens.push(tween);
        self
    }

    pub fn push_cue(&mut self, cue: Cue) -> &mut Self {
        let idx = self.cues.partition_point(|c| c.at_ms <= cue.at_ms);
        self.cues.insert(idx, cue);
        self
    }

    pub fn start_delay_ms(&self) -> u64 {
        self.start_delay_ms
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn tweens_for(&self, property: Property) -> impl Iterator<Item = &Tween> + '_ {
        self.tweens.iter().filter(move |t| t.property == property)
    }

    /// Duration after the start delay.
    pub fn duration_ms(&self) -> u64 {
        let tweens = self.tweens.iter().map(Tween::end_ms).max().unwrap_or(0);
        let cues = self.cues.last().map_or(0, |c| c.at_ms);
        tweens.max(cues)
    }

    pub fn total_ms(&self) -> u64 {
        self.start_delay_ms.saturating_add(self.duration_ms())
    }

    /// Maps elapsed time since start to local time. `None` while still inside the start delay.
    pub fn local_time(&self, elapsed_ms: u64) -> Option<u64> {
        elapsed_ms.checked_sub(self.start_delay_ms)
    }

    pub fn sample(&self, local_ms: u64) -> Sample {
        let mut out = Sample::default();
        let mut latest_start = [None::<u64>; 3];
        for tween in self.tweens.iter().filter(|t| t.has_started(local_ms)) {
            let seen = &mut latest_start[tween.property as usize];
            if seen.is_some_and(|s| s > tween.start_ms) {
                continue;
            }
            *seen = Some(tween.start_ms);
            let value = Some(tween.sample(local_ms, &self.curve));
            match tween.property {
                Property::Opacity => out.opacity = value,
                Property::TranslateX => out.translate_x = value,
                Property::TranslateY => out.translate_y = value,
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ease::Ease;

    fn fade_pair() -> Timeline {
        let mut tl = Timeline::new(100, Curve::default());
        tl.push_tween(Tween::new(Property::Opacity, 1.0, 0.2, 0, 300))
            .push_cue(Cue {
                at_ms: 300,
                kind: CueKind::SwapImage,
            })
            .push_tween(Tween::new(Property::Opacity, 0.2, 1.0, 300, 250));
        tl
    }

    #[test]
    fn duration_covers_tweens_and_delay() {
        let tl = fade_pair();
        assert_eq!(tl.duration_ms(), 550);
        assert_eq!(tl.total_ms(), 650);
        assert_eq!(tl.local_time(50), None);
        assert_eq!(tl.local_time(150), Some(50));
    }

    #[test]
    fn later_tween_wins_once_started() {
        let tl = fade_pair();
        assert_eq!(tl.sample(0).opacity, Some(1.0));
        assert!((tl.sample(150).opacity.unwrap() - 0.6).abs() < 1e-9);
        assert_eq!(tl.sample(300).opacity, Some(0.2));
        assert_eq!(tl.sample(550).opacity, Some(1.0));
        assert_eq!(tl.sample(10_000).opacity, Some(1.0));
    }

    #[test]
    fn unstarted_properties_are_absent() {
        let mut tl = Timeline::new(0, Curve::default());
        tl.push_tween(Tween::new(Property::TranslateX, 0.0, -100.0, 250, 1000));
        let s = tl.sample(100);
        assert_eq!(s.translate_x, None);
        assert_eq!(s.translate_y, None);
        assert_eq!(tl.sample(750).translate_x, Some(-50.0));
    }

    #[test]
    fn curve_is_applied_per_tween() {
        let mut tl = Timeline::new(0, Ease::InQuad.into());
        tl.push_tween(Tween::new(Property::TranslateY, 0.0, 100.0, 100, 100));
        assert_eq!(tl.sample(150).translate_y, Some(25.0));
    }

    #[test]
    fn zero_length_tween_jumps_to_end() {
        let t = Tween::new(Property::Opacity, 0.0, 1.0, 10, 0);
        assert_eq!(t.progress(9), 0.0);
        assert_eq!(t.progress(10), 1.0);
    }

    #[test]
    fn cues_stay_sorted() {
        let mut tl = Timeline::new(0, Curve::default());
        for at_ms in [30, 10, 20] {
            tl.push_cue(Cue {
                at_ms,
                kind: CueKind::SwapImage,
            });
        }
        let order: Vec<u64> = tl.cues().iter().map(|c| c.at_ms).collect();
        assert_eq!(order, vec![10, 20, 30]);
        assert_eq!(tl.duration_ms(), 30);
    }
}
