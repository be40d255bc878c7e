//! The slideshow state machine.
//!
//! `KenBurns` owns every piece of run state: the sequence cursor, the pan baseline, the run
//! flags, and the one active timeline. Hosts feed it two kinds of events, viewport sizes and
//! clock ticks, and it pushes the resulting image/opacity/translation onto its [`Surface`].
//!
//! ```text
//! Idle --start / resize--> (compose) --ok--> Running --tick past end--> (advance, compose) ...
//!                               \--deferred--> Idle          \--stop--> Idle (pan frozen)
//! ```

use crate::{
    animation::{
        ease::Curve,
        timeline::{CueKind, Timeline},
    },
    foundation::{
        core::{PanOffset, Rng64, Size},
        error::{KenBurnsError, KenBurnsResult},
    },
    slideshow::{
        composer::{PanPlan, compose_cycle, plan_pan},
        config::{AnimationConfig, duration_ms},
        sequence::Sequencer,
        surface::{ImageResolver, Surface},
    },
};

/// How the surface maps the image into the viewport. Panning needs a free transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScaleMode {
    #[default]
    FreeTransform,
    Fit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// Why a composition attempt did not start a timeline. None of these are errors; the next
/// trigger simply tries again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    NotRequested,
    NoSequence,
    ScaleMode,
    EmptyViewport,
    AlreadyRunning,
    UnresolvedImage,
}

#[derive(Debug)]
struct ActiveCycle {
    timeline: Timeline,
    plan: PanPlan,
    image_index: usize,
    elapsed_ms: u64,
    next_cue: usize,
}

#[derive(Debug)]
enum State {
    Idle,
    Running(ActiveCycle),
}

pub struct KenBurns<I, S, R> {
    surface: S,
    resolver: R,
    sequence: Option<Sequencer<I>>,
    config: AnimationConfig,
    scale_mode: ScaleMode,
    viewport: Size,
    pan: PanOffset,
    animation_requested: bool,
    // Set by a natural cycle end, cleared by stop/reset. Gates the cross-fade.
    completed_cycle: bool,
    state: State,
    rng: Rng64,
}

impl<I, S, R> KenBurns<I, S, R>
where
    S: Surface<I>,
    R: ImageResolver<I>,
{
    pub fn new(surface: S, resolver: R) -> Self {
        Self {
            surface,
            resolver,
            sequence: None,
            config: AnimationConfig::default(),
            scale_mode: ScaleMode::default(),
            viewport: Size::ZERO,
            pan: PanOffset::ZERO,
            animation_requested: false,
            completed_cycle: false,
            state: State::Idle,
            rng: Rng64::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng64::new(seed);
        self
    }

    pub fn with_config(mut self, config: AnimationConfig) -> KenBurnsResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn scale_mode(&self) -> ScaleMode {
        self.scale_mode
    }

    /// Pan baseline the next cycle starts from.
    pub fn pan_offset(&self) -> PanOffset {
        self.pan
    }

    pub fn current_index(&self) -> Option<usize> {
        self.sequence.as_ref().map(Sequencer::current_index)
    }

    pub fn sequence(&self) -> Option<&Sequencer<I>> {
        self.sequence.as_ref()
    }

    pub fn is_animation_requested(&self) -> bool {
        self.animation_requested
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::Running(_) => Phase::Running,
        }
    }

    /// The active cycle's timeline, if one is running.
    pub fn timeline(&self) -> Option<&Timeline> {
        match &self.state {
            State::Running(cycle) => Some(&cycle.timeline),
            State::Idle => None,
        }
    }

    /// Where the active cycle's pan ends.
    pub fn pan_target(&self) -> Option<PanOffset> {
        match &self.state {
            State::Running(cycle) => Some(cycle.plan.to),
            State::Idle => None,
        }
    }

    /// Installs a new sequence and shows its start image at rest (opaque, untranslated).
    ///
    /// A running cycle is cancelled first. If an animation was requested it restarts with the
    /// new sequence as soon as composition preconditions hold.
    pub fn set_sequence(&mut self, images: Vec<I>, start_index: usize) -> KenBurnsResult<()> {
        let sequence = Sequencer::new(images, start_index)?;
        self.cancel_active();
        self.completed_cycle = false;
        self.sequence = Some(sequence);
        self.show_start_at_rest();
        if self.animation_requested {
            self.compose();
        }
        Ok(())
    }

    pub fn start_animation(&mut self) {
        self.animation_requested = true;
        self.compose();
    }

    pub fn stop_animation(&mut self) {
        self.cancel_active();
        self.animation_requested = false;
        self.completed_cycle = false;
    }

    pub fn reset_animation(&mut self) {
        self.stop_animation();
        if let Some(seq) = self.sequence.as_mut() {
            seq.reset();
        }
        self.show_start_at_rest();
    }

    pub fn set_start_delay(&mut self, ms: i64) -> KenBurnsResult<()> {
        self.config.start_delay_ms = duration_ms("start_delay_ms", ms)?;
        Ok(())
    }

    pub fn set_fade_in_duration(&mut self, ms: i64) -> KenBurnsResult<()> {
        self.config.fade_in_ms = duration_ms("fade_in_ms", ms)?;
        Ok(())
    }

    pub fn set_fade_out_duration(&mut self, ms: i64) -> KenBurnsResult<()> {
        self.config.fade_out_ms = duration_ms("fade_out_ms", ms)?;
        Ok(())
    }

    pub fn set_per_pixel_translate_duration(&mut self, ms: i64) -> KenBurnsResult<()> {
        let ms = duration_ms("translate_ms_per_pixel", ms)?;
        if ms == 0 {
            return Err(KenBurnsError::invalid_argument(
                "translate_ms_per_pixel must be > 0",
            ));
        }
        self.config.translate_ms_per_pixel = ms;
        Ok(())
    }

    pub fn set_interpolation_curve(&mut self, curve: Option<Curve>) -> KenBurnsResult<()> {
        let curve = curve
            .ok_or_else(|| KenBurnsError::invalid_argument("interpolation curve is required"))?;
        curve.validate()?;
        self.config.curve = curve;
        Ok(())
    }

    /// Replaces the whole configuration; the running cycle keeps the timing it was built with.
    pub fn set_config(&mut self, config: AnimationConfig) -> KenBurnsResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Switching away from [`ScaleMode::FreeTransform`] does not interrupt the running cycle;
    /// later cycles defer until it is restored.
    pub fn set_scale_mode(&mut self, mode: ScaleMode) {
        self.scale_mode = mode;
        if self.animation_requested {
            self.compose();
        }
    }

    /// Layout hook: the host reports the surface's measured bounds.
    pub fn on_viewport_size_changed(&mut self, width: u32, height: u32) {
        let size = Size::new(width, height);
        if size != self.viewport {
            tracing::trace!(width, height, "viewport resized");
            self.viewport = size;
        }
        if self.animation_requested {
            self.compose();
        }
    }

    /// Clock hook: advances the active timeline by `dt_ms` and applies it to the surface.
    ///
    /// Reaching the end of a cycle advances the sequence and composes the next cycle, which
    /// starts at elapsed 0 on the following tick; time left over in this tick is dropped.
    pub fn tick(&mut self, dt_ms: u64) {
        let finished = match &mut self.state {
            State::Running(cycle) => {
                cycle.elapsed_ms = cycle.elapsed_ms.saturating_add(dt_ms);
                cycle.elapsed_ms >= cycle.timeline.total_ms()
            }
            State::Idle => return,
        };
        self.apply_frame();
        if finished {
            self.complete_cycle();
        }
    }

    /// Attempts to start a cycle for the current image, logging why it could not.
    fn compose(&mut self) {
        if let Err(reason) = self.try_compose() {
            tracing::trace!(?reason, "composition deferred");
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn try_compose(&mut self) -> Result<(), Deferred> {
        if !self.animation_requested {
            return Err(Deferred::NotRequested);
        }
        let Some(seq) = self.sequence.as_ref() else {
            return Err(Deferred::NoSequence);
        };
        if self.scale_mode != ScaleMode::FreeTransform {
            return Err(Deferred::ScaleMode);
        }
        if self.viewport.is_empty() {
            return Err(Deferred::EmptyViewport);
        }
        if self.is_animating() {
            return Err(Deferred::AlreadyRunning);
        }

        let image_index = seq.current_index();
        let image = seq.current();
        let image_size = self
            .resolver
            .intrinsic_size(image)
            .ok_or(Deferred::UnresolvedImage)?;

        let fade = self.completed_cycle && self.surface.has_image();
        if !fade {
            self.surface.set_image(image);
            self.surface.set_opacity(1.0);
        }

        let plan = plan_pan(
            &mut self.rng,
            image_size,
            self.viewport,
            self.pan,
            self.config.translate_ms_per_pixel,
        );
        let timeline = compose_cycle(&plan, fade, &self.config);
        tracing::debug!(
            image_index,
            fade,
            from = ?plan.from,
            to = ?plan.to,
            pan_ms = plan.duration_ms,
            total_ms = timeline.total_ms(),
            "cycle started"
        );

        self.state = State::Running(ActiveCycle {
            timeline,
            plan,
            image_index,
            elapsed_ms: 0,
            next_cue: 0,
        });
        Ok(())
    }

    fn apply_frame(&mut self) {
        let Self {
            state,
            surface,
            sequence,
            ..
        } = self;
        let State::Running(cycle) = state else {
            return;
        };
        let Some(local) = cycle.timeline.local_time(cycle.elapsed_ms) else {
            return;
        };

        let sample = cycle.timeline.sample(local);
        if let Some(opacity) = sample.opacity {
            surface.set_opacity(opacity);
        }
        if sample.translate_x.is_some() || sample.translate_y.is_some() {
            // Each axis overwrites only itself; the other keeps its last applied value.
            let mut t = surface.translation();
            if let Some(x) = sample.translate_x {
                t.x = x;
            }
            if let Some(y) = sample.translate_y {
                t.y = y;
            }
            surface.set_translation(t);
        }

        while let Some(cue) = cycle.timeline.cues().get(cycle.next_cue) {
            if cue.at_ms > local {
                break;
            }
            match cue.kind {
                CueKind::SwapImage => {
                    if let Some(image) = sequence.as_ref().and_then(|s| s.get(cycle.image_index)) {
                        surface.set_image(image);
                    }
                }
            }
            cycle.next_cue += 1;
        }
    }

    /// Natural end: commit the pan target, advance, and loop back into composition.
    fn complete_cycle(&mut self) {
        let State::Running(cycle) = std::mem::replace(&mut self.state, State::Idle) else {
            return;
        };
        self.pan = cycle.plan.to;
        self.completed_cycle = true;
        if let Some(seq) = self.sequence.as_mut() {
            seq.advance();
        }
        tracing::debug!(
            image_index = cycle.image_index,
            pan = ?self.pan,
            next_index = ?self.current_index(),
            "cycle completed"
        );
        self.compose();
    }

    /// Cancels the running cycle, freezing the pan baseline at the live translation.
    fn cancel_active(&mut self) {
        let State::Running(cycle) = std::mem::replace(&mut self.state, State::Idle) else {
            return;
        };
        self.pan = PanOffset::from_translation(self.surface.translation());
        tracing::debug!(
            image_index = cycle.image_index,
            elapsed_ms = cycle.elapsed_ms,
            pan = ?self.pan,
            "cycle cancelled"
        );
    }

    fn show_start_at_rest(&mut self) {
        self.pan = PanOffset::ZERO;
        self.surface.set_translation(PanOffset::ZERO.to_vec2());
        self.surface.set_opacity(1.0);
        if let Some(seq) = self.sequence.as_ref() {
            self.surface.set_image(seq.start());
        }
    }
}

impl<I, S, R> std::fmt::Debug for KenBurns<I, S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KenBurns")
            .field("viewport", &self.viewport)
            .field("pan", &self.pan)
            .field("scale_mode", &self.scale_mode)
            .field("animation_requested", &self.animation_requested)
            .field("state", &self.state)
            .field(
                "current_index",
                &self.sequence.as_ref().map(Sequencer::current_index),
            )
            .finish_non_exhaustive()
    }
}
