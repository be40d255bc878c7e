//! Kenburns cycles a fixed list of images through randomized pans and cross-fades.
//!
//! The crate is host-agnostic: it never draws and never owns a clock. A host supplies
//!
//! - a [`Surface`] that shows one image with an opacity and a translation,
//! - an [`ImageResolver`] that reports each image's intrinsic size,
//! - layout events ([`KenBurns::on_viewport_size_changed`]) and clock ticks ([`KenBurns::tick`]).
//!
//! Each cycle is a [`Timeline`]: an optional fade-out/swap/fade-in, overlapped by a pan from the
//! previous offset to a random one that keeps the viewport inside the image. A cycle that runs to
//! the end advances the sequence and composes the next one; a stopped cycle freezes its pan
//! offset so a later start continues from where the image actually was.
//!
//! ```
//! use std::collections::HashMap;
//! use kenburns::{KenBurns, MemorySurface, Size};
//!
//! let sizes: HashMap<&str, Size> =
//!     [("a", Size::new(600, 800)), ("b", Size::new(600, 800))].into_iter().collect();
//! let mut kb = KenBurns::new(MemorySurface::new(), sizes).with_seed(1);
//! kb.set_sequence(vec!["a", "b"], 0)?;
//! kb.start_animation();
//! assert!(!kb.is_animating()); // no viewport yet
//! kb.on_viewport_size_changed(300, 400);
//! assert!(kb.is_animating());
//! kb.tick(16);
//! # Ok::<(), kenburns::KenBurnsError>(())
//! ```
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod foundation;
mod slideshow;

pub use animation::ease::{Curve, Ease};
pub use animation::timeline::{Cue, CueKind, Property, Sample, Timeline, Tween};
pub use assets::decode::{FsImageResolver, probe_image_file, probe_image_size};
pub use foundation::core::{Affine, PanOffset, Rng64, Size, Vec2};
pub use foundation::error::{KenBurnsError, KenBurnsResult};
pub use slideshow::composer::{
    PanPlan, compose_cycle, pan_duration_ms, pick_axis_offset, plan_pan,
};
pub use slideshow::config::{
    AnimationConfig, DEFAULT_FADE_IN_MS, DEFAULT_FADE_OUT_MS, DEFAULT_START_DELAY_MS,
    DEFAULT_TRANSLATE_MS_PER_PIXEL, FADE_FLOOR_OPACITY,
};
pub use slideshow::controller::{KenBurns, Phase, ScaleMode};
pub use slideshow::sequence::Sequencer;
pub use slideshow::surface::{FnResolver, ImageResolver, MemorySurface, Surface};
