use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

use crate::foundation::core::{Affine, Size, Vec2};

/// The rendering side the controller drives. Implementations only store and present state;
/// they never schedule anything on their own.
pub trait Surface<I> {
    fn set_image(&mut self, image: &I);
    fn has_image(&self) -> bool;
    fn set_opacity(&mut self, opacity: f64);
    fn opacity(&self) -> f64;
    /// Replaces the whole transform with a pure translation.
    fn set_translation(&mut self, translation: Vec2);
    fn translation(&self) -> Vec2;
}

/// Reports the intrinsic pixel size of an image, or `None` while it cannot be resolved.
pub trait ImageResolver<I> {
    fn intrinsic_size(&self, image: &I) -> Option<Size>;
}

impl<I, S> ImageResolver<I> for HashMap<I, Size, S>
where
    I: Eq + Hash,
    S: BuildHasher,
{
    fn intrinsic_size(&self, image: &I) -> Option<Size> {
        self.get(image).copied()
    }
}

impl<I: Ord> ImageResolver<I> for BTreeMap<I, Size> {
    fn intrinsic_size(&self, image: &I) -> Option<Size> {
        self.get(image).copied()
    }
}

/// Adapts a closure into an [`ImageResolver`].
#[derive(Clone, Copy, Debug)]
pub struct FnResolver<F>(pub F);

impl<I, F> ImageResolver<I> for FnResolver<F>
where
    F: Fn(&I) -> Option<Size>,
{
    fn intrinsic_size(&self, image: &I) -> Option<Size> {
        (self.0)(image)
    }
}

/// In-memory surface: keeps the last applied state so hosts and tests can read it back.
#[derive(Clone, Debug, PartialEq)]
pub struct MemorySurface<I> {
    image: Option<I>,
    opacity: f64,
    translation: Vec2,
    image_swaps: u64,
}

impl<I> Default for MemorySurface<I> {
    fn default() -> Self {
        Self {
            image: None,
            opacity: 1.0,
            translation: Vec2::ZERO,
            image_swaps: 0,
        }
    }
}

impl<I> MemorySurface<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    pub fn transform(&self) -> Affine {
        Affine::translate(self.translation)
    }

    /// Number of `set_image` calls so far.
    pub fn image_swaps(&self) -> u64 {
        self.image_swaps
    }
}

impl<I: Clone> Surface<I> for MemorySurface<I> {
    fn set_image(&mut self, image: &I) {
        self.image = Some(image.clone());
        self.image_swaps += 1;
    }

    fn has_image(&self) -> bool {
        self.image.is_some()
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_translation(&mut self, translation: Vec2) {
        self.translation = translation;
    }

    fn translation(&self) -> Vec2 {
        self.translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_surface_starts_blank_and_opaque() {
        let s = MemorySurface::<u8>::new();
        assert!(!s.has_image());
        assert_eq!(s.opacity(), 1.0);
        assert_eq!(s.transform(), Affine::IDENTITY);
    }

    #[test]
    fn memory_surface_tracks_state() {
        let mut s = MemorySurface::new();
        s.set_image(&"a");
        s.set_image(&"b");
        s.set_opacity(1.7);
        s.set_translation(Vec2::new(-10.0, 4.0));
        assert_eq!(s.image(), Some(&"b"));
        assert_eq!(s.image_swaps(), 2);
        assert_eq!(s.opacity(), 1.0);
        assert_eq!(s.transform(), Affine::translate(Vec2::new(-10.0, 4.0)));
    }

    #[test]
    fn resolvers_look_up_sizes() {
        let mut by_hash = HashMap::new();
        by_hash.insert("a", Size::new(600, 800));
        assert_eq!(by_hash.intrinsic_size(&"a"), Some(Size::new(600, 800)));
        assert_eq!(by_hash.intrinsic_size(&"b"), None);

        let by_tree: BTreeMap<u32, Size> = [(1, Size::new(2, 3))].into_iter().collect();
        assert_eq!(by_tree.intrinsic_size(&1), Some(Size::new(2, 3)));

        let by_fn = FnResolver(|id: &u32| (*id < 3).then(|| Size::new(*id, *id)));
        assert_eq!(by_fn.intrinsic_size(&2), Some(Size::new(2, 2)));
        assert_eq!(by_fn.intrinsic_size(&7), None);
    }
}
