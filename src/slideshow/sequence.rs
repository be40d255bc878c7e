use crate::foundation::error::{KenBurnsError, KenBurnsResult};

/// Ordered, non-empty list of image identifiers with a cursor that wraps after the last one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequencer<I> {
    images: Vec<I>,
    start_index: usize,
    current: usize,
}

impl<I> Sequencer<I> {
    pub fn new(images: Vec<I>, start_index: usize) -> KenBurnsResult<Self> {
        if images.is_empty() {
            return Err(KenBurnsError::invalid_argument(
                "image sequence must not be empty",
            ));
        }
        if start_index >= images.len() {
            return Err(KenBurnsError::invalid_argument(format!(
                "start index {start_index} out of range for {} images",
                images.len()
            )));
        }
        Ok(Self {
            images,
            start_index,
            current: start_index,
        })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always `false` for a constructed sequencer; kept alongside [`Sequencer::len`].
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[I] {
        &self.images
    }

    pub fn get(&self, index: usize) -> Option<&I> {
        self.images.get(index)
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &I {
        &self.images[self.current]
    }

    pub fn start(&self) -> &I {
        &self.images[self.start_index]
    }

    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.images.len();
    }

    pub fn reset(&mut self) {
        self.current = self.start_index;
    }
}
