use std::error;

use rand09::{RngCore as _, rngs::OsRng, rngs::ReseedingRng};

use super::{DefaultRng, RandSource};

impl RandSource for DefaultRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

impl Default for DefaultRng {
    /// Creates an instance of the default random number generator.
    ///
    /// # Panics
    ///
    /// Panics in the highly unlikely event where the operating system's random number generator
    /// failed to provide secure entropy.
    fn default() -> Self {
        Self::try_new().expect("could not initialize DefaultRng")
    }
}

impl DefaultRng {
    pub(crate) fn try_new() -> Result<Self, impl error::Error> {
        ReseedingRng::new(1024 * 64, OsRng).map(|inner| Self {
            _private: (),
            inner,
        })
    }
}
