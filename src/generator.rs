//! ULID generator and related types.

#[cfg(not(feature = "std"))]
use core as std;

use crate::{MAX_RANDOMNESS, MAX_TIMESTAMP, Ulid};
use std::{error, fmt};

#[cfg(feature = "default_rng")]
mod default_rng;

pub mod with_rand08;
pub mod with_rand09;

#[cfg(test)]
mod tests;

/// A trait that defines the minimum random number generator interface for [`UlidGenerator`].
///
/// The generator draws 80 bits of randomness per fresh millisecond. Implementations should be
/// cryptographically strong and securely seeded.
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

/// A trait that defines the clock interface for [`UlidGenerator`].
pub trait TimeSource {
    /// Returns the current Unix time in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that reads the system clock.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64
    }
}

/// The default [`RandSource`] that wraps a ChaCha12 generator periodically reseeded from the
/// operating system's entropy source.
///
/// Available through [`UlidGenerator::new`] and [`Default`] when the `default_rng` feature is
/// enabled.
#[derive(Debug)]
pub struct DefaultRng {
    _private: (),
    #[cfg(feature = "default_rng")]
    inner: rand09::rngs::ReseedingRng<rand_chacha::ChaCha12Core, rand09::rngs::OsRng>,
}

/// An error encountered by a generator while producing a new identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum GeneratorError {
    /// The 80-bit randomness value reached its maximum within the current millisecond, so one
    /// more increment would break the increasing order of identifiers.
    ///
    /// Recoverable: retry once the clock has moved on to the next millisecond.
    ClockOverrun,

    /// The clock reported a timestamp smaller than the last one observed.
    ///
    /// Returned by the `or_abort` flavors only; the clamping flavors reuse the last timestamp
    /// instead.
    ClockRegression,
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not generate ULID: ")?;
        match self {
            GeneratorError::ClockOverrun => {
                write!(f, "randomness overflow within the same millisecond")
            }
            GeneratorError::ClockRegression => {
                write!(f, "clock moved backward beyond the last timestamp")
            }
        }
    }
}

impl error::Error for GeneratorError {}

/// Represents a ULID generator that guarantees the monotonic order of ULIDs generated within the
/// same millisecond.
///
/// The generator carries the last timestamp and randomness issued; a call within the same
/// millisecond re-emits the previous randomness incremented by one, so consecutive identifiers
/// from one generator always compare greater than their predecessors. The random number generator
/// and the clock are injected capabilities, which helps control the scope of guaranteed order and
/// makes the generator fully deterministic under test. The following example guarantees the
/// process-wide (cross-thread) monotonicity using Rust's standard synchronization mechanism.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "default_rng")]
/// # {
/// use std::{sync, thread};
/// use ulid128::UlidGenerator;
///
/// let g = sync::Arc::new(sync::Mutex::new(UlidGenerator::new()));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 let e = g.lock().unwrap().generate().unwrap();
///                 println!("{} by thread {}", e, i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// # }
/// ```
///
/// # Generator functions
///
/// The generator comes with four different methods that produce a ULID:
///
/// | Flavor                       | Timestamp | On backward clock              |
/// | ---------------------------- | --------- | ------------------------------ |
/// | [`generate`]                 | Now       | Reuses last timestamp          |
/// | [`generate_or_abort`]        | Now       | Returns `ClockRegression`      |
/// | [`generate_or_clamp_with_ts`]| Argument  | Reuses last timestamp          |
/// | [`generate_or_abort_with_ts`]| Argument  | Returns `ClockRegression`      |
///
/// The clamping flavors preserve the increasing order of identifiers at the cost of timestamp
/// accuracy while the clock stays behind the last value observed; they are the default policy.
/// All four fail with [`GeneratorError::ClockOverrun`] in the practically unreachable event that
/// the randomness value is incremented past its 80-bit maximum within one millisecond; the
/// generator state is left intact so that a later millisecond recovers.
///
/// [`generate`]: UlidGenerator::generate
/// [`generate_or_abort`]: UlidGenerator::generate_or_abort
/// [`generate_or_clamp_with_ts`]: UlidGenerator::generate_or_clamp_with_ts
/// [`generate_or_abort_with_ts`]: UlidGenerator::generate_or_abort_with_ts
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct UlidGenerator<R = DefaultRng, T = StdSystemTime> {
    timestamp: u64,
    randomness: u128,

    /// The random number generator used by the generator.
    rand_source: R,

    /// The clock used by the argument-less generator functions.
    time_source: T,
}

#[cfg(feature = "default_rng")]
#[cfg_attr(docsrs, doc(cfg(feature = "default_rng")))]
impl UlidGenerator {
    /// Creates a generator object with the default random number generator and system clock.
    ///
    /// # Panics
    ///
    /// Panics in the highly unlikely event where the operating system's random number generator
    /// failed to provide secure entropy.
    pub fn new() -> Self {
        Self::with_rand_and_time_sources(DefaultRng::default(), StdSystemTime)
    }
}

impl<R: RandSource> UlidGenerator<R> {
    /// Creates a generator object with a specified random number generator and the system clock.
    /// The specified random number generator should be cryptographically strong and securely
    /// seeded.
    pub const fn with_rng(rand_source: R) -> Self {
        Self::with_rand_and_time_sources(rand_source, StdSystemTime)
    }
}

impl<R: RandSource, T> UlidGenerator<R, T> {
    /// Creates a generator object with specified random number generator and clock.
    pub const fn with_rand_and_time_sources(rand_source: R, time_source: T) -> Self {
        Self {
            timestamp: 0,
            randomness: 0,
            rand_source,
            time_source,
        }
    }

    /// Generates a new ULID object from the `unix_ts_ms` passed, reusing the last timestamp if
    /// the one passed is smaller.
    ///
    /// See the [`UlidGenerator`] type documentation for the description.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    pub fn generate_or_clamp_with_ts(&mut self, unix_ts_ms: u64) -> Result<Ulid, GeneratorError> {
        #[cfg(feature = "log")]
        if unix_ts_ms < self.timestamp {
            log::warn!(
                "ulid128: clock moved backward; reusing last timestamp ({} < {})",
                unix_ts_ms,
                self.timestamp
            );
        }

        if unix_ts_ms > self.timestamp {
            self.generate_or_abort_with_ts(unix_ts_ms)
        } else {
            self.generate_or_abort_with_ts(self.timestamp)
        }
    }

    /// Generates a new ULID object from the `unix_ts_ms` passed, or returns
    /// [`GeneratorError::ClockRegression`] if the one passed is smaller than the last timestamp
    /// observed.
    ///
    /// See the [`UlidGenerator`] type documentation for the description.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    pub fn generate_or_abort_with_ts(&mut self, unix_ts_ms: u64) -> Result<Ulid, GeneratorError> {
        assert!(
            unix_ts_ms <= MAX_TIMESTAMP,
            "`unix_ts_ms` must be a 48-bit integer"
        );

        if unix_ts_ms > self.timestamp {
            self.timestamp = unix_ts_ms;
            self.randomness = self.draw_randomness();
        } else if unix_ts_ms < self.timestamp {
            return Err(GeneratorError::ClockRegression);
        } else if self.randomness < MAX_RANDOMNESS {
            self.randomness += 1;
        } else {
            return Err(GeneratorError::ClockOverrun);
        }

        Ok(Ulid::from_fields(self.timestamp, self.randomness))
    }

    /// Draws a fresh 80-bit randomness field value from the underlying random number generator.
    fn draw_randomness(&mut self) -> u128 {
        let hi = self.rand_source.next_u32() as u128;
        let lo = self.rand_source.next_u64() as u128;
        ((hi << 64) | lo) & MAX_RANDOMNESS
    }
}

impl<R: RandSource, T: TimeSource> UlidGenerator<R, T> {
    /// Generates a new ULID object from the current timestamp, reusing the last timestamp if the
    /// clock moved backward.
    ///
    /// See the [`UlidGenerator`] type documentation for the description.
    pub fn generate(&mut self) -> Result<Ulid, GeneratorError> {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_or_clamp_with_ts(unix_ts_ms)
    }

    /// Generates a new ULID object from the current timestamp, or returns
    /// [`GeneratorError::ClockRegression`] if the clock moved backward.
    ///
    /// See the [`UlidGenerator`] type documentation for the description.
    pub fn generate_or_abort(&mut self) -> Result<Ulid, GeneratorError> {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_or_abort_with_ts(unix_ts_ms)
    }
}

/// Supports operations as an infinite iterator that produces a new ULID object for each call of
/// `next()`.
///
/// Iteration ends only in the practically unreachable event that the randomness space of the
/// current millisecond is exhausted.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "default_rng")]
/// # {
/// use ulid128::UlidGenerator;
///
/// UlidGenerator::new()
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// # }
/// ```
impl<R: RandSource, T: TimeSource> Iterator for UlidGenerator<R, T> {
    type Item = Ulid;

    fn next(&mut self) -> Option<Self::Item> {
        self.generate().ok()
    }
}
