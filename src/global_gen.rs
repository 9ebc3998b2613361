#![cfg(feature = "global_gen")]

use crate::{Ulid, UlidGenerator};
use std::sync::{Mutex, OnceLock};

#[cfg(unix)]
type GlobalGenInner = unix_fork_safety::ProcessLocalGenerator;

#[cfg(not(unix))]
type GlobalGenInner = UlidGenerator;

/// Generates a new ULID object using the global generator.
///
/// This function is thread-safe; multiple threads in a process can call it concurrently without
/// breaking the monotonic order of generated IDs. On Unix, this function resets the generator
/// state when the process ID changes (i.e., upon forks) to avoid collisions across processes.
///
/// The global generator reuses the last timestamp while the system clock stays behind the last
/// value observed, so the monotonic order survives backward clock adjustments.
///
/// # Panics
///
/// Panics if the global generator is poisoned or if the 80-bit randomness space of the current
/// millisecond is exhausted; the latter takes about 2^80 calls within one millisecond and is not
/// expected to occur in practice. Use [`UlidGenerator`] directly to handle these conditions as
/// recoverable errors.
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub fn new() -> Ulid {
    static G: OnceLock<Mutex<GlobalGenInner>> = OnceLock::new();

    G.get_or_init(Default::default)
        .lock()
        .expect("ulid128: could not lock global generator")
        .generate()
        .expect("ulid128: randomness overflow within the same millisecond")
}

/// Generates a new ULID encoded in the 26-digit canonical string representation using the global
/// generator.
///
/// Use this to quickly get a new ULID as a string.
///
/// This function is thread-safe; multiple threads in a process can call it concurrently without
/// breaking the monotonic order of generated IDs. On Unix, this function resets the generator
/// state when the process ID changes (i.e., upon forks) to avoid collisions across processes.
///
/// # Panics
///
/// Panics under the same conditions as [`new`].
///
/// # Examples
///
/// ```rust
/// let x = ulid128::new_string(); // e.g., "01KZS1ZT037TRMCT2JAYYXCG7V"
///
/// assert!(regex::Regex::new(r"^[0-7][0-9A-HJKMNP-TV-Z]{25}$").unwrap().is_match(&x));
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]
pub fn new_string() -> String {
    new().into()
}

#[cfg(unix)]
mod unix_fork_safety {
    use super::{Ulid, UlidGenerator};
    use crate::generator::GeneratorError;
    use std::process;

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon process forks).
    #[derive(Debug)]
    pub struct ProcessLocalGenerator {
        gen: UlidGenerator,
        pid: u32,
    }

    impl Default for ProcessLocalGenerator {
        fn default() -> Self {
            Self {
                gen: Default::default(),
                pid: process::id(),
            }
        }
    }

    impl ProcessLocalGenerator {
        pub fn generate(&mut self) -> Result<Ulid, GeneratorError> {
            let pid = process::id();
            if pid != self.pid {
                self.gen = Default::default();
                self.pid = pid;
            }
            self.gen.generate()
        }
    }
}
