//! ULID: Universally Unique Lexicographically Sortable Identifier
//!
//! ```rust
//! # #[cfg(feature = "global_gen")]
//! # {
//! let x = ulid128::new();
//! println!("{}", x);              // e.g., "01KZS1ZT037TRMCT2JAYYXCG7V"
//! println!("{:?}", x.to_bytes()); // as 16-byte big-endian array
//!
//! let y = ulid128::new_string();
//! # }
//! ```
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           timestamp                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           timestamp           |          randomness           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          randomness                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          randomness                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `timestamp` field is dedicated to the Unix timestamp in milliseconds.
//! - The 80-bit `randomness` field is filled with a cryptographically strong random number
//!   whenever the `timestamp` changes and is incremented by one for each new ID generated within
//!   the same millisecond, which ensures the monotonic order of IDs generated within the same
//!   timestamp.
//!
//! The 128 bits are rendered as 26 digits of the Crockford Base32 alphabet
//! (`0123456789ABCDEFGHJKMNPQRSTVWXYZ`); the byte array, integer, and textual forms of an ID all
//! sort in the same order.
//!
//! In the rare circumstances where the system clock moves backward, the default generator
//! functions keep using the largest timestamp observed so far, preserving the increasing order of
//! generated IDs at the cost of timestamp accuracy. Use the `or_abort` generator flavors to treat
//! a backward clock as an error instead.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `global_gen` (implies `default_rng`): enables the primary [`new`] and [`new_string`]
//!   functions backed by the process-wide global generator.
//! - `default_rng` (implies `std`): enables [`UlidGenerator::new`] backed by the default
//!   cryptographically strong random number generator.
//! - `std`: enables the system clock as well as [`String`]-based conversion methods; without
//!   `std`, this crate provides limited functionality available under `no_std` environments.
//!
//! Optional features:
//!
//! - `serde`: enables serialization/deserialization via serde.
//! - `rand08`, `rand09`: enable the constructors that plug random number generators of the
//!   `rand` crate families into [`UlidGenerator`].
//! - `log`: enables a warning record when a generator observes a backward system clock.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{ParseError, Ulid};

pub mod generator;
pub use generator::UlidGenerator;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{new, new_string};

/// The maximum valid value of the 48-bit `timestamp` field.
pub const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

/// The maximum valid value of the 80-bit `randomness` field.
pub const MAX_RANDOMNESS: u128 = (1 << 80) - 1;
