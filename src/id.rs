#[cfg(not(feature = "std"))]
use core as std;

use crate::{MAX_RANDOMNESS, MAX_TIMESTAMP};
use fstr::FStr;
use std::{error, fmt, str};

/// Digit characters used in the Crockford Base32 notation.
const DIGITS: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// An O(1) map from ASCII code points to Base32 digit values.
///
/// Both uppercase and lowercase letters decode to the same values; I, L, O, and U are not part of
/// the alphabet and map to 0xff like any other invalid code point.
const DECODE_MAP: [u8; 256] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x11, 0xff, 0x12, 0x13, 0xff, 0x14, 0x15, 0xff,
    0x16, 0x17, 0x18, 0x19, 0x1a, 0xff, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x11, 0xff, 0x12, 0x13, 0xff, 0x14, 0x15, 0xff,
    0x16, 0x17, 0x18, 0x19, 0x1a, 0xff, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
];

/// Represents a ULID and provides converters and comparison operators.
///
/// A ULID packs a 48-bit Unix millisecond timestamp and 80 bits of randomness into 128 bits;
/// the canonical textual form is 26 Crockford Base32 digits. Comparison on the binary form, the
/// 128-bit integer form, and the canonical string form all produce the same order.
///
/// # Examples
///
/// ```rust
/// use ulid128::Ulid;
///
/// let x = "01KZS1ZT037TRMCT2JAYYXCG7V".parse::<Ulid>()?;
/// assert_eq!(x.to_string(), "01KZS1ZT037TRMCT2JAYYXCG7V");
///
/// let y = Ulid::from(0x019ff21fe8033eb146685257bdd640fbu128);
/// assert_eq!(y.to_u128(), 0x019ff21fe8033eb146685257bdd640fbu128);
/// # Ok::<(), ulid128::ParseError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[repr(transparent)]
pub struct Ulid([u8; 16]);

impl Ulid {
    /// The smallest ULID: zero timestamp, zero randomness (`"00000000000000000000000000"`).
    pub const MIN: Self = Self([0x00; 16]);

    /// The largest ULID: all 128 bits set (`"7ZZZZZZZZZZZZZZZZZZZZZZZZZ"`).
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates an object from a 128-bit unsigned integer.
    pub const fn from_u128(int_value: u128) -> Self {
        Self(int_value.to_be_bytes())
    }

    /// Returns the 128-bit unsigned integer representation.
    pub const fn to_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// Creates an object from a 16-byte big-endian byte array.
    pub const fn from_bytes(array_value: [u8; 16]) -> Self {
        Self(array_value)
    }

    /// Returns the big-endian byte array representation.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Returns a reference to the big-endian byte array representation.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates an object from field values.
    ///
    /// The timestamp occupies bytes 0..6 of the binary representation (most significant byte
    /// first) and the randomness occupies bytes 6..16.
    ///
    /// # Panics
    ///
    /// Panics if any argument is out of the value range of the field.
    pub const fn from_fields(timestamp: u64, randomness: u128) -> Self {
        if timestamp > MAX_TIMESTAMP || randomness > MAX_RANDOMNESS {
            panic!("invalid field value");
        } else {
            Self::from_u128(((timestamp as u128) << 80) | randomness)
        }
    }

    /// Returns the 48-bit `timestamp` field value: milliseconds since the Unix epoch.
    pub const fn timestamp(&self) -> u64 {
        (self.to_u128() >> 80) as u64
    }

    /// Returns the 80-bit `randomness` field value.
    pub const fn randomness(&self) -> u128 {
        self.to_u128() & MAX_RANDOMNESS
    }

    /// Returns the smallest ULID having the specified `timestamp` field value.
    ///
    /// Together with [`Ulid::max_for`], this is useful to build the endpoints of a range query
    /// over ULID-keyed records created within a known time window.
    ///
    /// # Panics
    ///
    /// Panics if the argument is out of the value range of the field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid128::Ulid;
    ///
    /// let lower = Ulid::min_for(0x019ff21fe803);
    /// let upper = Ulid::max_for(0x019ff21fe803);
    /// assert!(lower < upper);
    /// assert_eq!(lower.timestamp(), upper.timestamp());
    /// ```
    pub const fn min_for(timestamp: u64) -> Self {
        Self::from_fields(timestamp, 0)
    }

    /// Returns the largest ULID having the specified `timestamp` field value.
    ///
    /// # Panics
    ///
    /// Panics if the argument is out of the value range of the field.
    pub const fn max_for(timestamp: u64) -> Self {
        Self::from_fields(timestamp, MAX_RANDOMNESS)
    }

    /// Creates an object from a 26-digit string representation.
    ///
    /// Both uppercase and lowercase Base32 digits are accepted; I, L, O, and U are rejected as
    /// invalid digits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid128::Ulid;
    ///
    /// let x = Ulid::try_from_str("01kzs1zt037trmct2jayyxcg7v")?;
    /// let y = "01KZS1ZT037TRMCT2JAYYXCG7V".parse::<Ulid>()?;
    /// assert_eq!(x, y);
    /// # Ok::<(), ulid128::ParseError>(())
    /// ```
    pub const fn try_from_str(str_value: &str) -> Result<Self, ParseError> {
        if str_value.len() != 26 {
            return Err(ParseError::invalid_length(str_value.len()));
        }

        let mut int_value = 0u128;
        let mut i = 0;
        while i < 26 {
            let n = DECODE_MAP[str_value.as_bytes()[i] as usize];
            if n == 0xff {
                return Err(ParseError::invalid_digit(str_value, i));
            }
            // 26 digits hold 130 bits; the first digit must fit in the two's spare bits
            if i == 0 && n > 0x07 {
                return Err(ParseError::out_of_u128_range());
            }
            int_value = (int_value << 5) | n as u128;
            i += 1;
        }
        Ok(Self::from_u128(int_value))
    }

    /// Returns the 26-digit canonical string representation stored in a stack-allocated
    /// string-like type that can be handled like [`String`] through common traits.
    ///
    /// The canonical form uses the uppercase alphabet only.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid128::Ulid;
    ///
    /// let x = "01kzs1zt037trmct2jayyxcg7v".parse::<Ulid>()?;
    /// let y = x.encode();
    /// assert_eq!(y, "01KZS1ZT037TRMCT2JAYYXCG7V");
    /// assert_eq!(format!("{}", y), "01KZS1ZT037TRMCT2JAYYXCG7V");
    /// # Ok::<(), ulid128::ParseError>(())
    /// ```
    pub const fn encode(&self) -> FStr<26> {
        let int_value = self.to_u128();
        let mut dst = [0u8; 26];
        let mut i = 0;
        while i < dst.len() {
            // 5 bits per digit, MSB first; the first digit carries only the top 3 bits
            dst[i] = DIGITS[(int_value >> (125 - i * 5)) as usize & 0x1f];
            i += 1;
        }

        // SAFETY: All bytes in `dst` are valid ASCII characters.
        unsafe { FStr::from_inner_unchecked(dst) }
    }
}

impl From<u128> for Ulid {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<Ulid> for u128 {
    fn from(object: Ulid) -> Self {
        object.to_u128()
    }
}

impl From<[u8; 16]> for Ulid {
    /// Creates an object from a 16-byte big-endian byte array.
    fn from(value: [u8; 16]) -> Self {
        Self::from_bytes(value)
    }
}

impl From<Ulid> for [u8; 16] {
    /// Returns the big-endian byte array representation.
    fn from(object: Ulid) -> Self {
        object.to_bytes()
    }
}

impl AsRef<[u8]> for Ulid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl str::FromStr for Ulid {
    type Err = ParseError;

    /// Creates an object from a 26-digit string representation.
    fn from_str(str_value: &str) -> Result<Self, Self::Err> {
        Self::try_from_str(str_value)
    }
}

impl fmt::Display for Ulid {
    /// Returns the 26-digit canonical string representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulid128::Ulid;
    ///
    /// let x = "01KZS1ZT06QJ4J7E61X4WJ8NPY".parse::<Ulid>()?;
    /// assert_eq!(format!("{}", x), "01KZS1ZT06QJ4J7E61X4WJ8NPY");
    /// assert_eq!(format!("{:32}", x), "01KZS1ZT06QJ4J7E61X4WJ8NPY      ");
    /// assert_eq!(format!("{:->32}", x), "------01KZS1ZT06QJ4J7E61X4WJ8NPY");
    /// assert_eq!(format!("{:.^8.6}", x), ".01KZS1.");
    /// # Ok::<(), ulid128::ParseError>(())
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.encode().as_str(), f)
    }
}

/// An error parsing an invalid string representation of ULID.
#[derive(Clone, Debug)]
pub struct ParseError {
    kind: ParseErrorKind,
}

#[derive(Clone, Eq, PartialEq, Debug)]
enum ParseErrorKind {
    InvalidLength {
        n_bytes: usize,
    },
    InvalidDigit {
        /// Holds the invalid character as a UTF-8 byte array to work in the const context.
        utf8_char: [u8; 4],
        position: usize,
    },
    OutOfU128Range,
}

impl ParseError {
    /// Creates an `InvalidLength` variant from the actual length.
    const fn invalid_length(n_bytes: usize) -> Self {
        Self {
            kind: ParseErrorKind::InvalidLength { n_bytes },
        }
    }

    /// Creates an `InvalidDigit` variant from the entire string and the position of invalid digit.
    const fn invalid_digit(src: &str, position: usize) -> Self {
        const fn is_char_boundary(utf8_bytes: &[u8], index: usize) -> bool {
            match index {
                0 => true,
                i if i < utf8_bytes.len() => (utf8_bytes[i] as i8) >= -64,
                _ => index == utf8_bytes.len(),
            }
        }

        let bs = src.as_bytes();
        assert!(is_char_boundary(bs, position));
        let mut utf8_char = [bs[position], 0, 0, 0];

        let mut i = 1;
        while !is_char_boundary(bs, position + i) {
            utf8_char[i] = bs[position + i];
            i += 1;
        }

        Self {
            kind: ParseErrorKind::InvalidDigit {
                utf8_char,
                position,
            },
        }
    }

    /// Creates an `OutOfU128Range` variant.
    const fn out_of_u128_range() -> Self {
        Self {
            kind: ParseErrorKind::OutOfU128Range,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse string as ULID: ")?;
        match self.kind {
            ParseErrorKind::InvalidLength { n_bytes } => {
                write!(f, "invalid length: {} bytes (expected 26)", n_bytes)
            }
            ParseErrorKind::InvalidDigit {
                utf8_char,
                position,
            } => {
                let chr = str::from_utf8(&utf8_char).unwrap().chars().next().unwrap();
                write!(f, "invalid digit '{}' at {}", chr.escape_debug(), position)
            }
            ParseErrorKind::OutOfU128Range => write!(f, "out of 128-bit value range"),
        }
    }
}

impl error::Error for ParseError {}

#[cfg(feature = "std")]
mod with_std {
    use super::{ParseError, Ulid};

    impl TryFrom<String> for Ulid {
        type Error = ParseError;

        fn try_from(value: String) -> Result<Self, Self::Error> {
            Self::try_from_str(&value)
        }
    }

    impl From<Ulid> for String {
        fn from(object: Ulid) -> Self {
            object.encode().into()
        }
    }
}


#[cfg(feature = "serde")]
mod with_serde {
    use super::{Ulid, fmt, str};
    use serde::{Deserializer, Serializer, de};

    impl serde::Serialize for Ulid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Ulid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl de::Visitor<'_> for VisitorImpl {
        type Value = Ulid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a ULID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Self::Value::try_from_str(value).map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            match <[u8; 16]>::try_from(value) {
                Ok(array_value) => Ok(Self::Value::from_bytes(array_value)),
                Err(err) => match str::from_utf8(value) {
                    Ok(str_value) => self.visit_str(str_value),
                    _ => Err(de::Error::custom(err)),
                },
            }
        }

        fn visit_u128<E: de::Error>(self, value: u128) -> Result<Self::Value, E> {
            Ok(Self::Value::from_u128(value))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Ulid;
        use serde_test::{Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                (
                    "01KZS1ZT037TRMCT2JAYYXCG7V",
                    &[
                        1, 159, 242, 31, 232, 3, 62, 177, 70, 104, 82, 87, 189, 214, 64, 251,
                    ],
                ),
                (
                    "01KZS1ZT037TRMCT2JAYYXCG7W",
                    &[
                        1, 159, 242, 31, 232, 3, 62, 177, 70, 104, 82, 87, 189, 214, 64, 252,
                    ],
                ),
                (
                    "01KZS1ZT06QJ4J7E61X4WJ8NPY",
                    &[
                        1, 159, 242, 31, 232, 6, 188, 137, 35, 184, 193, 233, 57, 36, 86, 222,
                    ],
                ),
                (
                    "01KZS1ZT07QPEATF1DDMD3T7X7",
                    &[
                        1, 159, 242, 31, 232, 7, 189, 156, 173, 60, 45, 109, 26, 61, 31, 167,
                    ],
                ),
                (
                    "01KZS1ZT082S0RQ7946KJ6BRAG",
                    &[
                        1, 159, 242, 31, 232, 8, 22, 65, 139, 157, 36, 52, 228, 101, 225, 80,
                    ],
                ),
                (
                    "01KZS1ZT0910H6R0RHK6BJN139",
                    &[
                        1, 159, 242, 31, 232, 9, 8, 34, 108, 3, 17, 153, 151, 42, 132, 105,
                    ],
                ),
                (
                    "01KZS1ZT0A6ZW1FZ39B83T1JKE",
                    &[
                        1, 159, 242, 31, 232, 10, 55, 248, 23, 252, 105, 90, 7, 160, 202, 110,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Ulid>().unwrap();
                serde_test::assert_tokens(&e.readable(), &[Token::Str(text)]);
                serde_test::assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);

                // deserialize the other format regardless of human-readability configuration
                serde_test::assert_de_tokens(&e.readable(), &[Token::Bytes(bytes)]);
                serde_test::assert_de_tokens(&e.compact(), &[Token::Str(text)]);

                // deserialize textual representation even if passed as byte slice
                serde_test::assert_de_tokens(&e.readable(), &[Token::Bytes(text.as_bytes())]);
                serde_test::assert_de_tokens(&e.compact(), &[Token::Bytes(text.as_bytes())]);
            }
        }
    }
}
