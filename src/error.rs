//! Error types for decoding and patching NBT data.
//!
//! Decoding is all-or-nothing: any [`Error`] returned from
//! [`NbtDocument::decode`](crate::NbtDocument::decode) means no tree was
//! produced. Write errors leave the buffer untouched.
//!
//! # Example
//!
//! ```
//! use nbt_inplace::{Error, NbtDocument};
//!
//! match NbtDocument::decode(vec![0x01, 0x00, 0x00, 0x05]) {
//!     Err(Error::MalformedFormat(tag)) => assert_eq!(tag, 0x01),
//!     _ => unreachable!(),
//! }
//! ```

use std::fmt::{self, Display};

use crate::{Number, TagID};

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the codec can report.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The root tag is not a compound. Carries the root type byte.
    MalformedFormat(u8),

    /// A type byte outside `0..=10` was encountered, or a list declared
    /// End elements with a non-zero count.
    UnknownTagType(u8),

    /// The input ended unexpectedly.
    ///
    /// This error occurs when the NBT data is truncated or incomplete.
    /// For example, if a compound tag declares a string field but the data
    /// ends before the string content.
    TruncatedInput,

    /// Extra bytes remain after the root compound was closed.
    TrailingData(usize),

    /// Nesting of compounds and lists exceeded the configured limit.
    DepthLimitExceeded(usize),

    /// The tag's value is not fixed-width and cannot be overwritten in place.
    UnsupportedMutation(TagID),

    /// The value does not fit the numeric domain of the target tag.
    InvalidValue { tag: TagID, value: Number },

    /// No tag exists at the requested path.
    TagNotFound(String),
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedFormat(tag) => write!(
                formatter,
                "invalid NBT file: root tag must be a compound, got {tag:#04x}"
            ),
            Error::UnknownTagType(tag) => write!(formatter, "invalid NBT tag type: {tag:#04x}"),
            Error::TruncatedInput => formatter.write_str("unexpected end of input"),
            Error::TrailingData(remaining_bytes) => write!(
                formatter,
                "trailing data after end of input: {remaining_bytes} bytes remaining"
            ),
            Error::DepthLimitExceeded(limit) => {
                write!(formatter, "nesting depth exceeds limit of {limit}")
            }
            Error::UnsupportedMutation(tag) => {
                write!(formatter, "writing {} is not supported", tag.name())
            }
            Error::InvalidValue { tag, value } => {
                write!(formatter, "value {value} does not fit in {}", tag.name())
            }
            Error::TagNotFound(path) => write!(formatter, "no tag at path {path:?}"),
        }
    }
}

impl std::error::Error for Error {}
