//! Decoder for NBT (Named Binary Tag) data with in-place patching.
//!
//! [`NbtDocument`] decodes a big-endian NBT buffer into a tree of [`Tag`]s
//! while remembering where each value lives in the buffer. Fixed-width values
//! (Byte, Short, Int, Float, Double) can then be overwritten directly inside
//! that buffer, leaving every other byte untouched. Variable-length values
//! are read-only.
//!
//! ```
//! use nbt_inplace::{Error, NbtDocument, TagID};
//!
//! // Compound "" { Byte "A" = 5, String "S" = "hi" }
//! let data = vec![
//!     10, 0, 0,
//!     1, 0, 1, b'A', 5,
//!     8, 0, 1, b'S', 0, 2, b'h', b'i',
//!     0,
//! ];
//! let mut doc = NbtDocument::decode(data).unwrap();
//!
//! let a = doc.get(&["A"]).unwrap();
//! assert_eq!(a.id(), TagID::Byte);
//! assert_eq!(a.raw_offset(), 7);
//!
//! doc.set_value(&["A"], 42u8).unwrap();
//! assert_eq!(doc.buffer()[7], 42);
//!
//! assert_eq!(
//!     doc.set_value(&["S"], 1u8),
//!     Err(Error::UnsupportedMutation(TagID::String))
//! );
//! ```

mod decode;
mod document;
mod error;
#[cfg(feature = "level")]
pub mod level;
#[cfg(feature = "serde")]
mod ser;
mod tag;
mod value;
mod write;

pub use decode::{DEFAULT_MAX_DEPTH, DecodeConfig};
pub use document::{NbtDocument, TagMut};
pub use error::{Error, Result};
pub use tag::TagID;
pub use value::{Compound, List, NbtString, Tag, Value};
pub use write::Number;
