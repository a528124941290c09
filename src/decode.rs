//! Recursive-descent decoder.
//!
//! One cursor walks the whole buffer. Every named tag records the cursor
//! position at the moment its value starts, which is what the in-place writer
//! later trusts to find the bytes again.

use zerocopy::{BigEndian, byteorder};

use crate::{Compound, Error, List, NbtString, Result, Tag, TagID, Value, value::latin1};

/// Default nesting limit for compounds and lists.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Upper bound on the elements reserved up front for one list.
const MAX_LIST_PREALLOC: usize = 1024;

/// Options that control decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Maximum nesting of compounds and lists, counting the root compound as
    /// one. `None` disables the check.
    pub max_depth: Option<usize>,
    /// Accept bytes after the root compound instead of failing with
    /// [`Error::TrailingData`].
    pub allow_trailing_data: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            allow_trailing_data: false,
        }
    }
}

impl DecodeConfig {
    /// No depth limit, matching files that nest arbitrarily deep.
    pub fn unbounded() -> Self {
        Self {
            max_depth: None,
            ..Self::default()
        }
    }
}

/// Decodes `buf` into its root compound tag.
pub(crate) fn decode(buf: &[u8], config: &DecodeConfig) -> Result<Tag> {
    let Some(&first) = buf.first() else {
        return Err(Error::TruncatedInput);
    };
    if first != TagID::Compound as u8 {
        return Err(Error::MalformedFormat(first));
    }

    let mut decoder = Decoder {
        buf,
        pos: 0,
        depth: 0,
        max_depth: config.max_depth,
    };
    let root = decoder
        .parse_tag()?
        .ok_or(Error::MalformedFormat(first))?;

    let remaining = buf.len() - decoder.pos;
    if remaining != 0 && !config.allow_trailing_data {
        return Err(Error::TrailingData(remaining));
    }
    Ok(root)
}

struct Decoder<'s> {
    buf: &'s [u8],
    pos: usize,
    depth: usize,
    max_depth: Option<usize>,
}

impl<'s> Decoder<'s> {
    fn take(&mut self, len: usize) -> Result<&'s [u8]> {
        let end = self.pos.checked_add(len).ok_or(Error::TruncatedInput)?;
        let bytes = self.buf.get(self.pos..end).ok_or(Error::TruncatedInput)?;
        self.pos = end;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    fn read_u16(&mut self) -> Result<u16> {
        Ok(byteorder::U16::<BigEndian>::from_bytes(self.take_array()?).get())
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(byteorder::U32::<BigEndian>::from_bytes(self.take_array()?).get())
    }

    fn read_tag_id(&mut self) -> Result<TagID> {
        TagID::try_from(self.read_u8()?)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        match self.max_depth {
            Some(limit) if self.depth > limit => Err(Error::DepthLimitExceeded(limit)),
            _ => Ok(()),
        }
    }

    /// Reads one full tag. Returns `None` for the End marker, which carries
    /// neither name nor value.
    fn parse_tag(&mut self) -> Result<Option<Tag>> {
        let id = self.read_tag_id()?;
        if id == TagID::End {
            return Ok(None);
        }
        let name = latin1(self.parse_raw_string()?);
        let raw_offset = self.pos;
        let value = self.parse_value(id)?;
        Ok(Some(Tag {
            id,
            name,
            raw_offset,
            value,
        }))
    }

    fn parse_value(&mut self, id: TagID) -> Result<Value> {
        Ok(match id {
            TagID::End => return Err(Error::UnknownTagType(TagID::End as u8)),
            TagID::Byte => Value::Byte(self.read_u8()?),
            TagID::Short => Value::Short(self.read_u16()?),
            TagID::Int => Value::Int(self.read_u32()?),
            TagID::Long => {
                let bytes = self.parse_byte_array(Some(8))?;
                let mut raw = [0u8; 8];
                raw.copy_from_slice(bytes);
                Value::Long(raw)
            }
            TagID::Float => {
                Value::Float(byteorder::F32::<BigEndian>::from_bytes(self.take_array()?).get())
            }
            TagID::Double => {
                Value::Double(byteorder::F64::<BigEndian>::from_bytes(self.take_array()?).get())
            }
            TagID::ByteArray => Value::ByteArray(self.parse_byte_array(None)?.to_vec()),
            TagID::String => Value::String(NbtString::from(self.parse_raw_string()?.to_vec())),
            TagID::List => Value::List(self.parse_list()?),
            TagID::Compound => Value::Compound(self.parse_compound()?),
        })
    }

    /// Reads a byte array. With an explicit `len` no prefix is consumed.
    fn parse_byte_array(&mut self, len: Option<usize>) -> Result<&'s [u8]> {
        let len = match len {
            Some(len) => len,
            None => self.read_u32()? as usize,
        };
        self.take(len)
    }

    fn parse_raw_string(&mut self) -> Result<&'s [u8]> {
        let len = self.read_u16()? as usize;
        self.take(len)
    }

    fn parse_list(&mut self) -> Result<List> {
        self.enter()?;
        let element = self.read_tag_id()?;
        let count = self.read_u32()? as usize;
        let remaining = self.buf.len() - self.pos;
        let mut items = Vec::with_capacity(list_capacity(element, count, remaining));
        for _ in 0..count {
            items.push(self.parse_value(element)?);
        }
        self.depth -= 1;
        Ok(List { element, items })
    }

    fn parse_compound(&mut self) -> Result<Compound> {
        self.enter()?;
        let mut compound = Compound::default();
        while let Some(tag) = self.parse_tag()? {
            compound.insert(tag);
        }
        self.depth -= 1;
        Ok(compound)
    }
}

/// Smallest number of bytes one list element of type `id` can occupy.
const fn min_encoded_width(id: TagID) -> usize {
    match id {
        TagID::End => 0,
        TagID::Byte | TagID::Compound => 1,
        TagID::Short | TagID::String => 2,
        TagID::Int | TagID::Float | TagID::ByteArray => 4,
        TagID::List => 5,
        TagID::Long | TagID::Double => 8,
    }
}

/// Elements to reserve for a list header declaring `count` elements.
///
/// The header count is untrusted: the reservation never exceeds what the
/// remaining input could hold, nor [`MAX_LIST_PREALLOC`].
fn list_capacity(element: TagID, count: usize, remaining: usize) -> usize {
    match min_encoded_width(element) {
        0 => 0,
        width => count.min(remaining / width).min(MAX_LIST_PREALLOC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_reads_exactly_eight_bytes() {
        let mut decoder = Decoder {
            buf: &[1, 2, 3, 4, 5, 6, 7, 8, 9],
            pos: 0,
            depth: 0,
            max_depth: None,
        };
        let value = decoder.parse_value(TagID::Long).unwrap();
        assert_eq!(value, Value::Long([1, 2, 3, 4, 5, 6, 7, 8]));
        assert_eq!(decoder.pos, 8);
    }

    #[test]
    fn explicit_byte_array_length_skips_prefix() {
        let mut decoder = Decoder {
            buf: &[0xAA, 0xBB, 0xCC],
            pos: 0,
            depth: 0,
            max_depth: None,
        };
        assert_eq!(decoder.parse_byte_array(Some(2)).unwrap(), &[0xAA, 0xBB]);
        assert_eq!(decoder.pos, 2);
    }

    #[test]
    fn empty_list_header_is_five_bytes() {
        let mut decoder = Decoder {
            buf: &[TagID::String as u8, 0, 0, 0, 0],
            pos: 0,
            depth: 0,
            max_depth: None,
        };
        let list = decoder.parse_list().unwrap();
        assert_eq!(list.element_id(), TagID::String);
        assert!(list.is_empty());
        assert_eq!(decoder.pos, 5);
    }

    #[test]
    fn list_reservation_is_bounded() {
        assert_eq!(list_capacity(TagID::Int, 3, 100), 3);
        assert_eq!(list_capacity(TagID::Int, u32::MAX as usize, 10), 2);
        assert_eq!(list_capacity(TagID::List, u32::MAX as usize, 4_000_000), MAX_LIST_PREALLOC);
        assert_eq!(list_capacity(TagID::End, u32::MAX as usize, 4_000_000), 0);
    }
}
