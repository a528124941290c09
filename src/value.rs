//! The decoded tag tree.

use std::{borrow::Cow, fmt};

use indexmap::IndexMap;

use crate::TagID;

/// One named node of the tree.
///
/// Tags are only produced by the decoder. The recorded offset points at the
/// first byte of the value inside the document buffer, right after the type
/// byte and the name.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    pub(crate) id: TagID,
    pub(crate) name: String,
    pub(crate) raw_offset: usize,
    pub(crate) value: Value,
}

impl Tag {
    #[inline]
    pub fn id(&self) -> TagID {
        self.id
    }

    /// The tag name, one character per byte.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Offset of the value's first byte within the document buffer.
    #[inline]
    pub fn raw_offset(&self) -> usize {
        self.raw_offset
    }

    /// Looks up a direct child when this tag is a compound.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.value.as_compound()?.get(name)
    }
}

/// The payload of a tag or of a list element.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Byte(u8),
    Short(u16),
    Int(u32),
    /// Eight raw bytes; no numeric interpretation is applied.
    Long([u8; 8]),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(NbtString),
    List(List),
    Compound(Compound),
}

impl Value {
    pub fn id(&self) -> TagID {
        match self {
            Value::Byte(_) => TagID::Byte,
            Value::Short(_) => TagID::Short,
            Value::Int(_) => TagID::Int,
            Value::Long(_) => TagID::Long,
            Value::Float(_) => TagID::Float,
            Value::Double(_) => TagID::Double,
            Value::ByteArray(_) => TagID::ByteArray,
            Value::String(_) => TagID::String,
            Value::List(_) => TagID::List,
            Value::Compound(_) => TagID::Compound,
        }
    }

    pub fn as_byte(&self) -> Option<u8> {
        match self {
            Value::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<u16> {
        match self {
            Value::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<u32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long_bytes(&self) -> Option<&[u8; 8]> {
        match self {
            Value::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[u8]> {
        match self {
            Value::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&NbtString> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Value::Compound(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }
}

/// String payload as it appears on the wire.
///
/// The default rendering maps every byte to one character, so multi-byte
/// sequences show up as several Latin-1 characters. Use
/// [`decode_mutf8`](Self::decode_mutf8) when real text is required.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct NbtString {
    bytes: Vec<u8>,
}

impl NbtString {
    pub fn raw_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// One character per byte.
    ///
    /// # Example
    ///
    /// ```
    /// use nbt_inplace::NbtString;
    ///
    /// let s = NbtString::from(vec![0x57, 0xC3, 0xA9]);
    /// assert_eq!(s.decode(), "W\u{c3}\u{a9}");
    /// ```
    pub fn decode(&self) -> String {
        latin1(&self.bytes)
    }

    /// Lossy Modified UTF-8 decoding.
    pub fn decode_mutf8(&self) -> Cow<'_, str> {
        simd_cesu8::mutf8::decode_lossy(&self.bytes)
    }
}

impl From<Vec<u8>> for NbtString {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl fmt::Display for NbtString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bytes {
            fmt::Write::write_char(f, char::from(b))?;
        }
        Ok(())
    }
}

impl fmt::Debug for NbtString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.decode(), f)
    }
}

pub(crate) fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Named children of a compound, in decode order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound {
    pub(crate) entries: IndexMap<String, Tag>,
}

impl Compound {
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.entries.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Tag> {
        self.entries.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Inserts a decoded tag. A repeated name replaces the earlier tag but
    /// keeps its position.
    pub(crate) fn insert(&mut self, tag: Tag) {
        self.entries.insert(tag.name.clone(), tag);
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = indexmap::map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Unnamed values of one declared element type.
#[derive(Clone, Debug, PartialEq)]
pub struct List {
    pub(crate) element: TagID,
    pub(crate) items: Vec<Value>,
}

impl List {
    /// Element type as declared in the list header, kept even when empty.
    pub fn element_id(&self) -> TagID {
        self.element
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
