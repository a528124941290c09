//! The document facade: one buffer plus the tree decoded from it.

use std::ops::Deref;

use crate::{
    DecodeConfig, Error, Number, Result, Tag,
    decode::decode,
    value::Value,
    write::write_scalar,
};

/// A decoded NBT document that owns its backing buffer.
///
/// Reads go through the tree. Writes patch the buffer in place, so
/// [`buffer`](Self::buffer) always holds the encoded form of the current
/// tree and can be handed to a compressor as is.
///
/// # Example
///
/// ```
/// use nbt_inplace::NbtDocument;
///
/// let data = vec![10, 0, 0, 1, 0, 1, b'A', 5, 0];
/// let mut doc = NbtDocument::decode(data).unwrap();
///
/// assert_eq!(doc.get(&["A"]).unwrap().value().as_byte(), Some(5));
///
/// doc.set_value(&["A"], 200u8).unwrap();
/// assert_eq!(doc.buffer(), &[10, 0, 0, 1, 0, 1, b'A', 200, 0]);
/// ```
#[derive(Clone, Debug)]
pub struct NbtDocument {
    buffer: Vec<u8>,
    root: Tag,
}

impl NbtDocument {
    /// Decodes `buffer` with the default [`DecodeConfig`].
    pub fn decode(buffer: Vec<u8>) -> Result<Self> {
        Self::decode_with(buffer, &DecodeConfig::default())
    }

    pub fn decode_with(buffer: Vec<u8>, config: &DecodeConfig) -> Result<Self> {
        let root = decode(&buffer, config)?;
        tracing::debug!(
            bytes = buffer.len(),
            root_name = root.name(),
            "decoded NBT document"
        );
        Ok(Self { buffer, root })
    }

    /// The root compound.
    #[inline]
    pub fn root(&self) -> &Tag {
        &self.root
    }

    /// Walks compound children by name, starting below the root.
    /// An empty path yields the root itself.
    pub fn get(&self, path: &[&str]) -> Option<&Tag> {
        path.iter().try_fold(&self.root, |tag, name| tag.get(name))
    }

    pub fn root_mut(&mut self) -> TagMut<'_> {
        TagMut {
            tag: &mut self.root,
            buffer: &mut self.buffer,
        }
    }

    pub fn get_mut(&mut self, path: &[&str]) -> Option<TagMut<'_>> {
        path.iter()
            .try_fold(self.root_mut(), |tag, name| tag.child(name))
    }

    /// Overwrites the value at `path` in place.
    pub fn set_value(&mut self, path: &[&str], value: impl Into<Number>) -> Result<()> {
        let mut tag = self
            .get_mut(path)
            .ok_or_else(|| Error::TagNotFound(path.join("/")))?;
        tag.set_value(value)
    }

    /// The live buffer, including every write made so far.
    #[inline]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }

    #[cfg(feature = "shared")]
    pub fn into_bytes(self) -> bytes::Bytes {
        bytes::Bytes::from(self.buffer)
    }
}

/// Mutable access to one tag of a document.
///
/// Holds the document buffer alongside the tag so a write can patch both.
/// Dereferences to [`Tag`] for reading.
pub struct TagMut<'a> {
    tag: &'a mut Tag,
    buffer: &'a mut [u8],
}

impl<'a> TagMut<'a> {
    /// Descends into a named child of a compound.
    pub fn child(self, name: &str) -> Option<TagMut<'a>> {
        let TagMut { tag, buffer } = self;
        let child = tag.value.as_compound_mut()?.get_mut(name)?;
        Some(TagMut { tag: child, buffer })
    }

    /// Descends into the named child of the compound stored at `index` of a
    /// list of compounds.
    pub fn entry(self, index: usize, name: &str) -> Option<TagMut<'a>> {
        let TagMut { tag, buffer } = self;
        let Value::Compound(compound) = tag.value.as_list_mut()?.items.get_mut(index)? else {
            return None;
        };
        let child = compound.get_mut(name)?;
        Some(TagMut { tag: child, buffer })
    }

    /// Overwrites this tag's value in the buffer and in the tree.
    ///
    /// Fails with [`Error::UnsupportedMutation`] unless the tag is Byte,
    /// Short, Int, Float or Double, and with [`Error::InvalidValue`] when the
    /// value is outside the tag's domain. Nothing changes on failure.
    pub fn set_value(&mut self, value: impl Into<Number>) -> Result<()> {
        write_scalar(self.buffer, self.tag, value.into())
    }
}

impl Deref for TagMut<'_> {
    type Target = Tag;

    fn deref(&self) -> &Tag {
        &*self.tag
    }
}
