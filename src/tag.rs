//! Tag type codes of the NBT wire format.

use crate::Error;

/// The type byte that prefixes every named tag and every list.
///
/// The numeric codes are fixed by the wire format and must not be reordered.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TagID {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
}

impl TagID {
    /// Number of bytes the value occupies in the buffer, for the types that
    /// can be overwritten in place.
    ///
    /// Long is eight bytes on the wire but is kept opaque, so it is not
    /// reported here.
    ///
    /// # Example
    ///
    /// ```
    /// use nbt_inplace::TagID;
    ///
    /// assert_eq!(TagID::Short.fixed_width(), Some(2));
    /// assert_eq!(TagID::Long.fixed_width(), None);
    /// assert_eq!(TagID::String.fixed_width(), None);
    /// ```
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Byte => Some(1),
            Self::Short => Some(2),
            Self::Int | Self::Float => Some(4),
            Self::Double => Some(8),
            Self::End
            | Self::Long
            | Self::ByteArray
            | Self::String
            | Self::List
            | Self::Compound => None,
        }
    }

    /// Returns `true` if values of this type may be overwritten in place.
    pub const fn is_writable(self) -> bool {
        self.fixed_width().is_some()
    }

    /// Returns `true` if this is a primitive tag type.
    ///
    /// Primitive tags are: Byte, Short, Int, Long, Float, Double.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::Float | Self::Double
        )
    }

    /// Returns `true` if this is a composite tag type (List, Compound).
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }

    /// Conventional name of the type, such as `"TAG_Compound"`, used in
    /// error messages and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "TAG_End",
            Self::Byte => "TAG_Byte",
            Self::Short => "TAG_Short",
            Self::Int => "TAG_Int",
            Self::Long => "TAG_Long",
            Self::Float => "TAG_Float",
            Self::Double => "TAG_Double",
            Self::ByteArray => "TAG_Byte_Array",
            Self::String => "TAG_String",
            Self::List => "TAG_List",
            Self::Compound => "TAG_Compound",
        }
    }
}

impl TryFrom<u8> for TagID {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            _ => return Err(Error::UnknownTagType(value)),
        })
    }
}

impl From<TagID> for u8 {
    fn from(id: TagID) -> Self {
        id as u8
    }
}
