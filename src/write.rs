//! In-place overwrite of fixed-width values.
//!
//! Only Byte, Short, Int, Float and Double can be patched: their encoding has
//! a constant width, so the new bytes replace the old ones without moving
//! anything else in the buffer. Everything else is rejected.

use std::fmt;

use zerocopy::{BigEndian, byteorder};

use crate::{Error, Result, Tag, TagID, Value};

/// Operand of a write. Checked against the target tag's numeric domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($source:ty),* $(,)?) => {
        $(
            impl From<$source> for Number {
                fn from(value: $source) -> Self {
                    Number::$variant(<$wide>::from(value))
                }
            }
        )*
    };
}

number_from!(Int as i64: u8, u16, u32, i8, i16, i32, i64);
number_from!(Float as f64: f32, f64);

/// A value that can be written in place.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Scalar {
    Byte(u8),
    Short(u16),
    Int(u32),
    Float(f32),
    Double(f64),
}

impl Scalar {
    /// Writes the big-endian encoding at `offset`. Fails without touching
    /// `buffer` when the value would not fit.
    fn write_at(self, buffer: &mut [u8], offset: usize) -> Result<()> {
        let mut encoded = [0u8; 8];
        let width = match self {
            Scalar::Byte(v) => {
                encoded[0] = v;
                1
            }
            Scalar::Short(v) => put(&mut encoded, byteorder::U16::<BigEndian>::new(v).to_bytes()),
            Scalar::Int(v) => put(&mut encoded, byteorder::U32::<BigEndian>::new(v).to_bytes()),
            Scalar::Float(v) => put(&mut encoded, byteorder::F32::<BigEndian>::new(v).to_bytes()),
            Scalar::Double(v) => put(&mut encoded, byteorder::F64::<BigEndian>::new(v).to_bytes()),
        };
        let bytes = &encoded[..width];
        let end = offset.checked_add(bytes.len()).ok_or(Error::TruncatedInput)?;
        buffer
            .get_mut(offset..end)
            .ok_or(Error::TruncatedInput)?
            .copy_from_slice(bytes);
        Ok(())
    }
}

fn put<const N: usize>(encoded: &mut [u8; 8], bytes: [u8; N]) -> usize {
    encoded[..N].copy_from_slice(&bytes);
    N
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Byte(v) => Value::Byte(v),
            Scalar::Short(v) => Value::Short(v),
            Scalar::Int(v) => Value::Int(v),
            Scalar::Float(v) => Value::Float(v),
            Scalar::Double(v) => Value::Double(v),
        }
    }
}

/// Checks `number` against the domain of `id` and builds the new value.
fn coerce(id: TagID, number: Number) -> Result<Scalar> {
    let invalid = || Error::InvalidValue { tag: id, value: number };
    Ok(match (id, number) {
        (TagID::Byte, Number::Int(n)) => Scalar::Byte(u8::try_from(n).map_err(|_| invalid())?),
        (TagID::Short, Number::Int(n)) => Scalar::Short(u16::try_from(n).map_err(|_| invalid())?),
        (TagID::Int, Number::Int(n)) => Scalar::Int(u32::try_from(n).map_err(|_| invalid())?),
        (TagID::Byte | TagID::Short | TagID::Int, Number::Float(_)) => return Err(invalid()),
        (TagID::Float, Number::Int(n)) => Scalar::Float(n as f32),
        (TagID::Float, Number::Float(x)) => {
            if x.is_finite() && x.abs() > f64::from(f32::MAX) {
                return Err(invalid());
            }
            Scalar::Float(x as f32)
        }
        (TagID::Double, Number::Int(n)) => Scalar::Double(n as f64),
        (TagID::Double, Number::Float(x)) => Scalar::Double(x),
        (
            TagID::End
            | TagID::Long
            | TagID::ByteArray
            | TagID::String
            | TagID::List
            | TagID::Compound,
            _,
        ) => return Err(Error::UnsupportedMutation(id)),
    })
}

/// Overwrites `tag`'s value inside `buffer` and in the tree.
///
/// On error neither the buffer nor the tag is modified.
pub(crate) fn write_scalar(buffer: &mut [u8], tag: &mut Tag, number: Number) -> Result<()> {
    let scalar = coerce(tag.id, number)?;
    scalar.write_at(buffer, tag.raw_offset)?;

    tracing::trace!(
        tag_name = %tag.name,
        tag = tag.id.name(),
        offset = tag.raw_offset,
        %number,
        "patched value in place"
    );
    tag.value = Value::from(scalar);
    Ok(())
}
