//! Tag value decoding.
//!
//! Values are stored either inline in the IFD entry (when the whole value
//! fits in 4 bytes) or at an offset relative to the TIFF header. Offsets come
//! straight from the file, so every out-of-line read is bounds-checked.

use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::error::{IoError, TiffError};
use crate::io::SliceReader;

use super::parser::{ByteOrder, IfdEntry};
use super::tags::FieldType;

/// Upper bound on the bytes surfaced for types without a typed decoding.
pub const MAX_RAW_VALUE_BYTES: u64 = 256;

/// Largest integer an f64 holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

// =============================================================================
// TagValue
// =============================================================================

/// A decoded tag value.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// ASCII text, cut at the first NUL byte
    Str(String),

    /// A single number (SHORT, LONG or RATIONAL with count 1)
    Num(f64),

    /// An ordered sequence of numbers
    NumSeq(Vec<f64>),

    /// Raw bytes for every other field type
    Bytes(Vec<u8>),

    /// The value could not be decoded
    Null,
}

impl TagValue {
    /// The value as a single number.
    ///
    /// A one-element sequence counts as a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::Num(n) => Some(*n),
            TagValue::NumSeq(values) if values.len() == 1 => Some(values[0]),
            _ => None,
        }
    }

    /// The value as a directory offset.
    ///
    /// Accepts a bare number or a one-element sequence holding a strictly
    /// positive integer that fits in 32 bits. Anything else means "no
    /// pointer".
    pub fn as_offset(&self) -> Option<u32> {
        self.as_f64()
            .filter(|n| n.is_finite() && *n > 0.0 && n.fract() == 0.0)
            .filter(|n| *n <= f64::from(u32::MAX))
            .map(|n| n as u32)
    }

    /// The value as text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a list of numbers; a single number becomes a list of one.
    pub fn to_numbers(&self) -> Option<Vec<f64>> {
        match self {
            TagValue::Num(n) => Some(vec![*n]),
            TagValue::NumSeq(values) => Some(values.clone()),
            _ => None,
        }
    }

    /// Whether decoding failed for this value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, TagValue::Null)
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", item)?;
            }
            Ok(())
        }

        match self {
            TagValue::Str(s) => f.write_str(s),
            TagValue::Num(n) => write!(f, "{}", n),
            TagValue::NumSeq(values) => join(f, values),
            TagValue::Bytes(bytes) => join(f, bytes),
            TagValue::Null => f.write_str("null"),
        }
    }
}

/// Integral values serialize as integers so that `6` stays `6` in JSON.
fn serialize_number<S: Serializer>(value: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

struct Number(f64);

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_number(self.0, serializer)
    }
}

impl Serialize for TagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagValue::Str(s) => serializer.serialize_str(s),
            TagValue::Num(n) => serialize_number(*n, serializer),
            TagValue::NumSeq(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(&Number(*value))?;
                }
                seq.end()
            }
            TagValue::Bytes(bytes) => {
                let mut seq = serializer.serialize_seq(Some(bytes.len()))?;
                for byte in bytes {
                    seq.serialize_element(byte)?;
                }
                seq.end()
            }
            TagValue::Null => serializer.serialize_unit(),
        }
    }
}

// =============================================================================
// ValueReader
// =============================================================================

/// Decodes IFD entry values out of one EXIF block.
#[derive(Debug, Clone, Copy)]
pub struct ValueReader<'a> {
    reader: SliceReader<'a>,
    base_offset: u64,
    byte_order: ByteOrder,
}

impl<'a> ValueReader<'a> {
    /// Create a new ValueReader.
    ///
    /// `base_offset` is the absolute position of the TIFF header; every
    /// value offset is relative to it.
    pub fn new(reader: SliceReader<'a>, base_offset: u64, byte_order: ByteOrder) -> Self {
        Self {
            reader,
            base_offset,
            byte_order,
        }
    }

    /// Locate `len` bytes of an entry's value.
    ///
    /// Inline values come from the entry itself, others from the buffer at
    /// `base_offset + value_offset`.
    fn value_bytes<'e>(&self, entry: &'e IfdEntry, len: u64) -> Result<&'e [u8], TiffError>
    where
        'a: 'e,
    {
        if entry.is_inline {
            // len <= 4 whenever the entry is inline
            return Ok(&entry.value_offset_bytes[..len as usize]);
        }

        let offset = self.base_offset + u64::from(entry.value_offset(self.byte_order));
        let len = usize::try_from(len).map_err(|_| IoError::RangeOutOfBounds {
            offset,
            requested: len,
            size: self.reader.size(),
        })?;

        Ok(self.reader.read_exact_at(offset, len)?)
    }

    /// Decode the value of an entry according to its field type.
    ///
    /// # Errors
    /// - `Io` if the value lies outside the buffer
    /// - `ZeroDenominator` for a single RATIONAL with a zero denominator
    pub fn decode(&self, entry: &IfdEntry) -> Result<TagValue, TiffError> {
        let total = entry.value_byte_size();
        let byte_order = self.byte_order;

        match entry.field_type {
            Some(FieldType::Ascii) => {
                let bytes = self.value_bytes(entry, total)?;
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                Ok(TagValue::Str(String::from_utf8_lossy(&bytes[..end]).into_owned()))
            }
            Some(FieldType::Short) => {
                let bytes = self.value_bytes(entry, total)?;
                let values = bytes
                    .chunks_exact(2)
                    .map(|chunk| f64::from(byte_order.read_u16(chunk)))
                    .collect();
                Ok(Self::single_or_sequence(entry.count, values))
            }
            Some(FieldType::Long) => {
                let bytes = self.value_bytes(entry, total)?;
                let values = bytes
                    .chunks_exact(4)
                    .map(|chunk| f64::from(byte_order.read_u32(chunk)))
                    .collect();
                Ok(Self::single_or_sequence(entry.count, values))
            }
            Some(FieldType::Rational) => {
                let bytes = self.value_bytes(entry, total)?;
                let mut rationals = bytes.chunks_exact(8).map(|chunk| {
                    let numerator = byte_order.read_u32(&chunk[0..4]);
                    let denominator = byte_order.read_u32(&chunk[4..8]);
                    rational(numerator, denominator)
                });

                if entry.count == 1 {
                    rationals
                        .next()
                        .flatten()
                        .map(TagValue::Num)
                        .ok_or(TiffError::ZeroDenominator)
                } else {
                    // Zero-denominator elements are dropped, not replaced
                    Ok(TagValue::NumSeq(rationals.flatten().collect()))
                }
            }
            _ => {
                let bytes = self.value_bytes(entry, total.min(MAX_RAW_VALUE_BYTES))?;
                Ok(TagValue::Bytes(bytes.to_vec()))
            }
        }
    }

    fn single_or_sequence(count: u32, mut values: Vec<f64>) -> TagValue {
        if count == 1 && values.len() == 1 {
            TagValue::Num(values.remove(0))
        } else {
            TagValue::NumSeq(values)
        }
    }
}

/// Divide a rational, refusing a zero denominator.
#[inline]
pub fn rational(numerator: u32, denominator: u32) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(f64::from(numerator) / f64::from(denominator))
    }
}

// =============================================================================
// Tests
// =============================================================================
