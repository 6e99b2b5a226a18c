// Copyright 2024, The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A flat, little-endian parcel used to move rollback records across a process boundary.
//!
//! Primitives are written back to back without padding:
//!
//! * `i32` / `i64`: 4 / 8 bytes, little-endian.
//! * `bool`: a single byte, `0` or `1`.
//! * string: `i32` byte length (`-1` for null) followed by UTF-8 bytes.
//! * typed list: `i32` element count (`-1` for a null list), then each element prefixed with an
//!   `i32` presence marker.
//! * int array: `i32` count followed by the values.

use byteorder::{ByteOrder, LittleEndian};
use std::string::FromUtf8Error;
use thiserror::Error;

/// Length written in place of a null string or list.
const NULL_LENGTH: i32 = -1;
/// Marker preceding a present element of a typed list.
const ELEMENT_PRESENT: i32 = 1;
/// Marker written for a null element of a typed list.
const ELEMENT_NULL: i32 = 0;

/// Errors from decoding a parcel.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParcelError {
    /// The parcel ended before the field being read.
    #[error("Parcel truncated at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Offset of the field that could not be read.
        offset: usize,
        /// Number of bytes the field needs.
        needed: usize,
        /// Number of bytes left in the parcel.
        remaining: usize,
    },
    /// A length or count was negative and not the null marker.
    #[error("Invalid length {0}")]
    InvalidLength(i32),
    /// A boolean byte was neither 0 nor 1.
    #[error("Invalid boolean value {0:#04x}")]
    InvalidBool(u8),
    /// A typed list contained a null element.
    #[error("Null element at index {0}")]
    NullElement(usize),
    /// A required nested object was null.
    #[error("Null object at offset {0}")]
    NullObject(usize),
    /// A non-nullable string was null.
    #[error("Unexpected null string")]
    NullString,
    /// A string was not valid UTF-8.
    #[error("Invalid UTF-8 string: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
    /// An enumerated field held a value with no matching variant.
    #[error("Unknown {kind} value {value}")]
    UnknownValue {
        /// Name of the enumerated field.
        kind: &'static str,
        /// The value that was read.
        value: i32,
    },
    /// Bytes were left over after the top-level parcelable was read.
    #[error("{0} trailing bytes after parcelable")]
    TrailingData(usize),
}

/// Result type for parcel decoding.
pub type Result<T> = std::result::Result<T, ParcelError>;

/// A value that can be flattened into and recreated from a [`Parcel`].
pub trait Parcelable: Sized {
    /// Appends the fields of `self` to `out`.
    fn write_to_parcel(&self, out: &mut Parcel);

    /// Reads a value in the same field order as `write_to_parcel` wrote it.
    fn read_from_parcel(input: &mut ParcelReader) -> Result<Self>;
}

/// A growable buffer that parcelables are written into.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parcel {
    data: Vec<u8>,
}

impl Parcel {
    /// Creates an empty parcel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the parcel, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn write_i32(&mut self, value: i32) {
        let mut buf = [0; 4];
        LittleEndian::write_i32(&mut buf, value);
        self.data.extend_from_slice(&buf);
    }

    pub fn write_i64(&mut self, value: i64) {
        let mut buf = [0; 8];
        LittleEndian::write_i64(&mut buf, value);
        self.data.extend_from_slice(&buf);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.data.push(value as u8);
    }

    /// Writes a nullable string.
    pub fn write_string(&mut self, value: Option<&str>) {
        match value {
            Some(s) => {
                self.write_length(s.len());
                self.data.extend_from_slice(s.as_bytes());
            }
            None => self.write_i32(NULL_LENGTH),
        }
    }

    pub fn write_int_array(&mut self, values: &[i32]) {
        self.write_length(values.len());
        for value in values {
            self.write_i32(*value);
        }
    }

    /// Writes `value` preceded by a presence marker.
    pub fn write_typed_object<T: Parcelable>(&mut self, value: &T) {
        self.write_i32(ELEMENT_PRESENT);
        value.write_to_parcel(self);
    }

    /// Writes a count followed by every element as a typed object.
    pub fn write_typed_list<T: Parcelable>(&mut self, values: &[T]) {
        self.write_length(values.len());
        for value in values {
            self.write_typed_object(value);
        }
    }

    fn write_length(&mut self, len: usize) {
        debug_assert!(len <= i32::MAX as usize, "length {len} does not fit in a parcel");
        self.write_i32(i32::try_from(len).unwrap_or(i32::MAX));
    }
}

/// A cursor over the bytes of a parcel.
#[derive(Debug)]
pub struct ParcelReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ParcelReader<'a> {
    /// Starts reading `data` from the beginning.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.take(1)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            b => Err(ParcelError::InvalidBool(b)),
        }
    }

    /// Reads a nullable string.
    pub fn read_string(&mut self) -> Result<Option<String>> {
        let len = match self.read_length(1)? {
            Some(len) => len,
            None => return Ok(None),
        };
        let bytes = self.take(len)?;
        Ok(Some(String::from_utf8(bytes.to_vec())?))
    }

    /// Reads a string that must not be null.
    pub fn read_non_null_string(&mut self) -> Result<String> {
        self.read_string()?.ok_or(ParcelError::NullString)
    }

    /// Reads an int array. A null array reads as empty.
    pub fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let count = self.read_length(4)?.unwrap_or(0);
        (0..count).map(|_| self.read_i32()).collect()
    }

    /// Reads a presence marker followed by a `T`.
    pub fn read_typed_object<T: Parcelable>(&mut self) -> Result<Option<T>> {
        match self.read_i32()? {
            ELEMENT_PRESENT => Ok(Some(T::read_from_parcel(self)?)),
            ELEMENT_NULL => Ok(None),
            value => Err(ParcelError::UnknownValue { kind: "presence marker", value }),
        }
    }

    /// Reads a typed list. A null list reads as empty; null elements are rejected.
    pub fn read_typed_list<T: Parcelable>(&mut self) -> Result<Vec<T>> {
        let count = self.read_length(4)?.unwrap_or(0);
        let mut values = Vec::with_capacity(count);
        for index in 0..count {
            let value = self.read_typed_object()?.ok_or(ParcelError::NullElement(index))?;
            values.push(value);
        }
        Ok(values)
    }

    /// Fails if any bytes remain unread.
    pub fn finish(self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(ParcelError::TrailingData(n)),
        }
    }

    /// Reads a length prefix. `None` means null. A count whose elements (each at least
    /// `min_element_size` bytes) can't fit in what's left is reported as truncation before
    /// anything is allocated for it.
    fn read_length(&mut self, min_element_size: usize) -> Result<Option<usize>> {
        let offset = self.pos;
        let len = self.read_i32()?;
        if len == NULL_LENGTH {
            return Ok(None);
        }
        let len = usize::try_from(len).map_err(|_| ParcelError::InvalidLength(len))?;
        let needed = len.saturating_mul(min_element_size);
        if needed > self.remaining() {
            return Err(ParcelError::Truncated { offset, needed, remaining: self.remaining() });
        }
        Ok(Some(len))
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if remaining < n {
            return Err(ParcelError::Truncated { offset: self.pos, needed: n, remaining });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }
}

/// Flattens `value` into a new byte vector.
pub fn to_bytes<T: Parcelable>(value: &T) -> Vec<u8> {
    let mut parcel = Parcel::new();
    value.write_to_parcel(&mut parcel);
    parcel.into_bytes()
}

/// Recreates a `T` from `data`, which must hold exactly one encoded value.
pub fn from_bytes<T: Parcelable>(data: &[u8]) -> Result<T> {
    let mut reader = ParcelReader::new(data);
    let value = T::read_from_parcel(&mut reader)?;
    reader.finish()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_are_little_endian_and_unpadded() {
        let mut parcel = Parcel::new();
        parcel.write_i32(0x01020304);
        parcel.write_bool(true);
        parcel.write_i64(-2);
        assert_eq!(
            parcel.as_bytes(),
            &[0x04, 0x03, 0x02, 0x01, 0x01, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not fit in a parcel")]
    fn oversized_length_is_rejected() {
        Parcel::new().write_length(i32::MAX as usize + 1);
    }

    #[test]
    fn strings() {
        let mut parcel = Parcel::new();
        parcel.write_string(Some("com.android.foo"));
        parcel.write_string(None);
        parcel.write_string(Some(""));

        let mut reader = ParcelReader::new(parcel.as_bytes());
        assert_eq!(reader.read_string().unwrap().as_deref(), Some("com.android.foo"));
        assert_eq!(reader.read_string().unwrap(), None);
        assert_eq!(reader.read_non_null_string().unwrap(), "");
        reader.finish().unwrap();
    }

    #[test]
    fn null_string_where_required() {
        let mut parcel = Parcel::new();
        parcel.write_string(None);
        let mut reader = ParcelReader::new(parcel.as_bytes());
        assert_eq!(reader.read_non_null_string(), Err(ParcelError::NullString));
    }

    #[test]
    fn invalid_utf8() {
        let mut parcel = Parcel::new();
        parcel.write_i32(2);
        let mut bytes = parcel.into_bytes();
        bytes.extend_from_slice(&[0xc3, 0x28]);
        let mut reader = ParcelReader::new(&bytes);
        assert!(matches!(reader.read_string(), Err(ParcelError::InvalidUtf8(_))));
    }

    #[test]
    fn truncated_i32() {
        let mut reader = ParcelReader::new(&[1, 2, 3]);
        assert_eq!(
            reader.read_i32(),
            Err(ParcelError::Truncated { offset: 0, needed: 4, remaining: 3 })
        );
    }

    #[test]
    fn bool_must_be_zero_or_one() {
        let mut reader = ParcelReader::new(&[0, 1, 2]);
        assert_eq!(reader.read_bool(), Ok(false));
        assert_eq!(reader.read_bool(), Ok(true));
        assert_eq!(reader.read_bool(), Err(ParcelError::InvalidBool(2)));
    }

    #[test]
    fn negative_length_is_rejected() {
        let mut parcel = Parcel::new();
        parcel.write_i32(-5);
        let mut reader = ParcelReader::new(parcel.as_bytes());
        assert_eq!(reader.read_int_array(), Err(ParcelError::InvalidLength(-5)));
    }

    #[test]
    fn oversized_count_is_truncation() {
        let mut parcel = Parcel::new();
        parcel.write_i32(i32::MAX);
        parcel.write_i32(7);
        let mut reader = ParcelReader::new(parcel.as_bytes());
        assert!(matches!(
            reader.read_int_array(),
            Err(ParcelError::Truncated { offset: 0, remaining: 4, .. })
        ));
    }

    #[test]
    fn null_array_reads_as_empty() {
        let mut parcel = Parcel::new();
        parcel.write_i32(-1);
        let mut reader = ParcelReader::new(parcel.as_bytes());
        assert_eq!(reader.read_int_array(), Ok(vec![]));
    }

    #[test]
    fn int_array() {
        let mut parcel = Parcel::new();
        parcel.write_int_array(&[10, -20, 30]);
        let mut reader = ParcelReader::new(parcel.as_bytes());
        assert_eq!(reader.read_int_array(), Ok(vec![10, -20, 30]));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn trailing_bytes() {
        let reader = ParcelReader::new(&[0, 0]);
        assert_eq!(reader.finish(), Err(ParcelError::TrailingData(2)));
    }
}
