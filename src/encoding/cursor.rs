//! # Big-Endian Byte Cursors
//!
//! This module provides the two cursor objects the binary engine walks
//! buffers with: [`Reader`] over a borrowed slice and [`Writer`] over a
//! growable owned buffer.
//!
//! ## Wire Contract
//!
//! | Type | Encoding |
//! |------|----------|
//! | u8/u16/u32/u64 | big-endian bytes |
//! | f32 | big-endian bytes of the IEEE-754 bit pattern |
//! | f64 | big-endian bytes of the IEEE-754 bit pattern |
//! | byte runs | verbatim |
//!
//! ## Error Handling
//!
//! Every read validates availability first and returns
//! [`Error::ShortRead`] on underrun; the cursor position does not advance
//! past a failed read. Writes append to an in-memory buffer and cannot
//! fail; the whole buffer is persisted only after an encode walk fully
//! succeeds.

use crate::error::{Error, Result};

/// Read cursor over a borrowed byte buffer.
#[derive(Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left in the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Consumes `len` bytes and returns them as a borrowed slice.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::short_read(len, self.remaining()));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(u8::from_be_bytes(self.read_array::<1>()?))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array::<2>()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array::<4>()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.read_array::<8>()?))
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_be_bytes(self.read_array::<1>()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.read_array::<2>()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_array::<4>()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.read_array::<8>()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.read_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(slice);
        Ok(array)
    }
}

/// Write cursor that appends big-endian bytes to an owned buffer.
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Writer { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Writer {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_in_order() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut r = Reader::new(&data);
        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_u16().unwrap(), 0x0203);
        assert_eq!(r.position(), 3);
        assert_eq!(r.remaining(), 2);
        assert_eq!(r.read_bytes(2).unwrap(), &[0x04, 0x05]);
        assert!(r.is_exhausted());
    }

    #[test]
    fn read_past_end_is_short_read() {
        let data = [0x01, 0x02];
        let mut r = Reader::new(&data);
        match r.read_u32() {
            Err(Error::ShortRead { needed, available }) => {
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
            }
            other => panic!("expected short read, got {:?}", other),
        }
        // failed read leaves the position untouched
        assert_eq!(r.position(), 0);
        assert_eq!(r.read_u16().unwrap(), 0x0102);
    }

    #[test]
    fn f32_uses_big_endian_bit_pattern() {
        let data = [0x42, 0x28, 0x00, 0x00];
        let mut r = Reader::new(&data);
        assert_eq!(r.read_f32().unwrap(), 42.0);

        let mut w = Writer::new();
        w.write_f32(42.0);
        assert_eq!(w.into_bytes(), data);
    }

    #[test]
    fn signed_reads_preserve_sign() {
        let mut w = Writer::new();
        w.write_i16(-2);
        w.write_i32(-70000);
        let bytes = w.into_bytes();
        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_i16().unwrap(), -2);
        assert_eq!(r.read_i32().unwrap(), -70000);
    }

    #[test]
    fn writer_appends_in_order() {
        let mut w = Writer::with_capacity(8);
        w.write_u8(0xAA);
        w.write_u16(0x0102);
        w.write_bytes(&[0xFF, 0xFE]);
        assert_eq!(w.len(), 5);
        assert!(!w.is_empty());
        assert_eq!(w.as_bytes(), &[0xAA, 0x01, 0x02, 0xFF, 0xFE]);
    }

    #[test]
    fn u64_roundtrip() {
        let mut w = Writer::new();
        w.write_u64(0x0102_0304_0506_0708);
        let bytes = w.into_bytes();
        assert_eq!(bytes, [1, 2, 3, 4, 5, 6, 7, 8]);
        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_u64().unwrap(), 0x0102_0304_0506_0708);
    }
}
