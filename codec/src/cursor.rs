//! Cursors over a byte slice.
//!
//! Every operation is bounds checked and the position never moves past the end of the slice.
//! A failed operation leaves the position where it was.

use crate::codec::{Decode, Encode, Error};

/// Not a byte writer. It is just a cursor to track where a byte slice is being written.
pub struct WriteCursor<'d> {
    pos: usize,
    data: &'d mut [u8],
}

impl<'d> WriteCursor<'d> {
    /// Creates a new write cursor at the beginning of the data.
    pub fn new(data: &'d mut [u8]) -> Self {
        Self { pos: 0, data }
    }

    /// Append byte slice
    pub fn append(&mut self, data: &[u8]) -> Result<(), Error> {
        if self.available() < data.len() {
            Err(Error::InvalidLength)
        } else {
            self.data[self.pos..self.pos + data.len()].copy_from_slice(data);
            self.pos += data.len();
            Ok(())
        }
    }

    /// Write a value
    pub fn write<E: Encode>(&mut self, data: E) -> Result<(), Error> {
        self.write_ref(&data)
    }

    /// Write a value by reference
    pub fn write_ref<E: Encode>(&mut self, data: &E) -> Result<(), Error> {
        let size = data.size();
        if self.available() < size {
            Err(Error::InvalidLength)
        } else {
            data.encode(&mut self.data[self.pos..self.pos + size])?;
            self.pos += size;
            Ok(())
        }
    }

    /// Returns amount of bytes that remain available.
    pub fn available(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns the current length of the data written.
    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Returns the byte slice that was written by this cursor.
    pub fn finish(self) -> &'d mut [u8] {
        &mut self.data[..self.pos]
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadCursor<'d> {
    pos: usize,
    data: &'d [u8],
}

impl<'d> ReadCursor<'d> {
    pub fn new(data: &'d [u8]) -> Self {
        Self { pos: 0, data }
    }

    /// Read a value, borrowing from the underlying slice where the type allows.
    pub fn read<T: Decode<'d>>(&mut self) -> Result<T, Error> {
        let src = &self.data[self.pos..];
        let val = T::decode(src)?;
        let size = val.size();
        if size > src.len() {
            return Err(Error::InvalidLength);
        }
        self.pos += size;
        Ok(val)
    }

    /// Borrow the next `nbytes` bytes.
    pub fn slice(&mut self, nbytes: usize) -> Result<&'d [u8], Error> {
        if self.available() < nbytes {
            Err(Error::InvalidLength)
        } else {
            let src = &self.data[self.pos..self.pos + nbytes];
            self.pos += nbytes;
            Ok(src)
        }
    }

    pub fn available(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    pub fn remaining(self) -> &'d [u8] {
        &self.data[self.pos..]
    }

    /// Ends decoding, failing if any bytes were left unread.
    pub fn finish(self) -> Result<(), Error> {
        if self.available() > 0 {
            Err(Error::InvalidLength)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_advances_and_reports_length() {
        let mut buf = [0u8; 8];
        let mut w = WriteCursor::new(&mut buf);
        w.write(0x0102u16).unwrap();
        w.write(0x03u8).unwrap();
        w.append(&[0x04, 0x05]).unwrap();
        assert_eq!(w.len(), 5);
        assert_eq!(w.available(), 3);
        assert_eq!(w.finish(), &[0x02, 0x01, 0x03, 0x04, 0x05]);
    }

    #[test]
    fn write_past_end_leaves_cursor_in_place() {
        let mut buf = [0xAAu8; 3];
        let mut w = WriteCursor::new(&mut buf);
        w.write(0x11u16).unwrap();
        assert_eq!(w.write(0x2233u16), Err(Error::InvalidLength));
        assert_eq!(w.append(&[1, 2]), Err(Error::InvalidLength));
        assert_eq!(w.len(), 2);
        assert_eq!(buf[2], 0xAA);
    }

    #[test]
    fn write_into_empty_buffer() {
        let mut buf = [0u8; 0];
        let mut w = WriteCursor::new(&mut buf);
        assert_eq!(w.write(0u8), Err(Error::InvalidLength));
        assert!(w.is_empty());
    }

    #[test]
    fn read_past_end_leaves_cursor_in_place() {
        let data = [0x01, 0x02, 0x03];
        let mut r = ReadCursor::new(&data);
        assert_eq!(r.read::<u16>().unwrap(), 0x0201);
        assert_eq!(r.read::<u16>(), Err(Error::InvalidLength));
        assert_eq!(r.len(), 2);
        assert_eq!(r.read::<u8>().unwrap(), 0x03);
        assert_eq!(r.read::<u8>(), Err(Error::InvalidLength));
        r.finish().unwrap();
    }

    #[test]
    fn slice_borrows_from_source() {
        let data = [1, 2, 3, 4];
        let mut r = ReadCursor::new(&data);
        let head = r.slice(3).unwrap();
        assert_eq!(head, &[1, 2, 3]);
        assert!(core::ptr::eq(head.as_ptr(), data.as_ptr()));
        assert_eq!(r.slice(2), Err(Error::InvalidLength));
        assert_eq!(r.clone().remaining(), &[4]);
        assert_eq!(r.finish(), Err(Error::InvalidLength));
    }
}
