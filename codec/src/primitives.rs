use crate::codec::{Decode, Encode, Error, FixedSize, Type};

//
// Implementations for primitives
//
impl FixedSize for u8 {
    const SIZE: usize = 1;
}

impl FixedSize for i8 {
    const SIZE: usize = 1;
}

impl FixedSize for bool {
    const SIZE: usize = 1;
}

impl FixedSize for u16 {
    const SIZE: usize = 2;
}

impl FixedSize for u32 {
    const SIZE: usize = 4;
}

impl<const N: usize> FixedSize for [u8; N] {
    const SIZE: usize = N;
}

fn take<const N: usize>(src: &[u8]) -> Result<[u8; N], Error> {
    src.get(..N)
        .and_then(|b| b.try_into().ok())
        .ok_or(Error::InvalidLength)
}

fn put(dest: &mut [u8], bytes: &[u8]) -> Result<(), Error> {
    dest.get_mut(..bytes.len())
        .ok_or(Error::InvalidLength)?
        .copy_from_slice(bytes);
    Ok(())
}

impl Decode<'_> for u8 {
    fn decode(src: &[u8]) -> Result<Self, Error> {
        Ok(take::<1>(src)?[0])
    }
}

impl Decode<'_> for i8 {
    fn decode(src: &[u8]) -> Result<Self, Error> {
        Ok(i8::from_le_bytes(take(src)?))
    }
}

impl Decode<'_> for bool {
    fn decode(src: &[u8]) -> Result<Self, Error> {
        match take::<1>(src)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidParam),
        }
    }
}

impl Decode<'_> for u16 {
    fn decode(src: &[u8]) -> Result<Self, Error> {
        Ok(u16::from_le_bytes(take(src)?))
    }
}

impl Decode<'_> for u32 {
    fn decode(src: &[u8]) -> Result<Self, Error> {
        Ok(u32::from_le_bytes(take(src)?))
    }
}

impl<const N: usize> Decode<'_> for [u8; N] {
    fn decode(src: &[u8]) -> Result<Self, Error> {
        take(src)
    }
}

impl Encode for u8 {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
        put(dest, &[*self])
    }
}

impl Encode for i8 {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
        put(dest, &self.to_le_bytes())
    }
}

impl Encode for bool {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
        put(dest, &[*self as u8])
    }
}

impl Encode for u16 {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
        put(dest, &self.to_le_bytes())
    }
}

impl Encode for u32 {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
        put(dest, &self.to_le_bytes())
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
        put(dest, self)
    }
}

/// Variable-length data with a 16-bit length prefix, borrowed from the packet buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Value<'a>(pub &'a [u8]);

/// Variable-length data with an 8-bit length prefix, borrowed from the packet buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShortValue<'a>(pub &'a [u8]);

impl Type for Value<'_> {
    fn size(&self) -> usize {
        2 + self.0.len()
    }
}

impl Type for ShortValue<'_> {
    fn size(&self) -> usize {
        1 + self.0.len()
    }
}

impl Encode for Value<'_> {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
        let len = u16::try_from(self.0.len()).map_err(|_| Error::InvalidLength)?;
        len.encode(dest)?;
        put(&mut dest[2..], self.0)
    }
}

impl Encode for ShortValue<'_> {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
        let len = u8::try_from(self.0.len()).map_err(|_| Error::InvalidLength)?;
        len.encode(dest)?;
        put(&mut dest[1..], self.0)
    }
}

impl<'a> Decode<'a> for Value<'a> {
    fn decode(src: &'a [u8]) -> Result<Self, Error> {
        let len = u16::decode(src)? as usize;
        src.get(2..2 + len).map(Value).ok_or(Error::InvalidLength)
    }
}

impl<'a> Decode<'a> for ShortValue<'a> {
    fn decode(src: &'a [u8]) -> Result<Self, Error> {
        let len = u8::decode(src)? as usize;
        src.get(1..1 + len).map(ShortValue).ok_or(Error::InvalidLength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{ReadCursor, WriteCursor};

    #[test]
    fn little_endian_layout() {
        let mut buf = [0u8; 8];
        let mut w = WriteCursor::new(&mut buf);
        w.write(0xDEADBEEFu32).unwrap();
        w.write(-2i8).unwrap();
        w.write(true).unwrap();
        w.write([0x10u8, 0x20]).unwrap();
        assert_eq!(w.finish(), &[0xEF, 0xBE, 0xAD, 0xDE, 0xFE, 0x01, 0x10, 0x20]);
    }

    #[test]
    fn bool_rejects_out_of_range() {
        assert_eq!(bool::decode(&[2]), Err(Error::InvalidParam));
        assert!(!bool::decode(&[0]).unwrap());
    }

    #[test]
    fn short_source_is_invalid_length() {
        assert_eq!(u32::decode(&[1, 2, 3]), Err(Error::InvalidLength));
        assert_eq!(<[u8; 6]>::decode(&[0; 5]), Err(Error::InvalidLength));
        assert_eq!(u8::decode(&[]), Err(Error::InvalidLength));
    }

    #[test]
    fn value_borrows_payload() {
        let data = [0x03, 0x00, b'a', b'b', b'c', 0xFF];
        let mut r = ReadCursor::new(&data);
        let v: Value = r.read().unwrap();
        assert_eq!(v.0, b"abc");
        assert_eq!(r.available(), 1);
    }

    #[test]
    fn value_length_beyond_packet() {
        assert_eq!(Value::decode(&[0x05, 0x00, 1, 2]), Err(Error::InvalidLength));
        assert_eq!(ShortValue::decode(&[0x02, 1]), Err(Error::InvalidLength));
    }

    #[test]
    fn empty_value_is_just_a_length() {
        let mut buf = [0xFFu8; 4];
        let mut w = WriteCursor::new(&mut buf);
        w.write(ShortValue(&[])).unwrap();
        w.write(Value(&[])).unwrap();
        assert_eq!(w.finish(), &[0, 0, 0]);
    }
}
