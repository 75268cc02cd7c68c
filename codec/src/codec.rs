//! Serialization traits
//!
//! All multi-byte values are little endian. Fields are written in declaration order with no
//! padding, so a type's encoding is fully described by its field list.

pub use crate::error::Error;

/// A type with a wire size known at compile time.
pub trait FixedSize: Sized {
    const SIZE: usize;
}

/// A type with a wire representation.
pub trait Type: Sized {
    /// Encoded size in bytes.
    fn size(&self) -> usize;
}

/// A type that can be written into a byte slice.
///
/// `dest` is exactly [`Type::size`] bytes long when called through a
/// [`WriteCursor`](crate::cursor::WriteCursor).
pub trait Encode: Type {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error>;
}

/// A type that can be read from the front of a byte slice, possibly borrowing from it.
///
/// Implementations must fail with [`Error::InvalidLength`] when `src` is too short and must
/// consume exactly [`Type::size`] bytes of the decoded value.
pub trait Decode<'d>: Type {
    fn decode(src: &'d [u8]) -> Result<Self, Error>;
}

impl<T: FixedSize> Type for T {
    fn size(&self) -> usize {
        Self::SIZE
    }
}

impl FixedSize for () {
    const SIZE: usize = 0;
}

impl Encode for () {
    fn encode(&self, _dest: &mut [u8]) -> Result<(), Error> {
        Ok(())
    }
}

impl Decode<'_> for () {
    fn decode(_src: &[u8]) -> Result<Self, Error> {
        Ok(())
    }
}

/// Implements [`Type`], [`Encode`] and [`Decode`] for a struct by walking its fields in order.
macro_rules! impl_codec {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::codec::Type for $ty {
            fn size(&self) -> usize {
                0 $(+ $crate::codec::Type::size(&self.$field))*
            }
        }

        impl $crate::codec::Encode for $ty {
            fn encode(&self, dest: &mut [u8]) -> Result<(), $crate::codec::Error> {
                #[allow(unused_mut, unused_variables)]
                let mut w = $crate::cursor::WriteCursor::new(dest);
                $(w.write_ref(&self.$field)?;)*
                Ok(())
            }
        }

        impl<'d> $crate::codec::Decode<'d> for $ty {
            fn decode(src: &'d [u8]) -> Result<Self, $crate::codec::Error> {
                #[allow(unused_mut, unused_variables)]
                let mut r = $crate::cursor::ReadCursor::new(src);
                Ok(Self {
                    $($field: r.read()?,)*
                })
            }
        }
    };
    ($ty:ident<$lt:lifetime> { $($field:ident),* $(,)? }) => {
        impl<$lt> $crate::codec::Type for $ty<$lt> {
            fn size(&self) -> usize {
                0 $(+ $crate::codec::Type::size(&self.$field))*
            }
        }

        impl<$lt> $crate::codec::Encode for $ty<$lt> {
            fn encode(&self, dest: &mut [u8]) -> Result<(), $crate::codec::Error> {
                #[allow(unused_mut, unused_variables)]
                let mut w = $crate::cursor::WriteCursor::new(dest);
                $(w.write_ref(&self.$field)?;)*
                Ok(())
            }
        }

        impl<$lt> $crate::codec::Decode<$lt> for $ty<$lt> {
            fn decode(src: &$lt [u8]) -> Result<Self, $crate::codec::Error> {
                #[allow(unused_mut, unused_variables)]
                let mut r = $crate::cursor::ReadCursor::new(src);
                Ok(Self {
                    $($field: r.read()?,)*
                })
            }
        }
    };
}

pub(crate) use impl_codec;
