//! Serial link framing.
//!
//! Every packet travels as `[len:u16][packet_type:u8][payload]`, where `len` counts the type
//! byte plus the payload. The frame carries no checksum.

use core::fmt;

use embedded_io::{ErrorKind, ReadExactError};
use embedded_io_async::{Read, Write};

use crate::config::MAX_PACKET_SIZE;
use crate::Error;

/// Frame header size in bytes.
pub const FRAME_HEADER_SIZE: usize = 3;

/// Kind of packet carried in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PacketType {
    /// Application to connectivity: serialized call.
    Command = 0,
    /// Connectivity to application: result of the last command.
    Response = 1,
    /// Connectivity to application: asynchronous SoftDevice event.
    Event = 2,
    DtmCommand = 3,
    DtmResponse = 4,
    /// Application to connectivity: reset the SoftDevice.
    ResetCommand = 5,
}

impl TryFrom<u8> for PacketType {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Command),
            1 => Ok(Self::Response),
            2 => Ok(Self::Event),
            3 => Ok(Self::DtmCommand),
            4 => Ok(Self::DtmResponse),
            5 => Ok(Self::ResetCommand),
            _ => Err(Error::InvalidParam),
        }
    }
}

/// Errors raised while moving frames over the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Underlying I/O failed.
    Io(ErrorKind),
    /// The frame was read completely but is malformed, oversized or of an unknown type.
    Codec(Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Io(kind) => write!(f, "transport error: {:?}", kind),
            TransportError::Codec(e) => write!(f, "frame error: {}", e),
        }
    }
}

impl From<Error> for TransportError {
    fn from(value: Error) -> Self {
        TransportError::Codec(value)
    }
}

/// Convert a ReadExactError to TransportError.
pub fn from_read_exact_error<E: embedded_io::Error>(e: ReadExactError<E>) -> TransportError {
    match e {
        ReadExactError::UnexpectedEof => TransportError::Io(ErrorKind::Other),
        ReadExactError::Other(e) => TransportError::Io(e.kind()),
    }
}

fn from_write_error<E: embedded_io::Error>(e: E) -> TransportError {
    TransportError::Io(e.kind())
}

/// Frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameHeader {
    pub packet_type: PacketType,
    /// Payload length, excluding the type byte.
    pub payload_len: u16,
}

impl FrameHeader {
    pub const fn new(packet_type: PacketType, payload_len: u16) -> Self {
        Self {
            packet_type,
            payload_len,
        }
    }

    /// Read a 3-byte frame header.
    ///
    /// A frame of unknown type has its payload skipped before [`Error::InvalidParam`] is
    /// returned, so the reader stays aligned on the next frame.
    pub async fn read<R: Read>(mut reader: R) -> Result<Self, TransportError> {
        let mut buf = [0; FRAME_HEADER_SIZE];
        reader.read_exact(&mut buf).await.map_err(from_read_exact_error)?;

        let len = u16::from_le_bytes([buf[0], buf[1]]);
        let payload_len = len.checked_sub(1).ok_or(Error::InvalidLength)?;
        match PacketType::try_from(buf[2]) {
            Ok(packet_type) => Ok(Self::new(packet_type, payload_len)),
            Err(e) => {
                skip(&mut reader, payload_len as usize).await?;
                Err(e.into())
            }
        }
    }

    /// Serialize this header as 3 bytes and write to the writer.
    ///
    /// Fails with [`Error::InvalidLength`] when `payload_len` leaves no room for the type byte.
    pub async fn write<W: Write>(&self, mut writer: W) -> Result<(), TransportError> {
        let len = self.payload_len.checked_add(1).ok_or(Error::InvalidLength)?.to_le_bytes();
        writer
            .write_all(&[len[0], len[1], self.packet_type as u8])
            .await
            .map_err(from_write_error)
    }
}

async fn skip<R: Read>(reader: &mut R, mut n: usize) -> Result<(), TransportError> {
    let mut scratch = [0u8; 16];
    while n > 0 {
        let chunk = n.min(scratch.len());
        reader
            .read_exact(&mut scratch[..chunk])
            .await
            .map_err(from_read_exact_error)?;
        n -= chunk;
    }
    Ok(())
}

/// A received frame. The payload borrows from the caller's buffer.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame<'b> {
    pub packet_type: PacketType,
    pub payload: &'b [u8],
}

/// Read one frame into `buf`.
///
/// Frames larger than `buf` or than [`MAX_PACKET_SIZE`] are consumed and rejected with
/// [`Error::InvalidLength`].
pub async fn read_frame<'b, R: Read>(mut reader: R, buf: &'b mut [u8]) -> Result<Frame<'b>, TransportError> {
    let header = FrameHeader::read(&mut reader).await?;
    let len = header.payload_len as usize;
    if len > buf.len() || len > MAX_PACKET_SIZE {
        warn!("[transport] dropping oversized frame of {} bytes", len);
        skip(&mut reader, len).await?;
        return Err(Error::InvalidLength.into());
    }
    let payload = &mut buf[..len];
    reader.read_exact(payload).await.map_err(from_read_exact_error)?;
    trace!("[transport] rx {:?} frame, {} bytes", header.packet_type, len);
    Ok(Frame {
        packet_type: header.packet_type,
        payload,
    })
}

/// Write one frame and flush the writer.
pub async fn write_frame<W: Write>(mut writer: W, packet_type: PacketType, payload: &[u8]) -> Result<(), TransportError> {
    if payload.len() > MAX_PACKET_SIZE {
        return Err(Error::InvalidLength.into());
    }
    let header = FrameHeader::new(packet_type, payload.len() as u16);
    header.write(&mut writer).await?;
    writer.write_all(payload).await.map_err(from_write_error)?;
    writer.flush().await.map_err(from_write_error)?;
    trace!("[transport] tx {:?} frame, {} bytes", packet_type, payload.len());
    Ok(())
}
