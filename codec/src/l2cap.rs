//! L2CAP calls.

use crate::codec::{impl_codec, Decode, Encode, Error, Type};
use crate::command::Request;
use crate::cursor::{ReadCursor, WriteCursor};
use crate::opcode::{opcodes, Opcode};
use crate::types::L2capHeader;

/// Register a channel id for application use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct L2capCidRegister {
    pub cid: u16,
}

impl_codec!(L2capCidRegister { cid });

impl Request for L2capCidRegister {
    const OPCODE: Opcode = opcodes::L2CAP_CID_REGISTER;
    type Output<'r> = ();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct L2capCidUnregister {
    pub cid: u16,
}

impl_codec!(L2capCidUnregister { cid });

impl Request for L2capCidUnregister {
    const OPCODE: Opcode = opcodes::L2CAP_CID_UNREGISTER;
    type Output<'r> = ();
}

/// Send an L2CAP packet on a registered channel.
///
/// On the wire the payload follows the header with no extra length prefix. `header.len` must
/// equal `data.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct L2capTx<'a> {
    pub conn_handle: u16,
    pub header: L2capHeader,
    pub data: &'a [u8],
}

impl Type for L2capTx<'_> {
    fn size(&self) -> usize {
        self.conn_handle.size() + self.header.size() + self.data.len()
    }
}

impl Encode for L2capTx<'_> {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
        if self.header.len as usize != self.data.len() {
            return Err(Error::InvalidParam);
        }
        let mut w = WriteCursor::new(dest);
        w.write(self.conn_handle)?;
        w.write_ref(&self.header)?;
        w.append(self.data)?;
        Ok(())
    }
}

impl<'a> Decode<'a> for L2capTx<'a> {
    fn decode(src: &'a [u8]) -> Result<Self, Error> {
        let mut r = ReadCursor::new(src);
        let conn_handle = r.read()?;
        let header: L2capHeader = r.read()?;
        let data = r.slice(header.len as usize)?;
        Ok(Self {
            conn_handle,
            header,
            data,
        })
    }
}

impl Request for L2capTx<'_> {
    const OPCODE: Opcode = opcodes::L2CAP_TX;
    type Output<'r> = ();
}
