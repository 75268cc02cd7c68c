//! Request and response envelopes.
//!
//! A request is `[opcode][fields]`. A response is `[opcode][result_code:u32][outputs]`, where
//! the outputs are only present when the result code is [`NRF_SUCCESS`].

use crate::codec::{Decode, Encode, Error};
use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::nrf_error::NRF_SUCCESS;
use crate::opcode::Opcode;

/// Size of a response carrying no outputs: opcode plus result code.
pub const RSP_HEADER_SIZE: usize = 5;

/// A serialized SoftDevice call.
///
/// The request fields are given by the type's [`Encode`] impl. `Output` holds the extra
/// response fields returned on success, `()` when the call only returns a result code.
pub trait Request: Encode {
    const OPCODE: Opcode;
    type Output<'r>: Encode + Decode<'r>;
}

/// Decoded response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response<T> {
    /// The remote call returned `NRF_SUCCESS` with these outputs.
    Success(T),
    /// The remote call failed with this result code.
    Failed(u32),
}

impl<T> Response<T> {
    pub fn result_code(&self) -> u32 {
        match self {
            Response::Success(_) => NRF_SUCCESS,
            Response::Failed(code) => *code,
        }
    }

    pub fn into_result(self) -> Result<T, u32> {
        match self {
            Response::Success(value) => Ok(value),
            Response::Failed(code) => Err(code),
        }
    }
}

impl<T> From<Result<T, u32>> for Response<T> {
    fn from(value: Result<T, u32>) -> Self {
        match value {
            Ok(out) => Response::Success(out),
            Err(code) => Response::Failed(code),
        }
    }
}

/// Encode a request into `buf`, returning the number of bytes written.
pub fn req_enc<R: Request>(req: &R, buf: &mut [u8]) -> Result<usize, Error> {
    let mut w = WriteCursor::new(buf);
    w.write(R::OPCODE)?;
    w.write_ref(req)?;
    Ok(w.len())
}

/// Decode a request of type `R`. Variable-length fields borrow from `buf`.
pub fn req_dec<'a, R: Request + Decode<'a>>(buf: &'a [u8]) -> Result<R, Error> {
    let mut r = ReadCursor::new(buf);
    let opcode: Opcode = r.read()?;
    if opcode != R::OPCODE {
        return Err(Error::InvalidParam);
    }
    let req = r.read()?;
    r.finish()?;
    Ok(req)
}

/// Encode the response to a call of type `R`.
///
/// `output` is required when `result_code` is [`NRF_SUCCESS`] and ignored otherwise.
pub fn rsp_enc<R: Request>(result_code: u32, output: Option<&R::Output<'_>>, buf: &mut [u8]) -> Result<usize, Error> {
    let mut w = WriteCursor::new(buf);
    w.write(R::OPCODE)?;
    w.write(result_code)?;
    if result_code == NRF_SUCCESS {
        w.write_ref(output.ok_or(Error::Null)?)?;
    }
    Ok(w.len())
}

/// Decode the response to a call of type `R`.
///
/// `Ok` means the packet decoded; the remote outcome is carried by the [`Response`].
pub fn rsp_dec<'r, R: Request>(buf: &'r [u8]) -> Result<Response<R::Output<'r>>, Error> {
    let result_code = cmd_rsp_dec(buf.get(..RSP_HEADER_SIZE).unwrap_or(buf), R::OPCODE)?;
    let mut r = ReadCursor::new(&buf[RSP_HEADER_SIZE..]);
    if result_code != NRF_SUCCESS {
        r.finish()?;
        return Ok(Response::Failed(result_code));
    }
    let output = r.read()?;
    r.finish()?;
    Ok(Response::Success(output))
}

/// Decode a response that carries only a result code.
///
/// Fails with [`Error::InvalidLength`] when `buf` is not exactly [`RSP_HEADER_SIZE`] bytes and with
/// [`Error::InvalidParam`] when the opcode is not `expected`.
pub fn cmd_rsp_dec(buf: &[u8], expected: Opcode) -> Result<u32, Error> {
    let mut r = ReadCursor::new(buf);
    if r.available() < RSP_HEADER_SIZE {
        return Err(Error::InvalidLength);
    }
    let opcode: Opcode = r.read()?;
    if opcode != expected {
        return Err(Error::InvalidParam);
    }
    let result_code = r.read()?;
    r.finish()?;
    Ok(result_code)
}
