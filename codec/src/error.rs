//! Codec errors and the SoftDevice result code table.

use core::fmt;

/// SoftDevice result codes as carried in every response envelope.
pub mod nrf_error {
    pub const NRF_SUCCESS: u32 = 0;
    pub const NRF_ERROR_SVC_HANDLER_MISSING: u32 = 1;
    pub const NRF_ERROR_SOFTDEVICE_NOT_ENABLED: u32 = 2;
    pub const NRF_ERROR_INTERNAL: u32 = 3;
    pub const NRF_ERROR_NO_MEM: u32 = 4;
    pub const NRF_ERROR_NOT_FOUND: u32 = 5;
    pub const NRF_ERROR_NOT_SUPPORTED: u32 = 6;
    pub const NRF_ERROR_INVALID_PARAM: u32 = 7;
    pub const NRF_ERROR_INVALID_STATE: u32 = 8;
    pub const NRF_ERROR_INVALID_LENGTH: u32 = 9;
    pub const NRF_ERROR_INVALID_FLAGS: u32 = 10;
    pub const NRF_ERROR_INVALID_DATA: u32 = 11;
    pub const NRF_ERROR_DATA_SIZE: u32 = 12;
    pub const NRF_ERROR_TIMEOUT: u32 = 13;
    pub const NRF_ERROR_NULL: u32 = 14;
    pub const NRF_ERROR_FORBIDDEN: u32 = 15;
    pub const NRF_ERROR_INVALID_ADDR: u32 = 16;
    pub const NRF_ERROR_BUSY: u32 = 17;
}

/// Errors raised while encoding or decoding a packet.
///
/// These describe the local codec outcome only. The result of the remote call travels inside the
/// response envelope, see [`Response`](crate::command::Response).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A required argument was missing.
    Null,
    /// Buffer too small to encode into, or packet too short (or too long) to decode.
    InvalidLength,
    /// Opcode mismatch or a field value outside its domain.
    InvalidParam,
}

impl Error {
    /// The `NRF_ERROR_*` code this error is reported as.
    pub const fn code(&self) -> u32 {
        match self {
            Error::Null => nrf_error::NRF_ERROR_NULL,
            Error::InvalidLength => nrf_error::NRF_ERROR_INVALID_LENGTH,
            Error::InvalidParam => nrf_error::NRF_ERROR_INVALID_PARAM,
        }
    }

    /// Map an `NRF_ERROR_*` code back to a codec error, if it is one.
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            nrf_error::NRF_ERROR_NULL => Some(Error::Null),
            nrf_error::NRF_ERROR_INVALID_LENGTH => Some(Error::InvalidLength),
            nrf_error::NRF_ERROR_INVALID_PARAM => Some(Error::InvalidParam),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Null => write!(f, "required argument missing"),
            Error::InvalidLength => write!(f, "invalid length"),
            Error::InvalidParam => write!(f, "invalid parameter"),
        }
    }
}
