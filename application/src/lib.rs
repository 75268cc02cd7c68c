//! Application side of SoftDevice API serialization.
//!
//! A [`Client`] owns the link to the connectivity chip. Its [`Client::run`] loop must be polled
//! for responses and events to be delivered. [`SoftDevice`] wraps a client with one async method
//! per serialized call.
//!
//! ```ignore
//! let client = Client::<NoopRawMutex, _>::new(tx);
//! let sd = SoftDevice::new(&client);
//! select(client.run(rx), async {
//!     sd.gap_rssi_start(conn_handle, 10, 2).await?;
//!     let evt = client.next_event().await;
//!     // ...
//! })
//! .await;
//! ```
#![cfg_attr(not(test), no_std)]

mod fmt;

mod client;
mod softdevice;

use core::fmt as core_fmt;

use embedded_io::ErrorKind;
use nrf_ser_codec::transport::TransportError;

pub use client::{decode_event, Client, RxPacket};
pub use softdevice::SoftDevice;

/// Errors returned by serialized calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Request could not be encoded or the response could not be decoded.
    Codec(nrf_ser_codec::Error),
    /// The link failed.
    Transport(ErrorKind),
    /// The SoftDevice on the connectivity chip returned this `NRF_ERROR_*` code.
    Remote(u32),
}

impl From<nrf_ser_codec::Error> for Error {
    fn from(error: nrf_ser_codec::Error) -> Self {
        Self::Codec(error)
    }
}

impl From<TransportError> for Error {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Io(kind) => Self::Transport(kind),
            TransportError::Codec(e) => Self::Codec(e),
        }
    }
}

impl core_fmt::Display for Error {
    fn fmt(&self, f: &mut core_fmt::Formatter<'_>) -> core_fmt::Result {
        match self {
            Error::Codec(e) => write!(f, "codec error: {}", e),
            Error::Transport(kind) => write!(f, "transport error: {:?}", kind),
            Error::Remote(code) => write!(f, "softdevice returned {}", code),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Codec(e) => defmt::write!(f, "codec error: {}", e),
            Error::Transport(kind) => defmt::write!(f, "transport error: {:?}", kind),
            Error::Remote(code) => defmt::write!(f, "softdevice returned {=u32}", code),
        }
    }
}
