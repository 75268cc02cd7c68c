//! Connectivity side of SoftDevice API serialization.
//!
//! [`Server`] reads command frames from the link, [`dispatch`] decodes each call and forwards it
//! to a [`SoftDevice`] implementation, and the encoded result goes back as a response frame.
//! SoftDevice events are pushed to the application with [`Server::send_event`].
#![cfg_attr(not(test), no_std)]

mod fmt;

mod dispatch;
mod server;
mod softdevice;

use core::fmt as core_fmt;

use embedded_io::ErrorKind;
use nrf_ser_codec::transport::TransportError;

pub use dispatch::dispatch;
pub use server::Server;
pub use softdevice::SoftDevice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    Codec(nrf_ser_codec::Error),
    Transport(ErrorKind),
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
        }
    }
}
