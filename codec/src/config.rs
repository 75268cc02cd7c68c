//! Compile-time configuration.
//!
//! Settings are read from environment variables at build time. Set the variable named
//! `NRF_SER_<name>`, for example `NRF_SER_MAX_PACKET_SIZE=512 cargo build`. They can also be set
//! in the `[env]` section of `.cargo/config.toml`.
//!
//! ## Compatibility warning
//!
//! Both ends of a link must be built with the same `MAX_PACKET_SIZE`. A frame larger than the
//! receiver's limit is discarded with [`Error::InvalidLength`](crate::Error::InvalidLength).

mod raw {
    #![allow(unused)]
    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}

/// Maximum frame payload size
///
/// This bounds every serialized command, response and event, and sizes the receive and
/// transmit buffers on both sides of the link.
///
/// Default: 384.
pub const MAX_PACKET_SIZE: usize = raw::MAX_PACKET_SIZE;

/// Application event queue size
///
/// Number of decoded-but-unconsumed events buffered by the application client before new
/// events are dropped.
///
/// Default: 4.
pub const EVENT_QUEUE_SIZE: usize = raw::EVENT_QUEUE_SIZE;

const _: () = assert!(MAX_PACKET_SIZE >= 32, "MAX_PACKET_SIZE is too small to hold any response");
const _: () = assert!(MAX_PACKET_SIZE < u16::MAX as usize, "MAX_PACKET_SIZE must fit the frame length field");
const _: () = assert!(EVENT_QUEUE_SIZE > 0, "EVENT_QUEUE_SIZE must be at least 1");
