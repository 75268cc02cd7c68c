//! Wire codec for SoftDevice API serialization.
//!
//! Turns SoftDevice calls into byte packets and back, so a BLE application on one chip can
//! drive the radio stack running on another over a serial link. Every call is a typed request
//! implementing [`Request`]; [`req_enc`] / [`req_dec`] handle the request side and
//! [`rsp_enc`] / [`rsp_dec`] the response side. Asynchronous SoftDevice events use
//! [`BleEvent`], and [`transport`] frames packets for the link.
#![cfg_attr(not(test), no_std)]

mod fmt;

pub mod codec;
pub mod config;
pub mod cursor;
mod error;
pub mod opcode;
mod primitives;
pub mod types;

pub mod command;
pub mod event;
pub mod transport;

pub mod ble;
pub mod gap;
pub mod gatts;
pub mod l2cap;

pub use command::{cmd_rsp_dec, req_dec, req_enc, rsp_dec, rsp_enc, Request, Response};
pub use error::{nrf_error, Error};
pub use event::{evt_dec, evt_enc, BleEvent};
pub use opcode::{opcodes, Opcode};
pub use primitives::{ShortValue, Value};
