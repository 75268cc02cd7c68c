//! GATT server calls.

use crate::codec::impl_codec;
use crate::command::Request;
use crate::opcode::{opcodes, Opcode};
use crate::primitives::Value;
use crate::types::{HvxType, ServiceType, Uuid};

/// Add a service declaration. Returns the service handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GattsServiceAdd {
    pub service_type: ServiceType,
    pub uuid: Uuid,
}

impl_codec!(GattsServiceAdd { service_type, uuid });

impl Request for GattsServiceAdd {
    const OPCODE: Opcode = opcodes::GATTS_SERVICE_ADD;
    type Output<'r> = u16;
}

/// Write an attribute value. Returns the number of bytes written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GattsValueSet<'a> {
    pub conn_handle: u16,
    pub handle: u16,
    pub offset: u16,
    pub value: Value<'a>,
}

impl_codec!(GattsValueSet<'a> {
    conn_handle,
    handle,
    offset,
    value,
});

impl Request for GattsValueSet<'_> {
    const OPCODE: Opcode = opcodes::GATTS_VALUE_SET;
    type Output<'r> = u16;
}

/// Read up to `max_len` bytes of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GattsValueGet {
    pub conn_handle: u16,
    pub handle: u16,
    pub offset: u16,
    pub max_len: u16,
}

impl_codec!(GattsValueGet {
    conn_handle,
    handle,
    offset,
    max_len,
});

impl Request for GattsValueGet {
    const OPCODE: Opcode = opcodes::GATTS_VALUE_GET;
    type Output<'r> = Value<'r>;
}

/// Notify or indicate an attribute value. Returns the number of bytes sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GattsHvx<'a> {
    pub conn_handle: u16,
    pub handle: u16,
    pub hvx_type: HvxType,
    pub offset: u16,
    pub data: Value<'a>,
}

impl_codec!(GattsHvx<'a> {
    conn_handle,
    handle,
    hvx_type,
    offset,
    data,
});

impl Request for GattsHvx<'_> {
    const OPCODE: Opcode = opcodes::GATTS_HVX;
    type Output<'r> = u16;
}

/// Indicate that the attribute table changed between `start_handle` and `end_handle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GattsServiceChanged {
    pub conn_handle: u16,
    pub start_handle: u16,
    pub end_handle: u16,
}

impl_codec!(GattsServiceChanged {
    conn_handle,
    start_handle,
    end_handle,
});

impl Request for GattsServiceChanged {
    const OPCODE: Opcode = opcodes::GATTS_SERVICE_CHANGED;
    type Output<'r> = ();
}
