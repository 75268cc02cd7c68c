//! SoftDevice call opcodes.

use crate::codec::{Decode, Encode, Error, FixedSize};

/// Call opcode.
///
/// First byte of every request and response. A request and its response share the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Opcode(pub u8);

impl Opcode {
    /// The call group this opcode belongs to, by SoftDevice SVC range.
    pub const fn group(&self) -> Option<Group> {
        match self.0 {
            0x60..=0x6B => Some(Group::Ble),
            0x6C..=0x9A => Some(Group::Gap),
            0x9B..=0xA7 => Some(Group::Gattc),
            0xA8..=0xB7 => Some(Group::Gatts),
            0xB8..=0xBF => Some(Group::L2cap),
            _ => None,
        }
    }
}

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// SoftDevice API group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Group {
    Ble,
    Gap,
    Gattc,
    Gatts,
    L2cap,
}

impl FixedSize for Opcode {
    const SIZE: usize = 1;
}

impl Encode for Opcode {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
        self.0.encode(dest)
    }
}

impl Decode<'_> for Opcode {
    fn decode(src: &[u8]) -> Result<Self, Error> {
        Ok(Self(u8::decode(src)?))
    }
}

/// Opcodes of the serialized calls.
pub mod opcodes {
    use super::Opcode;

    pub const BLE_TX_PACKET_COUNT_GET: Opcode = Opcode(0x62);
    pub const BLE_UUID_VS_ADD: Opcode = Opcode(0x63);
    pub const BLE_UUID_DECODE: Opcode = Opcode(0x64);
    pub const BLE_UUID_ENCODE: Opcode = Opcode(0x65);
    pub const BLE_VERSION_GET: Opcode = Opcode(0x66);

    pub const GAP_ADDRESS_SET: Opcode = Opcode(0x6C);
    pub const GAP_ADDRESS_GET: Opcode = Opcode(0x6D);
    pub const GAP_ADV_DATA_SET: Opcode = Opcode(0x6E);
    pub const GAP_ADV_START: Opcode = Opcode(0x6F);
    pub const GAP_ADV_STOP: Opcode = Opcode(0x70);
    pub const GAP_CONN_PARAM_UPDATE: Opcode = Opcode(0x71);
    pub const GAP_DISCONNECT: Opcode = Opcode(0x72);
    pub const GAP_TX_POWER_SET: Opcode = Opcode(0x73);
    pub const GAP_APPEARANCE_SET: Opcode = Opcode(0x74);
    pub const GAP_APPEARANCE_GET: Opcode = Opcode(0x75);
    pub const GAP_PPCP_SET: Opcode = Opcode(0x76);
    pub const GAP_PPCP_GET: Opcode = Opcode(0x77);
    pub const GAP_DEVICE_NAME_SET: Opcode = Opcode(0x78);
    pub const GAP_DEVICE_NAME_GET: Opcode = Opcode(0x79);
    pub const GAP_CONN_SEC_GET: Opcode = Opcode(0x83);
    pub const GAP_RSSI_START: Opcode = Opcode(0x84);
    pub const GAP_RSSI_STOP: Opcode = Opcode(0x85);
    pub const GAP_SCAN_START: Opcode = Opcode(0x86);
    pub const GAP_SCAN_STOP: Opcode = Opcode(0x87);
    pub const GAP_CONNECT: Opcode = Opcode(0x88);
    pub const GAP_CONNECT_CANCEL: Opcode = Opcode(0x89);
    pub const GAP_RSSI_GET: Opcode = Opcode(0x8A);

    pub const GATTS_SERVICE_ADD: Opcode = Opcode(0xA8);
    pub const GATTS_VALUE_SET: Opcode = Opcode(0xAC);
    pub const GATTS_VALUE_GET: Opcode = Opcode(0xAD);
    pub const GATTS_HVX: Opcode = Opcode(0xAE);
    pub const GATTS_SERVICE_CHANGED: Opcode = Opcode(0xAF);

    pub const L2CAP_CID_REGISTER: Opcode = Opcode(0xB8);
    pub const L2CAP_CID_UNREGISTER: Opcode = Opcode(0xB9);
    pub const L2CAP_TX: Opcode = Opcode(0xBA);
}
