//! Common BLE calls.

use crate::codec::impl_codec;
use crate::command::Request;
use crate::opcode::{opcodes, Opcode};
use crate::primitives::ShortValue;
use crate::types::{Uuid, Version};

/// Number of application packets that can be queued for transmission on a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BleTxPacketCountGet {
    pub conn_handle: u16,
}

impl_codec!(BleTxPacketCountGet { conn_handle });

impl Request for BleTxPacketCountGet {
    const OPCODE: Opcode = opcodes::BLE_TX_PACKET_COUNT_GET;
    type Output<'r> = u8;
}

/// Register a vendor specific 128-bit base UUID. Returns the assigned UUID type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BleUuidVsAdd {
    /// Little endian, bytes 12 and 13 are ignored.
    pub uuid128: [u8; 16],
}

impl_codec!(BleUuidVsAdd { uuid128 });

impl Request for BleUuidVsAdd {
    const OPCODE: Opcode = opcodes::BLE_UUID_VS_ADD;
    type Output<'r> = u8;
}

/// Resolve a raw 2 or 16 byte little endian UUID against the registered bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BleUuidDecode<'a> {
    pub uuid: ShortValue<'a>,
}

impl_codec!(BleUuidDecode<'a> { uuid });

impl Request for BleUuidDecode<'_> {
    const OPCODE: Opcode = opcodes::BLE_UUID_DECODE;
    type Output<'r> = Uuid;
}

/// Expand a UUID to its raw little endian form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BleUuidEncode {
    pub uuid: Uuid,
}

impl_codec!(BleUuidEncode { uuid });

impl Request for BleUuidEncode {
    const OPCODE: Opcode = opcodes::BLE_UUID_ENCODE;
    type Output<'r> = ShortValue<'r>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BleVersionGet;

impl_codec!(BleVersionGet {});

impl Request for BleVersionGet {
    const OPCODE: Opcode = opcodes::BLE_VERSION_GET;
    type Output<'r> = Version;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{req_dec, req_enc, rsp_dec, rsp_enc, Response};
    use crate::error::nrf_error::{NRF_ERROR_NO_MEM, NRF_SUCCESS};

    const BASE: [u8; 16] = [
        0x23, 0xD1, 0xBC, 0xEA, 0x5F, 0x78, 0x23, 0x15, 0xDE, 0xEF, 0x12, 0x12, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn uuid_vs_add_round_trip() {
        let mut buf = [0u8; 32];
        let len = req_enc(&BleUuidVsAdd { uuid128: BASE }, &mut buf).unwrap();
        assert_eq!(len, 17);
        assert_eq!(buf[0], 0x63);
        assert_eq!(req_dec::<BleUuidVsAdd>(&buf[..len]).unwrap().uuid128, BASE);

        let len = rsp_enc::<BleUuidVsAdd>(NRF_SUCCESS, Some(&2), &mut buf).unwrap();
        assert_eq!(&buf[..len], &[0x63, 0, 0, 0, 0, 0x02]);
        assert_eq!(rsp_dec::<BleUuidVsAdd>(&buf[..len]), Ok(Response::Success(2)));
    }

    #[test]
    fn uuid_vs_add_table_full() {
        let buf = [0x63, 0x04, 0, 0, 0];
        assert_eq!(rsp_dec::<BleUuidVsAdd>(&buf), Ok(Response::Failed(NRF_ERROR_NO_MEM)));
    }

    #[test]
    fn uuid_decode_borrows_raw_bytes() {
        let raw = [0x0D, 0x18];
        let mut buf = [0u8; 8];
        let len = req_enc(&BleUuidDecode { uuid: ShortValue(&raw) }, &mut buf).unwrap();
        assert_eq!(&buf[..len], &[0x64, 0x02, 0x0D, 0x18]);
        let req: BleUuidDecode = req_dec(&buf[..len]).unwrap();
        assert_eq!(req.uuid.0, &raw);
    }

    #[test]
    fn uuid_encode_output() {
        let buf = [0x65, 0, 0, 0, 0, 0x02, 0x0D, 0x18];
        match rsp_dec::<BleUuidEncode>(&buf).unwrap() {
            Response::Success(raw) => assert_eq!(raw.0, &[0x0D, 0x18]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn version_get_output() {
        let buf = [0x66, 0, 0, 0, 0, 0x08, 0x59, 0x00, 0x87, 0x00];
        let expected = Version {
            version_number: 8,
            company_id: 0x0059,
            subversion_number: 0x0087,
        };
        assert_eq!(rsp_dec::<BleVersionGet>(&buf), Ok(Response::Success(expected)));
    }
}
