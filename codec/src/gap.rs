//! GAP calls.

use crate::codec::impl_codec;
use crate::command::Request;
use crate::opcode::{opcodes, Opcode};
use crate::primitives::{ShortValue, Value};
use crate::types::{AdvParams, ConnParams, ConnSec, GapAddr, ScanParams, SecMode};

/// Set the local Bluetooth address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapAddressSet {
    /// 0 for no automatic address cycling, 1 for automatic cycling.
    pub cycle_mode: u8,
    pub addr: GapAddr,
}

impl_codec!(GapAddressSet { cycle_mode, addr });

impl Request for GapAddressSet {
    const OPCODE: Opcode = opcodes::GAP_ADDRESS_SET;
    type Output<'r> = ();
}

/// Read the local Bluetooth address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapAddressGet;

impl_codec!(GapAddressGet {});

impl Request for GapAddressGet {
    const OPCODE: Opcode = opcodes::GAP_ADDRESS_GET;
    type Output<'r> = GapAddr;
}

/// Set advertising and scan response data. Empty data is sent as a zero length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapAdvDataSet<'a> {
    pub data: ShortValue<'a>,
    pub sr_data: ShortValue<'a>,
}

impl_codec!(GapAdvDataSet<'a> { data, sr_data });

impl Request for GapAdvDataSet<'_> {
    const OPCODE: Opcode = opcodes::GAP_ADV_DATA_SET;
    type Output<'r> = ();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapAdvStart {
    pub params: AdvParams,
}

impl_codec!(GapAdvStart { params });

impl Request for GapAdvStart {
    const OPCODE: Opcode = opcodes::GAP_ADV_START;
    type Output<'r> = ();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapAdvStop;

impl_codec!(GapAdvStop {});

impl Request for GapAdvStop {
    const OPCODE: Opcode = opcodes::GAP_ADV_STOP;
    type Output<'r> = ();
}

/// Request new connection parameters for a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapConnParamUpdate {
    pub conn_handle: u16,
    pub params: ConnParams,
}

impl_codec!(GapConnParamUpdate { conn_handle, params });

impl Request for GapConnParamUpdate {
    const OPCODE: Opcode = opcodes::GAP_CONN_PARAM_UPDATE;
    type Output<'r> = ();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapDisconnect {
    pub conn_handle: u16,
    pub hci_status_code: u8,
}

impl_codec!(GapDisconnect {
    conn_handle,
    hci_status_code,
});

impl Request for GapDisconnect {
    const OPCODE: Opcode = opcodes::GAP_DISCONNECT;
    type Output<'r> = ();
}

/// Set the radio output power in dBm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapTxPowerSet {
    pub tx_power: i8,
}

impl_codec!(GapTxPowerSet { tx_power });

impl Request for GapTxPowerSet {
    const OPCODE: Opcode = opcodes::GAP_TX_POWER_SET;
    type Output<'r> = ();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapAppearanceSet {
    pub appearance: u16,
}

impl_codec!(GapAppearanceSet { appearance });

impl Request for GapAppearanceSet {
    const OPCODE: Opcode = opcodes::GAP_APPEARANCE_SET;
    type Output<'r> = ();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapAppearanceGet;

impl_codec!(GapAppearanceGet {});

impl Request for GapAppearanceGet {
    const OPCODE: Opcode = opcodes::GAP_APPEARANCE_GET;
    type Output<'r> = u16;
}

/// Set the peripheral preferred connection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapPpcpSet {
    pub params: ConnParams,
}

impl_codec!(GapPpcpSet { params });

impl Request for GapPpcpSet {
    const OPCODE: Opcode = opcodes::GAP_PPCP_SET;
    type Output<'r> = ();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapPpcpGet;

impl_codec!(GapPpcpGet {});

impl Request for GapPpcpGet {
    const OPCODE: Opcode = opcodes::GAP_PPCP_GET;
    type Output<'r> = ConnParams;
}

/// Set the GAP device name and its write permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapDeviceNameSet<'a> {
    pub write_perm: SecMode,
    pub name: Value<'a>,
}

impl_codec!(GapDeviceNameSet<'a> { write_perm, name });

impl Request for GapDeviceNameSet<'_> {
    const OPCODE: Opcode = opcodes::GAP_DEVICE_NAME_SET;
    type Output<'r> = ();
}

/// Read up to `max_len` bytes of the GAP device name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapDeviceNameGet {
    pub max_len: u16,
}

impl_codec!(GapDeviceNameGet { max_len });

impl Request for GapDeviceNameGet {
    const OPCODE: Opcode = opcodes::GAP_DEVICE_NAME_GET;
    type Output<'r> = Value<'r>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapConnSecGet {
    pub conn_handle: u16,
}

impl_codec!(GapConnSecGet { conn_handle });

impl Request for GapConnSecGet {
    const OPCODE: Opcode = opcodes::GAP_CONN_SEC_GET;
    type Output<'r> = ConnSec;
}

/// Start reporting RSSI changes on a link.
///
/// An RSSI changed event is emitted when the RSSI moves by at least `threshold_dbm`, after
/// `skip_count` samples above the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapRssiStart {
    pub conn_handle: u16,
    pub threshold_dbm: u8,
    pub skip_count: u8,
}

impl_codec!(GapRssiStart {
    conn_handle,
    threshold_dbm,
    skip_count,
});

impl Request for GapRssiStart {
    const OPCODE: Opcode = opcodes::GAP_RSSI_START;
    type Output<'r> = ();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapRssiStop {
    pub conn_handle: u16,
}

impl_codec!(GapRssiStop { conn_handle });

impl Request for GapRssiStop {
    const OPCODE: Opcode = opcodes::GAP_RSSI_STOP;
    type Output<'r> = ();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapScanStart {
    pub params: ScanParams,
}

impl_codec!(GapScanStart { params });

impl Request for GapScanStart {
    const OPCODE: Opcode = opcodes::GAP_SCAN_START;
    type Output<'r> = ();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapScanStop;

impl_codec!(GapScanStop {});

impl Request for GapScanStop {
    const OPCODE: Opcode = opcodes::GAP_SCAN_STOP;
    type Output<'r> = ();
}

/// Connect to a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapConnect {
    pub peer_addr: GapAddr,
    pub scan_params: ScanParams,
    pub conn_params: ConnParams,
}

impl_codec!(GapConnect {
    peer_addr,
    scan_params,
    conn_params,
});

impl Request for GapConnect {
    const OPCODE: Opcode = opcodes::GAP_CONNECT;
    type Output<'r> = ();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapConnectCancel;

impl_codec!(GapConnectCancel {});

impl Request for GapConnectCancel {
    const OPCODE: Opcode = opcodes::GAP_CONNECT_CANCEL;
    type Output<'r> = ();
}

/// Read the last RSSI sample of a link, in dBm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapRssiGet {
    pub conn_handle: u16,
}

impl_codec!(GapRssiGet { conn_handle });

impl Request for GapRssiGet {
    const OPCODE: Opcode = opcodes::GAP_RSSI_GET;
    type Output<'r> = i8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{req_dec, req_enc, rsp_dec, rsp_enc, Response};
    use crate::error::nrf_error::NRF_SUCCESS;
    use crate::types::{AddrType, AdvType, ChannelMask};
    use crate::Error;

    #[test]
    fn adv_data_set_with_empty_scan_response() {
        let req = GapAdvDataSet {
            data: ShortValue(&[0x02, 0x01, 0x06]),
            sr_data: ShortValue(&[]),
        };
        let mut buf = [0u8; 16];
        let len = req_enc(&req, &mut buf).unwrap();
        assert_eq!(&buf[..len], &[0x6E, 0x03, 0x02, 0x01, 0x06, 0x00]);

        let decoded: GapAdvDataSet = req_dec(&buf[..len]).unwrap();
        assert_eq!(decoded, req);
        assert!(decoded.sr_data.0.is_empty());
    }

    #[test]
    fn adv_data_length_past_end() {
        let buf = [0x6E, 0x05, 0x02, 0x01];
        assert_eq!(req_dec::<GapAdvDataSet>(&buf), Err(Error::InvalidLength));
    }

    #[test]
    fn adv_start_layout() {
        let req = GapAdvStart {
            params: AdvParams {
                adv_type: AdvType::Ind,
                fp: 0,
                interval: 0x0028,
                timeout: 0,
                channel_mask: ChannelMask::empty(),
            },
        };
        let mut buf = [0u8; 16];
        let len = req_enc(&req, &mut buf).unwrap();
        assert_eq!(&buf[..len], &[0x6F, 0x00, 0x00, 0x28, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn connect_layout() {
        let req = GapConnect {
            peer_addr: GapAddr {
                addr_type: AddrType::Public,
                addr: [1, 2, 3, 4, 5, 6],
            },
            scan_params: ScanParams {
                active: true,
                selective: false,
                interval: 0x00A0,
                window: 0x0050,
                timeout: 0,
            },
            conn_params: ConnParams {
                min_conn_interval: 6,
                max_conn_interval: 12,
                slave_latency: 0,
                conn_sup_timeout: 400,
            },
        };
        let mut buf = [0u8; 32];
        let len = req_enc(&req, &mut buf).unwrap();
        assert_eq!(len, 1 + 7 + 8 + 8);
        assert_eq!(&buf[..9], &[0x88, 0x00, 1, 2, 3, 4, 5, 6, 0x01]);
        assert_eq!(req_dec::<GapConnect>(&buf[..len]).unwrap(), req);
    }

    #[test]
    fn tx_power_is_signed() {
        let mut buf = [0u8; 4];
        let len = req_enc(&GapTxPowerSet { tx_power: -8 }, &mut buf).unwrap();
        assert_eq!(&buf[..len], &[0x73, 0xF8]);
    }

    #[test]
    fn parameterless_request_is_opcode_only() {
        let mut buf = [0u8; 4];
        assert_eq!(req_enc(&GapAdvStop, &mut buf), Ok(1));
        assert_eq!(buf[0], 0x70);
        assert_eq!(req_dec::<GapAdvStop>(&[0x70]), Ok(GapAdvStop));
        assert_eq!(req_dec::<GapAdvStop>(&[0x70, 0x00]), Err(Error::InvalidLength));
    }

    #[test]
    fn device_name_get_borrows_name() {
        let mut buf = [0u8; 32];
        let len = rsp_enc::<GapDeviceNameGet>(NRF_SUCCESS, Some(&Value(b"nrf-dev")), &mut buf).unwrap();
        assert_eq!(&buf[5..7], &[0x07, 0x00]);
        match rsp_dec::<GapDeviceNameGet>(&buf[..len]).unwrap() {
            Response::Success(name) => assert_eq!(name.0, b"nrf-dev"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rssi_get_output() {
        let buf = [0x8A, 0, 0, 0, 0, 0xC4];
        assert_eq!(rsp_dec::<GapRssiGet>(&buf), Ok(Response::Success(-60)));
    }
}
