use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_io_async::Write;
use nrf_ser_codec::ble::*;
use nrf_ser_codec::gap::*;
use nrf_ser_codec::gatts::*;
use nrf_ser_codec::l2cap::*;
use nrf_ser_codec::types::{
    AdvParams, ConnParams, ConnSec, GapAddr, HvxType, L2capHeader, ScanParams, SecMode, ServiceType, Uuid, Version,
};
use nrf_ser_codec::{Response, ShortValue, Value};

use crate::{Client, Error, RxPacket};

fn check<T>(rsp: Response<T>) -> Result<T, Error> {
    rsp.into_result().map_err(Error::Remote)
}

fn copy_out(src: &[u8], out: &mut [u8]) -> Result<usize, Error> {
    out.get_mut(..src.len())
        .ok_or(Error::Codec(nrf_ser_codec::Error::InvalidLength))?
        .copy_from_slice(src);
    Ok(src.len())
}

fn len_u16(out: &[u8]) -> u16 {
    u16::try_from(out.len()).unwrap_or(u16::MAX)
}

/// SoftDevice API served by a connectivity chip.
///
/// Each method serializes one call, waits for its response and returns the call's outputs. A
/// nonzero result code from the remote SoftDevice is returned as [`Error::Remote`].
/// Variable-length outputs are copied into the caller's buffer and their length returned.
pub struct SoftDevice<'c, M: RawMutex, W: Write> {
    client: &'c Client<M, W>,
}

impl<'c, M: RawMutex, W: Write> SoftDevice<'c, M, W> {
    pub fn new(client: &'c Client<M, W>) -> Self {
        Self { client }
    }

    pub async fn ble_tx_packet_count_get(&self, conn_handle: u16) -> Result<u8, Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&BleTxPacketCountGet { conn_handle }, &mut rsp).await?)
    }

    /// Register a vendor specific base UUID and return its UUID type.
    pub async fn ble_uuid_vs_add(&self, uuid128: &[u8; 16]) -> Result<u8, Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&BleUuidVsAdd { uuid128: *uuid128 }, &mut rsp).await?)
    }

    pub async fn ble_uuid_decode(&self, raw: &[u8]) -> Result<Uuid, Error> {
        let mut rsp = RxPacket::new();
        let req = BleUuidDecode { uuid: ShortValue(raw) };
        check(self.client.call(&req, &mut rsp).await?)
    }

    /// Write the raw form of `uuid` into `out`.
    pub async fn ble_uuid_encode(&self, uuid: &Uuid, out: &mut [u8]) -> Result<usize, Error> {
        let mut rsp = RxPacket::new();
        let raw = check(self.client.call(&BleUuidEncode { uuid: *uuid }, &mut rsp).await?)?;
        copy_out(raw.0, out)
    }

    pub async fn ble_version_get(&self) -> Result<Version, Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&BleVersionGet, &mut rsp).await?)
    }

    pub async fn gap_address_set(&self, cycle_mode: u8, addr: &GapAddr) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        let req = GapAddressSet { cycle_mode, addr: *addr };
        check(self.client.call(&req, &mut rsp).await?)
    }

    pub async fn gap_address_get(&self) -> Result<GapAddr, Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapAddressGet, &mut rsp).await?)
    }

    /// Set advertising data. An empty slice clears the corresponding data.
    pub async fn gap_adv_data_set(&self, data: &[u8], sr_data: &[u8]) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        let req = GapAdvDataSet {
            data: ShortValue(data),
            sr_data: ShortValue(sr_data),
        };
        check(self.client.call(&req, &mut rsp).await?)
    }

    pub async fn gap_adv_start(&self, params: &AdvParams) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapAdvStart { params: *params }, &mut rsp).await?)
    }

    pub async fn gap_adv_stop(&self) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapAdvStop, &mut rsp).await?)
    }

    pub async fn gap_conn_param_update(&self, conn_handle: u16, params: &ConnParams) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        let req = GapConnParamUpdate {
            conn_handle,
            params: *params,
        };
        check(self.client.call(&req, &mut rsp).await?)
    }

    pub async fn gap_disconnect(&self, conn_handle: u16, hci_status_code: u8) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        let req = GapDisconnect {
            conn_handle,
            hci_status_code,
        };
        check(self.client.call(&req, &mut rsp).await?)
    }

    pub async fn gap_tx_power_set(&self, tx_power: i8) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapTxPowerSet { tx_power }, &mut rsp).await?)
    }

    pub async fn gap_appearance_set(&self, appearance: u16) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapAppearanceSet { appearance }, &mut rsp).await?)
    }

    pub async fn gap_appearance_get(&self) -> Result<u16, Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapAppearanceGet, &mut rsp).await?)
    }

    pub async fn gap_ppcp_set(&self, params: &ConnParams) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapPpcpSet { params: *params }, &mut rsp).await?)
    }

    pub async fn gap_ppcp_get(&self) -> Result<ConnParams, Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapPpcpGet, &mut rsp).await?)
    }

    pub async fn gap_device_name_set(&self, write_perm: &SecMode, name: &[u8]) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        let req = GapDeviceNameSet {
            write_perm: *write_perm,
            name: Value(name),
        };
        check(self.client.call(&req, &mut rsp).await?)
    }

    /// Read the device name into `out`, up to `out.len()` bytes.
    pub async fn gap_device_name_get(&self, out: &mut [u8]) -> Result<usize, Error> {
        let mut rsp = RxPacket::new();
        let req = GapDeviceNameGet { max_len: len_u16(out) };
        let name = check(self.client.call(&req, &mut rsp).await?)?;
        copy_out(name.0, out)
    }

    pub async fn gap_conn_sec_get(&self, conn_handle: u16) -> Result<ConnSec, Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapConnSecGet { conn_handle }, &mut rsp).await?)
    }

    /// Start RSSI change reporting on a connection.
    pub async fn gap_rssi_start(&self, conn_handle: u16, threshold_dbm: u8, skip_count: u8) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        let req = GapRssiStart {
            conn_handle,
            threshold_dbm,
            skip_count,
        };
        check(self.client.call(&req, &mut rsp).await?)
    }

    pub async fn gap_rssi_stop(&self, conn_handle: u16) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapRssiStop { conn_handle }, &mut rsp).await?)
    }

    pub async fn gap_scan_start(&self, params: &ScanParams) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapScanStart { params: *params }, &mut rsp).await?)
    }

    pub async fn gap_scan_stop(&self) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapScanStop, &mut rsp).await?)
    }

    pub async fn gap_connect(
        &self,
        peer_addr: &GapAddr,
        scan_params: &ScanParams,
        conn_params: &ConnParams,
    ) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        let req = GapConnect {
            peer_addr: *peer_addr,
            scan_params: *scan_params,
            conn_params: *conn_params,
        };
        check(self.client.call(&req, &mut rsp).await?)
    }

    pub async fn gap_connect_cancel(&self) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapConnectCancel, &mut rsp).await?)
    }

    pub async fn gap_rssi_get(&self, conn_handle: u16) -> Result<i8, Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&GapRssiGet { conn_handle }, &mut rsp).await?)
    }

    /// Add a service and return its handle.
    pub async fn gatts_service_add(&self, service_type: ServiceType, uuid: &Uuid) -> Result<u16, Error> {
        let mut rsp = RxPacket::new();
        let req = GattsServiceAdd {
            service_type,
            uuid: *uuid,
        };
        check(self.client.call(&req, &mut rsp).await?)
    }

    pub async fn gatts_value_set(&self, conn_handle: u16, handle: u16, offset: u16, value: &[u8]) -> Result<u16, Error> {
        let mut rsp = RxPacket::new();
        let req = GattsValueSet {
            conn_handle,
            handle,
            offset,
            value: Value(value),
        };
        check(self.client.call(&req, &mut rsp).await?)
    }

    pub async fn gatts_value_get(&self, conn_handle: u16, handle: u16, offset: u16, out: &mut [u8]) -> Result<usize, Error> {
        let mut rsp = RxPacket::new();
        let req = GattsValueGet {
            conn_handle,
            handle,
            offset,
            max_len: len_u16(out),
        };
        let value = check(self.client.call(&req, &mut rsp).await?)?;
        copy_out(value.0, out)
    }

    pub async fn gatts_hvx(
        &self,
        conn_handle: u16,
        handle: u16,
        hvx_type: HvxType,
        offset: u16,
        data: &[u8],
    ) -> Result<u16, Error> {
        let mut rsp = RxPacket::new();
        let req = GattsHvx {
            conn_handle,
            handle,
            hvx_type,
            offset,
            data: Value(data),
        };
        check(self.client.call(&req, &mut rsp).await?)
    }

    pub async fn gatts_service_changed(&self, conn_handle: u16, start_handle: u16, end_handle: u16) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        let req = GattsServiceChanged {
            conn_handle,
            start_handle,
            end_handle,
        };
        check(self.client.call(&req, &mut rsp).await?)
    }

    pub async fn l2cap_cid_register(&self, cid: u16) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&L2capCidRegister { cid }, &mut rsp).await?)
    }

    pub async fn l2cap_cid_unregister(&self, cid: u16) -> Result<(), Error> {
        let mut rsp = RxPacket::new();
        check(self.client.call(&L2capCidUnregister { cid }, &mut rsp).await?)
    }

    /// Send `data` on channel `cid`.
    pub async fn l2cap_tx(&self, conn_handle: u16, cid: u16, data: &[u8]) -> Result<(), Error> {
        let len = u16::try_from(data.len()).map_err(|_| Error::Codec(nrf_ser_codec::Error::InvalidLength))?;
        let mut rsp = RxPacket::new();
        let req = L2capTx {
            conn_handle,
            header: L2capHeader { len, cid },
            data,
        };
        check(self.client.call(&req, &mut rsp).await?)
    }
}
