use nrf_ser_codec::nrf_error::NRF_ERROR_NOT_SUPPORTED;
use nrf_ser_codec::types::{
    AdvParams, ConnParams, ConnSec, GapAddr, HvxType, L2capHeader, ScanParams, SecMode, ServiceType, Uuid, Version,
};

/// The SoftDevice API as seen by the connectivity chip.
///
/// Each method mirrors one serialized call and returns either its outputs or an `NRF_ERROR_*`
/// code, which is sent back to the application as the call's result. Every method defaults to
/// `NRF_ERROR_NOT_SUPPORTED`, so implementations only provide the calls they back.
///
/// Methods writing variable-length data into `out` return the number of bytes written.
#[allow(unused_variables)]
pub trait SoftDevice {
    fn ble_tx_packet_count_get(&mut self, conn_handle: u16) -> Result<u8, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn ble_uuid_vs_add(&mut self, uuid128: &[u8; 16]) -> Result<u8, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn ble_uuid_decode(&mut self, raw: &[u8]) -> Result<Uuid, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn ble_uuid_encode(&mut self, uuid: &Uuid, out: &mut [u8; 16]) -> Result<usize, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn ble_version_get(&mut self) -> Result<Version, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_address_set(&mut self, cycle_mode: u8, addr: &GapAddr) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_address_get(&mut self) -> Result<GapAddr, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_adv_data_set(&mut self, data: &[u8], sr_data: &[u8]) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_adv_start(&mut self, params: &AdvParams) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_adv_stop(&mut self) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_conn_param_update(&mut self, conn_handle: u16, params: &ConnParams) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_disconnect(&mut self, conn_handle: u16, hci_status_code: u8) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_tx_power_set(&mut self, tx_power: i8) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_appearance_set(&mut self, appearance: u16) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_appearance_get(&mut self) -> Result<u16, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_ppcp_set(&mut self, params: &ConnParams) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_ppcp_get(&mut self) -> Result<ConnParams, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_device_name_set(&mut self, write_perm: &SecMode, name: &[u8]) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_device_name_get(&mut self, out: &mut [u8]) -> Result<usize, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_conn_sec_get(&mut self, conn_handle: u16) -> Result<ConnSec, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_rssi_start(&mut self, conn_handle: u16, threshold_dbm: u8, skip_count: u8) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_rssi_stop(&mut self, conn_handle: u16) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_scan_start(&mut self, params: &ScanParams) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_scan_stop(&mut self) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_connect(&mut self, peer_addr: &GapAddr, scan_params: &ScanParams, conn_params: &ConnParams) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_connect_cancel(&mut self) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gap_rssi_get(&mut self, conn_handle: u16) -> Result<i8, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gatts_service_add(&mut self, service_type: ServiceType, uuid: &Uuid) -> Result<u16, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    /// Returns the number of bytes written to the attribute.
    fn gatts_value_set(&mut self, conn_handle: u16, handle: u16, offset: u16, value: &[u8]) -> Result<u16, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gatts_value_get(&mut self, conn_handle: u16, handle: u16, offset: u16, out: &mut [u8]) -> Result<usize, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    /// Returns the number of bytes sent.
    fn gatts_hvx(
        &mut self,
        conn_handle: u16,
        handle: u16,
        hvx_type: HvxType,
        offset: u16,
        data: &[u8],
    ) -> Result<u16, u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn gatts_service_changed(&mut self, conn_handle: u16, start_handle: u16, end_handle: u16) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn l2cap_cid_register(&mut self, cid: u16) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn l2cap_cid_unregister(&mut self, cid: u16) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    fn l2cap_tx(&mut self, conn_handle: u16, header: &L2capHeader, data: &[u8]) -> Result<(), u32> {
        Err(NRF_ERROR_NOT_SUPPORTED)
    }

    /// Called on a reset command from the application.
    fn reset(&mut self) {}
}
