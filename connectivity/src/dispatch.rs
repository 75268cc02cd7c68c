use nrf_ser_codec::ble::*;
use nrf_ser_codec::codec::Decode;
use nrf_ser_codec::command::RSP_HEADER_SIZE;
use nrf_ser_codec::cursor::WriteCursor;
use nrf_ser_codec::gap::*;
use nrf_ser_codec::gatts::*;
use nrf_ser_codec::l2cap::*;
use nrf_ser_codec::nrf_error::{NRF_ERROR_NOT_SUPPORTED, NRF_ERROR_NULL, NRF_SUCCESS};
use nrf_ser_codec::{opcodes, req_dec, rsp_enc, Error, Opcode, Request, ShortValue, Value};

use crate::SoftDevice;

/// Length prefix of a variable-length output.
const VALUE_PREFIX_SIZE: usize = 2;

fn decode<'a, R: Request + Decode<'a>>(req: &'a [u8]) -> Result<R, u32> {
    req_dec::<R>(req).map_err(|e| {
        warn!("[dispatch] malformed request {:?}: {:?}", R::OPCODE, e);
        e.code()
    })
}

fn respond<R: Request>(result: Result<R::Output<'_>, u32>, rsp: &mut [u8]) -> Result<usize, Error> {
    match result {
        Ok(out) => rsp_enc::<R>(NRF_SUCCESS, Some(&out), rsp),
        Err(code) => {
            debug!("[dispatch] {:?} failed with {}", R::OPCODE, code);
            rsp_enc::<R>(code, None, rsp)
        }
    }
}

fn not_supported(opcode: Opcode, rsp: &mut [u8]) -> Result<usize, Error> {
    let mut w = WriteCursor::new(rsp);
    w.write(opcode)?;
    w.write(NRF_ERROR_NOT_SUPPORTED)?;
    Ok(w.len())
}

/// Decode one request, run it against `sd` and encode the response into `rsp`.
///
/// Every request with a readable opcode gets a response: a request that fails to decode is
/// answered with its decode error code, and an unknown opcode with `NRF_ERROR_NOT_SUPPORTED`.
/// Returns the response length. Fails only when `req` is empty or `rsp` is too small.
pub fn dispatch<S: SoftDevice + ?Sized>(sd: &mut S, req: &[u8], rsp: &mut [u8]) -> Result<usize, Error> {
    let opcode = Opcode(*req.first().ok_or(Error::InvalidLength)?);
    trace!("[dispatch] {:?}", opcode);

    // Room left in `rsp` for the payload of a variable-length output.
    let value_room = rsp.len().saturating_sub(RSP_HEADER_SIZE + VALUE_PREFIX_SIZE);

    match opcode {
        opcodes::BLE_TX_PACKET_COUNT_GET => {
            let result = decode::<BleTxPacketCountGet>(req).and_then(|r| sd.ble_tx_packet_count_get(r.conn_handle));
            respond::<BleTxPacketCountGet>(result, rsp)
        }
        opcodes::BLE_UUID_VS_ADD => {
            let result = decode::<BleUuidVsAdd>(req).and_then(|r| sd.ble_uuid_vs_add(&r.uuid128));
            respond::<BleUuidVsAdd>(result, rsp)
        }
        opcodes::BLE_UUID_DECODE => {
            let result = decode::<BleUuidDecode>(req).and_then(|r| sd.ble_uuid_decode(r.uuid.0));
            respond::<BleUuidDecode>(result, rsp)
        }
        opcodes::BLE_UUID_ENCODE => {
            let mut raw = [0u8; 16];
            let result = decode::<BleUuidEncode>(req).and_then(|r| sd.ble_uuid_encode(&r.uuid, &mut raw));
            respond::<BleUuidEncode>(result.map(|n| ShortValue(&raw[..n.min(raw.len())])), rsp)
        }
        opcodes::BLE_VERSION_GET => {
            let result = decode::<BleVersionGet>(req).and_then(|_| sd.ble_version_get());
            respond::<BleVersionGet>(result, rsp)
        }
        opcodes::GAP_ADDRESS_SET => {
            let result = decode::<GapAddressSet>(req).and_then(|r| sd.gap_address_set(r.cycle_mode, &r.addr));
            respond::<GapAddressSet>(result, rsp)
        }
        opcodes::GAP_ADDRESS_GET => {
            let result = decode::<GapAddressGet>(req).and_then(|_| sd.gap_address_get());
            respond::<GapAddressGet>(result, rsp)
        }
        opcodes::GAP_ADV_DATA_SET => {
            let result = decode::<GapAdvDataSet>(req).and_then(|r| sd.gap_adv_data_set(r.data.0, r.sr_data.0));
            respond::<GapAdvDataSet>(result, rsp)
        }
        opcodes::GAP_ADV_START => {
            let result = decode::<GapAdvStart>(req).and_then(|r| sd.gap_adv_start(&r.params));
            respond::<GapAdvStart>(result, rsp)
        }
        opcodes::GAP_ADV_STOP => {
            let result = decode::<GapAdvStop>(req).and_then(|_| sd.gap_adv_stop());
            respond::<GapAdvStop>(result, rsp)
        }
        opcodes::GAP_CONN_PARAM_UPDATE => {
            let result =
                decode::<GapConnParamUpdate>(req).and_then(|r| sd.gap_conn_param_update(r.conn_handle, &r.params));
            respond::<GapConnParamUpdate>(result, rsp)
        }
        opcodes::GAP_DISCONNECT => {
            let result =
                decode::<GapDisconnect>(req).and_then(|r| sd.gap_disconnect(r.conn_handle, r.hci_status_code));
            respond::<GapDisconnect>(result, rsp)
        }
        opcodes::GAP_TX_POWER_SET => {
            let result = decode::<GapTxPowerSet>(req).and_then(|r| sd.gap_tx_power_set(r.tx_power));
            respond::<GapTxPowerSet>(result, rsp)
        }
        opcodes::GAP_APPEARANCE_SET => {
            let result = decode::<GapAppearanceSet>(req).and_then(|r| sd.gap_appearance_set(r.appearance));
            respond::<GapAppearanceSet>(result, rsp)
        }
        opcodes::GAP_APPEARANCE_GET => {
            let result = decode::<GapAppearanceGet>(req).and_then(|_| sd.gap_appearance_get());
            respond::<GapAppearanceGet>(result, rsp)
        }
        opcodes::GAP_PPCP_SET => {
            let result = decode::<GapPpcpSet>(req).and_then(|r| sd.gap_ppcp_set(&r.params));
            respond::<GapPpcpSet>(result, rsp)
        }
        opcodes::GAP_PPCP_GET => {
            let result = decode::<GapPpcpGet>(req).and_then(|_| sd.gap_ppcp_get());
            respond::<GapPpcpGet>(result, rsp)
        }
        opcodes::GAP_DEVICE_NAME_SET => {
            let result =
                decode::<GapDeviceNameSet>(req).and_then(|r| sd.gap_device_name_set(&r.write_perm, r.name.0));
            respond::<GapDeviceNameSet>(result, rsp)
        }
        opcodes::GAP_DEVICE_NAME_GET => {
            let mut scratch = [0u8; nrf_ser_codec::config::MAX_PACKET_SIZE];
            let result = decode::<GapDeviceNameGet>(req).and_then(|r| {
                let len = usize::from(r.max_len).min(value_room).min(scratch.len());
                let n = sd.gap_device_name_get(&mut scratch[..len])?;
                Ok(n.min(len))
            });
            respond::<GapDeviceNameGet>(result.map(|n| Value(&scratch[..n])), rsp)
        }
        opcodes::GAP_CONN_SEC_GET => {
            let result = decode::<GapConnSecGet>(req).and_then(|r| sd.gap_conn_sec_get(r.conn_handle));
            respond::<GapConnSecGet>(result, rsp)
        }
        opcodes::GAP_RSSI_START => {
            let result = decode::<GapRssiStart>(req)
                .and_then(|r| sd.gap_rssi_start(r.conn_handle, r.threshold_dbm, r.skip_count));
            respond::<GapRssiStart>(result, rsp)
        }
        opcodes::GAP_RSSI_STOP => {
            let result = decode::<GapRssiStop>(req).and_then(|r| sd.gap_rssi_stop(r.conn_handle));
            respond::<GapRssiStop>(result, rsp)
        }
        opcodes::GAP_SCAN_START => {
            let result = decode::<GapScanStart>(req).and_then(|r| sd.gap_scan_start(&r.params));
            respond::<GapScanStart>(result, rsp)
        }
        opcodes::GAP_SCAN_STOP => {
            let result = decode::<GapScanStop>(req).and_then(|_| sd.gap_scan_stop());
            respond::<GapScanStop>(result, rsp)
        }
        opcodes::GAP_CONNECT => {
            let result = decode::<GapConnect>(req)
                .and_then(|r| sd.gap_connect(&r.peer_addr, &r.scan_params, &r.conn_params));
            respond::<GapConnect>(result, rsp)
        }
        opcodes::GAP_CONNECT_CANCEL => {
            let result = decode::<GapConnectCancel>(req).and_then(|_| sd.gap_connect_cancel());
            respond::<GapConnectCancel>(result, rsp)
        }
        opcodes::GAP_RSSI_GET => {
            let result = decode::<GapRssiGet>(req).and_then(|r| sd.gap_rssi_get(r.conn_handle));
            respond::<GapRssiGet>(result, rsp)
        }
        opcodes::GATTS_SERVICE_ADD => {
            let result = decode::<GattsServiceAdd>(req).and_then(|r| sd.gatts_service_add(r.service_type, &r.uuid));
            respond::<GattsServiceAdd>(result, rsp)
        }
        opcodes::GATTS_VALUE_SET => {
            let result = decode::<GattsValueSet>(req)
                .and_then(|r| sd.gatts_value_set(r.conn_handle, r.handle, r.offset, r.value.0));
            respond::<GattsValueSet>(result, rsp)
        }
        opcodes::GATTS_VALUE_GET => {
            let mut scratch = [0u8; nrf_ser_codec::config::MAX_PACKET_SIZE];
            let result = decode::<GattsValueGet>(req).and_then(|r| {
                let len = usize::from(r.max_len).min(value_room).min(scratch.len());
                let n = sd.gatts_value_get(r.conn_handle, r.handle, r.offset, &mut scratch[..len])?;
                Ok(n.min(len))
            });
            respond::<GattsValueGet>(result.map(|n| Value(&scratch[..n])), rsp)
        }
        opcodes::GATTS_HVX => {
            let result = decode::<GattsHvx>(req)
                .and_then(|r| sd.gatts_hvx(r.conn_handle, r.handle, r.hvx_type, r.offset, r.data.0));
            respond::<GattsHvx>(result, rsp)
        }
        opcodes::GATTS_SERVICE_CHANGED => {
            let result = decode::<GattsServiceChanged>(req)
                .and_then(|r| sd.gatts_service_changed(r.conn_handle, r.start_handle, r.end_handle));
            respond::<GattsServiceChanged>(result, rsp)
        }
        opcodes::L2CAP_CID_REGISTER => {
            let result = decode::<L2capCidRegister>(req).and_then(|r| sd.l2cap_cid_register(r.cid));
            respond::<L2capCidRegister>(result, rsp)
        }
        opcodes::L2CAP_CID_UNREGISTER => {
            let result = decode::<L2capCidUnregister>(req).and_then(|r| sd.l2cap_cid_unregister(r.cid));
            respond::<L2capCidUnregister>(result, rsp)
        }
        opcodes::L2CAP_TX => {
            let result = decode::<L2capTx>(req).and_then(|r| {
                if r.data.is_empty() {
                    return Err(NRF_ERROR_NULL);
                }
                sd.l2cap_tx(r.conn_handle, &r.header, r.data)
            });
            respond::<L2capTx>(result, rsp)
        }
        _ => {
            warn!("[dispatch] unsupported opcode {:?}", opcode);
            not_supported(opcode, rsp)
        }
    }
}
