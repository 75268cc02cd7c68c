//! SoftDevice events.
//!
//! An event packet is `[evt_id:u16][conn_handle:u16][fields]`.

use crate::codec::{Decode, Encode, Error, Type};
use crate::cursor::{ReadCursor, WriteCursor};
use crate::types::{ConnParams, GapAddr, L2capHeader};

/// Event ids.
pub mod evt_ids {
    pub const BLE_EVT_TX_COMPLETE: u16 = 0x01;
    pub const BLE_GAP_EVT_CONNECTED: u16 = 0x10;
    pub const BLE_GAP_EVT_DISCONNECTED: u16 = 0x11;
    pub const BLE_GAP_EVT_CONN_PARAM_UPDATE: u16 = 0x12;
    pub const BLE_GAP_EVT_TIMEOUT: u16 = 0x1B;
    pub const BLE_GAP_EVT_RSSI_CHANGED: u16 = 0x1C;
    pub const BLE_L2CAP_EVT_RX: u16 = 0x70;
}

use evt_ids::*;

const EVT_HEADER_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleEvent<'a> {
    /// Packets were acknowledged by the peer.
    TxComplete { conn_handle: u16, count: u8 },
    GapConnected {
        conn_handle: u16,
        peer_addr: GapAddr,
        /// 1 for peripheral, 2 for central.
        role: u8,
        conn_params: ConnParams,
    },
    /// `reason` is the HCI status code.
    GapDisconnected { conn_handle: u16, reason: u8 },
    GapConnParamUpdate { conn_handle: u16, conn_params: ConnParams },
    /// `src` identifies the procedure that timed out.
    GapTimeout { conn_handle: u16, src: u8 },
    GapRssiChanged { conn_handle: u16, rssi: i8 },
    /// L2CAP packet received on a registered channel. `data` borrows from the event buffer.
    L2capRx {
        conn_handle: u16,
        header: L2capHeader,
        data: &'a [u8],
    },
}

impl BleEvent<'_> {
    pub fn id(&self) -> u16 {
        match self {
            BleEvent::TxComplete { .. } => BLE_EVT_TX_COMPLETE,
            BleEvent::GapConnected { .. } => BLE_GAP_EVT_CONNECTED,
            BleEvent::GapDisconnected { .. } => BLE_GAP_EVT_DISCONNECTED,
            BleEvent::GapConnParamUpdate { .. } => BLE_GAP_EVT_CONN_PARAM_UPDATE,
            BleEvent::GapTimeout { .. } => BLE_GAP_EVT_TIMEOUT,
            BleEvent::GapRssiChanged { .. } => BLE_GAP_EVT_RSSI_CHANGED,
            BleEvent::L2capRx { .. } => BLE_L2CAP_EVT_RX,
        }
    }

    pub fn conn_handle(&self) -> u16 {
        match *self {
            BleEvent::TxComplete { conn_handle, .. }
            | BleEvent::GapConnected { conn_handle, .. }
            | BleEvent::GapDisconnected { conn_handle, .. }
            | BleEvent::GapConnParamUpdate { conn_handle, .. }
            | BleEvent::GapTimeout { conn_handle, .. }
            | BleEvent::GapRssiChanged { conn_handle, .. }
            | BleEvent::L2capRx { conn_handle, .. } => conn_handle,
        }
    }
}

impl Type for BleEvent<'_> {
    fn size(&self) -> usize {
        EVT_HEADER_SIZE
            + match self {
                BleEvent::TxComplete { count, .. } => count.size(),
                BleEvent::GapConnected {
                    peer_addr,
                    role,
                    conn_params,
                    ..
                } => peer_addr.size() + role.size() + conn_params.size(),
                BleEvent::GapDisconnected { reason, .. } => reason.size(),
                BleEvent::GapConnParamUpdate { conn_params, .. } => conn_params.size(),
                BleEvent::GapTimeout { src, .. } => src.size(),
                BleEvent::GapRssiChanged { rssi, .. } => rssi.size(),
                BleEvent::L2capRx { header, data, .. } => header.size() + data.len(),
            }
    }
}

impl Encode for BleEvent<'_> {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
        let mut w = WriteCursor::new(dest);
        w.write(self.id())?;
        w.write(self.conn_handle())?;
        match self {
            BleEvent::TxComplete { count, .. } => w.write(*count)?,
            BleEvent::GapConnected {
                peer_addr,
                role,
                conn_params,
                ..
            } => {
                w.write_ref(peer_addr)?;
                w.write(*role)?;
                w.write_ref(conn_params)?;
            }
            BleEvent::GapDisconnected { reason, .. } => w.write(*reason)?,
            BleEvent::GapConnParamUpdate { conn_params, .. } => w.write_ref(conn_params)?,
            BleEvent::GapTimeout { src, .. } => w.write(*src)?,
            BleEvent::GapRssiChanged { rssi, .. } => w.write(*rssi)?,
            BleEvent::L2capRx { header, data, .. } => {
                if header.len as usize != data.len() {
                    return Err(Error::InvalidParam);
                }
                w.write_ref(header)?;
                w.append(data)?;
            }
        }
        Ok(())
    }
}

impl<'a> Decode<'a> for BleEvent<'a> {
    fn decode(src: &'a [u8]) -> Result<Self, Error> {
        let mut r = ReadCursor::new(src);
        let id: u16 = r.read()?;
        let conn_handle: u16 = r.read()?;
        Ok(match id {
            BLE_EVT_TX_COMPLETE => BleEvent::TxComplete {
                conn_handle,
                count: r.read()?,
            },
            BLE_GAP_EVT_CONNECTED => BleEvent::GapConnected {
                conn_handle,
                peer_addr: r.read()?,
                role: r.read()?,
                conn_params: r.read()?,
            },
            BLE_GAP_EVT_DISCONNECTED => BleEvent::GapDisconnected {
                conn_handle,
                reason: r.read()?,
            },
            BLE_GAP_EVT_CONN_PARAM_UPDATE => BleEvent::GapConnParamUpdate {
                conn_handle,
                conn_params: r.read()?,
            },
            BLE_GAP_EVT_TIMEOUT => BleEvent::GapTimeout {
                conn_handle,
                src: r.read()?,
            },
            BLE_GAP_EVT_RSSI_CHANGED => BleEvent::GapRssiChanged {
                conn_handle,
                rssi: r.read()?,
            },
            BLE_L2CAP_EVT_RX => {
                let header: L2capHeader = r.read()?;
                BleEvent::L2capRx {
                    conn_handle,
                    header,
                    data: r.slice(header.len as usize)?,
                }
            }
            _ => return Err(Error::InvalidParam),
        })
    }
}

/// Encode an event into `buf`, returning the number of bytes written.
pub fn evt_enc(evt: &BleEvent<'_>, buf: &mut [u8]) -> Result<usize, Error> {
    let mut w = WriteCursor::new(buf);
    w.write_ref(evt)?;
    Ok(w.len())
}

/// Decode an event. Unknown event ids fail with [`Error::InvalidParam`].
pub fn evt_dec(buf: &[u8]) -> Result<BleEvent<'_>, Error> {
    let mut r = ReadCursor::new(buf);
    let evt = r.read()?;
    r.finish()?;
    Ok(evt)
}
