use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_io_async::{Read, Write};
use nrf_ser_codec::config::MAX_PACKET_SIZE;
use nrf_ser_codec::transport::{read_frame, write_frame, PacketType, TransportError};
use nrf_ser_codec::{evt_enc, BleEvent};

use crate::{dispatch, Error, SoftDevice};

/// Serves SoftDevice calls arriving over a serial link.
///
/// The writer is shared between responses produced by [`Server::run`] and events pushed with
/// [`Server::send_event`], so both can be driven from concurrent tasks.
pub struct Server<M: RawMutex, W: Write> {
    writer: Mutex<M, W>,
}

impl<M: RawMutex, W: Write> Server<M, W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Read and answer commands until the link fails.
    ///
    /// Malformed frames are logged and skipped. Only an I/O error ends the loop.
    pub async fn run<R: Read, S: SoftDevice + ?Sized>(&self, mut reader: R, sd: &mut S) -> Result<(), Error> {
        let mut rx = [0u8; MAX_PACKET_SIZE];
        let mut tx = [0u8; MAX_PACKET_SIZE];
        info!("[server] started");
        loop {
            let frame = match read_frame(&mut reader, &mut rx).await {
                Ok(frame) => frame,
                Err(TransportError::Codec(e)) => {
                    warn!("[server] dropping frame: {:?}", e);
                    continue;
                }
                Err(TransportError::Io(kind)) => {
                    error!("[server] link error: {:?}", kind);
                    return Err(Error::Transport(kind));
                }
            };

            match frame.packet_type {
                PacketType::Command => match dispatch(sd, frame.payload, &mut tx) {
                    Ok(len) => self.send(PacketType::Response, &tx[..len]).await?,
                    Err(e) => warn!("[server] unable to answer command: {:?}", e),
                },
                PacketType::ResetCommand => {
                    info!("[server] reset requested");
                    sd.reset();
                }
                other => warn!("[server] ignoring {:?} frame", other),
            }
        }
    }

    /// Push a SoftDevice event to the application.
    pub async fn send_event(&self, evt: &BleEvent<'_>) -> Result<(), Error> {
        let mut buf = [0u8; MAX_PACKET_SIZE];
        let len = evt_enc(evt, &mut buf)?;
        debug!("[server] event {:?} on {}", evt.id(), evt.conn_handle());
        self.send(PacketType::Event, &buf[..len]).await
    }

    async fn send(&self, packet_type: PacketType, payload: &[u8]) -> Result<(), Error> {
        let mut writer = self.writer.lock().await;
        write_frame(&mut *writer, packet_type, payload).await?;
        Ok(())
    }
}
