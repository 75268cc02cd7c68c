use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embedded_io_async::{Read, Write};
use nrf_ser_codec::config::{EVENT_QUEUE_SIZE, MAX_PACKET_SIZE};
use nrf_ser_codec::transport::{read_frame, write_frame, PacketType, TransportError};
use nrf_ser_codec::{evt_dec, req_enc, rsp_dec, BleEvent, Request, Response};

use crate::Error;

/// A received response or event payload.
pub type RxPacket = heapless::Vec<u8, MAX_PACKET_SIZE>;

/// Application end of a serialization link.
///
/// At most one call is outstanding at a time: [`Client::call`] holds the writer lock from
/// sending the command until its response has been taken from the depth-1 response mailbox.
/// Events are queued separately and never compete with responses.
///
/// A call dropped after its command went out still owes a response. The receive loop discards
/// that many responses before routing the next one, so a late answer never reaches a later call.
pub struct Client<M: RawMutex, W: Write> {
    writer: Mutex<M, W>,
    state: BlockingMutex<M, Cell<CallState>>,
    responses: Channel<M, RxPacket, 1>,
    events: Channel<M, RxPacket, EVENT_QUEUE_SIZE>,
}

#[derive(Debug, Clone, Copy, Default)]
struct CallState {
    /// A call is waiting for its response.
    waiting: bool,
    /// Responses still due to calls that were dropped.
    orphaned: usize,
}

/// Tracks one outstanding call. Dropping it before the response was taken marks the response
/// as orphaned, unless it is already sitting in the mailbox.
struct PendingCall<'a, M: RawMutex> {
    state: &'a BlockingMutex<M, Cell<CallState>>,
    responses: &'a Channel<M, RxPacket, 1>,
    sent: bool,
    answered: bool,
}

impl<'a, M: RawMutex> PendingCall<'a, M> {
    fn new(state: &'a BlockingMutex<M, Cell<CallState>>, responses: &'a Channel<M, RxPacket, 1>) -> Self {
        state.lock(|s| {
            let mut st = s.get();
            st.waiting = true;
            s.set(st);
        });
        Self {
            state,
            responses,
            sent: false,
            answered: false,
        }
    }
}

impl<M: RawMutex> Drop for PendingCall<'_, M> {
    fn drop(&mut self) {
        let late = self.sent && !self.answered && self.responses.try_receive().is_err();
        if late {
            warn!("[client] call dropped before its response arrived");
        }
        self.state.lock(|s| {
            let mut st = s.get();
            st.waiting = false;
            if late {
                st.orphaned = st.orphaned.saturating_add(1);
            }
            s.set(st);
        });
    }
}

impl<M: RawMutex, W: Write> Client<M, W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            state: BlockingMutex::new(Cell::new(CallState::default())),
            responses: Channel::new(),
            events: Channel::new(),
        }
    }

    /// Receive loop. Routes responses to the waiting call and events to the event queue.
    ///
    /// Malformed frames, responses nobody waits for and events that overflow the queue are
    /// logged and dropped. Returns only when the link fails.
    pub async fn run<R: Read>(&self, mut reader: R) -> Result<(), Error> {
        let mut rx = [0u8; MAX_PACKET_SIZE];
        loop {
            let frame = match read_frame(&mut reader, &mut rx).await {
                Ok(frame) => frame,
                Err(TransportError::Codec(e)) => {
                    warn!("[client] dropping frame: {:?}", e);
                    continue;
                }
                Err(TransportError::Io(kind)) => {
                    error!("[client] link error: {:?}", kind);
                    return Err(Error::Transport(kind));
                }
            };
            let Ok(packet) = RxPacket::from_slice(frame.payload) else {
                warn!("[client] dropping {} byte packet", frame.payload.len());
                continue;
            };

            match frame.packet_type {
                PacketType::Response => match self.claim_response() {
                    Route::Orphaned => debug!("[client] discarding response of a dropped call"),
                    Route::Unexpected => warn!("[client] unexpected response, dropping"),
                    Route::Waiting => {
                        if self.responses.try_send(packet).is_err() {
                            warn!("[client] response mailbox full, dropping");
                        }
                    }
                },
                PacketType::Event => {
                    if self.events.try_send(packet).is_err() {
                        warn!("[client] event queue full, dropping event");
                    }
                }
                other => warn!("[client] ignoring {:?} frame", other),
            }
        }
    }

    /// Send a request and wait for its response.
    ///
    /// The response is stored in `rsp` and decoded from there, so variable-length outputs
    /// borrow from it. A response for another opcode fails with
    /// [`InvalidParam`](nrf_ser_codec::Error::InvalidParam).
    pub async fn call<'r, R: Request>(&self, req: &R, rsp: &'r mut RxPacket) -> Result<Response<R::Output<'r>>, Error> {
        let mut tx = [0u8; MAX_PACKET_SIZE];
        let len = req_enc(req, &mut tx)?;

        let mut writer = self.writer.lock().await;
        while self.responses.try_receive().is_ok() {
            warn!("[client] discarding stale response");
        }

        let mut pending = PendingCall::new(&self.state, &self.responses);
        trace!("[client] call {:?}", R::OPCODE);
        write_frame(&mut *writer, PacketType::Command, &tx[..len]).await?;
        pending.sent = true;
        *rsp = self.responses.receive().await;
        pending.answered = true;
        drop(pending);
        drop(writer);

        Ok(rsp_dec::<R>(rsp)?)
    }

    fn claim_response(&self) -> Route {
        self.state.lock(|s| {
            let mut st = s.get();
            let route = if st.orphaned > 0 {
                st.orphaned -= 1;
                Route::Orphaned
            } else if st.waiting {
                Route::Waiting
            } else {
                Route::Unexpected
            };
            s.set(st);
            route
        })
    }

    /// Ask the connectivity chip to reset its SoftDevice. No response is sent.
    pub async fn reset(&self) -> Result<(), Error> {
        let mut writer = self.writer.lock().await;
        write_frame(&mut *writer, PacketType::ResetCommand, &[]).await?;
        Ok(())
    }

    /// Wait for the next SoftDevice event. Decode it with [`decode_event`].
    pub async fn next_event(&self) -> RxPacket {
        self.events.receive().await
    }

    /// Take a queued event without waiting.
    pub fn try_next_event(&self) -> Option<RxPacket> {
        self.events.try_receive().ok()
    }
}

enum Route {
    Orphaned,
    Waiting,
    Unexpected,
}

/// Decode an event taken from [`Client::next_event`]. Data fields borrow from `packet`.
pub fn decode_event(packet: &RxPacket) -> Result<BleEvent<'_>, Error> {
    Ok(evt_dec(packet)?)
}

#[cfg(test)]
mod tests {
    use embassy_futures::join::join;
    use embassy_futures::select::{select, Either};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::pipe::Pipe;
    use futures_executor::block_on;
    use nrf_ser_codec::gap::{GapAppearanceGet, GapRssiStart};
    use nrf_ser_codec::nrf_error::NRF_ERROR_INVALID_STATE;
    use nrf_ser_codec::Error as CodecError;

    use super::*;

    type TestPipe = Pipe<NoopRawMutex, 256>;

    const RSSI_START: GapRssiStart = GapRssiStart {
        conn_handle: 3,
        threshold_dbm: 10,
        skip_count: 2,
    };

    async fn respond(to_app: &TestPipe, from_app: &TestPipe, response: &[u8]) -> heapless::Vec<u8, 64> {
        let mut rx = [0u8; 64];
        let frame = read_frame(from_app, &mut rx).await.unwrap();
        assert_eq!(frame.packet_type, PacketType::Command);
        let request = heapless::Vec::from_slice(frame.payload).unwrap();
        write_frame(to_app, PacketType::Response, response).await.unwrap();
        request
    }

    #[test]
    fn call_round_trip() {
        let to_app = TestPipe::new();
        let from_app = TestPipe::new();
        let client = Client::<NoopRawMutex, _>::new(&from_app);

        let test = async {
            let mut rsp = RxPacket::new();
            let (result, request) = join(
                client.call(&RSSI_START, &mut rsp),
                respond(&to_app, &from_app, &[0x84, 0, 0, 0, 0]),
            )
            .await;
            assert_eq!(result, Ok(Response::Success(())));
            assert_eq!(&request[..], &[0x84, 0x03, 0x00, 0x0A, 0x02]);
        };

        match block_on(select(client.run(&to_app), test)) {
            Either::First(res) => panic!("client stopped: {:?}", res),
            Either::Second(()) => {}
        }
    }

    #[test]
    fn remote_failure_is_returned() {
        let to_app = TestPipe::new();
        let from_app = TestPipe::new();
        let client = Client::<NoopRawMutex, _>::new(&from_app);

        let test = async {
            let mut rsp = RxPacket::new();
            let (result, _) = join(
                client.call(&RSSI_START, &mut rsp),
                respond(&to_app, &from_app, &[0x84, 0x08, 0, 0, 0]),
            )
            .await;
            assert_eq!(result, Ok(Response::Failed(NRF_ERROR_INVALID_STATE)));
        };

        match block_on(select(client.run(&to_app), test)) {
            Either::First(res) => panic!("client stopped: {:?}", res),
            Either::Second(()) => {}
        }
    }

    #[test]
    fn mismatched_response_opcode() {
        let to_app = TestPipe::new();
        let from_app = TestPipe::new();
        let client = Client::<NoopRawMutex, _>::new(&from_app);

        let test = async {
            let mut rsp = RxPacket::new();
            let (result, _) = join(
                client.call(&RSSI_START, &mut rsp),
                respond(&to_app, &from_app, &[0x85, 0, 0, 0, 0]),
            )
            .await;
            assert_eq!(result, Err(Error::Codec(CodecError::InvalidParam)));
        };

        match block_on(select(client.run(&to_app), test)) {
            Either::First(res) => panic!("client stopped: {:?}", res),
            Either::Second(()) => {}
        }
    }

    #[test]
    fn unsolicited_response_is_dropped() {
        let to_app = TestPipe::new();
        let from_app = TestPipe::new();
        let client = Client::<NoopRawMutex, _>::new(&from_app);

        let test = async {
            // Arrives while no call is outstanding.
            write_frame(&to_app, PacketType::Response, &[0x84, 0, 0, 0, 0])
                .await
                .unwrap();
            // An event behind it proves the receive loop has consumed the response.
            write_frame(&to_app, PacketType::Event, &[0x11, 0x00, 0x01, 0x00, 0x13])
                .await
                .unwrap();
            let evt = client.next_event().await;
            assert_eq!(
                decode_event(&evt),
                Ok(BleEvent::GapDisconnected {
                    conn_handle: 1,
                    reason: 0x13
                })
            );

            let mut rsp = RxPacket::new();
            let (result, _) = join(
                client.call(&GapAppearanceGet, &mut rsp),
                respond(&to_app, &from_app, &[0x75, 0, 0, 0, 0, 0x40, 0x00]),
            )
            .await;
            assert_eq!(result, Ok(Response::Success(0x0040)));
        };

        match block_on(select(client.run(&to_app), test)) {
            Either::First(res) => panic!("client stopped: {:?}", res),
            Either::Second(()) => {}
        }
    }

    #[test]
    fn events_overflow_queue() {
        let to_app = TestPipe::new();
        let from_app = TestPipe::new();
        let client = Client::<NoopRawMutex, _>::new(&from_app);

        let test = async {
            for reason in 0..(EVENT_QUEUE_SIZE as u8 + 2) {
                write_frame(&to_app, PacketType::Event, &[0x11, 0x00, 0x00, 0x00, reason])
                    .await
                    .unwrap();
            }
            // Not meant for the application, ignored by the receive loop.
            write_frame(&to_app, PacketType::DtmResponse, &[0x00]).await.unwrap();
            let mut rsp = RxPacket::new();
            let (result, _) = join(
                client.call(&GapAppearanceGet, &mut rsp),
                respond(&to_app, &from_app, &[0x75, 0, 0, 0, 0, 0x40, 0x00]),
            )
            .await;
            assert!(result.is_ok());

            let mut received = 0;
            while client.try_next_event().is_some() {
                received += 1;
            }
            assert_eq!(received, EVENT_QUEUE_SIZE);
        };

        match block_on(select(client.run(&to_app), test)) {
            Either::First(res) => panic!("client stopped: {:?}", res),
            Either::Second(()) => {}
        }
    }

    #[test]
    fn late_response_of_dropped_call_is_discarded() {
        let to_app = TestPipe::new();
        let from_app = TestPipe::new();
        let client = Client::<NoopRawMutex, _>::new(&from_app);

        let test = async {
            // Give up on the first call as soon as its command is on the wire.
            let mut abandoned = RxPacket::new();
            let mut rx = [0u8; 64];
            match select(client.call(&GapAppearanceGet, &mut abandoned), read_frame(&from_app, &mut rx)).await {
                Either::First(res) => panic!("call finished without a response: {:?}", res),
                Either::Second(frame) => assert_eq!(frame.unwrap().packet_type, PacketType::Command),
            }

            let mut rsp = RxPacket::new();
            let (result, request) = join(client.call(&GapAppearanceGet, &mut rsp), async {
                // The answer to the dropped call shows up after the next call started.
                write_frame(&to_app, PacketType::Response, &[0x75, 0, 0, 0, 0, 0x01, 0x00])
                    .await
                    .unwrap();
                respond(&to_app, &from_app, &[0x75, 0, 0, 0, 0, 0x02, 0x00]).await
            })
            .await;
            assert_eq!(result, Ok(Response::Success(0x0002)));
            assert_eq!(&request[..], &[0x75]);
        };

        match block_on(select(client.run(&to_app), test)) {
            Either::First(res) => panic!("client stopped: {:?}", res),
            Either::Second(()) => {}
        }
    }

    #[test]
    fn request_too_large_is_rejected_before_sending() {
        let from_app = TestPipe::new();
        let client = Client::<NoopRawMutex, _>::new(&from_app);
        let value = [0u8; MAX_PACKET_SIZE];
        let req = nrf_ser_codec::gatts::GattsValueSet {
            conn_handle: 0,
            handle: 1,
            offset: 0,
            value: nrf_ser_codec::Value(&value),
        };
        let mut rsp = RxPacket::new();
        assert_eq!(
            block_on(client.call(&req, &mut rsp)),
            Err(Error::Codec(CodecError::InvalidLength))
        );
        assert!(from_app.is_empty());
    }
}
