use core::future::Future;

use embassy_futures::join::join;
use embassy_futures::select::{select3, Either3};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::pipe::Pipe;
use futures_executor::block_on;
use nrf_ser_app::{decode_event, Client, Error, SoftDevice};
use nrf_ser_codec::nrf_error::{NRF_ERROR_INVALID_STATE, NRF_ERROR_NOT_SUPPORTED, NRF_ERROR_NULL};
use nrf_ser_codec::types::{GapAddr, L2capHeader, SecMode, Uuid, Version};
use nrf_ser_codec::BleEvent;
use nrf_ser_conn::Server;

#[derive(Default)]
struct MockSd {
    connected: bool,
    rssi: Option<(u16, u8, u8)>,
    name: heapless::Vec<u8, 32>,
    vs_uuids: u8,
    l2cap_rx: heapless::Vec<u8, 64>,
    value: heapless::Vec<u8, 32>,
}

impl nrf_ser_conn::SoftDevice for MockSd {
    fn ble_uuid_vs_add(&mut self, _uuid128: &[u8; 16]) -> Result<u8, u32> {
        self.vs_uuids += 1;
        Ok(1 + self.vs_uuids)
    }

    fn ble_uuid_encode(&mut self, uuid: &Uuid, out: &mut [u8; 16]) -> Result<usize, u32> {
        out[..2].copy_from_slice(&uuid.uuid.to_le_bytes());
        Ok(2)
    }

    fn ble_version_get(&mut self) -> Result<Version, u32> {
        Ok(Version {
            version_number: 8,
            company_id: 0x0059,
            subversion_number: 0x0087,
        })
    }

    fn gap_address_get(&mut self) -> Result<GapAddr, u32> {
        Ok(GapAddr::default())
    }

    fn gap_device_name_set(&mut self, _write_perm: &SecMode, name: &[u8]) -> Result<(), u32> {
        self.name = heapless::Vec::from_slice(name).map_err(|_| nrf_ser_codec::nrf_error::NRF_ERROR_DATA_SIZE)?;
        Ok(())
    }

    fn gap_device_name_get(&mut self, out: &mut [u8]) -> Result<usize, u32> {
        let n = self.name.len().min(out.len());
        out[..n].copy_from_slice(&self.name[..n]);
        Ok(n)
    }

    fn gap_rssi_start(&mut self, conn_handle: u16, threshold_dbm: u8, skip_count: u8) -> Result<(), u32> {
        if !self.connected {
            return Err(NRF_ERROR_INVALID_STATE);
        }
        self.rssi = Some((conn_handle, threshold_dbm, skip_count));
        Ok(())
    }

    fn gap_rssi_get(&mut self, _conn_handle: u16) -> Result<i8, u32> {
        Ok(-42)
    }

    fn gap_appearance_get(&mut self) -> Result<u16, u32> {
        Ok(0x03C1)
    }

    fn gatts_value_set(&mut self, _conn_handle: u16, _handle: u16, _offset: u16, value: &[u8]) -> Result<u16, u32> {
        self.value = heapless::Vec::from_slice(value).map_err(|_| nrf_ser_codec::nrf_error::NRF_ERROR_DATA_SIZE)?;
        Ok(value.len() as u16)
    }

    fn gatts_value_get(&mut self, _conn_handle: u16, _handle: u16, offset: u16, out: &mut [u8]) -> Result<usize, u32> {
        let value = self.value.get(offset as usize..).unwrap_or(&[]);
        let n = value.len().min(out.len());
        out[..n].copy_from_slice(&value[..n]);
        Ok(n)
    }

    fn l2cap_tx(&mut self, _conn_handle: u16, header: &L2capHeader, data: &[u8]) -> Result<(), u32> {
        assert_eq!(header.len as usize, data.len());
        self.l2cap_rx.extend_from_slice(data).map_err(|_| nrf_ser_codec::nrf_error::NRF_ERROR_NO_MEM)
    }
}

struct Link {
    to_conn: LinkPipe,
    to_app: LinkPipe,
}

impl Link {
    fn new() -> Self {
        Self {
            to_conn: Pipe::new(),
            to_app: Pipe::new(),
        }
    }

    fn client(&self) -> AppClient<'_> {
        Client::new(&self.to_conn)
    }

    fn server(&self) -> ConnServer<'_> {
        Server::new(&self.to_app)
    }
}

type LinkPipe = Pipe<NoopRawMutex, 512>;
type AppClient<'a> = Client<NoopRawMutex, &'a LinkPipe>;
type ConnServer<'a> = Server<NoopRawMutex, &'a LinkPipe>;

/// Polls both ends of the link until `test` completes.
fn drive(link: &Link, client: &AppClient<'_>, server: &ConnServer<'_>, sd: &mut MockSd, test: impl Future<Output = ()>) {
    match block_on(select3(
        client.run(&link.to_app),
        server.run(&link.to_conn, sd),
        test,
    )) {
        Either3::First(res) => panic!("client stopped: {:?}", res),
        Either3::Second(res) => panic!("server stopped: {:?}", res),
        Either3::Third(()) => {}
    }
}

#[test]
fn rssi_start_reaches_softdevice() {
    let link = Link::new();
    let client = link.client();
    let server = link.server();
    let api = SoftDevice::new(&client);
    let mut sd = MockSd {
        connected: true,
        ..Default::default()
    };

    drive(&link, &client, &server, &mut sd, async {
        assert_eq!(api.gap_rssi_start(3, 10, 2).await, Ok(()));
    });
    assert_eq!(sd.rssi, Some((3, 10, 2)));
}

#[test]
fn remote_errors_are_reported() {
    let link = Link::new();
    let client = link.client();
    let server = link.server();
    let api = SoftDevice::new(&client);
    let mut sd = MockSd::default();

    drive(&link, &client, &server, &mut sd, async {
        assert_eq!(
            api.gap_rssi_start(3, 10, 2).await,
            Err(Error::Remote(NRF_ERROR_INVALID_STATE))
        );
        assert_eq!(api.gap_adv_stop().await, Err(Error::Remote(NRF_ERROR_NOT_SUPPORTED)));
        assert_eq!(api.l2cap_tx(1, 0x40, &[]).await, Err(Error::Remote(NRF_ERROR_NULL)));
        // The link is still usable after failures.
        assert_eq!(api.gap_appearance_get().await, Ok(0x03C1));
    });
    assert_eq!(sd.rssi, None);
}

#[test]
fn fixed_size_outputs() {
    let link = Link::new();
    let client = link.client();
    let server = link.server();
    let api = SoftDevice::new(&client);
    let mut sd = MockSd::default();

    drive(&link, &client, &server, &mut sd, async {
        assert_eq!(api.ble_uuid_vs_add(&[0xAB; 16]).await, Ok(2));
        assert_eq!(api.ble_uuid_vs_add(&[0xCD; 16]).await, Ok(3));
        assert_eq!(
            api.ble_version_get().await,
            Ok(Version {
                version_number: 8,
                company_id: 0x0059,
                subversion_number: 0x0087,
            })
        );
        assert_eq!(api.gap_address_get().await, Ok(GapAddr::default()));
        assert_eq!(api.gap_rssi_get(0).await, Ok(-42));
    });
    assert_eq!(sd.vs_uuids, 2);
}

#[test]
fn variable_length_data_round_trips() {
    let link = Link::new();
    let client = link.client();
    let server = link.server();
    let api = SoftDevice::new(&client);
    let mut sd = MockSd::default();

    drive(&link, &client, &server, &mut sd, async {
        let open = SecMode { sm: 1, lv: 1 };
        api.gap_device_name_set(&open, b"nrf-ser").await.unwrap();

        let mut name = [0u8; 32];
        let n = api.gap_device_name_get(&mut name).await.unwrap();
        assert_eq!(&name[..n], b"nrf-ser");

        let mut short = [0u8; 3];
        let n = api.gap_device_name_get(&mut short).await.unwrap();
        assert_eq!(&short[..n], b"nrf");

        assert_eq!(api.gatts_value_set(0, 0x0E, 0, &[1, 2, 3, 4]).await, Ok(4));
        let mut value = [0u8; 8];
        let n = api.gatts_value_get(0, 0x0E, 1, &mut value).await.unwrap();
        assert_eq!(&value[..n], &[2, 3, 4]);

        let mut raw = [0u8; 16];
        let uuid = Uuid {
            uuid: 0x180D,
            uuid_type: 1,
        };
        let n = api.ble_uuid_encode(&uuid, &mut raw).await.unwrap();
        assert_eq!(&raw[..n], &[0x0D, 0x18]);

        api.l2cap_tx(1, 0x40, &[0xDE, 0xAD]).await.unwrap();
        api.l2cap_tx(1, 0x40, &[0xBE, 0xEF]).await.unwrap();
    });
    assert_eq!(&sd.l2cap_rx[..], &[0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn concurrent_calls_are_serialized() {
    let link = Link::new();
    let client = link.client();
    let server = link.server();
    let api = SoftDevice::new(&client);
    let mut sd = MockSd::default();

    drive(&link, &client, &server, &mut sd, async {
        let (appearance, rssi) = join(api.gap_appearance_get(), api.gap_rssi_get(7)).await;
        assert_eq!(appearance, Ok(0x03C1));
        assert_eq!(rssi, Ok(-42));
    });
}

#[test]
fn events_reach_the_application() {
    let link = Link::new();
    let client = link.client();
    let server = link.server();
    let api = SoftDevice::new(&client);
    let mut sd = MockSd::default();

    drive(&link, &client, &server, &mut sd, async {
        server
            .send_event(&BleEvent::GapRssiChanged {
                conn_handle: 3,
                rssi: -60,
            })
            .await
            .unwrap();
        // Calls still get their responses while events are queued.
        assert_eq!(api.gap_appearance_get().await, Ok(0x03C1));

        let header = L2capHeader { len: 3, cid: 0x40 };
        server
            .send_event(&BleEvent::L2capRx {
                conn_handle: 3,
                header,
                data: &[7, 8, 9],
            })
            .await
            .unwrap();

        let packet = client.next_event().await;
        assert_eq!(
            decode_event(&packet),
            Ok(BleEvent::GapRssiChanged {
                conn_handle: 3,
                rssi: -60
            })
        );

        let packet = client.next_event().await;
        match decode_event(&packet).unwrap() {
            BleEvent::L2capRx {
                conn_handle,
                header: rx_header,
                data,
            } => {
                assert_eq!(conn_handle, 3);
                assert_eq!(rx_header, header);
                assert_eq!(data, &[7, 8, 9]);
            }
            other => panic!("unexpected event {:?}", other),
        }
    });
}
