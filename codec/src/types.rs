//! Parameter types shared by several calls and events.

use crate::codec::{impl_codec, Decode, Encode, Error, FixedSize};

/// Implements the codec traits for a fieldless `#[repr(u8)]` enum with a `TryFrom<u8>` impl.
macro_rules! impl_u8_enum {
    ($ty:ident) => {
        impl FixedSize for $ty {
            const SIZE: usize = 1;
        }

        impl Encode for $ty {
            fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
                (*self as u8).encode(dest)
            }
        }

        impl Decode<'_> for $ty {
            fn decode(src: &[u8]) -> Result<Self, Error> {
                u8::decode(src)?.try_into()
            }
        }
    };
}

/// Bluetooth device address type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AddrType {
    #[default]
    Public = 0x00,
    RandomStatic = 0x01,
    RandomPrivateResolvable = 0x02,
    RandomPrivateNonResolvable = 0x03,
}

impl TryFrom<u8> for AddrType {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Public),
            0x01 => Ok(Self::RandomStatic),
            0x02 => Ok(Self::RandomPrivateResolvable),
            0x03 => Ok(Self::RandomPrivateNonResolvable),
            _ => Err(Error::InvalidParam),
        }
    }
}

impl_u8_enum!(AddrType);

/// Bluetooth device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapAddr {
    pub addr_type: AddrType,
    /// Least significant byte first.
    pub addr: [u8; 6],
}

impl_codec!(GapAddr { addr_type, addr });

/// Connection parameters, in 1.25 ms units except `conn_sup_timeout` (10 ms units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnParams {
    pub min_conn_interval: u16,
    pub max_conn_interval: u16,
    pub slave_latency: u16,
    pub conn_sup_timeout: u16,
}

impl_codec!(ConnParams {
    min_conn_interval,
    max_conn_interval,
    slave_latency,
    conn_sup_timeout,
});

/// Scan parameters. `interval` and `window` in 0.625 ms units, `timeout` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanParams {
    pub active: bool,
    pub selective: bool,
    pub interval: u16,
    pub window: u16,
    pub timeout: u16,
}

impl_codec!(ScanParams {
    active,
    selective,
    interval,
    window,
    timeout,
});

/// Advertising PDU type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AdvType {
    #[default]
    Ind = 0x00,
    DirectInd = 0x01,
    ScanInd = 0x02,
    NonconnInd = 0x03,
}

impl TryFrom<u8> for AdvType {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Ind),
            0x01 => Ok(Self::DirectInd),
            0x02 => Ok(Self::ScanInd),
            0x03 => Ok(Self::NonconnInd),
            _ => Err(Error::InvalidParam),
        }
    }
}

impl_u8_enum!(AdvType);

/// Advertising channels to skip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMask(u8);

bitflags::bitflags! {
    impl ChannelMask: u8 {
        const CH_37_OFF = 1 << 0;
        const CH_38_OFF = 1 << 1;
        const CH_39_OFF = 1 << 2;
    }
}

impl FixedSize for ChannelMask {
    const SIZE: usize = 1;
}

impl Encode for ChannelMask {
    fn encode(&self, dest: &mut [u8]) -> Result<(), Error> {
        self.bits().encode(dest)
    }
}

impl Decode<'_> for ChannelMask {
    fn decode(src: &[u8]) -> Result<Self, Error> {
        Self::from_bits(u8::decode(src)?).ok_or(Error::InvalidParam)
    }
}

/// Advertising parameters. `interval` in 0.625 ms units, `timeout` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdvParams {
    pub adv_type: AdvType,
    /// Filter policy.
    pub fp: u8,
    pub interval: u16,
    pub timeout: u16,
    pub channel_mask: ChannelMask,
}

impl_codec!(AdvParams {
    adv_type,
    fp,
    interval,
    timeout,
    channel_mask,
});

/// Security mode and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SecMode {
    pub sm: u8,
    pub lv: u8,
}

impl_codec!(SecMode { sm, lv });

/// Security state of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnSec {
    pub sec_mode: SecMode,
    pub encr_key_size: u8,
}

impl_codec!(ConnSec { sec_mode, encr_key_size });

/// UUID as a 16-bit value within a base UUID table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Uuid {
    pub uuid: u16,
    /// 1 for the Bluetooth SIG base, 2 and up for vendor specific bases.
    pub uuid_type: u8,
}

impl_codec!(Uuid { uuid, uuid_type });

/// Link layer version information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Version {
    pub version_number: u8,
    pub company_id: u16,
    pub subversion_number: u16,
}

impl_codec!(Version {
    version_number,
    company_id,
    subversion_number,
});

/// L2CAP basic header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct L2capHeader {
    /// Payload length.
    pub len: u16,
    /// Channel id.
    pub cid: u16,
}

impl_codec!(L2capHeader { len, cid });

/// Handle value operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum HvxType {
    Notification = 0x01,
    Indication = 0x02,
}

impl TryFrom<u8> for HvxType {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::Notification),
            0x02 => Ok(Self::Indication),
            _ => Err(Error::InvalidParam),
        }
    }
}

impl_u8_enum!(HvxType);

/// GATT service declaration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ServiceType {
    Primary = 0x01,
    Secondary = 0x02,
}

impl TryFrom<u8> for ServiceType {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::Primary),
            0x02 => Ok(Self::Secondary),
            _ => Err(Error::InvalidParam),
        }
    }
}

impl_u8_enum!(ServiceType);
