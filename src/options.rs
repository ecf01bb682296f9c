use std::net::Ipv6Addr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::duid::Duid;
use crate::error::{Error, Result};
use crate::message::DhcpRelayMessage;
use crate::wire;

/// Option header size: 2-octet code plus 2-octet length.
const OPTION_HEADER_LEN: usize = 4;

/// Largest body the 16-bit length field can describe.
const MAX_OPTION_LEN: usize = 65535;

/// An Option Request Option holds at most this many 16-bit codes.
const MAX_ORO_CODES: usize = 32767;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u16)]
pub enum OptionCode {
    ClientId = 1,
    ServerId = 2,
    IaNa = 3,
    IaTa = 4,
    IaAddr = 5,
    Oro = 6,
    Preference = 7,
    ElapsedTime = 8,
    RelayMsg = 9,
    Auth = 11,
    Unicast = 12,
    StatusCode = 13,
    RapidCommit = 14,
    UserClass = 15,
    VendorClass = 16,
    VendorOpts = 17,
    InterfaceId = 18,
    ReconfMsg = 19,
    ReconfAccept = 20,
    IaPd = 25,
    IaPrefix = 26,
    Fqdn = 39,
    NextHop = 242,
    RtPrefix = 243,
    Mtu = 244,
}

impl TryFrom<u16> for OptionCode {
    type Error = u16;

    fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::ClientId),
            2 => Ok(Self::ServerId),
            3 => Ok(Self::IaNa),
            4 => Ok(Self::IaTa),
            5 => Ok(Self::IaAddr),
            6 => Ok(Self::Oro),
            7 => Ok(Self::Preference),
            8 => Ok(Self::ElapsedTime),
            9 => Ok(Self::RelayMsg),
            11 => Ok(Self::Auth),
            12 => Ok(Self::Unicast),
            13 => Ok(Self::StatusCode),
            14 => Ok(Self::RapidCommit),
            15 => Ok(Self::UserClass),
            16 => Ok(Self::VendorClass),
            17 => Ok(Self::VendorOpts),
            18 => Ok(Self::InterfaceId),
            19 => Ok(Self::ReconfMsg),
            20 => Ok(Self::ReconfAccept),
            25 => Ok(Self::IaPd),
            26 => Ok(Self::IaPrefix),
            39 => Ok(Self::Fqdn),
            242 => Ok(Self::NextHop),
            243 => Ok(Self::RtPrefix),
            244 => Ok(Self::Mtu),
            other => Err(other),
        }
    }
}

/// Well-known status codes carried by the StatusCode option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum StatusCode {
    Success = 0,
    UnspecFail = 1,
    NoAddrsAvail = 2,
    NoBinding = 3,
    NotOnLink = 4,
    UseMulticast = 5,
}

impl TryFrom<u8> for StatusCode {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::UnspecFail),
            2 => Ok(Self::NoAddrsAvail),
            3 => Ok(Self::NoBinding),
            4 => Ok(Self::NotOnLink),
            5 => Ok(Self::UseMulticast),
            other => Err(other),
        }
    }
}

/// A single DHCPv6 option.
///
/// Container variants (`IaNa`, `IaTa`, `IaAddr`, `IaPd`, `IaPrefix`,
/// `NextHop`) own their nested options by value and preserve their wire
/// order. Codes the crate does not recognize decode to `Unknown` with the
/// body preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DhcpOption {
    ClientId(Duid),
    ServerId(Duid),
    IaNa {
        iaid: [u8; 4],
        t1: u32,
        t2: u32,
        options: Vec<DhcpOption>,
    },
    IaTa {
        iaid: [u8; 4],
        options: Vec<DhcpOption>,
    },
    IaAddr {
        address: Ipv6Addr,
        preferred_lifetime: u32,
        valid_lifetime: u32,
        options: Vec<DhcpOption>,
    },
    Oro(Vec<u16>),
    Preference(u8),
    ElapsedTime(u16),
    RelayMsg(DhcpRelayMessage),
    Auth {
        protocol: u8,
        algorithm: u8,
        rdm: u8,
        replay_detection: [u8; 8],
        auth_info: Vec<u8>,
    },
    Unicast(Ipv6Addr),
    StatusCode {
        code: u8,
        message: Vec<u8>,
    },
    RapidCommit,
    UserClass(Vec<Vec<u8>>),
    VendorClass(Vec<Vec<u8>>),
    VendorOpts {
        enterprise_number: u32,
        options: Vec<(u16, Vec<u8>)>,
    },
    InterfaceId(Vec<u8>),
    ReconfMsg(u8),
    ReconfAccept,
    IaPd {
        iaid: [u8; 4],
        t1: u32,
        t2: u32,
        options: Vec<DhcpOption>,
    },
    IaPrefix {
        preferred_lifetime: u32,
        valid_lifetime: u32,
        prefix_len: u8,
        prefix: Ipv6Addr,
        options: Vec<DhcpOption>,
    },
    Fqdn {
        flags: u8,
        domain: Vec<u8>,
    },
    NextHop {
        address: Ipv6Addr,
        options: Vec<DhcpOption>,
    },
    RtPrefix {
        lifetime: u32,
        prefix_len: u8,
        metric: u8,
        prefix: Ipv6Addr,
    },
    Mtu(u16),
    Unknown(u16, Vec<u8>),
}

impl DhcpOption {
    pub fn code(&self) -> u16 {
        match self {
            Self::ClientId(_) => OptionCode::ClientId as u16,
            Self::ServerId(_) => OptionCode::ServerId as u16,
            Self::IaNa { .. } => OptionCode::IaNa as u16,
            Self::IaTa { .. } => OptionCode::IaTa as u16,
            Self::IaAddr { .. } => OptionCode::IaAddr as u16,
            Self::Oro(_) => OptionCode::Oro as u16,
            Self::Preference(_) => OptionCode::Preference as u16,
            Self::ElapsedTime(_) => OptionCode::ElapsedTime as u16,
            Self::RelayMsg(_) => OptionCode::RelayMsg as u16,
            Self::Auth { .. } => OptionCode::Auth as u16,
            Self::Unicast(_) => OptionCode::Unicast as u16,
            Self::StatusCode { .. } => OptionCode::StatusCode as u16,
            Self::RapidCommit => OptionCode::RapidCommit as u16,
            Self::UserClass(_) => OptionCode::UserClass as u16,
            Self::VendorClass(_) => OptionCode::VendorClass as u16,
            Self::VendorOpts { .. } => OptionCode::VendorOpts as u16,
            Self::InterfaceId(_) => OptionCode::InterfaceId as u16,
            Self::ReconfMsg(_) => OptionCode::ReconfMsg as u16,
            Self::ReconfAccept => OptionCode::ReconfAccept as u16,
            Self::IaPd { .. } => OptionCode::IaPd as u16,
            Self::IaPrefix { .. } => OptionCode::IaPrefix as u16,
            Self::Fqdn { .. } => OptionCode::Fqdn as u16,
            Self::NextHop { .. } => OptionCode::NextHop as u16,
            Self::RtPrefix { .. } => OptionCode::RtPrefix as u16,
            Self::Mtu(_) => OptionCode::Mtu as u16,
            Self::Unknown(code, _) => *code,
        }
    }

    /// Decodes one option from the start of `data`.
    ///
    /// Octets past the declared option length are ignored; callers decoding
    /// a sequence should use the message or container decoders, which
    /// require exact consumption.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let code = wire::read_u16(data, 0)?;
        let length = wire::read_u16(data, 2)? as usize;
        let body = wire::read_bytes(data, OPTION_HEADER_LEN, length)?;
        Self::parse(code, body)
    }

    pub fn parse(code: u16, data: &[u8]) -> Result<Self> {
        match OptionCode::try_from(code) {
            Ok(OptionCode::ClientId) => Ok(Self::ClientId(Duid::decode(data)?)),
            Ok(OptionCode::ServerId) => Ok(Self::ServerId(Duid::decode(data)?)),
            Ok(OptionCode::IaNa) => {
                if data.len() < 12 {
                    return Err(Error::UnexpectedEof);
                }
                let mut iaid = [0u8; 4];
                iaid.copy_from_slice(&data[..4]);
                Ok(Self::IaNa {
                    iaid,
                    t1: wire::read_u32(data, 4)?,
                    t2: wire::read_u32(data, 8)?,
                    options: parse_options(&data[12..])?,
                })
            }
            Ok(OptionCode::IaTa) => {
                if data.len() < 4 {
                    return Err(Error::UnexpectedEof);
                }
                let mut iaid = [0u8; 4];
                iaid.copy_from_slice(&data[..4]);
                Ok(Self::IaTa {
                    iaid,
                    options: parse_options(&data[4..])?,
                })
            }
            Ok(OptionCode::IaAddr) => {
                if data.len() < 24 {
                    return Err(Error::UnexpectedEof);
                }
                Ok(Self::IaAddr {
                    address: wire::read_ipv6(data, 0)?,
                    preferred_lifetime: wire::read_u32(data, 16)?,
                    valid_lifetime: wire::read_u32(data, 20)?,
                    options: parse_options(&data[24..])?,
                })
            }
            Ok(OptionCode::Oro) => {
                if data.len() % 2 != 0 {
                    return Err(Error::InvalidData(
                        "Option request list length must be even".to_string(),
                    ));
                }
                let codes = data
                    .chunks_exact(2)
                    .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                    .collect();
                Ok(Self::Oro(codes))
            }
            Ok(OptionCode::Preference) => {
                if data.len() != 1 {
                    return Err(Error::InvalidData(
                        "Preference length must be 1".to_string(),
                    ));
                }
                Ok(Self::Preference(data[0]))
            }
            Ok(OptionCode::ElapsedTime) => {
                if data.len() != 2 {
                    return Err(Error::InvalidData(
                        "Elapsed time length must be 2".to_string(),
                    ));
                }
                Ok(Self::ElapsedTime(wire::read_u16(data, 0)?))
            }
            Ok(OptionCode::RelayMsg) => Ok(Self::RelayMsg(DhcpRelayMessage::decode(data)?)),
            Ok(OptionCode::Auth) => {
                if data.len() < 11 {
                    return Err(Error::UnexpectedEof);
                }
                let mut replay_detection = [0u8; 8];
                replay_detection.copy_from_slice(&data[3..11]);
                Ok(Self::Auth {
                    protocol: data[0],
                    algorithm: data[1],
                    rdm: data[2],
                    replay_detection,
                    auth_info: data[11..].to_vec(),
                })
            }
            Ok(OptionCode::Unicast) => {
                if data.len() != 16 {
                    return Err(Error::InvalidData(
                        "Server unicast length must be 16".to_string(),
                    ));
                }
                Ok(Self::Unicast(wire::read_ipv6(data, 0)?))
            }
            Ok(OptionCode::StatusCode) => Ok(Self::StatusCode {
                code: wire::read_u8(data, 0)?,
                message: data[1..].to_vec(),
            }),
            Ok(OptionCode::RapidCommit) => {
                if !data.is_empty() {
                    return Err(Error::InvalidData(
                        "Rapid commit carries no payload".to_string(),
                    ));
                }
                Ok(Self::RapidCommit)
            }
            Ok(OptionCode::UserClass) => Ok(Self::UserClass(parse_class_data(data)?)),
            Ok(OptionCode::VendorClass) => Ok(Self::VendorClass(parse_class_data(data)?)),
            Ok(OptionCode::VendorOpts) => {
                if data.len() < 4 {
                    return Err(Error::UnexpectedEof);
                }
                Ok(Self::VendorOpts {
                    enterprise_number: wire::read_u32(data, 0)?,
                    options: parse_vendor_suboptions(&data[4..])?,
                })
            }
            Ok(OptionCode::InterfaceId) => Ok(Self::InterfaceId(data.to_vec())),
            Ok(OptionCode::ReconfMsg) => {
                if data.len() != 1 {
                    return Err(Error::InvalidData(
                        "Reconfigure message length must be 1".to_string(),
                    ));
                }
                Ok(Self::ReconfMsg(data[0]))
            }
            Ok(OptionCode::ReconfAccept) => {
                if !data.is_empty() {
                    return Err(Error::InvalidData(
                        "Reconfigure accept carries no payload".to_string(),
                    ));
                }
                Ok(Self::ReconfAccept)
            }
            Ok(OptionCode::IaPd) => {
                if data.len() < 12 {
                    return Err(Error::UnexpectedEof);
                }
                let mut iaid = [0u8; 4];
                iaid.copy_from_slice(&data[..4]);
                Ok(Self::IaPd {
                    iaid,
                    t1: wire::read_u32(data, 4)?,
                    t2: wire::read_u32(data, 8)?,
                    options: parse_options(&data[12..])?,
                })
            }
            Ok(OptionCode::IaPrefix) => {
                if data.len() < 25 {
                    return Err(Error::UnexpectedEof);
                }
                let prefix_len = data[8];
                if prefix_len > 128 {
                    return Err(Error::InvalidIpv6Address);
                }
                Ok(Self::IaPrefix {
                    preferred_lifetime: wire::read_u32(data, 0)?,
                    valid_lifetime: wire::read_u32(data, 4)?,
                    prefix_len,
                    prefix: wire::read_ipv6(data, 9)?,
                    options: parse_options(&data[25..])?,
                })
            }
            Ok(OptionCode::Fqdn) => Ok(Self::Fqdn {
                flags: wire::read_u8(data, 0)?,
                domain: data[1..].to_vec(),
            }),
            Ok(OptionCode::NextHop) => {
                if data.len() < 16 {
                    return Err(Error::UnexpectedEof);
                }
                Ok(Self::NextHop {
                    address: wire::read_ipv6(data, 0)?,
                    options: parse_options(&data[16..])?,
                })
            }
            Ok(OptionCode::RtPrefix) => {
                if data.len() < 22 {
                    return Err(Error::UnexpectedEof);
                }
                if data.len() > 22 {
                    return Err(Error::InvalidData(
                        "Route prefix length must be 22".to_string(),
                    ));
                }
                let prefix_len = data[4];
                if prefix_len > 128 {
                    return Err(Error::InvalidIpv6Address);
                }
                Ok(Self::RtPrefix {
                    lifetime: wire::read_u32(data, 0)?,
                    prefix_len,
                    metric: data[5],
                    prefix: wire::read_ipv6(data, 6)?,
                })
            }
            Ok(OptionCode::Mtu) => {
                if data.len() != 2 {
                    return Err(Error::InvalidData("MTU length must be 2".to_string()));
                }
                Ok(Self::Mtu(wire::read_u16(data, 0)?))
            }
            Err(unknown_code) => {
                trace!(
                    code = unknown_code,
                    length = data.len(),
                    "preserving unrecognized option"
                );
                Ok(Self::Unknown(unknown_code, data.to_vec()))
            }
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let body = match self {
            Self::ClientId(duid) | Self::ServerId(duid) => duid.encode()?,
            Self::IaNa {
                iaid,
                t1,
                t2,
                options,
            }
            | Self::IaPd {
                iaid,
                t1,
                t2,
                options,
            } => {
                let mut body = Vec::with_capacity(12);
                body.extend_from_slice(iaid);
                body.extend_from_slice(&t1.to_be_bytes());
                body.extend_from_slice(&t2.to_be_bytes());
                encode_options_into(options, &mut body)?;
                body
            }
            Self::IaTa { iaid, options } => {
                let mut body = Vec::with_capacity(4);
                body.extend_from_slice(iaid);
                encode_options_into(options, &mut body)?;
                body
            }
            Self::IaAddr {
                address,
                preferred_lifetime,
                valid_lifetime,
                options,
            } => {
                let mut body = Vec::with_capacity(24);
                body.extend_from_slice(&address.octets());
                body.extend_from_slice(&preferred_lifetime.to_be_bytes());
                body.extend_from_slice(&valid_lifetime.to_be_bytes());
                encode_options_into(options, &mut body)?;
                body
            }
            Self::Oro(codes) => {
                if codes.len() > MAX_ORO_CODES {
                    return Err(Error::WontFit);
                }
                let mut body = Vec::with_capacity(codes.len() * 2);
                for requested in codes {
                    body.extend_from_slice(&requested.to_be_bytes());
                }
                body
            }
            Self::Preference(value) => vec![*value],
            Self::ElapsedTime(hundredths) => hundredths.to_be_bytes().to_vec(),
            Self::RelayMsg(message) => message.encode()?,
            Self::Auth {
                protocol,
                algorithm,
                rdm,
                replay_detection,
                auth_info,
            } => {
                let mut body = Vec::with_capacity(11 + auth_info.len());
                body.push(*protocol);
                body.push(*algorithm);
                body.push(*rdm);
                body.extend_from_slice(replay_detection);
                body.extend_from_slice(auth_info);
                body
            }
            Self::Unicast(address) => address.octets().to_vec(),
            Self::StatusCode { code, message } => {
                let mut body = Vec::with_capacity(1 + message.len());
                body.push(*code);
                body.extend_from_slice(message);
                body
            }
            Self::RapidCommit | Self::ReconfAccept => Vec::new(),
            Self::UserClass(classes) | Self::VendorClass(classes) => {
                let mut body = Vec::new();
                for class in classes {
                    if class.len() > MAX_OPTION_LEN {
                        return Err(Error::WontFit);
                    }
                    body.extend_from_slice(&(class.len() as u16).to_be_bytes());
                    body.extend_from_slice(class);
                }
                body
            }
            Self::VendorOpts {
                enterprise_number,
                options,
            } => {
                let mut body = Vec::with_capacity(4);
                body.extend_from_slice(&enterprise_number.to_be_bytes());
                for (sub_code, sub_data) in options {
                    if sub_data.len() > MAX_OPTION_LEN {
                        return Err(Error::WontFit);
                    }
                    body.extend_from_slice(&sub_code.to_be_bytes());
                    body.extend_from_slice(&(sub_data.len() as u16).to_be_bytes());
                    body.extend_from_slice(sub_data);
                }
                body
            }
            Self::InterfaceId(id) => id.clone(),
            Self::ReconfMsg(msg_type) => vec![*msg_type],
            Self::IaPrefix {
                preferred_lifetime,
                valid_lifetime,
                prefix_len,
                prefix,
                options,
            } => {
                if *prefix_len > 128 {
                    return Err(Error::InvalidIpv6Address);
                }
                let mut body = Vec::with_capacity(25);
                body.extend_from_slice(&preferred_lifetime.to_be_bytes());
                body.extend_from_slice(&valid_lifetime.to_be_bytes());
                body.push(*prefix_len);
                body.extend_from_slice(&prefix.octets());
                encode_options_into(options, &mut body)?;
                body
            }
            Self::Fqdn { flags, domain } => {
                let mut body = Vec::with_capacity(1 + domain.len());
                body.push(*flags);
                body.extend_from_slice(domain);
                body
            }
            Self::NextHop { address, options } => {
                let mut body = Vec::with_capacity(16);
                body.extend_from_slice(&address.octets());
                encode_options_into(options, &mut body)?;
                body
            }
            Self::RtPrefix {
                lifetime,
                prefix_len,
                metric,
                prefix,
            } => {
                if *prefix_len > 128 {
                    return Err(Error::InvalidIpv6Address);
                }
                let mut body = Vec::with_capacity(22);
                body.extend_from_slice(&lifetime.to_be_bytes());
                body.push(*prefix_len);
                body.push(*metric);
                body.extend_from_slice(&prefix.octets());
                body
            }
            Self::Mtu(mtu) => mtu.to_be_bytes().to_vec(),
            Self::Unknown(_, data) => data.clone(),
        };

        if body.len() > MAX_OPTION_LEN {
            return Err(Error::WontFit);
        }
        let mut encoded = Vec::with_capacity(OPTION_HEADER_LEN + body.len());
        encoded.extend_from_slice(&self.code().to_be_bytes());
        encoded.extend_from_slice(&(body.len() as u16).to_be_bytes());
        encoded.extend_from_slice(&body);
        Ok(encoded)
    }
}

/// Decodes a flat option sequence that must consume `data` exactly.
///
/// Used for message bodies and for the tail of container options.
pub(crate) fn parse_options(mut data: &[u8]) -> Result<Vec<DhcpOption>> {
    let mut options = Vec::new();
    while !data.is_empty() {
        if data.len() < OPTION_HEADER_LEN {
            return Err(Error::UnexpectedEof);
        }
        let length = wire::read_u16(data, 2)? as usize;
        let total = OPTION_HEADER_LEN + length;
        if data.len() < total {
            return Err(Error::UnexpectedEof);
        }
        options.push(DhcpOption::decode(&data[..total])?);
        data = &data[total..];
    }
    Ok(options)
}

/// Decodes the length-prefixed class-data entries of UserClass/VendorClass.
fn parse_class_data(mut data: &[u8]) -> Result<Vec<Vec<u8>>> {
    let mut classes = Vec::new();
    while !data.is_empty() {
        let length = wire::read_u16(data, 0)? as usize;
        let entry = wire::read_bytes(data, 2, length)?;
        classes.push(entry.to_vec());
        data = &data[2 + length..];
    }
    Ok(classes)
}

// Vendor option spaces carry their own numbering, so the payloads are not
// run through the standard dispatch.
fn parse_vendor_suboptions(mut data: &[u8]) -> Result<Vec<(u16, Vec<u8>)>> {
    let mut options = Vec::new();
    while !data.is_empty() {
        let sub_code = wire::read_u16(data, 0)?;
        let length = wire::read_u16(data, 2)? as usize;
        let sub_data = wire::read_bytes(data, 4, length)?;
        options.push((sub_code, sub_data.to_vec()));
        data = &data[4 + length..];
    }
    Ok(options)
}

fn encode_options_into(options: &[DhcpOption], body: &mut Vec<u8>) -> Result<()> {
    for option in options {
        body.extend_from_slice(&option.encode()?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_roundtrip() {
        let option = DhcpOption::ClientId(Duid::En {
            enterprise_number: 43793,
            identifier: vec![0xac, 0xa2, 0xa8, 0xaf, 0xae, 0xa3, 0xa3, 0xaf],
        });
        let encoded = option.encode().unwrap();
        assert_eq!(&encoded[..4], &[0x00, 0x01, 0x00, 0x0e]);
        assert_eq!(DhcpOption::decode(&encoded).unwrap(), option);
    }

    #[test]
    fn test_unknown_option_preserved() {
        let data = [0xab, 0xcd, 0x00, 0x03, 0x01, 0x02, 0x03];
        let option = DhcpOption::decode(&data).unwrap();
        assert_eq!(option, DhcpOption::Unknown(0xabcd, vec![1, 2, 3]));
        assert_eq!(option.encode().unwrap(), data.to_vec());
    }

    #[test]
    fn test_preference_rejects_wrong_length() {
        let data = [0x00, 0x07, 0x00, 0x02, 0x00, 0x00];
        assert!(matches!(
            DhcpOption::decode(&data),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_empty_options_reject_payload() {
        assert_eq!(
            DhcpOption::decode(&[0x00, 0x0e, 0x00, 0x00]).unwrap(),
            DhcpOption::RapidCommit
        );
        assert!(matches!(
            DhcpOption::decode(&[0x00, 0x0e, 0x00, 0x01, 0xff]),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            DhcpOption::decode(&[0x00, 0x14, 0x00, 0x01, 0xff]),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_length_field_matches_body() {
        let option = DhcpOption::IaAddr {
            address: "2001:db8::1".parse().unwrap(),
            preferred_lifetime: 3600,
            valid_lifetime: 7200,
            options: vec![DhcpOption::Preference(7)],
        };
        let encoded = option.encode().unwrap();
        let length = u16::from_be_bytes([encoded[2], encoded[3]]) as usize;
        assert_eq!(length, encoded.len() - 4);
        assert_eq!(length, 24 + 5);
    }

    #[test]
    fn test_nested_options_roundtrip_in_order() {
        let status_ok = DhcpOption::StatusCode {
            code: StatusCode::Success as u8,
            message: b"all good".to_vec(),
        };
        let status_fail = DhcpOption::StatusCode {
            code: StatusCode::NoAddrsAvail as u8,
            message: Vec::new(),
        };
        let option = DhcpOption::IaNa {
            iaid: [1, 2, 3, 4],
            t1: 300,
            t2: 480,
            options: vec![DhcpOption::IaAddr {
                address: "2001:db8::42".parse().unwrap(),
                preferred_lifetime: 3600,
                valid_lifetime: 7200,
                options: vec![status_ok.clone(), status_fail.clone()],
            }],
        };
        let decoded = DhcpOption::decode(&option.encode().unwrap()).unwrap();
        assert_eq!(decoded, option);
        let DhcpOption::IaNa { options, .. } = decoded else {
            panic!("Expected IaNa");
        };
        let DhcpOption::IaAddr { options, .. } = &options[0] else {
            panic!("Expected IaAddr");
        };
        assert_eq!(options, &[status_ok, status_fail]);
    }

    #[test]
    fn test_container_rejects_trailing_bytes() {
        let inner = DhcpOption::Preference(1).encode().unwrap();
        let mut body = Vec::new();
        body.extend_from_slice(&[0, 0, 0, 0]);
        body.extend_from_slice(&0u32.to_be_bytes());
        body.extend_from_slice(&0u32.to_be_bytes());
        body.extend_from_slice(&inner);
        body.extend_from_slice(&[0x00, 0x07]);
        assert_eq!(
            DhcpOption::parse(OptionCode::IaNa as u16, &body),
            Err(Error::UnexpectedEof)
        );
    }

    #[test]
    fn test_oro_rejects_odd_length() {
        let data = [0x00, 0x06, 0x00, 0x03, 0x00, 0x17, 0x00];
        assert!(matches!(
            DhcpOption::decode(&data),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_oro_rejects_oversize_request_list() {
        let option = DhcpOption::Oro(vec![23; 32768]);
        assert_eq!(option.encode(), Err(Error::WontFit));
    }

    #[test]
    fn test_user_class_roundtrip() {
        let option = DhcpOption::UserClass(vec![b"alpha".to_vec(), Vec::new(), b"beta".to_vec()]);
        let encoded = option.encode().unwrap();
        assert_eq!(DhcpOption::decode(&encoded).unwrap(), option);
    }

    #[test]
    fn test_class_data_rejects_truncated_entry() {
        let body = [0x00, 0x05, b'a', b'b'];
        assert_eq!(
            DhcpOption::parse(OptionCode::UserClass as u16, &body),
            Err(Error::UnexpectedEof)
        );
    }

    #[test]
    fn test_vendor_opts_roundtrip() {
        let option = DhcpOption::VendorOpts {
            enterprise_number: 4491,
            options: vec![(1, vec![0xde, 0xad]), (0x1000, Vec::new())],
        };
        let encoded = option.encode().unwrap();
        assert_eq!(DhcpOption::decode(&encoded).unwrap(), option);
    }

    #[test]
    fn test_auth_roundtrip() {
        let option = DhcpOption::Auth {
            protocol: 2,
            algorithm: 1,
            rdm: 0,
            replay_detection: [0, 1, 2, 3, 4, 5, 6, 7],
            auth_info: vec![0xaa; 16],
        };
        let encoded = option.encode().unwrap();
        assert_eq!(DhcpOption::decode(&encoded).unwrap(), option);

        let short = [0x00, 0x0b, 0x00, 0x0a, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(DhcpOption::decode(&short), Err(Error::UnexpectedEof));
    }

    #[test]
    fn test_rt_prefix_shape() {
        let option = DhcpOption::RtPrefix {
            lifetime: 1800,
            prefix_len: 64,
            metric: 1,
            prefix: "2001:db8::".parse().unwrap(),
        };
        let encoded = option.encode().unwrap();
        assert_eq!(encoded.len(), 4 + 22);
        assert_eq!(DhcpOption::decode(&encoded).unwrap(), option);

        let oversize = DhcpOption::RtPrefix {
            lifetime: 1800,
            prefix_len: 129,
            metric: 1,
            prefix: "2001:db8::".parse().unwrap(),
        };
        assert_eq!(oversize.encode(), Err(Error::InvalidIpv6Address));
    }

    #[test]
    fn test_ia_prefix_roundtrip() {
        let option = DhcpOption::IaPrefix {
            preferred_lifetime: 3600,
            valid_lifetime: 7200,
            prefix_len: 56,
            prefix: "2001:db8:1200::".parse().unwrap(),
            options: vec![DhcpOption::StatusCode {
                code: StatusCode::Success as u8,
                message: Vec::new(),
            }],
        };
        let encoded = option.encode().unwrap();
        assert_eq!(DhcpOption::decode(&encoded).unwrap(), option);
    }

    #[test]
    fn test_fqdn_keeps_flags_byte() {
        let body = [0x01, 0x04, b'h', b'o', b's', b't'];
        let option = DhcpOption::parse(OptionCode::Fqdn as u16, &body).unwrap();
        assert_eq!(
            option,
            DhcpOption::Fqdn {
                flags: 1,
                domain: vec![0x04, b'h', b'o', b's', b't'],
            }
        );
    }

    #[test]
    fn test_next_hop_roundtrip() {
        let option = DhcpOption::NextHop {
            address: "fe80::1".parse().unwrap(),
            options: vec![DhcpOption::RtPrefix {
                lifetime: 600,
                prefix_len: 48,
                metric: 10,
                prefix: "2001:db8::".parse().unwrap(),
            }],
        };
        let encoded = option.encode().unwrap();
        assert_eq!(DhcpOption::decode(&encoded).unwrap(), option);
    }

    #[test]
    fn test_status_code_constants() {
        assert_eq!(StatusCode::try_from(0), Ok(StatusCode::Success));
        assert_eq!(StatusCode::try_from(5), Ok(StatusCode::UseMulticast));
        assert_eq!(StatusCode::try_from(6), Err(6));
    }
}
