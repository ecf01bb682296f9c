use std::net::Ipv6Addr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::duid::Duid;
use crate::error::{Error, Result};
use crate::options::{self, DhcpOption};
use crate::wire;

/// All_DHCP_Servers site-scoped multicast address (FF05::1:3).
pub const ALL_DHCP_SERVERS: Ipv6Addr = Ipv6Addr::new(0xff05, 0, 0, 0, 0, 0, 0x0001, 0x0003);

/// All_DHCP_Relay_Agents_and_Servers link-scoped multicast address (FF02::1:2).
pub const ALL_RELAY_AGENTS_AND_SERVERS: Ipv6Addr =
    Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0x0001, 0x0002);

pub const CLIENT_PORT: u16 = 546;
pub const SERVER_PORT: u16 = 547;

/// Sentinel lifetime meaning "never expires".
pub const INFINITY: u32 = 0xffff_ffff;

/// msg-type plus 3-octet transaction id.
const MESSAGE_HEADER_LEN: usize = 4;

/// msg-type, hop-count, link-address, and peer-address.
const RELAY_HEADER_LEN: usize = 34;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    Solicit = 1,
    Advertise = 2,
    Request = 3,
    Confirm = 4,
    Renew = 5,
    Rebind = 6,
    Reply = 7,
    Release = 8,
    Decline = 9,
    Reconfigure = 10,
    InformationRequest = 11,
    RelayForw = 12,
    RelayRepl = 13,
}

impl TryFrom<u8> for MessageType {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Solicit),
            2 => Ok(Self::Advertise),
            3 => Ok(Self::Request),
            4 => Ok(Self::Confirm),
            5 => Ok(Self::Renew),
            6 => Ok(Self::Rebind),
            7 => Ok(Self::Reply),
            8 => Ok(Self::Release),
            9 => Ok(Self::Decline),
            10 => Ok(Self::Reconfigure),
            11 => Ok(Self::InformationRequest),
            12 => Ok(Self::RelayForw),
            13 => Ok(Self::RelayRepl),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solicit => write!(f, "SOLICIT"),
            Self::Advertise => write!(f, "ADVERTISE"),
            Self::Request => write!(f, "REQUEST"),
            Self::Confirm => write!(f, "CONFIRM"),
            Self::Renew => write!(f, "RENEW"),
            Self::Rebind => write!(f, "REBIND"),
            Self::Reply => write!(f, "REPLY"),
            Self::Release => write!(f, "RELEASE"),
            Self::Decline => write!(f, "DECLINE"),
            Self::Reconfigure => write!(f, "RECONFIGURE"),
            Self::InformationRequest => write!(f, "INFORMATION-REQUEST"),
            Self::RelayForw => write!(f, "RELAY-FORW"),
            Self::RelayRepl => write!(f, "RELAY-REPL"),
        }
    }
}

/// A client/server DHCPv6 message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpMessage {
    pub msg_type: MessageType,
    pub transaction_id: [u8; 3],
    pub options: Vec<DhcpOption>,
}

impl DhcpMessage {
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < MESSAGE_HEADER_LEN {
            return Err(Error::UnexpectedEof);
        }
        let msg_type =
            MessageType::try_from(data[0]).map_err(|value| Error::InvalidType(value as u16))?;
        let mut transaction_id = [0u8; 3];
        transaction_id.copy_from_slice(&data[1..4]);
        let options = options::parse_options(&data[4..])?;
        trace!(%msg_type, option_count = options.len(), "decoded DHCPv6 message");
        Ok(Self {
            msg_type,
            transaction_id,
            options,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(128);
        data.push(self.msg_type as u8);
        data.extend_from_slice(&self.transaction_id);
        for option in &self.options {
            data.extend_from_slice(&option.encode()?);
        }
        Ok(data)
    }

    pub fn client_id(&self) -> Option<&Duid> {
        self.options.iter().find_map(|option| match option {
            DhcpOption::ClientId(duid) => Some(duid),
            _ => None,
        })
    }

    pub fn server_id(&self) -> Option<&Duid> {
        self.options.iter().find_map(|option| match option {
            DhcpOption::ServerId(duid) => Some(duid),
            _ => None,
        })
    }

    pub fn rapid_commit(&self) -> bool {
        self.options
            .iter()
            .any(|option| matches!(option, DhcpOption::RapidCommit))
    }
}

/// A relay agent RELAY-FORW/RELAY-REPL envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpRelayMessage {
    pub msg_type: MessageType,
    pub hop_count: u8,
    pub link_address: Ipv6Addr,
    pub peer_address: Ipv6Addr,
    pub options: Vec<DhcpOption>,
}

impl DhcpRelayMessage {
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < RELAY_HEADER_LEN {
            return Err(Error::UnexpectedEof);
        }
        let msg_type =
            MessageType::try_from(data[0]).map_err(|value| Error::InvalidType(value as u16))?;
        if !matches!(msg_type, MessageType::RelayForw | MessageType::RelayRepl) {
            return Err(Error::InvalidType(data[0] as u16));
        }
        let options = options::parse_options(&data[RELAY_HEADER_LEN..])?;
        trace!(%msg_type, option_count = options.len(), "decoded DHCPv6 relay message");
        Ok(Self {
            msg_type,
            hop_count: data[1],
            link_address: wire::read_ipv6(data, 2)?,
            peer_address: wire::read_ipv6(data, 18)?,
            options,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(128);
        data.push(self.msg_type as u8);
        data.push(self.hop_count);
        data.extend_from_slice(&self.link_address.octets());
        data.extend_from_slice(&self.peer_address.octets());
        for option in &self.options {
            data.extend_from_slice(&option.encode()?);
        }
        Ok(data)
    }

    pub fn interface_id(&self) -> Option<&[u8]> {
        self.options.iter().find_map(|option| match option {
            DhcpOption::InterfaceId(id) => Some(id.as_slice()),
            _ => None,
        })
    }

    pub fn relay_msg(&self) -> Option<&DhcpRelayMessage> {
        self.options.iter().find_map(|option| match option {
            DhcpOption::RelayMsg(inner) => Some(inner),
            _ => None,
        })
    }
}
