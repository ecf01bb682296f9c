//! DHCPv6 (RFC 3315) wire-format codec.
//!
//! Translates between octet streams exchanged on UDP ports 546/547 and
//! structured messages: client/server messages, relay envelopes, the full
//! standard option set, and the three DUID variants. Decoding always copies
//! payloads into owned buffers, so decoded values never borrow the input.
//!
//! This crate is a pure codec: sockets, retransmission, and lease state
//! belong to the caller.

pub mod duid;
pub mod error;
pub mod message;
pub mod options;
mod wire;

pub use duid::Duid;
pub use error::{Error, Result};
pub use message::{
    DhcpMessage, DhcpRelayMessage, MessageType, ALL_DHCP_SERVERS, ALL_RELAY_AGENTS_AND_SERVERS,
    CLIENT_PORT, INFINITY, SERVER_PORT,
};
pub use options::{DhcpOption, OptionCode, StatusCode};
