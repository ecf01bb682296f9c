use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::wire;

pub const DUID_TYPE_LLT: u16 = 1;
pub const DUID_TYPE_EN: u16 = 2;
pub const DUID_TYPE_LL: u16 = 3;

/// Maximum serialized DUID size: 2-octet type code plus 128 body octets.
pub const MAX_DUID_LEN: usize = 130;

/// A DHCP Unique Identifier (RFC 3315 section 9).
///
/// The variant-specific payload ceilings keep the serialized form within
/// [`MAX_DUID_LEN`] octets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Duid {
    /// Link-layer address plus time (DUID-LLT).
    Llt {
        hardware_type: u16,
        /// Seconds since 2000-01-01 00:00 UTC, modulo 2^32.
        time: u32,
        ll_address: Vec<u8>,
    },
    /// Vendor-assigned unique ID based on enterprise number (DUID-EN).
    En {
        enterprise_number: u32,
        identifier: Vec<u8>,
    },
    /// Link-layer address (DUID-LL).
    Ll {
        hardware_type: u16,
        ll_address: Vec<u8>,
    },
}

impl Duid {
    pub fn duid_type(&self) -> u16 {
        match self {
            Self::Llt { .. } => DUID_TYPE_LLT,
            Self::En { .. } => DUID_TYPE_EN,
            Self::Ll { .. } => DUID_TYPE_LL,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        match self {
            Self::Llt {
                hardware_type,
                time,
                ll_address,
            } => {
                if ll_address.len() > 122 {
                    return Err(Error::DuidTooLong);
                }
                let mut data = Vec::with_capacity(8 + ll_address.len());
                data.extend_from_slice(&DUID_TYPE_LLT.to_be_bytes());
                data.extend_from_slice(&hardware_type.to_be_bytes());
                data.extend_from_slice(&time.to_be_bytes());
                data.extend_from_slice(ll_address);
                Ok(data)
            }
            Self::En {
                enterprise_number,
                identifier,
            } => {
                if identifier.len() > 124 {
                    return Err(Error::DuidTooLong);
                }
                let mut data = Vec::with_capacity(6 + identifier.len());
                data.extend_from_slice(&DUID_TYPE_EN.to_be_bytes());
                data.extend_from_slice(&enterprise_number.to_be_bytes());
                data.extend_from_slice(identifier);
                Ok(data)
            }
            Self::Ll {
                hardware_type,
                ll_address,
            } => {
                if ll_address.len() > 126 {
                    return Err(Error::DuidTooLong);
                }
                let mut data = Vec::with_capacity(4 + ll_address.len());
                data.extend_from_slice(&DUID_TYPE_LL.to_be_bytes());
                data.extend_from_slice(&hardware_type.to_be_bytes());
                data.extend_from_slice(ll_address);
                Ok(data)
            }
        }
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let duid_type = wire::read_u16(data, 0)?;
        if data.len() > MAX_DUID_LEN {
            return Err(Error::DuidTooLong);
        }
        match duid_type {
            DUID_TYPE_LLT => {
                if data.len() < 8 {
                    return Err(Error::UnexpectedEof);
                }
                Ok(Self::Llt {
                    hardware_type: wire::read_u16(data, 2)?,
                    time: wire::read_u32(data, 4)?,
                    ll_address: data[8..].to_vec(),
                })
            }
            DUID_TYPE_EN => {
                if data.len() < 6 {
                    return Err(Error::UnexpectedEof);
                }
                Ok(Self::En {
                    enterprise_number: wire::read_u32(data, 2)?,
                    identifier: data[6..].to_vec(),
                })
            }
            DUID_TYPE_LL => Ok(Self::Ll {
                hardware_type: wire::read_u16(data, 2)?,
                ll_address: data[4..].to_vec(),
            }),
            other => Err(Error::InvalidType(other)),
        }
    }
}
