//
// Copyright (c) The Pcep-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::{Ipv4Addr, Ipv6Addr};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use pcep_utils::bytes::{BytesExt, BytesMutExt};
use serde::{Deserialize, Serialize};

use crate::packet::error::{DecodeError, DecodeResult};

//
// PCEP Type-Length-Value.
//
// Encoding format:
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |            Type               |            Length             |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                                                               |
// |                             Value                             |
// ~                                                               ~
// |                                                               |
// |                               +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                               |          Padding              |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
// The Length field carries the unpadded value length; the value region is
// zero-padded to the next 4-byte boundary on the wire.
//
pub const TLV_HDR_SIZE: u16 = 4;

// PCEP TLV type.
//
// Closed registry: decoding dispatches through an exhaustive match, and
// unrecognized type codes abort the whole object decode.
#[derive(Copy, Clone, Debug, Eq, PartialEq, FromPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum TlvType {
    NexthopIpv4Addr = 2,
    NexthopIpv6Addr = 3,
    NexthopUnnumberedIpv4Id = 4,
    SymbolicPathName = 17,
}

// PCEP TLV.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Tlv {
    NexthopIpv4Addr(Ipv4Addr),
    NexthopIpv6Addr(Ipv6Addr),
    NexthopUnnumberedIpv4Id { node_id: u32, interface_id: u32 },
    SymbolicPathName(Vec<u8>),
}

// ===== impl TlvType =====

impl TlvType {
    pub(crate) fn decode(value: u16) -> Option<Self> {
        TlvType::from_u16(value)
    }
}

impl std::fmt::Display for TlvType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TlvType::NexthopIpv4Addr => write!(f, "IPv4 Next-Hop Address"),
            TlvType::NexthopIpv6Addr => write!(f, "IPv6 Next-Hop Address"),
            TlvType::NexthopUnnumberedIpv4Id => {
                write!(f, "Unnumbered IPv4 Next-Hop")
            }
            TlvType::SymbolicPathName => write!(f, "Symbolic Path Name"),
        }
    }
}

// ===== impl Tlv =====

impl Tlv {
    pub fn tlv_type(&self) -> TlvType {
        match self {
            Tlv::NexthopIpv4Addr(_) => TlvType::NexthopIpv4Addr,
            Tlv::NexthopIpv6Addr(_) => TlvType::NexthopIpv6Addr,
            Tlv::NexthopUnnumberedIpv4Id { .. } => {
                TlvType::NexthopUnnumberedIpv4Id
            }
            Tlv::SymbolicPathName(_) => TlvType::SymbolicPathName,
        }
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        let start_pos = buf.len();

        buf.put_u16(self.tlv_type() as u16);
        // The TLV length will be rewritten later.
        buf.put_u16(0);
        self.encode_value(buf);

        // Rewrite TLV length (unpadded value length). The length field is
        // 16 bits wide; a larger value cannot be represented on the wire.
        let tlv_len = buf.len() - start_pos - TLV_HDR_SIZE as usize;
        assert!(tlv_len <= u16::MAX as usize);
        let tlv_len = tlv_len as u16;
        buf[start_pos + 2..start_pos + 4]
            .copy_from_slice(&tlv_len.to_be_bytes());

        // Zero-fill the value region up to the next 4-byte boundary.
        let pad = (4 - tlv_len % 4) % 4;
        buf.put_bytes(0, pad as usize);
    }

    fn encode_value(&self, buf: &mut BytesMut) {
        match self {
            Tlv::NexthopIpv4Addr(addr) => buf.put_ipv4(addr),
            Tlv::NexthopIpv6Addr(addr) => buf.put_ipv6(addr),
            Tlv::NexthopUnnumberedIpv4Id {
                node_id,
                interface_id,
            } => {
                buf.put_u32(*node_id);
                buf.put_u32(*interface_id);
            }
            Tlv::SymbolicPathName(name) => buf.put_slice(name),
        }
    }

    fn decode_value(
        tlv_etype: TlvType,
        tlv_len: u16,
        buf: &mut Bytes,
    ) -> DecodeResult<Self> {
        match tlv_etype {
            TlvType::NexthopIpv4Addr => {
                if tlv_len != 4 {
                    return Err(DecodeError::InvalidTlvLength(tlv_len));
                }
                Ok(Tlv::NexthopIpv4Addr(buf.try_get_ipv4()?))
            }
            TlvType::NexthopIpv6Addr => {
                if tlv_len != 16 {
                    return Err(DecodeError::InvalidTlvLength(tlv_len));
                }
                Ok(Tlv::NexthopIpv6Addr(buf.try_get_ipv6()?))
            }
            TlvType::NexthopUnnumberedIpv4Id => {
                if tlv_len != 8 {
                    return Err(DecodeError::InvalidTlvLength(tlv_len));
                }
                let node_id = buf.try_get_u32()?;
                let interface_id = buf.try_get_u32()?;
                Ok(Tlv::NexthopUnnumberedIpv4Id {
                    node_id,
                    interface_id,
                })
            }
            TlvType::SymbolicPathName => {
                if tlv_len == 0 {
                    return Err(DecodeError::InvalidTlvLength(tlv_len));
                }
                if buf.remaining() < tlv_len as usize {
                    return Err(DecodeError::TruncatedInput);
                }
                let mut name = vec![0; tlv_len as usize];
                buf.copy_to_slice(&mut name);
                Ok(Tlv::SymbolicPathName(name))
            }
        }
    }
}

// ===== global functions =====

// Decodes the trailing TLV region of an object body, which must be consumed
// exactly.
pub fn decode_all(buf: &mut Bytes) -> DecodeResult<Vec<Tlv>> {
    let mut tlvs = vec![];

    while buf.remaining() >= TLV_HDR_SIZE as usize {
        // Parse TLV type.
        let tlv_type = buf.get_u16();
        let Some(tlv_etype) = TlvType::decode(tlv_type) else {
            return Err(DecodeError::UnsupportedTlvType(tlv_type));
        };

        // Parse TLV length and value.
        let tlv_len = buf.get_u16();
        let tlv = Tlv::decode_value(tlv_etype, tlv_len, buf)?;

        // Skip the value padding. A final TLV whose padding bytes were cut
        // short still decodes; a short value does not.
        let pad = ((4 - tlv_len % 4) % 4) as usize;
        buf.advance(pad.min(buf.remaining()));

        tlvs.push(tlv);
    }

    // A well-formed object consumes its body region exactly.
    if buf.has_remaining() {
        return Err(DecodeError::TrailingBytes);
    }

    Ok(tlvs)
}

// Encodes TLVs in order. Unset optional slots are skipped without error;
// the number of skipped slots is returned.
pub fn encode_all(tlvs: &[Option<Tlv>], buf: &mut BytesMut) -> usize {
    let mut skipped = 0;

    for tlv in tlvs {
        match tlv {
            Some(tlv) => tlv.encode(buf),
            None => skipped += 1,
        }
    }

    skipped
}
