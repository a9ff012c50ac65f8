//
// Copyright (c) The Pcep-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bitflags::bitflags;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use pcep_utils::bytes::TLS_BUF;
use serde::{Deserialize, Serialize};

use crate::packet::error::{DecodeError, DecodeResult, EncodeError};

//
// PCEP common object header.
//
// Encoding format:
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// | Object-Class  |   OT  |Res|P|I|        Object Length          |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                                                               |
// //                        (Object body)                        //
// |                                                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
pub const OBJECT_HDR_SIZE: u16 = 4;

bitflags! {
    // Object header processing flags.
    //
    // P: the object must be taken into account by the receiver.
    // I: the object may be ignored when its class is unsupported.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct ObjectFlags: u8 {
        const P = 0x02;
        const I = 0x01;
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct ObjectHeader {
    pub object_class: u8,
    pub object_type: u8,
    pub flags: ObjectFlags,
    pub length: u16,
}

//
// Object encode information.
//
// Returned by `ObjectKind::encode` so callers can account for the serialized
// size and for optional TLV slots that were left unset.
//
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ObjectEncodeInfo {
    pub bytes_written: usize,
    pub tlvs_skipped: usize,
}

pub trait ObjectKind: Sized {
    const OBJECT_CLASS: u8;
    const OBJECT_TYPE: u8;
    const MIN_LEN: u16;

    fn header(&self) -> &ObjectHeader;

    fn header_mut(&mut self) -> &mut ObjectHeader;

    // Encodes the object's fixed fields and TLVs, returning the number of
    // unset optional TLV slots that were skipped.
    fn encode_body(&self, buf: &mut BytesMut) -> usize;

    fn decode_body(buf: &mut Bytes, hdr: ObjectHeader) -> DecodeResult<Self>;

    fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        // Decode common object header.
        let hdr = ObjectHeader::decode(buf)?;
        if hdr.length < Self::MIN_LEN {
            return Err(DecodeError::InvalidObjectLength(hdr.length));
        }

        // Take only this object's body region. The bounded sub-buffer
        // guarantees the body can't read past the advertised object length,
        // and lets the TLV parser enforce exact exhaustion.
        let body_len = (hdr.length - OBJECT_HDR_SIZE) as usize;
        if buf.remaining() < body_len {
            return Err(DecodeError::TruncatedInput);
        }
        let mut body = buf.split_to(body_len);

        Self::decode_body(&mut body, hdr)
    }

    fn encode(
        &mut self,
        buf: &mut BytesMut,
    ) -> Result<ObjectEncodeInfo, EncodeError> {
        let start_pos = buf.len();

        // Encode object header and body.
        let len_pos = self.header().encode(buf);
        let tlvs_skipped = self.encode_body(buf);

        // Compute and validate the object length. A length that doesn't fit
        // the header's 16-bit field, is below the object's minimum size, or
        // isn't 4-byte aligned means a body encoder broke its contract.
        let obj_len = buf.len() - start_pos;
        if obj_len > u16::MAX as usize
            || (obj_len as u16) < Self::MIN_LEN
            || obj_len % 4 != 0
            || len_pos + 2 > buf.len()
        {
            return Err(EncodeError::InvalidHeaderState);
        }

        // Rewrite the object length, both in the buffer and in the header.
        let obj_len = obj_len as u16;
        self.header_mut().set_length(obj_len);
        buf[len_pos..len_pos + 2].copy_from_slice(&obj_len.to_be_bytes());

        Ok(ObjectEncodeInfo {
            bytes_written: obj_len as usize,
            tlvs_skipped,
        })
    }

    // Encodes the object into a standalone buffer.
    fn encode_to_bytes(&mut self) -> Result<BytesMut, EncodeError> {
        TLS_BUF.with(|buf| {
            let mut buf = buf.borrow_mut();
            buf.clear();
            self.encode(&mut buf)?;
            Ok(buf.clone())
        })
    }
}

// ===== impl ObjectHeader =====

impl ObjectHeader {
    const TYPE_SHIFT: u8 = 4;
    const FLAGS_MASK: u8 = 0x03;

    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        let object_class = buf.try_get_u8()?;
        let ot_flags = buf.try_get_u8()?;
        let object_type = ot_flags >> Self::TYPE_SHIFT;
        let flags =
            ObjectFlags::from_bits_truncate(ot_flags & Self::FLAGS_MASK);

        let length = buf.try_get_u16()?;
        if length < OBJECT_HDR_SIZE {
            return Err(DecodeError::InvalidObjectLength(length));
        }

        Ok(ObjectHeader {
            object_class,
            object_type,
            flags,
            length,
        })
    }

    // Writes the header with a zeroed length placeholder, returning the
    // buffer offset of the length field. The object length is only known
    // once the variable-length TLV tail has been serialized, so the caller
    // patches the placeholder afterwards.
    pub fn encode(&self, buf: &mut BytesMut) -> usize {
        buf.put_u8(self.object_class);
        buf.put_u8((self.object_type << Self::TYPE_SHIFT) | self.flags.bits());
        let len_pos = buf.len();
        // The object length will be rewritten later.
        buf.put_u16(0);
        len_pos
    }

    pub fn set_length(&mut self, length: u16) {
        self.length = length;
    }
}
