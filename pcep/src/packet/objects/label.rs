//
// Copyright (c) The Pcep-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::packet::error::{BuildError, DecodeResult};
use crate::packet::object::{ObjectFlags, ObjectHeader, ObjectKind};
use crate::packet::tlv::{self, Tlv};

//
// Label object.
//
// Encoding format (after the common object header):
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |            Reserved           |            Flags            |O|
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                             Label                             |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                                                               |
// //                        Optional TLVs                        //
// |                                                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
// The O flag tells whether the label applies to the outgoing or incoming
// direction; the remaining flag bits are reserved for other object types of
// the family (zero on encode, ignored on decode). The label value is opaque
// at this layer; range semantics belong to the path-computation layer.
//
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct LabelObject {
    pub header: ObjectHeader,
    pub o_flag: bool,
    pub label: u32,
    // Wire order is preserved and duplicates are allowed. Unset slots are
    // skipped during encoding.
    pub optional_tlvs: Vec<Option<Tlv>>,
}

// Label object builder.
//
// Field setters record the value; `build` applies defaults for unset
// optional fields and rejects construction when a mandatory field is
// missing.
#[derive(Debug, Default)]
pub struct LabelObjectBuilder {
    header: Option<ObjectHeader>,
    o_flag: Option<bool>,
    label: Option<u32>,
    optional_tlvs: Vec<Option<Tlv>>,
    p_flag: Option<bool>,
    i_flag: Option<bool>,
}

// ===== impl LabelObject =====

impl ObjectKind for LabelObject {
    const OBJECT_CLASS: u8 = 35;
    const OBJECT_TYPE: u8 = 1;
    const MIN_LEN: u16 = 12;

    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn encode_body(&self, buf: &mut BytesMut) -> usize {
        let mut flags = 0;
        if self.o_flag {
            flags |= Self::OFLAG_BIT;
        }
        buf.put_u32(flags);
        buf.put_u32(self.label);

        tlv::encode_all(&self.optional_tlvs, buf)
    }

    fn decode_body(
        buf: &mut Bytes,
        header: ObjectHeader,
    ) -> DecodeResult<Self> {
        let flags = buf.try_get_u32()?;
        let o_flag = flags & Self::OFLAG_BIT != 0;
        let label = buf.try_get_u32()?;

        // Parse optional TLVs until the body region is exhausted.
        let tlvs = tlv::decode_all(buf)?;
        let optional_tlvs = tlvs.into_iter().map(Some).collect();

        Ok(LabelObject {
            header,
            o_flag,
            label,
            optional_tlvs,
        })
    }
}

impl LabelObject {
    pub const OFLAG_BIT: u32 = 0x0000_0001;

    // Returns the default object header template. Each call returns a fresh
    // value, so no mutable header state is ever shared between objects.
    pub fn default_header() -> ObjectHeader {
        ObjectHeader {
            object_class: Self::OBJECT_CLASS,
            object_type: Self::OBJECT_TYPE,
            flags: ObjectFlags::empty(),
            length: Self::MIN_LEN,
        }
    }
}

// ===== impl LabelObjectBuilder =====

impl LabelObjectBuilder {
    pub fn new() -> LabelObjectBuilder {
        Default::default()
    }

    pub fn header(mut self, header: ObjectHeader) -> Self {
        self.header = Some(header);
        self
    }

    pub fn o_flag(mut self, o_flag: bool) -> Self {
        self.o_flag = Some(o_flag);
        self
    }

    pub fn label(mut self, label: u32) -> Self {
        self.label = Some(label);
        self
    }

    pub fn optional_tlvs(mut self, tlvs: Vec<Option<Tlv>>) -> Self {
        self.optional_tlvs = tlvs;
        self
    }

    pub fn tlv(mut self, tlv: Tlv) -> Self {
        self.optional_tlvs.push(Some(tlv));
        self
    }

    pub fn p_flag(mut self, p_flag: bool) -> Self {
        self.p_flag = Some(p_flag);
        self
    }

    pub fn i_flag(mut self, i_flag: bool) -> Self {
        self.i_flag = Some(i_flag);
        self
    }

    pub fn build(self) -> Result<LabelObject, BuildError> {
        // The label is mandatory. Zero is a valid label value, distinct
        // from "never set".
        let Some(label) = self.label else {
            return Err(BuildError::MissingRequiredField("label"));
        };

        let mut header =
            self.header.unwrap_or_else(LabelObject::default_header);

        // Apply processing-flag overrides onto the header only when they
        // were explicitly set.
        if let Some(p_flag) = self.p_flag {
            header.flags.set(ObjectFlags::P, p_flag);
        }
        if let Some(i_flag) = self.i_flag {
            header.flags.set(ObjectFlags::I, i_flag);
        }

        Ok(LabelObject {
            header,
            o_flag: self.o_flag.unwrap_or(false),
            label,
            optional_tlvs: self.optional_tlvs,
        })
    }
}
