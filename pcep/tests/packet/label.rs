//
// Copyright (c) The Pcep-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::sync::LazyLock as Lazy;

use const_addrs::{ip4, ip6};

use super::*;

static LABEL_OBJ1: Lazy<(Vec<u8>, LabelObject)> = Lazy::new(|| {
    (
        vec![
            0x23, 0x12, 0x00, 0x14, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0xc3,
            0x50, 0x00, 0x02, 0x00, 0x04, 0x0a, 0x00, 0x00, 0x01,
        ],
        LabelObject {
            header: ObjectHeader {
                object_class: 35,
                object_type: 1,
                flags: ObjectFlags::P,
                length: 20,
            },
            o_flag: true,
            label: 0x0000c350,
            optional_tlvs: vec![Some(Tlv::NexthopIpv4Addr(ip4!("10.0.0.1")))],
        },
    )
});
static LABEL_OBJ2: Lazy<(Vec<u8>, LabelObject)> = Lazy::new(|| {
    (
        vec![
            0x23, 0x10, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x10,
        ],
        LabelObject {
            header: ObjectHeader {
                object_class: 35,
                object_type: 1,
                flags: ObjectFlags::empty(),
                length: 12,
            },
            o_flag: false,
            label: 16,
            optional_tlvs: vec![],
        },
    )
});
static LABEL_OBJ3: Lazy<(Vec<u8>, LabelObject)> = Lazy::new(|| {
    (
        vec![
            0x23, 0x10, 0x00, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x12, 0x00, 0x11, 0x00, 0x05, 0x4c, 0x53, 0x50, 0x2d, 0x31, 0x00,
            0x00, 0x00,
        ],
        LabelObject {
            header: ObjectHeader {
                object_class: 35,
                object_type: 1,
                flags: ObjectFlags::empty(),
                length: 24,
            },
            o_flag: false,
            label: 18,
            optional_tlvs: vec![Some(Tlv::SymbolicPathName(
                b"LSP-1".to_vec(),
            ))],
        },
    )
});
static LABEL_OBJ4: Lazy<(Vec<u8>, LabelObject)> = Lazy::new(|| {
    (
        vec![
            0x23, 0x13, 0x00, 0x2c, 0x00, 0x00, 0x00, 0x01, 0x00, 0x0f, 0xff,
            0xff, 0x00, 0x03, 0x00, 0x10, 0x20, 0x01, 0x0d, 0xb8, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00,
            0x04, 0x00, 0x08, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x07,
        ],
        LabelObject {
            header: ObjectHeader {
                object_class: 35,
                object_type: 1,
                flags: ObjectFlags::P | ObjectFlags::I,
                length: 44,
            },
            o_flag: true,
            label: 0x000fffff,
            optional_tlvs: vec![
                Some(Tlv::NexthopIpv6Addr(ip6!("2001:db8::1"))),
                Some(Tlv::NexthopUnnumberedIpv4Id {
                    node_id: 0x01010101,
                    interface_id: 7,
                }),
            ],
        },
    )
});

#[test]
fn test_encode_label1() {
    let (ref bytes, ref obj) = *LABEL_OBJ1;
    test_encode_obj(bytes, obj);
}

#[test]
fn test_decode_label1() {
    let (ref bytes, ref obj) = *LABEL_OBJ1;
    test_decode_obj(bytes, obj);
}

#[test]
fn test_encode_label2() {
    let (ref bytes, ref obj) = *LABEL_OBJ2;
    test_encode_obj(bytes, obj);
}

#[test]
fn test_decode_label2() {
    let (ref bytes, ref obj) = *LABEL_OBJ2;
    test_decode_obj(bytes, obj);
}

#[test]
fn test_encode_label3() {
    let (ref bytes, ref obj) = *LABEL_OBJ3;
    test_encode_obj(bytes, obj);
}

#[test]
fn test_decode_label3() {
    let (ref bytes, ref obj) = *LABEL_OBJ3;
    test_decode_obj(bytes, obj);
}

#[test]
fn test_encode_label4() {
    let (ref bytes, ref obj) = *LABEL_OBJ4;
    test_encode_obj(bytes, obj);
}

#[test]
fn test_decode_label4() {
    let (ref bytes, ref obj) = *LABEL_OBJ4;
    test_decode_obj(bytes, obj);
}

// An object advertising a length that leaves less than a TLV header of
// unconsumed body bytes must be rejected.
#[test]
fn test_decode_label_trailing_bytes() {
    test_decode_obj_err(
        &[
            0x23, 0x10, 0x00, 0x0e, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x10, 0xde, 0xad,
        ],
        DecodeError::TrailingBytes,
    );
}

// Unknown TLV type codes abort the whole object decode, even though the
// header and fixed fields parsed successfully.
#[test]
fn test_decode_label_unknown_tlv() {
    test_decode_obj_err(
        &[
            0x23, 0x12, 0x00, 0x14, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0xc3,
            0x50, 0x00, 0xff, 0x00, 0x04, 0xca, 0xfe, 0xba, 0xbe,
        ],
        DecodeError::UnsupportedTlvType(0x00ff),
    );
}

#[test]
fn test_decode_label_truncated_header() {
    test_decode_obj_err(&[0x23, 0x10, 0x00], DecodeError::TruncatedInput);
}

#[test]
fn test_decode_label_truncated_body() {
    test_decode_obj_err(
        &[
            0x23, 0x12, 0x00, 0x14, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0xc3,
            0x50,
        ],
        DecodeError::TruncatedInput,
    );
}

#[test]
fn test_decode_label_truncated_tlv_value() {
    test_decode_obj_err(
        &[
            0x23, 0x10, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x12, 0x00, 0x11, 0x00, 0x05,
        ],
        DecodeError::TruncatedInput,
    );
}

#[test]
fn test_decode_label_short_length() {
    test_decode_obj_err(
        &[0x23, 0x10, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00],
        DecodeError::InvalidObjectLength(8),
    );
}

// Padding of the final TLV may be cut short on the wire; the value itself
// still decodes.
#[test]
fn test_decode_label_truncated_padding() {
    let bytes = [
        0x23, 0x10, 0x00, 0x16, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x12, 0x00, 0x11, 0x00, 0x05, 0x4c, 0x53, 0x50, 0x2d, 0x31, 0x00,
    ];
    let mut buf = Bytes::copy_from_slice(&bytes);
    let obj = LabelObject::decode(&mut buf).unwrap();
    assert_eq!(
        obj.optional_tlvs,
        vec![Some(Tlv::SymbolicPathName(b"LSP-1".to_vec()))]
    );
}

// Unset optional TLV slots are skipped on encode and reported through the
// encode information.
#[test]
fn test_encode_label_skipped_tlv_slots() {
    let (ref bytes, _) = *LABEL_OBJ1;

    let mut obj = LabelObjectBuilder::new()
        .header(ObjectHeader {
            object_class: 35,
            object_type: 1,
            flags: ObjectFlags::P,
            length: 12,
        })
        .o_flag(true)
        .label(0x0000c350)
        .optional_tlvs(vec![
            None,
            Some(Tlv::NexthopIpv4Addr(ip4!("10.0.0.1"))),
            None,
        ])
        .build()
        .unwrap();

    let mut bytes_actual = BytesMut::with_capacity(1500);
    let info = obj.encode(&mut bytes_actual).unwrap();
    assert_eq!(info.tlvs_skipped, 2);
    assert_eq_hex!(bytes.as_slice(), bytes_actual);
}

//
// Builder tests.
//

#[test]
fn test_build_label_missing_label() {
    let err = LabelObjectBuilder::new()
        .o_flag(true)
        .tlv(Tlv::NexthopIpv4Addr(ip4!("10.0.0.1")))
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::MissingRequiredField("label"));
}

#[test]
fn test_build_label_zero_is_set() {
    let obj = LabelObjectBuilder::new().label(0).build().unwrap();
    assert_eq!(obj.label, 0);
}

#[test]
fn test_build_label_defaults() {
    let obj = LabelObjectBuilder::new().label(100).build().unwrap();
    assert!(!obj.o_flag);
    assert_eq!(obj.header, LabelObject::default_header());
    assert!(obj.optional_tlvs.is_empty());
}

#[test]
fn test_build_label_flag_overrides() {
    let obj = LabelObjectBuilder::new()
        .label(1)
        .p_flag(true)
        .i_flag(true)
        .build()
        .unwrap();
    assert_eq!(obj.header.flags, ObjectFlags::P | ObjectFlags::I);

    // Overrides also apply onto an explicitly provided header.
    let obj = LabelObjectBuilder::new()
        .label(1)
        .header(LabelObject::default_header())
        .p_flag(true)
        .build()
        .unwrap();
    assert_eq!(obj.header.flags, ObjectFlags::P);
}

// Two consecutive builds must not share header state: patching the length
// of one object during encode leaves the other untouched.
#[test]
fn test_build_label_independent_headers() {
    let mut obj1 = LabelObjectBuilder::new()
        .label(1)
        .tlv(Tlv::NexthopIpv4Addr(ip4!("10.0.0.1")))
        .build()
        .unwrap();
    let obj2 = LabelObjectBuilder::new().label(1).build().unwrap();

    let mut buf = BytesMut::with_capacity(1500);
    obj1.encode(&mut buf).unwrap();

    assert_eq!(obj1.header.length, 20);
    assert_eq!(obj2.header.length, 12);
}
