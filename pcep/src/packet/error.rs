//
// Copyright (c) The Pcep-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bytes::TryGetError;
use serde::{Deserialize, Serialize};

// Type aliases.
pub type DecodeResult<T> = Result<T, DecodeError>;

// PCEP object decode errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum DecodeError {
    TruncatedInput,
    // Object header
    InvalidObjectLength(u16),
    // TLVs
    UnsupportedTlvType(u16),
    InvalidTlvLength(u16),
    TrailingBytes,
}

// PCEP object encode errors.
//
// `InvalidHeaderState` indicates a programming-contract violation (the
// serialized object can't be described by its own header), not malformed
// input data.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum EncodeError {
    InvalidHeaderState,
}

// Object builder errors, raised by `build()` only.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    MissingRequiredField(&'static str),
}

// ===== impl DecodeError =====

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::TruncatedInput => {
                write!(f, "attempt to read out of bounds")
            }
            DecodeError::InvalidObjectLength(len) => {
                write!(f, "Invalid object length: {len}")
            }
            DecodeError::UnsupportedTlvType(tlv_type) => {
                write!(f, "Unsupported TLV type: {tlv_type}")
            }
            DecodeError::InvalidTlvLength(len) => {
                write!(f, "Invalid TLV length: {len}")
            }
            DecodeError::TrailingBytes => {
                write!(f, "Extra bytes after the object body")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<TryGetError> for DecodeError {
    fn from(_error: TryGetError) -> DecodeError {
        DecodeError::TruncatedInput
    }
}

// ===== impl EncodeError =====

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::InvalidHeaderState => {
                write!(f, "Invalid object header state")
            }
        }
    }
}

impl std::error::Error for EncodeError {}

// ===== impl BuildError =====

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::MissingRequiredField(field) => {
                write!(f, "Required field not set: {field}")
            }
        }
    }
}

impl std::error::Error for BuildError {}
