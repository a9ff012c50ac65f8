//
// Copyright (c) The Pcep-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod error;
pub mod object;
pub mod objects;
pub mod tlv;

pub use error::*;
pub use object::*;
pub use objects::*;
pub use tlv::*;
