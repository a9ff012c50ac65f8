//
// Copyright (c) The Pcep-rs Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod packet;
