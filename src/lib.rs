// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Arithmetization core of an UltraPlonk constraint system.
//!
//! A [`Builder`](prelude::Builder) turns relations over field elements into
//! rows of fixed width, grouped in blocks per relation family: arithmetic,
//! delta range, elliptic curve, auxiliary (non-native field and memory) and
//! table lookups. Witnesses are tracked in equivalence classes that may carry
//! tags, and ROM/RAM arrays are backed by records replayed at finalization.
//!
//! The [`Checker`](prelude::Checker) decides if an assignment satisfies every
//! relation of a circuit.

#![cfg_attr(not(feature = "std"), no_std)]
// Variables have always the same names in respect to wires.
#![allow(clippy::many_single_char_names)]
// Bool expr are usually easier to read with match statements.
#![allow(clippy::match_bool)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

extern crate alloc;

mod checker;
mod composer;
mod config;
mod runtime;
mod util;

#[cfg(feature = "debug")]
mod debugger;

pub mod error;
pub mod lookup;
pub mod prelude;

#[cfg(feature = "debug")]
pub use debugger::Source;
