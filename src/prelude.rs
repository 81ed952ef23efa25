// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Collection of functions needed to use the ultraplonk library.
//!
//! Use this as the only import that you need to interact with the principal
//! data structures of the library.

pub use crate::checker::{Checker, Failure};
pub use crate::composer::{
    Block, BlockKind, Blocks, Builder, Circuit, Constraint, EccAddGate,
    EccDoubleGate, Gate, NonNativeFieldWitnesses, Witness, WitnessPoint,
    DEFAULT_RANGE_BITNUM, DEFAULT_RANGE_SIZE, DUMMY_TAG, NON_NATIVE_LIMB_BITS,
};
pub use crate::config::{Config, UninitializedRom};
pub use crate::error::Error;
pub use crate::lookup::{
    get_lookup_accumulators, BasicTableId, ColumnIdx, FixedBaseTable,
    MultiTableId, ReadData,
};
pub use crate::runtime::RuntimeEvent;

/// Re-exported [`dusk_bls12_381::BlsScalar`].
pub use dusk_bls12_381::BlsScalar;

/// Re-exported [`dusk_jubjub::JubJubScalar`],
/// [`dusk_jubjub::JubJubAffine`] and [`dusk_jubjub::JubJubExtended`].
pub use dusk_jubjub::{
    JubJubAffine, JubJubExtended, JubJubScalar, GENERATOR, GENERATOR_EXTENDED,
};
