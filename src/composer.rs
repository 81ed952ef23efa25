// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! UltraPlonk circuit builder definitions

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops;
use hashbrown::HashMap;

use dusk_bls12_381::BlsScalar;

use crate::config::Config;
use crate::error::Error;
use crate::runtime::{Runtime, RuntimeEvent};

mod arithmetic;
mod block;
mod circuit;
mod constraint_system;
mod ecc;
mod gate;
mod lookup;
mod memory;
mod non_native;
mod range;
mod variables;

pub use block::{Block, BlockKind, Blocks};
pub use circuit::Circuit;
pub use constraint_system::{Constraint, Witness, WitnessPoint};
pub use ecc::{EccAddGate, EccDoubleGate};
pub use gate::Gate;
pub use non_native::{NonNativeFieldWitnesses, NON_NATIVE_LIMB_BITS};
pub use range::{DEFAULT_RANGE_BITNUM, DEFAULT_RANGE_SIZE};
pub use variables::DUMMY_TAG;

pub(crate) use block::AuxKind;
pub(crate) use constraint_system::{Selector, WiredWitness};
pub(crate) use memory::{RamArray, RomArray};
pub(crate) use non_native::NON_NATIVE_ROWS;
pub(crate) use range::RangeList;
pub(crate) use variables::Variables;

/// Construct circuits to be validated by the
/// [`Checker`](crate::prelude::Checker)
#[derive(Debug, Clone)]
pub struct Builder {
    /// Rows of every relation family
    pub(crate) blocks: Blocks,

    /// Sparse representation of the public inputs, per arithmetic row
    pub(crate) public_inputs: HashMap<usize, BlsScalar>,

    /// Witness values and their equivalence classes
    pub(crate) variables: Variables,

    /// Range lists indexed by their inclusive target
    pub(crate) range_lists: BTreeMap<u64, RangeList>,

    /// Read-only memory arrays
    pub(crate) rom_arrays: Vec<RomArray>,

    /// Read-write memory arrays
    pub(crate) ram_arrays: Vec<RamArray>,

    pub(crate) config: Config,
    pub(crate) finalized: bool,

    /// First structural inconsistency found while building
    pub(crate) failure: Option<Error>,

    /// Runtime controller
    pub(crate) runtime: Runtime,
}

impl ops::Index<Witness> for Builder {
    type Output = BlsScalar;

    fn index(&self, w: Witness) -> &Self::Output {
        self.variables.value(w)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Zero representation inside the constraint system.
    ///
    /// The builder expects the first witness to be always present and to
    /// be zero.
    pub const ZERO: Witness = Witness::ZERO;

    /// `One` representation inside the constraint system.
    ///
    /// The builder expects the 2nd witness to be always present and to
    /// be one.
    pub const ONE: Witness = Witness::ONE;

    /// Identity point representation inside the constraint system
    pub const IDENTITY: WitnessPoint = WitnessPoint::new(Self::ZERO, Self::ONE);

    /// Initialize the constraint system with the constants for 0 and 1
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Initialize the constraint system with the given configuration
    pub fn with_config(config: Config) -> Self {
        let mut slf = Self {
            blocks: Blocks::default(),
            public_inputs: HashMap::new(),
            variables: Variables::default(),
            range_lists: BTreeMap::new(),
            rom_arrays: Vec::new(),
            ram_arrays: Vec::new(),
            config,
            finalized: false,
            failure: None,
            runtime: Runtime::new(),
        };

        let zero = slf.append_witness(0);
        let one = slf.append_witness(1);

        slf.assert_equal_constant(zero, 0, None);
        slf.assert_equal_constant(one, 1, None);

        slf
    }

    /// Configuration of the builder
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Rows of every block
    pub const fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    /// Rows count of every block
    pub fn constraints(&self) -> usize {
        self.blocks.len()
    }

    /// Allocated witnesses count
    pub fn witnesses(&self) -> usize {
        self.variables.len()
    }

    /// Public inputs, sorted by the arithmetic row that declares them
    pub fn public_inputs(&self) -> Vec<BlsScalar> {
        let mut indexes: Vec<_> = self.public_inputs.keys().copied().collect();
        indexes.sort_unstable();

        indexes
            .iter()
            .filter_map(|idx| self.public_inputs.get(idx).copied())
            .collect()
    }

    /// First inconsistency recorded while building, if any.
    ///
    /// Recording a failure doesn't abort the construction; satisfiability is
    /// decided by the [`Checker`](crate::prelude::Checker).
    pub const fn failure(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    /// Return `true` once the auxiliary rows were appended
    pub const fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Runtime controller
    pub(crate) fn runtime(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    /// Allocate a witness value into the builder and return its index.
    pub fn append_witness<W: Into<BlsScalar>>(
        &mut self,
        witness: W,
    ) -> Witness {
        let v = witness.into();
        let w = self.variables.push(v);

        self.runtime()
            .event(RuntimeEvent::WitnessAppended { w, v });

        w
    }

    /// Resolved value of a witness, through its class representative
    pub fn value(&self, w: Witness) -> BlsScalar {
        self[w]
    }

    /// Class representative of a witness
    pub fn real_index(&self, w: Witness) -> Witness {
        self.variables.real(w)
    }

    /// Tag currently attached to the class of a witness
    pub fn tag(&self, w: Witness) -> u32 {
        self.variables.tag(w)
    }

    /// Merge the equivalence classes of `a` and `b`.
    ///
    /// Every member of the class of `b` resolves to the representative of
    /// `a` afterwards. Merging classes with different values records an
    /// [`Error::AssertEqualFailed`] but doesn't abort.
    pub fn assert_equal(&mut self, a: Witness, b: Witness) {
        if !self.variables.merge(a, b) {
            tracing::debug!(
                a = a.index(),
                b = b.index(),
                "equality asserted between different values"
            );

            self.failure
                .get_or_insert(Error::AssertEqualFailed { a, b });
        }
    }

    /// Declare `tag` and `partner` as a pair of tags whose classes must hold
    /// the same multiset of values
    pub fn create_tag(&mut self, tag: u32, partner: u32) -> Result<(), Error> {
        self.ensure_open()?;

        self.variables.create_tag(tag, partner)
    }

    /// Label the class of `w` with `tag`, overwriting its previous tag
    pub fn assign_tag(&mut self, w: Witness, tag: u32) -> Result<(), Error> {
        self.ensure_open()?;

        self.variables.assign_tag(w, tag)
    }

    /// Allocate a fresh tag id
    pub fn get_new_tag(&mut self) -> u32 {
        self.variables.new_tag()
    }

    pub(crate) fn ensure_open(&self) -> Result<(), Error> {
        match self.finalized {
            true => Err(Error::CircuitFinalized),
            false => Ok(()),
        }
    }

    /// Append a row to the block of the given family and return its index
    /// inside of the block.
    pub(crate) fn append_row(
        &mut self,
        block: BlockKind,
        constraint: Constraint,
    ) -> usize {
        let gate = Gate::from(&constraint);
        let row = self.blocks[block].push(gate);

        if block == BlockKind::Arithmetic && constraint.has_public_input() {
            let pi = *constraint.coeff(Selector::PublicInput);

            self.public_inputs.insert(row, pi);
        }

        self.runtime()
            .event(RuntimeEvent::ConstraintAppended { block, row, gate });

        row
    }

    /// Append the auxiliary rows of memory arrays and range lists.
    ///
    /// The operation is idempotent; after it, memory, range and tag data
    /// can't be extended anymore.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }

        self.process_rom_arrays();
        self.process_ram_arrays();
        self.process_range_lists();

        self.finalized = true;
        self.runtime().event(RuntimeEvent::CircuitFinalized);
    }

    /// Build a circuit into a new builder
    pub fn build<C>(circuit: &C) -> Result<Self, Error>
    where
        C: Circuit,
    {
        Self::build_with_config(circuit, Config::default())
    }

    /// Build a circuit into a new builder with the given configuration
    pub fn build_with_config<C>(
        circuit: &C,
        config: Config,
    ) -> Result<Self, Error>
    where
        C: Circuit,
    {
        let mut builder = Self::with_config(config);

        circuit.circuit(&mut builder)?;

        Ok(builder)
    }
}
