// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use dusk_bls12_381::BlsScalar;

use super::block::BlockKind;
use super::constraint_system::{Constraint, Selector, WiredWitness};
use crate::prelude::Witness;

/// Represents a gate with its associated wire data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    // Selectors
    /// Multiplier selector
    pub(crate) q_m: BlsScalar,
    /// Left wire selector
    pub(crate) q_l: BlsScalar,
    /// Right wire selector
    pub(crate) q_r: BlsScalar,
    /// Output wire selector
    pub(crate) q_o: BlsScalar,
    /// Fourth wire selector
    pub(crate) q_f: BlsScalar,
    /// Constant wire selector
    pub(crate) q_c: BlsScalar,
    /// Arithmetic wire selector
    pub(crate) q_arith: BlsScalar,
    /// Delta range selector
    pub(crate) q_range: BlsScalar,
    /// Curve addition and doubling selector
    pub(crate) q_elliptic: BlsScalar,
    /// Auxiliary family selector
    pub(crate) q_aux: BlsScalar,
    /// Table lookup selector
    pub(crate) q_lookup: BlsScalar,

    /// Left wire witness.
    pub(crate) a: Witness,
    /// Right wire witness.
    pub(crate) b: Witness,
    /// Output wire witness.
    pub(crate) c: Witness,
    /// Fourth wire witness.
    pub(crate) d: Witness,
}

impl From<&Constraint> for Gate {
    fn from(constraint: &Constraint) -> Self {
        Self {
            q_m: *constraint.coeff(Selector::Multiplication),
            q_l: *constraint.coeff(Selector::Left),
            q_r: *constraint.coeff(Selector::Right),
            q_o: *constraint.coeff(Selector::Output),
            q_f: *constraint.coeff(Selector::Fourth),
            q_c: *constraint.coeff(Selector::Constant),
            q_arith: *constraint.coeff(Selector::Arithmetic),
            q_range: *constraint.coeff(Selector::Range),
            q_elliptic: *constraint.coeff(Selector::Elliptic),
            q_aux: *constraint.coeff(Selector::Auxiliary),
            q_lookup: *constraint.coeff(Selector::Lookup),
            a: constraint.witness(WiredWitness::A),
            b: constraint.witness(WiredWitness::B),
            c: constraint.witness(WiredWitness::C),
            d: constraint.witness(WiredWitness::D),
        }
    }
}

impl Gate {
    /// Wires of the gate in `a, b, c, d` order
    pub const fn wires(&self) -> [Witness; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Family selector that belongs to the given block
    pub(crate) const fn family_selector(&self, kind: BlockKind) -> &BlsScalar {
        match kind {
            BlockKind::Arithmetic => &self.q_arith,
            BlockKind::DeltaRange => &self.q_range,
            BlockKind::Elliptic => &self.q_elliptic,
            BlockKind::Auxiliary => &self.q_aux,
            BlockKind::Lookup => &self.q_lookup,
        }
    }

    /// Return `true` if a family selector other than the one of `kind` is set
    pub(crate) fn has_foreign_selector(&self, kind: BlockKind) -> bool {
        BlockKind::ALL
            .iter()
            .filter(|k| **k != kind)
            .any(|k| self.family_selector(*k) != &BlsScalar::zero())
    }
}
