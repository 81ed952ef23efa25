// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Gate blocks, one append-only row sequence per relation family.

use alloc::vec::Vec;
use core::{fmt, ops};

use dusk_bls12_381::BlsScalar;

use super::Gate;

/// Relation family of a block, in checking order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockKind {
    /// Width-4 arithmetic rows, optionally chained through the next `d` wire
    Arithmetic = 0x00,
    /// Sorted sequences with steps in `{0, 1, 2, 3}`
    DeltaRange = 0x01,
    /// Twisted Edwards point addition and doubling
    Elliptic = 0x02,
    /// Non-native field arithmetic and memory records
    Auxiliary = 0x03,
    /// Table lookups
    Lookup = 0x04,
}

impl BlockKind {
    /// Every block kind, in checking order
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Arithmetic,
        BlockKind::DeltaRange,
        BlockKind::Elliptic,
        BlockKind::Auxiliary,
        BlockKind::Lookup,
    ];
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Arithmetic => "arithmetic",
            Self::DeltaRange => "delta range",
            Self::Elliptic => "elliptic",
            Self::Auxiliary => "auxiliary",
            Self::Lookup => "lookup",
        };

        write!(f, "{name}")
    }
}

/// Row kind inside of the auxiliary block, stored in `q_aux`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuxKind {
    /// Head of a non-native field multiplication
    NonNativeField = 0x01,
    /// ROM access record
    RomAccess = 0x02,
    /// ROM record in sorted order
    RomSorted = 0x03,
    /// RAM access record
    RamAccess = 0x04,
    /// RAM record in sorted order
    RamSorted = 0x05,
}

impl AuxKind {
    pub(crate) fn selector(self) -> BlsScalar {
        BlsScalar::from(self as u64)
    }

    pub(crate) fn from_selector(q_aux: &BlsScalar) -> Option<Self> {
        [
            Self::NonNativeField,
            Self::RomAccess,
            Self::RomSorted,
            Self::RamAccess,
            Self::RamSorted,
        ]
        .into_iter()
        .find(|k| &k.selector() == q_aux)
    }
}

/// Ordered sequence of rows sharing one relation family
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub(crate) gates: Vec<Gate>,
}

impl Block {
    /// Rows count
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Return `true` if the block has no rows
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Rows of the block, in insertion order
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub(crate) fn push(&mut self, gate: Gate) -> usize {
        self.gates.push(gate);

        self.gates.len() - 1
    }
}

/// The disjoint partition of all rows of a circuit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocks {
    arithmetic: Block,
    delta_range: Block,
    elliptic: Block,
    auxiliary: Block,
    lookup: Block,
}

impl Blocks {
    /// Total rows count of every block
    pub fn len(&self) -> usize {
        BlockKind::ALL.iter().map(|k| self[*k].len()).sum()
    }

    /// Return `true` if no block has rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ops::Index<BlockKind> for Blocks {
    type Output = Block;

    fn index(&self, kind: BlockKind) -> &Self::Output {
        match kind {
            BlockKind::Arithmetic => &self.arithmetic,
            BlockKind::DeltaRange => &self.delta_range,
            BlockKind::Elliptic => &self.elliptic,
            BlockKind::Auxiliary => &self.auxiliary,
            BlockKind::Lookup => &self.lookup,
        }
    }
}

impl ops::IndexMut<BlockKind> for Blocks {
    fn index_mut(&mut self, kind: BlockKind) -> &mut Self::Output {
        match kind {
            BlockKind::Arithmetic => &mut self.arithmetic,
            BlockKind::DeltaRange => &mut self.delta_range,
            BlockKind::Elliptic => &mut self.elliptic,
            BlockKind::Auxiliary => &mut self.auxiliary,
            BlockKind::Lookup => &mut self.lookup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aux_kind_round_trips_through_its_selector() {
        for kind in [AuxKind::NonNativeField, AuxKind::RamSorted] {
            assert_eq!(AuxKind::from_selector(&kind.selector()), Some(kind));
        }

        assert_eq!(AuxKind::from_selector(&BlsScalar::zero()), None);
        assert_eq!(AuxKind::from_selector(&BlsScalar::from(6u64)), None);
    }

    #[test]
    fn blocks_are_disjoint() {
        let mut blocks = Blocks::default();
        let gate = Gate::from(&crate::prelude::Constraint::new());

        blocks[BlockKind::Elliptic].push(gate);
        blocks[BlockKind::Elliptic].push(gate);
        blocks[BlockKind::Lookup].push(gate);

        assert_eq!(blocks[BlockKind::Elliptic].len(), 2);
        assert_eq!(blocks[BlockKind::Lookup].len(), 1);
        assert!(blocks[BlockKind::Arithmetic].is_empty());
        assert_eq!(blocks.len(), 3);
    }
}
