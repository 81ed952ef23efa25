// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Circuit satisfiability checker.
//!
//! The checker evaluates the relation of every row against the resolved values
//! of its wires, replays the memory records of every ROM and RAM array and
//! compares the multisets of every pair of tags.

use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;

use itertools::Itertools;

#[cfg(feature = "std")]
use rayon::prelude::*;

use crate::composer::{BlockKind, Builder};
use crate::lookup::{BasicTable, BasicTableId};
use crate::util;

mod memory;
mod relations;

/// First unsatisfied relation found by the [`Checker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The relation of a row doesn't hold
    Gate {
        /// Block of the row
        block: BlockKind,
        /// Index of the row inside of its block
        row: usize,
    },
    /// A row carries the family selector of another block
    MixedSelectors {
        /// Block of the row
        block: BlockKind,
        /// Index of the row inside of its block
        row: usize,
    },
    /// The records of a memory array are inconsistent
    Memory {
        /// Id of the ROM or RAM array
        array: usize,
        /// Index of the offending row inside of the auxiliary block
        row: usize,
    },
    /// The classes of a pair of tags hold different multisets of values
    TagPermutation {
        /// Tag
        tag: u32,
        /// Partner of the tag
        partner: u32,
    },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gate { block, row } => {
                write!(f, "row {row} of the {block} block is unsatisfied")
            }
            Self::MixedSelectors { block, row } => write!(
                f,
                "row {row} of the {block} block has a foreign selector"
            ),
            Self::Memory { array, row } => write!(
                f,
                "memory array {array} is inconsistent at auxiliary row {row}"
            ),
            Self::TagPermutation { tag, partner } => write!(
                f,
                "tags {tag} and {partner} hold different multisets"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Failure {}

/// Materialized basic tables referenced by the lookup block
pub(crate) type LookupTables = HashMap<BasicTableId, BasicTable>;

/// Circuit satisfiability checker
#[derive(Debug, Clone, Copy, Default)]
pub struct Checker;

impl Checker {
    /// Return `true` if every relation of the circuit holds
    pub fn check(builder: &Builder) -> bool {
        Self::verify(builder).is_ok()
    }

    /// Check every relation of the circuit and return the first unsatisfied.
    ///
    /// The builder is left untouched; the relations are evaluated on a
    /// finalized copy of it.
    #[tracing::instrument(skip_all, level = "debug")]
    pub fn verify(builder: &Builder) -> Result<(), Failure> {
        let mut circuit = builder.clone();
        circuit.finalize();

        tracing::debug!(
            rows = circuit.constraints(),
            witnesses = circuit.witnesses(),
            "checking circuit"
        );

        let tables = Self::lookup_tables(&circuit);

        BlockKind::ALL
            .iter()
            .try_for_each(|kind| Self::check_block(&circuit, *kind, &tables))
            .and_then(|_| memory::check(&circuit))
            .and_then(|_| Self::check_tags(&circuit))
            .map_err(|failure| {
                Self::report(&circuit, &failure);

                failure
            })
    }

    fn lookup_tables(circuit: &Builder) -> LookupTables {
        circuit.blocks()[BlockKind::Lookup]
            .gates()
            .iter()
            .filter_map(|gate| BasicTableId::from_selector(&gate.q_o))
            .sorted_unstable()
            .dedup()
            .map(|id| (id, BasicTable::new(id)))
            .collect()
    }

    fn check_block(
        circuit: &Builder,
        kind: BlockKind,
        tables: &LookupTables,
    ) -> Result<(), Failure> {
        let rows = circuit.blocks()[kind].len();

        #[cfg(feature = "std")]
        let failure = (0..rows).into_par_iter().find_map_first(|row| {
            relations::check_row(circuit, kind, row, tables)
        });

        #[cfg(not(feature = "std"))]
        let failure = (0..rows)
            .find_map(|row| relations::check_row(circuit, kind, row, tables));

        match failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Compare the multisets of values of the classes of every tag pair
    fn check_tags(circuit: &Builder) -> Result<(), Failure> {
        let mut classes: HashMap<u32, Vec<[u8; 32]>> = HashMap::new();

        circuit.variables.reals().for_each(|w| {
            classes
                .entry(circuit.tag(w))
                .or_default()
                .push(util::sort_key(&circuit[w]));
        });

        let pairs = circuit
            .variables
            .tags()
            .iter()
            .filter(|(tag, partner)| tag < partner)
            .map(|(tag, partner)| (*tag, *partner))
            .sorted_unstable();

        for (tag, partner) in pairs {
            let values = |t: u32| {
                classes
                    .get(&t)
                    .map(|v| v.iter().sorted_unstable().collect::<Vec<_>>())
                    .unwrap_or_default()
            };

            if values(tag) != values(partner) {
                return Err(Failure::TagPermutation { tag, partner });
            }
        }

        Ok(())
    }

    fn report(circuit: &Builder, failure: &Failure) {
        tracing::debug!(%failure, "circuit unsatisfied");

        #[cfg(feature = "debug")]
        {
            let location = match failure {
                Failure::Gate { block, row }
                | Failure::MixedSelectors { block, row } => {
                    Some((*block, *row))
                }
                Failure::Memory { row, .. } => {
                    Some((BlockKind::Auxiliary, *row))
                }
                Failure::TagPermutation { .. } => None,
            };

            if let Some(source) = location
                .and_then(|(block, row)| circuit.runtime.source(block, row))
            {
                tracing::debug!(%source, "unsatisfied row appended");
            }
        }

        #[cfg(not(feature = "debug"))]
        let _ = circuit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::Constraint;
    use crate::lookup::MultiTableId;
    use dusk_bls12_381::BlsScalar;

    // first row appended after the constant rows of the builder
    const ROW: usize = 2;

    fn sum() -> Builder {
        let mut builder = Builder::new();

        let a = builder.append_witness(3);
        let b = builder.append_witness(4);

        let constraint = Constraint::new().left(1).right(1).a(a).b(b);
        builder.gate_add(constraint);

        builder
    }

    #[test]
    fn foreign_selectors_are_reported() {
        let mut builder = sum();
        assert_eq!(Checker::verify(&builder), Ok(()));

        builder.blocks[BlockKind::Arithmetic].gates[ROW].q_range =
            BlsScalar::one();

        assert_eq!(
            Checker::verify(&builder),
            Err(Failure::MixedSelectors {
                block: BlockKind::Arithmetic,
                row: ROW
            })
        );
    }

    #[test]
    fn unknown_arithmetic_mode_is_unsatisfied() {
        let mut builder = sum();

        builder.blocks[BlockKind::Arithmetic].gates[ROW].q_arith =
            BlsScalar::from(3u64);

        assert_eq!(
            Checker::verify(&builder),
            Err(Failure::Gate {
                block: BlockKind::Arithmetic,
                row: ROW
            })
        );
    }

    #[test]
    fn unknown_auxiliary_row_is_unsatisfied() {
        let mut builder = Builder::new();

        let rom = builder.create_rom_array(1).expect("non empty array");
        let v = builder.append_witness(5);
        builder.set_rom_element(rom, 0, v).expect("unset cell");

        assert!(Checker::check(&builder));

        builder.blocks[BlockKind::Auxiliary].gates[0].q_aux =
            BlsScalar::from(99u64);

        assert_eq!(
            Checker::verify(&builder),
            Err(Failure::Gate {
                block: BlockKind::Auxiliary,
                row: 0
            })
        );
    }

    #[test]
    fn unknown_lookup_table_is_unsatisfied() {
        let mut builder = Builder::new();

        let a = builder.append_witness(0x1234_5678u64);
        let b = builder.append_witness(0x0fed_cba9u64);
        builder
            .append_lookup(MultiTableId::Uint32And, a, Some(b))
            .expect("32-bit keys");

        assert!(Checker::check(&builder));

        let tables = Checker::lookup_tables(&builder);
        assert_eq!(
            tables.keys().copied().sorted_unstable().collect::<Vec<_>>(),
            [BasicTableId::UintAndSlice6, BasicTableId::UintAndSlice2]
        );

        builder.blocks[BlockKind::Lookup].gates[0].q_o = BlsScalar::from(9u64);

        assert_eq!(
            Checker::verify(&builder),
            Err(Failure::Gate {
                block: BlockKind::Lookup,
                row: 0
            })
        );
    }

    #[test]
    fn blocks_are_checked_in_order() {
        let mut builder = sum();

        let a = builder.append_witness(1);
        let b = builder.append_witness(2);
        builder
            .append_lookup(MultiTableId::Uint32Xor, a, Some(b))
            .expect("32-bit keys");

        builder.blocks[BlockKind::Lookup].gates[0].q_lookup =
            BlsScalar::from(2u64);
        builder.blocks[BlockKind::Arithmetic].gates[ROW].q_c =
            BlsScalar::one();

        assert_eq!(
            Checker::verify(&builder),
            Err(Failure::Gate {
                block: BlockKind::Arithmetic,
                row: ROW
            })
        );
    }
}
