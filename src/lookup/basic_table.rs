// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use alloc::vec::Vec;
use hashbrown::HashMap;

use dusk_bls12_381::BlsScalar;

use super::{fixed_base, uint};
use crate::util;

/// Fixed base scalar half and base of a fixed base table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FixedBaseTable {
    /// Low 128 bits of a scalar over the left base
    LeftLo = 0x00,
    /// High 124 bits of a scalar over the left base
    LeftHi = 0x01,
    /// Low 128 bits of a scalar over the right base
    RightLo = 0x02,
    /// High 124 bits of a scalar over the right base
    RightHi = 0x03,
}

impl FixedBaseTable {
    const ALL: [Self; 4] =
        [Self::LeftLo, Self::LeftHi, Self::RightLo, Self::RightHi];

    /// Return `true` for the tables of the high half of a scalar
    pub const fn is_hi(&self) -> bool {
        matches!(self, Self::LeftHi | Self::RightHi)
    }

    /// Return `true` for the tables over the left base
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::LeftLo | Self::LeftHi)
    }
}

/// Identifier of a basic table, encoded in the `q_o` selector of lookup rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BasicTableId {
    /// XOR of two 6-bit slices
    UintXorSlice6,
    /// XOR of two 2-bit slices
    UintXorSlice2,
    /// AND of two 6-bit slices
    UintAndSlice6,
    /// AND of two 2-bit slices
    UintAndSlice2,
    /// `index`-th 9-bit window of a fixed base scalar multiplication
    FixedBase {
        /// Scalar half and base
        table: FixedBaseTable,
        /// Window index from the least significant
        index: usize,
    },
}

/// Selectors reserved for every fixed base table
const FIXED_BASE_SLOTS: u64 = 16;

impl BasicTableId {
    /// Encoding of the identifier as a selector
    pub fn selector(&self) -> BlsScalar {
        let id = match self {
            Self::UintXorSlice6 => 1,
            Self::UintXorSlice2 => 2,
            Self::UintAndSlice6 => 3,
            Self::UintAndSlice2 => 4,
            Self::FixedBase { table, index } => {
                FIXED_BASE_SLOTS * (*table as u64 + 1) + *index as u64
            }
        };

        BlsScalar::from(id)
    }

    /// Decode a selector into an identifier of an existing table
    pub fn from_selector(selector: &BlsScalar) -> Option<Self> {
        let id = match util::to_u64(selector)? {
            1 => Self::UintXorSlice6,
            2 => Self::UintXorSlice2,
            3 => Self::UintAndSlice6,
            4 => Self::UintAndSlice2,
            n if n >= FIXED_BASE_SLOTS => {
                let table = *FixedBaseTable::ALL
                    .get((n / FIXED_BASE_SLOTS - 1) as usize)?;
                let index = (n % FIXED_BASE_SLOTS) as usize;

                Self::FixedBase { table, index }
            }
            _ => return None,
        };

        id.is_valid().then_some(id)
    }

    fn is_valid(&self) -> bool {
        match self {
            Self::FixedBase { table, index } => {
                *index < fixed_base::tables_count(*table)
            }
            _ => true,
        }
    }

    /// Bits of the key slice consumed by the table
    pub fn slice_bits(&self) -> usize {
        match self {
            Self::UintXorSlice6 | Self::UintAndSlice6 => 6,
            Self::UintXorSlice2 | Self::UintAndSlice2 => 2,
            Self::FixedBase { table, index } => {
                fixed_base::slice_bits(*table, *index)
            }
        }
    }

    /// Return `true` if the table is keyed by two columns
    pub const fn has_twin_keys(&self) -> bool {
        !matches!(self, Self::FixedBase { .. })
    }

    /// Values stored under `key`, or `None` if the key is outside of the table.
    ///
    /// Twin key tables store one value, padded with zero.
    pub fn values(&self, key: [u64; 2]) -> Option<[BlsScalar; 2]> {
        let size = 1u64 << self.slice_bits();

        if key[0] >= size || (self.has_twin_keys() && key[1] >= size) {
            return None;
        }

        let values = match self {
            Self::UintXorSlice6 | Self::UintXorSlice2 => {
                [BlsScalar::from(uint::xor(key)), BlsScalar::zero()]
            }
            Self::UintAndSlice6 | Self::UintAndSlice2 => {
                [BlsScalar::from(uint::and(key)), BlsScalar::zero()]
            }
            Self::FixedBase { table, index } => {
                fixed_base::point(*table, *index, key[0])
            }
        };

        Some(values)
    }
}

/// Materialized basic table, with rows `(key, value, value)` or
/// `(key, key, value)` for twin key tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicTable {
    id: BasicTableId,
    entries: Vec<[BlsScalar; 3]>,
    index: HashMap<[u64; 2], usize>,
}

impl BasicTable {
    /// Generate every entry of the table
    pub fn new(id: BasicTableId) -> Self {
        let entries = match id {
            BasicTableId::FixedBase { table, index } => {
                fixed_base::generate(table, index)
            }
            _ => uint::generate(id),
        };

        let index = entries
            .iter()
            .enumerate()
            .filter_map(|(i, row)| Some((Self::key_of(id, row)?, i)))
            .collect();

        Self { id, entries, index }
    }

    fn key_of(id: BasicTableId, row: &[BlsScalar; 3]) -> Option<[u64; 2]> {
        let k0 = util::to_u64(&row[0])?;
        let k1 = match id.has_twin_keys() {
            true => util::to_u64(&row[1])?,
            false => 0,
        };

        Some([k0, k1])
    }

    /// Identifier of the table
    pub const fn id(&self) -> BasicTableId {
        self.id
    }

    /// Entries count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows of the table
    pub fn entries(&self) -> &[[BlsScalar; 3]] {
        &self.entries
    }

    /// Return `true` if `row` is an entry of the table
    pub fn contains(&self, row: &[BlsScalar; 3]) -> bool {
        Self::key_of(self.id, row)
            .and_then(|key| self.index.get(&key))
            .map(|i| &self.entries[*i] == row)
            .unwrap_or(false)
    }
}
