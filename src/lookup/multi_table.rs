// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use dusk_bls12_381::BlsScalar;
use num_bigint::BigUint;

use super::fixed_base::{self, FIXED_BASE_BITS_PER_TABLE};
use super::{BasicTableId, FixedBaseTable};
use crate::error::Error;
use crate::util;

/// Identifier of a multi-table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MultiTableId {
    /// Low 128 bits of a scalar times the left base
    FixedBaseLeftLo,
    /// High 124 bits of a scalar times the left base
    FixedBaseLeftHi,
    /// Low 128 bits of a scalar times the right base
    FixedBaseRightLo,
    /// High 124 bits of a scalar times the right base
    FixedBaseRightHi,
    /// Bitwise XOR of two 32-bit integers
    Uint32Xor,
    /// Bitwise AND of two 32-bit integers
    Uint32And,
}

impl MultiTableId {
    const fn fixed_base(&self) -> Option<FixedBaseTable> {
        match self {
            Self::FixedBaseLeftLo => Some(FixedBaseTable::LeftLo),
            Self::FixedBaseLeftHi => Some(FixedBaseTable::LeftHi),
            Self::FixedBaseRightLo => Some(FixedBaseTable::RightLo),
            Self::FixedBaseRightHi => Some(FixedBaseTable::RightHi),
            _ => None,
        }
    }
}

const UINT_SLICES: [usize; 6] = [6, 6, 6, 6, 6, 2];

/// Column of a lookup row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnIdx {
    /// First key column, wire `a`
    C1 = 0x00,
    /// Second key or first value column, wire `b`
    C2 = 0x01,
    /// Value column, wire `c`
    C3 = 0x02,
}

/// Per column sequence of accumulators of a multi-table lookup, one entry per
/// basic table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadData<T> {
    columns: [Vec<T>; 3],
}

impl<T> Index<ColumnIdx> for ReadData<T> {
    type Output = [T];

    fn index(&self, column: ColumnIdx) -> &Self::Output {
        &self.columns[column as usize]
    }
}

impl<T> IndexMut<ColumnIdx> for ReadData<T> {
    fn index_mut(&mut self, column: ColumnIdx) -> &mut Self::Output {
        &mut self.columns[column as usize]
    }
}

impl<T> ReadData<T> {
    pub(crate) fn new(columns: [Vec<T>; 3]) -> Self {
        Self { columns }
    }

    /// Rows count of the lookup
    pub fn len(&self) -> usize {
        self.columns[0].len()
    }

    /// Return `true` if the lookup has no rows
    pub fn is_empty(&self) -> bool {
        self.columns[0].is_empty()
    }

    /// Columns `C1`, `C2` and `C3`
    pub fn columns(&self) -> &[Vec<T>; 3] {
        &self.columns
    }
}

/// Sequence of basic tables consuming consecutive slices of a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiTable {
    id: MultiTableId,
    basic_tables: Vec<BasicTableId>,
    column_steps: [BlsScalar; 3],
}

impl MultiTable {
    /// Describe the multi-table `id`
    pub fn new(id: MultiTableId) -> Self {
        match id.fixed_base() {
            Some(table) => {
                let basic_tables = (0..fixed_base::tables_count(table))
                    .map(|index| BasicTableId::FixedBase { table, index })
                    .collect();
                let step = util::pow_of_2(FIXED_BASE_BITS_PER_TABLE);

                Self {
                    id,
                    basic_tables,
                    column_steps: [step, BlsScalar::zero(), BlsScalar::zero()],
                }
            }

            None => {
                let (wide, narrow) = match id {
                    MultiTableId::Uint32Xor => (
                        BasicTableId::UintXorSlice6,
                        BasicTableId::UintXorSlice2,
                    ),
                    _ => (
                        BasicTableId::UintAndSlice6,
                        BasicTableId::UintAndSlice2,
                    ),
                };

                let basic_tables = UINT_SLICES
                    .iter()
                    .map(|bits| match bits {
                        6 => wide,
                        _ => narrow,
                    })
                    .collect();
                let step = util::pow_of_2(UINT_SLICES[0]);

                Self {
                    id,
                    basic_tables,
                    column_steps: [step; 3],
                }
            }
        }
    }

    /// Identifier of the multi-table
    pub const fn id(&self) -> MultiTableId {
        self.id
    }

    /// Basic tables, from the least significant slice
    pub fn basic_tables(&self) -> &[BasicTableId] {
        &self.basic_tables
    }

    /// Coefficients relating consecutive accumulators of every column
    pub const fn column_steps(&self) -> [BlsScalar; 3] {
        self.column_steps
    }

    /// Bits of a key consumed by the whole multi-table
    pub fn input_bits(&self) -> usize {
        self.basic_tables.iter().map(|t| t.slice_bits()).sum()
    }

    /// Return `true` if the multi-table is keyed by two scalars
    pub fn has_twin_keys(&self) -> bool {
        self.id.fixed_base().is_none()
    }
}

fn low_u64(n: &BigUint) -> u64 {
    n.iter_u64_digits().next().unwrap_or(0)
}

/// Slice `key_a` (and `key_b` for twin key tables) over the basic tables of
/// `id` and return the running accumulators of every column.
///
/// The accumulators satisfy `acc_i = raw_i + step · acc_{i+1}`, so the first
/// row of a key column is the key itself and the last row is its most
/// significant slice.
pub fn get_lookup_accumulators(
    id: MultiTableId,
    key_a: BlsScalar,
    key_b: BlsScalar,
) -> Result<ReadData<BlsScalar>, Error> {
    let table = MultiTable::new(id);
    let twin = table.has_twin_keys();
    let bits = table.input_bits();

    let a = util::to_biguint(&key_a);
    let b = util::to_biguint(&key_b);

    if a.bits() as usize > bits || (twin && b.bits() as usize > bits) {
        return Err(Error::LookupKeyOutOfRange);
    }

    let rows = table.basic_tables.len();
    let mut raw: [Vec<BlsScalar>; 3] =
        core::array::from_fn(|_| Vec::with_capacity(rows));

    let mut lo = 0;
    for basic in table.basic_tables.iter() {
        let hi = lo + basic.slice_bits();
        let sa = low_u64(&util::slice(&a, lo, hi));
        let sb = match twin {
            true => low_u64(&util::slice(&b, lo, hi)),
            false => 0,
        };

        let values =
            basic.values([sa, sb]).ok_or(Error::LookupKeyOutOfRange)?;

        let row = match twin {
            true => [BlsScalar::from(sa), BlsScalar::from(sb), values[0]],
            false => [BlsScalar::from(sa), values[0], values[1]],
        };

        raw.iter_mut().zip(row).for_each(|(c, v)| c.push(v));
        lo = hi;
    }

    let steps = table.column_steps;
    raw.iter_mut().zip(steps).for_each(|(column, step)| {
        for i in (0..rows - 1).rev() {
            let next = column[i + 1];
            column[i] += next * step;
        }
    });

    Ok(ReadData::new(raw))
}
