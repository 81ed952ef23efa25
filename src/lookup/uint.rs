// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use alloc::vec::Vec;

use dusk_bls12_381::BlsScalar;

use super::BasicTableId;

pub(crate) const fn xor(key: [u64; 2]) -> u64 {
    key[0] ^ key[1]
}

pub(crate) const fn and(key: [u64; 2]) -> u64 {
    key[0] & key[1]
}

/// Rows `(a, b, f(a, b))` of a twin key table, for every pair of slices
pub(crate) fn generate(id: BasicTableId) -> Vec<[BlsScalar; 3]> {
    let f = match id {
        BasicTableId::UintXorSlice6 | BasicTableId::UintXorSlice2 => xor,
        BasicTableId::UintAndSlice6 | BasicTableId::UintAndSlice2 => and,
        BasicTableId::FixedBase { .. } => return Vec::new(),
    };

    let upper_bound = 1u64 << id.slice_bits();
    let range = 0..upper_bound;

    let mut table = Vec::with_capacity((upper_bound * upper_bound) as usize);

    for a in range.clone() {
        range
            .clone()
            .map(|b| {
                let c = f([a, b]);
                [BlsScalar::from(a), BlsScalar::from(b), BlsScalar::from(c)]
            })
            .for_each(|row| table.push(row));
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_bit_tables_cover_every_pair() {
        let xor = generate(BasicTableId::UintXorSlice2);
        let and = generate(BasicTableId::UintAndSlice2);

        assert_eq!(xor.len(), 16);
        assert_eq!(and.len(), 16);

        // (3, 1) is the 14th pair
        assert_eq!(xor[13][2], BlsScalar::from(2u64));
        assert_eq!(and[13][2], BlsScalar::from(1u64));

        let fixed = BasicTableId::FixedBase {
            table: super::super::FixedBaseTable::LeftLo,
            index: 0,
        };
        assert!(generate(fixed).is_empty());
    }
}
