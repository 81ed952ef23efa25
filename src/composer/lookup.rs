// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use alloc::vec::Vec;

use dusk_bls12_381::BlsScalar;

use super::{BlockKind, Builder, Constraint, Witness};
use crate::error::Error;
use crate::lookup::{
    get_lookup_accumulators, ColumnIdx, MultiTable, MultiTableId, ReadData,
};

impl Builder {
    /// Append one lookup row per basic table of `id`, wiring the
    /// accumulators of `data`.
    ///
    /// The first row reuses `key_a` (and `key_b` for twin key tables) when
    /// provided, so the lookup is bound to the keys.
    pub fn create_gates_from_lookup_accumulators(
        &mut self,
        id: MultiTableId,
        data: &ReadData<BlsScalar>,
        key_a: Option<Witness>,
        key_b: Option<Witness>,
    ) -> ReadData<Witness> {
        let table = MultiTable::new(id);
        let steps = table.column_steps();
        let rows = data.len().min(table.basic_tables().len());

        let mut columns: [Vec<Witness>; 3] =
            core::array::from_fn(|_| Vec::with_capacity(rows));

        for (i, basic) in table.basic_tables().iter().take(rows).enumerate() {
            let first = i == 0;

            let c1 = match key_a {
                Some(w) if first => w,
                _ => self.append_witness(data[ColumnIdx::C1][i]),
            };

            let c2 = match key_b {
                Some(w) if first && table.has_twin_keys() => w,
                _ => self.append_witness(data[ColumnIdx::C2][i]),
            };

            let c3 = self.append_witness(data[ColumnIdx::C3][i]);

            let [s1, s2, s3] = match i + 1 == rows {
                true => [BlsScalar::zero(); 3],
                false => steps,
            };

            let row = Constraint::new()
                .output(basic.selector())
                .right(s1)
                .mult(s2)
                .constant(s3)
                .a(c1)
                .b(c2)
                .c(c3)
                .d(Self::ZERO);

            self.append_row(BlockKind::Lookup, Constraint::lookup(&row));

            columns[0].push(c1);
            columns[1].push(c2);
            columns[2].push(c3);
        }

        ReadData::new(columns)
    }

    /// Look the values of `key_a` (and `key_b` for twin key tables) up in the
    /// multi-table `id` and return the witnesses of every accumulator.
    pub fn append_lookup(
        &mut self,
        id: MultiTableId,
        key_a: Witness,
        key_b: Option<Witness>,
    ) -> Result<ReadData<Witness>, Error> {
        let b = key_b.map(|w| self[w]).unwrap_or(BlsScalar::zero());
        let data = get_lookup_accumulators(id, self[key_a], b)?;

        Ok(self.create_gates_from_lookup_accumulators(
            id,
            &data,
            Some(key_a),
            key_b,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::BasicTableId;

    #[test]
    fn lookup_rows_store_the_steps_until_the_last() {
        let mut builder = Builder::new();

        let a = builder.append_witness(0xffff_0000u64);
        let b = builder.append_witness(0x0f0f_0f0fu64);

        let out = builder
            .append_lookup(MultiTableId::Uint32Xor, a, Some(b))
            .expect("32-bit keys");

        assert_eq!(out[ColumnIdx::C1][0], a);
        assert_eq!(out[ColumnIdx::C2][0], b);
        assert_eq!(
            builder[out[ColumnIdx::C3][0]],
            BlsScalar::from(0xffff_0000u64 ^ 0x0f0f_0f0f)
        );

        let rows = builder.blocks()[BlockKind::Lookup].gates();
        let step = BlsScalar::from(64u64);

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].q_o, BasicTableId::UintXorSlice6.selector());
        assert_eq!(rows[5].q_o, BasicTableId::UintXorSlice2.selector());
        assert_eq!([rows[0].q_r, rows[0].q_m, rows[0].q_c], [step; 3]);
        assert_eq!(rows[5].q_r, BlsScalar::zero());
        assert!(rows.iter().all(|r| r.q_lookup == BlsScalar::one()));
    }

    #[test]
    fn fixed_base_lookups_ignore_the_second_key() {
        let mut builder = Builder::new();

        let k = builder.append_witness(12345u64);
        let other = builder.append_witness(7u64);

        let out = builder
            .append_lookup(MultiTableId::FixedBaseLeftLo, k, Some(other))
            .expect("128-bit key");

        assert_eq!(out.len(), 15);
        assert_eq!(out[ColumnIdx::C1][0], k);
        assert_ne!(out[ColumnIdx::C2][0], other);
    }
}
