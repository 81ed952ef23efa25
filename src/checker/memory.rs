// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Replay of the ROM and RAM records of the auxiliary block.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use hashbrown::HashMap;

use dusk_bls12_381::BlsScalar;

use super::Failure;
use crate::composer::{AuxKind, BlockKind, Builder};
use crate::util;

/// A memory record, as read from its row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Record {
    row: usize,
    index: BlsScalar,
    value: BlsScalar,
    timestamp: BlsScalar,
    access: BlsScalar,
    size: BlsScalar,
}

impl Record {
    fn key(&self) -> [[u8; 32]; 4] {
        [
            util::sort_key(&self.index),
            util::sort_key(&self.value),
            util::sort_key(&self.timestamp),
            util::sort_key(&self.access),
        ]
    }
}

#[derive(Debug, Default)]
struct Array {
    accesses: Vec<Record>,
    sorted: Vec<Record>,
}

/// Replay the records of every ROM array, then every RAM array
pub(crate) fn check(circuit: &Builder) -> Result<(), Failure> {
    let [rom, ram] = collect(circuit);

    rom.iter()
        .try_for_each(|(id, array)| check_array(*id, array, false))?;
    ram.iter()
        .try_for_each(|(id, array)| check_array(*id, array, true))?;

    Ok(())
}

fn collect(circuit: &Builder) -> [BTreeMap<usize, Array>; 2] {
    let mut rom: BTreeMap<usize, Array> = BTreeMap::new();
    let mut ram: BTreeMap<usize, Array> = BTreeMap::new();

    let gates = circuit.blocks()[BlockKind::Auxiliary].gates();

    for (row, gate) in gates.iter().enumerate() {
        let kind = match AuxKind::from_selector(&gate.q_aux) {
            Some(AuxKind::NonNativeField) | None => continue,
            Some(kind) => kind,
        };

        // ids that don't fit are reported by the array of the largest id
        let id = util::to_u64(&gate.q_c)
            .map(|id| id as usize)
            .unwrap_or(usize::MAX);

        let record = match kind {
            AuxKind::RomAccess | AuxKind::RamAccess => Record {
                row,
                index: circuit[gate.a],
                value: circuit[gate.b],
                timestamp: gate.q_r,
                access: gate.q_l,
                size: BlsScalar::zero(),
            },
            _ => Record {
                row,
                index: circuit[gate.a],
                value: circuit[gate.b],
                timestamp: circuit[gate.c],
                access: circuit[gate.d],
                size: gate.q_m,
            },
        };

        let array = match kind {
            AuxKind::RomAccess | AuxKind::RomSorted => &mut rom,
            _ => &mut ram,
        }
        .entry(id)
        .or_default();

        match kind {
            AuxKind::RomAccess | AuxKind::RamAccess => {
                array.accesses.push(record)
            }
            _ => array.sorted.push(record),
        }
    }

    [rom, ram]
}

fn check_array(id: usize, array: &Array, ram: bool) -> Result<(), Failure> {
    let fail = |row: usize| {
        tracing::debug!(array = id, row, ram, "memory record inconsistent");

        Failure::Memory { array: id, row }
    };

    let is_access = |r: &Record| {
        r.access == BlsScalar::zero() || r.access == BlsScalar::one()
    };

    if let Some(r) = array
        .accesses
        .iter()
        .chain(array.sorted.iter())
        .filter(|r| !is_access(*r))
        .min_by_key(|r| r.row)
    {
        return Err(fail(r.row));
    }

    // the sorted records are a permutation of the accesses
    let mut multiset: HashMap<[[u8; 32]; 4], isize> = HashMap::new();
    array
        .accesses
        .iter()
        .for_each(|r| *multiset.entry(r.key()).or_default() += 1);
    array
        .sorted
        .iter()
        .for_each(|r| *multiset.entry(r.key()).or_default() -= 1);

    if let Some(r) = array
        .accesses
        .iter()
        .chain(array.sorted.iter())
        .filter(|r| multiset.get(&r.key()).copied().unwrap_or(0) != 0)
        .min_by_key(|r| r.row)
    {
        return Err(fail(r.row));
    }

    let size = array
        .sorted
        .first()
        .and_then(|r| util::to_u64(&r.size))
        .unwrap_or(0);

    let mut previous: Option<(u64, &Record)> = None;
    for record in array.sorted.iter() {
        let index = util::to_u64(&record.index)
            .filter(|i| *i < size && record.size == BlsScalar::from(size));

        let index = match index {
            Some(index) => index,
            None => return Err(fail(record.row)),
        };

        let write = record.access == BlsScalar::one();

        let consistent = match previous {
            // the first record of an index sets it
            None => write,
            Some((prev, _)) if prev > index => false,
            Some((prev, _)) if prev < index => write,

            Some((_, prev)) => match (ram, write) {
                // RAM accesses of an index are ordered in time
                (true, true) => {
                    util::sort_key(&prev.timestamp)
                        < util::sort_key(&record.timestamp)
                }
                (true, false) => {
                    util::sort_key(&prev.timestamp)
                        < util::sort_key(&record.timestamp)
                        && prev.value == record.value
                }

                // ROM cells are set once
                (false, true) => false,
                (false, false) => prev.value == record.value,
            },
        };

        if !consistent {
            return Err(fail(record.row));
        }

        previous = Some((index, record));
    }

    Ok(())
}
