// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! ROM and RAM arrays.
//!
//! Every access appends a record row `(index, value, 0, 0)` to the auxiliary
//! block, with the array id in `q_c`, the access kind in `q_l` and the access
//! timestamp in `q_r`. Finalizing the circuit appends the same records sorted
//! by index as rows `(index, value, timestamp, kind)`, with the array size in
//! `q_m`, so the consistency of the memory can be replayed on adjacent rows.

use alloc::vec;
use alloc::vec::Vec;

use dusk_bls12_381::BlsScalar;
use itertools::Itertools;

use super::{AuxKind, BlockKind, Builder, Constraint, Witness};
use crate::config::UninitializedRom;
use crate::error::Error;
use crate::util;

/// Kind of a memory access, stored in `q_l` of the access rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Access {
    Read = 0x00,
    Write = 0x01,
}

impl Access {
    pub(crate) fn selector(self) -> BlsScalar {
        BlsScalar::from(self as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MemoryRecord {
    index: usize,
    index_witness: Witness,
    value: Witness,
    timestamp: u64,
    access: Access,
}

/// Memory array whose elements are set once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RomArray {
    state: Vec<Option<Witness>>,
    records: Vec<MemoryRecord>,
}

/// Memory array whose elements are initialized once and written many times
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RamArray {
    state: Vec<Option<Witness>>,
    records: Vec<MemoryRecord>,
}

impl Builder {
    /// Create a ROM array of `size` unset elements and return its id
    pub fn create_rom_array(&mut self, size: usize) -> Result<usize, Error> {
        self.ensure_open()?;

        if size == 0 {
            return Err(Error::EmptyMemoryArray);
        }

        self.rom_arrays.push(RomArray {
            state: vec![None; size],
            records: Vec::new(),
        });

        Ok(self.rom_arrays.len() - 1)
    }

    /// Set the element `index` of the ROM array `id` to the value of `value`
    pub fn set_rom_element(
        &mut self,
        id: usize,
        index: usize,
        value: Witness,
    ) -> Result<(), Error> {
        self.ensure_open()?;

        let rom = self
            .rom_arrays
            .get(id)
            .ok_or(Error::UnknownMemoryArray { id })?;

        match rom.state.get(index) {
            None => return Err(Error::MemoryIndexOutOfRange { id, index }),
            Some(Some(_)) => {
                return Err(Error::RomElementAlreadySet { id, index })
            }
            Some(None) => (),
        }

        self.push_rom_set(id, index, value);

        Ok(())
    }

    /// Set the cell `index` of the existing ROM array `id`
    fn push_rom_set(&mut self, id: usize, index: usize, value: Witness) {
        let index_witness = self.append_constant(index as u64);
        let timestamp =
            self.append_rom_access(id, index_witness, value, Access::Write);

        let rom = &mut self.rom_arrays[id];
        rom.state[index] = Some(value);
        rom.records.push(MemoryRecord {
            index,
            index_witness,
            value,
            timestamp,
            access: Access::Write,
        });
    }

    /// Read the element of the ROM array `id` at the index held by `index`
    /// into a new witness
    pub fn read_rom_array(
        &mut self,
        id: usize,
        index: Witness,
    ) -> Result<Witness, Error> {
        self.ensure_open()?;

        let rom = self
            .rom_arrays
            .get(id)
            .ok_or(Error::UnknownMemoryArray { id })?;
        let position = self.memory_index(id, index, rom.state.len())?;

        let current = rom.state[position]
            .map(|w| self[w])
            .unwrap_or(BlsScalar::zero());
        let value = self.append_witness(current);

        let timestamp = self.append_rom_access(id, index, value, Access::Read);

        self.rom_arrays[id].records.push(MemoryRecord {
            index: position,
            index_witness: index,
            value,
            timestamp,
            access: Access::Read,
        });

        Ok(value)
    }

    /// Create a RAM array of `size` uninitialized elements and return its id
    pub fn create_ram_array(&mut self, size: usize) -> Result<usize, Error> {
        self.ensure_open()?;

        if size == 0 {
            return Err(Error::EmptyMemoryArray);
        }

        self.ram_arrays.push(RamArray {
            state: vec![None; size],
            records: Vec::new(),
        });

        Ok(self.ram_arrays.len() - 1)
    }

    /// Initialize the element `index` of the RAM array `id` with the value of
    /// `value`
    pub fn init_ram_element(
        &mut self,
        id: usize,
        index: usize,
        value: Witness,
    ) -> Result<(), Error> {
        self.ensure_open()?;

        let ram = self
            .ram_arrays
            .get(id)
            .ok_or(Error::UnknownMemoryArray { id })?;

        match ram.state.get(index) {
            None => return Err(Error::MemoryIndexOutOfRange { id, index }),
            Some(Some(_)) => {
                return Err(Error::RamElementAlreadyInitialized { id, index })
            }
            Some(None) => (),
        }

        let index_witness = self.append_constant(index as u64);
        self.push_ram_record(id, index, index_witness, value, Access::Write);

        Ok(())
    }

    /// Read the element of the RAM array `id` at the index held by `index`
    /// into a new witness
    pub fn read_ram_array(
        &mut self,
        id: usize,
        index: Witness,
    ) -> Result<Witness, Error> {
        self.ensure_open()?;

        let ram = self
            .ram_arrays
            .get(id)
            .ok_or(Error::UnknownMemoryArray { id })?;
        let position = self.memory_index(id, index, ram.state.len())?;

        let current = ram.state[position]
            .map(|w| self[w])
            .unwrap_or(BlsScalar::zero());
        let value = self.append_witness(current);

        self.push_ram_record(id, position, index, value, Access::Read);

        Ok(value)
    }

    /// Write the value of `value` into the RAM array `id` at the index held
    /// by `index`
    pub fn write_ram_array(
        &mut self,
        id: usize,
        index: Witness,
        value: Witness,
    ) -> Result<(), Error> {
        self.ensure_open()?;

        let ram = self
            .ram_arrays
            .get(id)
            .ok_or(Error::UnknownMemoryArray { id })?;
        let position = self.memory_index(id, index, ram.state.len())?;

        self.push_ram_record(id, position, index, value, Access::Write);

        Ok(())
    }

    fn memory_index(
        &self,
        id: usize,
        index: Witness,
        size: usize,
    ) -> Result<usize, Error> {
        let position = util::to_u64(&self[index])
            .map(|i| i as usize)
            .unwrap_or(usize::MAX);

        match position < size {
            true => Ok(position),
            false => Err(Error::MemoryIndexOutOfRange {
                id,
                index: position,
            }),
        }
    }

    fn push_ram_record(
        &mut self,
        id: usize,
        index: usize,
        index_witness: Witness,
        value: Witness,
        access: Access,
    ) {
        let timestamp =
            self.append_ram_access(id, index_witness, value, access);

        let ram = &mut self.ram_arrays[id];
        if access == Access::Write {
            ram.state[index] = Some(value);
        }

        ram.records.push(MemoryRecord {
            index,
            index_witness,
            value,
            timestamp,
            access,
        });
    }

    /// Append a ROM access row and return its timestamp
    fn append_rom_access(
        &mut self,
        id: usize,
        index: Witness,
        value: Witness,
        access: Access,
    ) -> u64 {
        let timestamp = self.rom_arrays[id].records.len() as u64;

        let kind = AuxKind::RomAccess;
        self.append_access_row(kind, id, timestamp, index, value, access);

        timestamp
    }

    /// Append a RAM access row and return its timestamp
    fn append_ram_access(
        &mut self,
        id: usize,
        index: Witness,
        value: Witness,
        access: Access,
    ) -> u64 {
        let timestamp = self.ram_arrays[id].records.len() as u64;

        let kind = AuxKind::RamAccess;
        self.append_access_row(kind, id, timestamp, index, value, access);

        timestamp
    }

    #[allow(clippy::too_many_arguments)]
    fn append_access_row(
        &mut self,
        kind: AuxKind,
        id: usize,
        timestamp: u64,
        index: Witness,
        value: Witness,
        access: Access,
    ) {
        let row = Constraint::new()
            .left(access.selector())
            .right(timestamp)
            .constant(id as u64)
            .a(index)
            .b(value)
            .c(Self::ZERO)
            .d(Self::ZERO);

        let row = Constraint::auxiliary(&row, kind.selector());
        self.append_row(BlockKind::Auxiliary, row);
    }

    fn append_sorted_rows(
        &mut self,
        kind: AuxKind,
        id: usize,
        size: usize,
        records: &[MemoryRecord],
    ) {
        for record in records {
            let timestamp = self.append_witness(record.timestamp);
            let access = match record.access {
                Access::Read => Self::ZERO,
                Access::Write => Self::ONE,
            };

            let row = Constraint::new()
                .mult(size as u64)
                .constant(id as u64)
                .a(record.index_witness)
                .b(record.value)
                .c(timestamp)
                .d(access);

            let row = Constraint::auxiliary(&row, kind.selector());
            self.append_row(BlockKind::Auxiliary, row);
        }
    }

    /// Fill the unset ROM cells according to the configuration and append the
    /// sorted records of every ROM array
    pub(crate) fn process_rom_arrays(&mut self) {
        for id in 0..self.rom_arrays.len() {
            if self.config.uninitialized_rom() == UninitializedRom::Zero {
                let unset: Vec<usize> = self.rom_arrays[id]
                    .state
                    .iter()
                    .positions(Option::is_none)
                    .collect();

                for index in unset {
                    self.push_rom_set(id, index, Self::ZERO);
                }
            }

            let rom = &self.rom_arrays[id];
            let size = rom.state.len();

            // sets precede the reads of the same index
            let sorted: Vec<MemoryRecord> = rom
                .records
                .iter()
                .copied()
                .sorted_by_key(|r| {
                    (r.index, core::cmp::Reverse(r.access), r.timestamp)
                })
                .collect();

            tracing::debug!(id, records = sorted.len(), "rom array sorted");

            self.append_sorted_rows(AuxKind::RomSorted, id, size, &sorted);
        }
    }

    /// Append the sorted records of every RAM array
    pub(crate) fn process_ram_arrays(&mut self) {
        for id in 0..self.ram_arrays.len() {
            let ram = &self.ram_arrays[id];
            let size = ram.state.len();

            let sorted: Vec<MemoryRecord> = ram
                .records
                .iter()
                .copied()
                .sorted_by_key(|r| (r.index, r.timestamp))
                .collect();

            tracing::debug!(id, records = sorted.len(), "ram array sorted");

            self.append_sorted_rows(AuxKind::RamSorted, id, size, &sorted);
        }
    }
}
