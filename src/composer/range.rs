// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Delta range rows, sort constraints and range constraints.
//!
//! Small ranges are proven with range lists: every constrained class is tagged
//! with the `range` tag of the list, and at finalization a sorted copy of the
//! list values, tagged with the partner `tau` tag, is sort constrained between
//! `0` and the target. Wider ranges are decomposed into limbs of
//! [`DEFAULT_RANGE_BITNUM`] bits, each one constrained by a range list.

use alloc::vec;
use alloc::vec::Vec;

use dusk_bls12_381::BlsScalar;
use itertools::Itertools;
use num_bigint::BigUint;

use super::{BlockKind, Builder, Constraint, Witness};
use crate::error::Error;
use crate::util;

/// Bits of the limbs used to decompose wide ranges
pub const DEFAULT_RANGE_BITNUM: usize = 14;

/// Largest target handled by a single range list
pub const DEFAULT_RANGE_SIZE: u64 = (1 << DEFAULT_RANGE_BITNUM) - 1;

/// Step between the padding values of a range list
const RANGE_STEP: u64 = 3;

/// Widest decomposition that doesn't wrap the field
const MAX_NO_WRAP_BITS: usize = 252;

/// Wires per row
const WIDTH: usize = 4;

/// Classes constrained to `[0, target]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RangeList {
    target: u64,
    range_tag: u32,
    tau_tag: u32,
    variables: Vec<Witness>,
}

impl Builder {
    /// Constrain `witness` to the range `[0, bound)`.
    ///
    /// Bounds up to `2^14` are proven with a range list; powers of two are
    /// decomposed into 14-bit limbs; any other bound decomposes both `witness`
    /// and `bound - 1 - witness`.
    pub fn range_constraint(
        &mut self,
        witness: Witness,
        bound: u64,
    ) -> Result<(), Error> {
        self.ensure_open()?;

        let target = bound.checked_sub(1).ok_or(Error::EmptyRange)?;

        if target <= DEFAULT_RANGE_SIZE {
            self.range_list_constraint(witness, target);

            return Ok(());
        }

        if bound.is_power_of_two() {
            let bits = bound.trailing_zeros() as usize;

            self.decompose_into_default_range(witness, bits)?;

            return Ok(());
        }

        let bits = (u64::BITS - target.leading_zeros()) as usize;

        let diff = BlsScalar::from(target) - self[witness];
        let diff = self.append_witness(diff);

        let constraint = Constraint::new()
            .left(1)
            .right(1)
            .constant(-BlsScalar::from(target))
            .a(witness)
            .b(diff);

        self.append_gate(constraint);

        self.decompose_into_default_range(witness, bits)?;
        self.decompose_into_default_range(diff, bits)?;

        Ok(())
    }

    /// Decompose `witness` into limbs of [`DEFAULT_RANGE_BITNUM`] bits, each
    /// range constrained, and return the limbs from the least significant.
    ///
    /// The limbs are recombined by a chain of arithmetic rows, three limbs per
    /// row, accumulating the remaining value through the `d` wire of the next
    /// row. A value wider than `bits` leaves the last row unsatisfied.
    pub fn decompose_into_default_range(
        &mut self,
        witness: Witness,
        bits: usize,
    ) -> Result<Vec<Witness>, Error> {
        self.ensure_open()?;

        if bits > MAX_NO_WRAP_BITS {
            return Err(Error::RangeTooWide { bits });
        }

        if bits == 0 {
            let constraint = Constraint::new().left(1).a(witness);
            self.append_gate(constraint);

            return Ok(vec![]);
        }

        let value = util::to_biguint(&self[witness]);
        if value.bits() as usize > bits {
            tracing::debug!(bits, "decomposed value is out of range");
        }

        let limbs_count =
            (bits + DEFAULT_RANGE_BITNUM - 1) / DEFAULT_RANGE_BITNUM;
        let last_bits = bits - (limbs_count - 1) * DEFAULT_RANGE_BITNUM;

        let limb_values: Vec<BigUint> = (0..limbs_count)
            .map(|i| {
                let lo = i * DEFAULT_RANGE_BITNUM;
                util::slice(&value, lo, lo + DEFAULT_RANGE_BITNUM)
            })
            .collect();

        let mut limbs = Vec::with_capacity(limbs_count);
        for (i, limb) in limb_values.iter().enumerate() {
            let limb = self.append_witness(util::from_biguint(limb));

            let limb_bits = match i == limbs_count - 1 {
                true => last_bits,
                false => DEFAULT_RANGE_BITNUM,
            };

            self.range_list_constraint(limb, (1 << limb_bits) - 1);
            limbs.push(limb);
        }

        let triples = limbs.chunks(3).count();
        let mut accumulator = value;
        let mut accumulator_w = witness;

        for (i, (chunk, values)) in limbs
            .chunks(3)
            .zip(limb_values.chunks(3))
            .enumerate()
        {
            let mut wires = [Self::ZERO; 3];
            let mut shifts = [BlsScalar::zero(); 3];

            for (j, (limb, limb_value)) in
                chunk.iter().zip(values).enumerate()
            {
                let shift = (3 * i + j) * DEFAULT_RANGE_BITNUM;

                wires[j] = *limb;
                shifts[j] = util::pow_of_2(shift);
                accumulator -= limb_value << shift;
            }

            let chained = i + 1 < triples;
            let constraint = Constraint::new()
                .left(shifts[0])
                .right(shifts[1])
                .output(shifts[2])
                .fourth(-BlsScalar::one())
                .a(wires[0])
                .b(wires[1])
                .c(wires[2])
                .d(accumulator_w);

            self.append_big_add_gate(constraint, chained);

            if chained {
                accumulator_w =
                    self.append_witness(util::from_biguint(&accumulator));
            }
        }

        Ok(limbs)
    }

    /// Constrain `lo` to `lo_bits` bits and `hi` to `hi_bits` bits
    pub fn range_constrain_two_limbs(
        &mut self,
        lo: Witness,
        hi: Witness,
        lo_bits: usize,
        hi_bits: usize,
    ) -> Result<(), Error> {
        self.decompose_into_default_range(lo, lo_bits)?;
        self.decompose_into_default_range(hi, hi_bits)?;

        Ok(())
    }

    /// Constrain `witness` to `[0, target]` with the range list of `target`.
    ///
    /// A class already tagged by a list with a smaller target is left
    /// untouched; a class tagged by any other list is copied first.
    pub(crate) fn range_list_constraint(
        &mut self,
        witness: Witness,
        target: u64,
    ) {
        if !self.range_lists.contains_key(&target) {
            let list = self.create_range_list(target);
            self.range_lists.insert(target, list);
        }

        let existing = self.variables.tag(witness);

        let range_tag = self
            .range_lists
            .get(&target)
            .map(|l| l.range_tag)
            .unwrap_or_default();

        if existing == range_tag {
            return;
        }

        if existing == super::DUMMY_TAG {
            self.variables.set_tag(witness, range_tag);

            if let Some(list) = self.range_lists.get_mut(&target) {
                list.variables.push(witness);
            }

            return;
        }

        let tighter = self
            .range_lists
            .values()
            .any(|l| l.range_tag == existing && l.target < target);

        if tighter {
            return;
        }

        let copy = self.append_witness(self[witness]);
        let constraint = Constraint::new()
            .left(1)
            .right(-BlsScalar::one())
            .a(witness)
            .b(copy);

        self.append_gate(constraint);

        self.range_list_constraint(copy, target)
    }

    fn create_range_list(&mut self, target: u64) -> RangeList {
        let (range_tag, tau_tag) = self.variables.new_range_tags();

        let padding = (0..=target / RANGE_STEP)
            .map(|i| i * RANGE_STEP)
            .chain([target]);

        let mut variables = Vec::new();
        for value in padding {
            let w = self.append_witness(value);

            self.variables.set_tag(w, range_tag);
            variables.push(w);
        }

        tracing::trace!(target, range_tag, tau_tag, "range list created");

        RangeList {
            target,
            range_tag,
            tau_tag,
            variables,
        }
    }

    /// Constrain again the members of every list whose class was retagged
    /// after joining it, by a merge or by the caller.
    ///
    /// A class carrying the tag of a tighter list is dropped from the list;
    /// any other class is copied into it.
    fn reattach_range_lists(&mut self) {
        let targets: Vec<u64> =
            self.range_lists.keys().copied().sorted_unstable().collect();

        for target in targets {
            let detached = match self.range_lists.get_mut(&target) {
                Some(list) => {
                    let tag = list.range_tag;
                    let variables = &self.variables;

                    let (kept, detached): (Vec<_>, Vec<_>) = list
                        .variables
                        .iter()
                        .copied()
                        .partition(|w| variables.tag(*w) == tag);

                    list.variables = kept;
                    detached
                }
                None => continue,
            };

            for w in detached {
                self.range_list_constraint(w, target);
            }
        }
    }

    /// Append the sorted copies of every range list
    pub(crate) fn process_range_lists(&mut self) {
        self.reattach_range_lists();

        let lists: Vec<RangeList> =
            self.range_lists.values().cloned().collect();

        for list in lists {
            let reals: Vec<Witness> = list
                .variables
                .iter()
                .map(|w| self.variables.real(*w))
                .sorted_unstable()
                .dedup()
                .collect();

            let values: Vec<BlsScalar> = reals
                .iter()
                .map(|w| self[*w])
                .sorted_unstable_by_key(util::sort_key)
                .collect();

            let padding = match values.len() {
                n if n <= WIDTH => 2 * WIDTH - n,
                n => (WIDTH - n % WIDTH) % WIDTH,
            };

            let mut sorted = vec![Self::ZERO; padding];
            for value in values {
                let w = self.append_witness(value);

                self.variables.set_tag(w, list.tau_tag);
                sorted.push(w);
            }

            self.sort_rows_with_edges(
                &sorted,
                BlsScalar::zero(),
                BlsScalar::from(list.target),
            );
        }
    }

    /// Constrain `witnesses` to a non-decreasing sequence whose steps are in
    /// `{0, 1, 2, 3}`.
    ///
    /// The length must be a positive multiple of four.
    pub fn create_sort_constraint(
        &mut self,
        witnesses: &[Witness],
    ) -> Result<(), Error> {
        let len = witnesses.len();
        if len == 0 || len % WIDTH != 0 {
            return Err(Error::SortLengthMismatch { len });
        }

        for row in witnesses.chunks(WIDTH) {
            self.append_range_row(Constraint::new(), row);
        }

        self.append_closing_row(witnesses);

        Ok(())
    }

    /// Constrain `witnesses` to a sorted sequence as
    /// [`Self::create_sort_constraint`] does, starting at `start` and ending
    /// at `end`.
    ///
    /// The length must be a multiple of four, greater than four.
    pub fn create_sort_constraint_with_edges<S, E>(
        &mut self,
        witnesses: &[Witness],
        start: S,
        end: E,
    ) -> Result<(), Error>
    where
        S: Into<BlsScalar>,
        E: Into<BlsScalar>,
    {
        let len = witnesses.len();
        if len <= WIDTH || len % WIDTH != 0 {
            return Err(Error::SortLengthMismatch { len });
        }

        self.sort_rows_with_edges(witnesses, start.into(), end.into());

        Ok(())
    }

    fn sort_rows_with_edges(
        &mut self,
        witnesses: &[Witness],
        start: BlsScalar,
        end: BlsScalar,
    ) {
        let rows = witnesses.len() / WIDTH;

        for (i, row) in witnesses.chunks(WIDTH).enumerate() {
            let constraint = if i == 0 {
                Constraint::new().left(1).constant(-start)
            } else if i == rows - 1 {
                Constraint::new().fourth(1).constant(-end)
            } else {
                Constraint::new()
            };

            self.append_range_row(constraint, row);
        }

        self.append_closing_row(witnesses);
    }

    fn append_range_row(&mut self, constraint: Constraint, row: &[Witness]) {
        let constraint = constraint.a(row[0]).b(row[1]).c(row[2]).d(row[3]);

        self.append_row(BlockKind::DeltaRange, Constraint::range(&constraint));
    }

    /// Inert row holding the last element, read as `a_next` by the last
    /// sorted row
    fn append_closing_row(&mut self, witnesses: &[Witness]) {
        let last = witnesses.last().copied().unwrap_or(Self::ZERO);

        self.append_row(BlockKind::DeltaRange, Constraint::new().a(last));
    }

    /// Place `witnesses` into inert delta range rows, padded with zeros
    pub fn append_dummy_constraints(&mut self, witnesses: &[Witness]) {
        for row in witnesses.chunks(WIDTH) {
            let mut wires = [Self::ZERO; WIDTH];
            wires[..row.len()].copy_from_slice(row);

            let constraint = Constraint::new()
                .a(wires[0])
                .b(wires[1])
                .c(wires[2])
                .d(wires[3]);

            self.append_row(BlockKind::DeltaRange, constraint);
        }
    }
}
