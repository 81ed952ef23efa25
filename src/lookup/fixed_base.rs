// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Fixed base scalar multiplication tables.
//!
//! The scalar is split into a low half of 128 bits and a high half of 124
//! bits, each cut into 9-bit windows. The table of window `i` maps a slice `s`
//! to `s · 2^(9i) · B + O_i`, where the offset generator `O_i` keeps every
//! entry away from the identity.

use alloc::vec::Vec;

use dusk_bls12_381::BlsScalar;
use dusk_bytes::Serializable;
use dusk_jubjub::{
    JubJubAffine, JubJubExtended, JubJubScalar, GENERATOR_EXTENDED,
};
use sha2::{Digest, Sha512};

use super::FixedBaseTable;

/// Bits of the scalar window consumed by every table
pub const FIXED_BASE_BITS_PER_TABLE: usize = 9;

/// Bits of the low half of a scalar
pub const FIXED_BASE_LO_BITS: usize = 128;

/// Bits of the high half of a scalar
pub const FIXED_BASE_HI_BITS: usize = 124;

const OFFSET_SEED: &[u8] = b"ultraplonk-fixed-base-offset";
const RIGHT_BASE_SEED: &[u8] = b"ultraplonk-fixed-base-right";

fn hash_to_scalar(parts: &[&[u8]]) -> JubJubScalar {
    let mut hasher = Sha512::new();
    parts.iter().for_each(|p| hasher.update(p));

    let mut wide = [0u8; 64];
    wide.copy_from_slice(&hasher.finalize());

    JubJubScalar::from_bytes_wide(&wide)
}

/// Base of the left tables
pub fn fixed_base_left() -> JubJubExtended {
    GENERATOR_EXTENDED
}

/// Base of the right tables
pub fn fixed_base_right() -> JubJubExtended {
    GENERATOR_EXTENDED * hash_to_scalar(&[RIGHT_BASE_SEED])
}

fn half_bits(table: FixedBaseTable) -> usize {
    match table.is_hi() {
        true => FIXED_BASE_HI_BITS,
        false => FIXED_BASE_LO_BITS,
    }
}

pub(crate) fn tables_count(table: FixedBaseTable) -> usize {
    (half_bits(table) + FIXED_BASE_BITS_PER_TABLE - 1)
        / FIXED_BASE_BITS_PER_TABLE
}

pub(crate) fn slice_bits(table: FixedBaseTable, index: usize) -> usize {
    let consumed = index * FIXED_BASE_BITS_PER_TABLE;

    half_bits(table)
        .saturating_sub(consumed)
        .min(FIXED_BASE_BITS_PER_TABLE)
}

fn double_n(mut point: JubJubExtended, n: usize) -> JubJubExtended {
    (0..n).for_each(|_| point = point.double());

    point
}

/// `2^(9i)` multiple of the base of the half
fn window_base(table: FixedBaseTable, index: usize) -> JubJubExtended {
    let base = match table.is_left() {
        true => fixed_base_left(),
        false => fixed_base_right(),
    };

    let shift = match table.is_hi() {
        true => FIXED_BASE_LO_BITS,
        false => 0,
    };

    double_n(base, shift + index * FIXED_BASE_BITS_PER_TABLE)
}

/// Offset generator `O_i` added to every entry of the table of window
/// `index`
pub fn fixed_base_offset(
    table: FixedBaseTable,
    index: usize,
) -> JubJubExtended {
    let base = JubJubAffine::from(window_base(table, index)).to_bytes();
    let index = (index as u64).to_le_bytes();

    GENERATOR_EXTENDED * hash_to_scalar(&[OFFSET_SEED, &base, &index])
}

/// Coordinates of `slice · 2^(9i) · B + O_i`
pub(crate) fn point(
    table: FixedBaseTable,
    index: usize,
    slice: u64,
) -> [BlsScalar; 2] {
    let point = window_base(table, index) * JubJubScalar::from(slice)
        + fixed_base_offset(table, index);
    let point = JubJubAffine::from(point);

    [point.get_u(), point.get_v()]
}

/// Every entry `(slice, x, y)` of the table of window `index`
pub(crate) fn generate(
    table: FixedBaseTable,
    index: usize,
) -> Vec<[BlsScalar; 3]> {
    let size = 1usize << slice_bits(table, index);
    let step = window_base(table, index);

    let mut acc = fixed_base_offset(table, index);
    let mut points = Vec::with_capacity(size);

    for _ in 0..size {
        points.push(acc);
        acc = acc + step;
    }

    dusk_jubjub::batch_normalize(&mut points)
        .enumerate()
        .map(|(s, p)| [BlsScalar::from(s as u64), p.get_u(), p.get_v()])
        .collect()
}
