// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Conversions between field elements and integers.

use dusk_bls12_381::BlsScalar;
use dusk_bytes::Serializable;
use num_bigint::BigUint;

/// Canonical integer representation of `scalar`
pub(crate) fn to_biguint(scalar: &BlsScalar) -> BigUint {
    BigUint::from_bytes_le(&scalar.to_bytes())
}

/// Reduce `n < 2^512` into the field
pub(crate) fn from_biguint(n: &BigUint) -> BlsScalar {
    let mut bytes = [0u8; 64];
    let le = n.to_bytes_le();

    debug_assert!(le.len() <= 64, "integer wider than 512 bits");
    bytes[..le.len().min(64)].copy_from_slice(&le[..le.len().min(64)]);

    BlsScalar::from_bytes_wide(&bytes)
}

/// Return the canonical value of `scalar` if it fits a `u64`
pub(crate) fn to_u64(scalar: &BlsScalar) -> Option<u64> {
    let bytes = scalar.to_bytes();

    if bytes[8..].iter().any(|b| *b != 0) {
        return None;
    }

    let mut limb = [0u8; 8];
    limb.copy_from_slice(&bytes[..8]);

    Some(u64::from_le_bytes(limb))
}

/// Key ordering field elements by their canonical integer value
pub(crate) fn sort_key(scalar: &BlsScalar) -> [u8; 32] {
    let mut bytes = scalar.to_bytes();
    bytes.reverse();

    bytes
}

/// Bits `[lo, hi)` of `n`
pub(crate) fn slice(n: &BigUint, lo: usize, hi: usize) -> BigUint {
    let mask = (BigUint::from(1u8) << (hi - lo)) - 1u8;

    (n >> lo) & mask
}

/// `2^bits` as a field element
pub(crate) fn pow_of_2(bits: usize) -> BlsScalar {
    BlsScalar::pow_of_2(bits as u64)
}
