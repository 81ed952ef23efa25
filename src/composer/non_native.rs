// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Multiplication over a foreign modulus `p`.
//!
//! Elements are held as four binary limbs of [`NON_NATIVE_LIMB_BITS`] bits
//! plus a prime limb, the element reduced into the native field. The relation
//! `a · b = q · p + r` is proven modulo `2^272` on the binary limbs, using the
//! limbs of `2^272 - p`, and modulo the native modulus on the prime limbs.

use num_bigint::BigUint;

use dusk_bls12_381::BlsScalar;

use super::{AuxKind, BlockKind, Builder, Constraint, Witness};
use crate::util;

/// Bits of a binary limb of a non-native element
pub const NON_NATIVE_LIMB_BITS: usize = 68;

/// Binary limbs of a non-native element
const BINARY_LIMBS: usize = 4;

/// Rows appended per multiplication
pub(crate) const NON_NATIVE_ROWS: usize = 6;

/// Witnesses of a claimed `a · b = q · p + r`, as four binary limbs followed
/// by the prime limb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNativeFieldWitnesses {
    /// Left factor
    pub a: [Witness; 5],
    /// Right factor
    pub b: [Witness; 5],
    /// Quotient
    pub q: [Witness; 5],
    /// Remainder
    pub r: [Witness; 5],
    /// Binary limbs of `2^272 - p`
    pub neg_modulus: [BlsScalar; BINARY_LIMBS],
    /// `p` reduced into the native field
    pub modulus: BlsScalar,
}

impl NonNativeFieldWitnesses {
    /// Bind the limbs of the operands to the modulus `p`
    pub fn new(
        a: [Witness; 5],
        b: [Witness; 5],
        q: [Witness; 5],
        r: [Witness; 5],
        modulus: &BigUint,
    ) -> Self {
        let binary_basis = BigUint::from(1u8) << binary_basis_bits();
        let neg_modulus = binary_basis - modulus;

        Self {
            a,
            b,
            q,
            r,
            neg_modulus: binary_limbs(&neg_modulus),
            modulus: util::from_biguint(modulus),
        }
    }
}

const fn binary_basis_bits() -> usize {
    NON_NATIVE_LIMB_BITS * BINARY_LIMBS
}

fn binary_limbs(n: &BigUint) -> [BlsScalar; BINARY_LIMBS] {
    let mut limbs = [BlsScalar::zero(); BINARY_LIMBS];

    limbs.iter_mut().enumerate().for_each(|(i, l)| {
        let lo = i * NON_NATIVE_LIMB_BITS;
        let limb = util::slice(n, lo, lo + NON_NATIVE_LIMB_BITS);

        *l = util::from_biguint(&limb);
    });

    limbs
}

impl Builder {
    /// Allocate `value` as four binary limbs and its prime limb
    pub fn append_non_native_element(
        &mut self,
        value: &BigUint,
    ) -> [Witness; 5] {
        let [l0, l1, l2, l3] = binary_limbs(value);

        [
            self.append_witness(l0),
            self.append_witness(l1),
            self.append_witness(l2),
            self.append_witness(l3),
            self.append_witness(util::from_biguint(value)),
        ]
    }

    /// Constrain `a · b = q · p + r` and return the carries `(lo, hi)` of the
    /// low and high halves of the binary relation.
    ///
    /// The carries are left unconstrained; callers must range constrain them.
    pub fn evaluate_non_native_field_multiplication(
        &mut self,
        input: &NonNativeFieldWitnesses,
    ) -> (Witness, Witness) {
        let a = input.a.map(|w| self[w]);
        let b = input.b.map(|w| self[w]);
        let q = input.q.map(|w| self[w]);
        let r = input.r.map(|w| self[w]);
        let n = input.neg_modulus;

        let shift = util::pow_of_2(NON_NATIVE_LIMB_BITS);
        let rshift_2 = util::pow_of_2(2 * NON_NATIVE_LIMB_BITS)
            .invert()
            .unwrap_or(BlsScalar::zero());

        let lo = a[0] * b[0] - r[0]
            + (a[1] * b[0] + a[0] * b[1]) * shift
            + q[0] * n[0]
            + (q[1] * n[0] + q[0] * n[1] - r[1]) * shift;
        let lo = lo * rshift_2;

        let hi = a[2] * b[0] + a[0] * b[2] + a[1] * b[1] - r[2]
            + (a[0] * b[3] + a[3] * b[0] + a[1] * b[2] + a[2] * b[1] - r[3])
                * shift
            + q[0] * n[2]
            + q[1] * n[1]
            + q[2] * n[0]
            + (q[0] * n[3] + q[1] * n[2] + q[2] * n[1] + q[3] * n[0]) * shift
            + lo;
        let hi = hi * rshift_2;

        let lo = self.append_witness(lo);
        let hi = self.append_witness(hi);

        let head = Constraint::new()
            .left(n[0])
            .right(n[1])
            .output(n[2])
            .fourth(n[3])
            .constant(input.modulus)
            .a(input.a[0])
            .b(input.a[1])
            .c(input.a[2])
            .d(input.a[3]);

        let head =
            Constraint::auxiliary(&head, AuxKind::NonNativeField.selector());
        self.append_row(BlockKind::Auxiliary, head);

        let rows = [
            [input.b[0], input.b[1], input.b[2], input.b[3]],
            [input.q[0], input.q[1], input.q[2], input.q[3]],
            [input.r[0], input.r[1], input.r[2], input.r[3]],
            [lo, hi, Self::ZERO, Self::ZERO],
            [input.a[4], input.b[4], input.q[4], input.r[4]],
        ];

        for [w0, w1, w2, w3] in rows {
            let row = Constraint::new().a(w0).b(w1).c(w2).d(w3);

            self.append_row(BlockKind::Auxiliary, row);
        }

        (lo, hi)
    }
}
