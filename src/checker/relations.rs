// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Row relations of every block.

use dusk_bls12_381::BlsScalar;
use dusk_jubjub::EDWARDS_D;

use super::{Failure, LookupTables};
use crate::composer::{
    AuxKind, BlockKind, Builder, Gate, NON_NATIVE_LIMB_BITS, NON_NATIVE_ROWS,
};
use crate::lookup::BasicTableId;
use crate::util;

/// Wire values of a row
#[derive(Debug, Clone, Copy)]
struct Wires {
    a: BlsScalar,
    b: BlsScalar,
    c: BlsScalar,
    d: BlsScalar,
}

impl Wires {
    fn of(circuit: &Builder, gate: &Gate) -> Self {
        Self {
            a: circuit[gate.a],
            b: circuit[gate.b],
            c: circuit[gate.c],
            d: circuit[gate.d],
        }
    }

    fn zero() -> Self {
        let zero = BlsScalar::zero();

        Self {
            a: zero,
            b: zero,
            c: zero,
            d: zero,
        }
    }
}

/// Evaluate the row `row` of the block `kind`, returning the failure if its
/// relation doesn't hold
pub(crate) fn check_row(
    circuit: &Builder,
    kind: BlockKind,
    row: usize,
    tables: &LookupTables,
) -> Option<Failure> {
    let gates = circuit.blocks()[kind].gates();
    let gate = &gates[row];

    if gate.has_foreign_selector(kind) {
        return Some(Failure::MixedSelectors { block: kind, row });
    }

    let w = Wires::of(circuit, gate);
    let next = gates
        .get(row + 1)
        .map(|g| Wires::of(circuit, g))
        .unwrap_or_else(Wires::zero);

    let satisfied = match kind {
        BlockKind::Arithmetic => arithmetic(circuit, row, gate, &w, &next),
        BlockKind::DeltaRange => delta_range(gate, &w, &next),
        BlockKind::Elliptic => {
            elliptic(gate, &w, &next, gates.get(row + 1).is_some())
        }
        BlockKind::Auxiliary => auxiliary(circuit, gates, row, gate, &w),
        BlockKind::Lookup => lookup(gate, &w, &next, tables),
    };

    match satisfied {
        true => None,
        false => {
            tracing::trace!(block = %kind, row, "unsatisfied row");

            Some(Failure::Gate { block: kind, row })
        }
    }
}

fn arithmetic(
    circuit: &Builder,
    row: usize,
    gate: &Gate,
    w: &Wires,
    next: &Wires,
) -> bool {
    let one = BlsScalar::one();
    let two = BlsScalar::from(2u64);

    if gate.q_arith != one && gate.q_arith != two {
        return false;
    }

    let pi = circuit
        .public_inputs
        .get(&row)
        .copied()
        .unwrap_or(BlsScalar::zero());

    let eval = gate.q_m * w.a * w.b
        + gate.q_l * w.a
        + gate.q_r * w.b
        + gate.q_o * w.c
        + gate.q_f * w.d
        + gate.q_c
        + pi
        + (gate.q_arith - one) * next.d;

    eval == BlsScalar::zero()
}

/// `x` is one of `0, 1, 2, 3`
fn is_small_step(x: BlsScalar) -> bool {
    let one = BlsScalar::one();
    let two = BlsScalar::from(2u64);
    let three = BlsScalar::from(3u64);

    x * (x - one) * (x - two) * (x - three) == BlsScalar::zero()
}

fn delta_range(gate: &Gate, w: &Wires, next: &Wires) -> bool {
    let edges = gate.q_l * w.a + gate.q_f * w.d + gate.q_c;

    if edges != BlsScalar::zero() {
        return false;
    }

    if gate.q_range == BlsScalar::zero() {
        return true;
    }

    [w.b - w.a, w.c - w.b, w.d - w.c, next.a - w.d]
        .into_iter()
        .all(is_small_step)
}

fn elliptic(gate: &Gate, w: &Wires, next: &Wires, has_next: bool) -> bool {
    if gate.q_elliptic == BlsScalar::zero() {
        return true;
    }

    if gate.q_elliptic != BlsScalar::one() || !has_next {
        return false;
    }

    let one = BlsScalar::one();
    let (x1, y1) = (w.a, w.b);
    let (x3, y3, d) = (next.a, next.b, next.d);

    if gate.q_m == BlsScalar::zero() {
        let (x2, y2) = (w.c, w.d);
        let sign = gate.q_l;

        if sign != one && sign != -one {
            return false;
        }

        let y1_x2 = sign * y1 * x2;
        let t = EDWARDS_D * d * y1_x2;

        let xy = x1 * y2 - d;
        let x = x3 + x3 * t - (d + y1_x2);
        let y = y3 - y3 * t - (y1 * y2 + sign * x1 * x2);

        xy == BlsScalar::zero()
            && x == BlsScalar::zero()
            && y == BlsScalar::zero()
    } else {
        let two = BlsScalar::from(2u64);
        let x1_sq = x1.square();
        let y1_sq = y1.square();

        let xy = x1 * y1 - d;
        let x = x3 * (y1_sq - x1_sq) - two * d;
        let y = y3 * (two + x1_sq - y1_sq) - (y1_sq + x1_sq);

        xy == BlsScalar::zero()
            && x == BlsScalar::zero()
            && y == BlsScalar::zero()
    }
}

fn auxiliary(
    circuit: &Builder,
    gates: &[Gate],
    row: usize,
    gate: &Gate,
    w: &Wires,
) -> bool {
    if gate.q_aux == BlsScalar::zero() {
        return true;
    }

    match AuxKind::from_selector(&gate.q_aux) {
        Some(AuxKind::NonNativeField) => {
            match gates.get(row + 1..row + NON_NATIVE_ROWS) {
                Some(rows) => non_native_field(circuit, gate, w, rows),
                None => false,
            }
        }

        // memory records are replayed per array
        Some(_) => true,

        None => false,
    }
}

fn non_native_field(
    circuit: &Builder,
    gate: &Gate,
    a: &Wires,
    rows: &[Gate],
) -> bool {
    let [b, q, r, carries, prime] = match rows {
        [b, q, r, carries, prime] => [b, q, r, carries, prime]
            .map(|g| Wires::of(circuit, g)),
        _ => return false,
    };

    let n = [gate.q_l, gate.q_r, gate.q_o, gate.q_f];
    let modulus = gate.q_c;

    let shift = util::pow_of_2(NON_NATIVE_LIMB_BITS);
    let shift_2 = shift.square();
    let (lo, hi) = (carries.a, carries.b);

    let lo_eval = a.a * b.a
        + (a.b * b.a + a.a * b.b) * shift
        + q.a * n[0]
        + (q.b * n[0] + q.a * n[1]) * shift
        - r.a
        - r.b * shift
        - lo * shift_2;

    let hi_eval = a.a * b.c
        + a.b * b.b
        + a.c * b.a
        + (a.a * b.d + a.b * b.c + a.c * b.b + a.d * b.a) * shift
        + q.a * n[2]
        + q.b * n[1]
        + q.c * n[0]
        + (q.a * n[3] + q.b * n[2] + q.c * n[1] + q.d * n[0]) * shift
        - r.c
        - r.d * shift
        + lo
        - hi * shift_2;

    let prime_eval = prime.a * prime.b - prime.c * modulus - prime.d;

    lo_eval == BlsScalar::zero()
        && hi_eval == BlsScalar::zero()
        && prime_eval == BlsScalar::zero()
}

fn lookup(
    gate: &Gate,
    w: &Wires,
    next: &Wires,
    tables: &LookupTables,
) -> bool {
    if gate.q_lookup != BlsScalar::one() {
        return false;
    }

    let table = BasicTableId::from_selector(&gate.q_o)
        .and_then(|id| tables.get(&id));

    let key = [
        w.a - gate.q_r * next.a,
        w.b - gate.q_m * next.b,
        w.c - gate.q_c * next.c,
    ];

    table.map(|t| t.contains(&key)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_steps_are_the_roots_of_the_delta_polynomial() {
        for x in 0..4u64 {
            assert!(is_small_step(BlsScalar::from(x)));
        }

        assert!(!is_small_step(BlsScalar::from(4u64)));
        assert!(!is_small_step(-BlsScalar::one()));
    }
}
