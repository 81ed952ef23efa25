// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use ultraplonk::prelude::*;

mod common;
use common::{
    check_satisfied_builder, check_satisfied_circuit,
    check_unsatisfied_builder, check_unsatisfied_circuit,
};

#[test]
fn range() {
    pub struct TestCircuit {
        a: BlsScalar,
        bound: u64,
    }

    impl TestCircuit {
        pub fn new(a: u64, bound: u64) -> Self {
            Self {
                a: BlsScalar::from(a),
                bound,
            }
        }
    }

    impl Circuit for TestCircuit {
        fn circuit(&self, builder: &mut Builder) -> Result<(), Error> {
            let a = builder.append_witness(self.a);

            builder.range_constraint(a, self.bound)?;

            Ok(())
        }
    }

    // Test a small bound:
    // 9 < 10
    let msg = "Value inside of a small range should be satisfied";
    check_satisfied_circuit(&TestCircuit::new(9, 10), msg);

    let msg = "Zero inside of a small range should be satisfied";
    check_satisfied_circuit(&TestCircuit::new(0, 10), msg);

    // Test:
    // 10 !< 10
    let msg = "Value outside of a small range should be unsatisfied";
    let failure = check_unsatisfied_circuit(&TestCircuit::new(10, 10), msg);
    assert!(matches!(
        failure,
        Failure::Gate {
            block: BlockKind::DeltaRange,
            ..
        }
    ));

    // Test the widest range list:
    let msg = "Value inside of the widest range list should be satisfied";
    let bound = DEFAULT_RANGE_SIZE + 1;
    check_satisfied_circuit(&TestCircuit::new(DEFAULT_RANGE_SIZE, bound), msg);

    // Test a power of two:
    // 2^20 - 1 < 2^20
    let msg = "Value inside of a power of two range should be satisfied";
    check_satisfied_circuit(&TestCircuit::new((1 << 20) - 1, 1 << 20), msg);

    // Test:
    // 2^20 !< 2^20
    let msg = "Value outside of a power of two range should be unsatisfied";
    check_unsatisfied_circuit(&TestCircuit::new(1 << 20, 1 << 20), msg);

    // Test any other bound:
    // 99_999 < 100_000
    let msg = "Value inside of a wide range should be satisfied";
    check_satisfied_circuit(&TestCircuit::new(99_999, 100_000), msg);

    // Test:
    // 100_000 !< 100_000
    let msg = "Value outside of a wide range should be unsatisfied";
    check_unsatisfied_circuit(&TestCircuit::new(100_000, 100_000), msg);

    // Test an empty range:
    let circuit = TestCircuit::new(0, 0);
    assert_eq!(Builder::build(&circuit).err(), Some(Error::EmptyRange));
}

#[test]
fn overlapping_ranges() {
    let mut builder = Builder::new();

    let a = builder.append_witness(3);
    let b = builder.append_witness(200);

    builder.range_constraint(a, 4).expect("small range");
    builder.range_constraint(a, 300).expect("looser range");
    builder.range_constraint(b, 300).expect("small range");

    check_satisfied_builder(&builder, "Overlapping ranges should be satisfied");

    // `b` is already constrained to a looser range, and gets copied
    builder.range_constraint(b, 100).expect("tighter range");

    let msg = "Value outside of the tighter range should be unsatisfied";
    check_unsatisfied_builder(&builder, msg);
}

#[test]
fn decomposition() {
    let mut builder = Builder::new();

    let value = (1u64 << 50) + (1 << 27) + 0x1234;
    let a = builder.append_witness(value);

    let limbs = builder
        .decompose_into_default_range(a, 51)
        .expect("valid width");

    assert_eq!(limbs.len(), 4);

    let recombined = limbs.iter().rev().fold(BlsScalar::zero(), |acc, limb| {
        acc * BlsScalar::from(1u64 << DEFAULT_RANGE_BITNUM) + builder[*limb]
    });
    assert_eq!(recombined, BlsScalar::from(value));

    check_satisfied_builder(&builder, "Decomposition should be satisfied");

    let b = builder.append_witness(1u64 << 51);
    builder
        .decompose_into_default_range(b, 51)
        .expect("valid width");

    let msg = "Decomposition of a wider value should be unsatisfied";
    check_unsatisfied_builder(&builder, msg);

    assert_eq!(
        builder.decompose_into_default_range(a, 253),
        Err(Error::RangeTooWide { bits: 253 })
    );
}

#[test]
fn two_limbs() {
    let mut builder = Builder::new();

    let lo = builder.append_witness((1u64 << 40) - 1);
    let hi = builder.append_witness(5);

    builder
        .range_constrain_two_limbs(lo, hi, 40, 3)
        .expect("valid widths");
    check_satisfied_builder(&builder, "Both limbs in range should satisfy");

    let mut builder = Builder::new();

    let lo = builder.append_witness(1u64 << 40);
    let hi = builder.append_witness(5);

    builder
        .range_constrain_two_limbs(lo, hi, 40, 3)
        .expect("valid widths");

    let msg = "A limb out of range should be unsatisfied";
    check_unsatisfied_builder(&builder, msg);
}

#[test]
fn sort_constraint() {
    let build = |values: &[u64]| {
        let mut builder = Builder::new();

        let witnesses: Vec<Witness> =
            values.iter().map(|v| builder.append_witness(*v)).collect();

        builder
            .create_sort_constraint(&witnesses)
            .expect("length should be a multiple of four");

        builder
    };

    let msg = "Sorted sequence with small steps should be satisfied";
    check_satisfied_builder(&build(&[1, 2, 4, 7, 7, 8, 10, 13]), msg);

    let msg = "Sorted sequence with a step of four should be unsatisfied";
    check_unsatisfied_builder(&build(&[1, 5, 6, 7]), msg);

    let msg = "Decreasing sequence should be unsatisfied";
    check_unsatisfied_builder(&build(&[3, 2, 2, 2]), msg);

    let mut builder = Builder::new();
    let w = builder.append_witness(1);

    assert_eq!(
        builder.create_sort_constraint(&[w; 6]),
        Err(Error::SortLengthMismatch { len: 6 })
    );
    assert_eq!(
        builder.create_sort_constraint(&[]),
        Err(Error::SortLengthMismatch { len: 0 })
    );
}

#[test]
fn sort_constraint_with_edges() {
    let build = |values: &[u64], start: u64, end: u64| {
        let mut builder = Builder::new();

        let witnesses: Vec<Witness> =
            values.iter().map(|v| builder.append_witness(*v)).collect();

        builder
            .create_sort_constraint_with_edges(&witnesses, start, end)
            .expect("length should be a multiple of four");

        builder
    };

    let values = [5, 6, 9, 9, 10, 12, 15, 17];

    let msg = "Sorted sequence between its edges should be satisfied";
    check_satisfied_builder(&build(&values, 5, 17), msg);

    let msg = "Sorted sequence with a wrong start should be unsatisfied";
    check_unsatisfied_builder(&build(&values, 4, 17), msg);

    let msg = "Sorted sequence with a wrong end should be unsatisfied";
    check_unsatisfied_builder(&build(&values, 5, 18), msg);

    let mut builder = Builder::new();
    let w = builder.append_witness(1);

    assert_eq!(
        builder.create_sort_constraint_with_edges(&[w; 4], 1, 1),
        Err(Error::SortLengthMismatch { len: 4 })
    );
}

#[test]
fn dummy_constraints() {
    let mut builder = Builder::new();

    let witnesses: Vec<Witness> =
        (0..6u64).map(|v| builder.append_witness(v * 10)).collect();

    builder.append_dummy_constraints(&witnesses);

    // six witnesses padded into two rows
    assert_eq!(builder.blocks()[BlockKind::DeltaRange].len(), 2);

    check_satisfied_builder(&builder, "Dummy rows should be satisfied");
}

#[test]
fn merged_ranges() {
    let build = |value: u64, swap: bool| {
        let mut builder = Builder::new();

        let a = builder.append_witness(value);
        let b = builder.append_witness(value);

        builder.range_constraint(a, 1000).expect("small range");
        builder.range_constraint(b, 2000).expect("small range");

        match swap {
            true => builder.assert_equal(b, a),
            false => builder.assert_equal(a, b),
        }

        assert!(builder.failure().is_none());

        builder
    };

    for swap in [false, true] {
        let msg = "Merged classes inside of both ranges should be satisfied";
        check_satisfied_builder(&build(100, swap), msg);

        let msg = "Merged classes inside of the looser range only should be \
                   unsatisfied";
        check_unsatisfied_builder(&build(1500, swap), msg);
    }
}

#[test]
fn retagged_ranges() {
    let build = |value: u64| {
        let mut builder = Builder::new();

        let a = builder.append_witness(value);
        let b = builder.append_witness(value);

        builder.range_constraint(a, 10).expect("small range");

        let tag = builder.get_new_tag();
        let partner = builder.get_new_tag();
        builder
            .create_tag(tag, partner)
            .expect("tags should be fresh");

        builder.assign_tag(a, tag).expect("tag should be declared");
        builder.assign_tag(b, partner).expect("tag should be declared");

        builder
    };

    let msg = "Retagged class inside of its range should be satisfied";
    check_satisfied_builder(&build(9), msg);

    let msg = "Retagged class outside of its range should be unsatisfied";
    check_unsatisfied_builder(&build(10), msg);
}
