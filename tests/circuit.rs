// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use ultraplonk::prelude::*;

mod common;
use common::{check_satisfied_circuit, check_unsatisfied_circuit};

// A 16-bit counter stored in RAM, incremented `steps` times, whose output is
// bound by a XOR lookup against a public mask
pub struct TestCircuit {
    start: u64,
    steps: usize,
    mask: u64,
    expected: u64,
}

impl TestCircuit {
    pub fn new(start: u64, steps: usize, mask: u64) -> Self {
        let expected = (start + steps as u64) ^ mask;

        Self {
            start,
            steps,
            mask,
            expected,
        }
    }
}

impl Circuit for TestCircuit {
    fn circuit(&self, builder: &mut Builder) -> Result<(), Error> {
        let ram = builder.create_ram_array(1)?;

        let start = builder.append_witness(self.start);
        builder.range_constraint(start, 1 << 16)?;
        builder.init_ram_element(ram, 0, start)?;

        for _ in 0..self.steps {
            let current = builder.read_ram_array(ram, Builder::ZERO)?;

            let constraint = Constraint::new().left(1).constant(1).a(current);
            let next = builder.gate_add(constraint);

            builder.write_ram_array(ram, Builder::ZERO, next)?;
        }

        let counter = builder.read_ram_array(ram, Builder::ZERO)?;
        let mask = builder.append_public(self.mask);

        let out = builder.append_lookup(
            MultiTableId::Uint32Xor,
            counter,
            Some(mask),
        )?;

        builder.assert_equal_constant(
            out[ColumnIdx::C3][0],
            self.expected,
            None,
        );

        Ok(())
    }
}

#[test]
fn composed_circuit() {
    let msg = "Composed circuit should be satisfied";
    check_satisfied_circuit(&TestCircuit::new(1000, 5, 0xf0f0), msg);

    let msg = "Composed circuit with a wrong output should be unsatisfied";
    let mut circuit = TestCircuit::new(1000, 5, 0xf0f0);
    circuit.expected ^= 0x10;
    check_unsatisfied_circuit(&circuit, msg);

    let msg = "Composed circuit out of range should be unsatisfied";
    check_unsatisfied_circuit(&TestCircuit::new(1 << 16, 1, 0), msg);
}

#[test]
fn checker_leaves_the_builder_open() {
    let mut builder =
        Builder::build(&TestCircuit::new(7, 2, 1)).expect("circuit builds");

    let rows = builder.constraints();
    let auxiliary = builder.blocks()[BlockKind::Auxiliary].len();

    assert!(Checker::check(&builder));
    assert!(Checker::check(&builder));

    // the sorted records are appended to a copy only
    assert_eq!(builder.constraints(), rows);
    assert_eq!(builder.blocks()[BlockKind::Auxiliary].len(), auxiliary);
    assert!(!builder.is_finalized());

    // the builder can still be extended
    let w = builder.append_witness(3);
    builder.range_constraint(w, 4).expect("circuit is open");
    assert!(Checker::check(&builder));

    builder.finalize();
    let finalized = builder.constraints();
    assert!(finalized > rows);

    builder.finalize();
    assert_eq!(builder.constraints(), finalized);
    assert!(Checker::check(&builder));

    assert_eq!(
        builder.range_constraint(w, 4),
        Err(Error::CircuitFinalized)
    );
}

#[test]
fn build_with_config() {
    pub struct UnsetRead;

    impl Circuit for UnsetRead {
        fn circuit(&self, builder: &mut Builder) -> Result<(), Error> {
            let rom = builder.create_rom_array(2)?;
            builder.read_rom_array(rom, Builder::ONE)?;

            Ok(())
        }
    }

    check_satisfied_circuit(&UnsetRead, "Unset cells should read as zero");

    let config =
        Config::new().with_uninitialized_rom(UninitializedRom::Reject);
    let builder = Builder::build_with_config(&UnsetRead, config)
        .expect("circuit builds");

    assert_eq!(builder.config(), &config);
    assert!(matches!(
        Checker::verify(&builder),
        Err(Failure::Memory { array: 0, .. })
    ));
}

#[test]
fn failures_are_displayed() {
    let failure = Failure::Gate {
        block: BlockKind::DeltaRange,
        row: 3,
    };
    assert_eq!(
        failure.to_string(),
        "row 3 of the delta range block is unsatisfied"
    );

    let failure = Failure::TagPermutation { tag: 1, partner: 2 };
    assert_eq!(
        failure.to_string(),
        "tags 1 and 2 hold different multisets"
    );

    let error = Error::MemoryIndexOutOfRange { id: 0, index: 4 };
    assert_eq!(
        error.to_string(),
        "index 4 is out of range for memory array 0"
    );
}

#[test]
fn duplicated_circuits() {
    let circuit = TestCircuit::new(40, 3, 0x0ff0);
    let mut builder = Builder::build(&circuit).expect("circuit builds");

    let rom = builder.create_rom_array(2).expect("circuit is open");
    let value = builder.append_witness(9);
    builder.set_rom_element(rom, 1, value).expect("unset cell");
    let read = builder.read_rom_array(rom, Builder::ONE).expect("in range");

    let copy = builder.clone();

    for kind in BlockKind::ALL {
        assert_eq!(builder.blocks()[kind].len(), copy.blocks()[kind].len());
    }
    assert_eq!(copy.constraints(), builder.constraints());
    assert_eq!(copy.witnesses(), builder.witnesses());

    assert!(Checker::check(&builder));
    assert_eq!(Checker::check(&copy), Checker::check(&builder));

    // the same unsatisfied row appended to both
    let mut unsatisfied = builder.clone();
    let mut unsatisfied_copy = copy.clone();

    unsatisfied.assert_equal_constant(read, 8, None);
    unsatisfied_copy.assert_equal_constant(read, 8, None);

    assert!(!Checker::check(&unsatisfied));
    assert_eq!(
        Checker::verify(&unsatisfied_copy),
        Checker::verify(&unsatisfied)
    );

    // the originals are unaffected
    assert!(Checker::check(&builder));
    assert!(Checker::check(&copy));
}
