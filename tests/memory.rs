// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use ff::Field;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ultraplonk::prelude::*;

mod common;
use common::{
    check_satisfied_builder, check_satisfied_circuit,
    check_unsatisfied_builder,
};

#[test]
fn rom() {
    pub struct TestCircuit {
        values: Vec<BlsScalar>,
        reads: Vec<u64>,
    }

    impl Circuit for TestCircuit {
        fn circuit(&self, builder: &mut Builder) -> Result<(), Error> {
            let rom = builder.create_rom_array(self.values.len())?;

            for (i, v) in self.values.iter().enumerate() {
                let v = builder.append_witness(*v);
                builder.set_rom_element(rom, i, v)?;
            }

            for index in self.reads.iter() {
                let expected = self.values[*index as usize];

                let index = builder.append_witness(*index);
                let value = builder.read_rom_array(rom, index)?;

                builder.assert_equal_constant(value, expected, None);
            }

            Ok(())
        }
    }

    let rng = &mut StdRng::seed_from_u64(0xb1eeb);
    let values: Vec<BlsScalar> =
        (0..8).map(|_| BlsScalar::random(&mut *rng)).collect();

    let msg = "ROM reads should be satisfied";
    let circuit = TestCircuit {
        values,
        reads: vec![3, 0, 7, 3, 3, 5],
    };
    check_satisfied_circuit(&circuit, msg);

    let msg = "ROM without reads should be satisfied";
    let circuit = TestCircuit {
        values: circuit.values,
        reads: vec![],
    };
    check_satisfied_circuit(&circuit, msg);
}

#[test]
fn rom_unset_cells() {
    let build = |config: Config| {
        let mut builder = Builder::with_config(config);

        let rom = builder.create_rom_array(4).expect("non empty array");
        let v = builder.append_witness(42);
        builder.set_rom_element(rom, 2, v).expect("unset cell");

        let index = builder.append_witness(1);
        let value = builder.read_rom_array(rom, index).expect("in range");

        assert_eq!(builder[value], BlsScalar::zero());

        (builder, rom)
    };

    let msg = "Unset ROM cells read as zero by default";
    let (builder, _) = build(Config::default());
    check_satisfied_builder(&builder, msg);

    let msg = "Unset ROM cells are rejected when configured so";
    let config = Config::new().with_uninitialized_rom(UninitializedRom::Reject);
    let (builder, rom) = build(config);
    let failure = check_unsatisfied_builder(&builder, msg);

    assert!(matches!(failure, Failure::Memory { array, .. } if array == rom));
}

#[test]
fn rom_misuse() {
    let mut builder = Builder::new();

    assert_eq!(builder.create_rom_array(0), Err(Error::EmptyMemoryArray));

    let rom = builder.create_rom_array(2).expect("non empty array");
    let v = builder.append_witness(1);

    assert_eq!(
        builder.set_rom_element(rom, 2, v),
        Err(Error::MemoryIndexOutOfRange { id: rom, index: 2 })
    );
    assert_eq!(
        builder.set_rom_element(rom + 1, 0, v),
        Err(Error::UnknownMemoryArray { id: rom + 1 })
    );

    builder.set_rom_element(rom, 0, v).expect("unset cell");
    assert_eq!(
        builder.set_rom_element(rom, 0, v),
        Err(Error::RomElementAlreadySet { id: rom, index: 0 })
    );

    let index = builder.append_witness(9);
    assert_eq!(
        builder.read_rom_array(rom, index),
        Err(Error::MemoryIndexOutOfRange { id: rom, index: 9 })
    );
}

#[test]
fn rom_forged_read() {
    let mut builder = Builder::new();

    let rom = builder.create_rom_array(2).expect("non empty array");
    let a = builder.append_witness(10);
    let b = builder.append_witness(20);

    builder.set_rom_element(rom, 0, a).expect("unset cell");
    builder.set_rom_element(rom, 1, b).expect("unset cell");

    let value = builder.read_rom_array(rom, Builder::ONE).expect("in range");
    check_satisfied_builder(&builder, "Honest ROM read should be satisfied");

    // the read value now resolves to 10
    builder.assert_equal(a, value);
    assert!(builder.failure().is_some());

    let msg = "Forged ROM read should be unsatisfied";
    let failure = check_unsatisfied_builder(&builder, msg);

    assert!(matches!(failure, Failure::Memory { array, .. } if array == rom));
}

#[test]
fn ram() {
    let mut builder = Builder::new();

    let ram = builder.create_ram_array(3).expect("non empty array");

    let ten = builder.append_witness(10);
    let twenty = builder.append_witness(20);
    let thirty = builder.append_witness(30);

    builder.init_ram_element(ram, 0, ten).expect("first init");
    builder.init_ram_element(ram, 1, twenty).expect("first init");

    let one = builder.append_witness(1);
    builder.write_ram_array(ram, one, thirty).expect("in range");

    let read = builder.read_ram_array(ram, one).expect("in range");
    assert_eq!(builder[read], BlsScalar::from(30u64));
    builder.assert_equal_constant(read, 30, None);

    let read = builder.read_ram_array(ram, Builder::ZERO).expect("in range");
    assert_eq!(builder[read], BlsScalar::from(10u64));

    // writes after reads of the same cell
    builder.write_ram_array(ram, Builder::ZERO, twenty).expect("in range");
    let read = builder.read_ram_array(ram, Builder::ZERO).expect("in range");
    assert_eq!(builder[read], BlsScalar::from(20u64));

    check_satisfied_builder(&builder, "RAM accesses should be satisfied");
}

#[test]
fn ram_uninitialized_read() {
    let mut builder = Builder::new();

    let ram = builder.create_ram_array(2).expect("non empty array");
    let v = builder.append_witness(5);
    builder.init_ram_element(ram, 0, v).expect("first init");

    let read = builder.read_ram_array(ram, Builder::ONE).expect("in range");
    assert_eq!(builder[read], BlsScalar::zero());

    let msg = "Read of an uninitialized RAM cell should be unsatisfied";
    let failure = check_unsatisfied_builder(&builder, msg);

    assert!(matches!(failure, Failure::Memory { array, .. } if array == ram));
}

#[test]
fn ram_forged_read() {
    let mut builder = Builder::new();

    let ram = builder.create_ram_array(1).expect("non empty array");
    let a = builder.append_witness(1);
    let b = builder.append_witness(2);

    builder.init_ram_element(ram, 0, a).expect("first init");
    builder.write_ram_array(ram, Builder::ZERO, b).expect("in range");

    let read = builder.read_ram_array(ram, Builder::ZERO).expect("in range");
    check_satisfied_builder(&builder, "Honest RAM read should be satisfied");

    // the read value now resolves to the overwritten one
    builder.assert_equal(a, read);

    let msg = "Read of a stale RAM value should be unsatisfied";
    let failure = check_unsatisfied_builder(&builder, msg);

    assert!(matches!(failure, Failure::Memory { array, .. } if array == ram));
}

#[test]
fn ram_misuse() {
    let mut builder = Builder::new();

    assert_eq!(builder.create_ram_array(0), Err(Error::EmptyMemoryArray));

    let ram = builder.create_ram_array(1).expect("non empty array");
    let v = builder.append_witness(3);

    builder.init_ram_element(ram, 0, v).expect("first init");
    assert_eq!(
        builder.init_ram_element(ram, 0, v),
        Err(Error::RamElementAlreadyInitialized { id: ram, index: 0 })
    );
    assert_eq!(
        builder.write_ram_array(ram, Builder::ONE, v),
        Err(Error::MemoryIndexOutOfRange { id: ram, index: 1 })
    );
    assert_eq!(
        builder.read_ram_array(ram + 1, Builder::ZERO),
        Err(Error::UnknownMemoryArray { id: ram + 1 })
    );

    builder.finalize();
    assert_eq!(
        builder.write_ram_array(ram, Builder::ZERO, v),
        Err(Error::CircuitFinalized)
    );
}

#[test]
fn independent_arrays() {
    let mut builder = Builder::new();

    let rom = builder.create_rom_array(1).expect("non empty array");
    let ram = builder.create_ram_array(1).expect("non empty array");

    // both arrays have id zero, and live in different namespaces
    assert_eq!(rom, ram);

    let a = builder.append_witness(7);
    let b = builder.append_witness(8);

    builder.set_rom_element(rom, 0, a).expect("unset cell");
    builder.init_ram_element(ram, 0, b).expect("first init");

    let from_rom = builder
        .read_rom_array(rom, Builder::ZERO)
        .expect("in range");
    let from_ram = builder
        .read_ram_array(ram, Builder::ZERO)
        .expect("in range");

    assert_eq!(builder[from_rom], BlsScalar::from(7u64));
    assert_eq!(builder[from_ram], BlsScalar::from(8u64));

    check_satisfied_builder(&builder, "Independent arrays should be satisfied");
}
