// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use ultraplonk::prelude::*;

// Route the library logs to the test output, filtered by `RUST_LOG`
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Check that the builder is satisfied and that the checker left it untouched
#[allow(dead_code)]
pub(crate) fn check_satisfied_builder(builder: &Builder, msg: &str) {
    init_tracing();

    let rows = builder.constraints();
    let witnesses = builder.witnesses();

    if let Err(failure) = Checker::verify(builder) {
        panic!("{msg}: {failure}");
    }

    assert_eq!(rows, builder.constraints(), "{msg}");
    assert_eq!(witnesses, builder.witnesses(), "{msg}");
    assert!(!builder.is_finalized(), "{msg}");
}

// Check that the builder is unsatisfied and return the reported failure
#[allow(dead_code)]
pub(crate) fn check_unsatisfied_builder(
    builder: &Builder,
    msg: &str,
) -> Failure {
    init_tracing();

    assert!(!Checker::check(builder), "{msg}");

    match Checker::verify(builder) {
        Ok(()) => panic!("{msg}"),
        Err(failure) => failure,
    }
}

// Build the circuit and check that it's satisfied
#[allow(dead_code)]
pub(crate) fn check_satisfied_circuit<C>(circuit: &C, msg: &str)
where
    C: Circuit,
{
    let builder = Builder::build(circuit).expect(msg);

    check_satisfied_builder(&builder, msg);
}

// Build the circuit and check that it's unsatisfied
#[allow(dead_code)]
pub(crate) fn check_unsatisfied_circuit<C>(
    circuit: &C,
    msg: &str,
) -> Failure
where
    C: Circuit,
{
    let builder = Builder::build(circuit).expect(msg);

    check_unsatisfied_builder(&builder, msg)
}
