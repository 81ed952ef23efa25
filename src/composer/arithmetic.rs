// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Width-4 arithmetic gates

use dusk_bls12_381::BlsScalar;

use super::{BlockKind, Builder, Constraint, Selector, WiredWitness, Witness};

impl Builder {
    /// Append a new width-4 gate/constraint.
    ///
    /// The constraint added will enforce the following:
    /// `q_M · a · b  + q_L · a + q_R · b + q_O · o + q_F · d + q_C + PI = 0`.
    pub fn append_gate(&mut self, constraint: Constraint) {
        let constraint = Constraint::arithmetic(&constraint);

        self.append_row(BlockKind::Arithmetic, constraint);
    }

    /// Append a linear width-4 gate.
    ///
    /// If `include_next_d` is set, the `d` wire of the next arithmetic row is
    /// added to the evaluation, allowing additions wider than four terms:
    /// `q_L · a + q_R · b + q_O · o + q_F · d + q_C + d_next = 0`.
    pub fn append_big_add_gate(
        &mut self,
        constraint: Constraint,
        include_next_d: bool,
    ) {
        self.append_big_mul_gate(constraint.mult(0), include_next_d)
    }

    /// Append a width-4 gate with a multiplication term.
    ///
    /// If `include_next_d` is set, the `d` wire of the next arithmetic row is
    /// added to the evaluation:
    /// `q_M · a · b + q_L · a + q_R · b + q_O · o + q_F · d + q_C + d_next = 0`.
    pub fn append_big_mul_gate(
        &mut self,
        constraint: Constraint,
        include_next_d: bool,
    ) {
        let constraint = match include_next_d {
            true => Constraint::big_arithmetic(&constraint),
            false => Constraint::arithmetic(&constraint),
        };

        self.append_row(BlockKind::Arithmetic, constraint);
    }

    /// Evaluate the polynomial and append an output that satisfies the equation
    ///
    /// Return `None` if the output selector is zero
    pub fn append_evaluated_output(
        &mut self,
        s: Constraint,
    ) -> Option<Witness> {
        let a = self[s.witness(WiredWitness::A)];
        let b = self[s.witness(WiredWitness::B)];
        let d = self[s.witness(WiredWitness::D)];

        let qm = s.coeff(Selector::Multiplication);
        let ql = s.coeff(Selector::Left);
        let qr = s.coeff(Selector::Right);
        let qf = s.coeff(Selector::Fourth);
        let qc = s.coeff(Selector::Constant);
        let pi = s.coeff(Selector::PublicInput);

        let x = qm * a * b + ql * a + qr * b + qf * d + qc + pi;

        let y = s.coeff(Selector::Output);

        // `q_O` is -1 for the arithmetic components; skip the inversion
        let c = if y == &-BlsScalar::one() {
            Some(x)
        } else {
            y.invert().map(|y| x * (-y))
        };

        c.map(|c| self.append_witness(c))
    }

    /// Evaluate and return `o` by appending a new constraint into the circuit.
    ///
    /// Set `q_O = (-1)` and override the output of the constraint with:
    /// `c := q_L · a + q_R · b + q_F · d + q_C + PI`
    pub fn gate_add(&mut self, s: Constraint) -> Witness {
        self.gate_evaluated(s.mult(0))
    }

    /// Evaluate and return `c` by appending a new constraint into the circuit.
    ///
    /// Set `q_O = (-1)` and override the output of the constraint with:
    /// `c := q_M · a · b + q_F · d + q_C + PI`
    pub fn gate_mul(&mut self, s: Constraint) -> Witness {
        self.gate_evaluated(s.left(0).right(0))
    }

    fn gate_evaluated(&mut self, s: Constraint) -> Witness {
        let s = s.output(-BlsScalar::one());

        let a = self[s.witness(WiredWitness::A)];
        let b = self[s.witness(WiredWitness::B)];
        let d = self[s.witness(WiredWitness::D)];

        let c = s.coeff(Selector::Multiplication) * a * b
            + s.coeff(Selector::Left) * a
            + s.coeff(Selector::Right) * b
            + s.coeff(Selector::Fourth) * d
            + s.coeff(Selector::Constant)
            + s.coeff(Selector::PublicInput);

        let c = self.append_witness(c);

        self.append_gate(s.c(c));

        c
    }

    /// Constrain a scalar into the circuit description and return an allocated
    /// [`Witness`] with its value
    pub fn append_constant<C: Into<BlsScalar>>(
        &mut self,
        constant: C,
    ) -> Witness {
        let constant = constant.into();
        let witness = self.append_witness(constant);

        self.assert_equal_constant(witness, constant, None);

        witness
    }

    /// Allocate a witness value into the builder and return its index.
    ///
    /// Create a public input with the scalar
    pub fn append_public<P: Into<BlsScalar>>(&mut self, public: P) -> Witness {
        let public = public.into();
        let witness = self.append_witness(public);

        self.assert_equal_constant(witness, 0, Some(public));

        witness
    }

    /// Constrain `a` to be equal to `constant + pi`.
    ///
    /// `constant` will be defined as part of the public circuit description.
    pub fn assert_equal_constant<C: Into<BlsScalar>>(
        &mut self,
        a: Witness,
        constant: C,
        public: Option<BlsScalar>,
    ) {
        let constant = constant.into();
        let constraint = Constraint::new()
            .left(-BlsScalar::one())
            .a(a)
            .constant(constant);
        let constraint =
            public.map(|p| constraint.public(p)).unwrap_or(constraint);

        self.append_gate(constraint);
    }
}
