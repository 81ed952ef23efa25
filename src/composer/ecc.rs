// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Twisted Edwards curve addition and doubling gates

use dusk_bls12_381::BlsScalar;
use dusk_jubjub::{JubJubAffine, JubJubExtended};

use super::{BlockKind, Builder, Constraint, Witness, WitnessPoint};

/// Claimed addition `(x3, y3) = (x1, y1) ± (x2, y2)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EccAddGate {
    /// `x` of the first input
    pub x1: Witness,
    /// `y` of the first input
    pub y1: Witness,
    /// `x` of the second input
    pub x2: Witness,
    /// `y` of the second input
    pub y2: Witness,
    /// `x` of the claimed output
    pub x3: Witness,
    /// `y` of the claimed output
    pub y3: Witness,
    /// Subtract the second input instead of adding it
    pub subtract: bool,
}

/// Claimed doubling `(x3, y3) = 2 · (x1, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EccDoubleGate {
    /// `x` of the input
    pub x1: Witness,
    /// `y` of the input
    pub y1: Witness,
    /// `x` of the claimed output
    pub x3: Witness,
    /// `y` of the claimed output
    pub y3: Witness,
}

impl Builder {
    /// Appends a point in affine form as [`WitnessPoint`]
    pub fn append_point<P: Into<JubJubAffine>>(
        &mut self,
        affine: P,
    ) -> WitnessPoint {
        let affine = affine.into();

        let x = self.append_witness(affine.get_u());
        let y = self.append_witness(affine.get_v());

        WitnessPoint::new(x, y)
    }

    /// Constrain a claimed curve addition by appending two elliptic rows.
    ///
    /// The first row holds the inputs `(x1, y1, x2, y2)`; the second one the
    /// output and the product `x1 · y2`, allocated here.
    pub fn create_ecc_add_gate(&mut self, gate: &EccAddGate) {
        let x1_y2 = self[gate.x1] * self[gate.y2];
        let x1_y2 = self.append_witness(x1_y2);

        let sign = match gate.subtract {
            true => -BlsScalar::one(),
            false => BlsScalar::one(),
        };

        let constraint = Constraint::new()
            .left(sign)
            .a(gate.x1)
            .b(gate.y1)
            .c(gate.x2)
            .d(gate.y2);

        self.append_row(BlockKind::Elliptic, Constraint::elliptic(&constraint));

        let constraint = Constraint::new()
            .a(gate.x3)
            .b(gate.y3)
            .c(Self::ZERO)
            .d(x1_y2);

        self.append_row(BlockKind::Elliptic, constraint);
    }

    /// Constrain a claimed curve doubling by appending two elliptic rows.
    pub fn create_ecc_dbl_gate(&mut self, gate: &EccDoubleGate) {
        let x1_y1 = self[gate.x1] * self[gate.y1];
        let x1_y1 = self.append_witness(x1_y1);

        let constraint = Constraint::new().mult(1).a(gate.x1).b(gate.y1);

        self.append_row(BlockKind::Elliptic, Constraint::elliptic(&constraint));

        let constraint = Constraint::new()
            .a(gate.x3)
            .b(gate.y3)
            .c(Self::ZERO)
            .d(x1_y1);

        self.append_row(BlockKind::Elliptic, constraint);
    }

    fn point_value(&self, p: WitnessPoint) -> JubJubExtended {
        JubJubAffine::from_raw_unchecked(self[*p.x()], self[*p.y()]).into()
    }

    /// Adds two curve points by consuming 2 rows.
    pub fn component_add_point(
        &mut self,
        a: WitnessPoint,
        b: WitnessPoint,
    ) -> WitnessPoint {
        let sum = self.point_value(a) + self.point_value(b);
        let sum = self.append_point(sum);

        self.create_ecc_add_gate(&EccAddGate {
            x1: *a.x(),
            y1: *a.y(),
            x2: *b.x(),
            y2: *b.y(),
            x3: *sum.x(),
            y3: *sum.y(),
            subtract: false,
        });

        sum
    }

    /// Subtracts a curve point from another by consuming 2 rows.
    pub fn component_sub_point(
        &mut self,
        a: WitnessPoint,
        b: WitnessPoint,
    ) -> WitnessPoint {
        let diff = self.point_value(a) - self.point_value(b);
        let diff = self.append_point(diff);

        self.create_ecc_add_gate(&EccAddGate {
            x1: *a.x(),
            y1: *a.y(),
            x2: *b.x(),
            y2: *b.y(),
            x3: *diff.x(),
            y3: *diff.y(),
            subtract: true,
        });

        diff
    }

    /// Doubles a curve point by consuming 2 rows.
    pub fn component_double_point(&mut self, a: WitnessPoint) -> WitnessPoint {
        let double = self.point_value(a).double();
        let double = self.append_point(double);

        self.create_ecc_dbl_gate(&EccDoubleGate {
            x1: *a.x(),
            y1: *a.y(),
            x3: *double.x(),
            y3: *double.y(),
        });

        double
    }
}
