// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Handles to the variables allocated in a
//! [`Builder`](crate::prelude::Builder).

/// Allocated witness in the constraint system.
///
/// The handle is stable for the whole lifetime of the circuit; variables are
/// never removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Witness {
    index: u32,
}

impl Default for Witness {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Witness {
    /// A `0` witness representation.
    pub const ZERO: Witness = Witness::new(0);

    /// A `1` witness representation.
    pub const ONE: Witness = Witness::new(1);

    /// Generate a new [`Witness`]
    pub(crate) const fn new(index: u32) -> Self {
        Self { index }
    }

    /// Index of the allocated witness in the builder
    pub const fn index(&self) -> usize {
        self.index as usize
    }
}

/// Pair of witnesses representing the affine coordinates of a JubJub point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WitnessPoint {
    x: Witness,
    y: Witness,
}

impl WitnessPoint {
    pub(crate) const fn new(x: Witness, y: Witness) -> Self {
        Self { x, y }
    }

    /// Return the X coordinate of the point
    pub const fn x(&self) -> &Witness {
        &self.x
    }

    /// Return the Y coordinate of the point
    pub const fn y(&self) -> &Witness {
        &self.y
    }
}
