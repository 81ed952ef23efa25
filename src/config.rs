// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Builder configuration

/// Policy for ROM cells that were never set when the circuit is finalized
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UninitializedRom {
    /// Unset cells are set to zero, so reading them yields `0`
    #[default]
    Zero,
    /// Unset cells stay unset, so reading them leaves the circuit unsatisfied
    Reject,
}

/// Configuration of a [`Builder`](crate::prelude::Builder)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    uninitialized_rom: UninitializedRom,
}

impl Config {
    /// Default configuration
    pub const fn new() -> Self {
        Self {
            uninitialized_rom: UninitializedRom::Zero,
        }
    }

    /// Set the policy for ROM cells that were never set
    pub const fn with_uninitialized_rom(
        mut self,
        policy: UninitializedRom,
    ) -> Self {
        self.uninitialized_rom = policy;

        self
    }

    /// Policy for ROM cells that were never set
    pub const fn uninitialized_rom(&self) -> UninitializedRom {
        self.uninitialized_rom
    }
}
