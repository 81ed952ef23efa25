// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Circuit construction runtime controller

use dusk_bls12_381::BlsScalar;

use crate::composer::{BlockKind, Gate};
use crate::prelude::Witness;

#[cfg(feature = "debug")]
use crate::debugger::{Debugger, Source};

/// Runtime events
#[derive(Debug, Clone, Copy)]
#[allow(clippy::large_enum_variant)]
pub enum RuntimeEvent {
    /// A witness was appended to the constraint system
    WitnessAppended {
        /// Appended witness
        w: Witness,
        /// Witness value
        v: BlsScalar,
    },

    /// A row was appended to a block
    ConstraintAppended {
        /// Block of the row
        block: BlockKind,
        /// Index of the row inside of its block
        row: usize,
        /// Appended row
        gate: Gate,
    },

    /// The auxiliary rows were appended and the circuit is closed
    CircuitFinalized,
}

/// Runtime structure with debugger
#[derive(Debug, Clone)]
pub struct Runtime {
    #[cfg(feature = "debug")]
    debugger: Debugger,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Create a new runtime
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "debug")]
            debugger: Debugger::new(),
        }
    }

    pub(crate) fn event(&mut self, event: RuntimeEvent) {
        match &event {
            RuntimeEvent::WitnessAppended { w, .. } => {
                tracing::trace!(witness = w.index(), "witness appended");
            }
            RuntimeEvent::ConstraintAppended { block, row, .. } => {
                tracing::trace!(%block, row, "constraint appended");
            }
            RuntimeEvent::CircuitFinalized => {
                tracing::trace!("circuit finalized");
            }
        }

        #[cfg(feature = "debug")]
        self.debugger.event(event);
    }

    /// Source location that appended the given row
    #[cfg(feature = "debug")]
    pub(crate) fn source(
        &self,
        block: BlockKind,
        row: usize,
    ) -> Option<&Source> {
        self.debugger.source(block, row)
    }
}
