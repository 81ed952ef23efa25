// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Debugger module

use std::fmt;
use std::string::String;
use std::vec::Vec;

use hashbrown::HashMap;

use crate::composer::BlockKind;
use crate::runtime::RuntimeEvent;

/// Location of the caller that appended a witness or a row
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Source {
    line: u64,
    col: u64,
    path: String,
}

impl Source {
    /// Line of the caller
    pub const fn line(&self) -> u64 {
        self.line
    }

    /// Column of the caller
    pub const fn col(&self) -> u64 {
        self.col
    }

    /// Canonical path of the caller file
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.col)
    }
}

/// Circuit debugger
#[derive(Debug, Clone, Default)]
pub(crate) struct Debugger {
    witnesses: Vec<Source>,
    constraints: HashMap<BlockKind, Vec<Source>>,
}

impl Debugger {
    /// Resolver the caller function
    fn resolve_caller() -> Source {
        let mut source = None;

        backtrace::trace(|frame| {
            // Resolve this instruction pointer to a symbol name
            backtrace::resolve_frame(frame, |symbol| {
                if symbol
                    .name()
                    .map(|n| format!("{}", n))
                    .filter(|s| !s.starts_with("backtrace::"))
                    .filter(|s| !s.starts_with("ultraplonk::"))
                    .filter(|s| !s.starts_with("<ultraplonk::"))
                    .filter(|s| !s.starts_with("core::"))
                    .filter(|s| !s.starts_with("std::"))
                    .is_some()
                {
                    if let Some(path) = symbol.filename() {
                        let line = symbol.lineno().unwrap_or_default() as u64;
                        let col = symbol.colno().unwrap_or_default() as u64;
                        let path = path.canonicalize().unwrap_or_default();
                        let path = format!("{}", path.display());

                        source.replace(Source { line, col, path });
                    }
                }
            });

            source.is_none()
        });

        source.unwrap_or_default()
    }

    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn source(
        &self,
        block: BlockKind,
        row: usize,
    ) -> Option<&Source> {
        self.constraints.get(&block).and_then(|rows| rows.get(row))
    }

    pub(crate) fn event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::WitnessAppended { .. } => {
                self.witnesses.push(Self::resolve_caller());
            }

            RuntimeEvent::ConstraintAppended { block, row, .. } => {
                let rows = self.constraints.entry(block).or_default();

                debug_assert_eq!(rows.len(), row, "rows are appended in order");
                rows.push(Self::resolve_caller());
            }

            RuntimeEvent::CircuitFinalized => {
                let rows: usize = self.constraints.values().map(Vec::len).sum();

                tracing::debug!(
                    witnesses = self.witnesses.len(),
                    rows,
                    "debugger sources collected"
                );
            }
        }
    }
}
