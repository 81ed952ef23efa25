// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! A collection of all possible errors encountered while building a circuit.

use crate::prelude::Witness;

/// Defines all possible errors that can be encountered while building a
/// circuit.
///
/// These are structural misuses of the builder. Unsatisfied circuits are not
/// errors; they are reported by the [`Checker`](crate::prelude::Checker).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    // Variable store errors
    /// Two classes with different values were merged by
    /// [`Builder::assert_equal`](crate::prelude::Builder::assert_equal).
    AssertEqualFailed {
        /// Left handle of the assertion
        a: Witness,
        /// Right handle of the assertion
        b: Witness,
    },

    // Tag errors
    /// Tag `0` is reserved for untagged classes.
    ReservedTag,
    /// A tag was declared as its own partner.
    SelfPartneredTag {
        /// Offending tag
        tag: u32,
    },
    /// A tag was declared with a different partner than before.
    TagAlreadyPaired {
        /// Offending tag
        tag: u32,
        /// Partner the tag is already paired with
        partner: u32,
    },
    /// A tag was assigned before being declared.
    UnknownTag {
        /// Offending tag
        tag: u32,
    },
    /// A tag of a range list was declared or assigned by the caller.
    RangeListTag {
        /// Offending tag
        tag: u32,
    },

    // Range errors
    /// A range `[0, 0)` was requested.
    EmptyRange,
    /// A range or decomposition was requested over more bits than the field
    /// can hold.
    RangeTooWide {
        /// Requested bits count
        bits: usize,
    },

    /// A sort constraint was requested over a sequence whose length isn't a
    /// positive multiple of four, or isn't longer than four with edges.
    SortLengthMismatch {
        /// Offending length
        len: usize,
    },

    // Lookup errors
    /// The key of a lookup doesn't fit the input width of the multi-table.
    LookupKeyOutOfRange,

    // Memory errors
    /// The memory array id was never created.
    UnknownMemoryArray {
        /// Offending array id
        id: usize,
    },
    /// A memory array of size zero was requested.
    EmptyMemoryArray,
    /// The access index is outside of the memory array.
    MemoryIndexOutOfRange {
        /// Array id
        id: usize,
        /// Offending index
        index: usize,
    },
    /// A ROM element was set twice.
    RomElementAlreadySet {
        /// Array id
        id: usize,
        /// Offending index
        index: usize,
    },
    /// A RAM element was initialized twice.
    RamElementAlreadyInitialized {
        /// Array id
        id: usize,
        /// Offending index
        index: usize,
    },

    // Lifecycle errors
    /// The circuit was finalized and can't be extended with memory, range or
    /// tag data anymore.
    CircuitFinalized,
}

#[cfg(feature = "std")]
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AssertEqualFailed { a, b } => write!(
                f,
                "witnesses {} and {} asserted equal with different values",
                a.index(),
                b.index()
            ),
            Self::ReservedTag => write!(f, "tag 0 is reserved"),
            Self::SelfPartneredTag { tag } => {
                write!(f, "tag {tag} cannot be its own partner")
            }
            Self::TagAlreadyPaired { tag, partner } => {
                write!(f, "tag {tag} is already paired with tag {partner}")
            }
            Self::UnknownTag { tag } => {
                write!(f, "tag {tag} was never created")
            }
            Self::RangeListTag { tag } => {
                write!(f, "tag {tag} belongs to a range list")
            }
            Self::EmptyRange => write!(f, "the range [0, 0) is empty"),
            Self::RangeTooWide { bits } => {
                write!(f, "a range of {bits} bits doesn't fit the field")
            }
            Self::SortLengthMismatch { len } => write!(
                f,
                "a sort constraint can't span a sequence of {len} witnesses"
            ),
            Self::LookupKeyOutOfRange => {
                write!(f, "the lookup key doesn't fit the multi-table")
            }
            Self::UnknownMemoryArray { id } => {
                write!(f, "memory array {id} was never created")
            }
            Self::EmptyMemoryArray => {
                write!(f, "memory arrays must have at least one element")
            }
            Self::MemoryIndexOutOfRange { id, index } => {
                write!(f, "index {index} is out of range for memory array {id}")
            }
            Self::RomElementAlreadySet { id, index } => {
                write!(f, "element {index} of ROM array {id} is already set")
            }
            Self::RamElementAlreadyInitialized { id, index } => write!(
                f,
                "element {index} of RAM array {id} is already initialized"
            ),
            Self::CircuitFinalized => write!(f, "the circuit is finalized"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
