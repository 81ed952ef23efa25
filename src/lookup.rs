// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Lookup tables and multi-table accumulators.
//!
//! A multi-table splits a key into slices and looks every slice up in its own
//! basic table. The rows of a lookup store running accumulators of the slices,
//! so that each row key is recovered as `acc_i - step_{i+1} · acc_{i+1}`.

mod basic_table;
mod fixed_base;
mod multi_table;
mod uint;

pub use basic_table::{BasicTable, BasicTableId, FixedBaseTable};
pub use fixed_base::{
    fixed_base_left, fixed_base_offset, fixed_base_right,
    FIXED_BASE_BITS_PER_TABLE, FIXED_BASE_HI_BITS, FIXED_BASE_LO_BITS,
};
pub use multi_table::{
    get_lookup_accumulators, ColumnIdx, MultiTable, MultiTableId, ReadData,
};
