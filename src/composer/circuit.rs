// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use crate::error::Error;

use super::Builder;

/// Circuit implementation that can be built into a [`Builder`] and validated
/// by the [`Checker`](crate::prelude::Checker)
pub trait Circuit {
    /// Circuit definition
    fn circuit(&self, builder: &mut Builder) -> Result<(), Error>;
}
