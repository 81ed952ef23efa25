// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Variable store with equivalence classes and tags.
//!
//! Every class is a chain of handles linked through `next`/`prev`, whose tail
//! is the class representative. Merging two classes appends the chain of the
//! second one in front of the first and points all of its members to the
//! representative of the first.
//!
//! Tags declared by callers count up from `1`. Range lists draw their pairs
//! from the top of the `u32` space, skipping declared ids, and callers can't
//! declare or assign them.

use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};

use dusk_bls12_381::BlsScalar;

use crate::error::Error;
use crate::prelude::Witness;

/// Tag carried by classes that were never tagged
pub const DUMMY_TAG: u32 = 0;

/// `next` marker of the representative of a class
const REAL_VARIABLE: u32 = u32::MAX - 1;

/// `prev` marker of the first handle of a class
const FIRST_VARIABLE_IN_CLASS: u32 = u32::MAX - 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Variables {
    values: Vec<BlsScalar>,
    real_index: Vec<u32>,
    next: Vec<u32>,
    prev: Vec<u32>,
    real_tags: Vec<u32>,
    tau: HashMap<u32, u32>,
    current_tag: u32,
    range_tags: HashSet<u32>,
}

impl Variables {
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn push(&mut self, value: BlsScalar) -> Witness {
        let n = self.values.len() as u32;

        self.values.push(value);
        self.real_index.push(n);
        self.next.push(REAL_VARIABLE);
        self.prev.push(FIRST_VARIABLE_IN_CLASS);
        self.real_tags.push(DUMMY_TAG);

        Witness::new(n)
    }

    /// Representative of the class of `w`
    ///
    /// Panics if `w` was never allocated
    pub(crate) fn real(&self, w: Witness) -> Witness {
        Witness::new(self.real_index[w.index()])
    }

    /// Resolved value of `w`
    pub(crate) fn value(&self, w: Witness) -> &BlsScalar {
        &self.values[self.real(w).index()]
    }

    /// Merge the class of `b` into the class of `a`.
    ///
    /// Return `false` if the resolved values of the classes differ.
    pub(crate) fn merge(&mut self, a: Witness, b: Witness) -> bool {
        let a_real = self.real(a).index();
        let b_real = self.real(b).index();

        if a_real == b_real {
            return true;
        }

        let equal = self.values[a_real] == self.values[b_real];

        let b_first = self.first_in_class(b);
        let mut cursor = b_first;
        loop {
            self.real_index[cursor as usize] = a_real as u32;
            match self.next[cursor as usize] {
                REAL_VARIABLE => break,
                n => cursor = n,
            }
        }

        let a_first = self.first_in_class(a);
        self.next[b_real] = a_first;
        self.prev[a_first as usize] = b_real as u32;

        if self.real_tags[a_real] == DUMMY_TAG {
            self.real_tags[a_real] = self.real_tags[b_real];
        }

        equal
    }

    fn first_in_class(&self, w: Witness) -> u32 {
        let mut cursor = w.index() as u32;
        while self.prev[cursor as usize] != FIRST_VARIABLE_IN_CLASS {
            cursor = self.prev[cursor as usize];
        }

        cursor
    }

    /// Representatives of every class, in allocation order
    pub(crate) fn reals(&self) -> impl Iterator<Item = Witness> + '_ {
        self.real_index
            .iter()
            .enumerate()
            .filter(|(i, r)| *i == **r as usize)
            .map(|(i, _)| Witness::new(i as u32))
    }

    pub(crate) fn tag(&self, w: Witness) -> u32 {
        self.real_tags[self.real(w).index()]
    }

    pub(crate) fn tags(&self) -> &HashMap<u32, u32> {
        &self.tau
    }

    pub(crate) fn new_tag(&mut self) -> u32 {
        self.current_tag += 1;
        while self.range_tags.contains(&self.current_tag) {
            self.current_tag += 1;
        }

        self.current_tag
    }

    /// Declare a fresh pair of range list tags
    pub(crate) fn new_range_tags(&mut self) -> (u32, u32) {
        let mut free = (1..=u32::MAX)
            .rev()
            .filter(|t| !self.tau.contains_key(t) && *t != self.current_tag);

        let range = free.next().unwrap_or(DUMMY_TAG);
        let tau = free.next().unwrap_or(DUMMY_TAG);

        self.tau.insert(range, tau);
        self.tau.insert(tau, range);
        self.range_tags.extend([range, tau]);

        (range, tau)
    }

    fn ensure_caller_tag(&self, tag: u32) -> Result<(), Error> {
        match self.range_tags.contains(&tag) {
            true => Err(Error::RangeListTag { tag }),
            false => Ok(()),
        }
    }

    pub(crate) fn create_tag(
        &mut self,
        tag: u32,
        partner: u32,
    ) -> Result<(), Error> {
        if tag == DUMMY_TAG || partner == DUMMY_TAG {
            return Err(Error::ReservedTag);
        }

        if tag == partner {
            return Err(Error::SelfPartneredTag { tag });
        }

        self.ensure_caller_tag(tag)?;
        self.ensure_caller_tag(partner)?;

        for (t, p) in [(tag, partner), (partner, tag)] {
            match self.tau.get(&t) {
                Some(existing) if *existing != p => {
                    return Err(Error::TagAlreadyPaired {
                        tag: t,
                        partner: *existing,
                    })
                }
                _ => (),
            }
        }

        self.tau.insert(tag, partner);
        self.tau.insert(partner, tag);
        self.current_tag = self.current_tag.max(tag).max(partner);

        Ok(())
    }

    pub(crate) fn assign_tag(
        &mut self,
        w: Witness,
        tag: u32,
    ) -> Result<(), Error> {
        self.ensure_caller_tag(tag)?;

        if tag != DUMMY_TAG && !self.tau.contains_key(&tag) {
            return Err(Error::UnknownTag { tag });
        }

        self.set_tag(w, tag);

        Ok(())
    }

    /// Tag the class of `w` without checking the tag was declared
    pub(crate) fn set_tag(&mut self, w: Witness, tag: u32) {
        let real = self.real(w).index();
        self.real_tags[real] = tag;
    }
}
