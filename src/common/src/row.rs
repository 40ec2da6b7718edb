// Copyright 2025 RisingWave Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An owned row type with a `Vec<Datum>`.

use std::ops;

use crate::types::Datum;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OwnedRow(Vec<Datum>);

impl OwnedRow {
    pub fn new(values: Vec<Datum>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Datum> {
        self.0.iter()
    }
}

impl ops::Index<usize> for OwnedRow {
    type Output = Datum;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<Datum>> for OwnedRow {
    fn from(values: Vec<Datum>) -> Self {
        Self(values)
    }
}

impl FromIterator<Datum> for OwnedRow {
    fn from_iter<T: IntoIterator<Item = Datum>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OwnedRow {
    type IntoIter = std::slice::Iter<'a, Datum>;
    type Item = &'a Datum;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
