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

//! Scoring models registered for the `scoredata` function.
//!
//! Linking this crate is enough to register its models. Use [`enable!`] in a binary or test
//! that does not otherwise reference the crate.

mod model;

/// Enable the models in this crate.
#[macro_export]
macro_rules! enable {
    () => {
        use scoredata_expr_impl as _;
    };
}
