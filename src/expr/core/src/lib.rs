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

//! The `scoredata` scalar function: scores each input row with pre-trained models.
//!
//! ```sql
//! SELECT scoredata(age, income, city, score) FROM target_data;
//! ```
//!
//! [`RowScorer`] implements the row-level contract: `initialize` once with the argument
//! types, then `evaluate` once per row. [`ScoreDataFunction`] binds it to Arrow record
//! batches. Models are looked up by name in the [`registry`].

pub mod config;
mod error;
pub mod function;
pub mod model;
pub mod registry;
mod scorer;
#[cfg(test)]
mod test_utils;

pub use config::{ModelConfig, ScorerConfig};
pub use error::{ExprError, Result};
pub use function::ScoreDataFunction;
pub use model::{BoxedModel, ScoringModel};
pub use scorer::{RowScorer, FUNCTION_NAME};
