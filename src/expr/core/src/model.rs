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

use std::fmt::Debug;
use std::sync::Arc;

use anyhow::{bail, Result};

/// A pre-trained scoring model, treated by the scalar function as a black box.
///
/// Implementations are typically generated by the training pipeline. The function only asks
/// a model how many columns it expects, how to encode a categorical label and how to score a
/// feature vector. A model must be immutable once built, so that it can be shared between
/// function instances running on different threads.
pub trait ScoringModel: Debug + Send + Sync {
    /// Name of the model, used in error messages and logs.
    fn name(&self) -> &str;

    /// Names of the input columns, in the order used at training time.
    fn names(&self) -> &[String];

    /// Number of input columns the model expects.
    fn num_cols(&self) -> usize {
        self.names().len()
    }

    /// The category labels of column `column`, or `None` if the column is numeric.
    fn domain_values(&self, column: usize) -> Option<&[String]>;

    /// Maps a categorical label to the index it had during training.
    ///
    /// Returns `Ok(None)` if the label is unknown, or if the column is not categorical.
    fn map_enum(&self, column: usize, value: &str) -> Result<Option<usize>> {
        if column >= self.num_cols() {
            bail!(
                "column index {column} out of range for {} columns",
                self.num_cols()
            );
        }
        Ok(self
            .domain_values(column)
            .and_then(|domain| domain.iter().position(|v| v == value)))
    }

    /// Length of the raw prediction array written by [`ScoringModel::score0`].
    fn preds_size(&self) -> usize;

    /// Scores one feature vector, writing the raw predictions into `preds`.
    ///
    /// `preds` has exactly [`ScoringModel::preds_size`] slots.
    fn score0(&self, data: &[f64], preds: &mut [f64]) -> Result<()>;
}

pub type BoxedModel = Arc<dyn ScoringModel>;
