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

use std::borrow::Cow;
use std::time::Instant;

use anyhow::anyhow;
use itertools::Itertools;
use scoredata_common::row::OwnedRow;
use scoredata_common::types::{DataType, ScalarImpl};

use crate::config::ScorerConfig;
use crate::model::{BoxedModel, ScoringModel};
use crate::registry::build_model;
use crate::{ExprError, Result};

/// Name of the function in SQL.
pub const FUNCTION_NAME: &str = "scoredata";

/// Scores rows with one or more pre-trained models.
///
/// The host calls [`RowScorer::initialize`] once with the argument types of the query, and
/// then [`RowScorer::evaluate`] for every row. Arguments are matched to model columns by
/// position only, so the query must pass them in the order used at training time.
#[derive(Debug)]
pub struct RowScorer {
    config: ScorerConfig,
    /// Loaded models. Empty until `initialize` unless injected.
    models: Vec<BoxedModel>,
    /// Argument types cached by `initialize`.
    arg_types: Option<Box<[DataType]>>,
}

impl RowScorer {
    /// Creates a scorer that loads `config.models` from the registry on `initialize`.
    pub fn new(config: ScorerConfig) -> Self {
        Self {
            config,
            models: vec![],
            arg_types: None,
        }
    }

    /// Creates a scorer over already loaded models. `config.models` is ignored.
    pub fn with_models(config: ScorerConfig, models: Vec<BoxedModel>) -> Self {
        Self {
            config,
            models,
            arg_types: None,
        }
    }

    pub fn models(&self) -> &[BoxedModel] {
        &self.models
    }

    /// Validates the argument types and returns the return type of the function.
    ///
    /// The return type is a struct with one `double precision` field per model, named
    /// `model1`, `model2`, and so on.
    pub fn initialize(&mut self, arg_types: &[DataType]) -> Result<DataType> {
        let start = Instant::now();
        tracing::info!(num_args = arg_types.len(), "begin: initialize()");

        self.load_models()?;
        let num_cols = self.models[0].num_cols();
        if arg_types.len() != num_cols {
            return Err(self.argument_count_mismatch(arg_types.len()));
        }
        if let Some(ty) = arg_types.iter().find(|ty| !is_accepted_type(ty)) {
            return Err(ExprError::UnsupportedColumnType(ty.to_string()));
        }
        self.arg_types = Some(arg_types.into());

        tracing::info!(elapsed = ?start.elapsed(), "end: initialize()");
        Ok(self.return_type())
    }

    /// The struct type returned for every row.
    pub fn return_type(&self) -> DataType {
        DataType::new_struct(
            (1..=self.models.len()).map(|i| (format!("model{i}"), DataType::Float64)),
        )
    }

    /// Scores one row, returning one value per model.
    ///
    /// Returns `None` if the row is null or any of its values is null.
    pub fn evaluate(&self, row: Option<&OwnedRow>) -> Result<Option<Vec<f64>>> {
        let start = Instant::now();
        let Some(row) = row else {
            return Ok(None);
        };
        let arg_types = self.arg_types.as_ref().ok_or(ExprError::NotInitialized)?;
        if row.len() != arg_types.len() {
            return Err(self.argument_count_mismatch(row.len()));
        }
        let Some(data) = self.to_features(row)? else {
            return Ok(None);
        };
        let output = self.score(&data)?;

        tracing::trace!(elapsed = ?start.elapsed(), "end: evaluate()");
        Ok(Some(output))
    }

    /// Encodes a row as a feature vector, in argument order.
    ///
    /// Returns `None` as soon as a null value is met.
    pub fn to_features(&self, row: &OwnedRow) -> Result<Option<Vec<f64>>> {
        let model = self.models.first().ok_or(ExprError::NotInitialized)?;
        let mut data = Vec::with_capacity(row.len());
        for (index, datum) in row.iter().enumerate() {
            let Some(scalar) = datum else {
                return Ok(None);
            };
            data.push(self.coerce(model.as_ref(), index, scalar)?);
        }
        Ok(Some(data))
    }

    /// Text shown in `EXPLAIN`.
    pub fn display_string(&self) -> String {
        let names = self
            .models
            .first()
            .map(|model| model.names().iter().take(model.num_cols()).join(", "))
            .unwrap_or_default();
        format!("{FUNCTION_NAME}([{names}]).")
    }

    fn load_models(&mut self) -> Result<()> {
        if self.models.is_empty() {
            self.models = self
                .config
                .models
                .iter()
                .map(build_model)
                .collect::<Result<_>>()?;
        }
        let Some(first) = self.models.first() else {
            return Err(ExprError::ModelLoad {
                model: FUNCTION_NAME.to_owned(),
                source: anyhow!("no scoring model is configured"),
            });
        };
        if let Some(other) = self.models[1..]
            .iter()
            .find(|m| m.num_cols() != first.num_cols())
        {
            return Err(ExprError::ModelLoad {
                model: other.name().to_owned(),
                source: anyhow!(
                    "model expects {} columns, but `{}` expects {}",
                    other.num_cols(),
                    first.name(),
                    first.num_cols()
                ),
            });
        }
        Ok(())
    }

    fn coerce(&self, model: &dyn ScoringModel, index: usize, scalar: &ScalarImpl) -> Result<f64> {
        let value = match scalar {
            ScalarImpl::Utf8(s) => {
                // Some hosts pass strings wrapped in double quotes.
                let label = if self.config.strip_quotes && s.contains('"') {
                    Cow::Owned(s.replace('"', ""))
                } else {
                    Cow::Borrowed(&**s)
                };
                let category = model
                    .map_enum(index, &label)
                    .map_err(|source| ExprError::UnexpectedCoercion { index, source })?;
                match category {
                    Some(category) => category as f64,
                    None => {
                        return Err(ExprError::UnknownCategory {
                            value: s.to_string(),
                            column: model.names().get(index).cloned().unwrap_or_default(),
                        });
                    }
                }
            }
            ScalarImpl::Float64(v) => *v,
            ScalarImpl::Float32(v) => f64::from(*v),
            ScalarImpl::Int64(v) => *v as f64,
            ScalarImpl::Int32(v) => f64::from(*v),
            ScalarImpl::Int16(v) => f64::from(*v),
            ScalarImpl::Bool(_) | ScalarImpl::Bytea(_) => {
                return Err(ExprError::UnsupportedValueType {
                    type_name: scalar.data_type().to_string(),
                    index,
                });
            }
        };
        Ok(value)
    }

    fn score(&self, data: &[f64]) -> Result<Vec<f64>> {
        let slot = self.config.prediction_slot;
        self.models
            .iter()
            .map(|model| {
                let scoring_error = |source: anyhow::Error| ExprError::ModelScoring {
                    model: model.name().to_owned(),
                    source,
                };
                let mut preds = vec![0.0; model.preds_size()];
                model.score0(data, &mut preds).map_err(scoring_error)?;
                preds.get(slot).copied().ok_or_else(|| {
                    scoring_error(anyhow!(
                        "prediction slot {slot} out of range for {} predictions",
                        preds.len()
                    ))
                })
            })
            .collect()
    }

    fn argument_count_mismatch(&self, actual: usize) -> ExprError {
        let expected = self
            .models
            .first()
            .map(|model| model.names().iter().take(model.num_cols()).cloned().collect())
            .unwrap_or_default();
        ExprError::ArgumentCountMismatch { expected, actual }
    }
}

/// Strings are looked up as categories, numbers are widened to `f64`.
fn is_accepted_type(ty: &DataType) -> bool {
    *ty == DataType::Varchar || ty.is_numeric()
}
