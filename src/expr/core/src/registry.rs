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

//! Registry of scoring models that can be loaded by name.
//!
//! Model crates register a [`ModelDescriptor`] into [`MODEL_IMPLS`] at link time:
//!
//! ```ignore
//! #[linkme::distributed_slice(MODEL_IMPLS)]
//! static GBM_C1: ModelDescriptor = ModelDescriptor {
//!     name: "gbm_c1",
//!     build_fn: |_opts| Ok(Arc::new(GbmC1::new())),
//! };
//! ```

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::config::ModelConfig;
use crate::model::BoxedModel;
use crate::{ExprError, Result};

/// Options passed to a model factory.
#[derive(Debug, Clone, Copy)]
pub struct ModelOptions<'a> {
    /// Name the model is requested by.
    pub name: &'a str,
    /// Free-form options from the `[models.options]` table of the config.
    pub options: &'a BTreeMap<String, String>,
}

/// Descriptor of a scoring model implementation.
pub struct ModelDescriptor {
    pub name: &'static str,
    pub build_fn: fn(opts: ModelOptions<'_>) -> anyhow::Result<BoxedModel>,
}

/// All registered scoring models.
#[linkme::distributed_slice]
pub static MODEL_IMPLS: [ModelDescriptor];

/// Returns the descriptor registered under `name`.
pub fn find_model(name: &str) -> Option<&'static ModelDescriptor> {
    MODEL_IMPLS.iter().find(|desc| desc.name == name)
}

/// Names of all registered models, sorted.
pub fn registered_models() -> Vec<&'static str> {
    MODEL_IMPLS.iter().map(|desc| desc.name).sorted().collect()
}

/// Resolves and builds the model described by `config`.
pub fn build_model(config: &ModelConfig) -> Result<BoxedModel> {
    let desc =
        find_model(&config.name).ok_or_else(|| ExprError::ModelNotFound(config.name.clone()))?;
    let model = (desc.build_fn)(ModelOptions {
        name: &config.name,
        options: &config.options,
    })
    .map_err(|source| ExprError::ModelLoad {
        model: config.name.clone(),
        source,
    })?;
    tracing::debug!(
        model = %config.name,
        num_cols = model.num_cols(),
        preds_size = model.preds_size(),
        "loaded scoring model"
    );
    Ok(model)
}
