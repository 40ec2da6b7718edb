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

// common imports for submodules
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use scoredata_expr::registry::{ModelDescriptor, ModelOptions, MODEL_IMPLS};
use scoredata_expr::ScoringModel;

mod gbm_c1;

/// Reads an optional `f64` option of a model.
fn f64_option(opts: &ModelOptions<'_>, key: &str) -> Result<Option<f64>> {
    opts.options
        .get(key)
        .map(|v| {
            v.parse()
                .with_context(|| format!("invalid `{key}` option for model `{}`: {v}", opts.name))
        })
        .transpose()
}
