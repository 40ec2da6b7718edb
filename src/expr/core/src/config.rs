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

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ExprError, Result};

/// Configuration of the `scoredata` function.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScorerConfig {
    /// Index of the value taken from each model's raw prediction array.
    /// For a binomial classifier the layout is `[label, p0, p1]`.
    #[serde(default = "default::prediction_slot")]
    pub prediction_slot: usize,

    /// Whether to remove double quotes from string arguments before the category lookup.
    #[serde(default = "default::strip_quotes")]
    pub strip_quotes: bool,

    /// Models to load, in output order. Each one produces a `model{i}` field.
    #[serde(default = "default::models")]
    pub models: Vec<ModelConfig>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        toml::from_str("").unwrap()
    }
}

/// A model to load from the registry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    pub name: String,

    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl ScorerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ExprError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path).map_err(|e| {
            ExprError::Config(format!(
                "failed to open config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&config_str)
    }
}

mod default {
    use super::ModelConfig;

    pub fn models() -> Vec<ModelConfig> {
        vec![ModelConfig {
            name: "gbm_c1".to_owned(),
            options: Default::default(),
        }]
    }

    pub fn prediction_slot() -> usize {
        2
    }

    pub fn strip_quotes() -> bool {
        true
    }
}
