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

//! Binomial GBM `GBM_C1`, exported from the training pipeline.
//!
//! Response: `converted` (0/1). 3 trees, max depth 2.
//! The tree bodies are generated; edit the training job instead of this file.

use super::*;

/// Log-odds of the training prior.
const INIT_F: f64 = -0.5;

/// Threshold maximizing F1 on the validation frame.
const DEFAULT_THRESHOLD: f64 = 0.4213;

const NAMES: [&str; 4] = ["age", "income", "city", "score"];

const CITY_DOMAIN: [&str; 4] = ["BOS", "LA", "NYC", "SF"];

#[linkme::distributed_slice(MODEL_IMPLS)]
static GBM_C1: ModelDescriptor = ModelDescriptor {
    name: "gbm_c1",
    build_fn: |opts| {
        let threshold = f64_option(&opts, "threshold")?.unwrap_or(DEFAULT_THRESHOLD);
        if !(0.0..=1.0).contains(&threshold) {
            bail!("threshold must be in [0, 1], got {threshold}");
        }
        Ok(Arc::new(GbmC1::new(opts.name, threshold)))
    },
};

#[derive(Debug)]
pub struct GbmC1 {
    name: String,
    names: Vec<String>,
    city_domain: Vec<String>,
    threshold: f64,
}

impl GbmC1 {
    pub fn new(name: &str, threshold: f64) -> Self {
        Self {
            name: name.to_owned(),
            names: NAMES.map(String::from).to_vec(),
            city_domain: CITY_DOMAIN.map(String::from).to_vec(),
            threshold,
        }
    }
}

impl ScoringModel for GbmC1 {
    fn name(&self) -> &str {
        &self.name
    }

    fn names(&self) -> &[String] {
        &self.names
    }

    fn domain_values(&self, column: usize) -> Option<&[String]> {
        (column == 2).then_some(self.city_domain.as_slice())
    }

    fn preds_size(&self) -> usize {
        3
    }

    fn score0(&self, data: &[f64], preds: &mut [f64]) -> Result<()> {
        if data.len() != NAMES.len() {
            bail!("expected {} features, got {}", NAMES.len(), data.len());
        }
        if preds.len() < 3 {
            bail!("prediction buffer too small: {}", preds.len());
        }
        let f = INIT_F + tree_0(data) + tree_1(data) + tree_2(data);
        let p1 = 1.0 / (1.0 + (-f).exp());
        preds[0] = if p1 >= self.threshold { 1.0 } else { 0.0 };
        preds[1] = 1.0 - p1;
        preds[2] = p1;
        Ok(())
    }
}

// Missing values go left.

fn tree_0(data: &[f64]) -> f64 {
    if !(data[1] >= 40000.0) {
        if !(data[0] >= 30.0) {
            -0.30
        } else {
            -0.12
        }
    } else if data[2] == 2.0 || data[2] == 3.0 {
        0.42
    } else {
        0.18
    }
}

fn tree_1(data: &[f64]) -> f64 {
    if !(data[3] >= 0.5) {
        -0.25
    } else if !(data[0] >= 55.0) {
        0.21
    } else {
        0.05
    }
}

fn tree_2(data: &[f64]) -> f64 {
    if data[2] == 1.0 {
        -0.08
    } else if !(data[1] >= 90000.0) {
        0.06
    } else {
        0.15
    }
}
