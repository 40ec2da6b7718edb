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

use anyhow::{bail, Result};

use crate::model::ScoringModel;

/// A scoring model for tests over `(age, income, city, score)`.
///
/// The prediction layout is `[label, -p, p]` where `p` is `slope` times the sum of the
/// features, so a test can tell exactly which feature vector was scored.
#[derive(Debug, Clone)]
pub struct MockModel {
    name: String,
    names: Vec<String>,
    domains: Vec<Option<Vec<String>>>,
    slope: f64,
    preds_size: usize,
    fail_score: bool,
    fail_map_enum: bool,
}

impl MockModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            names: ["age", "income", "city", "score"].map(String::from).to_vec(),
            domains: vec![
                None,
                None,
                Some(["BOS", "LA", "NYC", "SF"].map(String::from).to_vec()),
                None,
            ],
            slope: 1.0,
            preds_size: 3,
            fail_score: false,
            fail_map_enum: false,
        }
    }

    /// A model over `n` numeric columns `c0..c{n-1}`.
    pub fn numeric(name: impl Into<String>, n: usize) -> Self {
        Self {
            names: (0..n).map(|i| format!("c{i}")).collect(),
            domains: vec![None; n],
            ..Self::new(name)
        }
    }

    pub fn with_slope(mut self, slope: f64) -> Self {
        self.slope = slope;
        self
    }

    pub fn with_preds_size(mut self, preds_size: usize) -> Self {
        self.preds_size = preds_size;
        self
    }

    pub fn failing_score(mut self) -> Self {
        self.fail_score = true;
        self
    }

    pub fn failing_map_enum(mut self) -> Self {
        self.fail_map_enum = true;
        self
    }
}

impl ScoringModel for MockModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn names(&self) -> &[String] {
        &self.names
    }

    fn domain_values(&self, column: usize) -> Option<&[String]> {
        self.domains.get(column)?.as_deref()
    }

    fn map_enum(&self, column: usize, value: &str) -> Result<Option<usize>> {
        if self.fail_map_enum {
            bail!("category lookup failed");
        }
        Ok(self
            .domain_values(column)
            .and_then(|domain| domain.iter().position(|v| v == value)))
    }

    fn preds_size(&self) -> usize {
        self.preds_size
    }

    fn score0(&self, data: &[f64], preds: &mut [f64]) -> Result<()> {
        if self.fail_score {
            bail!("tree walk failed");
        }
        let p = self.slope * data.iter().sum::<f64>();
        let layout = [if p > 0.5 { 1.0 } else { 0.0 }, -p, p];
        for (slot, v) in preds.iter_mut().zip(layout) {
            *slot = v;
        }
        Ok(())
    }
}
