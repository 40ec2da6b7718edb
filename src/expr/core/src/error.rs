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

use thiserror::Error;

/// A specialized `Result` type for the `scoredata` function.
pub type Result<T, E = ExprError> = std::result::Result<T, E>;

/// The error type for the `scoredata` function.
///
/// Every variant is reported to the query as a user-facing error. A null row or a null
/// argument is not an error: [`crate::RowScorer::evaluate`] returns `None` instead.
#[derive(Error, Debug)]
pub enum ExprError {
    #[error(
        "Incorrect number of arguments. scoredata() requires: [{}], in the listed order. Received {actual} arguments.",
        .expected.join(", ")
    )]
    ArgumentCountMismatch { expected: Vec<String>, actual: usize },

    #[error("scoredata(...): Cannot accept type: {0}")]
    UnsupportedColumnType(String),

    #[error("scoredata(...): The value {value} is not a known category for column {column}")]
    UnknownCategory { value: String, column: String },

    #[error("scoredata(...): Cannot accept type: {type_name} for argument # {index}.")]
    UnsupportedValueType { type_name: String, index: usize },

    #[error("Unexpected exception on argument # {index}. {source}")]
    UnexpectedCoercion {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("model `{model}` predict function threw exception: {source}")]
    ModelScoring {
        model: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("scoredata() is evaluated before initialize()")]
    NotInitialized,

    #[error("scoring model not found: {0}")]
    ModelNotFound(String),

    #[error("failed to load scoring model `{model}`: {source}")]
    ModelLoad {
        model: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid scoredata config: {0}")]
    Config(String),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),
}
