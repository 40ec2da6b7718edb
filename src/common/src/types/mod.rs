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

use std::fmt;

use itertools::Itertools;
use parse_display::Display;

mod scalar_impl;

pub use scalar_impl::*;

/// The SQL type of a column passed to a function, as seen by the planner.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    #[display("boolean")]
    Boolean,
    #[display("smallint")]
    Int16,
    #[display("integer")]
    Int32,
    #[display("bigint")]
    Int64,
    #[display("real")]
    Float32,
    #[display("double precision")]
    Float64,
    #[display("varchar")]
    Varchar,
    #[display("bytea")]
    Bytea,
    #[display("{0}")]
    Struct(StructType),
    #[display("{0}[]")]
    List(Box<DataType>),
}

impl DataType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::Float32
                | DataType::Float64
        )
    }

    pub fn new_struct<S: Into<String>>(fields: impl IntoIterator<Item = (S, DataType)>) -> Self {
        DataType::Struct(StructType::new(fields))
    }
}

/// Named fields of a struct type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StructType {
    fields: Vec<(String, DataType)>,
}

impl StructType {
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = (S, DataType)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &DataType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), ty))
    }
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "struct<{}>",
            self.iter()
                .format_with(", ", |(name, ty), f| f(&format_args!("{name} {ty}")))
        )
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;

    #[test]
    fn test_display() {
        let ty = DataType::new_struct([
            ("model1", DataType::Float64),
            ("tags", DataType::List(Box::new(DataType::Varchar))),
        ]);
        expect!["struct<model1 double precision, tags varchar[]>"].assert_eq(&ty.to_string());
        expect!["smallint"].assert_eq(&DataType::Int16.to_string());
    }

    #[test]
    fn test_is_numeric() {
        assert!(DataType::Int16.is_numeric());
        assert!(DataType::Float32.is_numeric());
        assert!(!DataType::Boolean.is_numeric());
        assert!(!DataType::Varchar.is_numeric());
    }
}
