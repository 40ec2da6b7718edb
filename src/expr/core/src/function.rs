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

//! Binding of [`RowScorer`] to Arrow record batches.

use std::sync::Arc;

use arrow_array::builder::Float64Builder;
use arrow_array::cast::AsArray;
use arrow_array::types::{Float32Type, Float64Type, Int16Type, Int32Type, Int64Type};
use arrow_array::{Array, ArrayRef, RecordBatch, StructArray};
use arrow_buffer::NullBuffer;
use arrow_schema::{DataType as ArrowDataType, Field, FieldRef, Fields, Schema};
use itertools::Itertools;
use scoredata_common::row::OwnedRow;
use scoredata_common::types::{DataType, Datum, ScalarImpl};
use thiserror_ext::AsReport;

use crate::config::ScorerConfig;
use crate::scorer::{RowScorer, FUNCTION_NAME};
use crate::{ExprError, Result};

/// The `scoredata` function over Arrow record batches.
///
/// Each column of the input batch is one argument. The output is a struct array with one
/// `Float64` child per model. Rows with a null argument produce a null struct.
#[derive(Debug)]
pub struct ScoreDataFunction {
    scorer: RowScorer,
    return_field: FieldRef,
}

impl ScoreDataFunction {
    /// Initializes `scorer` with the argument types of `input_schema`.
    pub fn build(mut scorer: RowScorer, input_schema: &Schema) -> Result<Self> {
        let arg_types: Vec<DataType> = input_schema
            .fields()
            .iter()
            .map(|field| from_arrow_type(field.data_type()))
            .collect::<Result<_>>()?;
        let return_type = scorer.initialize(&arg_types)?;
        let return_field = Arc::new(Field::new(
            FUNCTION_NAME,
            to_arrow_type(&return_type),
            true,
        ));
        Ok(Self {
            scorer,
            return_field,
        })
    }

    /// Loads the models named in `config` and initializes with `input_schema`.
    pub fn from_config(config: ScorerConfig, input_schema: &Schema) -> Result<Self> {
        Self::build(RowScorer::new(config), input_schema)
    }

    pub fn scorer(&self) -> &RowScorer {
        &self.scorer
    }

    pub fn return_field(&self) -> &FieldRef {
        &self.return_field
    }

    /// Scores every row of `input`. The first failing row fails the whole batch.
    pub fn call(&self, input: &RecordBatch) -> Result<StructArray> {
        let ArrowDataType::Struct(fields) = self.return_field.data_type() else {
            unreachable!("return type of scoredata must be a struct");
        };
        let num_rows = input.num_rows();
        let mut builders = (0..fields.len())
            .map(|_| Float64Builder::with_capacity(num_rows))
            .collect_vec();
        let mut validity = Vec::with_capacity(num_rows);

        for i in 0..num_rows {
            let row: OwnedRow = input
                .columns()
                .iter()
                .map(|column| datum_at(column, i))
                .collect::<Result<_>>()?;
            let output = self.scorer.evaluate(Some(&row)).inspect_err(|e| {
                tracing::error!(row = i, error = %e.as_report(), "failed to score row");
            })?;
            match output {
                Some(values) => {
                    for (builder, value) in builders.iter_mut().zip_eq(values) {
                        builder.append_value(value);
                    }
                    validity.push(true);
                }
                None => {
                    builders.iter_mut().for_each(|b| b.append_null());
                    validity.push(false);
                }
            }
        }

        let columns = builders
            .into_iter()
            .map(|mut b| Arc::new(b.finish()) as ArrayRef)
            .collect_vec();
        Ok(StructArray::try_new(
            fields.clone(),
            columns,
            Some(NullBuffer::from(validity)),
        )?)
    }
}

/// Reads the value at `index` of an argument column.
fn datum_at(array: &ArrayRef, index: usize) -> Result<Datum> {
    if array.is_null(index) {
        return Ok(None);
    }
    let scalar = match array.data_type() {
        ArrowDataType::Boolean => ScalarImpl::Bool(array.as_boolean().value(index)),
        ArrowDataType::Int16 => ScalarImpl::Int16(array.as_primitive::<Int16Type>().value(index)),
        ArrowDataType::Int32 => ScalarImpl::Int32(array.as_primitive::<Int32Type>().value(index)),
        ArrowDataType::Int64 => ScalarImpl::Int64(array.as_primitive::<Int64Type>().value(index)),
        ArrowDataType::Float32 => {
            ScalarImpl::Float32(array.as_primitive::<Float32Type>().value(index))
        }
        ArrowDataType::Float64 => {
            ScalarImpl::Float64(array.as_primitive::<Float64Type>().value(index))
        }
        ArrowDataType::Utf8 => array.as_string::<i32>().value(index).into(),
        ArrowDataType::LargeUtf8 => array.as_string::<i64>().value(index).into(),
        ArrowDataType::Binary => array.as_binary::<i32>().value(index).into(),
        other => return Err(ExprError::UnsupportedColumnType(other.to_string())),
    };
    Ok(Some(scalar))
}

/// Converts an Arrow argument type to a SQL type.
pub fn from_arrow_type(ty: &ArrowDataType) -> Result<DataType> {
    Ok(match ty {
        ArrowDataType::Boolean => DataType::Boolean,
        ArrowDataType::Int16 => DataType::Int16,
        ArrowDataType::Int32 => DataType::Int32,
        ArrowDataType::Int64 => DataType::Int64,
        ArrowDataType::Float32 => DataType::Float32,
        ArrowDataType::Float64 => DataType::Float64,
        ArrowDataType::Utf8 | ArrowDataType::LargeUtf8 => DataType::Varchar,
        ArrowDataType::Binary => DataType::Bytea,
        ArrowDataType::Struct(fields) => DataType::new_struct(
            fields
                .iter()
                .map(|f| Ok((f.name().clone(), from_arrow_type(f.data_type())?)))
                .collect::<Result<Vec<_>>>()?,
        ),
        ArrowDataType::List(field) | ArrowDataType::LargeList(field) => {
            DataType::List(Box::new(from_arrow_type(field.data_type())?))
        }
        other => return Err(ExprError::UnsupportedColumnType(other.to_string())),
    })
}

/// Converts a SQL type to the Arrow type used for it.
pub fn to_arrow_type(ty: &DataType) -> ArrowDataType {
    match ty {
        DataType::Boolean => ArrowDataType::Boolean,
        DataType::Int16 => ArrowDataType::Int16,
        DataType::Int32 => ArrowDataType::Int32,
        DataType::Int64 => ArrowDataType::Int64,
        DataType::Float32 => ArrowDataType::Float32,
        DataType::Float64 => ArrowDataType::Float64,
        DataType::Varchar => ArrowDataType::Utf8,
        DataType::Bytea => ArrowDataType::Binary,
        DataType::Struct(st) => ArrowDataType::Struct(
            st.iter()
                .map(|(name, ty)| Field::new(name, to_arrow_type(ty), true))
                .collect::<Fields>(),
        ),
        DataType::List(elem) => ArrowDataType::new_list(to_arrow_type(elem), true),
    }
}
