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

use enum_as_inner::EnumAsInner;

use super::DataType;

/// A nullable scalar value.
pub type Datum = Option<ScalarImpl>;

/// An owned scalar value of any supported type.
#[derive(Debug, Clone, PartialEq, EnumAsInner)]
pub enum ScalarImpl {
    Bool(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Utf8(Box<str>),
    Bytea(Box<[u8]>),
}

impl ScalarImpl {
    /// The runtime type of the value.
    pub fn data_type(&self) -> DataType {
        match self {
            ScalarImpl::Bool(_) => DataType::Boolean,
            ScalarImpl::Int16(_) => DataType::Int16,
            ScalarImpl::Int32(_) => DataType::Int32,
            ScalarImpl::Int64(_) => DataType::Int64,
            ScalarImpl::Float32(_) => DataType::Float32,
            ScalarImpl::Float64(_) => DataType::Float64,
            ScalarImpl::Utf8(_) => DataType::Varchar,
            ScalarImpl::Bytea(_) => DataType::Bytea,
        }
    }
}

macro_rules! impl_from_native {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$native> for ScalarImpl {
                fn from(v: $native) -> Self {
                    ScalarImpl::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_native! {
    bool => Bool,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    &str => Utf8,
    String => Utf8,
    &[u8] => Bytea,
    Vec<u8> => Bytea,
}
