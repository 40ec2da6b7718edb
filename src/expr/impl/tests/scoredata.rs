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

use std::sync::Arc;

use arrow_array::cast::AsArray;
use arrow_array::types::Float64Type;
use arrow_array::{Array, Float32Array, Float64Array, Int32Array, RecordBatch, StringArray};
use arrow_schema::{DataType as ArrowDataType, Field, Schema};
use expect_test::expect;
use scoredata_common::row::OwnedRow;
use scoredata_common::types::DataType;
use scoredata_expr::registry::registered_models;
use scoredata_expr::{
    ExprError, ModelConfig, RowScorer, ScoreDataFunction, ScorerConfig, ScoringModel,
};

scoredata_expr_impl::enable!();

fn arg_types() -> Vec<DataType> {
    vec![
        DataType::Int32,
        DataType::Float64,
        DataType::Varchar,
        DataType::Float32,
    ]
}

fn input_schema() -> Schema {
    Schema::new(vec![
        Field::new("age", ArrowDataType::Int32, true),
        Field::new("income", ArrowDataType::Float64, true),
        Field::new("city", ArrowDataType::Utf8, true),
        Field::new("score", ArrowDataType::Float32, true),
    ])
}

#[test]
fn test_registered() {
    assert!(registered_models().contains(&"gbm_c1"));
}

#[test]
fn test_default_config_loads_gbm_c1() {
    let mut scorer = RowScorer::new(ScorerConfig::default());
    let return_type = scorer.initialize(&arg_types()).unwrap();
    expect!["struct<model1 double precision>"].assert_eq(&return_type.to_string());
    expect!["scoredata([age, income, city, score])."].assert_eq(&scorer.display_string());

    let row = OwnedRow::new(vec![
        Some(34i32.into()),
        Some(52000.0f64.into()),
        Some("NYC".into()),
        Some(0.71f32.into()),
    ]);
    assert_eq!(
        scorer.to_features(&row).unwrap().unwrap(),
        vec![34.0, 52000.0, 2.0, f64::from(0.71f32)]
    );
    let output = scorer.evaluate(Some(&row)).unwrap().unwrap();
    assert_eq!(output.len(), 1);
    assert!(output[0] > 0.5 && output[0] < 0.6);
}

#[test]
fn test_wrong_argument_count() {
    let mut scorer = RowScorer::new(ScorerConfig::default());
    let err = scorer.initialize(&arg_types()[..3]).unwrap_err();
    expect!["Incorrect number of arguments. scoredata() requires: [age, income, city, score], in the listed order. Received 3 arguments."]
        .assert_eq(&err.to_string());
}

#[test]
fn test_threshold_option() {
    let config = ScorerConfig::from_toml_str(
        r#"
        prediction_slot = 0

        [[models]]
        name = "gbm_c1"

        [[models]]
        name = "gbm_c1"
        options = { threshold = "0.9" }
        "#,
    )
    .unwrap();
    let mut scorer = RowScorer::new(config);
    scorer.initialize(&arg_types()).unwrap();
    let row = OwnedRow::new(vec![
        Some(34i32.into()),
        Some(52000.0f64.into()),
        Some("SF".into()),
        Some(0.71f32.into()),
    ]);
    // labels under the default and the raised threshold
    assert_eq!(scorer.evaluate(Some(&row)).unwrap().unwrap(), vec![1.0, 0.0]);
}

#[test]
fn test_invalid_threshold_option() {
    let config = ScorerConfig {
        models: vec![ModelConfig {
            name: "gbm_c1".to_owned(),
            options: [("threshold".to_owned(), "high".to_owned())].into(),
        }],
        ..Default::default()
    };
    let err = RowScorer::new(config).initialize(&arg_types()).unwrap_err();
    assert!(matches!(err, ExprError::ModelLoad { .. }));
    expect!["failed to load scoring model `gbm_c1`: invalid `threshold` option for model `gbm_c1`: high"]
        .assert_eq(&err.to_string());
}

#[test]
fn test_score_batch() {
    let function =
        ScoreDataFunction::from_config(ScorerConfig::default(), &input_schema()).unwrap();
    assert_eq!(function.scorer().models()[0].name(), "gbm_c1");
    let input = RecordBatch::try_new(
        Arc::new(input_schema()),
        vec![
            Arc::new(Int32Array::from(vec![34i32, 22, 61])),
            Arc::new(Float64Array::from(vec![Some(52000.0), Some(18000.0), None])),
            Arc::new(StringArray::from(vec!["\"NYC\"", "LA", "BOS"])),
            Arc::new(Float32Array::from(vec![0.71f32, 0.2, 0.9])),
        ],
    )
    .unwrap();
    let output = function.call(&input).unwrap();
    assert_eq!(output.len(), 3);
    assert!(output.is_null(2));

    let model1 = output.column(0).as_primitive::<Float64Type>();
    assert!(model1.value(0) > 0.5);
    assert!(model1.value(1) < 0.3);
}
