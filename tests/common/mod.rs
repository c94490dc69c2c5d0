// Shared fixtures: small but complete model artifacts written to a temp dir.
//
// Fixture forest (22 classes, codes 1..=22), two stumps on scaled features:
//   tree 1 splits on rainfall (6), tree 2 on humidity (4), both at 0.0.
//   wet & humid -> rice 0.50, jute 0.35, coconut 0.10, papaya 0.05
//   dry & arid  -> chickpea 0.65, mothbeans 0.25, kidneybeans 0.10

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const N_CLASSES: usize = 22;

/// 22-length leaf with the given (class code, weight) pairs
pub fn leaf(weights: &[(usize, f64)]) -> Value {
    let mut value = vec![0.0; N_CLASSES];
    for (code, w) in weights {
        value[code - 1] = *w;
    }
    json!({ "value": value })
}

pub fn forest_json() -> Value {
    json!({
        "classes": (1..=N_CLASSES as u32).collect::<Vec<_>>(),
        "n_features": 8,
        "trees": [
            { "nodes": [
                { "feature": 6, "threshold": 0.0, "left": 1, "right": 2 },
                leaf(&[(21, 8.0), (20, 2.0)]),
                leaf(&[(1, 6.0), (3, 3.0), (6, 1.0)])
            ] },
            { "nodes": [
                { "feature": 4, "threshold": 0.0, "left": 1, "right": 2 },
                leaf(&[(21, 5.0), (18, 5.0)]),
                leaf(&[(1, 4.0), (3, 4.0), (5, 2.0)])
            ] }
        ]
    })
}

pub fn min_max_json() -> Value {
    json!({
        "data_min_": [0.0, 5.0, 5.0, 8.8, 14.3, 3.5, 20.2, 0.0],
        "data_max_": [140.0, 145.0, 205.0, 43.7, 99.9, 9.9, 298.6, 2.0],
        "feature_range": [0.0, 1.0]
    })
}

pub fn standard_json() -> Value {
    json!({
        "mean_": [0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5],
        "scale_": [0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25]
    })
}

pub fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Directory holding model.json, minmaxscaler.json and standscaler.json
pub fn model_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_json(&dir.path().join("model.json"), &forest_json());
    write_json(&dir.path().join("minmaxscaler.json"), &min_max_json());
    write_json(&dir.path().join("standscaler.json"), &standard_json());
    dir
}

pub fn sample_payload() -> Value {
    json!({
        "N": 90, "P": 42, "K": 43,
        "temperature": 20.8, "humidity": 82, "ph": 6.5, "rainfall": 202.9,
        "soil_type": "loamy"
    })
}

pub fn dry_payload() -> Value {
    json!({
        "N": 40, "P": 60, "K": 80,
        "temperature": 18.0, "humidity": 20, "ph": 7.2, "rainfall": 30,
        "soil_type": "sandy"
    })
}

pub const CROP_TABLE: [&str; 22] = [
    "rice", "maize", "jute", "cotton", "coconut", "papaya", "orange", "apple",
    "muskmelon", "watermelon", "grapes", "mango", "banana", "pomegranate", "lentil",
    "blackgram", "mungbean", "mothbeans", "pigeonpeas", "kidneybeans", "chickpea", "coffee",
];
