//! Načítanie súboru, kódovanie, delenie, tréning a evaluácia v jednom behu.

use flarecast::data_loading::schema::SCHEMA_VERSION;
use flarecast::evaluation::{render, ReportFormat};
use flarecast::pipeline::{ExperimentBuilder, ExperimentConfig};
use flarecast::processing::{PositionalSplit, ShuffledSplit};
use flarecast::{DataLoader, DataLoaderFactory, EvaluationMode, FlareDataset, PredictionMode};
use std::io::Write;

const CLASSES: [char; 7] = ['A', 'B', 'C', 'D', 'E', 'F', 'H'];
const SPOTS: [char; 6] = ['X', 'R', 'S', 'A', 'H', 'K'];
const DISTRIBUTIONS: [char; 4] = ['X', 'O', 'I', 'C'];

/// Syntetický súbor, kde C závisí od Zurich triedy, M od vývoja a X od aktivity
fn synthetic_file(rows: usize) -> String {
    let mut text = String::from("(synthetic solar flare data)\n");
    for i in 0..rows {
        let activity = 1 + i % 2;
        let evolution = 1 + i % 3;
        let c = (i % 7) % 3;
        let m = evolution - 1;
        let x = activity - 1;
        text.push_str(&format!(
            "{} {} {} {} {} {} {} {} {} {} {} {} {}\n",
            CLASSES[i % 7],
            SPOTS[i % 6],
            DISTRIBUTIONS[i % 4],
            activity,
            evolution,
            1 + (i / 3) % 3,
            1 + (i / 2) % 2,
            1 + (i / 5) % 2,
            1 + (i / 7) % 2,
            1 + (i / 4) % 2,
            c,
            m,
            x
        ));
    }
    text
}

fn load(rows: usize) -> FlareDataset {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(synthetic_file(rows).as_bytes()).unwrap();
    DataLoaderFactory::create("flare")
        .unwrap()
        .load_from_path(file.path())
        .unwrap()
}

#[test]
fn loads_file_from_disk() {
    let dataset = load(30);
    assert_eq!(dataset.num_samples(), 30);
    assert_eq!(dataset.schema_version(), SCHEMA_VERSION);
    assert_eq!(dataset.targets().dim(), (30, 3));
}

#[test]
fn tree_learns_deterministic_counts() {
    let dataset = load(84);
    let mut experiment = ExperimentBuilder::new()
        .model("tree")
        .split(PositionalSplit::new(70))
        .prediction_mode(PredictionMode::Rounded)
        .build()
        .unwrap();

    let outcome = experiment.run(&dataset).unwrap();
    assert_eq!(outcome.predicted.dim(), (14, 3));
    assert_eq!(outcome.actual.dim(), (14, 3));
    assert_eq!(outcome.info.train_samples, 70);
    assert_eq!(outcome.info.num_features, 7 + 6 + 4 + 7);

    let correlation = outcome.evaluate_correlation().unwrap();
    for class in correlation.iter() {
        assert!(class.coefficient > 0.8, "{}: r = {}", class.class, class.coefficient);
    }

    let rates = outcome.evaluate_rates().unwrap();
    assert_eq!(rates.classes.len(), 3);
    for class in rates.iter() {
        assert!(class.false_negative_rate.unwrap() <= 1.0);
    }

    let names = experiment.feature_names().unwrap();
    assert_eq!(names[0], "zurich_class=A");
    assert_eq!(names.len(), outcome.info.num_features);
}

#[test]
fn mlp_runs_with_shuffled_split() {
    let dataset = load(40);
    let mut experiment = ExperimentBuilder::new()
        .model("mlp")
        .model_param("epochs", "50")
        .model_param("hidden_units", "8")
        .split(ShuffledSplit::new(0.75, 11).unwrap())
        .build()
        .unwrap();

    let outcome = experiment.run(&dataset).unwrap();
    assert_eq!(outcome.predicted.dim(), (10, 3));
    assert!(outcome.predicted.iter().all(|v| v.is_finite()));

    let report = outcome.evaluate(EvaluationMode::Rates).unwrap();
    assert_eq!(report.mode(), EvaluationMode::Rates);
    let text = render(&report, ReportFormat::Text).unwrap();
    assert!(text.contains("fn_rate"));
}

#[test]
fn json_config_drives_experiment() {
    let dataset = load(50);
    let config = ExperimentConfig::from_json(
        r#"{"model": "tree", "split": {"policy": "positional", "train_rows": 40}, "rounded": true}"#,
    )
    .unwrap();
    let outcome = config.build().unwrap().run(&dataset).unwrap();

    assert_eq!(outcome.info.test_samples, 10);
    assert_eq!(outcome.info.prediction_mode, "rounded");
    assert!(outcome.predicted.iter().all(|v| v.fract() == 0.0 && *v >= 0.0));
}

#[test]
fn split_larger_than_dataset_fails() {
    let dataset = load(10);
    let mut experiment = ExperimentBuilder::new()
        .model("tree")
        .split(PositionalSplit::new(10))
        .build()
        .unwrap();
    assert!(experiment.run(&dataset).is_err());
}
