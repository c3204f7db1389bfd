use rust_rbm::config::{load_config, RbmConfig};
use rust_rbm::dataset::{load_iris_csv, scale_features, species_name, validate_samples, Sample};
use rust_rbm::discretizer::{encode_visible, raw_feature_count, QuantileThresholds};
use rust_rbm::rbm::{CdTrainer, Rbm};
use rust_rbm::utils::SeededRng;
use std::process;
use tracing_subscriber::EnvFilter;

// RBM over the discretized Iris features plus a one-hot species label.
// Raw measurements are in centimetres; dividing by 10 brings them near [0, 1].
const FEATURE_SCALE: f64 = 10.0;

// One row per visible unit, 4 decimals.
fn format_weights(rbm: &Rbm) -> String {
    (0..rbm.num_visible())
        .map(|i| {
            let row: Vec<String> = rbm
                .weight_row(i)
                .iter()
                .map(|w| format!("{:.4}", w))
                .collect();
            format!("[ {} ]", row.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_biases(rbm: &Rbm) -> String {
    let mut out = String::from("Visible Biases (b):\n");
    for (i, b) in rbm.visible_bias().iter().enumerate() {
        out.push_str(&format!("b[{}] = {:.4}\n", i, b));
    }
    out.push_str("\nHidden Biases (c):\n");
    for (j, c) in rbm.hidden_bias().iter().enumerate() {
        out.push_str(&format!("c[{}] = {:.4}\n", j, c));
    }
    out
}

fn format_two_decimals(values: &[f64]) -> String {
    let formatted: Vec<String> = values.iter().map(|v| format!("{:.2}", v)).collect();
    format!("[{}]", formatted.join(", "))
}

fn config_from_args(args: &[String]) -> RbmConfig {
    match args.get(2) {
        Some(path) => load_config(path).unwrap_or_else(|e| {
            eprintln!("Could not load config {}: {}", path, e);
            process::exit(1);
        }),
        None => RbmConfig {
            seed: Some(42),
            ..RbmConfig::default()
        },
    }
}

fn load_samples(path: &str) -> Vec<Sample> {
    let raw = load_iris_csv(path).unwrap_or_else(|e| {
        eprintln!("Could not load dataset {}: {}", path, e);
        process::exit(1);
    });
    scale_features(&raw, FEATURE_SCALE).unwrap_or_else(|e| {
        eprintln!("Could not scale dataset: {}", e);
        process::exit(1);
    })
}

fn run(config: &RbmConfig, samples: &[Sample]) -> rust_rbm::Result<()> {
    let mut picker = SeededRng::from_optional_seed(config.seed.map(|s| s.wrapping_add(1)));
    let random_index = picker.gen_usize(samples.len());
    println!("randomIndex = {}", random_index);

    let sample = &samples[random_index];
    println!("Random Sample Data: {}", format_two_decimals(&sample.features));

    let num_raw_features = raw_feature_count(config.num_visible_features)?;
    validate_samples(samples, num_raw_features, config.num_classes)?;
    let thresholds = QuantileThresholds::fit(samples, num_raw_features)?;
    let full_sample = encode_visible(&thresholds, sample, config.num_classes)?;

    let mut rbm = Rbm::from_config(config)?;
    println!("RBM initialized.");
    println!("Initial Weights (W):\n{}", format_weights(&rbm));

    let before = rbm.infer(&full_sample)?;
    println!("Hidden Sample: {}", format_two_decimals(&before.hidden_sample));
    println!(
        "Predicted Species (before training): {}",
        species_name(before.predicted_class)
    );
    println!("Random Sample True Species: {}", species_name(sample.label));

    let trainer = CdTrainer::from_config(config)?;
    let reports = trainer.train(&mut rbm, samples)?;
    println!("RBM trained.");
    if let Some(last) = reports.last() {
        println!(
            "Final epoch {} reconstruction error: {:.2}",
            last.epoch, last.reconstruction_error
        );
    }

    let after = rbm.infer(&full_sample)?;
    println!("Final Weights (W):\n{}", format_weights(&rbm));
    println!("\nFinal Biases after training:\n{}", format_biases(&rbm));
    println!(
        "Predicted Species (after training): {}",
        species_name(after.predicted_class)
    );

    let accuracy = rbm.accuracy(samples, &thresholds)?;
    println!("Accuracy (class units unclamped): {:.2}%", accuracy * 100.0);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(data_path) = args.get(1) else {
        eprintln!("Usage: {} <iris.csv> [config.json]", args[0]);
        process::exit(1);
    };

    let config = config_from_args(&args);
    let samples = load_samples(data_path);

    if let Err(e) = run(&config, &samples) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_rbm::rbm::RbmShape;

    fn small_model() -> Rbm {
        Rbm::from_parameters(
            RbmShape::new(0, 2, 2),
            vec![0.5, -0.25, 0.0, 1.0],
            vec![0.1, -0.2],
            vec![0.0, 0.3],
            SeededRng::new(1),
        )
        .unwrap()
    }

    #[test]
    fn test_format_weights_rows() {
        let rbm = small_model();
        assert_eq!(
            format_weights(&rbm),
            "[ 0.5000 -0.2500 ]\n[ 0.0000 1.0000 ]"
        );
    }

    #[test]
    fn test_format_biases() {
        let rbm = small_model();
        let text = format_biases(&rbm);
        assert!(text.contains("b[1] = -0.2000"));
        assert!(text.contains("c[1] = 0.3000"));
    }

    #[test]
    fn test_format_two_decimals() {
        assert_eq!(format_two_decimals(&[0.514, 0.3, 2.0]), "[0.51, 0.30, 2.00]");
    }

    #[test]
    fn test_default_config_without_args() {
        let args = vec!["iris_rbm".to_string(), "iris.csv".to_string()];
        let config = config_from_args(&args);
        assert_eq!(config.num_visible(), 15);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_run_on_tiny_dataset() {
        let samples = vec![
            Sample::new(vec![0.51, 0.35, 0.14, 0.02], 0),
            Sample::new(vec![0.70, 0.32, 0.47, 0.14], 1),
            Sample::new(vec![0.63, 0.33, 0.60, 0.25], 2),
        ];
        let config = RbmConfig {
            epochs: 3,
            batch_size: 2,
            seed: Some(5),
            ..RbmConfig::default()
        };
        assert!(run(&config, &samples).is_ok());
    }

    #[test]
    fn test_run_rejects_non_finite_feature() {
        let samples = vec![
            Sample::new(vec![0.51, 0.35, 0.14, 0.02], 0),
            Sample::new(vec![0.70, f64::NAN, 0.47, 0.14], 1),
        ];
        let config = RbmConfig {
            epochs: 1,
            seed: Some(5),
            ..RbmConfig::default()
        };
        assert!(run(&config, &samples).is_err());
    }
}
