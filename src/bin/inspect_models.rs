// Load the model artifacts and run a sample field reading through them.
//
// Usage: MODEL_DIR=models cargo run --bin inspect_models

use avani_crop_advisor::features::FEATURE_NAMES;
use avani_crop_advisor::{crop_name, Classifier, ModelBundle, ServerConfig};

fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    println!("\n=== INSPECTING MODELS IN {} ===\n", config.model_dir.display());

    let bundle = ModelBundle::load(&config.model_dir)?;

    // 1. Classes and their crop names
    let classes = bundle.classifier().classes();
    println!("Classifier covers {} classes:", classes.len());
    let mut unknown = 0;
    for code in classes {
        let name = crop_name(*code);
        if name == avani_crop_advisor::crops::UNKNOWN_CROP {
            unknown += 1;
        }
        println!("  {:>3} -> {}", code, name);
    }
    if unknown > 0 {
        println!("WARNING: {} class codes have no crop name", unknown);
    }

    // 2. Scaler parameters per feature
    let scaling = bundle.scaling();
    println!("\nScaler parameters:");
    println!("  {:<12} {:>10} {:>10} {:>10} {:>10}", "feature", "min", "max", "mean", "std");
    for (i, name) in FEATURE_NAMES.iter().enumerate() {
        println!(
            "  {:<12} {:>10.3} {:>10.3} {:>10.4} {:>10.4}",
            name,
            scaling.min_max.data_min[i],
            scaling.min_max.data_max[i],
            scaling.standard.mean[i],
            scaling.standard.scale[i],
        );
    }

    // 3. Sample reading
    let sample = serde_json::json!({
        "N": 90, "P": 42, "K": 43,
        "temperature": 20.8, "humidity": 82, "ph": 6.5, "rainfall": 202.9,
        "soil_type": "loamy"
    });
    println!("\nSample input: {}", sample);

    let recommendation = bundle.recommend(&sample)?;
    println!(
        "Recommended: {} ({:.2}%)",
        recommendation.recommended_crop, recommendation.confidence
    );
    for (rank, entry) in recommendation.top_recommendations.iter().enumerate() {
        println!("  {}. {} ({:.2}%)", rank + 1, entry.crop, entry.confidence);
    }

    Ok(())
}
