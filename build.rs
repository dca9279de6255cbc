// build.rs
use cargo_metadata::MetadataCommand;
use std::collections::HashSet;
use std::env;

fn main() {
    // Détection des features
    let parallel = env::var("CARGO_FEATURE_PARALLEL").is_ok();

    if parallel {
        println!("cargo:warning=🟢 Compilation avec rayon activé (feature = \"parallel\")");
    }

    // Récupère la metadata du projet
    let metadata = MetadataCommand::new()
        .exec()
        .expect("cargo metadata failed");

    // Ensemble des crates qui nous intéressent
    let tracked = HashSet::from(["glfw", "gl", "glam"]);

    for package in &metadata.packages {
        if tracked.contains(package.name.as_str()) {
            println!(
                "cargo:rustc-env={}={}",
                package.name.to_uppercase(),
                package.version
            );
        }
    }
}
