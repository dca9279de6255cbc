use log::info;

/// Versions des dépendances principales, figées à la compilation par `build.rs`.
pub fn core_dependency_versions() -> [(&'static str, &'static str); 3] {
    [
        ("GL", option_env!("GL").unwrap_or("Unknown")),
        ("GLFW", option_env!("GLFW").unwrap_or("Unknown")),
        ("GLAM", option_env!("GLAM").unwrap_or("Unknown")),
    ]
}

/// Affiche les informations Rust et les dépendances principales de la compilation.
pub fn show_rust_core_dependencies() {
    // Info système (Rust version, OS)
    info!(
        "Rust compiler version: {}",
        rustc_version_runtime::version()
    );
    info!("  Platform    : {}", std::env::consts::OS);
    info!("  Arch        : {}", std::env::consts::ARCH);
    info!(
        "  Parallel    : {}",
        if cfg!(feature = "parallel") { "rayon" } else { "off" }
    );

    info!("Rust core dependencies");
    for (name, version) in core_dependency_versions() {
        info!("  {:<4} version: {}", name, version);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_rust_core_dependencies_no_panic() {
        show_rust_core_dependencies();
    }

    #[test]
    fn test_core_dependency_versions_are_filled() {
        for (name, version) in core_dependency_versions() {
            assert!(!name.is_empty());
            assert!(!version.is_empty(), "{name} version is empty");
        }
    }
}
