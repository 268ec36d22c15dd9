//! Example demonstrating mode detection and `.env` overlays

use envmode::{Config, Mode, MODE_VAR};

fn main() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    std::fs::write(dir.path().join(".env"), "GREETING=hello from production\n")?;
    std::fs::write(
        dir.path().join(".env.staging"),
        "GREETING=hello from staging\nFEATURE_FLAGS=beta,dark-mode\n",
    )?;

    // APP_ENV wins over file detection
    std::env::set_var(MODE_VAR, "staging");
    let config = Config::builder().dir(dir.path()).build()?;

    println!("Detected mode: {}", config.mode());
    println!("  Overlay: {}", config.overlay_path().display());
    println!("  Greeting: {}", config.get("GREETING"));
    println!("  Feature Flags: {:?}", config.get_list("FEATURE_FLAGS", ","));
    println!("  Staging: {}", config.is_staging());

    // Overlays never override variables that are already set
    let production = config.with_mode(Mode::Production);
    production.load()?;
    println!("After loading {}:", production.overlay_path().display());
    println!("  Greeting: {}", production.get("GREETING"));

    // Unknown modes are rejected
    std::env::set_var(MODE_VAR, "qa");
    if let Err(e) = Config::builder().dir(dir.path()).build() {
        println!("Error: {e}");
    }

    Ok(())
}
