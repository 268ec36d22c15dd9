//! Basic usage example

use envmode::chrono::TimeDelta;
use envmode::{Config, Mode};

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("MAX_CONNECTIONS", "25");
    std::env::set_var("REQUEST_TIMEOUT", "1m30s");
    std::env::set_var("ALLOWED_ORIGINS", "https://a.example, https://b.example");

    // No overlay file is needed outside production
    let config = Config::builder().mode(Mode::Development).build()?;

    // Fails if unset
    let database_url = config.key("DATABASE_URL").required().into_string();
    let max_connections = config.key("MAX_CONNECTIONS").int()?;

    // Falls back when unset or malformed
    let port = config.key("PORT").default("8080").int_or(8080);
    let timeout = config
        .key("REQUEST_TIMEOUT")
        .duration_or(TimeDelta::seconds(30));
    let debug = config.get_bool_or("DEBUG", false);
    let origins = config.get_list("ALLOWED_ORIGINS", ",");

    // A strict terminal replays the failure recorded by required()
    if let Err(e) = config.key("API_KEY").required().int() {
        println!("API_KEY: {e}");
    }

    println!("Configuration loaded ({} mode):", config.mode());
    println!("  Database URL: {database_url}");
    println!("  Max Connections: {max_connections}");
    println!("  Port: {port}");
    println!("  Timeout: {}s", timeout.num_seconds());
    println!("  Debug Mode: {debug}");
    println!("  Allowed Origins: {origins:?}");

    Ok(())
}
