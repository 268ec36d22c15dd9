//! Example demonstrating custom deserializer functions

use envmode::{populate, Populate, ProcessEnv};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Endpoint {
    host: String,
    port: u16,
}

// Custom deserializer for `host:port` pairs
fn host_port(s: &str) -> Result<(String, u16), String> {
    let (host, port) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("missing port in '{s}'"))?;
    let port = port.parse().map_err(|e| format!("bad port '{port}': {e}"))?;
    Ok((host.to_string(), port))
}

#[derive(Debug, Default, Populate)]
struct Config {
    // Built-in coercions
    pub app_name: String,
    pub port: u16,

    // JSON format (serde_json)
    #[env(deserializer = "serde_json::from_str")]
    pub retry_backoff_ms: Vec<u64>,

    #[env(deserializer = "serde_json::from_str")]
    pub upstream: Option<Endpoint>,

    // Custom function
    #[env(deserializer = "host_port")]
    pub metrics_addr: (String, u16),
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_NAME", "my-app");
    std::env::set_var("PORT", "8080");
    std::env::set_var("RETRY_BACKOFF_MS", "[100, 250, 1000]");
    std::env::set_var("UPSTREAM", r#"{"host":"api.internal","port":9443}"#);
    std::env::set_var("METRICS_ADDR", "0.0.0.0:9100");

    let mut config = Config::default();
    populate(&mut config, &ProcessEnv, "")?;

    println!("Configuration loaded:");
    println!("  App Name: {}", config.app_name);
    println!("  Port: {}", config.port);
    println!("  Retry Backoff: {:?}", config.retry_backoff_ms);
    if let Some(upstream) = &config.upstream {
        println!("  Upstream: {}:{}", upstream.host, upstream.port);
    }
    println!("  Metrics: {:?}", config.metrics_addr);

    Ok(())
}
