//! Example filling a struct with `#[derive(Populate)]`

use envmode::chrono::TimeDelta;
use envmode::{Config, Mode, Populate};
use std::collections::HashMap;

#[derive(Debug, Default, Populate)]
struct ServerConfig {
    #[env(name = "SERVER_HOST", default = "127.0.0.1")]
    pub host: String,

    #[env(default = 8080)]
    pub port: u16,

    #[env(default = "30s")]
    pub shutdown_timeout: TimeDelta,

    #[env(default = false)]
    pub debug: bool,

    pub allowed_origins: Vec<String>,
    pub labels: HashMap<String, String>,

    // Left as None when unset
    pub worker_threads: Option<usize>,

    // Never read from the environment
    #[env(skip)]
    pub started_at: Option<String>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("PORT", "3000");
    std::env::set_var("DEBUG", "yes");
    std::env::set_var("ALLOWED_ORIGINS", "a.example,b.example");
    std::env::set_var("LABELS", "team:core,tier:backend");

    let config = Config::builder().mode(Mode::Development).build()?;

    let mut server = ServerConfig::default();
    config.parse(&mut server)?;

    println!("Server configuration:");
    println!("  Host: {}", server.host);
    println!("  Port: {}", server.port);
    println!("  Shutdown Timeout: {}s", server.shutdown_timeout.num_seconds());
    println!("  Debug: {}", server.debug);
    println!("  Allowed Origins: {:?}", server.allowed_origins);
    println!("  Labels: {:?}", server.labels);
    println!("  Worker Threads: {:?}", server.worker_threads);
    println!("  Started At: {:?}", server.started_at);

    println!("Fields:");
    for field in ServerConfig::FIELDS {
        println!("  {} <- {} ({})", field.name, field.key, field.kind());
    }

    // Malformed values stop population and name the field
    std::env::set_var("PORT", "http");
    if let Err(e) = config.parse(&mut ServerConfig::default()) {
        println!("Error: {e}");
    }

    Ok(())
}
