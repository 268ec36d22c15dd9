//! Example demonstrating key prefixes

use envmode::{Config, Mode, Populate};

#[derive(Debug, Default, Populate)]
struct DatabaseConfig {
    #[env(name = "URL")]
    pub url: String,

    #[env(default = 10)]
    pub pool_size: u32,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables with prefix
    std::env::set_var("MYAPP_API_KEY", "secret-key-123");
    std::env::set_var("MYAPP_PORT", "3000");
    std::env::set_var("MYAPP_DB_URL", "postgres://localhost/db");
    std::env::set_var("MYAPP_DB_POOL_SIZE", "32");

    let config = Config::builder()
        .mode(Mode::Development)
        .prefix("MYAPP_")
        .build()?;

    // Looked up as MYAPP_API_KEY and MYAPP_PORT
    println!("Configuration with prefix '{}':", config.prefix());
    println!("  API Key: {}", config.get("API_KEY"));
    println!("  Port: {}", config.get_int_or("PORT", 8080)?);

    // Derived configs share the mode and narrow the prefix
    let db = config.with_prefix("MYAPP_DB_");
    let mut database = DatabaseConfig::default();
    db.parse(&mut database)?;

    println!("Database configuration with prefix '{}':", db.prefix());
    println!("  URL: {}", database.url);
    println!("  Pool Size: {}", database.pool_size);

    Ok(())
}
