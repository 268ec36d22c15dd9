// Defaults are literals coerced like environment values, not expressions

use envmode::Populate;
use std::time::Duration;

#[derive(Populate)]
struct Timeouts {
    #[env(default = Duration::from_secs(60))]
    pub timeout: Duration,
}

fn main() {}
