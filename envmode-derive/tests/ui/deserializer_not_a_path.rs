// The deserializer must name a function

use envmode::Populate;

#[derive(Populate)]
struct Parsed {
    #[env(deserializer = "|s| s.len()")]
    pub size: usize,
}

fn main() {}
