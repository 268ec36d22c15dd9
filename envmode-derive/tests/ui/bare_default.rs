// A default needs a value

use envmode::Populate;

#[derive(Populate)]
struct Flags {
    #[env(default)]
    pub debug: bool,
}

fn main() {}
