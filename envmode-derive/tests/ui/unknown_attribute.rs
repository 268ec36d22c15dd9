// Unknown keys inside #[env(...)] are rejected

use envmode::Populate;

#[derive(Populate)]
struct Secrets {
    #[env(from_file)]
    pub api_key: String,
}

fn main() {}
