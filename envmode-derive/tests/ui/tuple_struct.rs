// Tuple struct fields have no names to derive keys from

use envmode::Populate;

#[derive(Populate)]
struct Pair(String, u16);

fn main() {}
