// Enums have no fields to populate

use envmode::Populate;

#[derive(Populate)]
enum Mode { Production, Staging }

fn main() {}
