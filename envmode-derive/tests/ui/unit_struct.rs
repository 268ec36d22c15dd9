// Unit structs have no fields to populate

use envmode::Populate;

#[derive(Populate)]
struct Marker;

fn main() {}
