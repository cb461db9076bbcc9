#![allow(dead_code)]

use component_macros::Injectable;

struct Engine;

#[derive(Injectable)]
struct Car {
    #[inject]
    engine: Engine,
}

fn main() {}
