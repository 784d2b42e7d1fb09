use memory_citadel::prelude::*;
use memory_citadel_examples::{describe_blueprint, describe_spec, init_tracing};
use uuid::Uuid;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Pass a room identifier to inspect it, otherwise a fixed one is used.
    let id = match std::env::args().nth(1) {
        Some(text) => Uuid::parse_str(&text)?,
        None => Uuid::parse_str("D6A1F47E-9B1F-4E9E-A2A5-123456789ABC")?,
    };

    let spec = generate_building_spec(&id, 0);
    println!("room {id}");
    print!("{}", describe_spec(&spec));

    let again = generate_building_spec(&id, 0);
    anyhow::ensure!(spec == again, "generation is not reproducible");

    print!("{}", describe_blueprint(&Blueprint::from_spec(&spec)));
    Ok(())
}
