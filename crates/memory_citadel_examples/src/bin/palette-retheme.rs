use memory_citadel::prelude::*;
use memory_citadel_examples::{format_color, init_tracing};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut rng = StdRng::seed_from_u64(2025);
    let mut cache = BuildingSpecCache::new();

    for _ in 0..3 {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        let room = RoomId(Uuid::from_bytes(bytes));

        // Moving a room between wings keeps its shape and swaps only the colors.
        for grouping_index in 0..4 {
            let spec = cache.get_or_generate(room, grouping_index);
            println!(
                "{room} group {grouping_index} ({:?}): walls {}, crown {:?}",
                spec.palette.band,
                format_color(spec.palette.color(StructuralElement::Walls)),
                spec.palette.crown
            );
        }
    }

    let (hits, rethemes, misses) = cache.stats();
    println!("cache: {hits} hit(s), {rethemes} retheme(s), {misses} miss(es)");
    Ok(())
}
