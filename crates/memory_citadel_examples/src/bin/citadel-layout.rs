use memory_citadel::prelude::*;
use memory_citadel_examples::{describe_layout, init_tracing};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut citadel = Citadel::with_entitlement(Entitlement::Premium);
    let languages = citadel.create_palace("Languages")?;
    let history = citadel.create_palace("History")?;

    let verbs = citadel.create_wing(languages, "Irregular verbs")?;
    for verb in ["be", "go", "have", "do", "say", "get", "make", "know", "think", "take", "see", "come"] {
        citadel.create_room(verbs, verb, None)?;
    }
    let idioms = citadel.create_wing(languages, "Idioms")?;
    let archived = citadel.create_room(idioms, "break a leg", Some("good luck".into()))?;
    citadel.create_room(idioms, "piece of cake", Some("easy".into()))?;
    citadel.archive_room(archived)?;

    let dates = citadel.create_wing(history, "Dates")?;
    citadel.create_room(dates, "1066", Some("Battle of Hastings".into()))?;
    citadel.create_wing(history, "Empty wing")?;

    let mut sink = VecSink::new();
    citadel.drain_events(&mut sink);
    println!("{} hierarchy event(s)", sink.len());

    let mut cache = BuildingSpecCache::new();
    let mut assembler = CitadelAssembler::try_new(LayoutConfig::default(), &mut cache)?;
    let mut warnings = FilterSink::new(VecSink::new(), [CitadelEventKind::Warning]);
    let result = assembler.assemble_with_events(&citadel, &mut warnings)?;
    info!(
        "Laid out {} building(s) in {} wing(s).",
        result.placements.len(),
        result.wings_visited
    );
    print!("{}", describe_layout(&result));
    for event in warnings.into_inner().into_inner() {
        if let CitadelEvent::Warning { context, message } = event {
            warn!("{context}: {message}");
        }
    }

    // The free tier only shows the first palace.
    citadel.set_entitlement(Entitlement::Free);
    let free = assembler.assemble(&citadel)?;
    info!("Free tier shows {} building(s).", free.placements.len());
    Ok(())
}
