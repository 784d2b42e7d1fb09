use std::thread;

use memory_citadel::prelude::*;
use memory_citadel_examples::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut store = EntitlementStore::default();
    let changes = store.subscribe();
    let mut citadel = Citadel::with_entitlement(store.current());

    citadel.create_palace("First")?;
    match citadel.create_palace("Second") {
        Err(Error::EntitlementRequired(reason)) => println!("blocked: {reason}"),
        other => anyhow::bail!("expected the free tier to block a second palace, got {other:?}"),
    }

    // A payment callback on another thread reports a purchase.
    let tx = store.sender();
    thread::spawn(move || tx.send(TransactionUpdate::Purchased))
        .join()
        .map_err(|_| anyhow::anyhow!("payment thread panicked"))??;

    let mut sink = VecSink::new();
    store.pump_with_events(&mut sink);
    for entitlement in changes.try_iter() {
        citadel.set_entitlement(entitlement);
    }
    citadel.create_palace("Second")?;
    println!("{:?}: {} palace(s) visible", citadel.entitlement(), citadel.palaces().len());

    store.sender().send(TransactionUpdate::Expired)?;
    store.pump();
    for entitlement in changes.try_iter() {
        citadel.set_entitlement(entitlement);
    }
    println!("{:?}: {} palace(s) visible", citadel.entitlement(), citadel.palaces().len());

    for event in sink.into_inner() {
        println!("event: {event:?}");
    }
    Ok(())
}
