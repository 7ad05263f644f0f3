//! Renders a keyed list a few times and logs what each pass changed.
//!
//! Run with `RUST_LOG=info` (or `vdom=trace` for every node operation).
//! `VDOM_KEY_MAP=eager` switches the key map strategy.

use anyhow::Result;
use env_logger::init as env_logger_init;
use log::info;
use vdom::{Dom, DomVNode, Mount, Reconciler, ReconcilerConfig, h, text};

fn render(items: &[(u64, &str)]) -> DomVNode {
    h("ul").attr("id", "items").children(
        items
            .iter()
            .map(|(id, label)| h("li").with_key(*id).child(text(*label))),
    )
}

fn main() -> Result<()> {
    env_logger_init();

    let config = ReconcilerConfig::from_env();
    info!("Reconciling with {config:?}");

    let mut dom = Dom::new();
    let placeholder = dom.mount_point("div")?;

    let passes: [&[(u64, &str)]; 4] = [
        &[(1, "apple"), (2, "banana"), (3, "cherry")],
        &[(3, "cherry"), (1, "apple"), (2, "banana")],
        &[(3, "cherry"), (4, "date"), (2, "blueberry")],
        &[],
    ];

    let mut reconciler = Reconciler::with_config(&mut dom, config);
    let mut previous: Option<DomVNode> = None;
    let mut list = placeholder;
    for (pass, items) in passes.iter().enumerate() {
        let mut next = render(items);
        let old = previous.as_ref().map_or(Mount::Node(placeholder), Mount::from);
        list = reconciler.patch(old, &mut next)?;
        let stats = reconciler.take_stats();
        info!(
            "pass {pass}: {} created, {} moved, {} removed, {} replaced, {} patched",
            stats.created, stats.moved, stats.removed, stats.replaced, stats.patched
        );
        info!("  {}", reconciler.target().outer_html(list));
        previous = Some(next);
    }

    let journal = dom.take_mutations();
    info!("{} mutations journaled, last: {:?}", journal.len(), journal.last());
    info!("final document:\n{}", dom.to_json_string());
    info!("root is {:?}, list is {list:?}", dom.root());
    Ok(())
}
