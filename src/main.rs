// Demo runner: sorts a simulated browser window with the default categories.
// Real deployments supply their own TabHost; this binary stands in for the
// presentation layer and only consumes the summary rows and the report.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use tab_sorter::{
    CategoryRegistry, GroupResult, MemoryHost, Tab, TabId, TabSortEngine, WindowId,
};

fn sample_tab(id: i64, url: &str) -> Tab {
    Tab {
        id: TabId(id),
        url: if url.is_empty() {
            None
        } else {
            Some(url.to_string())
        },
        window_id: WindowId(1),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🔄 Tab Sorter v{}", tab_sorter::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // A simulated window with a mixed set of open tabs
    let host = MemoryHost::with_tabs(vec![
        sample_tab(1, "https://youtube.com/watch?v=abc"),
        sample_tab(2, "https://github.com/rust-lang/rust"),
        sample_tab(3, "https://store.steampowered.com/app/400"),
        sample_tab(4, "https://en.wikipedia.org/wiki/Rust"),
        sample_tab(5, "https://aliexpress.com/item/99"),
        sample_tab(6, "https://example.org"),
        sample_tab(7, ""),
    ]);

    let registry = CategoryRegistry::with_defaults();
    let selected: Vec<String> = registry.all_ids().iter().map(|s| s.to_string()).collect();
    let engine = TabSortEngine::new(registry, host);

    println!("\n⏳ Sorting tabs...");
    let outcome = engine.run(WindowId(1), &selected).await?;

    println!("\n📊 Results:");
    for row in &outcome.summary {
        println!("  {} — {}", row.label, row.count);
    }

    println!("\n🗂️  Groups:");
    for item in &outcome.report.outcomes {
        match &item.result {
            GroupResult::Grouped { group_id, tab_count } => {
                println!("  ✓ {} → {} ({} tabs)", item.category_id, group_id, tab_count);
            }
            GroupResult::Failed { stage, reason } => {
                println!("  ✗ {} failed at {:?}: {}", item.category_id, stage, reason);
            }
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if outcome.is_degraded() {
        println!("⚠️  Tabs sorted with some failures: {}", outcome.report.summary());
    } else {
        println!("✅ Tabs sorted successfully!");
    }

    Ok(())
}
