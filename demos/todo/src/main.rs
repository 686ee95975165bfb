//! Command-line walkthrough of the todo store.
//!
//! Drives a roster screen and an item screen against one shared store and
//! prints the roster every time it changes.
//!
//! # Running the Example
//!
//! ```bash
//! cargo run -p todo-demo
//! cargo run -p todo-demo -- --no-seed
//! RUST_LOG=todo_store_runtime=debug cargo run -p todo-demo -- --metrics 127.0.0.1:9000
//! ```
//!
//! With `--metrics` the demo keeps running after the walkthrough so the
//! Prometheus endpoint can be scraped; press Ctrl+C to exit.

#![allow(missing_docs)]

use anyhow::{Context, bail};
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use todo_store_core::{ItemDraft, ItemRepository, RosterViewState, SystemClock, TodoItem};
use todo_store_runtime::{ItemMotor, RosterMotor, StoreConfig, TodoStore, telemetry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default)]
struct Options {
    seed: bool,
    metrics: Option<SocketAddr>,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut options = Options {
        seed: true,
        metrics: None,
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-seed" => options.seed = false,
            "--metrics" => {
                let addr = args.next().context("--metrics needs an address")?;
                options.metrics = Some(addr.parse().with_context(|| format!("invalid address {addr}"))?);
            },
            other => bail!("unknown argument {other}; expected --no-seed or --metrics <addr>"),
        }
    }

    Ok(options)
}

fn sample_items() -> Vec<TodoItem> {
    let now = Utc::now();
    vec![
        TodoItem::new("Buy a copy of _Exploring Android_", now)
            .with_completed(true)
            .with_notes(Some("See https://wares.commonsware.com".to_string())),
        TodoItem::new("Complete all of the tutorials", now),
        TodoItem::new("Write an app for somebody in my community", now).with_notes(Some(
            "Talk to some people at non-profit organizations to see what they need!".to_string(),
        )),
    ]
}

fn print_roster(state: &RosterViewState) {
    if state.is_empty() {
        println!("  (nothing to do)");
        return;
    }

    for item in state.items.iter() {
        let status = if item.completed { "✓" } else { " " };
        println!("  [{status}] {}", item.description);
        if let Some(notes) = &item.notes {
            println!("        {notes}");
        }
    }
    println!("  Completed: {}/{}", state.completed_count(), state.len());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todo_store_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let options = parse_args()?;

    if let Some(addr) = options.metrics {
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("failed to install Prometheus exporter")?;
        telemetry::describe();
        tracing::info!(%addr, "Prometheus metrics available at /metrics");
    }

    let seed = if options.seed { sample_items() } else { Vec::new() };
    let store = TodoStore::with_config(StoreConfig::default().with_initial_items(seed));
    tracing::info!(items = store.current_items().len(), "Store ready");

    // Roster screen: print every state it observes
    let roster = RosterMotor::new(store.clone());
    let mut states = roster.states();
    let printer = tokio::spawn(async move {
        let state = states.current_and_mark_seen();
        println!("\nRoster (revision {}):", states.revision());
        print_roster(&state);

        while let Ok(state) = states.changed().await {
            println!("\nRoster (revision {}):", states.revision());
            print_roster(&state);
        }
    });

    // Create screen
    let create = ItemMotor::new(store.clone(), None);
    let milk = create.submit(&ItemDraft::new("Buy milk").with_notes("Oat, if they have it"), &SystemClock)?;
    create.flush().await?;
    drop(create);

    // Roster screen toggles the new item
    roster.toggle(&milk)?;
    roster.flush().await?;

    // Edit screen: rename, then delete
    let edit = ItemMotor::new(store.clone(), Some(milk.id));
    let shown = edit
        .states()
        .current()
        .item
        .context("item just created should be visible")?;
    edit.submit(&ItemDraft::from_item(&shown).with_notes(""), &SystemClock)?;
    edit.delete(&shown)?;
    edit.flush().await?;
    drop(edit);

    // Blank descriptions never reach the store
    let invalid = ItemMotor::new(store.clone(), None);
    if let Err(error) = invalid.submit(&ItemDraft::new("   "), &SystemClock) {
        tracing::warn!(%error, "Rejected draft");
    }

    tracing::info!(revision = %store.revision(), items = store.current_items().len(), "Walkthrough complete");

    if options.metrics.is_some() {
        tracing::info!("Press Ctrl+C to exit");
        tokio::signal::ctrl_c().await?;
    }

    // Dropping the last store handle ends the printer
    drop(roster);
    drop(invalid);
    drop(store);
    printer.await?;

    Ok(())
}
