pub(crate) mod cli;

use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use core_extensions::{Deconstruct, MappedSliceExt, RowMapper, TvpExt, row_entity};
use core_rowstore::{RowStore, Schema, Value};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

const TARGETS: [&str; 3] = ["rowmap_bench", "core_extensions", "core_rowstore"];

#[derive(Debug, Default, Clone)]
struct Order {
    id: i64,
    customer: String,
    note: Option<String>,
    total: f64,
    placed_at: DateTime<Utc>,
    reference: Uuid,
}

row_entity!(Order {
    id,
    customer,
    note,
    total,
    placed_at,
    reference,
});

#[allow(clippy::expect_used, clippy::print_stdout)]
fn main() {
    dotenv().ok();

    let opts = cli::CliOpts::parse();
    setup_tracing(&opts);

    let config = opts.parallel_config();
    tracing::info!(?config, rows = opts.rows, "starting row mapping run");
    let mapper = RowMapper::new(config).expect("Failed to build row mapper");

    let rows = synthetic_orders(opts.rows);

    let started = Instant::now();
    let orders: Vec<Order> = mapper.to_object_array(&rows);
    tracing::info!(
        mapped = orders.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "to_object_array"
    );

    let started = Instant::now();
    let totals = mapper.to_mapped_object_array(&rows, |row| {
        row.get_as::<f64>("total").unwrap_or_default()
    });
    tracing::info!(
        mapped = totals.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "to_mapped_object_array"
    );

    let ids: Vec<i64> = orders.to_mapped_object_array(|order| order.id);
    let tvp = ids.as_tvp("dbo.BigIntList").expect("Failed to build TVP");
    tracing::info!(
        name = tvp.name(),
        rows = tvp.row_count(),
        columns = tvp.column_count(),
        "as_tvp"
    );

    match orders.deconstruct::<3>() {
        Ok([first, second, third]) => tracing::info!(
            first = first.id,
            customer = %first.customer,
            placed_at = %first.placed_at,
            reference = %first.reference,
            second = second.id,
            third = third.id,
            "deconstructed first orders"
        ),
        Err(err) => tracing::warn!("{err}"),
    }

    let with_notes = orders.iter().filter(|order| order.note.is_some()).count();
    let order_total: f64 = orders.iter().map(|order| order.total).sum();
    let row_total: f64 = totals.iter().sum();
    if (order_total - row_total).abs() > f64::EPSILON {
        tracing::warn!(order_total, row_total, "mapped totals disagree");
    }
    println!(
        "mapped {} orders ({with_notes} with notes, total {order_total:.2})",
        orders.len()
    );
}

fn synthetic_orders(count: usize) -> Vec<RowStore> {
    let schema = Arc::new(Schema::new([
        "id",
        "customer",
        "note",
        "total",
        "placed_at",
        "reference",
        "warehouse",
    ]));
    let epoch = Utc::now();
    RowStore::batch(
        &schema,
        (0..count).map(|i| {
            let id = i64::try_from(i).unwrap_or(i64::MAX);
            vec![
                Value::Int64(id),
                Value::from(format!("customer-{}", i % 97)),
                Value::from((i % 5 == 0).then(|| format!("note for order {i}"))),
                Value::Int32(i32::try_from(i % 1_000).unwrap_or_default()),
                Value::Timestamp(epoch - Duration::seconds(id)),
                Value::Uuid(Uuid::new_v4()),
                Value::from("main"),
            ]
        }),
    )
}

fn setup_tracing(opts: &cli::CliOpts) {
    let default_level = LevelFilter::from(opts.tracing_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(match std::env::var("RUST_LOG") {
                    Ok(val) => match val.parse::<Targets>() {
                        Ok(log_targets_from_env) => log_targets_from_env,
                        Err(err) => {
                            eprintln!("Failed to parse RUST_LOG: {err:?}");
                            Targets::default()
                                .with_targets(targets_with_level(LevelFilter::DEBUG))
                                .with_default(LevelFilter::DEBUG)
                        }
                    },
                    _ => Targets::default()
                        .with_targets(targets_with_level(default_level))
                        .with_default(LevelFilter::WARN),
                }),
        )
        .init();
}

fn targets_with_level(level: LevelFilter) -> Vec<(&'static str, LevelFilter)> {
    TARGETS.iter().map(|target| (*target, level)).collect()
}
