#![deny(warnings)]

//! Headless CLI driving the governance simulation: builds the default
//! scenario, takes a few sample decisions, and runs the scheduler for a
//! number of simulated years.

use anyhow::Result;
use rust_decimal::Decimal;
use statecraft_engine::{data, Engine, SimConfig, TracingSink};
use statecraft_runtime::{scheduler, Clock};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Args {
    years: u32,
    seed: u64,
    /// Annual budget in billion euro.
    budget: i64,
    tick_ms: u64,
    jump_legislature: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        years: 4,
        seed: 42,
        budget: 25,
        tick_ms: 2,
        jump_legislature: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--years" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    args.years = v;
                }
            }
            "--seed" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    args.seed = v;
                }
            }
            "--budget" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    args.budget = v;
                }
            }
            "--tick-ms" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    args.tick_ms = v;
                }
            }
            "--jump-legislature" => args.jump_legislature = true,
            _ => {}
        }
    }
    args
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();
    info!(
        git_sha = env!("GIT_SHA"),
        years = args.years,
        seed = args.seed,
        "starting statecraft CLI"
    );

    let config = SimConfig {
        rng_seed: args.seed,
        annual_budget: Decimal::new(args.budget, 0),
        ..SimConfig::default()
    };
    let engine = Engine::new(
        data::default_catalog(),
        data::default_metrics(),
        data::default_coalition(),
        config,
    )?
    .with_sink(TracingSink);
    let start_year = engine.date().year;

    let (handle, task) = scheduler::spawn(
        engine,
        Duration::from_millis(args.tick_ms),
        Clock::system(),
    );

    // A small opening program so reports have something to grade.
    handle
        .make_decision("climate_investment_program", &["solar_expansion"])
        .await?;
    handle
        .make_decision("digital_administration", &["federal_cloud"])
        .await?;

    if args.jump_legislature {
        handle.jump_to_legislature_end().await?;
    } else {
        handle.set_running(true).await?;
        let target_year = start_year + args.years as i32;
        loop {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let state = handle.snapshot().await?;
            if state.game_over || state.date.year >= target_year {
                break;
            }
        }
        handle.set_running(false).await?;
    }

    let played = handle.elapsed().await?;
    handle.shutdown().await?;
    let engine = task.await?;

    for (year, report) in engine.yearly_reports() {
        println!(
            "{} | grade: {} | decisions: {} | major events: {} | approval: {:.1}%{}",
            year,
            report.grade,
            report.decisions_count,
            report.major_events.len(),
            report.public_approval,
            if report.skipped { " | skipped" } else { "" }
        );
        for recommendation in &report.recommendations {
            println!("    hint: {recommendation}");
        }
    }
    println!(
        "Final | date: {} | rating: {:.1} | budget: {} bn | debt: {} bn | interest: {}% | events: {} | play time: {}s",
        engine.date(),
        engine.metrics().value("overall_rating").unwrap_or(0.0),
        engine.ledger().budget,
        engine.ledger().debt,
        engine.ledger().interest_rate,
        engine.event_log().len(),
        played.as_secs()
    );

    Ok(())
}
