//! staffing-runner: headless report runner for the staffing engine.
//!
//! Usage:
//!   staffing-runner --seed 42 --people 12 --from 2024-01-01 --weeks 8
//!   staffing-runner --seed 42 --db staffing.db --data-dir ./data

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use staffing_core::{
    calendar::week_start,
    config::StaffingConfig,
    demo,
    engine::StaffingEngine,
    report,
    store::StaffingStore,
};
use std::env;

/// End-of-run summary printed as JSON for scripts that wrap the runner.
#[derive(serde::Serialize)]
struct RunSummary {
    seed: u64,
    people: usize,
    projects: usize,
    assignments: usize,
    work_days: u32,
    holiday_days: u32,
    assigned_days: f64,
    unassigned_days: f64,
    available_capacity_percent: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let people = parse_arg(&args, "--people", 12usize);
    let weeks = parse_arg(&args, "--weeks", 8u32);
    let from_str = args
        .windows(2)
        .find(|w| w[0] == "--from")
        .map(|w| w[1].as_str())
        .unwrap_or("2024-01-01");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str());

    let from = NaiveDate::parse_from_str(from_str, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("--from {from_str}: {e}"))?;

    println!("staffing-runner");
    println!("  seed:    {seed}");
    println!("  people:  {people}");
    println!("  from:    {from}");
    println!("  weeks:   {weeks}");
    println!("  db:      {db}");
    println!();

    let store = if db == ":memory:" {
        StaffingStore::in_memory()?
    } else {
        StaffingStore::open(db)?
    };
    store.migrate()?;

    let config = match data_dir {
        Some(dir) => StaffingConfig::load(dir)?,
        None => StaffingConfig::default(),
    };
    let mut engine = StaffingEngine::new(config, store);

    let data = demo::generate(seed, people, from, weeks);
    log::info!(
        "seeding {} persons, {} projects, {} assignments",
        data.persons.len(),
        data.projects.len(),
        data.assignments.len()
    );
    engine.load_demo_data(&data)?;

    let start = week_start(from);
    let end = start + Duration::days(i64::from(weeks) * 7 - 1);

    let team = engine.team_capacity(start, end)?;
    println!("Team capacity {start} .. {end}");
    println!("  people:             {}", team.persons.len());
    println!("  work days:          {}", team.work_days);
    println!("  holiday days:       {}", team.holiday_days);
    println!("  assigned days:      {:.1}", team.assigned_days);
    println!("  unassigned days:    {:.1}", team.unassigned_days);
    println!(
        "  available capacity: {:.1}%",
        team.available_capacity_percent
    );
    println!();

    let projects = engine.store().list_projects()?;
    let rows = report::allocation_rows(&team, &projects);
    println!("Allocations ({} rows)", rows.len());
    for row in rows.iter().take(10) {
        println!(
            "  {:<20} {:<8} {:>6.1}d",
            row.person_name, row.project_code, row.effective_days
        );
    }
    if rows.len() > 10 {
        println!("  ... {} more", rows.len() - 10);
    }
    println!();

    let table = engine.weekly_staffing(start, end)?;
    let sheet = report::weekly_sheet(&table);
    println!("{}", serde_json::to_string_pretty(&sheet)?);
    println!();

    let summary = RunSummary {
        seed,
        people: team.persons.len(),
        projects: projects.len(),
        assignments: data.assignments.len(),
        work_days: team.work_days,
        holiday_days: team.holiday_days,
        assigned_days: team.assigned_days,
        unassigned_days: team.unassigned_days,
        available_capacity_percent: team.available_capacity_percent,
    };
    println!("{}", serde_json::to_string(&summary)?);

    Ok(())
}

/// Parse "--flag value" with a default. Same shape for every numeric flag.
fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
