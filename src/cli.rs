use std::env;

use serde::Serialize;

use crate::config::{load_config_or_default, EngineConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use crate::data::loader::{load_islands, usable_islands};
use crate::data::validate::{validate_islands, Level};
use crate::data::Island;
use crate::error::{crew_from_signed, AllocationError};
use crate::navigator::{Assignment, CrewAllocator, DailyRaidSimulator, IdleReason};

const USAGE: &str = "usage: plunder <select|batch|simulate|validate>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select,
    Batch,
    Simulate,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("select") => Some(Command::Select),
        Some("batch") => Some(Command::Batch),
        Some("simulate") => Some(Command::Simulate),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };

    let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match load_config_or_default(&config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error ({config_path}): {err}");
            return 1;
        }
    };

    match command {
        Command::Select => handle_select(args, config),
        Command::Batch => handle_batch(args, config),
        Command::Simulate => handle_simulate(args, config),
        Command::Validate => handle_validate(args, config),
    }
}

#[derive(Debug, Serialize)]
struct PlanEntry<'a> {
    island: &'a str,
    crew_sent: u32,
}

#[derive(Debug, Serialize)]
struct RaidEntry<'a> {
    pirate: usize,
    island: Option<&'a str>,
    crew_sent: u32,
    plunder: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    idle: Option<IdleReason>,
}

fn handle_select(args: &[String], config: EngineConfig) -> i32 {
    let (Some(path), Some(crew)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: plunder select <islands.json|csv> <crew>");
        return 2;
    };
    let crew = match parse_crew(crew) {
        Ok(crew) => crew,
        Err(code) => return code,
    };
    let Some(islands) = read_islands(path) else {
        return 1;
    };

    let allocator = match CrewAllocator::with_config(islands, crew, config) {
        Ok(allocator) => allocator,
        Err(err) => {
            eprintln!("select failed: {err}");
            return 1;
        }
    };
    let plan = allocator.select_islands();
    let entries: Vec<PlanEntry<'_>> = plan
        .iter()
        .filter_map(|assignment| {
            allocator.island(assignment.island).map(|island| PlanEntry {
                island: &island.name,
                crew_sent: assignment.crew_sent,
            })
        })
        .collect();
    print_json(&entries)
}

fn handle_batch(args: &[String], config: EngineConfig) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: plunder batch <islands.json|csv> <crew>...");
        return 2;
    };
    let mut sizes = Vec::with_capacity(args.len().saturating_sub(3));
    for raw in &args[3..] {
        match parse_crew(raw) {
            Ok(size) => sizes.push(size),
            Err(code) => return code,
        }
    }
    let Some(islands) = read_islands(path) else {
        return 1;
    };

    match CrewAllocator::with_config(islands, 0, config) {
        Ok(allocator) => print_json(&allocator.select_islands_from_crew_numbers(&sizes)),
        Err(err) => {
            eprintln!("batch failed: {err}");
            1
        }
    }
}

fn handle_simulate(args: &[String], config: EngineConfig) -> i32 {
    let (Some(path), Some(pirates), Some(crew)) = (args.get(2), args.get(3), args.get(4)) else {
        eprintln!("usage: plunder simulate <islands.json|csv> <pirates> <crew> [days]");
        return 2;
    };
    let Ok(pirates) = pirates.parse::<usize>() else {
        eprintln!("invalid pirates '{pirates}'");
        return 2;
    };
    let crew = match parse_crew(crew) {
        Ok(crew) => crew,
        Err(code) => return code,
    };
    let days = match args.get(5).map(|raw| raw.parse::<usize>()) {
        None => 1,
        Some(Ok(days)) => days,
        Some(Err(_)) => {
            eprintln!("invalid days '{}'", args[5]);
            return 2;
        }
    };
    let Some(islands) = read_islands(path) else {
        return 1;
    };

    let mut simulator = DailyRaidSimulator::with_config(pirates, config);
    simulator.add_islands(islands);
    let days = simulator.simulate_days(crew, days);

    let report: Vec<Vec<RaidEntry<'_>>> = days
        .iter()
        .map(|day| {
            day.iter()
                .enumerate()
                .map(|(pirate, assignment)| raid_entry(&simulator, pirate, assignment))
                .collect()
        })
        .collect();
    print_json(&report)
}

fn handle_validate(args: &[String], config: EngineConfig) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: plunder validate <islands.json|csv>");
        return 2;
    };
    let raw = match load_islands(path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };

    let report = validate_islands(&raw, config.raid_ratio_threshold);
    for finding in report.findings() {
        eprintln!("- {finding}");
    }
    if report.has_errors() {
        eprintln!(
            "validation failed: {} error(s), {} warning(s)",
            report.tally(Level::Error),
            report.tally(Level::Warning)
        );
        1
    } else {
        println!("validation passed: {path} ({} islands)", raw.len());
        0
    }
}

fn raid_entry<'a>(
    simulator: &'a DailyRaidSimulator,
    pirate: usize,
    assignment: &Assignment,
) -> RaidEntry<'a> {
    match *assignment {
        Assignment::Raid {
            island,
            crew_sent,
            plunder,
        } => RaidEntry {
            pirate,
            island: simulator.island(island).map(|island| island.name.as_str()),
            crew_sent,
            plunder,
            idle: None,
        },
        Assignment::Idle { reason } => RaidEntry {
            pirate,
            island: None,
            crew_sent: 0,
            plunder: 0.0,
            idle: Some(reason),
        },
    }
}

fn parse_crew(raw: &str) -> Result<u32, i32> {
    let value = raw.parse::<i64>().map_err(|_| {
        eprintln!("invalid crew '{raw}'");
        2
    })?;
    crew_from_signed(value).map_err(|err: AllocationError| {
        eprintln!("{err}");
        2
    })
}

fn read_islands(path: &str) -> Option<Vec<Island>> {
    match load_islands(path) {
        Ok(raw) => Some(usable_islands(raw)),
        Err(err) => {
            eprintln!("{err}");
            None
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize result: {err}");
            1
        }
    }
}
