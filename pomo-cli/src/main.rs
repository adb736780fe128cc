use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use pomo_core::{
    generate_task_description, generate_time_blocks, local_to_utc, schedule_tasks, CalendarEvent,
    Chronotype, CognitiveProfile, CognitiveTask, Task,
};

#[derive(Parser, Debug)]
#[command(name = "pomo", version, about = "Pomodoro task parsing and day planning")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse free-text task input into structured attributes
    Parse {
        /// Task text, e.g. "Write report tomorrow at 2pm #important @work ~3"
        text: String,

        /// Emit JSON instead of a readable summary
        #[arg(long)]
        json: bool,

        /// Also render the due date in UTC for this IANA timezone
        #[arg(long)]
        tz: Option<String>,
    },

    /// Schedule tasks from a JSON file into energy-matched blocks for a day
    Plan {
        /// Path to a JSON array of tasks
        #[arg(long)]
        tasks: PathBuf,

        /// Day to plan, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Chronotype preset: early-bird | intermediate | night-owl
        #[arg(long)]
        chronotype: Option<String>,

        /// Path to a JSON array of calendar events blocking time
        #[arg(long)]
        events: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { text, json, tz } => run_parse(&text, json, tz.as_deref()),
        Command::Plan {
            tasks,
            date,
            chronotype,
            events,
        } => run_plan(&tasks, date, chronotype.as_deref(), events.as_deref()),
    }
}

fn run_parse(text: &str, json: bool, tz: Option<&str>) -> Result<()> {
    let now = Local::now().naive_local();
    let parsed = pomo_core::parse(text, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        println!("{}", generate_task_description(&parsed));
    }

    if let (Some(due), Some(tz)) = (parsed.due_date, tz) {
        let utc = local_to_utc(due, tz)
            .with_context(|| format!("converting due date to UTC for {tz}"))?;
        println!("Due (UTC): {}", utc.to_rfc3339());
    }

    Ok(())
}

fn run_plan(
    tasks_path: &Path,
    date: Option<NaiveDate>,
    chronotype: Option<&str>,
    events_path: Option<&Path>,
) -> Result<()> {
    let raw = std::fs::read_to_string(tasks_path)
        .with_context(|| format!("reading {}", tasks_path.display()))?;
    let tasks: Vec<Task> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing tasks from {}", tasks_path.display()))?;

    let profile = match chronotype {
        Some("early-bird") => CognitiveProfile::for_chronotype(Chronotype::EarlyBird),
        Some("intermediate") => CognitiveProfile::for_chronotype(Chronotype::Intermediate),
        Some("night-owl") => CognitiveProfile::for_chronotype(Chronotype::NightOwl),
        Some(other) => bail!("unknown chronotype: {other}"),
        None => CognitiveProfile::default(),
    };

    let events: Vec<CalendarEvent> = match events_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing events from {}", path.display()))?
        }
        None => Vec::new(),
    };

    let day = date.unwrap_or_else(|| Local::now().date_naive());
    let blocks = generate_time_blocks(day, Some(&profile), &events);
    let cognitive: Vec<CognitiveTask> = tasks.into_iter().map(CognitiveTask::derive).collect();
    let scheduled = schedule_tasks(&cognitive, &blocks);

    println!("Planned {} of {} tasks for {}\n", scheduled.len(), cognitive.len(), day);
    for s in &scheduled {
        println!(
            "{} - {}  [{} energy, {} priority]  {}",
            s.time_block.start_time.format("%H:%M"),
            s.time_block.end_time.format("%H:%M"),
            s.task.ideal_energy_level.label(),
            s.task.task.priority.label(),
            s.task.task.title,
        );
    }

    if scheduled.len() < cognitive.len() {
        println!("\n{} task(s) did not fit today", cognitive.len() - scheduled.len());
    }

    Ok(())
}
