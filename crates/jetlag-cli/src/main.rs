//! `jetlag` CLI — compute, describe, and export circadian-adaptation plans
//! from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Compute a plan (JSON on stdout)
//! jetlag plan --origin-tz America/Los_Angeles --destination-tz Asia/Tokyo \
//!   --departure 2025-10-15T18:00:00-07:00 --arrival 2025-10-16T21:00:00+09:00
//!
//! # Explain the shift in plain language
//! jetlag describe --origin-tz America/Los_Angeles --destination-tz Asia/Tokyo \
//!   --departure 2025-10-15T18:00:00-07:00 --arrival 2025-10-16T21:00:00+09:00
//!
//! # Export a stored plan to an iCalendar file
//! jetlag plan ... | jetlag export --flight-id ABC123 -o plan.ics
//! ```

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use jetlag_engine::{
    describe, export_to_calendar, plan_filename, plan_trip, resolve_shift, JetlagPlan,
    SynthesisOptions, TripContext,
};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "jetlag",
    version,
    about = "Circadian-adaptation planner for flight itineraries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// The flight leg every subcommand works from.
#[derive(Args)]
struct TripArgs {
    /// Origin IANA timezone (e.g., "America/Los_Angeles")
    #[arg(long)]
    origin_tz: String,
    /// Destination IANA timezone (e.g., "Asia/Tokyo")
    #[arg(long)]
    destination_tz: String,
    /// Departure instant, RFC 3339 (e.g., "2025-10-15T18:00:00-07:00")
    #[arg(long)]
    departure: String,
    /// Arrival instant, RFC 3339
    #[arg(long)]
    arrival: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a jetlag plan and print it as JSON
    Plan {
        #[command(flatten)]
        trip: TripArgs,
        /// Exclude meal nudges from the plan
        #[arg(long)]
        no_meals: bool,
        /// Exclude exercise nudges from the plan
        #[arg(long)]
        no_exercise: bool,
        /// Exclude caffeine nudges from the plan
        #[arg(long)]
        no_caffeine: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Describe the required adaptation in plain language
    Describe {
        #[command(flatten)]
        trip: TripArgs,
    },
    /// Export a stored plan (JSON) to iCalendar text
    Export {
        /// Flight identifier used for deterministic event UIDs
        #[arg(long)]
        flight_id: String,
        /// Origin station code for the suggested filename (e.g., "LAX")
        #[arg(long)]
        origin: Option<String>,
        /// Destination station code for the suggested filename (e.g., "NRT")
        #[arg(long)]
        dest: Option<String>,
        /// Departure instant for the suggested filename, RFC 3339
        #[arg(long)]
        departure: Option<String>,
        /// Input plan JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            trip,
            no_meals,
            no_exercise,
            no_caffeine,
            output,
        } => {
            let trip = build_trip(&trip)?;
            let options = SynthesisOptions {
                include_meals: !no_meals,
                include_exercise: !no_exercise,
                include_caffeine: !no_caffeine,
            };
            let plan = plan_trip(&trip, &options);
            let json =
                serde_json::to_string_pretty(&plan).context("Failed to serialize the plan")?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Describe { trip } => {
            let trip = build_trip(&trip)?;
            let message = describe(&resolve_shift(&trip));
            println!("{} ({})", message.headline, message.difficulty);
            println!("{}", message.detail);
            if let Some(note) = message.direction_note {
                println!("Note: {}", note);
            }
        }
        Commands::Export {
            flight_id,
            origin,
            dest,
            departure,
            input,
            output,
        } => {
            let stored = read_input(input.as_deref())?;
            let plan = match JetlagPlan::from_json(&stored) {
                Some(plan) => plan,
                None => bail!("no plan available: stored plan text is malformed; regenerate the plan"),
            };
            let ics = export_to_calendar(&plan, &flight_id)
                .context("Failed to export the plan to iCalendar")?;

            if let (Some(origin), Some(dest), Some(departure)) = (origin, dest, departure) {
                let departure = parse_instant(&departure)?;
                eprintln!("filename: {}", plan_filename(&origin, &dest, departure));
            }
            write_output(output.as_deref(), &ics)?;
        }
    }

    Ok(())
}

fn build_trip(args: &TripArgs) -> Result<TripContext> {
    let departure = parse_instant(&args.departure)?;
    let arrival = parse_instant(&args.arrival)?;
    TripContext::new(&args.origin_tz, &args.destination_tz, departure, arrival)
        .context("Failed to build the trip context")
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid RFC 3339 instant: {}", s))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
