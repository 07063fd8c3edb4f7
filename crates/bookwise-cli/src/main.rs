//! `bookwise` CLI — operate the availability and booking engine from the
//! command line, persisting store state as a JSON snapshot file.
//!
//! ## Usage
//!
//! ```sh
//! # Seed the demo services and weekly schedule
//! bookwise --store shop.json init
//!
//! # Show slots for a date and service
//! bookwise --store shop.json slots --date 2026-03-16 --service 2
//!
//! # Reserve one
//! bookwise --store shop.json book --service 2 --date 2026-03-16 \
//!     --start 10:00 --name "Alice Johnson" --email alice@example.com
//!
//! # Admin workflow
//! bookwise --store shop.json bookings --date 2026-03-16
//! bookwise --store shop.json cancel 1
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bookwise_engine::store::{BookingQuery, NewService, ScheduleStore, ServiceCatalog};
use bookwise_engine::types::{BookingStatus, ClientInfo, WeeklyScheduleEntry};
use bookwise_engine::{BookingStore, Engine, MemoryStore, StoreSnapshot};
use chrono::{NaiveDate, NaiveTime, Weekday};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bookwise",
    version,
    about = "Appointment availability and booking engine CLI"
)]
struct Cli {
    /// Path to the JSON store snapshot
    #[arg(long, default_value = "bookwise.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the store with the demo services and weekly schedule
    Init,
    /// List services
    Services {
        /// Include deactivated services
        #[arg(long)]
        all: bool,
    },
    /// Register a new service
    AddService {
        #[arg(long)]
        name: String,
        /// Appointment length in minutes
        #[arg(long)]
        duration: u32,
        /// Price in cents
        #[arg(long, default_value_t = 0)]
        price: i64,
        #[arg(long)]
        description: Option<String>,
    },
    /// Deactivate a service (soft delete)
    DeactivateService { id: i64 },
    /// Show the weekly open-hours schedule
    Schedule,
    /// Upsert one day's open hours
    SetSchedule {
        /// Day of week (e.g. mon, tuesday)
        #[arg(long, value_parser = parse_weekday)]
        day: Weekday,
        #[arg(long, value_parser = parse_hhmm)]
        open: NaiveTime,
        #[arg(long, value_parser = parse_hhmm)]
        close: NaiveTime,
        /// Keep the entry but mark the day closed
        #[arg(long)]
        off: bool,
    },
    /// List blocked dates
    Blocks,
    /// Block a calendar date (forces zero availability)
    Block {
        date: NaiveDate,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Remove a date-level block
    Unblock { date: NaiveDate },
    /// Show candidate slots for a date and service
    Slots {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        service: i64,
        /// Emit the slot list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reserve a slot
    Book {
        #[arg(long)]
        service: i64,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, value_parser = parse_hhmm)]
        start: NaiveTime,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List bookings, optionally filtered
    Bookings {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        status: Option<BookingStatus>,
    },
    /// Cancel a confirmed booking, releasing its interval
    Cancel { id: i64 },
    /// Mark a confirmed booking as completed
    Complete { id: i64 },
}

fn parse_weekday(s: &str) -> Result<Weekday, String> {
    s.parse::<Weekday>()
        .map_err(|_| format!("unknown weekday: {s}"))
}

fn parse_hhmm(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("expected HH:MM, got: {s}"))
}

fn load_store(path: &Path) -> Result<MemoryStore> {
    if !path.exists() {
        return Ok(MemoryStore::new());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading store file {}", path.display()))?;
    let snapshot: StoreSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("parsing store file {}", path.display()))?;
    Ok(MemoryStore::from_snapshot(snapshot))
}

fn save_store(path: &Path, store: &MemoryStore) -> Result<()> {
    let json = serde_json::to_string_pretty(&store.snapshot())?;
    std::fs::write(path, json).with_context(|| format!("writing store file {}", path.display()))?;
    Ok(())
}

/// The demo dataset: five services and a Mon-Sat week (Sunday kept but off).
fn seed(store: &MemoryStore) -> Result<()> {
    let services = [
        ("Initial Consultation", Some("Free introductory meeting to discuss your needs and goals."), 30, 0),
        ("Strategy Session", Some("In-depth strategy planning session with actionable takeaways."), 60, 7500),
        ("Design Review", Some("Comprehensive review of your current design with improvement suggestions."), 45, 5000),
        ("Full Workshop", Some("Hands-on workshop covering all aspects of your project."), 120, 15000),
        ("Quick Check-in", Some("Brief follow-up session to track progress and answer questions."), 15, 2500),
    ];
    for (name, description, duration_minutes, price_cents) in services {
        store.add_service(NewService {
            name: name.to_string(),
            description: description.map(str::to_string),
            duration_minutes,
            price_cents,
        })?;
    }

    let weekdays = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];
    for day in weekdays {
        store.set_weekly_entry(WeeklyScheduleEntry {
            day,
            open: parse_hhmm("09:00").unwrap(),
            close: parse_hhmm("17:00").unwrap(),
            active: true,
        })?;
    }
    store.set_weekly_entry(WeeklyScheduleEntry {
        day: Weekday::Sat,
        open: parse_hhmm("10:00").unwrap(),
        close: parse_hhmm("14:00").unwrap(),
        active: true,
    })?;
    store.set_weekly_entry(WeeklyScheduleEntry {
        day: Weekday::Sun,
        open: parse_hhmm("10:00").unwrap(),
        close: parse_hhmm("14:00").unwrap(),
        active: false,
    })?;
    Ok(())
}

fn price(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, cents.rem_euclid(100))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = load_store(&cli.store)?;
    let engine = Engine::new(store);

    // Commands that change store state save the snapshot back on success.
    let mut mutated = false;

    match cli.command {
        Commands::Init => {
            seed(engine.store())?;
            mutated = true;
            println!("Seeded 5 services and the weekly schedule.");
        }
        Commands::Services { all } => {
            for s in engine.store().list_services(all)? {
                let flag = if s.active { "" } else { " (inactive)" };
                println!(
                    "#{} {} — {} min, {}{}",
                    s.id,
                    s.name,
                    s.duration_minutes,
                    price(s.price_cents),
                    flag
                );
            }
        }
        Commands::AddService {
            name,
            duration,
            price: price_cents,
            description,
        } => {
            let s = engine.store().add_service(NewService {
                name,
                description,
                duration_minutes: duration,
                price_cents,
            })?;
            mutated = true;
            println!("Added service #{}: {}", s.id, s.name);
        }
        Commands::DeactivateService { id } => {
            let s = engine.store().deactivate_service(id)?;
            mutated = true;
            println!("Deactivated service #{}: {}", s.id, s.name);
        }
        Commands::Schedule => {
            for e in engine.store().weekly_schedule()? {
                let state = if e.active { "open" } else { "closed" };
                println!(
                    "{:<9} {}–{}  {}",
                    format!("{:?}", e.day),
                    e.open.format("%H:%M"),
                    e.close.format("%H:%M"),
                    state
                );
            }
        }
        Commands::SetSchedule {
            day,
            open,
            close,
            off,
        } => {
            engine.store().set_weekly_entry(WeeklyScheduleEntry {
                day,
                open,
                close,
                active: !off,
            })?;
            mutated = true;
            println!("Updated schedule for {day:?}.");
        }
        Commands::Blocks => {
            for b in engine.store().blocked_dates()? {
                match b.reason {
                    Some(reason) => println!("{}  {}", b.date, reason),
                    None => println!("{}", b.date),
                }
            }
        }
        Commands::Block { date, reason } => {
            if engine.store().block_date(date, reason)? {
                mutated = true;
                println!("Blocked {date}.");
            } else {
                println!("{date} is already blocked.");
            }
        }
        Commands::Unblock { date } => {
            if engine.store().unblock_date(date)? {
                mutated = true;
                println!("Unblocked {date}.");
            } else {
                println!("{date} was not blocked.");
            }
        }
        Commands::Slots {
            date,
            service,
            json,
        } => {
            let slots = engine.generate_slots(date, service)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else if slots.is_empty() {
                println!("No slots on {date}.");
            } else {
                for slot in slots {
                    let mark = if slot.available { "available" } else { "booked" };
                    println!(
                        "{}–{}  {}",
                        slot.start.format("%H:%M"),
                        slot.end.format("%H:%M"),
                        mark
                    );
                }
            }
        }
        Commands::Book {
            service,
            date,
            start,
            name,
            email,
            phone,
            notes,
        } => {
            let booking = engine.create_booking(
                service,
                date,
                start,
                ClientInfo {
                    name,
                    email,
                    phone,
                    notes,
                },
            )?;
            mutated = true;
            println!(
                "Booked #{}: {} on {} {}–{} ({})",
                booking.id,
                booking.client.name,
                booking.date,
                booking.start.format("%H:%M"),
                booking.end.format("%H:%M"),
                booking.status
            );
        }
        Commands::Bookings {
            date,
            from,
            to,
            status,
        } => {
            let query = BookingQuery {
                date,
                from,
                to,
                status,
            };
            for b in engine.store().list_bookings(&query)? {
                println!(
                    "#{} {} {}–{}  {:<9} service {}  {} <{}>",
                    b.id,
                    b.date,
                    b.start.format("%H:%M"),
                    b.end.format("%H:%M"),
                    b.status.to_string(),
                    b.service_id,
                    b.client.name,
                    b.client.email
                );
            }
        }
        Commands::Cancel { id } => {
            let b = engine.cancel_booking(id)?;
            mutated = true;
            println!("Cancelled booking #{} ({} {}).", b.id, b.date, b.start.format("%H:%M"));
        }
        Commands::Complete { id } => {
            let b = engine.complete_booking(id)?;
            mutated = true;
            println!("Completed booking #{}.", b.id);
        }
    }

    if mutated {
        save_store(&cli.store, engine.store())?;
    }
    Ok(())
}
