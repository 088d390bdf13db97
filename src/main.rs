// Rust Countdown Application
// Command line entry point

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration as StdDuration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;

use rust_countdown::models::event::{normalize_title, CountMode, CountdownEvent, EventId};
use rust_countdown::models::image;
use rust_countdown::services::formatter;
use rust_countdown::services::store::EventStore;

#[derive(Parser)]
#[command(name = "rust-countdown")]
#[command(about = "Track countdowns and count-ups from your terminal")]
struct Cli {
    /// Events file (defaults to the per-user data directory)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new event
    Add {
        title: String,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Target time (HH:MM)
        #[arg(long, value_parser = parse_time, default_value = "00:00")]
        time: NaiveTime,

        /// Counting direction: countdown or countup
        #[arg(long, default_value = "countdown")]
        mode: CountMode,

        /// Sample image id (see `images`)
        #[arg(long)]
        image: Option<String>,

        /// Attach a custom image file
        #[arg(long)]
        image_file: Option<PathBuf>,
    },
    /// Change an existing event
    Edit {
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New target date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// New target time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,

        /// Counting direction: countdown or countup
        #[arg(long)]
        mode: Option<CountMode>,

        /// Sample image id (see `images`)
        #[arg(long)]
        image: Option<String>,

        /// Attach a custom image file
        #[arg(long)]
        image_file: Option<PathBuf>,

        /// Drop the custom image and fall back to the sample
        #[arg(long, conflicts_with = "image_file")]
        clear_image: bool,
    },
    /// Delete events by id
    Delete {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// List all events, newest first
    List,
    /// Show one event in detail
    Show { id: u64 },
    /// List the bundled sample images
    Images,
    /// Redraw the event list on an interval
    Watch {
        /// Refresh interval in seconds
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Rust Countdown Application");

    let Cli { data_file, command } = Cli::parse();
    let data_file = data_file.unwrap_or_else(default_data_file);

    let mut store = EventStore::open(data_file);
    // Targets that passed while the app was closed roll forward before
    // anything is shown.
    store.rollover_pass(Local::now());
    run_command(&mut store, command)
}

fn run_command(store: &mut EventStore, command: Commands) -> Result<()> {
    match command {
        Commands::Add {
            title,
            date,
            time,
            mode,
            image,
            image_file,
        } => {
            let title = normalize_title(&title).map_err(anyhow::Error::msg)?;
            let target_at = local_datetime(date, time)?;
            let image_id = match image {
                Some(requested) => validated_image_id(&requested)?,
                None => image::default_sample().id.to_string(),
            };
            let custom_image = match image_file {
                Some(path) => Some(read_image_bytes(&path)?),
                None => None,
            };
            let id = store.create(title, target_at, mode, image_id, custom_image);
            println!("イベントを追加しました (id: {id})");
            Ok(())
        }
        Commands::Edit {
            id,
            title,
            date,
            time,
            mode,
            image,
            image_file,
            clear_image,
        } => {
            let id = EventId(id);
            let existing = match store.event(id) {
                Some(event) => event.clone(),
                None => bail!("データが存在しません"),
            };

            let title = match title {
                Some(raw) => normalize_title(&raw).map_err(anyhow::Error::msg)?,
                None => existing.title,
            };
            let target_at = if date.is_some() || time.is_some() {
                let date = date.unwrap_or_else(|| existing.target_at.date_naive());
                let time = time.unwrap_or_else(|| existing.target_at.time());
                local_datetime(date, time)?
            } else {
                existing.target_at
            };
            let mode = mode.unwrap_or(existing.mode);
            let image_id = match image {
                Some(requested) => validated_image_id(&requested)?,
                None => existing.image_id,
            };
            let custom_image = if clear_image {
                None
            } else if let Some(path) = image_file {
                Some(read_image_bytes(&path)?)
            } else {
                existing.custom_image
            };

            store.update(id, title, target_at, mode, image_id, custom_image);
            println!("イベントを更新しました (id: {id})");
            Ok(())
        }
        Commands::Delete { ids } => {
            let ids: HashSet<EventId> = ids.into_iter().map(EventId).collect();
            let removed = store.delete(&ids);
            println!("{removed}件のイベントを削除しました");
            Ok(())
        }
        Commands::List => {
            render_list(store, Local::now());
            Ok(())
        }
        Commands::Show { id } => {
            let event = match store.event(EventId(id)) {
                Some(event) => event,
                None => bail!("データが存在しません"),
            };
            let detail = formatter::detail(event, Local::now());
            let (days_caption, hours_caption) = match event.mode {
                CountMode::Countdown => ("残り日数", "残り時間"),
                CountMode::Countup => ("経過日数", "経過時間"),
            };
            let image_label = if event.custom_image.is_some() {
                "カスタム画像"
            } else {
                image::find(&event.image_id).label
            };
            println!("{}", event.title);
            println!("{}", event.mode.label());
            println!("設定日時: {} {}", detail.date_text, detail.time_text);
            println!("{days_caption}: {}", detail.remaining_for_date_tab);
            println!("本日の日付が変わるまで: {}", detail.until_midnight);
            println!("{hours_caption}: {}", detail.remaining_for_time_tab);
            println!("画像: {image_label}");
            Ok(())
        }
        Commands::Images => {
            print_images();
            Ok(())
        }
        Commands::Watch { interval } => loop {
            store.rollover_pass(Local::now());
            // Redraw in place.
            print!("\x1b[2J\x1b[H");
            render_list(store, Local::now());
            io::stdout().flush().context("failed to flush stdout")?;
            thread::sleep(StdDuration::from_secs(interval));
        },
    }
}

fn render_list(store: &EventStore, now: DateTime<Local>) {
    if store.events().is_empty() {
        println!("まだイベントがありません");
        return;
    }
    for event in store.events() {
        println!("{}", summary_line(event, now));
    }
}

fn summary_line(event: &CountdownEvent, now: DateTime<Local>) -> String {
    let summary = formatter::summary(event, now);
    let unit = if summary.show_day_unit { "日" } else { "" };
    format!(
        "[{}] {}  {}  {}  {} {}{}",
        event.id,
        event.title,
        formatter::date_with_weekday_text(event.target_at),
        event.mode.label(),
        summary.header_text,
        summary.countdown_text,
        unit
    )
}

fn print_images() {
    for sample in &image::SAMPLES {
        println!("{:<12} {}", sample.id, sample.label);
    }
}

fn default_data_file() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("com", "RustCountdown", "CountdownApp") {
        let dir = dirs.data_dir();
        std::fs::create_dir_all(dir).ok();
        dir.join("countdowns.json")
    } else {
        log::warn!("Unable to resolve project directory; using current dir for countdowns");
        PathBuf::from("countdowns.json")
    }
}

fn validated_image_id(id: &str) -> Result<String> {
    if image::is_known(id) {
        return Ok(id.to_string());
    }
    let available: Vec<&str> = image::SAMPLES.iter().map(|sample| sample.id).collect();
    bail!("Image '{}' not found. Available: {}", id, available.join(", "));
}

fn read_image_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read image from {}", path.display()))
}

fn local_datetime(date: NaiveDate, time: NaiveTime) -> Result<DateTime<Local>> {
    date.and_time(time)
        .and_local_timezone(Local)
        .earliest()
        .with_context(|| format!("{date} {time} is not a valid local time"))
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| format!("invalid time '{value}' (expected HH:MM)"))
}
