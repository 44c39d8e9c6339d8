use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use ganzhi_base::{
    Branch, ChartPillar, PillarPosition, Stem, compute_day_pillar, compute_hour_pillar,
    compute_month_pillar, compute_year_pillar, hour_bin, relation, solar_month, ten_god,
};
use ganzhi_reading::{
    DEFAULT_HISTORY_LIMIT, Focus, HistoryStore, Language, Reading, ReadingConfig, ReadingRequest,
    ReadingService, SqliteHistoryStore,
};
use ganzhi_time::CivilDate;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ganzhi", about = "Four Pillars (Bazi) CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full reading: four pillars, analysis and narrative
    Chart {
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Birth time (HH, HH:MM or HH:MM:SS)
        #[arg(long)]
        time: Option<String>,
        /// overall, career, wealth, love, health or family
        #[arg(long)]
        focus: Option<Focus>,
        /// zh, en or mi
        #[arg(long)]
        lang: Option<Language>,
        /// Print the reading as JSON
        #[arg(long)]
        json: bool,
        /// TOML configuration file
        #[arg(long, env = "GANZHI_CONFIG")]
        config: Option<PathBuf>,
        /// Attach the reading to a user in history
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Year pillar of a CE year
    YearPillar {
        year: i32,
    },
    /// Month pillar from the year stem and calendar month
    MonthPillar {
        /// Year stem (pinyin or character)
        #[arg(long)]
        year_stem: Stem,
        /// Calendar month (1-12)
        #[arg(long)]
        month: u32,
    },
    /// Day pillar of a date
    DayPillar {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: CivilDate,
    },
    /// Hour pillar from the day stem and hour of day
    HourPillar {
        /// Day stem (pinyin or character)
        #[arg(long)]
        day_stem: Stem,
        /// Hour of day (0-23)
        #[arg(long)]
        hour: u32,
    },
    /// Ten god of a stem relative to a day stem
    TenGod {
        #[arg(long)]
        day_stem: Stem,
        #[arg(long)]
        target: Stem,
    },
    /// Hidden stems of a branch
    HiddenStems {
        /// Branch (pinyin or character)
        branch: Branch,
    },
    /// Recorded readings, newest first
    History {
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
        /// TOML configuration file naming the history path
        #[arg(long, env = "GANZHI_CONFIG")]
        config: PathBuf,
        /// Only this user's readings
        #[arg(long)]
        user_id: Option<String>,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ganzhi=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn load_config(path: Option<&Path>) -> ReadingConfig {
    match path {
        Some(p) => ReadingConfig::load(p).unwrap_or_else(|e| fail(e)),
        None => ReadingConfig::default(),
    }
}

fn print_pillar(pos: PillarPosition, p: &ChartPillar) {
    let hidden: Vec<&str> = p.hidden_stems.iter().map(|s| s.name()).collect();
    let animal = p.animal.map(|a| format!(" {}", a.name())).unwrap_or_default();
    println!(
        "{:<6} {}{}  {:<10} {:<6}{animal}  hidden: {:<14} ten god: {}",
        pos.name(),
        p.stem.chinese(),
        p.branch.chinese(),
        p.pillar().to_string(),
        p.element.name(),
        hidden.join("/"),
        p.ten_god,
    );
}

fn print_reading(reading: &Reading) {
    for (pos, p) in reading.chart.pillars() {
        print_pillar(pos, p);
    }
    if reading.chart.hour.is_none() {
        println!("hour   (not provided)");
    }
    let a = &reading.analysis.chart;
    let b = &a.element_analysis;
    println!();
    let counts: Vec<String> = b
        .element_count
        .iter()
        .map(|(e, v)| format!("{e} {v:.1}"))
        .collect();
    println!("Elements:    {}", counts.join(", "));
    println!("Dominant:    {}", b.dominant_element);
    let missing: Vec<&str> = b.missing_elements.iter().map(|e| e.name()).collect();
    println!(
        "Missing:     {}",
        if missing.is_empty() { "none".to_string() } else { missing.join(", ") }
    );
    println!("Balance:     {}", b.element_balance);
    println!("Day master:  {} ({}), {}", a.day_master, a.day_element, a.day_master_strength.name());
    println!("Use god:     {}", a.use_god.map_or("none", |e| e.name()));
    println!("Avoid god:   {}", a.avoid_god.map_or("none", |e| e.name()));
    println!();
    println!("{}", reading.analysis.analysis_summary);
    if let Some(text) = &reading.interpretation {
        println!();
        println!("{text}");
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Chart {
            date,
            time,
            focus,
            lang,
            json,
            config,
            user_id,
        } => {
            let config = load_config(config.as_deref());
            let service = ReadingService::from_config(config);
            let request = ReadingRequest {
                birth_date: date,
                birth_time: time,
                focus,
                language: lang,
                user_id,
            };
            let reading = service.read(&request).unwrap_or_else(|e| fail(e));
            if json {
                let text = serde_json::to_string_pretty(&reading).unwrap_or_else(|e| fail(e));
                println!("{text}");
            } else {
                print_reading(&reading);
            }
        }

        Commands::YearPillar { year } => {
            let p = compute_year_pillar(year);
            let animal = p.animal.map_or("", |a| a.name());
            println!("{p} ({}{}, {animal})", p.stem.chinese(), p.branch.chinese());
            println!("Element: {}", p.element);
        }

        Commands::MonthPillar { year_stem, month } => {
            let p = compute_month_pillar(year_stem, month).unwrap_or_else(|e| fail(e));
            let solar = solar_month(month).unwrap_or_else(|e| fail(e));
            println!("{p} ({}{})", p.stem.chinese(), p.branch.chinese());
            println!("Solar month: {solar}");
            println!("Element: {}", p.element);
        }

        Commands::DayPillar { date } => {
            let p = compute_day_pillar(date);
            println!("{p} ({}{})", p.stem.chinese(), p.branch.chinese());
            println!("Element: {}", p.element);
            if let Some(i) = p.cycle_index() {
                println!("Cycle index: {i}");
            }
        }

        Commands::HourPillar { day_stem, hour } => {
            let p = compute_hour_pillar(day_stem, hour).unwrap_or_else(|e| fail(e));
            let bin = hour_bin(hour).unwrap_or_else(|e| fail(e));
            println!("{p} ({}{})", p.stem.chinese(), p.branch.chinese());
            println!("Hour bin: {bin}");
            println!("Element: {}", p.element);
        }

        Commands::TenGod { day_stem, target } => {
            let god = ten_god(day_stem, target).unwrap_or_else(|e| fail(e));
            debug!(relation = ?relation(day_stem, target), "classified");
            println!("{god} ({})", god.chinese());
        }

        Commands::HiddenStems { branch } => {
            for s in branch.hidden_stems() {
                println!("{s} ({}, {} {})", s.chinese(), s.polarity(), s.element());
            }
        }

        Commands::History {
            limit,
            config,
            user_id,
        } => {
            let config = load_config(Some(config.as_path()));
            if !config.history.enabled {
                fail("history is disabled in this configuration");
            }
            let store = SqliteHistoryStore::open(&config.history.path).unwrap_or_else(|e| fail(e));
            let records = match &user_id {
                Some(u) => store.list_for_user(u, limit),
                None => store.list(limit),
            }
            .unwrap_or_else(|e| fail(e));
            for r in records {
                println!(
                    "{}  {}  {}  {}",
                    r.created_at.format("%Y-%m-%d %H:%M:%S"),
                    r.id,
                    r.user_id.as_deref().unwrap_or("-"),
                    r.input_data
                );
            }
        }
    }
}
