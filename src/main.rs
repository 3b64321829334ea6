//! PlacePulse CLI
//!
//! Usage:
//!   placepulse --lat -33.86 --lon 151.19 --radius 1500 --type restaurant
//!   placepulse --lat .. --lon .. --radius .. --type .. --keyword cruise --json
//!   placepulse --serve                      # web dashboard

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use placepulse::core::{run_server, Dashboard, DashboardResult};
use placepulse::types::{SearchForm, SentimentScope};
use placepulse::{Config, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "placepulse",
    version = VERSION,
    about = "Find places of interest nearby and the local coronavirus sentiment",
    long_about = "PlacePulse searches a places provider around a coordinate and\n\
                  summarises stored coronavirus posts for the surrounding city,\n\
                  falling back to the country and then to all posts.\n\n\
                  Configuration comes from PLACEPULSE_* environment variables;\n\
                  the flags below override them."
)]
struct Args {
    /// Latitude of the search origin
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<String>,

    /// Longitude of the search origin
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<String>,

    /// Search radius in meters
    #[arg(long)]
    radius: Option<String>,

    /// Type of location (e.g. restaurant, movie_theater)
    #[arg(long = "type")]
    loc_type: Option<String>,

    /// Keyword the place name must contain
    #[arg(long)]
    keyword: Option<String>,

    /// Run the web dashboard
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:8050")]
    addr: String,

    /// Places / geocode API key
    #[arg(long)]
    api_key: Option<String>,

    /// Post store (SQLite file)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Error log file
    #[arg(long)]
    error_log: Option<PathBuf>,

    /// Upstream request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.json_logs);

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let dashboard = match Dashboard::from_config(&config) {
        Ok(dashboard) => Arc::new(dashboard),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    if args.serve {
        if let Err(e) = run_server(&args.addr, dashboard).await {
            eprintln!("{} {}", "server error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    run_once(&args, &dashboard).await
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("placepulse=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.with_target(true).init();
    }
}

fn build_config(args: &Args) -> placepulse::Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(key) = &args.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(store) = &args.store {
        config.store_path = store.clone();
    }
    if let Some(path) = &args.error_log {
        config.error_log_path = path.clone();
    }
    if let Some(timeout) = args.timeout {
        config.http_timeout_secs = timeout;
    }
    Ok(config)
}

/// One query from the flags, printed to stdout
async fn run_once(args: &Args, dashboard: &Dashboard) -> ExitCode {
    let form = SearchForm {
        latitude: args.lat.clone().unwrap_or_default(),
        longitude: args.lon.clone().unwrap_or_default(),
        radius: args.radius.clone().unwrap_or_default(),
        location_type: args.loc_type.clone().unwrap_or_default(),
        keyword: args.keyword.clone(),
    };

    match dashboard.run(&form).await {
        Ok(result) if args.json => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                ExitCode::FAILURE
            }
        },
        Ok(result) => {
            print_result(&result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let field = e.field().map(|f| format!(" [{}]", f)).unwrap_or_default();
            eprintln!("{}{} {}", "error:".red().bold(), field, e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn print_result(result: &DashboardResult) {
    println!("{}", result.summary.bold());
    println!();

    for place in &result.places {
        println!("  {} {}", "•".green(), place.name.bold());
        println!(
            "    {} | rating {} ({}) | price {} | {}",
            place.vicinity.display(),
            place.rating.display(),
            place.rating_count.display(),
            place.price_level.display(),
            place.open_now.label()
        );
    }
    if !result.places.is_empty() {
        println!();
    }

    match &result.sentiment {
        Some(summary) => {
            let scope = match summary.scope {
                SentimentScope::Global => "all locations".to_string(),
                _ => summary.scope_label.clone(),
            };
            println!(
                "Sentiment in {}: {} positive, {} negative (threshold {:.3}, {} posts)",
                scope.cyan(),
                summary.positive_count.to_string().green(),
                summary.negative_count.to_string().red(),
                summary.threshold,
                summary.posts.len()
            );
            for row in result.table.rows.iter().take(10) {
                println!(
                    "  {} {} {:>7.3}  {}",
                    row.date.dimmed(),
                    row.time.dimmed(),
                    row.sentiment,
                    row.tweet
                );
            }
        }
        None => println!("{}", result.pie.layout.title.dimmed()),
    }

    for notice in &result.notices {
        println!("{} {}", "note:".yellow(), notice);
    }
}
