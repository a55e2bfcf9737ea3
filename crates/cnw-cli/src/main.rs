use std::pin::pin;
use std::process;
use std::str::FromStr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use cnw_scraper::scraper::WebScraper;
use cnw_scraper::types::{Category, Location, Options, Profile, SortKey};
use cnw_scraper::utils::ProfileStats;
use futures::StreamExt;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "cnw")]
#[command(about = "A celebritynetworth.com profile scraper", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Override the user-agent header sent to the site"
    )]
    user_agent: Option<String>,

    #[arg(long, global = true, help = "Whole-request timeout in seconds")]
    timeout_secs: Option<u64>,

    #[arg(
        long,
        global = true,
        help = "Leave the biography text out of collected profiles"
    )]
    no_description: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
struct SortArgs {
    #[arg(
        long = "sort-by",
        value_parser = parse_sort_key,
        help = "Sort collected profiles by 'name' or 'worth'"
    )]
    sort_by: Option<SortKey>,

    #[arg(long, help = "Sort in descending order")]
    descending: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect every profile from a category within an inclusive page range
    Category {
        #[arg(value_parser = parse_category, help = "Category name, e.g. 'actors' or 'rappers'")]
        category: Category,

        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..),
            help = "First page to fetch"
        )]
        start_page: u32,

        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..),
            help = "Last page to fetch (inclusive)"
        )]
        end_page: u32,

        #[command(flatten)]
        sort: SortArgs,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Collect the top profiles for a map location
    Map {
        #[arg(value_parser = parse_location, help = "Location name, e.g. 'usa' or 'europe'")]
        location: Location,

        #[command(flatten)]
        sort: SortArgs,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Search profiles by name, at most one result per unique name
    Names {
        #[arg(required = true, num_args = 1.., help = "Real names or stage names to search for")]
        names: Vec<String>,

        #[command(flatten)]
        sort: SortArgs,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Collect a category's top-50 list, or the overall top-100 list
    Top {
        #[arg(value_parser = parse_category, help = "Optional category; omit for the overall top-100")]
        category: Option<Category>,

        #[command(flatten)]
        sort: SortArgs,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Grab one random profile
    Random {
        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Walk every category, printing one category's batch at a time
    All {
        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..),
            help = "How many pages to cover per category"
        )]
        pages_per_category: u32,

        #[command(flatten)]
        sort: SortArgs,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_str(s).map_err(|e| e.to_string())
}

fn parse_location(s: &str) -> Result<Location, String> {
    Location::from_str(s).map_err(|e| e.to_string())
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    SortKey::from_str(s).map_err(|e| e.to_string())
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

fn print_profiles(profiles: &[Profile], format: &OutputFormat) {
    match format {
        OutputFormat::Json => serialize_json(&profiles),
        OutputFormat::Text => {
            if profiles.is_empty() {
                println!("No profiles to display.");
            } else {
                for profile in profiles {
                    println!("{}", profile);
                }
                print!("{}", ProfileStats::from_profiles(profiles));
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let mut options = Options {
        user_agent: cli.user_agent.clone(),
        include_description: !cli.no_description,
        ..Options::default()
    };
    if let Some(secs) = cli.timeout_secs {
        options.request_timeout = Duration::from_secs(secs);
    }
    let scraper = WebScraper::with_options(options);

    match cli.command {
        Commands::Category {
            category,
            start_page,
            end_page,
            sort,
            format,
        } => {
            let profiles = scraper
                .scrape_category(category, start_page, end_page, sort.sort_by, !sort.descending)
                .await
                .unwrap_or_else(|e| {
                    log::error!("Error collecting {} profiles: {}", category, e);
                    process::exit(1);
                });
            print_profiles(&profiles, &format);
        }

        Commands::Map {
            location,
            sort,
            format,
        } => {
            let profiles = scraper
                .scrape_map(location, sort.sort_by, !sort.descending)
                .await
                .unwrap_or_else(|e| {
                    log::error!("Error collecting {} profiles: {}", location, e);
                    process::exit(1);
                });
            print_profiles(&profiles, &format);
        }

        Commands::Names {
            names,
            sort,
            format,
        } => {
            let profiles = scraper
                .scrape_names(&names, sort.sort_by, !sort.descending)
                .await
                .unwrap_or_else(|e| {
                    log::error!("Error searching profiles: {}", e);
                    process::exit(1);
                });
            print_profiles(&profiles, &format);
        }

        Commands::Top {
            category,
            sort,
            format,
        } => {
            let profiles = scraper
                .scrape_top(category, sort.sort_by, !sort.descending)
                .await
                .unwrap_or_else(|e| {
                    log::error!("Error collecting top list: {}", e);
                    process::exit(1);
                });
            print_profiles(&profiles, &format);
        }

        Commands::Random { format } => {
            let profile = scraper.scrape_random().await.unwrap_or_else(|e| {
                log::error!("Error collecting random profile: {}", e);
                process::exit(1);
            });
            match format {
                OutputFormat::Json => serialize_json(&profile),
                OutputFormat::Text => println!("{}", profile),
            }
        }

        Commands::All {
            pages_per_category,
            sort,
            format,
        } => {
            let mut stream =
                pin!(scraper.scrape_all(pages_per_category, sort.sort_by, !sort.descending));
            while let Some(result) = stream.next().await {
                match result {
                    Ok((category, profiles)) => {
                        println!("==== {} ====", category);
                        print_profiles(&profiles, &format);
                    }
                    Err(e) => {
                        log::error!("Error collecting profiles: {}", e);
                        process::exit(1);
                    }
                }
            }
        }
    }
}
