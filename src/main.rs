use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use content_hub::{
    shared::utils::logger::{init_logger, LogContext},
    Bucket, ContentHub, HubConfig,
};

#[derive(Parser)]
#[command(name = "content-hub", about = "Movie, TV and comic metadata lookups")]
struct Cli {
    /// Include adult titles in comic and search results
    #[arg(long, global = true)]
    adult: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search every bucket, or one bucket page with --bucket
    Search {
        keyword: String,
        #[arg(long, value_enum)]
        bucket: Option<BucketArg>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Title suggestions for a partial keyword
    Suggest { keyword: String },
    /// Recommendations for one title
    Recommend {
        #[arg(value_enum)]
        kind: KindArg,
        id: u64,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Detail for one title
    Detail {
        #[arg(value_enum)]
        kind: KindArg,
        id: u64,
        /// Character page for comics
        #[arg(long)]
        page: Option<u32>,
    },
    /// Detail for one comic character
    Character { id: u64 },
    /// Profile and credits for one person
    Person { id: u64 },
    /// Warm up and print cache counters
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Tv,
    Movie,
    Comic,
}

#[derive(Clone, Copy, ValueEnum)]
enum BucketArg {
    Anime,
    Drama,
    Movie,
    Comic,
}

impl From<BucketArg> for Bucket {
    fn from(arg: BucketArg) -> Self {
        match arg {
            BucketArg::Anime => Bucket::Anime,
            BucketArg::Drama => Bucket::Drama,
            BucketArg::Movie => Bucket::Movie,
            BucketArg::Comic => Bucket::Comic,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse();

    let config = HubConfig::from_env().context("Failed to load configuration")?;
    let hub = ContentHub::bootstrap(config)
        .await
        .context("Failed to start content hub")?;
    let adult = cli.adult;

    match cli.command {
        Command::Search { keyword, bucket: None, .. } => {
            print_json(&hub.search_all(&keyword, adult).await?)?
        }
        Command::Search { keyword, bucket: Some(bucket), page } => {
            print_json(&hub.search_bucket(bucket.into(), &keyword, page, adult).await?)?
        }
        Command::Suggest { keyword } => print_json(&hub.suggest_keywords(&keyword, adult).await?)?,
        Command::Recommend { kind, id, page } => match kind {
            KindArg::Tv => print_json(&hub.resolve_tv_recommendations(id, page).await?)?,
            KindArg::Movie => print_json(&hub.resolve_movie_recommendations(id, page).await?)?,
            KindArg::Comic => {
                print_json(&hub.resolve_comic_recommendations(id, page, adult).await?)?
            }
        },
        Command::Detail { kind, id, page } => match kind {
            KindArg::Tv => print_json(&hub.resolve_tv_detail(id).await?)?,
            KindArg::Movie => print_json(&hub.resolve_movie_detail(id).await?)?,
            KindArg::Comic => print_json(&hub.resolve_comic_detail(id, page, adult).await?)?,
        },
        Command::Character { id } => print_json(&hub.resolve_character(id).await?)?,
        Command::Person { id } => print_json(&hub.resolve_person(id).await?)?,
        Command::Stats => print_json(&hub.cache_stats())?,
    }

    LogContext::cache_summary(&hub.cache_stats());
    Ok(())
}
