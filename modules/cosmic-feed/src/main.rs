use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cosmic_common::{Config, DateGroup, NeoRecord};
use cosmic_feed::{FeedAccumulator, FeedSummary, LoadOutcome, StaticSession};
use neows_client::NeoWsClient;

#[derive(Parser)]
#[command(name = "cosmic")]
#[command(about = "Browse near-earth object close approaches from NASA NeoWs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the current week, optionally paging further ahead
    Feed {
        /// Extra windows to load after the first
        #[arg(short, long, default_value_t = 0)]
        pages: u32,

        /// Only list potentially hazardous objects
        #[arg(long)]
        hazardous: bool,

        /// Print the groups as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show an explicit date range
    Range {
        /// First date, YYYY-MM-DD
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last date, YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(long)]
        hazardous: bool,

        #[arg(long)]
        json: bool,
    },

    /// Show details for one object from the loaded feed
    Show {
        id: String,

        /// Extra windows to search after the first
        #[arg(short, long, default_value_t = 0)]
        pages: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("cosmic=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.log_redacted();

    let client = NeoWsClient::with_feed_url(&config.nasa_api_key, &config.feed_url);
    let session = StaticSession::from_email(config.user_email.as_deref());
    let mut feed = FeedAccumulator::new(Arc::new(client), Arc::new(session))
        .with_window_days(config.window_days);

    match cli.command {
        Command::Feed {
            pages,
            hazardous,
            json,
        } => {
            load_week(&mut feed, pages).await?;
            feed.set_only_hazardous(hazardous);
            print_feed(&feed, json)?;
        }
        Command::Range {
            start,
            end,
            hazardous,
            json,
        } => {
            let outcome = feed.load_custom_range(start, end).await;
            check(&feed, outcome)?;
            feed.set_only_hazardous(hazardous);
            print_feed(&feed, json)?;
        }
        Command::Show { id, pages } => {
            load_week(&mut feed, pages).await?;
            match feed.select(&id) {
                Some(neo) => print_detail(neo),
                None => bail!("No object with id {id} in the loaded range"),
            }
        }
    }

    Ok(())
}

/// Initial week plus up to `pages` more windows. One retry per failed page.
async fn load_week(feed: &mut FeedAccumulator, pages: u32) -> Result<()> {
    let mut outcome = feed.load_initial().await;
    if outcome == LoadOutcome::Failed {
        outcome = feed.retry().await;
    }
    check(feed, outcome)?;

    for page in 0..pages {
        let mut outcome = feed.load_more().await;
        if outcome == LoadOutcome::Failed {
            outcome = feed.retry().await;
        }
        check(feed, outcome)?;
        if !feed.has_more() {
            info!(page, "Upstream has no more dates");
            break;
        }
    }
    Ok(())
}

fn check(feed: &FeedAccumulator, outcome: LoadOutcome) -> Result<()> {
    match outcome {
        LoadOutcome::Failed | LoadOutcome::Rejected => match feed.error() {
            Some(e) => bail!("{} ({e})", e.user_message()),
            None => bail!("Load failed"),
        },
        LoadOutcome::Skipped if feed.groups().is_empty() && feed.frontier().is_none() => {
            bail!("Sign in to view cosmic events (set COSMIC_USER_EMAIL)")
        }
        _ => Ok(()),
    }
}

fn print_feed(feed: &FeedAccumulator, json: bool) -> Result<()> {
    let visible = feed.visible_groups();

    if json {
        println!("{}", serde_json::to_string_pretty(&*visible)?);
        return Ok(());
    }

    print_summary(&feed.summary());

    if visible.is_empty() {
        if feed.view().only_hazardous {
            println!("No hazardous asteroids found for the selected period.");
        } else {
            println!("No cosmic events found for the selected period.");
        }
        return Ok(());
    }

    for group in visible.iter() {
        print_group(group);
    }

    if !feed.view().only_hazardous && !feed.has_more() {
        println!("\nNo more events to load");
    }
    Ok(())
}

fn print_summary(summary: &FeedSummary) {
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        println!(
            "Current date range: {first} - {last} • {} day{} • {} total events",
            summary.days,
            if summary.days == 1 { "" } else { "s" },
            summary.total_events
        );
    }
    println!("{} Hazardous • {} Safe", summary.hazardous, summary.safe);
    if summary.has_hazardous() {
        println!(
            "!! {} potentially hazardous asteroids in the current date range",
            summary.hazardous
        );
    }
}

fn print_group(group: &DateGroup) {
    println!(
        "\n{} ({} event{}, {} hazardous, {} safe)",
        group.date.format("%A, %B %-d, %Y"),
        group.neos.len(),
        if group.neos.len() == 1 { "" } else { "s" },
        group.hazardous_count(),
        group.safe_count()
    );
    for neo in &group.neos {
        println!(
            "  [{:<9}] {:<24} id={:<10} d={} km  v={} km/h  miss={} km",
            neo.status_label(),
            neo.display_name(),
            neo.id,
            neo.diameter_label(),
            neo.velocity_label(),
            neo.miss_distance_label()
        );
    }
}

fn print_detail(neo: &NeoRecord) {
    println!("{}", neo.display_name());
    println!("Near-Earth Object Details");
    if neo.is_hazardous {
        println!("!! Potentially Hazardous Asteroid: requires special attention and monitoring");
    }
    println!("  id:                 {}", neo.id);
    println!("  status:             {}", neo.status_label());
    println!("  estimated diameter: {} km", neo.diameter_label());
    println!("  velocity:           {} km/h", neo.velocity_label());
    println!("  miss distance:      {} km", neo.miss_distance_label());
    println!("  close approach:     {}", neo.close_approach_date);
    if let Some(full) = &neo.close_approach_full {
        println!("  approach time:      {full}");
    }
    if let Some(body) = &neo.orbiting_body {
        println!("  orbiting body:      {body}");
    }
    if let Some(h) = neo.absolute_magnitude {
        println!("  absolute magnitude: {h}");
    }
    if let Some(url) = &neo.jpl_url {
        println!("  JPL:                {url}");
    }
}
