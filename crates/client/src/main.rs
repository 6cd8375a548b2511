// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use fm_league::{Change, Command, OpponentChoice};
use fm_league_client::{
    DocumentCache, EditOutcome, FileCache, HttpTransport, LoadSource, MemoryCache, Subscription,
    SyncClient, live_url,
};
use fm_league_domain::{
    Competition, LeagueState, ManagerId, ManagerSummary, Match, MatchFilter, MatchKind, StandingsRow,
    Venue, filter_matches, manager_summary, newest_first, opponent_label, standings_for,
};
use std::path::PathBuf;
use time::macros::format_description;
use tracing::info;

type CliClient = SyncClient<HttpTransport, Box<dyn DocumentCache>>;

/// FM League - record results and follow the league table
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the league server
    #[arg(short, long, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// File to cache the league document in. Used when the server is unreachable.
    #[arg(short, long)]
    cache: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Print the league table
    Standings,
    /// List recorded matches, newest first
    Matches {
        /// Only matches of this kind (AI or Teman)
        #[arg(long, value_parser = parse_kind)]
        kind: Option<MatchKind>,
        /// Only matches in this competition (Liga, Cup or Friendly)
        #[arg(long, value_parser = parse_competition)]
        competition: Option<Competition>,
        /// Only matches of this manager
        #[arg(long)]
        manager: Option<String>,
    },
    /// Show a manager's record and match history
    ShowManager {
        /// The manager id
        manager: String,
    },
    /// Record a match result
    AddMatch {
        /// The manager who played the match
        #[arg(long)]
        manager: String,
        /// The opposing club, from the catalogue or free text
        #[arg(long, conflicts_with = "opponent", required_unless_present = "opponent")]
        club: Option<String>,
        /// The opposing league manager's id
        #[arg(long)]
        opponent: Option<String>,
        /// Match date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Competition (Liga, Cup or Friendly)
        #[arg(long, value_parser = parse_competition, default_value = "Liga")]
        competition: Competition,
        /// Home (H) or away (A)
        #[arg(long, value_parser = parse_venue, default_value = "H")]
        venue: Venue,
        /// Goals scored
        #[arg(long)]
        goals_for: u32,
        /// Goals conceded
        #[arg(long)]
        goals_against: u32,
    },
    /// Include or exclude a match from the standings
    ToggleMatch {
        /// The match id
        match_id: u64,
    },
    /// Change a manager's club or biography
    EditManager {
        /// The manager id
        manager: String,
        /// Club logo file from the catalogue; an empty value clears the club
        #[arg(long)]
        logo: Option<String>,
        /// New biography
        #[arg(long)]
        bio: Option<String>,
    },
    /// Add a manager to the league, or bench them
    ToggleActive {
        /// The manager id
        manager: String,
    },
    /// Discard all matches and start over
    Reset,
    /// Follow live updates and reprint the table on every change
    Watch,
}

fn parse_kind(value: &str) -> Result<MatchKind, String> {
    MatchKind::parse(value).ok_or_else(|| format!("Invalid kind: '{value}'. Must be AI or Teman"))
}

fn parse_competition(value: &str) -> Result<Competition, String> {
    Competition::parse(value)
        .ok_or_else(|| format!("Invalid competition: '{value}'. Must be Liga, Cup or Friendly"))
}

fn parse_venue(value: &str) -> Result<Venue, String> {
    Venue::parse(value).ok_or_else(|| format!("Invalid venue: '{value}'. Must be H or A"))
}

fn today() -> String {
    time::OffsetDateTime::now_utc()
        .date()
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

const fn load_notice(source: LoadSource) -> Option<&'static str> {
    match source {
        LoadSource::Defaults => {
            Some("Server unreachable and nothing cached; showing the default league")
        }
        LoadSource::Server | LoadSource::Cache => None,
    }
}

/// The `matches` listing: filtered, newest first.
fn listed_matches<'a>(state: &'a LeagueState, filter: &MatchFilter) -> Vec<&'a Match> {
    let mut matches: Vec<&Match> = filter_matches(state, filter);
    matches.sort_by(|a, b| newest_first(a, b));
    matches
}

fn print_standings(state: &LeagueState) {
    let rows: Vec<StandingsRow> = standings_for(state);
    println!(
        "{:>3}  {:<20} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
        "#", "Manager", "Club", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    for (position, row) in rows.iter().enumerate() {
        println!(
            "{:>3}  {:<20} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
            position + 1,
            row.name,
            row.club,
            row.record.played,
            row.record.won,
            row.record.drawn,
            row.record.lost,
            row.record.goals_for,
            row.record.goals_against,
            row.goal_difference,
            row.record.points,
        );
    }
    println!("(version {}, saved {})", state.version, state.timestamp);
}

fn print_match_line(state: &LeagueState, m: &Match) {
    let owner: &str = state
        .manager(&m.manager_id)
        .map_or(m.manager_id.as_str(), |manager| manager.name.as_str());
    println!(
        "#{:<4} {:<10} {:<16} {:>2}-{:<2} vs {:<24} {:<8} {} {:<5}{}",
        m.id,
        m.date,
        owner,
        m.goals_for,
        m.goals_against,
        opponent_label(state, m),
        m.competition.as_str(),
        m.venue.as_str(),
        m.kind.as_str(),
        if m.counted { "" } else { " (not counted)" },
    );
}

fn print_manager(state: &LeagueState, summary: &ManagerSummary) {
    let manager = &summary.manager;
    println!("{} ({})", manager.name, manager.id);
    if !manager.club_name.is_empty() {
        println!("Club: {}", manager.club_name);
    }
    if !manager.bio.is_empty() {
        println!("{}", manager.bio);
    }
    if !state.is_active(&manager.id) {
        println!("Not in the active roster");
    }
    let record = summary.record;
    println!(
        "P {}  W {}  D {}  L {}  GF {}  GA {}  Pts {}",
        record.played,
        record.won,
        record.drawn,
        record.lost,
        record.goals_for,
        record.goals_against,
        record.points
    );
    for m in &summary.matches {
        print_match_line(state, m);
    }
}

fn report_edit(change: &Change, outcome: EditOutcome) {
    match outcome {
        EditOutcome::Confirmed { version, conflict } => {
            println!("{change} (saved as version {version})");
            if conflict {
                println!("Note: someone else saved in the meantime; your copy replaced theirs");
            }
        }
        EditOutcome::Unconfirmed => {
            println!("{change} (server unreachable, kept locally only)");
        }
    }
}

async fn watch(client: &mut CliClient, server: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut subscription: Subscription = Subscription::connect(&live_url(server)).await?;
    print_standings(client.view());

    loop {
        tokio::select! {
            event = subscription.next_event() => {
                match event? {
                    Some(event) => {
                        if client.apply_event(event) {
                            println!();
                            print_standings(client.view());
                        }
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, closing live subscription");
                break;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli: Cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cache: Box<dyn DocumentCache> = match &cli.cache {
        Some(path) => Box::new(FileCache::new(path)),
        None => Box::new(MemoryCache::default()),
    };
    let mut client: CliClient = SyncClient::new(HttpTransport::new(&cli.server), cache);

    if let Some(notice) = load_notice(client.connect().await) {
        println!("{notice}");
    }

    match cli.command {
        CliCommand::Standings => print_standings(client.view()),
        CliCommand::Matches {
            kind,
            competition,
            manager,
        } => {
            let filter: MatchFilter = MatchFilter {
                kind,
                competition,
                manager_id: manager.as_deref().map(ManagerId::new),
            };
            let state: &LeagueState = client.view();
            for m in listed_matches(state, &filter) {
                print_match_line(state, m);
            }
        }
        CliCommand::ShowManager { manager } => {
            let state: &LeagueState = client.view();
            match manager_summary(state, &ManagerId::new(&manager)) {
                Some(summary) => print_manager(state, &summary),
                None => println!("No manager with id '{manager}'"),
            }
        }
        CliCommand::AddMatch {
            manager,
            club,
            opponent,
            date,
            competition,
            venue,
            goals_for,
            goals_against,
        } => {
            let opponent: OpponentChoice = match (club, opponent) {
                (Some(club), _) => OpponentChoice::Club(club),
                (None, Some(id)) => OpponentChoice::Manager(ManagerId::new(&id)),
                (None, None) => OpponentChoice::Club(String::new()),
            };
            let (change, outcome) = client
                .edit(Command::AddMatch {
                    manager_id: ManagerId::new(&manager),
                    opponent,
                    date: date.unwrap_or_else(today),
                    competition,
                    venue,
                    goals_for,
                    goals_against,
                })
                .await?;
            report_edit(&change, outcome);
        }
        CliCommand::ToggleMatch { match_id } => {
            let (change, outcome) = client.edit(Command::ToggleMatchUse { match_id }).await?;
            report_edit(&change, outcome);
        }
        CliCommand::EditManager { manager, logo, bio } => {
            let (change, outcome) = client
                .edit(Command::EditManager {
                    manager_id: ManagerId::new(&manager),
                    club_logo_file: logo,
                    bio,
                })
                .await?;
            report_edit(&change, outcome);
        }
        CliCommand::ToggleActive { manager } => {
            let (change, outcome) = client
                .edit(Command::ToggleManagerActive {
                    manager_id: ManagerId::new(&manager),
                })
                .await?;
            report_edit(&change, outcome);
        }
        CliCommand::Reset => {
            let (change, outcome) = client.edit(Command::ResetLeague).await?;
            report_edit(&change, outcome);
        }
        CliCommand::Watch => watch(&mut client, &cli.server).await?,
    }

    Ok(())
}
