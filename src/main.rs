//! CLI consumer for the lookup engine
//!
//! Thin presentation layer: parses arguments, runs one operation, prints
//! the extracted records. All formatting decisions live here; the library
//! only produces typed values.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};

use rift_scout::domain::stats::DEFAULT_WINDOW;
use rift_scout::domain::{AggregateStats, MatchRecord, PlayerProfile, RiotId};
use rift_scout::infrastructure::logging::init_logging;
use rift_scout::{AppConfig, HttpFetcher, LookupService};

const USAGE: &str = "\
usage: rift-scout <command> <args>

commands:
  profile <name#tag>            player profile
  matches <name#tag> [count]    recent matches (default 5)
  match   <name#tag> <index>    one match, 1 = most recent
  stats   <name#tag>            aggregate performance analysis
  compare <name#tag> <name#tag> side-by-side profiles

RIFT_SCOUT_CONFIG may point to a JSON config file.";

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!("{USAGE}");
    };

    let config = match std::env::var("RIFT_SCOUT_CONFIG") {
        Ok(path) => AppConfig::load(Path::new(&path))?,
        Err(_) => AppConfig::default(),
    };

    let fetcher = Arc::new(HttpFetcher::new(&config.user_agent)?);
    let service = LookupService::new(fetcher, config)?;

    match (command.as_str(), rest) {
        ("profile", [who]) => {
            let profile = service.profile(&RiotId::parse(who)).await?;
            print_profile(&profile);
        }
        ("matches", [who, count @ ..]) => {
            let count: usize = match count {
                [] => 5,
                [n] => n.parse()?,
                _ => bail!("{USAGE}"),
            };
            let records = service.matches(&RiotId::parse(who)).await?;
            for (i, record) in records.iter().take(count).enumerate() {
                print_match(i + 1, record);
            }
        }
        ("match", [who, index]) => {
            let index: usize = index.parse()?;
            let record = service.match_at(&RiotId::parse(who), index).await?;
            print_match(index, &record);
            if !record.items.is_empty() {
                println!("  items: {}", record.items.join(", "));
            }
        }
        ("stats", [who]) => {
            let stats = service.stats(&RiotId::parse(who), DEFAULT_WINDOW).await?;
            print_stats(&stats);
        }
        ("compare", [first, second]) => {
            let (a, b) = service
                .compare(&RiotId::parse(first), &RiotId::parse(second))
                .await?;
            print_profile(&a);
            println!("--");
            print_profile(&b);
        }
        _ => bail!("{USAGE}"),
    }

    Ok(())
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

fn print_profile(profile: &PlayerProfile) {
    println!("{}", opt(&profile.summoner_name));
    println!("  rank:        {}", profile.rank_display());
    println!("  lp:          {}", opt(&profile.league_points));
    println!("  win rate:    {}", opt(&profile.win_rate));
    println!("  record:      {}W / {}L", profile.wins, profile.losses);
    println!("  level:       {}", opt(&profile.level));
    if let Some(ladder) = &profile.ladder_rank {
        println!("  ladder rank: #{ladder}");
    }
    if let Some(most_played) = &profile.most_played {
        println!("  most played: {most_played}");
    }
    if let Some(form) = &profile.recent_form {
        println!("  recent form: {form}");
    }
    println!("  url:         {}", profile.profile_url);
}

fn print_match(index: usize, record: &MatchRecord) {
    let outcome = match record.outcome {
        Some(rift_scout::domain::MatchOutcome::Win) => "WIN ",
        Some(rift_scout::domain::MatchOutcome::Loss) => "LOSS",
        None => "?   ",
    };
    let kda = match record.kda {
        Some(kda) => format!(
            "{}/{}/{} ({:.2})",
            kda.kills,
            kda.deaths,
            kda.assists,
            kda.ratio()
        ),
        None => "-".to_string(),
    };
    let score = record
        .op_score
        .map_or(String::new(), |s| format!(" | OP {s:.1}/10"));
    let award = match record.award {
        Some(rift_scout::domain::Award::Mvp) => " [MVP]",
        Some(rift_scout::domain::Award::Ace) => " [ACE]",
        None => "",
    };
    println!(
        "{index:>2}. {outcome} {} ({}) KDA {kda}{score}{award} {} {}",
        record.champion,
        opt(&record.game_mode),
        opt(&record.time_ago),
        opt(&record.duration),
    );
}

fn print_stats(stats: &AggregateStats) {
    print_profile(&stats.profile);
    println!();
    println!("last {} matches:", stats.window);
    match stats.win_rate {
        Some(rate) => println!("  win rate:     {rate}%"),
        None => println!("  win rate:     no data"),
    }
    match stats.average_op_score {
        Some(score) => println!("  avg OP score: {score:.1}/10"),
        None => println!("  avg OP score: no data"),
    }
    println!("  awards:       {} MVP, {} ACE", stats.mvp_count, stats.ace_count);
    if !stats.most_played.is_empty() {
        let ranked: Vec<String> = stats
            .most_played
            .iter()
            .map(|(champion, count)| format!("{champion} ({count})"))
            .collect();
        println!("  most played:  {}", ranked.join(", "));
    }
    for best in &stats.best_performances {
        if let Some(score) = best.op_score {
            println!("  best:         {}: {score:.1}/10", best.champion);
        }
    }
}
