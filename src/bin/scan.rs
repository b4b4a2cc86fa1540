//! One-shot recommendation CLI
//!
//! Loads a fixed-line prop snapshot, a market-odds snapshot and a player→team
//! map from JSON files, then prints the best parlay, any arbitrage
//! opportunities, and a stake recommendation for the top pick.
//!
//! Usage:
//!   scan --fixed props.json --market odds.json --teams teams.json

use anyhow::Context;
use clap::Parser;
use prop_edge::arbitrage::ArbitrageDetector;
use prop_edge::config::EngineConfig;
use prop_edge::correlation::{CorrelationModel, TeamLookup};
use prop_edge::edge::compute_edges;
use prop_edge::parlay::{ParlayBuilder, ParlayEstimator};
use prop_edge::stake::{Bankroll, StakeSizer};
use prop_edge::types::{FixedLineProp, MarketProp, MatchedProp};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scan", about = "Find +EV parlays and arbitrage in prop snapshots")]
struct Args {
    /// Fixed-line prop snapshot (JSON array)
    #[arg(long)]
    fixed: PathBuf,

    /// Market odds snapshot (JSON array)
    #[arg(long)]
    market: PathBuf,

    /// Player to team map (JSON object)
    #[arg(long)]
    teams: Option<PathBuf>,

    /// Engine config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bankroll for stake sizing
    #[arg(long, default_value = "1000")]
    bankroll: Decimal,

    /// Decimal odds assumed for the stake recommendation
    #[arg(long, default_value = "2.0")]
    odds: Decimal,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = EngineConfig::load(args.config.as_deref()).context("loading config")?;

    let fixed: Vec<FixedLineProp> = read_json(&args.fixed).context("reading fixed-line props")?;
    let market: Vec<MarketProp> = read_json(&args.market).context("reading market odds")?;
    let lookup = match &args.teams {
        Some(path) => TeamLookup::from_json_reader(File::open(path)?)
            .context("reading team map")?,
        None => TeamLookup::default(),
    };
    info!(
        fixed = fixed.len(),
        market = market.len(),
        teams = lookup.len(),
        "snapshots loaded"
    );

    let matched = compute_edges(&fixed, &market)?;
    if matched.is_empty() {
        println!("No matching props between the two snapshots.");
        return Ok(());
    }
    let positive = matched.iter().filter(|m| m.is_positive).count();
    info!(matched = matched.len(), positive, "edges computed");

    print_board(&matched);

    let model = CorrelationModel::new(lookup.clone(), config.correlation.clone());
    let builder = ParlayBuilder::new(
        ParlayEstimator::new(model),
        config.edge.clone(),
        config.parlay.clone(),
    );
    let parlay = builder.build(&matched);

    println!("\n=== Recommended parlay ({} legs) ===", parlay.legs.len());
    for leg in &parlay.legs {
        println!(
            "  {} {} {} {} (edge {:.1}%, grade {})",
            leg.player,
            leg.stat_type,
            leg.direction,
            leg.line,
            leg.edge * dec!(100),
            leg.grade(),
        );
    }
    println!(
        "  raw {:.1}%  penalty {:.3}  adjusted {:.1}%  avg edge {:.1}%",
        parlay.raw_probability * dec!(100),
        parlay.penalty,
        parlay.adjusted_probability * dec!(100),
        parlay.average_edge * dec!(100),
    );
    if parlay.used_fallback {
        println!("  note: too few props cleared the edge threshold, showing best available");
    }
    if let Some(warning) = &parlay.warning {
        println!("  {warning}");
    }

    let detector = ArbitrageDetector::new(config.arbitrage.clone());
    let candidates: Vec<MatchedProp> = matched.iter().filter(|m| m.is_positive).cloned().collect();
    let mut arbs = detector.find_two_way(&candidates);
    arbs.extend(detector.find_three_way(&candidates));
    if arbs.is_empty() {
        println!("\nNo arbitrage opportunities.");
    } else {
        println!("\n=== Arbitrage ===");
        for opp in &arbs {
            let names: Vec<&str> = opp.legs.iter().map(|l| l.player.as_str()).collect();
            println!(
                "  {} | profit {:.2}% | stakes {}",
                names.join(" / "),
                opp.profit_pct,
                opp.legs
                    .iter()
                    .map(|l| format!("{:.1}%", l.stake * dec!(100)))
                    .collect::<Vec<_>>()
                    .join(" + "),
            );
        }
    }
    let advisory = detector.find_correlation_candidates(&matched, &lookup);
    for c in &advisory {
        println!(
            "  candidate: {} & {} ({}) {} / {} (correlated, advisory only)",
            c.players.0, c.players.1, c.team, c.directions.0, c.directions.1
        );
    }

    if let Some(best) = matched.first() {
        let sizer = StakeSizer::new(config.stake.clone());
        let bankroll = Bankroll::new(args.bankroll);
        let rec = sizer.recommend(bankroll.balance(), args.odds, best.edge)?;
        println!(
            "\nStake for top pick ({}): ${} ({:.2}% of bankroll)",
            best.player, rec.amount, rec.percentage
        );
        let limits = bankroll.limits();
        println!(
            "Limits: min ${:.2}  max ${:.2}  unit ${:.2}",
            limits.min_bet, limits.max_bet, limits.suggested_unit
        );
    }

    Ok(())
}

fn print_board(matched: &[MatchedProp]) {
    println!("=== Board (top 10 by edge) ===");
    for m in matched.iter().take(10) {
        println!(
            "  {:<24} {:<10} {:>5} {} vs {} | edge {:>6.1}% {}",
            m.player,
            m.stat_type,
            m.direction,
            m.line,
            m.market_line,
            m.edge * dec!(100),
            m.grade(),
        );
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(serde_json::from_reader(file)?)
}
