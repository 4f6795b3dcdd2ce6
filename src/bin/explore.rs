//! Exploration Binary
//!
//! Enumerates every reachable state of a multi-player bandit game up to a
//! bounded depth and prints the exact distribution over the leaves.
//!
//! Means accept three forms: omitted (fully symbolic `mu_1..mu_K`),
//! fractions like `4/5,1/5` (exact rational arithmetic), or decimals like
//! `0.8,0.2` (floating arithmetic).

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use banditree::*;
use clap::Parser;

#[derive(Parser)]
#[command(name = "explore", about = "Complete tree exploration for multi-player bandits")]
struct Args {
    /// Number of players M (1 <= M <= K)
    #[arg(long, default_value_t = 2)]
    players: usize,
    /// Number of arms K (M <= K <= 10); ignored when --means is given
    #[arg(long, default_value_t = 2)]
    arms: usize,
    /// Exploration depth (0 <= depth <= 5)
    #[arg(long, default_value_t = 1)]
    depth: u32,
    /// Comma-separated arm means; omit for symbolic means
    #[arg(long, value_delimiter = ',')]
    means: Vec<String>,
    /// Decision rule shared by every player
    #[arg(long, value_enum, default_value_t = Rule::Greedy)]
    rule: Rule,
    /// Feedback the decision rule indexes on
    #[arg(long, value_enum, default_value_t = FeedbackArg::Weighted)]
    feedback: FeedbackArg,
    /// Emit the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Rule {
    Greedy,
    Ucb,
    Klucb,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FeedbackArg {
    Sensing,
    Transmission,
    Weighted,
}

impl Args {
    fn policy(&self) -> Policy {
        let feedback = match self.feedback {
            FeedbackArg::Sensing => Feedback::Sensing,
            FeedbackArg::Transmission => Feedback::Transmission,
            FeedbackArg::Weighted => Feedback::Weighted,
        };
        match self.rule {
            Rule::Greedy => Policy::Greedy(feedback),
            Rule::Ucb => Policy::Ucb(feedback),
            Rule::Klucb => Policy::KlUcb(feedback),
        }
    }
}

fn main() -> Result<()> {
    banditree::core::log();
    let args = Args::parse();
    let report = if args.means.is_empty() {
        finish(&args, Exploration::new(args.players, symbol_means(args.arms)))?
    } else if args.means.iter().any(|m| m.contains('/')) {
        finish(&args, Exploration::new(args.players, fractions(&args.means)?))?
    } else {
        finish(&args, Exploration::new(args.players, decimals(&args.means)?))?
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn finish<S>(args: &Args, exploration: Exploration<S>) -> Result<Report>
where
    S: Scalar,
{
    exploration.rule(args.policy()).depth(args.depth).report()
}

fn fractions(means: &[String]) -> Result<Vec<Rational>> {
    means
        .iter()
        .map(|m| {
            let Some((num, den)) = m.split_once('/') else {
                bail!("mixed fraction and decimal means: {}", m);
            };
            Ok(Rational::new(
                num.trim().parse().context("fraction numerator")?,
                den.trim().parse().context("fraction denominator")?,
            ))
        })
        .collect()
}

fn decimals(means: &[String]) -> Result<Vec<f64>> {
    means
        .iter()
        .map(|m| m.trim().parse::<f64>().with_context(|| format!("mean {}", m)))
        .collect()
}
