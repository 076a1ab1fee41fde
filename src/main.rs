use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use trio_sim::outcome::{RatingSampler, draw_check};
use trio_sim::rating::{Rating, RatingModel, RatingModelParams};
use trio_sim::roster::load_roster;
use trio_sim::schedule::{BuiltinSchedule, RoundSchedule};
use trio_sim::simulation::{DEFAULT_RUNS, run_monte_carlo};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ScheduleArg {
    #[value(alias = "adamh-semifinal", alias = "reply-17")]
    Semifinal,
    #[value(alias = "january", alias = "adamh-january")]
    JanuarySemifinal,
    #[value(alias = "rr", alias = "reply-25")]
    RoundRobin,
    #[value(alias = "single", alias = "identical")]
    SingleMatch,
}

impl From<ScheduleArg> for BuiltinSchedule {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::Semifinal => BuiltinSchedule::Semifinal,
            ScheduleArg::JanuarySemifinal => BuiltinSchedule::JanuarySemifinal,
            ScheduleArg::RoundRobin => BuiltinSchedule::RoundRobin,
            ScheduleArg::SingleMatch => BuiltinSchedule::SingleMatch,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
struct ModelArgs {
    /// Prior mean of an unknown participant
    #[arg(long, default_value_t = RatingModelParams::default().mu0)]
    mu0: f64,

    /// Prior uncertainty of an unknown participant
    #[arg(long, default_value_t = RatingModelParams::default().sigma0)]
    sigma0: f64,

    /// Performance spread of a single match
    #[arg(long, default_value_t = RatingModelParams::default().beta)]
    beta: f64,

    /// Dynamics factor
    #[arg(long, default_value_t = RatingModelParams::default().tau)]
    tau: f64,

    /// Probability that two equal participants draw, in [0, 1)
    #[arg(long, default_value_t = RatingModelParams::default().draw_probability)]
    draw_probability: f64,
}

impl From<ModelArgs> for RatingModelParams {
    fn from(args: ModelArgs) -> Self {
        RatingModelParams {
            mu0: args.mu0,
            sigma0: args.sigma0,
            beta: args.beta,
            tau: args.tau,
            draw_probability: args.draw_probability,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Repeat a round schedule over a roster and print accumulated standings
    Simulate {
        /// Roster file with `name,mean,rawUncertainty` lines
        #[arg(long)]
        roster: PathBuf,

        /// Built-in round schedule
        #[arg(long, value_enum, default_value_t = ScheduleArg::RoundRobin, conflicts_with = "schedule_file")]
        schedule: ScheduleArg,

        /// TOML file describing a custom round schedule
        #[arg(long, value_name = "FILE")]
        schedule_file: Option<PathBuf>,

        /// Number of Monte Carlo repetitions
        #[arg(long, default_value_t = DEFAULT_RUNS)]
        runs: usize,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Also print a table sorted by score
        #[arg(long)]
        ranked: bool,

        #[command(flatten)]
        model: ModelArgs,
    },
    /// Pit one rating against itself and count wins and draws
    DrawCheck {
        /// Mean of the rating (defaults to mu0)
        #[arg(long)]
        mean: Option<f64>,

        /// Uncertainty of the rating (defaults to sigma0)
        #[arg(long)]
        uncertainty: Option<f64>,

        /// Number of self-pairings to sample
        #[arg(long, default_value_t = 1_000)]
        trials: u64,

        /// Seed for a reproducible run (drawn from entropy when omitted)
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        model: ModelArgs,
    },
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Monte Carlo estimator of standings in three-player match tournaments",
    long_about = None
)]
struct Cli {
    /// Log per-run progress
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install logger")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Simulate {
            roster,
            schedule,
            schedule_file,
            runs,
            seed,
            ranked,
            model,
        } => {
            let participants = load_roster(&roster)
                .with_context(|| format!("loading roster {}", roster.display()))?;
            info!(participants = participants.len(), path = %roster.display(), "roster loaded");
            let schedule = match schedule_file {
                Some(path) => RoundSchedule::load(&path)?,
                None => BuiltinSchedule::from(schedule).schedule(),
            };
            let standings =
                run_monte_carlo(participants, &schedule, runs.max(1), model.into(), seed)?;
            print!("{standings}");
            if ranked {
                println!();
                print!("{}", standings.render_ranked());
            }
        }
        Command::DrawCheck {
            mean,
            uncertainty,
            trials,
            seed,
            model,
        } => {
            let params = RatingModelParams::from(model);
            let model = RatingModel::new(params)?;
            let prior = params.default_rating();
            let rating = Rating::new(
                mean.unwrap_or(prior.mean),
                uncertainty.unwrap_or(prior.uncertainty),
            );
            let seed = seed.unwrap_or_else(|| SmallRng::from_entropy().next_u64());
            info!(?rating, trials, seed, "running draw check");
            let mut sampler = RatingSampler::new(model, SmallRng::seed_from_u64(seed));
            let tally = draw_check(&mut sampler, &rating, trials);
            println!("{tally}");
            println!(
                "Configured draw probability: {:.2}%",
                sampler.model().params().draw_probability * 100.0
            );
        }
    }

    Ok(())
}
