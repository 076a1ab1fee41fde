use std::fmt;

use anyhow::{Context, Result, bail};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use crate::outcome::{OutcomeSampler, RatingSampler};
use crate::rating::{RatingModel, RatingModelParams};
use crate::schedule::RoundSchedule;
use crate::tournament::{Participant, Tournament};

pub const DEFAULT_RUNS: usize = 1_000;
const PROGRESS_EVERY: usize = 10_000;
const BANNER_WIDTH: usize = 24;

#[derive(Clone, Debug, PartialEq)]
pub struct StandingRow {
    pub name: String,
    pub score: u64,
    pub average: f64,
}

/// Accumulated totals after a simulation, in roster order.
#[derive(Clone, Debug, PartialEq)]
pub struct Standings {
    pub title: String,
    pub runs: usize,
    pub rows: Vec<StandingRow>,
}

impl Standings {
    pub fn from_tournament(title: &str, runs: usize, tournament: &Tournament) -> Self {
        let divisor = runs.max(1) as f64;
        let rows = tournament
            .participants()
            .iter()
            .zip(tournament.scores())
            .map(|(participant, &score)| StandingRow {
                name: participant.name.clone(),
                score,
                average: score as f64 / divisor,
            })
            .collect();
        Self {
            title: title.to_string(),
            runs,
            rows,
        }
    }

    /// Rows by descending score; ties keep roster order.
    pub fn ranked(&self) -> Vec<&StandingRow> {
        let mut rows: Vec<&StandingRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        rows
    }

    pub fn render_ranked(&self) -> String {
        let ranked = self.ranked();
        let name_width = ranked
            .iter()
            .map(|row| row.name.len())
            .max()
            .unwrap_or(0)
            .max("Participant".len());
        let score_width = ranked
            .iter()
            .map(|row| row.score.to_string().len())
            .max()
            .unwrap_or(0)
            .max("Score".len());
        let average_width = "Avg/run".len();

        let mut out = format!("Runs: {}\n", self.runs);
        out.push_str(&format!(
            "{:>4} | {:<name_width$} | {:>score_width$} | {:>average_width$}\n",
            "Rank", "Participant", "Score", "Avg/run",
        ));
        out.push_str(&format!(
            "{:-<4}-+-{:-<name_width$}-+-{:-<score_width$}-+-{:-<average_width$}\n",
            "", "", "", "",
        ));
        for (rank, row) in ranked.iter().enumerate() {
            out.push_str(&format!(
                "{:>4} | {:<name_width$} | {:>score_width$} | {:>average_width$.3}\n",
                rank + 1,
                row.name,
                row.score,
                row.average,
            ));
        }
        out
    }
}

impl fmt::Display for Standings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(BANNER_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{rule}")?;
        for row in &self.rows {
            writeln!(f, "{}: {}", row.name, row.score)?;
        }
        writeln!(f, "{rule}")
    }
}

/// Plays `schedule` `runs` times without clearing scores between runs.
///
/// Every round is checked against the roster before the first match, so a bad
/// schedule fails without touching the accumulator.
pub fn run_schedule<S: OutcomeSampler + ?Sized>(
    tournament: &mut Tournament,
    schedule: &RoundSchedule,
    runs: usize,
    sampler: &mut S,
) -> Result<()> {
    for (idx, round) in schedule.rounds.iter().enumerate() {
        tournament
            .validate_round(round)
            .with_context(|| format!("schedule {:?}, round {}", schedule.name, idx + 1))?;
    }

    for run in 0..runs {
        for round in &schedule.rounds {
            tournament.run_round(round, sampler)?;
        }
        if (run + 1) % PROGRESS_EVERY == 0 {
            debug!(completed = run + 1, runs, "simulation progress");
        }
    }
    Ok(())
}

/// Builds a seeded sampler over `participants` and runs the schedule.
///
/// Without a seed one is drawn from entropy and logged so the run can be replayed.
pub fn run_monte_carlo(
    participants: Vec<Participant>,
    schedule: &RoundSchedule,
    runs: usize,
    params: RatingModelParams,
    seed: Option<u64>,
) -> Result<Standings> {
    if participants.len() < schedule.participants_required() {
        bail!(
            "schedule {:?} needs {} participants, roster has {}",
            schedule.name,
            schedule.participants_required(),
            participants.len()
        );
    }
    let model = RatingModel::new(params).context("invalid rating model")?;
    let seed = seed.unwrap_or_else(|| SmallRng::from_entropy().next_u64());
    let mut sampler = RatingSampler::new(model, SmallRng::seed_from_u64(seed));
    let mut tournament = Tournament::new(participants);

    info!(
        schedule = %schedule.name,
        rounds = schedule.rounds.len(),
        matches = schedule.matches_per_run(),
        runs,
        seed,
        draw_margin = model.draw_margin(),
        "starting simulation"
    );
    run_schedule(&mut tournament, schedule, runs, &mut sampler)?;
    let total: u64 = tournament.scores().iter().sum();
    info!(total_points = total, "simulation finished");

    Ok(Standings::from_tournament(&schedule.title, runs, &tournament))
}
