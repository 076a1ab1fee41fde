use std::fmt;

use rand::Rng;
use rand::distributions::Standard;

use crate::rating::{Rating, RatingModel};

/// Result of one two-way comparison, seen from the first participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PairwiseOutcome {
    WinA,
    WinB,
    Draw,
}

impl PairwiseOutcome {
    /// Normalized score pair for (A, B).
    pub fn scores(self) -> (f64, f64) {
        match self {
            Self::WinA => (1.0, 0.0),
            Self::WinB => (0.0, 1.0),
            Self::Draw => (0.5, 0.5),
        }
    }

    /// Maps a uniform draw onto `[draw | win_a | win_b]` bands laid out on `[0, 1)`.
    pub fn from_uniform(u: f64, win_a: f64, win_b: f64) -> Self {
        let draw = 1.0 - win_a - win_b;
        if u < draw {
            Self::Draw
        } else if u < draw + win_a {
            Self::WinA
        } else {
            Self::WinB
        }
    }
}

/// Source of pairwise results. Production code samples from the rating model;
/// tests can replay a fixed script.
pub trait OutcomeSampler {
    fn sample(&mut self, a: &Rating, b: &Rating) -> PairwiseOutcome;
}

pub struct RatingSampler<R> {
    model: RatingModel,
    rng: R,
}

impl<R: Rng> RatingSampler<R> {
    pub fn new(model: RatingModel, rng: R) -> Self {
        Self { model, rng }
    }

    pub fn model(&self) -> &RatingModel {
        &self.model
    }
}

impl<R: Rng> OutcomeSampler for RatingSampler<R> {
    fn sample(&mut self, a: &Rating, b: &Rating) -> PairwiseOutcome {
        let win_a = self.model.win_probability(a, b);
        let win_b = self.model.win_probability(b, a);
        // Both directions subtract the same non-negative margin, so the draw band is never negative.
        debug_assert!(win_a + win_b <= 1.0 + 4.0 * f64::EPSILON);
        let u: f64 = self.rng.sample(Standard);
        PairwiseOutcome::from_uniform(u, win_a, win_b)
    }
}

/// Tally of a self-pairing run. Points use the normalized 1 / ½ / 0 split.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrawCheck {
    pub wins_a: u64,
    pub wins_b: u64,
    pub draws: u64,
    pub points_a: f64,
    pub points_b: f64,
}

impl DrawCheck {
    pub fn trials(&self) -> u64 {
        self.wins_a + self.wins_b + self.draws
    }

    pub fn draw_rate(&self) -> f64 {
        let trials = self.trials();
        if trials == 0 {
            return 0.0;
        }
        self.draws as f64 / trials as f64
    }
}

impl fmt::Display for DrawCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Player 0 wins: {}", self.wins_a)?;
        writeln!(f, "Player 1 wins: {}", self.wins_b)?;
        writeln!(f, "Draws: {} ({:.2}%)", self.draws, self.draw_rate() * 100.0)?;
        write!(f, "Points: {:.1} - {:.1}", self.points_a, self.points_b)
    }
}

/// Pits `rating` against itself `trials` times and tallies the outcomes.
pub fn draw_check<S: OutcomeSampler + ?Sized>(
    sampler: &mut S,
    rating: &Rating,
    trials: u64,
) -> DrawCheck {
    let mut tally = DrawCheck::default();
    for _ in 0..trials {
        let outcome = sampler.sample(rating, rating);
        match outcome {
            PairwiseOutcome::WinA => tally.wins_a += 1,
            PairwiseOutcome::WinB => tally.wins_b += 1,
            PairwiseOutcome::Draw => tally.draws += 1,
        }
        let (a, b) = outcome.scores();
        tally.points_a += a;
        tally.points_b += b;
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RatingModelParams;
    use crate::three_way::tests::ScriptedSampler;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn sampler(seed: u64) -> RatingSampler<SmallRng> {
        let model = RatingModel::new(RatingModelParams::default()).unwrap();
        RatingSampler::new(model, SmallRng::seed_from_u64(seed))
    }

    #[test]
    fn uniform_bands_are_draw_then_a_then_b() {
        let (win_a, win_b) = (0.5, 0.3);
        assert_eq!(PairwiseOutcome::from_uniform(0.0, win_a, win_b), PairwiseOutcome::Draw);
        assert_eq!(PairwiseOutcome::from_uniform(0.19, win_a, win_b), PairwiseOutcome::Draw);
        assert_eq!(PairwiseOutcome::from_uniform(0.21, win_a, win_b), PairwiseOutcome::WinA);
        assert_eq!(PairwiseOutcome::from_uniform(0.69, win_a, win_b), PairwiseOutcome::WinA);
        assert_eq!(PairwiseOutcome::from_uniform(0.71, win_a, win_b), PairwiseOutcome::WinB);
        assert_eq!(PairwiseOutcome::from_uniform(0.999, win_a, win_b), PairwiseOutcome::WinB);
    }

    #[test]
    fn scores_sum_to_one() {
        for outcome in [PairwiseOutcome::WinA, PairwiseOutcome::WinB, PairwiseOutcome::Draw] {
            let (a, b) = outcome.scores();
            assert_eq!(a + b, 1.0);
        }
    }

    #[test]
    fn identical_ratings_draw_at_configured_rate() {
        let mut sampler = sampler(7);
        let rating = Rating::new(25.0, 3.0);
        let tally = draw_check(&mut sampler, &rating, 10_000);
        assert_eq!(tally.trials(), 10_000);
        assert!(
            (tally.draw_rate() - 0.05).abs() < 0.01,
            "draw rate {}",
            tally.draw_rate()
        );
        let imbalance = tally.wins_a.abs_diff(tally.wins_b) as f64 / 10_000.0;
        assert!(imbalance < 0.05, "wins {} vs {}", tally.wins_a, tally.wins_b);
        assert_eq!(tally.points_a + tally.points_b, 10_000.0);
    }

    #[test]
    fn draw_check_credits_half_a_point_per_draw() {
        let mut sampler = ScriptedSampler::new(&[
            PairwiseOutcome::WinA,
            PairwiseOutcome::Draw,
            PairwiseOutcome::Draw,
            PairwiseOutcome::WinB,
            PairwiseOutcome::WinA,
        ]);
        let tally = draw_check(&mut sampler, &Rating::new(25.0, 3.0), 5);
        assert_eq!((tally.wins_a, tally.wins_b, tally.draws), (2, 1, 2));
        assert_eq!(tally.points_a, 3.0);
        assert_eq!(tally.points_b, 2.0);
        assert_eq!(sampler.remaining(), 0);
    }

    #[test]
    fn stronger_rating_wins_more_often() {
        let mut sampler = sampler(11);
        let strong = Rating::new(40.0, 3.0);
        let weak = Rating::new(10.0, 3.0);
        let mut wins = [0u32; 3];
        for _ in 0..5_000 {
            match sampler.sample(&strong, &weak) {
                PairwiseOutcome::WinA => wins[0] += 1,
                PairwiseOutcome::WinB => wins[1] += 1,
                PairwiseOutcome::Draw => wins[2] += 1,
            }
        }
        assert!(wins[0] > wins[1] * 3, "{wins:?}");
    }

    #[test]
    fn same_seed_replays_same_outcomes() {
        let a = Rating::new(27.0, 2.0);
        let b = Rating::new(24.0, 5.0);
        let mut first = sampler(42);
        let mut second = sampler(42);
        for _ in 0..1_000 {
            assert_eq!(first.sample(&a, &b), second.sample(&a, &b));
        }
    }

    #[test]
    fn draw_check_display_reports_counts() {
        let tally = DrawCheck {
            wins_a: 3,
            wins_b: 2,
            draws: 5,
            points_a: 5.5,
            points_b: 4.5,
        };
        let text = tally.to_string();
        assert!(text.contains("Player 0 wins: 3"));
        assert!(text.contains("Player 1 wins: 2"));
        assert!(text.contains("Draws: 5 (50.00%)"));
        assert!(text.ends_with("Points: 5.5 - 4.5"));
    }
}
