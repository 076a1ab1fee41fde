use crate::error::{SimError, SimResult};
use crate::outcome::{OutcomeSampler, PairwiseOutcome};
use crate::rating::Rating;

/// Points handed out by every three-way match.
pub const MATCH_POINTS: u32 = 9;

/// Points for (participant0, participant1, participant2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ThreeWayOutcome(pub [u32; 3]);

impl ThreeWayOutcome {
    pub fn points(&self) -> [u32; 3] {
        self.0
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

/// Whether `(r01, r12)` leaves the ordering open until P0 and P2 meet.
pub fn needs_tiebreak(r01: PairwiseOutcome, r12: PairwiseOutcome) -> bool {
    use PairwiseOutcome::*;
    matches!((r01, r12), (WinA, WinB) | (WinB, WinA))
}

/// Scoring table for a three-way match built from pairwise results.
///
/// `r02` is only consulted for the two combinations where P1 beats or loses to
/// both neighbours; every other combination is settled by `r01` and `r12`.
/// An open combination without `r02` has no rule and is reported as an error.
pub fn score_table(
    r01: PairwiseOutcome,
    r12: PairwiseOutcome,
    r02: Option<PairwiseOutcome>,
) -> SimResult<ThreeWayOutcome> {
    use PairwiseOutcome::*;
    let points = match (r01, r12, r02) {
        (Draw, Draw, _) => [3, 3, 3],
        (WinA, Draw, _) => [5, 2, 2],
        (WinA, WinA, _) => [5, 3, 1],
        (WinA, WinB, Some(Draw)) => [4, 1, 4],
        (WinA, WinB, Some(WinA)) => [5, 1, 3],
        (WinA, WinB, Some(WinB)) => [3, 1, 5],
        (Draw, WinA, _) => [4, 4, 1],
        (Draw, WinB, _) => [2, 2, 5],
        (WinB, Draw, _) => [1, 4, 4],
        (WinB, WinB, _) => [1, 3, 5],
        (WinB, WinA, Some(Draw)) => [2, 5, 2],
        (WinB, WinA, Some(WinA)) => [3, 5, 1],
        (WinB, WinA, Some(WinB)) => [1, 5, 3],
        (WinA, WinB, None) | (WinB, WinA, None) => {
            return Err(SimError::Unresolved { r01, r12, r02 });
        }
    };
    Ok(ThreeWayOutcome(points))
}

/// Plays P0 v P1 and P1 v P2, adding P0 v P2 only when the first two leave it open.
pub fn resolve<S: OutcomeSampler + ?Sized>(
    sampler: &mut S,
    players: [&Rating; 3],
) -> SimResult<ThreeWayOutcome> {
    let [p0, p1, p2] = players;
    let r01 = sampler.sample(p0, p1);
    let r12 = sampler.sample(p1, p2);
    let r02 = needs_tiebreak(r01, r12).then(|| sampler.sample(p0, p2));
    let outcome = score_table(r01, r12, r02)?;
    debug_assert_eq!(outcome.total(), MATCH_POINTS);
    Ok(outcome)
}
