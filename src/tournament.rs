use crate::error::{SimError, SimResult};
use crate::outcome::OutcomeSampler;
use crate::rating::Rating;
use crate::three_way::{ThreeWayOutcome, resolve};

/// Roster indices of the three participants meeting in one match.
pub type Group = [usize; 3];

#[derive(Clone, Debug, PartialEq)]
pub struct Participant {
    pub name: String,
    pub rating: Rating,
}

impl Participant {
    pub fn new(name: impl Into<String>, rating: Rating) -> Self {
        Self {
            name: name.into(),
            rating,
        }
    }
}

/// A roster plus the score accumulator the matches add into.
///
/// Scores only ever grow; they are cleared explicitly with [`Tournament::reset_scores`].
#[derive(Clone, Debug)]
pub struct Tournament {
    participants: Vec<Participant>,
    scores: Vec<u64>,
}

impl Tournament {
    pub fn new(participants: Vec<Participant>) -> Self {
        let scores = vec![0; participants.len()];
        Self {
            participants,
            scores,
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn reset_scores(&mut self) {
        self.scores.iter_mut().for_each(|score| *score = 0);
    }

    /// Checks that every index is on the roster and nobody plays twice in the round.
    pub fn validate_round(&self, groups: &[Group]) -> SimResult<()> {
        let mut seen = vec![false; self.len()];
        for &index in groups.iter().flatten() {
            if index >= self.len() {
                return Err(SimError::IndexOutOfRange {
                    index,
                    roster_size: self.len(),
                });
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(SimError::DuplicateParticipant { index });
            }
        }
        Ok(())
    }

    /// Plays one match and adds the resulting points to the three participants.
    pub fn apply_match<S: OutcomeSampler + ?Sized>(
        &mut self,
        group: Group,
        sampler: &mut S,
    ) -> SimResult<ThreeWayOutcome> {
        self.validate_round(&[group])?;
        let [i0, i1, i2] = group;
        let outcome = resolve(
            sampler,
            [
                &self.participants[i0].rating,
                &self.participants[i1].rating,
                &self.participants[i2].rating,
            ],
        )?;
        for (index, points) in group.into_iter().zip(outcome.points()) {
            self.scores[index] += u64::from(points);
        }
        Ok(outcome)
    }

    /// Validates the round, then plays its groups in listed order.
    pub fn run_round<S: OutcomeSampler + ?Sized>(
        &mut self,
        groups: &[Group],
        sampler: &mut S,
    ) -> SimResult<()> {
        self.validate_round(groups)?;
        for &group in groups {
            self.apply_match(group, sampler)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::PairwiseOutcome::*;
    use crate::outcome::RatingSampler;
    use crate::rating::{RatingModel, RatingModelParams};
    use crate::three_way::MATCH_POINTS;
    use crate::three_way::tests::ScriptedSampler;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn roster(size: usize) -> Vec<Participant> {
        (0..size)
            .map(|i| Participant::new(format!("p{i}"), Rating::new(20.0 + i as f64, 3.0)))
            .collect()
    }

    fn seeded(seed: u64) -> RatingSampler<SmallRng> {
        let model = RatingModel::new(RatingModelParams::default()).unwrap();
        RatingSampler::new(model, SmallRng::seed_from_u64(seed))
    }

    #[test]
    fn apply_match_hands_out_nine_points() {
        let mut tournament = Tournament::new(roster(3));
        let mut sampler = seeded(3);
        let mut previous = 0;
        for _ in 0..500 {
            tournament.apply_match([0, 1, 2], &mut sampler).unwrap();
            let total: u64 = tournament.scores().iter().sum();
            assert_eq!(total - previous, u64::from(MATCH_POINTS));
            previous = total;
        }
    }

    #[test]
    fn apply_match_accumulates_into_the_right_slots() {
        let mut tournament = Tournament::new(roster(5));
        let mut sampler = ScriptedSampler::new(&[WinA, WinA, Draw, WinB]);
        tournament.apply_match([4, 0, 2], &mut sampler).unwrap();
        assert_eq!(tournament.scores(), &[3, 0, 1, 0, 5]);
        tournament.apply_match([4, 0, 2], &mut sampler).unwrap();
        assert_eq!(tournament.scores(), &[5, 0, 6, 0, 7]);
    }

    #[test]
    fn run_round_plays_groups_in_order() {
        let mut tournament = Tournament::new(roster(6));
        let mut sampler = ScriptedSampler::new(&[Draw, Draw, WinB, WinB]);
        tournament.run_round(&[[0, 1, 2], [3, 4, 5]], &mut sampler).unwrap();
        assert_eq!(tournament.scores(), &[3, 3, 3, 1, 3, 5]);
        assert_eq!(sampler.remaining(), 0);
    }

    #[test]
    fn out_of_range_round_leaves_scores_untouched() {
        let mut tournament = Tournament::new(roster(3));
        let mut sampler = ScriptedSampler::new(&[]);
        let err = tournament.run_round(&[[0, 1, 3]], &mut sampler).unwrap_err();
        assert!(matches!(
            err,
            SimError::IndexOutOfRange {
                index: 3,
                roster_size: 3
            }
        ));
        assert_eq!(tournament.scores(), &[0, 0, 0]);
        assert_eq!(sampler.calls, 0);

        let mut tournament = Tournament::new(roster(6));
        let err = tournament
            .run_round(&[[0, 1, 2], [3, 4, 6]], &mut sampler)
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::IndexOutOfRange {
                index: 6,
                roster_size: 6
            }
        ));
        assert_eq!(tournament.scores(), &[0; 6]);
        assert_eq!(sampler.calls, 0);
    }

    #[test]
    fn first_defect_in_listed_order_is_reported() {
        let tournament = Tournament::new(roster(3));
        assert!(matches!(
            tournament.validate_round(&[[0, 1, 2], [0, 1, 3]]),
            Err(SimError::DuplicateParticipant { index: 0 })
        ));
        assert!(matches!(
            tournament.validate_round(&[[0, 1, 3], [0, 1, 2]]),
            Err(SimError::IndexOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn apply_match_rejects_repeated_participant() {
        let mut tournament = Tournament::new(roster(3));
        let mut sampler = ScriptedSampler::new(&[WinA, WinA]);
        assert!(matches!(
            tournament.apply_match([0, 0, 1], &mut sampler),
            Err(SimError::DuplicateParticipant { index: 0 })
        ));
        assert_eq!(tournament.scores(), &[0, 0, 0]);
        assert_eq!(sampler.calls, 0);
    }

    #[test]
    fn duplicate_participant_in_round_is_rejected() {
        let tournament = Tournament::new(roster(6));
        assert!(matches!(
            tournament.validate_round(&[[0, 1, 2], [2, 3, 4]]),
            Err(SimError::DuplicateParticipant { index: 2 })
        ));
        assert!(matches!(
            tournament.validate_round(&[[0, 0, 1]]),
            Err(SimError::DuplicateParticipant { index: 0 })
        ));
        assert!(tournament.validate_round(&[[5, 1, 2], [0, 3, 4]]).is_ok());
    }

    #[test]
    fn reset_scores_zeroes_the_accumulator() {
        let mut tournament = Tournament::new(roster(3));
        let mut sampler = seeded(9);
        tournament.run_round(&[[0, 1, 2]], &mut sampler).unwrap();
        assert_eq!(tournament.scores().iter().sum::<u64>(), 9);
        tournament.reset_scores();
        assert_eq!(tournament.scores(), &[0, 0, 0]);
        assert_eq!(tournament.len(), 3);
        assert!(!tournament.is_empty());
        assert!(Tournament::new(Vec::new()).is_empty());
    }
}
