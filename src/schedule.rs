use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{SimError, SimResult};
use crate::tournament::Group;

/// Ordered rounds of disjoint three-participant groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundSchedule {
    pub name: String,
    pub title: String,
    pub rounds: Vec<Vec<Group>>,
}

impl RoundSchedule {
    pub fn new(name: impl Into<String>, title: impl Into<String>, rounds: Vec<Vec<Group>>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            rounds,
        }
    }

    /// Smallest roster every index in the schedule fits into.
    pub fn participants_required(&self) -> usize {
        self.rounds
            .iter()
            .flatten()
            .flatten()
            .map(|&index| index + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn matches_per_run(&self) -> usize {
        self.rounds.iter().map(Vec::len).sum()
    }

    pub fn from_toml_str(text: &str, origin: &str) -> SimResult<Self> {
        let file: ScheduleFile = toml::from_str(text).map_err(|source| SimError::ScheduleParse {
            origin: origin.to_string(),
            source,
        })?;
        let rounds = file
            .rounds
            .into_iter()
            .enumerate()
            .map(|(round, spec)| {
                spec.groups
                    .into_iter()
                    .enumerate()
                    .map(|(group, members)| {
                        let len = members.len();
                        Group::try_from(members).map_err(|_| SimError::GroupSize {
                            round: round + 1,
                            group: group + 1,
                            len,
                        })
                    })
                    .collect::<SimResult<Vec<Group>>>()
            })
            .collect::<SimResult<Vec<_>>>()?;
        let title = file.title.unwrap_or_else(|| file.name.clone());
        Ok(Self::new(file.name, title, rounds))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleFile {
    name: String,
    title: Option<String>,
    #[serde(default)]
    rounds: Vec<RoundFile>,
}

#[derive(Debug, Deserialize)]
struct RoundFile {
    groups: Vec<Vec<usize>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinSchedule {
    Semifinal,
    JanuarySemifinal,
    RoundRobin,
    SingleMatch,
}

impl BuiltinSchedule {
    pub fn schedule(self) -> RoundSchedule {
        match self {
            Self::Semifinal => RoundSchedule::new(
                "semifinal",
                "AdamH Reply 17",
                vec![
                    vec![[0, 5, 6], [1, 4, 7], [2, 3, 8]],
                    vec![[2, 3, 7], [0, 5, 8], [1, 4, 6]],
                    vec![[0, 3, 7], [1, 5, 8], [2, 4, 6]],
                    vec![[2, 4, 8], [0, 3, 6], [1, 5, 7]],
                ],
            ),
            Self::JanuarySemifinal => RoundSchedule::new(
                "january-semifinal",
                "AdamH January Tournament",
                vec![
                    vec![[0, 5, 8], [1, 4, 7], [2, 3, 6]],
                    vec![[2, 4, 6], [0, 3, 8], [1, 5, 7]],
                    vec![[1, 3, 7], [2, 5, 6], [0, 4, 8]],
                ],
            ),
            Self::RoundRobin => RoundSchedule::new(
                "round-robin",
                "Infthitbox Reply 25",
                vec![
                    vec![[0, 3, 6], [1, 4, 7], [2, 5, 8]],
                    vec![[0, 5, 7], [1, 3, 8], [2, 4, 6]],
                    vec![[0, 4, 8], [1, 5, 6], [2, 3, 7]],
                    vec![[0, 1, 2], [3, 4, 5], [6, 7, 8]],
                ],
            ),
            Self::SingleMatch => {
                RoundSchedule::new("single-match", "Testing 3 identical", vec![vec![[0, 1, 2]]])
            }
        }
    }
}
