//! Monte Carlo estimator for tournaments of three-participant matches.
//!
//! - Pairwise win/draw probabilities from Gaussian skill ratings
//! - Three-way match scoring built from up to three pairwise results
//! - Score accumulation over many repetitions of a fixed round schedule
//!
//! # Example
//!
//! ```no_run
//! use trio_sim::rating::RatingModelParams;
//! use trio_sim::roster::parse_roster;
//! use trio_sim::schedule::BuiltinSchedule;
//! use trio_sim::simulation::run_monte_carlo;
//!
//! let roster = parse_roster("A,30,9\nB,25,9\nC,20,9\n").unwrap();
//! let schedule = BuiltinSchedule::SingleMatch.schedule();
//! let standings =
//!     run_monte_carlo(roster, &schedule, 1_000, RatingModelParams::default(), Some(7)).unwrap();
//! print!("{standings}");
//! ```

pub mod error;
pub mod outcome;
pub mod rating;
pub mod roster;
pub mod schedule;
pub mod simulation;
pub mod three_way;
pub mod tournament;

pub use error::{SimError, SimResult};
pub use outcome::{OutcomeSampler, PairwiseOutcome, RatingSampler};
pub use rating::{Rating, RatingModel, RatingModelParams};
pub use schedule::{BuiltinSchedule, RoundSchedule};
pub use simulation::{Standings, run_monte_carlo, run_schedule};
pub use three_way::ThreeWayOutcome;
pub use tournament::{Participant, Tournament};
