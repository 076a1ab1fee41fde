use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{SimError, SimResult};

/// Participants per pairwise comparison, used when calibrating the draw margin.
const PAIRWISE_GROUP_SIZE: usize = 2;

/// Skill estimate under a Gaussian skill model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rating {
    pub mean: f64,
    pub uncertainty: f64,
}

impl Rating {
    pub fn new(mean: f64, uncertainty: f64) -> Self {
        Self { mean, uncertainty }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatingModelParams {
    pub mu0: f64,
    pub sigma0: f64,
    pub beta: f64,
    /// Dynamics factor. Ratings are never updated here, so it only takes part in validation.
    pub tau: f64,
    pub draw_probability: f64,
}

impl Default for RatingModelParams {
    fn default() -> Self {
        let mu0 = 25.0;
        let sigma0 = mu0;
        Self {
            mu0,
            sigma0,
            beta: mu0,
            tau: sigma0 / 100.0,
            draw_probability: 0.05,
        }
    }
}

impl RatingModelParams {
    pub fn validate(&self) -> SimResult<()> {
        for (name, value) in [
            ("mu0", self.mu0),
            ("sigma0", self.sigma0),
            ("beta", self.beta),
            ("tau", self.tau),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidParameter {
                    name,
                    value,
                    reason: "must be positive and finite",
                });
            }
        }
        if !(0.0..1.0).contains(&self.draw_probability) {
            return Err(SimError::InvalidParameter {
                name: "draw_probability",
                value: self.draw_probability,
                reason: "must lie in [0, 1)",
            });
        }
        Ok(())
    }

    /// Rating of a participant nothing is known about yet.
    pub fn default_rating(&self) -> Rating {
        Rating::new(self.mu0, self.sigma0)
    }
}

/// Skill gap below which two otherwise equal participants draw with `draw_probability`.
pub fn draw_margin(draw_probability: f64, group_size: usize, beta: f64) -> f64 {
    let quantile = Normal::standard().inverse_cdf((draw_probability + 1.0) / 2.0);
    quantile * (group_size as f64).sqrt() * beta
}

#[derive(Clone, Copy, Debug)]
pub struct RatingModel {
    params: RatingModelParams,
    draw_margin: f64,
    normal: Normal,
}

impl RatingModel {
    pub fn new(params: RatingModelParams) -> SimResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            draw_margin: draw_margin(params.draw_probability, PAIRWISE_GROUP_SIZE, params.beta),
            normal: Normal::standard(),
        })
    }

    pub fn params(&self) -> &RatingModelParams {
        &self.params
    }

    pub fn draw_margin(&self) -> f64 {
        self.draw_margin
    }

    /// Probability that `a` outperforms `b` by more than the draw margin.
    pub fn win_probability(&self, a: &Rating, b: &Rating) -> f64 {
        let beta = self.params.beta;
        let delta_mu = a.mean - b.mean - self.draw_margin;
        let denom = (2.0 * beta * beta + a.uncertainty.powi(2) + b.uncertainty.powi(2)).sqrt();
        self.normal.cdf(delta_mu / denom)
    }
}
