use std::fs;
use std::path::Path;

use crate::error::{SimError, SimResult};
use crate::rating::Rating;
use crate::tournament::Participant;

/// Raw uncertainties in roster files are three standard deviations wide.
const UNCERTAINTY_DIVISOR: f64 = 3.0;

/// Parses `name,mean,rawUncertainty` lines. Blank lines are skipped.
pub fn parse_roster(text: &str) -> SimResult<Vec<Participant>> {
    let mut participants = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        participants.push(parse_line(line, idx + 1)?);
    }
    Ok(participants)
}

fn parse_line(line: &str, line_no: usize) -> SimResult<Participant> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let &[name, mean, uncertainty] = fields.as_slice() else {
        return Err(SimError::RosterParse {
            line: line_no,
            message: format!("expected 3 comma-separated fields, got {}", fields.len()),
        });
    };
    if name.is_empty() {
        return Err(SimError::RosterParse {
            line: line_no,
            message: "participant name is empty".to_string(),
        });
    }
    let mean = parse_number(mean, "mean", line_no)?;
    let uncertainty = parse_number(uncertainty, "uncertainty", line_no)?;
    Ok(Participant::new(
        name,
        Rating::new(mean, uncertainty / UNCERTAINTY_DIVISOR),
    ))
}

fn parse_number(field: &str, what: &str, line_no: usize) -> SimResult<f64> {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SimError::RosterParse {
            line: line_no,
            message: format!("{what} {field:?} is not a finite number"),
        }),
    }
}

pub fn load_roster<P: AsRef<Path>>(path: P) -> SimResult<Vec<Participant>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_roster(&text)
}
