use crate::plan::error::{PlanError, PlanResult};
use std::fmt::Display;

const FRAMES_PER_SECOND: u64 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fraction {
    /// CD frames, 1/75 second each.
    Frames(u64),
    /// Some sheets write milliseconds into the frame field, always as three digits.
    Millis(u64),
}

/// An `INDEX` position in `mm:ss:ff` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    minutes: u64,
    seconds: u64,
    fraction: Fraction,
    millis: u64,
}

impl Timestamp {
    pub fn parse(raw: &str) -> PlanResult<Self> {
        let invalid = || PlanError::InvalidTimestamp(raw.to_string());

        let mut parts = raw.trim().split(':');
        let (Some(minutes), Some(seconds), Some(frames), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let number = |s: &str| -> PlanResult<u64> {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            s.parse().map_err(|_| invalid())
        };

        let fraction = if frames.len() == 3 {
            Fraction::Millis(number(frames)?)
        } else {
            Fraction::Frames(number(frames)?)
        };
        let minutes = number(minutes)?;
        let seconds = number(seconds)?;
        let millis = total_millis(minutes, seconds, fraction).ok_or_else(invalid)?;

        Ok(Self {
            minutes,
            seconds,
            fraction,
            millis,
        })
    }

    /// Position in whole milliseconds, frames rounded to the nearest one.
    pub fn to_millis(&self) -> u64 {
        self.millis
    }

    pub fn to_seconds(&self) -> f64 {
        self.millis as f64 / 1000.0
    }
}

/// `None` when the position does not fit in a `u64` of milliseconds.
fn total_millis(minutes: u64, seconds: u64, fraction: Fraction) -> Option<u64> {
    let whole = minutes
        .checked_mul(60)?
        .checked_add(seconds)?
        .checked_mul(1000)?;
    let fraction = match fraction {
        Fraction::Millis(ms) => ms,
        // frames * 1000 / 75 never lands on a half, so this is plain rounding
        Fraction::Frames(frames) => {
            frames
                .checked_mul(1000 * 2)?
                .checked_add(FRAMES_PER_SECOND)?
                / (FRAMES_PER_SECOND * 2)
        }
    };
    whole.checked_add(fraction)
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.fraction {
            Fraction::Frames(frames) => write!(f, "{:02}:{:02}:{:02}", self.minutes, self.seconds, frames),
            Fraction::Millis(ms) => write!(f, "{:02}:{:02}:{:03}", self.minutes, self.seconds, ms),
        }
    }
}

/// End offsets for tracks given their start offsets and declared files.
///
/// A track ends where the next one starts only if both live in the same file,
/// otherwise `0.0`, meaning the end of its source.
pub fn end_offsets(starts: &[f64], files: &[&str]) -> Vec<f64> {
    (0..starts.len())
        .map(|i| match (files.get(i), files.get(i + 1)) {
            (Some(current), Some(next)) if current == next => starts[i + 1],
            _ => 0.0,
        })
        .collect()
}
