//! Shot types and per-shot-type counters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The categorized ways a korfball goal attempt can occur.
///
/// `Outstart` was added in a later app version; older stored matches have no
/// entry for it, which aggregation treats as zero, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotType {
    Distance,
    Close,
    Penalty,
    Freeball,
    Runthrough,
    Outstart,
    Other,
}

impl ShotType {
    /// All shot types in canonical order.
    ///
    /// This ordering is a contract: tie-breaks (e.g. best shot type) and
    /// per-type breakdowns follow it, and legacy timeline replay emits
    /// events in it.
    pub const ALL: [ShotType; 7] = [
        ShotType::Distance,
        ShotType::Close,
        ShotType::Penalty,
        ShotType::Freeball,
        ShotType::Runthrough,
        ShotType::Outstart,
        ShotType::Other,
    ];

    /// Stable identifier used in stored records.
    pub fn id(&self) -> &'static str {
        match self {
            ShotType::Distance => "distance",
            ShotType::Close => "close",
            ShotType::Penalty => "penalty",
            ShotType::Freeball => "freeball",
            ShotType::Runthrough => "runthrough",
            ShotType::Outstart => "outstart",
            ShotType::Other => "other",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ShotType::Distance => "Distance shot",
            ShotType::Close => "Close shot",
            ShotType::Penalty => "Penalty",
            ShotType::Freeball => "Free ball",
            ShotType::Runthrough => "Runthrough",
            ShotType::Outstart => "Out start",
            ShotType::Other => "Other",
        }
    }

    /// Short code for compact displays.
    pub fn code(&self) -> &'static str {
        match self {
            ShotType::Distance => "DS",
            ShotType::Close => "CS",
            ShotType::Penalty => "PEN",
            ShotType::Freeball => "FB",
            ShotType::Runthrough => "RT",
            ShotType::Outstart => "OS",
            ShotType::Other => "OTH",
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Goals and attempts for one shot type.
///
/// `goals <= attempts` is expected of well-formed input but is never
/// enforced; both fields aggregate independently so one malformed stored
/// record cannot poison a fold over a whole season.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotStat {
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub attempts: u32,
}

impl ShotStat {
    pub fn new(goals: u32, attempts: u32) -> Self {
        Self { goals, attempts }
    }

    /// Add another counter onto this one.
    pub fn accumulate(&mut self, delta: ShotStat) {
        self.goals += delta.goals;
        self.attempts += delta.attempts;
    }

    /// Scoring percentage, 0 when there are no attempts.
    pub fn percentage(&self) -> u32 {
        crate::calculate::percentage(self.goals, self.attempts)
    }
}
