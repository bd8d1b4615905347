use khatira_errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl FromStr for VoteDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(AppError::InvalidInput(
                "نوع التصويت يجب أن يكون up أو down".to_string(),
            )),
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a recorded vote: the entry's tallies right after the increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    pub khatira_id: i32,
    pub direction: VoteDirection,
    pub upvotes: i32,
    pub downvotes: i32,
    pub score: i32,
}

impl VoteResult {
    pub fn new(khatira_id: i32, direction: VoteDirection, upvotes: i32, downvotes: i32) -> Self {
        Self {
            khatira_id,
            direction,
            upvotes,
            downvotes,
            score: upvotes - downvotes,
        }
    }
}
