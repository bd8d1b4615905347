use super::AdminKhatira;
use super::Khatira;
use serde::{Deserialize, Serialize};

/// Visual standing of a ranked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Podium {
    First,
    Second,
    Third,
    Other,
}

/// Podium for a zero-based position in a ranked list.
pub fn podium(position: usize) -> Podium {
    match position {
        0 => Podium::First,
        1 => Podium::Second,
        2 => Podium::Third,
        _ => Podium::Other,
    }
}

pub trait Scored {
    fn score(&self) -> i32;
}

impl Scored for Khatira {
    fn score(&self) -> i32 {
        Khatira::score(self)
    }
}

impl Scored for AdminKhatira {
    fn score(&self) -> i32 {
        self.score
    }
}

/// Orders by descending score. The sort is stable, so ties keep their incoming order.
pub fn rank<T: Scored>(mut entries: Vec<T>) -> Vec<T> {
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.score()));
    entries
}
