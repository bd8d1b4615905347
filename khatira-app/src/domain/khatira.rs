use super::{Phase, Podium, VoteDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored entry with its vote tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Khatira {
    pub id: i32,
    pub author: String,
    pub content: String,
    pub upvotes: i32,
    pub downvotes: i32,
    pub created_at: DateTime<Utc>,
}

impl Khatira {
    pub fn score(&self) -> i32 {
        self.upvotes - self.downvotes
    }

    /// What a visitor may see of this entry in the given phase.
    pub fn visitor_view(&self, phase: Phase, user_vote: Option<VoteDirection>) -> VisitorKhatira {
        let reveal = phase.reveals_scores();
        VisitorKhatira {
            id: self.id,
            content: self.content.clone(),
            author: phase.reveals_authors().then(|| self.author.clone()),
            upvotes: reveal.then_some(self.upvotes),
            downvotes: reveal.then_some(self.downvotes),
            score: reveal.then(|| self.score()),
            created_at: self.created_at,
            user_vote,
            podium: None,
        }
    }

    pub fn admin_view(&self) -> AdminKhatira {
        AdminKhatira {
            id: self.id,
            author: self.author.clone(),
            content: self.content.clone(),
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            score: self.score(),
            created_at: self.created_at,
        }
    }
}

/// Validated input for a new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewKhatira {
    pub author: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorKhatira {
    pub id: i32,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub upvotes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub downvotes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub user_vote: Option<VoteDirection>,
    /// Set on ranked results only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub podium: Option<Podium>,
}

/// Entry as shown on the admin dashboard, always with author and score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminKhatira {
    pub id: i32,
    pub author: String,
    pub content: String,
    pub upvotes: i32,
    pub downvotes: i32,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}
