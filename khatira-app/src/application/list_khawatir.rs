use crate::domain::{podium, rank, AdminKhatira, Khatira, Phase, VisitorKhatira, VoterId};
use crate::infrastructure::db::{db_error, KhatiraRepository, PhaseRepository, VoteRepository};
use khatira_errors::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the public page receives: the entries visible in the current phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorListing {
    pub khawatir: Vec<VisitorKhatira>,
    pub phase: Phase,
}

pub struct ListKhawatir {
    khawatir: KhatiraRepository,
    votes: VoteRepository,
    phases: PhaseRepository,
}

impl ListKhawatir {
    pub fn new(khawatir: KhatiraRepository, votes: VoteRepository, phases: PhaseRepository) -> Self {
        Self {
            khawatir,
            votes,
            phases,
        }
    }

    pub async fn for_visitor(&self, voter: Option<VoterId>) -> Result<VisitorListing, AppError> {
        let phase = self.phases.current().await.map_err(db_error)?;
        if !phase.lists_entries() {
            return Ok(VisitorListing {
                khawatir: Vec::new(),
                phase,
            });
        }

        let entries: Vec<Khatira> = self
            .khawatir
            .all()
            .await
            .map_err(db_error)?
            .into_iter()
            .map(Khatira::from)
            .collect();
        let ranked = phase.reveals_scores();
        let entries = if ranked { rank(entries) } else { entries };

        let user_votes = match voter {
            Some(voter) => self.votes.directions_for(voter).await.map_err(db_error)?,
            None => HashMap::new(),
        };

        let khawatir = entries
            .iter()
            .enumerate()
            .map(|(position, k)| {
                let mut view = k.visitor_view(phase, user_votes.get(&k.id).copied());
                if ranked {
                    view.podium = Some(podium(position));
                }
                view
            })
            .collect();
        Ok(VisitorListing { khawatir, phase })
    }

    /// All entries with authors and scores, ranked, whatever the phase.
    pub async fn for_admin(&self) -> Result<Vec<AdminKhatira>, AppError> {
        let entries = self
            .khawatir
            .all()
            .await
            .map_err(db_error)?
            .into_iter()
            .map(|m| Khatira::from(m).admin_view())
            .collect();
        Ok(rank(entries))
    }
}
