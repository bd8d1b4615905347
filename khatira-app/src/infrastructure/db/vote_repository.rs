use super::entities::{vote, Vote};
use crate::domain::{VoteDirection, VoterId};
use sea_orm::{entity::*, query::*, ConnectionTrait, DatabaseConnection, DbErr, PaginatorTrait};
use std::collections::HashMap;

#[derive(Clone)]
pub struct VoteRepository {
    db: DatabaseConnection,
}

impl VoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn exists_on<C: ConnectionTrait>(
        conn: &C,
        khatira_id: i32,
        voter: VoterId,
    ) -> Result<bool, DbErr> {
        let vote = Vote::find_by_id((khatira_id, voter.as_uuid()))
            .one(conn)
            .await?;
        Ok(vote.is_some())
    }

    /// Inserts the vote row. Fails with a unique-constraint error if the pair already voted.
    pub async fn insert_on<C: ConnectionTrait>(
        conn: &C,
        khatira_id: i32,
        voter: VoterId,
        direction: VoteDirection,
    ) -> Result<vote::Model, DbErr> {
        let active = vote::ActiveModel {
            khatira_id: Set(khatira_id),
            voter_id: Set(voter.as_uuid()),
            vote_type: Set(direction.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
        };
        active.insert(conn).await
    }

    /// The voter's direction per entry, for every entry they voted on.
    pub async fn directions_for(
        &self,
        voter: VoterId,
    ) -> Result<HashMap<i32, VoteDirection>, DbErr> {
        let votes = Vote::find()
            .filter(vote::Column::VoterId.eq(voter.as_uuid()))
            .all(&self.db)
            .await?;

        Ok(votes
            .into_iter()
            .filter_map(|v| v.vote_type.parse::<VoteDirection>().ok().map(|d| (v.khatira_id, d)))
            .collect())
    }

    pub async fn count_for(&self, khatira_id: i32) -> Result<u64, DbErr> {
        Vote::find()
            .filter(vote::Column::KhatiraId.eq(khatira_id))
            .count(&self.db)
            .await
    }
}
