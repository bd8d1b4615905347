use khatira_app::domain::{Phase, Podium, VoteDirection, VoterId};
use khatira_app::infrastructure::db::{create_connection, init_schema, VoteRepository};
use khatira_app::{AppContext, Config};
use khatira_errors::AppError;
use sea_orm::DatabaseConnection;

const PASSWORD: &str = "valar morghulis";

async fn database() -> DatabaseConnection {
    // A single connection keeps every query on the same in-memory database.
    let db = create_connection("sqlite::memory:", 1).await.unwrap();
    init_schema(&db).await.unwrap();
    db
}

async fn context() -> (AppContext, DatabaseConnection) {
    let db = database().await;
    let config = Config {
        admin_password: PASSWORD.to_string(),
        ..Config::default()
    };
    (AppContext::new(db.clone(), config), db)
}

async fn submit(ctx: &AppContext, name: &str, content: &str) -> i32 {
    ctx.submit_khatira.execute(name, content).await.unwrap().id
}

#[tokio::test]
async fn fresh_event_starts_in_submission() {
    let (ctx, _) = context().await;
    assert_eq!(ctx.manage_event.current_phase().await.unwrap(), Phase::Submission);

    let listing = ctx.list_khawatir.for_visitor(None).await.unwrap();
    assert_eq!(listing.phase, Phase::Submission);
    assert!(listing.khawatir.is_empty());
}

#[tokio::test]
async fn schema_bootstrap_is_repeatable() {
    let (ctx, db) = context().await;
    ctx.manage_event.set_phase(Phase::Voting).await.unwrap();

    init_schema(&db).await.unwrap();
    assert_eq!(ctx.manage_event.current_phase().await.unwrap(), Phase::Voting);
}

#[tokio::test]
async fn full_event_scenario() {
    let (ctx, _) = context().await;
    let voter_a = VoterId::generate();
    let voter_b = VoterId::generate();

    let created = ctx.submit_khatira.execute("Ali", "hello").await.unwrap();
    assert_eq!((created.upvotes, created.downvotes), (0, 0));

    ctx.manage_event.set_phase(Phase::Voting).await.unwrap();
    let listing = ctx.list_khawatir.for_visitor(Some(voter_a)).await.unwrap();
    assert_eq!(listing.khawatir.len(), 1);
    assert_eq!(listing.khawatir[0].author, None);
    assert_eq!(listing.khawatir[0].user_vote, None);

    let up = ctx
        .cast_vote
        .execute(created.id, voter_a, VoteDirection::Up)
        .await
        .unwrap();
    assert_eq!(up.upvotes, 1);

    let again = ctx
        .cast_vote
        .execute(created.id, voter_a, VoteDirection::Up)
        .await;
    assert_eq!(again, Err(AppError::AlreadyVoted));

    let down = ctx
        .cast_vote
        .execute(created.id, voter_b, VoteDirection::Down)
        .await
        .unwrap();
    assert_eq!((down.upvotes, down.downvotes, down.score), (1, 1, 0));

    let listing = ctx.list_khawatir.for_visitor(Some(voter_a)).await.unwrap();
    assert_eq!(listing.khawatir[0].user_vote, Some(VoteDirection::Up));

    ctx.manage_event.set_phase(Phase::Results).await.unwrap();
    let listing = ctx.list_khawatir.for_visitor(None).await.unwrap();
    let entry = &listing.khawatir[0];
    assert_eq!(entry.author.as_deref(), Some("Ali"));
    assert_eq!(entry.score, Some(0));
    assert_eq!(entry.upvotes, Some(1));
}

#[tokio::test]
async fn submissions_rejected_outside_submission_phase() {
    let (ctx, _) = context().await;

    for phase in [Phase::Voting, Phase::Results] {
        ctx.manage_event.set_phase(phase).await.unwrap();
        let result = ctx.submit_khatira.execute("Ali", "late entry").await;
        assert_eq!(result.unwrap_err(), AppError::SubmissionClosed);
    }

    assert!(ctx.list_khawatir.for_admin().await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_submission_rejected() {
    let (ctx, _) = context().await;
    let result = ctx.submit_khatira.execute("   ", "hello").await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn votes_rejected_outside_voting_phase() {
    let (ctx, db) = context().await;
    let id = submit(&ctx, "Ali", "hello").await;
    let voter = VoterId::generate();

    for phase in [Phase::Submission, Phase::Results] {
        ctx.manage_event.set_phase(phase).await.unwrap();
        let result = ctx.cast_vote.execute(id, voter, VoteDirection::Up).await;
        assert_eq!(result, Err(AppError::VotingClosed));
    }

    assert_eq!(VoteRepository::new(db).count_for(id).await.unwrap(), 0);
    let admin = ctx.list_khawatir.for_admin().await.unwrap();
    assert_eq!(admin[0].upvotes, 0);
}

#[tokio::test]
async fn vote_on_unknown_entry_is_not_found() {
    let (ctx, _) = context().await;
    ctx.manage_event.set_phase(Phase::Voting).await.unwrap();

    let result = ctx
        .cast_vote
        .execute(999, VoterId::generate(), VoteDirection::Down)
        .await;
    assert_eq!(result, Err(AppError::NotFound));
}

#[tokio::test]
async fn second_vote_in_other_direction_still_rejected() {
    let (ctx, _) = context().await;
    let id = submit(&ctx, "Ali", "hello").await;
    ctx.manage_event.set_phase(Phase::Voting).await.unwrap();
    let voter = VoterId::generate();

    ctx.cast_vote.execute(id, voter, VoteDirection::Up).await.unwrap();
    let flip = ctx.cast_vote.execute(id, voter, VoteDirection::Down).await;
    assert_eq!(flip, Err(AppError::AlreadyVoted));

    let admin = ctx.list_khawatir.for_admin().await.unwrap();
    assert_eq!((admin[0].upvotes, admin[0].downvotes), (1, 0));
}

#[tokio::test]
async fn joined_duplicate_votes_succeed_once() {
    let (ctx, db) = context().await;
    let id = submit(&ctx, "Ali", "hello").await;
    ctx.manage_event.set_phase(Phase::Voting).await.unwrap();
    let voter = VoterId::generate();

    let (first, second) = tokio::join!(
        ctx.cast_vote.execute(id, voter, VoteDirection::Up),
        ctx.cast_vote.execute(id, voter, VoteDirection::Up),
    );

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!([first, second].contains(&Err(AppError::AlreadyVoted)));

    assert_eq!(VoteRepository::new(db).count_for(id).await.unwrap(), 1);
    let admin = ctx.list_khawatir.for_admin().await.unwrap();
    assert_eq!(admin[0].upvotes, 1);
}

#[tokio::test]
async fn results_are_ranked_by_score() {
    let (ctx, _) = context().await;
    let low = submit(&ctx, "A", "low").await;
    let high = submit(&ctx, "B", "high").await;
    let mid = submit(&ctx, "C", "mid").await;
    ctx.manage_event.set_phase(Phase::Voting).await.unwrap();

    for _ in 0..3 {
        ctx.cast_vote
            .execute(high, VoterId::generate(), VoteDirection::Up)
            .await
            .unwrap();
    }
    ctx.cast_vote
        .execute(mid, VoterId::generate(), VoteDirection::Up)
        .await
        .unwrap();
    ctx.cast_vote
        .execute(low, VoterId::generate(), VoteDirection::Down)
        .await
        .unwrap();

    // Voting keeps creation order.
    let voting = ctx.list_khawatir.for_visitor(None).await.unwrap();
    let ids: Vec<i32> = voting.khawatir.iter().map(|k| k.id).collect();
    assert_eq!(ids, vec![low, high, mid]);

    ctx.manage_event.set_phase(Phase::Results).await.unwrap();
    let results = ctx.list_khawatir.for_visitor(None).await.unwrap();
    let ids: Vec<i32> = results.khawatir.iter().map(|k| k.id).collect();
    assert_eq!(ids, vec![high, mid, low]);

    let scores: Vec<i32> = results.khawatir.iter().filter_map(|k| k.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    let podiums: Vec<Option<Podium>> = results.khawatir.iter().map(|k| k.podium).collect();
    assert_eq!(
        podiums,
        vec![Some(Podium::First), Some(Podium::Second), Some(Podium::Third)]
    );
    assert!(voting.khawatir.iter().all(|k| k.podium.is_none()));

    let admin = ctx.list_khawatir.for_admin().await.unwrap();
    assert!(admin.iter().all(|k| k.score == k.upvotes - k.downvotes));
    assert_eq!(admin[0].id, high);
}

#[tokio::test]
async fn phases_can_move_backwards() {
    let (ctx, _) = context().await;
    ctx.manage_event.set_phase(Phase::Results).await.unwrap();
    ctx.manage_event.set_phase(Phase::Submission).await.unwrap();
    assert_eq!(ctx.manage_event.current_phase().await.unwrap(), Phase::Submission);

    submit(&ctx, "Ali", "round two").await;
}

#[tokio::test]
async fn delete_removes_entry_and_its_votes() {
    let (ctx, db) = context().await;
    let keep = submit(&ctx, "A", "keep").await;
    let gone = submit(&ctx, "B", "gone").await;
    ctx.manage_event.set_phase(Phase::Voting).await.unwrap();
    let voter = VoterId::generate();
    ctx.cast_vote.execute(gone, voter, VoteDirection::Up).await.unwrap();

    ctx.manage_event.delete_khatira(gone).await.unwrap();

    let admin = ctx.list_khawatir.for_admin().await.unwrap();
    assert_eq!(admin.iter().map(|k| k.id).collect::<Vec<_>>(), vec![keep]);
    assert_eq!(VoteRepository::new(db).count_for(gone).await.unwrap(), 0);

    assert_eq!(ctx.manage_event.delete_khatira(gone).await, Err(AppError::NotFound));
}

#[tokio::test]
async fn clear_all_empties_every_listing() {
    let (ctx, db) = context().await;
    let id = submit(&ctx, "A", "one").await;
    submit(&ctx, "B", "two").await;
    ctx.manage_event.set_phase(Phase::Voting).await.unwrap();
    ctx.cast_vote
        .execute(id, VoterId::generate(), VoteDirection::Up)
        .await
        .unwrap();

    assert_eq!(ctx.manage_event.clear_all().await.unwrap(), 2);
    assert_eq!(VoteRepository::new(db).count_for(id).await.unwrap(), 0);

    for phase in Phase::ALL {
        ctx.manage_event.set_phase(phase).await.unwrap();
        let listing = ctx.list_khawatir.for_visitor(None).await.unwrap();
        assert!(listing.khawatir.is_empty());
    }
    assert!(ctx.list_khawatir.for_admin().await.unwrap().is_empty());
}

#[tokio::test]
async fn clear_all_keeps_phase() {
    let (ctx, _) = context().await;
    ctx.manage_event.set_phase(Phase::Results).await.unwrap();
    ctx.manage_event.clear_all().await.unwrap();
    assert_eq!(ctx.manage_event.current_phase().await.unwrap(), Phase::Results);
}

#[tokio::test]
async fn admin_login_checks_shared_password() {
    let (ctx, _) = context().await;
    assert_eq!(ctx.admin_login.execute("wrong"), Err(AppError::InvalidPassword));
    assert_eq!(ctx.admin_login.execute("wrong again"), Err(AppError::InvalidPassword));
    assert!(ctx.admin_login.execute(PASSWORD).is_ok());
}
