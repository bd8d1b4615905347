use crate::session::{existing_voter_id, grant_admin, require_admin, revoke_admin, voter_id};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use khatira_app::application::VisitorListing;
use khatira_app::domain::{Phase, VoteDirection};
use khatira_app::AppContext;
use khatira_errors::AppError;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_sessions::Session;

#[derive(Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
pub struct VoteRequest {
    khatira_id: i32,
    vote_type: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
pub struct PhaseRequest {
    phase: i32,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::InvalidInput(format!("طلب غير صالح: {}", e.body_text())))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_khawatir(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<Json<VisitorListing>, AppError> {
    let voter = existing_voter_id(&session).await?;
    let listing = ctx.list_khawatir.for_visitor(voter).await?;
    Ok(Json(listing))
}

pub async fn submit(
    State(ctx): State<AppContext>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = body(payload)?;
    let khatira = ctx
        .submit_khatira
        .execute(&request.name, &request.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "تم إرسال خاطرتك بنجاح",
            "id": khatira.id,
        })),
    ))
}

pub async fn vote(
    State(ctx): State<AppContext>,
    session: Session,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = body(payload)?;
    let direction: VoteDirection = request.vote_type.parse()?;
    let voter = voter_id(&session).await?;

    let result = ctx
        .cast_vote
        .execute(request.khatira_id, voter, direction)
        .await?;

    Ok(Json(json!({
        "message": "تم تسجيل صوتك بنجاح",
        "khatira_id": result.khatira_id,
        "vote_type": result.direction,
        "upvotes": result.upvotes,
        "downvotes": result.downvotes,
        "score": result.score,
    })))
}

pub async fn admin_login(
    State(ctx): State<AppContext>,
    session: Session,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = body(payload)?;
    ctx.admin_login.execute(&request.password)?;
    grant_admin(&session).await?;
    Ok(Json(json!({ "message": "تم تسجيل الدخول بنجاح" })))
}

pub async fn admin_logout(session: Session) -> Result<Json<Value>, AppError> {
    revoke_admin(&session).await?;
    Ok(Json(json!({ "message": "تم تسجيل الخروج" })))
}

pub async fn get_phase(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<Json<Value>, AppError> {
    require_admin(&session).await?;
    let phase = ctx.manage_event.current_phase().await?;
    Ok(Json(json!({ "current_phase": phase })))
}

pub async fn set_phase(
    State(ctx): State<AppContext>,
    session: Session,
    payload: Result<Json<PhaseRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    require_admin(&session).await?;
    let request = body(payload)?;
    let phase = Phase::try_from(request.phase)?;

    let phase = ctx.manage_event.set_phase(phase).await?;
    Ok(Json(json!({
        "message": "تم تغيير المرحلة بنجاح",
        "current_phase": phase,
    })))
}

pub async fn admin_list(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<Json<Value>, AppError> {
    require_admin(&session).await?;
    let khawatir = ctx.list_khawatir.for_admin().await?;
    Ok(Json(json!({ "khawatir": khawatir })))
}

pub async fn delete_khatira(
    State(ctx): State<AppContext>,
    session: Session,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    require_admin(&session).await?;
    let Path(id) = id.map_err(|_| AppError::InvalidInput("معرف الخاطرة غير صالح".to_string()))?;

    ctx.manage_event.delete_khatira(id).await?;
    Ok(Json(json!({ "message": "تم حذف الخاطرة بنجاح" })))
}

pub async fn clear_all(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<Json<Value>, AppError> {
    require_admin(&session).await?;
    let deleted = ctx.manage_event.clear_all().await?;
    Ok(Json(json!({
        "message": "تم حذف جميع الخواطر بنجاح",
        "deleted": deleted,
    })))
}
