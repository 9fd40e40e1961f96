use crate::{
    app::error::{ApiError, Message},
    roster::AppState,
    storage::{Db, User},
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list).post(create))
        .route("/users/", get(list).post(create))
        .route("/users/:id", get(get_by_id).put(update).delete(delete))
}

/// Decodes a body as JSON whatever its `Content-Type`.
fn decode(body: &[u8]) -> Result<User, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

pub async fn list(State(db): State<Db>) -> Json<Vec<User>> {
    Json(db.list().await)
}

pub async fn get_by_id(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(db.find_by_id(&id).await?))
}

pub async fn create(
    State(db): State<Db>,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = decode(&body)?;
    db.append(user.clone()).await?;
    info!("created user `{}`", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update(
    State(db): State<Db>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<User>, ApiError> {
    let user = decode(&body)?;
    db.replace_by_id(&id, user.clone()).await?;
    info!("replaced user `{id}`");
    Ok(Json(user))
}

pub async fn delete(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    db.remove_by_id(&id).await?;
    info!("deleted user `{id}`");
    Ok(Message::new("user deleted"))
}
