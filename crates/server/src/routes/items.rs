use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use service::{Item, ItemInput};
use tracing::debug;

use crate::errors::JsonApiError;
use crate::observability::{self, ITEMS_STORED, OUTCOME_INVALID, OUTCOME_NOT_FOUND, OUTCOME_OK};
use crate::routes::AppState;

/// Parse the `:id` path segment; anything that is not an `i64` is a 400.
pub fn parse_id(raw: &str) -> Result<i64, JsonApiError> {
    raw.parse::<i64>().map_err(|_| JsonApiError::invalid_id())
}

fn invalid(op: &str, err: JsonApiError) -> JsonApiError {
    observability::record(op, OUTCOME_INVALID);
    debug!(op, status = %err.status, error = %err.message, "rejected request");
    err
}

fn settle<T>(op: &str, res: Result<T, service::ServiceError>) -> Result<T, JsonApiError> {
    match res {
        Ok(v) => {
            observability::record(op, OUTCOME_OK);
            Ok(v)
        }
        Err(e) => {
            observability::record(op, OUTCOME_NOT_FOUND);
            debug!(op, id = e.id(), "item not found");
            Err(e.into())
        }
    }
}

/// GET /items
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    let items = state.store.list().await;
    observability::record("list", OUTCOME_OK);
    Json(items)
}

/// GET /items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Item>, JsonApiError> {
    let id = parse_id(&raw).map_err(|e| invalid("detail", e))?;
    settle("detail", state.store.get(id).await).map(Json)
}

/// POST /items
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<ItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), JsonApiError> {
    let Json(input) = body.map_err(|r| invalid("create", r.into()))?;
    let item = state.store.create(input).await;
    observability::record("create", OUTCOME_OK);
    ITEMS_STORED.inc();
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /items/:id
pub async fn update_item(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    body: Result<Json<ItemInput>, JsonRejection>,
) -> Result<Json<Item>, JsonApiError> {
    let id = parse_id(&raw).map_err(|e| invalid("update", e))?;
    let Json(input) = body.map_err(|r| invalid("update", r.into()))?;
    settle("update", state.store.update(id, input).await).map(Json)
}

/// DELETE /items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&raw).map_err(|e| invalid("delete", e))?;
    settle("delete", state.store.delete(id).await)?;
    ITEMS_STORED.dec();
    Ok(StatusCode::NO_CONTENT)
}
