//! Pieces shared by the collection handlers: the update envelope, the
//! `?id=` requirement, reorder responses, and the fail-open read helpers.

use axum::response::{IntoResponse, Response};
use axum::Json;
use atelier_core::content::{
    require_text, validate_order, validate_reorder, validate_url, ReorderRequest, MAX_URL_LEN,
};
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::repositories::ReorderOutcome;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::fallback;
use crate::response::{ContentResponse, DataResponse};

/// Body of a `PUT`: the target id plus only the fields to change.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest<T> {
    pub id: DbId,
    #[serde(flatten)]
    pub fields: T,
}

pub fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

/// `DELETE` identifies its target through `?id=`.
pub fn require_id(id: Option<DbId>) -> AppResult<DbId> {
    id.ok_or_else(|| AppError::invalid("id query parameter is required"))
}

/// The inner value of a tri-state field, if it is being set.
pub fn set_value(field: &Option<Option<String>>) -> Option<&str> {
    field.as_ref().and_then(Option::as_deref)
}

/// A URL field that must be present and non-blank.
pub fn required_url(field: &str, value: &str) -> Result<(), CoreError> {
    require_text(field, value, MAX_URL_LEN)?;
    validate_url(field, value)
}

pub fn optional_order(order: Option<i32>) -> Result<(), CoreError> {
    order.map_or(Ok(()), validate_order)
}

pub fn validate_reorder_request(input: &ReorderRequest) -> AppResult<()> {
    validate_reorder(&input.items)?;
    Ok(())
}

/// Map a repository reorder result to the `{data: {updated}}` response.
pub fn reorder_response(
    entity: &'static str,
    outcome: ReorderOutcome,
    count: usize,
) -> AppResult<Json<DataResponse<Value>>> {
    match outcome {
        ReorderOutcome::Applied => Ok(Json(DataResponse {
            data: json!({ "updated": count }),
        })),
        ReorderOutcome::Missing(id) => Err(not_found(entity, id)),
    }
}

/// `{data}` from the database, or the built-in payload when the table is
/// empty or the query failed.
pub fn list_or_fallback<T: Serialize>(
    entity: &'static str,
    result: Result<Vec<T>, sqlx::Error>,
    fallback: impl FnOnce() -> Vec<Value>,
) -> Response {
    match result {
        Ok(rows) if rows.is_empty() => {
            tracing::info!(entity, "Table empty, serving fallback content");
            Json(ContentResponse::fallback(fallback())).into_response()
        }
        Ok(rows) => Json(ContentResponse::database(rows)).into_response(),
        Err(e) => {
            tracing::warn!(entity, error = %e, "Database read failed, serving fallback content");
            Json(ContentResponse::fallback(fallback())).into_response()
        }
    }
}

/// A single row by id. An unknown id is `404` whether it was looked up in the
/// database or, after a failed query, in the fallback payload.
pub fn item_or_fallback<T: Serialize>(
    entity: &'static str,
    id: DbId,
    result: Result<Option<T>, sqlx::Error>,
    fallback: impl FnOnce() -> Vec<Value>,
) -> AppResult<Response> {
    match result {
        Ok(Some(row)) => Ok(Json(ContentResponse::database(row)).into_response()),
        Ok(None) => Err(not_found(entity, id)),
        Err(e) => {
            tracing::warn!(entity, id, error = %e, "Database read failed, serving fallback content");
            fallback::find(fallback(), id)
                .map(|item| Json(ContentResponse::fallback(item)).into_response())
                .ok_or_else(|| not_found(entity, id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_db::models::social_link::UpdateSocialLink;

    #[test]
    fn update_request_splits_id_from_fields() {
        let req: UpdateRequest<UpdateSocialLink> =
            serde_json::from_value(json!({"id": 7, "icon": null, "order": 2})).unwrap();
        assert_eq!(req.id, 7);
        assert_eq!(req.fields.icon, Some(None));
        assert_eq!(req.fields.sort_order, Some(2));
        assert_eq!(req.fields.url, None);
    }

    #[test]
    fn update_request_requires_id() {
        let res = serde_json::from_value::<UpdateRequest<UpdateSocialLink>>(json!({"url": "/x"}));
        assert!(res.is_err());
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn builtin() -> Vec<Value> {
        vec![json!({"id": 1, "title": "Built in"})]
    }

    #[tokio::test]
    async fn empty_list_serves_fallback() {
        let response = list_or_fallback("GalleryArtwork", Ok(Vec::<Value>::new()), builtin);
        let json = body_json(response).await;
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["data"][0]["title"], "Built in");
    }

    #[tokio::test]
    async fn populated_list_is_served_from_database() {
        let rows = vec![json!({"id": 9})];
        let json = body_json(list_or_fallback("GalleryArtwork", Ok(rows), builtin)).await;
        assert_eq!(json["source"], "database");
        assert_eq!(json["data"], json!([{"id": 9}]));
    }

    #[test]
    fn missing_delete_id_is_invalid_input() {
        let err = require_id(None).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
