use crate::{
    extractor::AuthorizedUser,
    model::{
        list::{ListQuery, PaginatedResponse},
        slot::{SlotRequest, SlotRequestWithIds, SlotResponse},
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::SlotId;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn register_slot(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<SlotRequest>,
) -> AppResult<(StatusCode, Json<SlotResponse>)> {
    req.validate(&())?;

    registry
        .slot_service()
        .create(user.identity(), req.into())
        .await
        .map(|slot| (StatusCode::CREATED, Json(slot.into())))
}

pub async fn show_slot_list(
    _user: AuthorizedUser,
    Query(query): Query<ListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedResponse<SlotResponse>>> {
    query.validate(&())?;

    registry
        .slot_service()
        .list(query.into())
        .await
        .map(PaginatedResponse::from)
        .map(Json)
}

pub async fn show_slot(
    _user: AuthorizedUser,
    Path(slot_id): Path<SlotId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SlotResponse>> {
    registry
        .slot_service()
        .get(slot_id)
        .await
        .map(|slot| Json(slot.into()))
}

pub async fn update_slot(
    user: AuthorizedUser,
    Path(slot_id): Path<SlotId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<SlotRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .slot_service()
        .update(
            user.identity(),
            slot_id,
            SlotRequestWithIds::new(slot_id, req).into(),
        )
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_slot(
    user: AuthorizedUser,
    Path(slot_id): Path<SlotId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .slot_service()
        .delete(user.identity(), slot_id)
        .await
        .map(|_| StatusCode::OK)
}
