use crate::{
    extractor::AuthorizedUser,
    model::{
        list::{ListQuery, PaginatedResponse},
        space::{CreateSpaceRequest, SpaceResponse, UpdateSpaceRequest, UpdateSpaceRequestWithIds},
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::SpaceId;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn register_space(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateSpaceRequest>,
) -> AppResult<(StatusCode, Json<SpaceResponse>)> {
    req.validate(&())?;

    registry
        .space_service()
        .create(user.identity(), req.into())
        .await
        .map(|space| (StatusCode::CREATED, Json(space.into())))
}

pub async fn show_space_list(
    _user: AuthorizedUser,
    Query(query): Query<ListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedResponse<SpaceResponse>>> {
    query.validate(&())?;

    registry
        .space_service()
        .list(query.into())
        .await
        .map(PaginatedResponse::from)
        .map(Json)
}

pub async fn show_space(
    _user: AuthorizedUser,
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SpaceResponse>> {
    registry
        .space_service()
        .get(space_id)
        .await
        .map(|space| Json(space.into()))
}

pub async fn update_space(
    user: AuthorizedUser,
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateSpaceRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update_space = UpdateSpaceRequestWithIds::new(space_id, req);
    registry
        .space_service()
        .update(user.identity(), space_id, update_space.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_space(
    user: AuthorizedUser,
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .space_service()
        .delete(user.identity(), space_id)
        .await
        .map(|_| StatusCode::OK)
}
