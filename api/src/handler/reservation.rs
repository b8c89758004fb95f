use crate::{
    extractor::AuthorizedUser,
    model::reservation::{
        DecisionRequest, ReminderResponse, RemindersResponse, ReservationListQuery,
        ReservationRequest, ReservationResponse, ReservationsResponse,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::ReservationId;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn request_reservation(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<ReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    req.validate(&())?;

    registry
        .admission_engine()
        .request_reservation(user.identity(), req.into())
        .await
        .map(|reservation| (StatusCode::CREATED, Json(reservation.into())))
}

// 管理者以外は自分の予約のみが返る
pub async fn show_reservation_list(
    user: AuthorizedUser,
    Query(query): Query<ReservationListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .admission_engine()
        .list_reservations(user.identity(), query.into())
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn show_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .admission_engine()
        .get_reservation(user.identity(), reservation_id)
        .await
        .map(|reservation| Json(reservation.into()))
}

pub async fn update_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<ReservationRequest>,
) -> AppResult<Json<ReservationResponse>> {
    req.validate(&())?;

    registry
        .admission_engine()
        .edit_reservation(user.identity(), reservation_id, req.into())
        .await
        .map(|reservation| Json(reservation.into()))
}

pub async fn cancel_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .admission_engine()
        .cancel_reservation(user.identity(), reservation_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

pub async fn decide_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<DecisionRequest>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .admission_engine()
        .decide(user.identity(), reservation_id, req.into())
        .await
        .map(|reservation| Json(reservation.into()))
}

pub async fn send_reminder(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReminderResponse>> {
    registry
        .reminder_batch()
        .send_reminder(user.identity(), reservation_id)
        .await
        .map(|sent| Json(ReminderResponse::new(sent)))
}

pub async fn send_reminders(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RemindersResponse>> {
    registry
        .reminder_batch()
        .trigger(user.identity())
        .await
        .map(|sent| Json(RemindersResponse::new(sent)))
}
