use crate::{
    extractor::AuthorizedUser,
    model::{
        report::{CalendarEventResponse, DashboardResponse, ExportResponse, FilteredReportResponse},
        reservation::ReservationListQuery,
    },
};
use axum::{
    extract::{Query, State},
    Json,
};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_reservation_report(
    user: AuthorizedUser,
    Query(query): Query<ReservationListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<FilteredReportResponse>> {
    registry
        .report_slicer()
        .filtered(user.identity(), query.into())
        .await
        .map(FilteredReportResponse::from)
        .map(Json)
}

pub async fn export_reservations(
    user: AuthorizedUser,
    Query(query): Query<ReservationListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ExportResponse>> {
    registry
        .report_slicer()
        .export_rows(user.identity(), query.into())
        .await
        .map(ExportResponse::from)
        .map(Json)
}

pub async fn show_calendar(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<CalendarEventResponse>>> {
    let events = registry.report_slicer().calendar(user.identity()).await?;
    Ok(Json(
        events.into_iter().map(CalendarEventResponse::from).collect(),
    ))
}

pub async fn show_dashboard(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<DashboardResponse>> {
    registry
        .report_slicer()
        .dashboard(user.identity())
        .await
        .map(DashboardResponse::from)
        .map(Json)
}
