use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::report::{
    export_reservations, show_calendar, show_dashboard, show_reservation_report,
};

pub fn build_report_routers() -> Router<AppRegistry> {
    let reports_routers = Router::new()
        .route("/reservations", get(show_reservation_report))
        .route("/export", get(export_reservations))
        .route("/calendar", get(show_calendar))
        .route("/dashboard", get(show_dashboard));

    Router::new().nest("/reports", reports_routers)
}
