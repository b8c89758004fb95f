use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    cancel_reservation, decide_reservation, request_reservation, send_reminder, send_reminders,
    show_reservation, show_reservation_list, update_reservation,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservations_routers = Router::new()
        .route("/", get(show_reservation_list).post(request_reservation))
        .route("/reminders", post(send_reminders))
        .route(
            "/:reservation_id",
            get(show_reservation)
                .put(update_reservation)
                .delete(cancel_reservation),
        )
        .route("/:reservation_id/decision", post(decide_reservation))
        .route("/:reservation_id/reminder", post(send_reminder));

    Router::new().nest("/reservations", reservations_routers)
}
