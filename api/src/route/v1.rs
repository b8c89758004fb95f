use super::{
    report::build_report_routers, reservation::build_reservation_routers,
    slot::build_slot_routers, space::build_space_routers, user::build_user_router,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_space_routers())
        .merge(build_slot_routers())
        .merge(build_reservation_routers())
        .merge(build_report_routers())
        .merge(build_user_router());
    Router::new().nest("/api/v1", router)
}
