use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::slot::{delete_slot, register_slot, show_slot, show_slot_list, update_slot};

pub fn build_slot_routers() -> Router<AppRegistry> {
    let slots_routers = Router::new()
        .route("/", post(register_slot))
        .route("/", get(show_slot_list))
        .route("/:slot_id", get(show_slot))
        .route("/:slot_id", put(update_slot))
        .route("/:slot_id", delete(delete_slot));

    Router::new().nest("/slots", slots_routers)
}
