//! Employee API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/v1/employees", routes())
}

fn routes() -> Router<ServerState> {
    // Reads: any authenticated caller, the engine decides visibility
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/profile", get(handler::profile))
        .route("/reportings", get(handler::reportings))
        .route("/department/{dept_id}", get(handler::list_by_department))
        .route("/manager/{manager_id}", get(handler::list_by_manager))
        .route("/{id}", get(handler::get_by_id));

    // Mutations: ADMIN access role, then the hierarchy rules
    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            put(handler::update)
                .patch(handler::patch)
                .delete(handler::delete),
        )
        .route("/{id}/manager/{manager_id}", put(handler::assign_manager))
        .route("/{id}/move", put(handler::move_employee))
        .route("/department-heads/{id}/move", put(handler::move_head))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}
