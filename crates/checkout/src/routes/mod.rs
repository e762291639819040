//! HTTP route handlers for the checkout service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness check (backend reachability)
//!
//! # Checkout
//! GET  /checkout                 - Current checkout view
//! GET  /checkout/catalog         - Static pricing catalog
//! GET  /checkout/{tier}          - Start/hydrate (query: resume, utm_*)
//! POST /checkout/tier            - Set tier (clears add-ons)
//! POST /checkout/addons/toggle   - Toggle add-on membership
//! POST /checkout/details         - Update one buyer/consent field
//! POST /checkout/next            - Advance one step
//! POST /checkout/back            - Go back one step
//! POST /checkout/step            - Jump to a step (review's edit)
//! POST /checkout/submit          - Submit (strictly rate limited)
//! ```

pub mod checkout;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, submit_rate_limiter};
use crate::state::AppState;

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/catalog", get(checkout::catalog_view))
        .route("/tier", post(checkout::set_tier))
        .route("/addons/toggle", post(checkout::toggle_addon))
        .route("/details", post(checkout::update_field))
        .route("/next", post(checkout::next_step))
        .route("/back", post(checkout::back_step))
        .route("/step", post(checkout::go_to_step))
        .route(
            "/submit",
            post(checkout::submit_order).route_layer(submit_rate_limiter()),
        )
        .route("/{tier}", get(checkout::start))
        .layer(api_rate_limiter())
}

/// Create all routes for the checkout service.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/checkout", checkout_routes())
}
