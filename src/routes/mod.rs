use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub mod assets;
pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod events;
pub mod home;
pub mod opportunities;
pub mod profile;
pub mod registration;

/// All named views plus the asset route, one module per screen.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/assets/{*path}", get(assets::serve))
        .merge(auth::router())
        .merge(contact::router())
        .merge(dashboard::router())
        .merge(events::router())
        .merge(opportunities::router())
        .merge(profile::router())
        .merge(registration::router())
}
