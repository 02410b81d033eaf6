//! GraphLens server: axum JSON API over the workspace service, the plugin
//! registry and the command interpreter.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
