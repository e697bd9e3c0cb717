pub mod handlers;
pub mod ws_routes;
