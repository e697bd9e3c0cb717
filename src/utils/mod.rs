pub mod api_response;
pub mod chat;
pub mod constants;
pub mod route_table;
