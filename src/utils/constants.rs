use std::env;

use lazy_static::lazy_static;

lazy_static! {
    pub static ref HOST: String = set_host();
    pub static ref PORT: u16 = set_port();
}

fn set_host() -> String {
    dotenv::dotenv().ok();
    env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
}

fn set_port() -> u16 {
    dotenv::dotenv().ok();
    env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(8000)
}
