use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use std::sync::Arc;
use utils::chat::{self, ChatRoom};
use utils::route_table::RouteTable;

mod routes;
mod utils;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Conversa Gateway...");

    let chat_room = Arc::new(ChatRoom::new());

    // Built once before the server accepts connections, then shared
    // read-only with every worker.
    let route_table = Arc::new(
        RouteTable::builder()
            .register("", "chat", {
                let room = chat_room.clone();
                Arc::new(move |req: &actix_web::HttpRequest, stream: web::Payload| {
                    chat::start_consumer(room.clone(), req, stream)
                })
            })
            .build(),
    );

    let host = (*utils::constants::HOST).clone();
    let port = *utils::constants::PORT;

    info!("Listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::permissive()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(route_table.clone()))
            .configure(routes::ws_routes::config)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
