use actix_web::{get, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::utils::api_response::ApiResponse;
use crate::utils::route_table::RouteTable;

#[get("/{path:.*}")]
pub async fn dispatch(
    req: HttpRequest,
    stream: web::Payload,
    table: web::Data<Arc<RouteTable>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiResponse> {
    let entry = table
        .resolve(&path)
        .map_err(|err| ApiResponse::new(404, err.to_string()))?;

    (entry.start)(&req, stream).map_err(|err| ApiResponse::new(400, err.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::routes::ws_routes;
    use crate::utils::chat::{self, ChatRoom};
    use crate::utils::route_table::RouteTable;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpRequest};
    use std::sync::Arc;

    fn chat_route_table(room: Arc<ChatRoom>) -> Arc<RouteTable> {
        Arc::new(
            RouteTable::builder()
                .register("", "chat", {
                    let room = room.clone();
                    Arc::new(move |req: &HttpRequest, stream: web::Payload| {
                        chat::start_consumer(room.clone(), req, stream)
                    })
                })
                .build(),
        )
    }

    #[actix_web::test]
    async fn the_root_path_reaches_the_chat_consumer() {
        let room = Arc::new(ChatRoom::new());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(chat_route_table(room)))
                .configure(ws_routes::config),
        )
        .await;

        // A plain GET carries no upgrade handshake, so the consumer turns it
        // away with 400. A 404 here would mean resolution never found it.
        let req = test::TestRequest::get().uri("/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn other_paths_are_rejected_with_not_found() {
        let room = Arc::new(ChatRoom::new());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(chat_route_table(room)))
                .configure(ws_routes::config),
        )
        .await;

        for uri in ["/chat", "/ws", "/chat/room"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "uri {}", uri);
        }
    }
}
