use actix_web::{get, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
pub mod articles;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

#[get("/")]
pub async fn index(_req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().body("hello world")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_rt::test]
    async fn test_get() {
        let app = test::init_service(App::new().service(index)).await;
        let req = test::TestRequest::get()
            .insert_header(("content-type", "text/plain"))
            .uri("/")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(test::read_body(resp).await, "hello world");
    }
}
