use actix_cors::Cors;
use actix_web::http::header;

/// Read-only API: browsers on the listed origins may issue JSON GETs.
pub fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins.iter().fold(
        Cors::default()
            .allowed_methods(["GET"])
            .allowed_header(header::CONTENT_TYPE)
            .max_age(3600),
        |cors, origin| cors.allowed_origin(origin),
    )
}

#[cfg(test)]
mod tests {
    use actix_web::{http::header, test, web, App, HttpResponse};

    use super::*;

    #[actix_web::test]
    async fn only_listed_origins_are_echoed() {
        let app = test::init_service(
            App::new()
                .wrap(configure_cors(&["http://localhost:5173".to_string()]))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://evil.test"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
