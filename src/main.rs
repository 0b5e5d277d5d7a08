#![warn(clippy::dbg_macro)]

use std::fmt::Display;

use actix_web::{App, HttpResponse, HttpServer, middleware, web};

use error::{ApiError, IoErrorContext, Result, StoreError};

mod book;
mod config;
mod create;
mod edit;
mod error;
mod health;
mod list;
mod lookup;
mod random;
mod store;

macro_rules! some_or_404 {
    ($res:expr, $msg:expr) => {
        match $res {
            Some(val) => val,
            None => {
                return Ok(actix_web::HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": $msg })));
            }
        }
    };
}
pub(crate) use some_or_404;

/// A failed request: the underlying error goes to the log, the fixed
/// per-route message goes on the wire. Every store failure is a 500;
/// malformed ids are deliberately not split out into a 4xx.
#[derive(Debug)]
pub(crate) struct RequestError {
    public: &'static str,
    err: ApiError,
}

impl Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.err)
    }
}

impl actix_web::error::ResponseError for RequestError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("{}", self.err);
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.public }))
    }
}

pub(crate) fn internal(public: &'static str) -> impl FnOnce(StoreError) -> RequestError {
    move |err| RequestError {
        public,
        err: err.into(),
    }
}

pub(crate) type ServerResult = std::result::Result<HttpResponse, RequestError>;

async fn inner_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::load()?;

    let store = store::BookStore::connect(&config.store_uri).await?;
    // The driver reconnects on demand, so a dead store at startup only
    // costs requests, not the process.
    match store.ping().await {
        Ok(()) => log::info!("MongoDB connected"),
        Err(e) => log::error!("MongoDB connection error: {e}"),
    }

    let store_data = web::Data::new(store);
    let enable_compression = config.enable_compression;

    log::info!("listening on {}", config.bind);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Condition::new(
                enable_compression,
                middleware::Compress::default(),
            ))
            .app_data(store_data.clone())
            .route("/", web::get().to(list::get))
            .route("/book/id/", web::get().to(lookup::by_id))
            .route("/book/title/", web::get().to(lookup::by_title))
            .route("/book/random", web::get().to(random::get))
            .route("/book/new", web::post().to(create::post))
            .route("/book/edit", web::patch().to(edit::patch))
            .route("/health", web::get().to(health::get))
    })
    .workers(config.workers)
    .max_connection_rate(config.max_connection_rate)
    .bind(config.bind.clone())
    .io_context("Failed to bind server")?;

    server.run().await.io_context("Failed to start server")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    inner_main().await.map_err(std::io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::error::ResponseError;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn store_failures_answer_500_with_the_route_message() {
        let err = internal("Failed to add book")(StoreError::Operation {
            reason: "boom".into(),
        });
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({ "error": "Failed to add book" })
        );
    }

    #[actix_web::test]
    async fn absence_answers_404_with_the_route_message() {
        async fn handler(book: Option<u32>) -> ServerResult {
            let book = some_or_404!(book, "Book not found");
            Ok(HttpResponse::Ok().json(book))
        }

        let response = handler(None).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({ "error": "Book not found" })
        );

        let response = handler(Some(1)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
