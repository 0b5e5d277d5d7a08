use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::book::BookFields;
use crate::store::BookStore;
use crate::{ServerResult, internal};

pub(crate) async fn post(
    store: web::Data<BookStore>,
    body: web::Json<BookFields>,
) -> ServerResult {
    let book = store
        .insert(body.into_inner())
        .await
        .map_err(internal("Failed to add book"))?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Book added successfully",
        "book": book,
    })))
}
