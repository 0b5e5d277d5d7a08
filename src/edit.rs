use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

use crate::book::BookFields;
use crate::store::BookStore;
use crate::{ServerResult, internal, some_or_404};

#[derive(Debug, Deserialize)]
pub(crate) struct Param {
    id: String,
}

// Full replace, not a merge: attributes omitted from the body are gone
// from the stored document afterwards.
pub(crate) async fn patch(
    store: web::Data<BookStore>,
    param: web::Query<Param>,
    body: web::Json<BookFields>,
) -> ServerResult {
    let book = store
        .replace_by_id(&param.id, body.into_inner())
        .await
        .map_err(internal("Failed to update book"))?;
    let book = some_or_404!(book, "Book not found");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Book updated successfully",
        "book": book,
    })))
}
