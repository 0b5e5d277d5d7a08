use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::store::BookStore;
use crate::{ServerResult, internal, some_or_404};

#[derive(Debug, Deserialize)]
pub(crate) struct IdParam {
    id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TitleParam {
    title: String,
}

// A malformed id and a store failure both answer 500 with the same
// public message; the wire does not distinguish them.
pub(crate) async fn by_id(
    store: web::Data<BookStore>,
    param: web::Query<IdParam>,
) -> ServerResult {
    let book = store
        .get_by_id(&param.id)
        .await
        .map_err(internal("Invalid ID"))?;
    let book = some_or_404!(book, "Book not found");
    Ok(HttpResponse::Ok().json(book))
}

pub(crate) async fn by_title(
    store: web::Data<BookStore>,
    param: web::Query<TitleParam>,
) -> ServerResult {
    let book = store
        .get_by_field("title", &param.title)
        .await
        .map_err(internal("Internal Server Error"))?;
    let book = some_or_404!(book, "Book not found");
    Ok(HttpResponse::Ok().json(book))
}
