use actix_web::{HttpResponse, web};
use rand::seq::SliceRandom;

use crate::store::BookStore;
use crate::{ServerResult, internal, some_or_404};

// Uniform pick over the full set fetched for this request; linear in
// collection size per call.
pub(crate) async fn get(store: web::Data<BookStore>) -> ServerResult {
    let books = store
        .list_all()
        .await
        .map_err(internal("Internal Server Error"))?;
    let book = some_or_404!(books.choose(&mut rand::thread_rng()), "No books found");
    Ok(HttpResponse::Ok().json(book))
}
