use actix_web::{HttpResponse, web};

use crate::store::BookStore;
use crate::{ServerResult, internal};

pub(crate) async fn get(store: web::Data<BookStore>) -> ServerResult {
    let books = store
        .list_all()
        .await
        .map_err(internal("Internal Server Error"))?;
    Ok(HttpResponse::Ok().json(books))
}
