use actix_web::HttpResponse;

// Liveness only; no store round-trip.
pub(crate) async fn get() -> HttpResponse {
    HttpResponse::Ok().body("OK\n")
}
