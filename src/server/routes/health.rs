//! Health check endpoint

use actix_web::HttpResponse;

/// Liveness check on the root path; no dependencies, no failure mode
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().body("Backend is alive and ready")
}
