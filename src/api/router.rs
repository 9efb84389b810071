//! API router: medical records, patients and doctors under `/api/`.

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints::{doctors, patients, records};
use crate::api::types::ApiContext;

/// Build the full API router. CORS is wide open, as the clients are
/// mobile apps calling from arbitrary origins.
pub fn api_router(ctx: ApiContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let records = Router::new()
        .route("/", get(records::list).post(records::register))
        .route("/fechas", get(records::by_date_range))
        .route("/paciente/:dni", get(records::by_patient))
        .route("/medico/:cmp", get(records::by_doctor))
        .route(
            "/:id",
            get(records::get).put(records::update).delete(records::delete),
        );

    let patients = Router::new()
        .route("/", get(patients::list).post(patients::register))
        .route(
            "/:dni",
            get(patients::get).put(patients::update).delete(patients::delete),
        );

    let doctors = Router::new()
        .route("/", get(doctors::list).post(doctors::register))
        .route("/especialidad/:nombre", get(doctors::by_specialty))
        .route(
            "/:cmp",
            get(doctors::get).put(doctors::update).delete(doctors::delete),
        );

    Router::new()
        .nest("/api/historias-clinicas", records)
        .nest("/api/pacientes", patients)
        .nest("/api/medicos", doctors)
        .layer(cors)
        .with_state(ctx)
}
