//! PDF report download

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};

use crate::{error::AppResult, models::client::ClientFilter};

use super::ViewUser;

/// Download the equipment report for a client, or for every client
#[utoipa::path(
    get,
    path = "/exportar-pdf",
    tag = "reportes",
    params(ClientFilter),
    responses(
        (status = 200, description = "PDF document (application/pdf attachment)"),
        (status = 303, description = "Not logged in, redirected to /login")
    )
)]
pub async fn export_pdf(
    State(state): State<crate::AppState>,
    ViewUser(_identity): ViewUser,
    Query(filter): Query<ClientFilter>,
) -> AppResult<impl IntoResponse> {
    let bytes = state.services.reports.generate(filter.cliente_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"reporte.pdf\""),
        ],
        bytes,
    ))
}
