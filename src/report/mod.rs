//! Paginated equipment report with one QR code per asset.
//!
//! Rendering is split in two steps: [`layout::build`] turns a heading and a
//! list of equipment into a [`ReportLayout`] (pages of positioned text, rules
//! and QR matrices), then [`pdf::paint`] serializes that layout to PDF bytes.
//! The layout is plain data, so the same input always yields an equal layout.

pub mod layout;
pub mod pdf;
pub mod qr;

use thiserror::Error;

use crate::models::{Client, Equipment};

pub use layout::{Element, Font, Page, ReportLayout, Tint};
pub use qr::QrMatrix;

/// Title shown when no client scope applies
pub const GLOBAL_TITLE: &str = "Reporte Global de Activos";
pub const GLOBAL_SUBTITLE: &str = "Listado General";
/// Site name used when a client has no address
pub const MAIN_SITE: &str = "Principal";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("QR encoding failed: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("PDF serialization failed: {0}")]
    Pdf(String),
}

/// Title block of a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeading {
    pub title: String,
    pub subtitle: String,
}

impl ReportHeading {
    pub fn global() -> Self {
        Self {
            title: GLOBAL_TITLE.to_string(),
            subtitle: GLOBAL_SUBTITLE.to_string(),
        }
    }

    pub fn for_client(client: &Client) -> Self {
        let site = client
            .direccion
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(MAIN_SITE);
        Self {
            title: format!("Cliente: {}", client.nombre),
            subtitle: format!("Sede: {}", site),
        }
    }
}

/// Lay out and paint a report in one go
pub fn render(heading: &ReportHeading, items: &[Equipment]) -> Result<Vec<u8>, ReportError> {
    let layout = layout::build(heading, items)?;
    pdf::paint(&layout)
}
