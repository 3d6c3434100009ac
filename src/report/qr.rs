//! QR matrix encoding for asset identifiers

use qrcode::{Color, QrCode};

use super::ReportError;
use crate::models::Equipment;

/// Square module matrix of an encoded QR symbol (no quiet zone)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

/// Text scanned from an asset label
pub fn payload(equipment: &Equipment) -> String {
    format!("ID:{}\nSN:{}", equipment.id, equipment.serial)
}

impl QrMatrix {
    pub fn encode(data: &str) -> Result<Self, ReportError> {
        let code = QrCode::new(data.as_bytes())?;
        let width = code.width();
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        Ok(Self { width, dark })
    }

    /// Modules per side
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }

    /// Rasterize to 8-bit greyscale, `box_size` pixels per module and a
    /// `border` modules wide white quiet zone. Returns (side in px, pixels).
    pub fn to_luma(&self, box_size: usize, border: usize) -> (usize, Vec<u8>) {
        let side = (self.width + 2 * border) * box_size;
        let mut pixels = vec![0xFF_u8; side * side];
        for y in 0..self.width {
            for x in 0..self.width {
                if !self.is_dark(x, y) {
                    continue;
                }
                let top = (y + border) * box_size;
                let left = (x + border) * box_size;
                for row in top..top + box_size {
                    let start = row * side + left;
                    pixels[start..start + box_size].fill(0x00);
                }
            }
        }
        (side, pixels)
    }
}
