//! QR code rendering to SVG.

use qrcode::types::Color;
use qrcode::{EcLevel, QrCode};

pub const DEFAULT_SIZE_PX: u32 = 200;
pub const DEFAULT_FOREGROUND: &str = "#000000";
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";
/// Quiet zone around the symbol, in modules.
pub const MARGIN: usize = 2;

const MIN_SIZE_PX: u32 = 32;
const MAX_SIZE_PX: u32 = 2048;

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("cannot encode payload: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("invalid color '{0}', expected #RGB or #RRGGBB")]
    InvalidColor(String),

    #[error("size {0}px is outside {MIN_SIZE_PX}..={MAX_SIZE_PX}")]
    InvalidSize(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    pub url: String,
    pub size_px: u32,
    pub foreground: String,
    pub background: String,
}

impl QrRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            size_px: DEFAULT_SIZE_PX,
            foreground: DEFAULT_FOREGROUND.to_owned(),
            background: DEFAULT_BACKGROUND.to_owned(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, foreground: &str, background: &str) -> Self {
        foreground.clone_into(&mut self.foreground);
        background.clone_into(&mut self.background);
        self
    }

    #[must_use]
    pub fn with_size(mut self, size_px: u32) -> Self {
        self.size_px = size_px;
        self
    }
}

/// Rendered symbol: the SVG markup and the module grid it was drawn from,
/// quiet zone included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrGraphic {
    pub svg: String,
    dimension: usize,
    modules: Vec<bool>,
}

impl QrGraphic {
    /// Modules per side, quiet zone included.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.dimension && y < self.dimension && self.modules[y * self.dimension + x]
    }
}

pub struct QrEncoder;

impl QrEncoder {
    /// Encodes `request.url` at error-correction level M. Output is
    /// deterministic for equal requests.
    pub fn encode(request: &QrRequest) -> Result<QrGraphic, QrError> {
        if !(MIN_SIZE_PX..=MAX_SIZE_PX).contains(&request.size_px) {
            return Err(QrError::InvalidSize(request.size_px));
        }
        let fg = checked_color(&request.foreground)?;
        let bg = checked_color(&request.background)?;

        let code = QrCode::with_error_correction_level(request.url.as_bytes(), EcLevel::M)?;
        let width = code.width();
        let colors = code.to_colors();
        let dimension = width + 2 * MARGIN;

        let mut modules = vec![false; dimension * dimension];
        for (i, color) in colors.iter().enumerate() {
            if *color == Color::Dark {
                let (x, y) = (i % width + MARGIN, i / width + MARGIN);
                modules[y * dimension + x] = true;
            }
        }

        let path: String = (0..dimension)
            .flat_map(|y| (0..dimension).map(move |x| (x, y)))
            .filter(|&(x, y)| modules[y * dimension + x])
            .map(|(x, y)| format!("M{x} {y}h1v1h-1z"))
            .collect();

        let size = request.size_px;
        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {dimension} {dimension}" shape-rendering="crispEdges"><rect width="{dimension}" height="{dimension}" fill="{bg}"/><path fill="{fg}" d="{path}"/></svg>"#
        );

        Ok(QrGraphic {
            svg,
            dimension,
            modules,
        })
    }
}

fn checked_color(value: &str) -> Result<&str, QrError> {
    let hex = value.strip_prefix('#').unwrap_or_default();
    if matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(value)
    } else {
        Err(QrError::InvalidColor(value.to_owned()))
    }
}
