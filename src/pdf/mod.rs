pub mod worker;

pub use worker::{PdfRequest, PdfWorker};

/// Raw page-box dimensions as reported by the document, in points
/// (1/72 inch). Conversion and validation happen in the analyzer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub width_pt: f32,
    pub height_pt: f32,
}
