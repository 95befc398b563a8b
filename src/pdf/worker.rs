use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crossbeam_channel as chan;
use pdfium_render::prelude::*;

use super::PageBox;
use crate::analyzer::{self, DocumentAnalysis};
use crate::app::{AnalysisMessage, AnalysisProgress};
use crate::error::{AppError, Result};

/// Requests that can be sent to the pdfium worker thread
pub enum PdfRequest {
    /// Read every page box of a document and run the size analysis.
    /// Per-page progress is reported through `events`; the final result
    /// comes back on `response`.
    Analyze {
        path: PathBuf,
        events: chan::Sender<AnalysisMessage>,
        response: oneshot::Sender<Result<DocumentAnalysis>>,
    },
    /// Shutdown the worker thread
    Shutdown,
}

/// Handle to the pdfium worker thread. Pdfium is not thread-safe, so a
/// single dedicated thread owns the instance and serves requests over a
/// channel.
pub struct PdfWorker {
    request_tx: chan::Sender<PdfRequest>,
    _handle: JoinHandle<()>,
}

impl PdfWorker {
    /// Spawn the pdfium worker thread
    pub fn spawn() -> Result<Self> {
        let (request_tx, request_rx) = chan::unbounded::<PdfRequest>();

        let handle = thread::Builder::new()
            .name("pdfium-worker".to_string())
            .spawn(move || {
                // Initialize pdfium ONCE in this thread
                let pdfium = match Self::init_pdfium() {
                    Ok(p) => p,
                    Err(e) => {
                        log::error!("Failed to initialize pdfium: {}", e);
                        return;
                    }
                };

                // Process requests until shutdown or channel closes
                while let Ok(request) = request_rx.recv() {
                    match request {
                        PdfRequest::Analyze {
                            path,
                            events,
                            response,
                        } => {
                            let result = Self::analyze_document(&pdfium, &path, &events);
                            let _ = response.send(result);
                        }
                        PdfRequest::Shutdown => break,
                    }
                }
            })?;

        Ok(Self {
            request_tx,
            _handle: handle,
        })
    }

    fn init_pdfium() -> Result<Pdfium> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| AppError::PdfLoad {
                path: "pdfium library".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Pdfium::new(bindings))
    }

    fn analyze_document(
        pdfium: &Pdfium,
        path: &Path,
        events: &chan::Sender<AnalysisMessage>,
    ) -> Result<DocumentAnalysis> {
        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| AppError::PdfLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let pages = document.pages();
        let pages_total = pages.len() as usize;
        let mut boxes = Vec::with_capacity(pages_total);

        for (index, page) in pages.iter().enumerate() {
            boxes.push(PageBox {
                width_pt: page.width().value,
                height_pt: page.height().value,
            });
            let _ = events.send(AnalysisMessage::Progress(AnalysisProgress {
                filename: filename.clone(),
                pages_done: index + 1,
                pages_total,
            }));
        }

        let (records, summary) = analyzer::analyze_pages(&boxes)?;

        Ok(DocumentAnalysis {
            filename,
            path: path.display().to_string(),
            records,
            summary,
        })
    }

    /// Get a clone of the request sender (for passing to other threads)
    pub fn sender(&self) -> chan::Sender<PdfRequest> {
        self.request_tx.clone()
    }

    /// Request shutdown of the worker thread
    pub fn shutdown(&self) {
        let _ = self.request_tx.send(PdfRequest::Shutdown);
    }
}

impl Drop for PdfWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
