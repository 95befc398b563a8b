use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel as chan;

use crate::analyzer::{DocumentAnalysis, PageRecord, SizeSummary};
use crate::config::Config;
use crate::output;
use crate::pdf::{PdfRequest, PdfWorker};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    /// No results held; nothing to export.
    Empty,
    /// Worker is reading pages; file selection is disabled.
    Analyzing,
    /// Records populated and exportable.
    Ready,
}

#[derive(Debug, Clone)]
pub struct AnalysisProgress {
    pub filename: String,
    pub pages_done: usize,
    pub pages_total: usize,
}

pub enum AnalysisMessage {
    Progress(AnalysisProgress),
    Complete(DocumentAnalysis),
    Error(String),
}

pub struct App {
    pub state: AppState,
    pub records: Vec<PageRecord>,
    pub summary: SizeSummary,
    pub progress: Option<AnalysisProgress>,
    pub status: String,
    pub config: Config,

    // Channel from the in-flight analysis, if any
    pub analysis_receiver: Option<chan::Receiver<AnalysisMessage>>,

    // PDF worker thread
    worker: PdfWorker,
}

impl Default for App {
    fn default() -> Self {
        let config = Config::load();
        let worker = PdfWorker::spawn().expect("Failed to initialize PDF worker");

        Self {
            state: AppState::Empty,
            records: Vec::new(),
            summary: SizeSummary::new(),
            progress: None,
            status: "Ready".to_string(),
            config,
            analysis_receiver: None,
            worker,
        }
    }
}

impl App {
    /// Ask for a PDF and analyze it. User cancel is a no-op.
    pub fn select_file(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("PDF files", &["pdf"]);
        if let Some(dir) = &self.config.last_open_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };

        if let Some(dir) = path.parent() {
            self.config.last_open_dir = Some(dir.to_path_buf());
            self.save_config();
        }

        self.start_analysis(path);
    }

    pub fn start_analysis(&mut self, path: PathBuf) {
        // Prior results are gone the moment a new analysis begins.
        self.records.clear();
        self.summary.clear();
        self.progress = None;
        self.state = AppState::Analyzing;
        self.status = format!("Analyzing: {}", display_name(&path));
        log::info!("analyzing {}", path.display());

        let (events_tx, events_rx) = chan::unbounded();
        self.analysis_receiver = Some(events_rx);
        let worker_tx = self.worker.sender();

        thread::spawn(move || run_analysis(path, worker_tx, events_tx));
    }

    /// Drain pending analysis messages. Called once per frame.
    pub fn update_analysis(&mut self) {
        let mut finished = false;

        if let Some(ref receiver) = self.analysis_receiver {
            while let Ok(msg) = receiver.try_recv() {
                match msg {
                    AnalysisMessage::Progress(progress) => {
                        self.progress = Some(progress);
                    }
                    AnalysisMessage::Complete(analysis) => {
                        log::info!(
                            "analysis of {} complete: {} pages",
                            analysis.filename,
                            analysis.records.len()
                        );
                        self.records = analysis.records;
                        self.summary = analysis.summary;
                        self.state = AppState::Ready;
                        self.status = "Analysis complete".to_string();
                        finished = true;
                    }
                    AnalysisMessage::Error(message) => {
                        log::warn!("analysis failed: {}", message);
                        self.records.clear();
                        self.summary.clear();
                        self.state = AppState::Empty;
                        self.status = format!("Error: {}", message);
                        show_message(
                            rfd::MessageLevel::Error,
                            "Error",
                            &format!("Error analyzing PDF: {}", message),
                        );
                        finished = true;
                    }
                }
            }
        }

        if finished {
            self.analysis_receiver = None;
            self.progress = None;
        }
    }

    /// Write the current records to a CSV chosen via a save dialog.
    pub fn export_results(&mut self) {
        if self.records.is_empty() {
            self.status = "Warning: No results to export".to_string();
            show_message(rfd::MessageLevel::Warning, "Warning", "No results to export!");
            return;
        }

        let mut dialog = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_file_name(output::default_filename());
        if let Some(dir) = &self.config.last_export_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        if let Some(dir) = path.parent() {
            self.config.last_export_dir = Some(dir.to_path_buf());
            self.save_config();
        }

        match output::write_csv(&self.records, &path) {
            Ok(()) => {
                log::info!("exported {} rows to {}", self.records.len(), path.display());
                self.status = "Results exported successfully".to_string();
                show_message(
                    rfd::MessageLevel::Info,
                    "Success",
                    "Results exported successfully!",
                );
            }
            Err(e) => {
                log::warn!("export failed: {}", e);
                self.status = format!("Error: {}", e);
                show_message(
                    rfd::MessageLevel::Error,
                    "Error",
                    &format!("Error exporting results: {}", e),
                );
            }
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            log::warn!("Failed to save preferences: {}", e);
        }
    }
}

fn run_analysis(
    path: PathBuf,
    worker_tx: chan::Sender<PdfRequest>,
    events_tx: chan::Sender<AnalysisMessage>,
) {
    let filename = display_name(&path);

    let (response_tx, response_rx) = oneshot::channel();
    if worker_tx
        .send(PdfRequest::Analyze {
            path,
            events: events_tx.clone(),
            response: response_tx,
        })
        .is_err()
    {
        let _ = events_tx.send(AnalysisMessage::Error(
            "PDF worker thread is not responding".to_string(),
        ));
        return;
    }

    match response_rx.recv() {
        Ok(Ok(analysis)) => {
            let _ = events_tx.send(AnalysisMessage::Complete(analysis));
        }
        Ok(Err(e)) => {
            let _ = events_tx.send(AnalysisMessage::Error(e.to_string()));
        }
        Err(_) => {
            let _ = events_tx.send(AnalysisMessage::Error(format!(
                "PDF worker died while analyzing {}",
                filename
            )));
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn show_message(level: rfd::MessageLevel, title: &str, description: &str) {
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .show();
}
