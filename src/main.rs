mod analyzer;
mod app;
mod config;
mod error;
mod output;
mod pdf;

use app::{App, AppState};
use eframe::egui;
use egui_extras::{Column, TableBuilder};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "PDF Page Size Analyzer",
        options,
        Box::new(|_cc| Ok(Box::new(App::default()))),
    )
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for analysis updates
        self.update_analysis();

        // Request repaint during analysis
        if matches!(self.state, AppState::Analyzing) {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("PDF Page Size Analyzer");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Export Results").clicked() {
                        self.export_results();
                    }
                    let analyzing = matches!(self.state, AppState::Analyzing);
                    if ui
                        .add_enabled(!analyzing, egui::Button::new("Select PDF File"))
                        .clicked()
                    {
                        self.select_file();
                    }
                    if analyzing {
                        ui.spinner();
                        if let Some(progress) = &self.progress {
                            ui.label(format!(
                                "page {}/{}",
                                progress.pages_done, progress.pages_total
                            ));
                        }
                    }
                });
            });
        });

        // Bottom panels stack upwards: status bar below the summary.
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::TopBottomPanel::bottom("summary_panel").show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .max_height(120.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    ui.label(output::summary_text(&self.summary));
                });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            results_table(ui, &self.records);
        });
    }
}

fn results_table(ui: &mut egui::Ui, records: &[analyzer::PageRecord]) {
    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::remainder())
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.strong("Page");
            });
            header.col(|ui| {
                ui.strong("Width (mm)");
            });
            header.col(|ui| {
                ui.strong("Height (mm)");
            });
            header.col(|ui| {
                ui.strong("Size & Recommended Paper");
            });
        })
        .body(|body| {
            body.rows(22.0, records.len(), |mut row| {
                let record = &records[row.index()];
                row.col(|ui| {
                    ui.label(record.page.to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", record.width_mm));
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", record.height_mm));
                });
                row.col(|ui| {
                    ui.label(&record.label);
                });
            });
        });
}
