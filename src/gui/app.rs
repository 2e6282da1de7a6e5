//! Thermo Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::dashboard::Dashboard;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(Box<Dashboard>),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    dashboard: Dashboard,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dashboard: Dashboard) -> Self {
        let control_panel = ControlPanel::new(&dashboard);
        let mut chart_viewer = ChartViewer::new();
        chart_viewer.set_city(&dashboard, control_panel.selection.selected());

        Self {
            dashboard,
            control_panel,
            chart_viewer,
            load_rx: None,
        }
    }

    /// Handle CSV file selection; the pipeline runs off the UI thread.
    fn handle_browse_csv(&mut self) {
        if self.control_panel.is_loading {
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        self.control_panel.is_loading = true;
        self.control_panel.set_status("Loading CSV file...");

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let window = self.dashboard.window;

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!(
                "Reading {}...",
                path.display()
            )));

            let result = match Dashboard::build(&path, window) {
                Ok(dashboard) => LoadResult::Complete(Box::new(dashboard)),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };
        let mut should_keep_receiver = true;

        while let Ok(result) = rx.try_recv() {
            match result {
                LoadResult::Progress(status) => {
                    self.control_panel.set_status(&status);
                }
                LoadResult::Complete(dashboard) => {
                    self.apply_dashboard(*dashboard);
                    self.control_panel.is_loading = false;
                    should_keep_receiver = false;
                }
                LoadResult::Error(error) => {
                    log::warn!("Reload failed: {}", error);
                    self.control_panel.set_status(&format!("Error: {}", error));
                    self.control_panel.is_loading = false;
                    should_keep_receiver = false;
                }
            }
        }

        if should_keep_receiver {
            self.load_rx = Some(rx);
        }
    }

    fn apply_dashboard(&mut self, dashboard: Dashboard) {
        log::info!("Showing {}", dashboard.source.display());
        self.control_panel.reset(&dashboard);
        self.chart_viewer
            .set_city(&dashboard, self.control_panel.selection.selected());
        self.dashboard = dashboard;
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.control_panel.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, &self.dashboard) {
                        ControlPanelAction::OpenCsv => self.handle_browse_csv(),
                        ControlPanelAction::CityChanged => {
                            let city = self.control_panel.selection.selected();
                            self.chart_viewer.set_city(&self.dashboard, city);
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.dashboard);
        });
    }
}
