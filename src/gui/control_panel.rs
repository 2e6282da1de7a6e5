//! Control Panel Widget
//! Left side panel with the data overview, city selector and file controls.

use crate::dashboard::Dashboard;
use egui::{Color32, ComboBox, RichText};

/// The single user-controlled filter: which city the city chart shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitySelection {
    cities: Vec<String>,
    selected: Option<usize>,
}

impl CitySelection {
    /// Options in display order; the first one starts selected.
    pub fn new(cities: Vec<String>) -> Self {
        let selected = if cities.is_empty() { None } else { Some(0) };
        Self { cities, selected }
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|idx| self.cities[idx].as_str())
    }

    /// Select a known city. Returns true when the selection changed.
    pub fn select(&mut self, city: &str) -> bool {
        match self.cities.iter().position(|c| c == city) {
            Some(idx) if self.selected != Some(idx) => {
                self.selected = Some(idx);
                true
            }
            Some(_) => false,
            None => {
                log::debug!("Ignoring unknown city {:?}", city);
                false
            }
        }
    }
}

/// Left side control panel with overview facts and the city selector.
pub struct ControlPanel {
    pub selection: CitySelection,
    pub status: String,
    pub is_loading: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selection: CitySelection::default(),
            status: "Ready".to_string(),
            is_loading: false,
        }
    }
}

impl ControlPanel {
    pub fn new(dashboard: &Dashboard) -> Self {
        let mut panel = Self::default();
        panel.reset(dashboard);
        panel
    }

    /// Replace the selector options after a new file is loaded.
    pub fn reset(&mut self, dashboard: &Dashboard) {
        self.selection = CitySelection::new(dashboard.cities.clone());
        self.set_status(&format!(
            "Loaded {} rows, {} years",
            dashboard.summary.observation_count,
            dashboard.yearly.len()
        ));
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, dashboard: &Dashboard) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌡 Global Land Temperature Analysis")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let file_name = dashboard
                        .source
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| dashboard.source.display().to_string());
                    ui.label(RichText::new(file_name).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.is_loading, |ui| {
                            if ui.button("📂 Open CSV").clicked() {
                                action = ControlPanelAction::OpenCsv;
                            }
                        });
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Overview Section =====
        ui.label(RichText::new("📊 Data Overview").size(14.0).strong());
        ui.add_space(5.0);

        let summary = &dashboard.summary;
        let years = summary
            .year_range
            .map(|(min, max)| format!("{} - {}", min, max))
            .unwrap_or_else(|| "n/a".to_string());

        ui.label(format!("Total number of unique cities: {}", summary.city_count));
        ui.label(format!("Data covers years: {}", years));
        ui.label(
            RichText::new(format!(
                "{} observations, {} missing values filled with column means",
                summary.observation_count,
                dashboard.imputed_count()
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== City Selection =====
        ui.label(RichText::new("🏙 Select a City").size(14.0).strong());
        ui.add_space(5.0);

        let current = self.selection.selected().unwrap_or_default().to_string();
        let mut picked: Option<String> = None;

        ComboBox::from_id_salt("city_select")
            .width(220.0)
            .selected_text(&current)
            .show_ui(ui, |ui| {
                for city in self.selection.cities() {
                    if ui.selectable_label(current == *city, city).clicked() {
                        picked = Some(city.clone());
                    }
                }
            });

        if let Some(city) = picked {
            if self.selection.select(&city) {
                log::debug!("Selected city {}", city);
                action = ControlPanelAction::CityChanged;
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        if self.is_loading {
            ui.add(egui::Spinner::new());
        }

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    OpenCsv,
    CityChanged,
}
