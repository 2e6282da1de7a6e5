//! Chart Viewer Widget
//! Right side scrollable page with the aggregate tables and line charts.

use crate::charts::{
    ChartPlotter, CITY_COLOR, MOVING_AVERAGE_COLOR, TEMPERATURE_COLOR, TEMPERATURE_SERIES,
};
use crate::dashboard::Dashboard;
use crate::stats::CityYearlyAggregate;
use egui::{RichText, ScrollArea};

/// Number of city-yearly rows shown in the preview table
const PREVIEW_ROWS: usize = 5;
const SECTION_SPACING: f32 = 18.0;

/// Scrollable dashboard page. Holds the filtered series for the selected city
/// so that redraws never touch the aggregates.
#[derive(Default)]
pub struct ChartViewer {
    pub selected_city: Option<String>,
    pub city_series: Vec<CityYearlyAggregate>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-filter the city-yearly aggregate for a new selection.
    pub fn set_city(&mut self, dashboard: &Dashboard, city: Option<&str>) {
        self.city_series = city
            .map(|c| dashboard.city_series(c))
            .unwrap_or_default();
        self.selected_city = city.map(str::to_string);
    }

    /// Draw every dashboard section in page order
    pub fn show(&self, ui: &mut egui::Ui, dashboard: &Dashboard) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::section(ui, "Yearly Average Temperature & Uncertainty");
                ChartPlotter::draw_yearly_table(ui, &dashboard.yearly);
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "Year vs Average Temperature (Line Plot)");
                ChartPlotter::draw_line_chart(
                    ui,
                    "yearly_temperature",
                    "Yearly Average Temperature",
                    TEMPERATURE_SERIES,
                    ChartPlotter::yearly_points(&dashboard.yearly),
                    TEMPERATURE_COLOR,
                );
                ui.add_space(SECTION_SPACING);

                let moving_title = format!("{} Year Moving Average Temperature", dashboard.window);
                Self::section(ui, &moving_title);
                ChartPlotter::draw_line_chart(
                    ui,
                    "moving_average",
                    &moving_title,
                    &ChartPlotter::moving_average_series(dashboard.window),
                    ChartPlotter::moving_average_points(&dashboard.yearly),
                    MOVING_AVERAGE_COLOR,
                );
                ui.add_space(SECTION_SPACING);

                Self::section(ui, "Yearly Average Temperature by City");
                let preview_len = dashboard.city_yearly.len().min(PREVIEW_ROWS);
                ChartPlotter::draw_city_table(ui, &dashboard.city_yearly[..preview_len]);
                ui.add_space(SECTION_SPACING);

                let city_title = format!(
                    "Yearly Average Temperature for {}",
                    self.selected_city.as_deref().unwrap_or("-")
                );
                Self::section(ui, &city_title);
                ChartPlotter::draw_line_chart(
                    ui,
                    "city_temperature",
                    &city_title,
                    TEMPERATURE_SERIES,
                    ChartPlotter::city_points(&self.city_series),
                    CITY_COLOR,
                );
            });
    }

    fn section(ui: &mut egui::Ui, title: &str) {
        ui.label(RichText::new(title).size(18.0).strong());
        ui.add_space(6.0);
    }
}
