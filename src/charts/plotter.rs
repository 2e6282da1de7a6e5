//! Chart Plotter Module
//! Creates interactive line charts and tables using egui_plot.

use crate::stats::{CityYearlyAggregate, YearlyAggregate};
use egui::{Color32, RichText};
use egui_plot::{Line, Plot, PlotPoints, Points};

/// Series colors
pub const TEMPERATURE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const MOVING_AVERAGE_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const CITY_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green

pub const TEMPERATURE_LABEL: &str = "Average Temperature (°C)";
/// Hover name of the yearly and city temperature lines
pub const TEMPERATURE_SERIES: &str = "AverageTemperature";

const CHART_HEIGHT: f32 = 260.0;
const TABLE_HEIGHT: f32 = 220.0;

/// Creates line charts and tables for the dashboard.
pub struct ChartPlotter;

impl ChartPlotter {
    /// (year, mean temperature) pairs; non-finite means are skipped.
    pub fn yearly_points(rows: &[YearlyAggregate]) -> Vec<[f64; 2]> {
        rows.iter()
            .filter(|row| row.mean_temperature.is_finite())
            .map(|row| [row.year as f64, row.mean_temperature])
            .collect()
    }

    /// (year, moving average) pairs for the years where the window is full.
    pub fn moving_average_points(rows: &[YearlyAggregate]) -> Vec<[f64; 2]> {
        rows.iter()
            .filter_map(|row| {
                row.moving_average
                    .filter(|avg| avg.is_finite())
                    .map(|avg| [row.year as f64, avg])
            })
            .collect()
    }

    pub fn city_points(rows: &[CityYearlyAggregate]) -> Vec<[f64; 2]> {
        rows.iter()
            .filter(|row| row.mean_temperature.is_finite())
            .map(|row| [row.year as f64, row.mean_temperature])
            .collect()
    }

    /// Hover name of the moving-average line, e.g. `10_year_avg`.
    pub fn moving_average_series(window: usize) -> String {
        format!("{}_year_avg", window)
    }

    /// Draw a titled Year vs temperature line chart.
    /// `series` names the line on hover; the title is shown above the plot.
    pub fn draw_line_chart(
        ui: &mut egui::Ui,
        id: &str,
        title: &str,
        series: &str,
        points: Vec<[f64; 2]>,
        color: Color32,
    ) {
        ui.label(RichText::new(title).size(14.0).strong());

        let single_point = points.len() == 1;

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label(TEMPERATURE_LABEL)
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .show(ui, |plot_ui| {
                // A lone point draws no visible line segment
                if single_point {
                    plot_ui.points(
                        Points::new(PlotPoints::from(points.clone()))
                            .radius(3.0)
                            .color(color),
                    );
                }
                plot_ui.line(
                    Line::new(PlotPoints::from(points))
                        .color(color)
                        .width(1.5)
                        .name(series),
                );
            });
    }

    /// Draw the yearly aggregate table (moving average omitted).
    pub fn draw_yearly_table(ui: &mut egui::Ui, rows: &[YearlyAggregate]) {
        Self::table_frame(ui, "yearly_table", |ui| {
            egui::Grid::new("yearly_table_grid")
                .striped(true)
                .min_col_width(80.0)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Year").strong().size(11.0));
                    ui.label(RichText::new("AverageTemperature").strong().size(11.0));
                    ui.label(RichText::new("AverageTemperatureUncertainty").strong().size(11.0));
                    ui.end_row();

                    for row in rows {
                        ui.label(RichText::new(row.year.to_string()).size(11.0));
                        ui.label(RichText::new(format!("{:.3}", row.mean_temperature)).size(11.0));
                        ui.label(RichText::new(format!("{:.3}", row.mean_uncertainty)).size(11.0));
                        ui.end_row();
                    }
                });
        });
    }

    /// Draw a (City, Year, AverageTemperature) table.
    pub fn draw_city_table(ui: &mut egui::Ui, rows: &[CityYearlyAggregate]) {
        Self::table_frame(ui, "city_table", |ui| {
            egui::Grid::new("city_table_grid")
                .striped(true)
                .min_col_width(80.0)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("City").strong().size(11.0));
                    ui.label(RichText::new("Year").strong().size(11.0));
                    ui.label(RichText::new("AverageTemperature").strong().size(11.0));
                    ui.end_row();

                    for row in rows {
                        ui.label(RichText::new(&row.city).size(11.0));
                        ui.label(RichText::new(row.year.to_string()).size(11.0));
                        ui.label(RichText::new(format!("{:.3}", row.mean_temperature)).size(11.0));
                        ui.end_row();
                    }
                });
        });
    }

    fn table_frame(ui: &mut egui::Ui, id: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(TABLE_HEIGHT)
                    .auto_shrink([false, true])
                    .show(ui, add_contents);
            });
    }
}
