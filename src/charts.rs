//! Static SVG charts: quantity over time and share per site/zone.

use crate::config::Annotation;
use crate::error::ReportError;
use crate::types::GroupShare;
use chrono::{Datelike, NaiveDate};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::error::Error;
use std::path::Path;
use tracing::{info, warn};

const CHART_SIZE: (u32, u32) = (800, 600);
const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);
const HIGHLIGHT_COLOR: RGBColor = RGBColor(214, 39, 40);

// Category colours cycled over the pie slices.
const SLICE_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Labels and extras for a time-series chart.
pub struct TimeChart<'a> {
    pub title: &'a str,
    pub y_desc: &'a str,
    pub annotations: &'a [Annotation],
    /// Points drawn as red markers on top of the line.
    pub highlights: &'a [(NaiveDate, f64)],
}

fn day_number(d: NaiveDate) -> f64 {
    d.num_days_from_ce() as f64
}

fn day_label(v: &f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

fn chart_err(path: &Path, e: Box<dyn Error>) -> ReportError {
    ReportError::Chart { path: path.to_path_buf(), message: e.to_string() }
}

/// Line chart of quantity against date. An empty series writes nothing.
pub fn render_time_series(
    path: &Path,
    series: &[(NaiveDate, f64)],
    chart: &TimeChart,
) -> Result<(), ReportError> {
    if series.is_empty() {
        warn!(path = %path.display(), "no dated rows, chart skipped");
        return Ok(());
    }
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    draw_time_series(root, series, chart).map_err(|e| chart_err(path, e))?;
    info!(path = %path.display(), "chart written");
    Ok(())
}

fn draw_time_series<DB>(
    root: DrawingArea<DB, Shift>,
    series: &[(NaiveDate, f64)],
    opts: &TimeChart,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let xs = series.iter().map(|(d, _)| day_number(*d));
    let mut x_min = xs.clone().fold(f64::INFINITY, f64::min);
    let mut x_max = xs.fold(f64::NEG_INFINITY, f64::max);
    if x_max - x_min < 1.0 {
        x_min -= 1.0;
        x_max += 1.0;
    }
    let mut y_max = series.iter().map(|(_, kg)| *kg).fold(0.0, f64::max);
    y_max = opts.annotations.iter().map(|a| a.kg).fold(y_max, f64::max);
    if y_max <= 0.0 {
        y_max = 1.0;
    }

    let mut chart = ChartBuilder::on(&root)
        .caption(opts.title, ("sans-serif", 18))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(x_min..x_max, 0.0..(y_max * 1.1))?;

    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&day_label)
        .y_label_formatter(&|v| format!("{:.0}", v))
        .x_desc("Tiempo")
        .y_desc(opts.y_desc)
        .draw()?;

    chart.draw_series(LineSeries::new(
        series.iter().map(|(d, kg)| (day_number(*d), *kg)),
        &LINE_COLOR,
    ))?;

    chart.draw_series(
        opts.highlights
            .iter()
            .map(|(d, kg)| Circle::new((day_number(*d), *kg), 5, HIGHLIGHT_COLOR.filled())),
    )?;

    let rotated = ("sans-serif", 13).into_font().transform(FontTransform::Rotate270);
    chart.draw_series(opts.annotations.iter().map(|a| {
        Text::new(a.label.clone(), (day_number(a.date), a.kg), rotated.clone())
    }))?;

    root.present()?;
    Ok(())
}

/// Pie chart of each group's share. Nothing is written when the total is zero.
pub fn render_share_pie(path: &Path, title: &str, shares: &[GroupShare]) -> Result<(), ReportError> {
    let shares: Vec<&GroupShare> = shares.iter().filter(|s| s.kg > 0.0).collect();
    if shares.is_empty() {
        warn!(path = %path.display(), "no quantities to share, chart skipped");
        return Ok(());
    }
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    draw_share_pie(root, title, &shares).map_err(|e| chart_err(path, e))?;
    info!(path = %path.display(), "chart written");
    Ok(())
}

fn draw_share_pie<DB>(
    root: DrawingArea<DB, Shift>,
    title: &str,
    shares: &[&GroupShare],
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let root = root.titled(title, ("sans-serif", 18))?;

    let (w, h) = root.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.33;
    let sizes: Vec<f64> = shares.iter().map(|s| s.kg).collect();
    let labels: Vec<&str> = shares.iter().map(|s| s.group.as_str()).collect();
    let colors: Vec<RGBColor> = (0..shares.len()).map(|i| SLICE_COLORS[i % SLICE_COLORS.len()]).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 12).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 12).into_font().color(&WHITE));
    root.draw(&pie)?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("{}_{}", std::process::id(), name))
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_axis_round_trips_to_calendar_labels() {
        assert_eq!(day_label(&day_number(d(2019, 1, 17))), "17/01/2019");
    }

    #[test]
    fn time_series_chart_is_written() {
        let path = temp_path("recicla_chart_line.svg");
        let _ = fs::remove_file(&path);
        let series = vec![(d(2019, 1, 10), 120.0), (d(2019, 1, 17), 301.0), (d(2019, 2, 15), 62.0)];
        let events = vec![Annotation { date: d(2019, 1, 17), kg: 301.0, label: "Festival".to_string() }];
        let opts = TimeChart {
            title: "Puntos Verdes",
            y_desc: "kg",
            annotations: &events,
            highlights: &series[1..2],
        };
        render_time_series(&path, &series, &opts).unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Festival"));
    }

    #[test]
    fn empty_inputs_write_nothing() {
        let line = temp_path("recicla_chart_empty_line.svg");
        let pie = temp_path("recicla_chart_empty_pie.svg");
        let _ = fs::remove_file(&line);
        let _ = fs::remove_file(&pie);
        let opts = TimeChart { title: "x", y_desc: "kg", annotations: &[], highlights: &[] };
        render_time_series(&line, &[], &opts).unwrap();
        render_share_pie(&pie, "x", &[]).unwrap();
        assert!(!line.exists());
        assert!(!pie.exists());
    }

    #[test]
    fn pie_chart_is_written() {
        let path = temp_path("recicla_chart_pie.svg");
        let _ = fs::remove_file(&path);
        let shares = vec![
            GroupShare { group: "Norte".to_string(), kg: 30.0, share_pct: 75.0 },
            GroupShare { group: "Sur".to_string(), kg: 10.0, share_pct: 25.0 },
        ];
        render_share_pie(&path, "Zonas", &shares).unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(svg.contains("Norte"));
    }
}
