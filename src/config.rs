use crate::util::DATE_FORMAT;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Where the Leaflet maps open.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: f64,
}

/// Event label drawn on a time-series chart at a given date and height.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub date: NaiveDate,
    pub kg: f64,
    pub label: String,
}

/// All inputs, outputs and literal constants of one run.
///
/// `Default` reproduces the fixed layout: every file in the working
/// directory, maps centred on Corrientes.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub drop_off_csv: String,
    pub geo_csv: String,
    pub zones_csv: String,
    pub date_format: String,
    pub map_view: MapView,
    pub heatmap_radius: u32,
    pub top_n: usize,
    pub excluded_zones: Vec<String>,
    pub drop_off_events: Vec<Annotation>,
    pub render_charts: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            out_dir: PathBuf::from("."),
            drop_off_csv: "recoleccion_puntos_verdes.csv".to_string(),
            geo_csv: "puntos_verdes_geo.csv".to_string(),
            zones_csv: "recoleccion_puntos_verdes_ruleros.csv".to_string(),
            date_format: DATE_FORMAT.to_string(),
            map_view: MapView { center: (-27.5, -58.8), zoom: 12.5 },
            heatmap_radius: 100,
            top_n: 5,
            excluded_zones: vec!["Delegacion San Gerónimo".to_string()],
            drop_off_events: default_events(),
            render_charts: true,
        }
    }
}

fn default_events() -> Vec<Annotation> {
    [
        ((2019, 1, 17), 301.0, "Festival del Chamamé 2019"),
        ((2019, 12, 30), 461.0, "Festival del Chamamé 2020"),
        ((2019, 2, 15), 62.0, "Corsos"),
    ]
    .into_iter()
    .filter_map(|((y, m, d), kg, label)| {
        Some(Annotation { date: NaiveDate::from_ymd_opt(y, m, d)?, kg, label: label.to_string() })
    })
    .collect()
}

impl AnalysisConfig {
    pub fn input(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    pub fn output(&self, file: &str) -> PathBuf {
        self.out_dir.join(file)
    }

    pub fn with_dirs(mut self, data_dir: &Path, out_dir: &Path) -> Self {
        self.data_dir = data_dir.to_path_buf();
        self.out_dir = out_dir.to_path_buf();
        self
    }
}
