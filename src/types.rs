use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One line of a collection log as it sits in the CSV.
///
/// Both logs share the date and quantity columns; the drop-off log names
/// the site in `punto_verde`, the door-to-door log names it in `zona`.
#[derive(Debug, Deserialize)]
pub struct RawCollectionRow {
    #[serde(rename = "fecha")]
    pub date: Option<String>,
    #[serde(alias = "punto_verde", alias = "zona")]
    pub site: Option<String>,
    #[serde(rename = "kg_residuos_secos_reciclables")]
    pub kg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawGeoRow {
    pub lat: Option<String>,
    pub lng: Option<String>,
    #[serde(rename = "ubicacion")]
    pub label: Option<String>,
}

/// A collection log entry after cleaning.
///
/// `date` is `None` when the source cell could not be parsed; such records
/// stay in the log but are skipped by every date-dependent view.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionRecord {
    /// 1-based position of the row in the source file, used for stable ordering.
    pub row: usize,
    pub date: Option<NaiveDate>,
    pub site: String,
    pub kg: Option<f64>,
}

impl CollectionRecord {
    /// Date and quantity, if both are present.
    pub fn dated_kg(&self) -> Option<(NaiveDate, f64)> {
        Some((self.date?, self.kg?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
}

/// Records of one collection log plus what happened while loading it.
#[derive(Debug, Clone)]
pub struct CollectionLog {
    pub name: String,
    pub records: Vec<CollectionRecord>,
    pub report: LoadReport,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub undated_rows: usize,
    pub missing_kg: usize,
}

/// Totals and date range of one collection log, over dated records only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSummary {
    pub dataset: String,
    pub total_kg: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub span_days: Option<i64>,
    pub dated_rows: usize,
    pub dropped_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupShare {
    pub group: String,
    pub kg: f64,
    pub share_pct: f64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TopRow {
    #[serde(rename = "fecha")]
    #[tabled(rename = "Fecha")]
    pub date: String,
    #[serde(rename = "sitio")]
    #[tabled(rename = "Sitio")]
    pub site: String,
    #[serde(rename = "kg")]
    #[tabled(rename = "Kg")]
    pub kg: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ShareRow {
    #[serde(rename = "grupo")]
    #[tabled(rename = "Grupo")]
    pub group: String,
    #[serde(rename = "kg")]
    #[tabled(rename = "Kg")]
    pub kg: String,
    #[serde(rename = "porcentaje")]
    #[tabled(rename = "%")]
    pub share_pct: String,
}

/// Everything written to the JSON summary at the end of a run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub geo_points: usize,
    pub mean_distance_km: f64,
    pub drop_off: CollectionSummary,
    pub zones: CollectionSummary,
    pub zone_top: Vec<TopRow>,
}
