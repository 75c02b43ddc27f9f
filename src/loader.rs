use crate::error::ReportError;
use crate::types::{CollectionLog, CollectionRecord, GeoPoint, LoadReport, RawCollectionRow, RawGeoRow};
use crate::util::{parse_date_safe, parse_f64_strict};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, info, warn};

const KG_COLUMN: &str = "kg_residuos_secos_reciclables";

/// Load a collection log (drop-off points or door-to-door zones).
///
/// Rows whose date does not match `date_format` are kept with `date = None`.
/// A quantity cell that is present but not numeric aborts the load.
pub fn load_collection_log(
    path: &Path,
    name: &str,
    date_format: &str,
) -> Result<CollectionLog, ReportError> {
    let csv_err = |source: csv::Error| ReportError::Csv { path: path.to_path_buf(), source };
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let mut report = LoadReport::default();
    let mut records = Vec::new();

    for (idx, result) in rdr.deserialize::<RawCollectionRow>().enumerate() {
        let raw = result.map_err(csv_err)?;
        let row = idx + 1;
        report.total_rows += 1;

        let kg = parse_f64_strict(raw.kg.as_deref()).map_err(|_| ReportError::InvalidNumber {
            path: path.to_path_buf(),
            row,
            column: KG_COLUMN,
            value: raw.kg.clone().unwrap_or_default(),
        })?;
        if kg.is_none() {
            report.missing_kg += 1;
        }

        let date = parse_date_safe(raw.date.as_deref(), date_format);
        if date.is_none() {
            report.undated_rows += 1;
            debug!(row, value = ?raw.date, "unparsable date");
        }

        records.push(CollectionRecord {
            row,
            date,
            site: raw.site.unwrap_or_default().trim().to_string(),
            kg,
        });
    }

    if report.undated_rows > 0 {
        warn!(
            dataset = name,
            rows = report.undated_rows,
            "rows with unparsable dates dropped from date-based views"
        );
    }
    info!(
        dataset = name,
        rows = report.total_rows,
        missing_kg = report.missing_kg,
        path = %path.display(),
        "collection log loaded"
    );

    Ok(CollectionLog { name: name.to_string(), records, report })
}

/// Load the drop-off point coordinates (`lat`, `lng`, `ubicacion`).
pub fn load_geo_points(path: &Path) -> Result<Vec<GeoPoint>, ReportError> {
    let csv_err = |source: csv::Error| ReportError::Csv { path: path.to_path_buf(), source };
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path).map_err(csv_err)?;

    let mut points = Vec::new();
    for (idx, result) in rdr.deserialize::<RawGeoRow>().enumerate() {
        let raw = result.map_err(csv_err)?;
        let row = idx + 1;
        let coord = |value: Option<&str>, column: &'static str| {
            match parse_f64_strict(value) {
                Ok(Some(v)) => Ok(v),
                _ => Err(ReportError::InvalidNumber {
                    path: path.to_path_buf(),
                    row,
                    column,
                    value: value.unwrap_or_default().to_string(),
                }),
            }
        };
        let lat = coord(raw.lat.as_deref(), "lat")?;
        let lng = coord(raw.lng.as_deref(), "lng")?;
        points.push(GeoPoint {
            lat,
            lng,
            label: raw.label.unwrap_or_default().trim().to_string(),
        });
    }

    info!(points = points.len(), path = %path.display(), "geo points loaded");
    Ok(points)
}
