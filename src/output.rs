use crate::error::ReportError;
use crate::geo::DistanceMatrix;
use crate::types::{CollectionSummary, GeoPoint};
use crate::util::{format_int, format_number};
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ReportError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).map_err(|source| ReportError::Io { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), "summary written");
    Ok(())
}

/// Distance matrix as CSV: a `ubicacion` column followed by one column per point.
pub fn write_distance_matrix(
    path: &Path,
    points: &[GeoPoint],
    matrix: &DistanceMatrix,
) -> Result<(), ReportError> {
    let csv_err = |source: csv::Error| ReportError::Csv { path: path.to_path_buf(), source };
    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    let mut header = vec!["ubicacion".to_string()];
    header.extend(points.iter().map(|p| p.label.clone()));
    wtr.write_record(&header).map_err(csv_err)?;
    for (i, p) in points.iter().enumerate() {
        let mut record = vec![p.label.clone()];
        record.extend(matrix.row(i).iter().map(|d| format!("{:.3}", d)));
        wtr.write_record(&record).map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| ReportError::Io { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), "distance matrix written");
    Ok(())
}

pub fn print_mean_distance(mean_km: f64) {
    println!("Distancia promedio entre Puntos Verdes: {:.2} Km.", mean_km);
}

pub fn print_collection_summary(title: &str, summary: &CollectionSummary) {
    let date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())
    };
    println!("\n{}", title);
    println!("Total de material reciclable recolectado: {} kg", format_number(summary.total_kg, 2));
    println!("Desde: {}", date(summary.first_date));
    println!("Hasta: {}", date(summary.last_date));
    match summary.span_days {
        Some(days) => println!("Rango: {} días", format_int(days)),
        None => println!("Rango: -"),
    }
    if summary.dropped_rows > 0 {
        println!("({} filas sin fecha o cantidad válida excluidas)", format_int(summary.dropped_rows));
    }
}

pub fn preview_table<T>(title: &str, rows: &[T])
where
    T: Tabled + Clone,
{
    println!("\n{}\n", title);
    if rows.is_empty() {
        println!("(sin filas)\n");
        return;
    }
    let table_str = Table::new(rows.to_vec()).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}
