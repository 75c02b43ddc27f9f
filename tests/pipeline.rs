use recicla_report::config::AnalysisConfig;
use recicla_report::geo::{haversine_km, DistanceMatrix};
use recicla_report::{loader, reports};
use std::path::Path;

fn fixtures_config() -> AnalysisConfig {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    AnalysisConfig::default().with_dirs(&dir, &std::env::temp_dir())
}

#[test]
fn drop_off_log_summary() {
    let config = fixtures_config();
    let log = loader::load_collection_log(
        &config.input(&config.drop_off_csv),
        "puntos verdes",
        &config.date_format,
    )
    .expect("Failed to load drop-off log");

    assert_eq!(log.report.total_rows, 6);
    assert_eq!(log.report.undated_rows, 1);

    let summary = reports::summarize(&log);
    assert!((summary.total_kg - 1029.5).abs() < 1e-9);
    assert_eq!(summary.first_date.unwrap().to_string(), "2019-01-10");
    assert_eq!(summary.last_date.unwrap().to_string(), "2019-12-30");
    assert_eq!(summary.span_days, Some(354));
    assert_eq!(summary.dropped_rows, 1);

    // the undated Costanera row still counts toward its site's share
    let shares = reports::share_by_site(&log.records, &[]);
    let costanera = shares.iter().find(|s| s.group == "Costanera").unwrap();
    assert!((costanera.kg - 125.5).abs() < 1e-9);
}

#[test]
fn zone_log_top_rows_and_exclusions() {
    let config = fixtures_config();
    let log = loader::load_collection_log(
        &config.input(&config.zones_csv),
        "ruleros",
        &config.date_format,
    )
    .expect("Failed to load zone log");

    let top = reports::top_rows(&reports::top_n(&log.records, config.top_n));
    let sites: Vec<&str> = top.iter().map(|r| r.site.as_str()).collect();
    assert_eq!(sites, vec!["Barrio Norte", "Barrio Sur", "Barrio Norte", "Barrio Sur", "Barrio Este"]);
    assert_eq!(top[0].date, "2020-03-09");
    assert_eq!(top[1].date, "2020-03-23");

    let shares = reports::dated_share_by_site(&log.records, &config.excluded_zones);
    assert!(shares.iter().all(|s| s.group != "Delegacion San Gerónimo"));

    // the undated 999 kg Barrio Norte row stays out of the zone shares
    let norte = shares.iter().find(|s| s.group == "Barrio Norte").unwrap();
    assert!((norte.kg - 140.0).abs() < 1e-9);
    assert!((norte.share_pct - 140.0 / 285.0 * 100.0).abs() < 1e-9);
    let total: f64 = shares.iter().map(|s| s.share_pct).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn mean_distance_over_fixture_points() {
    let config = fixtures_config();
    let points = loader::load_geo_points(&config.input(&config.geo_csv)).expect("Failed to load points");
    let matrix = DistanceMatrix::from_points(&points);

    let expected = (haversine_km(points[0].lat, points[0].lng, points[1].lat, points[1].lng)
        + haversine_km(points[0].lat, points[0].lng, points[2].lat, points[2].lng)
        + haversine_km(points[1].lat, points[1].lng, points[2].lat, points[2].lng))
        / 3.0;
    assert!((matrix.mean_distance() - expected).abs() < 1e-9);
    assert!((matrix.get(0, 1) - 9.863).abs() < 0.01);
}
