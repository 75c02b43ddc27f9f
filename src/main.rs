// Entry point: runs the report stages in order.
//
// 1. Drop-off log: charts of quantity over time and share per site.
// 2. Drop-off coordinates: marker map, heatmap, pairwise distances.
// 3. Drop-off totals and date range.
// 4. Zone program log: chart with top days highlighted, share per zone,
//    top rows, totals and date range.
// 5. JSON summary of everything printed.
use anyhow::{Context, Result};
use clap::Parser;
use recicla_report::charts::{self, TimeChart};
use recicla_report::config::AnalysisConfig;
use recicla_report::geo::DistanceMatrix;
use recicla_report::types::{CollectionLog, CollectionSummary, GeoPoint, RunSummary, TopRow};
use recicla_report::{loader, maps, output, reports};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recicla_report")]
#[command(about = "Recyclable-waste collection report for Puntos Verdes and the zone program", long_about = None)]
struct Cli {
    /// Directory holding the three input CSV files
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Directory where maps, charts and the summary are written
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Skip chart rendering
    #[arg(long, default_value_t = false)]
    no_charts: bool,
}

/// Drop-off log: load it and draw figures 1 and 2.
fn handle_drop_off(config: &AnalysisConfig) -> Result<CollectionLog> {
    let path = config.input(&config.drop_off_csv);
    let log = loader::load_collection_log(&path, "puntos verdes", &config.date_format)
        .with_context(|| format!("loading drop-off log {}", path.display()))?;

    if config.render_charts {
        let series = reports::time_series(&log.records);
        charts::render_time_series(
            &config.output("fig1_puntos_verdes_tiempo.svg"),
            &series,
            &TimeChart {
                title: "Evolución en el tiempo del material reciclable recolectado de Puntos Verdes",
                y_desc: "Material seco reciclable (kg)",
                annotations: &config.drop_off_events,
                highlights: &[],
            },
        )?;
        let shares = reports::share_by_site(&log.records, &[]);
        charts::render_share_pie(
            &config.output("fig2_puntos_verdes_torta.svg"),
            "Cantidad de material reciclable por Punto Verde",
            &shares,
        )?;
    }
    Ok(log)
}

/// Drop-off coordinates: both maps, the distance matrix and its mean.
fn handle_geo_points(config: &AnalysisConfig) -> Result<(Vec<GeoPoint>, f64)> {
    let path = config.input(&config.geo_csv);
    let points = loader::load_geo_points(&path)
        .with_context(|| format!("loading drop-off coordinates {}", path.display()))?;

    let markers = maps::marker_map_html(&points, &config.map_view)?;
    maps::write_html(&config.output("mapa_puntos_verdes.html"), &markers)?;
    let heat = maps::heatmap_html(&points, &config.map_view, config.heatmap_radius)?;
    maps::write_html(&config.output("densidad_puntos_verdes.html"), &heat)?;

    let matrix = DistanceMatrix::from_points(&points);
    output::write_distance_matrix(&config.output("distancias_puntos_verdes.csv"), &points, &matrix)?;
    let mean = matrix.mean_distance();
    info!(points = points.len(), pairs = matrix.pair_count(), "distances computed");
    output::print_mean_distance(mean);
    Ok((points, mean))
}

/// Zone program log: figures 3 and 4, top rows and totals.
fn handle_zones(config: &AnalysisConfig) -> Result<(CollectionSummary, Vec<TopRow>)> {
    let path = config.input(&config.zones_csv);
    let log = loader::load_collection_log(&path, "ruleros", &config.date_format)
        .with_context(|| format!("loading zone program log {}", path.display()))?;

    let top = reports::top_n(&log.records, config.top_n);
    let top_rows = reports::top_rows(&top);
    let shares = reports::dated_share_by_site(&log.records, &config.excluded_zones);

    if config.render_charts {
        let highlights: Vec<_> = top.iter().filter_map(|r| r.dated_kg()).collect();
        charts::render_time_series(
            &config.output("fig3_ruleros_tiempo.svg"),
            &reports::time_series(&log.records),
            &TimeChart {
                title: "Material reciclable recolectado por el programa Reciclando Juntos",
                y_desc: "Residuos secos reciclables (kg)",
                annotations: &[],
                highlights: &highlights,
            },
        )?;
        charts::render_share_pie(
            &config.output("fig4_ruleros_zonas.svg"),
            "Cantidad de material reciclable recolectado por zona",
            &shares,
        )?;
    }

    output::preview_table("Fechas y zonas con mayor recolección:", &top_rows);
    output::preview_table("Participación por zona:", &reports::share_rows(&shares));

    let summary = reports::summarize(&log);
    output::print_collection_summary("Recolección del programa Reciclando Juntos", &summary);
    Ok((summary, top_rows))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AnalysisConfig::default().with_dirs(&cli.data_dir, &cli.out_dir);
    config.render_charts = !cli.no_charts;
    std::fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("creating output directory {}", config.out_dir.display()))?;

    let drop_off_log = handle_drop_off(&config)?;
    let (points, mean_distance_km) = handle_geo_points(&config)?;

    let drop_off = reports::summarize(&drop_off_log);
    output::print_collection_summary("Recolección desde Puntos Verdes", &drop_off);
    output::preview_table(
        "Participación por Punto Verde:",
        &reports::share_rows(&reports::share_by_site(&drop_off_log.records, &[])),
    );

    let (zones, zone_top) = handle_zones(&config)?;

    let summary = RunSummary { geo_points: points.len(), mean_distance_km, drop_off, zones, zone_top };
    output::write_json(&config.output("resumen.json"), &summary)?;
    info!("report complete");
    Ok(())
}
