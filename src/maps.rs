//! Standalone Leaflet pages for the drop-off points: one marker per point,
//! and a density heatmap.

use crate::config::MapView;
use crate::error::ReportError;
use crate::types::GeoPoint;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_HEAT_JS: &str = "https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// JSON safe to inline inside a `<script>` block.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ReportError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn page(title: &str, view: &MapView, extra_head: &str, body_script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<link rel="stylesheet" href="{css}">
<script src="{js}"></script>
{extra_head}<style>html, body, #map {{ width: 100%; height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const map = L.map("map", {{ zoomSnap: 0.5 }}).setView([{lat}, {lng}], {zoom});
L.tileLayer("{tiles}", {{ maxZoom: 19, attribution: "{attribution}" }}).addTo(map);
{body_script}
</script>
</body>
</html>
"#,
        title = title,
        css = LEAFLET_CSS,
        js = LEAFLET_JS,
        extra_head = extra_head,
        lat = view.center.0,
        lng = view.center.1,
        zoom = view.zoom,
        tiles = TILE_URL,
        attribution = TILE_ATTRIBUTION,
        body_script = body_script,
    )
}

/// Map with one marker per point; the popup shows the point's label.
pub fn marker_map_html(points: &[GeoPoint], view: &MapView) -> Result<String, ReportError> {
    // Popups get a text node so labels are never interpreted as markup.
    let script = format!(
        r#"const points = {markers};
for (const p of points) {{
  const popup = document.createElement("span");
  popup.textContent = p.label;
  L.marker([p.lat, p.lng]).bindPopup(popup).addTo(map);
}}"#,
        markers = script_json(points)?,
    );
    Ok(page("Puntos Verdes", view, "", &script))
}

/// Density heatmap over all points with the given radius in pixels.
pub fn heatmap_html(points: &[GeoPoint], view: &MapView, radius: u32) -> Result<String, ReportError> {
    let heat: Vec<[f64; 2]> = points.iter().map(|p| [p.lat, p.lng]).collect();
    let script = format!(
        "L.heatLayer({heat}, {{ radius: {radius} }}).addTo(map);",
        heat = script_json(&heat)?,
        radius = radius,
    );
    let head = format!("<script src=\"{}\"></script>\n", LEAFLET_HEAT_JS);
    Ok(page("Densidad de Puntos Verdes", view, &head, &script))
}

pub fn write_html(path: &Path, html: &str) -> Result<(), ReportError> {
    fs::write(path, html).map_err(|source| ReportError::Io { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), "map written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> MapView {
        MapView { center: (-27.5, -58.8), zoom: 12.5 }
    }

    fn points() -> Vec<GeoPoint> {
        vec![
            GeoPoint { lat: -27.4692, lng: -58.8306, label: "Plaza 25 de Mayo".to_string() },
            GeoPoint { lat: -27.48, lng: -58.81, label: "Costanera </script>".to_string() },
        ]
    }

    #[test]
    fn marker_map_embeds_every_point() {
        let html = marker_map_html(&points(), &view()).unwrap();
        assert!(html.contains("setView([-27.5, -58.8], 12.5)"));
        assert!(html.contains("\"label\":\"Plaza 25 de Mayo\""));
        assert!(html.contains("-27.4692"));
        assert!(html.contains("L.marker"));
        // label text must not close the script block
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn heatmap_uses_radius_and_plugin() {
        let html = heatmap_html(&points(), &view(), 100).unwrap();
        assert!(html.contains("leaflet-heat.js"));
        assert!(html.contains("{ radius: 100 }"));
        assert!(html.contains("[[-27.4692,-58.8306],[-27.48,-58.81]]"));
    }

    #[test]
    fn empty_point_set_still_renders_a_map() {
        let html = heatmap_html(&[], &view(), 100).unwrap();
        assert!(html.contains("L.heatLayer([]"));
    }
}
