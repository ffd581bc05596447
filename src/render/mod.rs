use crate::domain::model::Location;
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub popup: String,
}

/// In-memory map artifact: built once per run, serialized to a single
/// self-contained HTML page, then discarded.
#[derive(Debug, Clone)]
pub struct MapDocument {
    center: Location,
    zoom: u8,
    markers: Vec<Marker>,
}

// Markers are injected as a JSON array so popup text needs no ad-hoc
// escaping. The center is interpolated textually: an empty table produces a
// NaN/NaN center and serde_json refuses non-finite numbers.
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>GDP per Capita</title>
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"/>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView([{center}], {zoom});
L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
    maxZoom: 19,
    attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);
var markers = {markers};
markers.forEach(function (m) {
    L.marker([m.latitude, m.longitude]).bindPopup(m.popup).addTo(map);
});
</script>
</body>
</html>
"#;

impl MapDocument {
    pub fn new(center: Location, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            markers: Vec::new(),
        }
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn to_html(&self) -> Result<String> {
        let markers_json = serde_json::to_string(&self.markers)?;
        Ok(PAGE_TEMPLATE
            .replace(
                "{center}",
                &format!("{}, {}", self.center.latitude, self.center.longitude),
            )
            .replace("{zoom}", &self.zoom.to_string())
            .replace("{markers}", &markers_json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(latitude: f64, longitude: f64) -> Location {
        Location {
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_html_contains_center_and_zoom() {
        let doc = MapDocument::new(center(46.6, 2.2), 3);
        let html = doc.to_html().unwrap();

        assert!(html.contains("setView([46.6, 2.2], 3)"));
        assert!(html.contains("leaflet@1.9.4/dist/leaflet.js"));
    }

    #[test]
    fn test_one_marker_per_add() {
        let mut doc = MapDocument::new(center(0.0, 0.0), 3);
        doc.add_marker(Marker {
            latitude: 46.6,
            longitude: 2.2,
            popup: "France - GDP per Capita: 42000".to_string(),
        });
        doc.add_marker(Marker {
            latitude: 36.5,
            longitude: 139.2,
            popup: "Japan - GDP per Capita: 34000".to_string(),
        });

        assert_eq!(doc.marker_count(), 2);

        let html = doc.to_html().unwrap();
        assert!(html.contains("France - GDP per Capita: 42000"));
        assert!(html.contains("Japan - GDP per Capita: 34000"));
        assert_eq!(html.matches("\"latitude\":").count(), 2);
    }

    #[test]
    fn test_popup_text_is_json_escaped() {
        let mut doc = MapDocument::new(center(7.9, -5.5), 3);
        doc.add_marker(Marker {
            latitude: 7.9,
            longitude: -5.5,
            popup: "C\u{f4}te d'Ivoire - GDP per Capita: 2486".to_string(),
        });

        let html = doc.to_html().unwrap();
        // The apostrophe sits inside a JSON double-quoted string, so the
        // embedded array stays parseable.
        assert!(html.contains("C\u{f4}te d'Ivoire"));
        let embedded = html
            .split("var markers = ")
            .nth(1)
            .unwrap()
            .split(";\n")
            .next()
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(embedded).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_document_renders_nan_center() {
        let doc = MapDocument::new(center(f64::NAN, f64::NAN), 3);
        let html = doc.to_html().unwrap();

        assert!(html.contains("setView([NaN, NaN], 3)"));
        assert!(html.contains("var markers = []"));
    }
}
