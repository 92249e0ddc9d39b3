// src/render/map.rs
use crate::models::GeoPoint;

const DEFAULT_ZOOM: u8 = 12;

/// Emits the Leaflet map fragment in one shot, after every marker is known.
/// Popup labels go through a JSON string literal so arbitrary place names
/// cannot break out of the script block.
pub fn leaflet_map(center: GeoPoint, markers: &[(GeoPoint, String)]) -> String {
    let mut script = format!(
        "var mapa = L.map('mapa').setView([{}, {}], {});\n\
         L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{\n\
             attribution: '&copy; OpenStreetMap contributors'\n\
         }}).addTo(mapa);\n",
        center.latitude, center.longitude, DEFAULT_ZOOM
    );

    for (point, label) in markers {
        // JSON escaping plus < so a literal </script> in a place name
        // cannot terminate the script block early
        let popup = serde_json::to_string(label)
            .unwrap_or_else(|_| "\"\"".to_string())
            .replace('<', "\\u003c");
        script.push_str(&format!(
            "L.marker([{}, {}]).addTo(mapa).bindPopup({});\n",
            point.latitude, point.longitude, popup
        ));
    }

    format!(
        "<div id=\"mapa\"></div>\n<script>\n{}</script>\n",
        script
    )
}
