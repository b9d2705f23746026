//! GeoJSONジオメトリの外接矩形
//!
//! 地図のビューポートを合わせるためだけに使う。座標は GeoJSON の
//! `[経度, 緯度]` 順。

use serde::Serialize;

/// 外接矩形（度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    fn point(lat: f64, lng: f64) -> Self {
        Self { south: lat, west: lng, north: lat, east: lng }
    }

    fn extend(&mut self, lat: f64, lng: f64) {
        self.south = self.south.min(lat);
        self.north = self.north.max(lat);
        self.west = self.west.min(lng);
        self.east = self.east.max(lng);
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    /// `[[south, west], [north, east]]`（Leafletの LatLngBounds 形式）
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }

    /// ジオメトリ（Feature / FeatureCollection / GeometryCollection も可）の外接矩形
    ///
    /// 有効な座標が1つもなければ None
    pub fn of_geometry(geometry: &serde_json::Value) -> Option<Self> {
        let mut bounds = None;
        collect(geometry, &mut bounds);
        bounds
    }
}

fn collect(value: &serde_json::Value, bounds: &mut Option<Bounds>) {
    let Some(object) = value.as_object() else {
        return;
    };

    match object.get("type").and_then(|t| t.as_str()) {
        Some("Feature") => {
            if let Some(geometry) = object.get("geometry") {
                collect(geometry, bounds);
            }
        }
        Some("FeatureCollection") => {
            for feature in object.get("features").and_then(|f| f.as_array()).into_iter().flatten() {
                collect(feature, bounds);
            }
        }
        Some("GeometryCollection") => {
            for geometry in object.get("geometries").and_then(|g| g.as_array()).into_iter().flatten() {
                collect(geometry, bounds);
            }
        }
        _ => {
            if let Some(coordinates) = object.get("coordinates") {
                walk_coordinates(coordinates, bounds);
            }
        }
    }
}

fn walk_coordinates(value: &serde_json::Value, bounds: &mut Option<Bounds>) {
    let Some(items) = value.as_array() else {
        return;
    };

    // 位置: [lng, lat, (alt)]
    if let (Some(lng), Some(lat)) = (
        items.first().and_then(|v| v.as_f64()),
        items.get(1).and_then(|v| v.as_f64()),
    ) {
        match bounds {
            Some(b) => b.extend(lat, lng),
            None => *bounds = Some(Bounds::point(lat, lng)),
        }
        return;
    }

    for item in items {
        walk_coordinates(item, bounds);
    }
}
