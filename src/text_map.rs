//! 端末向け MapSurface
//!
//! 地図は描けないので、描いた内容を覚えておき要約とOpenStreetMapへのリンクを出す。

use school_search_common::map::DEFAULT_ZOOM;
use school_search_common::{Bounds, LatLng, MapSurface, MarkerPopup, PolygonStyle, Result};

#[derive(Debug, Clone, PartialEq)]
struct Marker {
    at: LatLng,
    popup: MarkerPopup,
}

#[derive(Debug, Default)]
pub struct TextMapSurface {
    initialized: bool,
    marker: Option<Marker>,
    buffer: Option<Bounds>,
    /// 表示中心とズーム
    view: Option<(LatLng, u8)>,
}

impl TextMapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// マーカーとバッファの数
    pub fn overlay_count(&self) -> usize {
        usize::from(self.marker.is_some()) + usize::from(self.buffer.is_some())
    }

    pub fn buffer(&self) -> Option<Bounds> {
        self.buffer
    }

    pub fn center(&self) -> Option<(LatLng, u8)> {
        self.view
    }

    /// 描画内容の要約（空なら空のVec）
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(marker) = &self.marker {
            let label = match &marker.popup.subtitle {
                Some(sub) => format!("{} - {}", marker.popup.title, sub),
                None => marker.popup.title.clone(),
            };
            lines.push(format!(
                "  Location: {:.5}, {:.5} ({})",
                marker.at.lat, marker.at.lng, label
            ));
        }

        if let Some(b) = &self.buffer {
            lines.push(format!(
                "  5km Zone: S {:.5} W {:.5} N {:.5} E {:.5}",
                b.south, b.west, b.north, b.east
            ));
        }

        if let Some((at, zoom)) = self.view {
            lines.push(format!("  OpenStreetMap: {}", osm_link(at, zoom)));
        }

        lines
    }
}

/// OpenStreetMapの表示URL
pub fn osm_link(at: LatLng, zoom: u8) -> String {
    format!(
        "https://www.openstreetmap.org/?mlat={lat:.5}&mlon={lng:.5}#map={zoom}/{lat:.5}/{lng:.5}",
        lat = at.lat,
        lng = at.lng,
        zoom = zoom
    )
}

impl MapSurface for TextMapSurface {
    fn ensure_initialized(&mut self) -> Result<()> {
        self.initialized = true;
        Ok(())
    }

    fn clear_overlays(&mut self) -> Result<()> {
        self.marker = None;
        self.buffer = None;
        Ok(())
    }

    fn draw_point(&mut self, at: LatLng, popup: &MarkerPopup) -> Result<()> {
        self.marker = Some(Marker { at, popup: popup.clone() });
        Ok(())
    }

    fn draw_polygon_and_fit(
        &mut self,
        _geometry: &serde_json::Value,
        _style: &PolygonStyle,
        bounds: Bounds,
        _padding_px: u32,
    ) -> Result<()> {
        let (lat, lng) = bounds.center();
        self.buffer = Some(bounds);
        // 5km圏がおおよそ収まる縮尺
        self.view = Some((LatLng { lat, lng }, DEFAULT_ZOOM - 1));
        Ok(())
    }

    fn center_on(&mut self, at: LatLng, zoom: u8) -> Result<()> {
        self.view = Some((at, zoom));
        Ok(())
    }
}
