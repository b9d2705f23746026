//! 地図描画
//!
//! 地図ライブラリ依存部分は [`MapSurface`] に閉じ込め、ここでは
//! 「何を描くか」「ビューポートをどう合わせるか」だけを決める。

use serde::Serialize;

use crate::error::Result;
use crate::geometry::Bounds;
use crate::types::SchoolDetail;

/// 座標のみの場合のズームレベル
pub const DEFAULT_ZOOM: u8 = 13;

/// バッファにビューポートを合わせるときの余白(px)
pub const FIT_PADDING_PX: u32 = 20;

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// ポリゴンのスタイル（Leafletの Path オプションと同じキー）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    pub color: &'static str,
    pub weight: u32,
    pub opacity: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
}

/// 5km圏バッファのスタイル
pub const BUFFER_STYLE: PolygonStyle = PolygonStyle {
    color: "#3b82f6",
    weight: 2,
    opacity: 0.8,
    fill_color: "#3b82f6",
    fill_opacity: 0.1,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// マーカーのポップアップ内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerPopup {
    pub title: String,
    pub subtitle: Option<String>,
}

/// 描画するバッファ（外接矩形が取れたものだけ）
#[derive(Debug, Clone, PartialEq)]
pub struct BufferZone {
    pub geometry: serde_json::Value,
    pub bounds: Bounds,
}

/// 1回分の地図描画内容
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub point: Option<LatLng>,
    pub popup: MarkerPopup,
    pub buffer: Option<BufferZone>,
}

impl MapView {
    /// 座標のないジオメトリは描画しない
    pub fn from_detail(detail: &SchoolDetail) -> Self {
        let buffer = detail.geom_5km_buffer.as_ref().and_then(|geometry| {
            Bounds::of_geometry(geometry).map(|bounds| BufferZone {
                geometry: geometry.clone(),
                bounds,
            })
        });

        Self {
            point: detail.coordinates().map(|(lat, lng)| LatLng { lat, lng }),
            popup: MarkerPopup {
                title: detail.school_name.clone(),
                subtitle: detail.school_sector.clone(),
            },
            buffer,
        }
    }
}

/// 描画後のビューポート
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    /// バッファの外接矩形に合わせた
    Fitted(Bounds),
    /// 地点を中心にした
    Centered { at: LatLng, zoom: u8 },
    /// 何も描くものがなかった
    Unchanged,
}

/// 地図ウィジェットの抽象
///
/// ベースのタイルレイヤーは `ensure_initialized` で一度だけ追加し、
/// `clear_overlays` では消さないこと。
pub trait MapSurface {
    /// 初回のみ地図を生成する（2回目以降は何もしない）
    fn ensure_initialized(&mut self) -> Result<()>;

    /// マーカーとポリゴンをすべて取り除く
    fn clear_overlays(&mut self) -> Result<()>;

    fn draw_point(&mut self, at: LatLng, popup: &MarkerPopup) -> Result<()>;

    fn draw_polygon_and_fit(
        &mut self,
        geometry: &serde_json::Value,
        style: &PolygonStyle,
        bounds: Bounds,
        padding_px: u32,
    ) -> Result<()>;

    fn center_on(&mut self, at: LatLng, zoom: u8) -> Result<()>;
}

/// 地図を描き直す
///
/// 前回のオーバーレイを消してから、マーカー → バッファの順に描く。
/// バッファがあればその外接矩形に、なければ地点にビューポートを合わせる。
pub fn render_map<S>(surface: &mut S, view: &MapView) -> Result<Viewport>
where
    S: MapSurface + ?Sized,
{
    surface.ensure_initialized()?;
    surface.clear_overlays()?;

    if let Some(point) = view.point {
        surface.draw_point(point, &view.popup)?;
    }

    if let Some(buffer) = &view.buffer {
        surface.draw_polygon_and_fit(&buffer.geometry, &BUFFER_STYLE, buffer.bounds, FIT_PADDING_PX)?;
        return Ok(Viewport::Fitted(buffer.bounds));
    }

    if let Some(point) = view.point {
        surface.center_on(point, DEFAULT_ZOOM)?;
        return Ok(Viewport::Centered { at: point, zoom: DEFAULT_ZOOM });
    }

    Ok(Viewport::Unchanged)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Overlay {
        Marker(LatLng),
        Buffer(Bounds),
    }

    /// 描画呼び出しを記録するだけのサーフェス
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub initialized: bool,
        pub overlays: Vec<Overlay>,
        pub last_fit: Option<(Bounds, u32)>,
        pub last_center: Option<(LatLng, u8)>,
        pub fail_on_draw: bool,
    }

    impl MapSurface for RecordingSurface {
        fn ensure_initialized(&mut self) -> Result<()> {
            self.initialized = true;
            Ok(())
        }

        fn clear_overlays(&mut self) -> Result<()> {
            self.overlays.clear();
            Ok(())
        }

        fn draw_point(&mut self, at: LatLng, _popup: &MarkerPopup) -> Result<()> {
            if self.fail_on_draw {
                return Err(crate::Error::Map("marker failed".into()));
            }
            self.overlays.push(Overlay::Marker(at));
            Ok(())
        }

        fn draw_polygon_and_fit(
            &mut self,
            _geometry: &serde_json::Value,
            _style: &PolygonStyle,
            bounds: Bounds,
            padding_px: u32,
        ) -> Result<()> {
            self.overlays.push(Overlay::Buffer(bounds));
            self.last_fit = Some((bounds, padding_px));
            Ok(())
        }

        fn center_on(&mut self, at: LatLng, zoom: u8) -> Result<()> {
            self.last_center = Some((at, zoom));
            Ok(())
        }
    }
}
