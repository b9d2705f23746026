//! Leaflet バインディング
//!
//! ページで読み込まれたグローバルの `L` を直接呼ぶ。
//! 描いたマーカー・ポリゴンは自前で保持し、タイルレイヤーは残したまま消す。

use school_search_common::{
    map::{TILE_ATTRIBUTION, TILE_URL},
    Bounds, Error, LatLng, MapSurface, MarkerPopup, PolygonStyle, Result,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = L, js_name = Map)]
    pub type LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = Layer)]
    pub type Layer;

    #[wasm_bindgen(js_namespace = L, js_name = map, catch)]
    fn create_map(container_id: &str) -> std::result::Result<LeafletMap, JsValue>;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer, catch)]
    fn tile_layer(url: &str, options: &JsValue) -> std::result::Result<Layer, JsValue>;

    #[wasm_bindgen(js_namespace = L, js_name = marker, catch)]
    fn marker(lat_lng: &JsValue) -> std::result::Result<Layer, JsValue>;

    #[wasm_bindgen(js_namespace = L, js_name = geoJSON, catch)]
    fn geo_json(data: &JsValue, options: &JsValue) -> std::result::Result<Layer, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &LeafletMap) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Layer, content: &web_sys::Element) -> Layer;

    #[wasm_bindgen(method, js_name = removeLayer)]
    fn remove_layer(this: &LeafletMap, layer: &Layer) -> LeafletMap;

    #[wasm_bindgen(method, js_name = fitBounds, catch)]
    fn fit_bounds(
        this: &LeafletMap,
        bounds: &JsValue,
        options: &JsValue,
    ) -> std::result::Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView, catch)]
    fn set_view(
        this: &LeafletMap,
        center: &JsValue,
        zoom: u8,
    ) -> std::result::Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = invalidateSize)]
    fn invalidate_size(this: &LeafletMap) -> LeafletMap;
}

#[derive(Serialize)]
struct TileOptions {
    attribution: &'static str,
}

#[derive(Serialize)]
struct GeoJsonOptions<'a> {
    style: &'a PolygonStyle,
}

#[derive(Serialize)]
struct FitOptions {
    padding: [u32; 2],
}

fn map_error(value: JsValue) -> Error {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Map(message)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| Error::Map(e.to_string()))
}

fn lat_lng(at: LatLng) -> JsValue {
    js_sys::Array::of2(&JsValue::from_f64(at.lat), &JsValue::from_f64(at.lng)).into()
}

/// `<strong>学校名</strong><br>セクター` をテキストノードで組み立てる
fn popup_content(popup: &MarkerPopup) -> Result<web_sys::Element> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| Error::Map("document is not available".into()))?;

    let container = document.create_element("div").map_err(map_error)?;
    let title = document.create_element("strong").map_err(map_error)?;
    title.set_text_content(Some(&popup.title));
    container.append_child(&title).map_err(map_error)?;

    if let Some(subtitle) = &popup.subtitle {
        let br = document.create_element("br").map_err(map_error)?;
        container.append_child(&br).map_err(map_error)?;
        let text = document.create_text_node(subtitle);
        container.append_child(&text).map_err(map_error)?;
    }

    Ok(container)
}

/// Leaflet地図（ページ内に1つ）
pub struct LeafletSurface {
    container_id: &'static str,
    map: Option<LeafletMap>,
    overlays: Vec<Layer>,
}

impl LeafletSurface {
    pub fn new(container_id: &'static str) -> Self {
        Self {
            container_id,
            map: None,
            overlays: Vec::new(),
        }
    }

    fn map(&self) -> Result<&LeafletMap> {
        self.map
            .as_ref()
            .ok_or_else(|| Error::Map("map is not initialized".into()))
    }
}

impl MapSurface for LeafletSurface {
    fn ensure_initialized(&mut self) -> Result<()> {
        if let Some(map) = &self.map {
            // 非表示の間にサイズが変わっている可能性がある
            map.invalidate_size();
            return Ok(());
        }

        let map = create_map(self.container_id).map_err(map_error)?;
        let tiles = tile_layer(
            TILE_URL,
            &to_js(&TileOptions {
                attribution: TILE_ATTRIBUTION,
            })?,
        )
        .map_err(map_error)?;
        tiles.add_to(&map);

        self.map = Some(map);
        Ok(())
    }

    fn clear_overlays(&mut self) -> Result<()> {
        let map = self.map()?;
        for layer in &self.overlays {
            map.remove_layer(layer);
        }
        self.overlays.clear();
        Ok(())
    }

    fn draw_point(&mut self, at: LatLng, popup: &MarkerPopup) -> Result<()> {
        let content = popup_content(popup)?;
        let map = self.map()?;

        let layer = marker(&lat_lng(at)).map_err(map_error)?;
        layer.add_to(map);
        layer.bind_popup(&content);

        self.overlays.push(layer);
        Ok(())
    }

    fn draw_polygon_and_fit(
        &mut self,
        geometry: &serde_json::Value,
        style: &PolygonStyle,
        bounds: Bounds,
        padding_px: u32,
    ) -> Result<()> {
        let map = self.map()?;

        let layer = geo_json(&to_js(geometry)?, &to_js(&GeoJsonOptions { style })?)
            .map_err(map_error)?;
        layer.add_to(map);
        // 地図に載せたレイヤーはすべて overlays で追跡する
        self.overlays.push(layer);

        let map = self.map()?;
        map.fit_bounds(
            &to_js(&bounds.corners())?,
            &to_js(&FitOptions {
                padding: [padding_px, padding_px],
            })?,
        )
        .map_err(map_error)?;
        Ok(())
    }

    fn center_on(&mut self, at: LatLng, zoom: u8) -> Result<()> {
        self.map()?
            .set_view(&lat_lng(at), zoom)
            .map_err(map_error)?;
        Ok(())
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_popup_content_escapes_markup() {
        let popup = MarkerPopup {
            title: "<b>School</b>".to_string(),
            subtitle: Some("Government".to_string()),
        };
        let element = popup_content(&popup).expect("popup element");
        assert_eq!(element.child_element_count(), 2);
        assert!(element.inner_html().contains("&lt;b&gt;School&lt;/b&gt;"));
    }

    /// fitBounds が例外を投げる最小限の `L` を置く
    fn install_leaflet_stub() {
        js_sys::eval(
            r#"(function () {
                var removed = [];
                function layer() {
                    return {
                        addTo: function () { return this; },
                        bindPopup: function () { return this; }
                    };
                }
                globalThis.__leafletRemoved = removed;
                globalThis.L = {
                    map: function () {
                        return {
                            removeLayer: function (l) { removed.push(l); return this; },
                            fitBounds: function () { throw new Error("fit failed"); },
                            setView: function () { return this; },
                            invalidateSize: function () { return this; }
                        };
                    },
                    tileLayer: layer,
                    marker: layer,
                    geoJSON: layer
                };
            })()"#,
        )
        .expect("install stub");
    }

    fn removed_count() -> f64 {
        js_sys::eval("globalThis.__leafletRemoved.length")
            .expect("removed count")
            .as_f64()
            .unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn wasm_failed_fit_still_clears_polygon() {
        install_leaflet_stub();
        let mut surface = LeafletSurface::new("schoolMap");
        surface.ensure_initialized().expect("init");

        let geometry = serde_json::json!({
            "type": "Polygon",
            "coordinates": [[[151.15, -33.85], [151.25, -33.85], [151.25, -33.75], [151.15, -33.85]]]
        });
        let bounds = Bounds {
            south: -33.85,
            west: 151.15,
            north: -33.75,
            east: 151.25,
        };
        let result = surface.draw_polygon_and_fit(
            &geometry,
            &school_search_common::map::BUFFER_STYLE,
            bounds,
            20,
        );
        assert!(matches!(result, Err(Error::Map(_))));

        surface.clear_overlays().expect("clear");
        assert_eq!(removed_count(), 1.0);
    }

    #[wasm_bindgen_test]
    fn wasm_surface_requires_initialization() {
        let mut surface = LeafletSurface::new("schoolMap");
        let result = surface.center_on(LatLng { lat: -33.8, lng: 151.2 }, 13);
        assert!(matches!(result, Err(Error::Map(_))));
    }
}
