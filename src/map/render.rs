use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Path2d};
use wasm_bindgen::JsCast;
use crate::models::LatLng;
use super::icon::{MarkerIcon, MarkerKind};
use super::layer::MarkerLayer;
use super::projection::MapView;

const BACKGROUND_COLOR: &str = "#e8eef1";
const GRATICULE_COLOR: &str = "rgba(0, 0, 0, 0.08)";
const GRATICULE_LINE_WIDTH: f64 = 1.0;
const OPERATOR_RADIUS: f64 = 7.0;
const OPERATOR_FILL: &str = "#4285f4";
const OPERATOR_HALO: &str = "rgba(66, 133, 244, 0.25)";
const OPERATOR_HALO_RADIUS: f64 = 18.0;
const MARKER_OUTLINE_WIDTH: f64 = 1.0;

/// Off-screen markers closer than this are still drawn so icons slide in smoothly
const MARKER_CULL_MARGIN: f64 = 48.0;

/// Draw the whole map: background, graticule, operator position and markers
///
/// The canvas is resized to its client size before drawing.
pub fn render_map(canvas: &HtmlCanvasElement, view: MapView, layer: &MarkerLayer, operator: Option<LatLng>) {
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };

    // Browser dimensions are always non-negative
    #[allow(clippy::cast_sign_loss)]
    let width = canvas.client_width() as u32;
    #[allow(clippy::cast_sign_loss)]
    let height = canvas.client_height() as u32;
    if width > 0 && height > 0 {
        canvas.set_width(width);
        canvas.set_height(height);
    }

    let view = view.with_size(f64::from(canvas.width()), f64::from(canvas.height()));

    ctx.set_fill_style_str(BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, view.width, view.height);

    draw_graticule(&ctx, &view);

    if let Some(position) = operator {
        draw_operator(&ctx, &view, position);
    }

    // Destinations underneath, vehicles on top
    for kind in [MarkerKind::Pin, MarkerKind::Car] {
        for marker in layer.of_kind(kind) {
            if view.contains(marker.position, MARKER_CULL_MARGIN) {
                draw_marker(&ctx, &view, marker.position, &marker.icon);
            }
        }
    }
}

fn draw_graticule(ctx: &CanvasRenderingContext2d, view: &MapView) {
    let step = view.graticule_step();
    let top_left = view.unproject(0.0, 0.0);
    let bottom_right = view.unproject(view.width, view.height);

    ctx.set_stroke_style_str(GRATICULE_COLOR);
    ctx.set_line_width(GRATICULE_LINE_WIDTH);
    ctx.begin_path();

    let mut lng = (top_left.lng / step).floor() * step;
    while lng <= bottom_right.lng {
        let (x, _) = view.project(LatLng::new(view.center.lat, lng));
        ctx.move_to(x, 0.0);
        ctx.line_to(x, view.height);
        lng += step;
    }

    let mut lat = (bottom_right.lat / step).floor() * step;
    while lat <= top_left.lat {
        let (_, y) = view.project(LatLng::new(lat, view.center.lng));
        ctx.move_to(0.0, y);
        ctx.line_to(view.width, y);
        lat += step;
    }

    ctx.stroke();
}

fn draw_operator(ctx: &CanvasRenderingContext2d, view: &MapView, position: LatLng) {
    let (x, y) = view.project(position);

    ctx.set_fill_style_str(OPERATOR_HALO);
    ctx.begin_path();
    let _ = ctx.arc(x, y, OPERATOR_HALO_RADIUS, 0.0, std::f64::consts::PI * 2.0);
    ctx.fill();

    ctx.set_fill_style_str(OPERATOR_FILL);
    ctx.set_stroke_style_str("#fff");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    let _ = ctx.arc(x, y, OPERATOR_RADIUS, 0.0, std::f64::consts::PI * 2.0);
    ctx.fill();
    ctx.stroke();
}

fn draw_marker(ctx: &CanvasRenderingContext2d, view: &MapView, position: LatLng, icon: &MarkerIcon) {
    let Ok(path) = Path2d::new_with_path_string(icon.path()) else {
        return;
    };

    let (x, y) = view.project(position);
    let (anchor_x, anchor_y) = icon.anchor();
    let scale = icon.scale();

    ctx.save();
    let _ = ctx.translate(x - anchor_x * scale, y - anchor_y * scale);
    let _ = ctx.scale(scale, scale);
    ctx.set_fill_style_str(icon.fill());
    ctx.set_stroke_style_str(icon.outline());
    ctx.set_line_width(MARKER_OUTLINE_WIDTH / scale);
    ctx.fill_with_path_2d(&path);
    ctx.stroke_with_path(&path);
    ctx.restore();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::color::RouteColor;
    use crate::map::layer::MapSurface;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn canvas() -> HtmlCanvasElement {
        let document = web_sys::window().and_then(|w| w.document()).expect("document");
        let canvas = document
            .create_element("canvas")
            .expect("canvas element")
            .dyn_into::<HtmlCanvasElement>()
            .expect("is a canvas");
        canvas.set_width(400);
        canvas.set_height(300);
        canvas
    }

    #[wasm_bindgen_test]
    fn test_render_empty_map() {
        let view = MapView::new(LatLng::new(-23.55, -46.63), 15.0);
        render_map(&canvas(), view, &MarkerLayer::new(), None);
    }

    #[wasm_bindgen_test]
    fn test_render_markers_and_operator() {
        let center = LatLng::new(-23.55, -46.63);
        let mut layer = MarkerLayer::new();
        layer.place_marker(center, MarkerIcon::car(RouteColor::new("#b71c1c")));
        layer.place_marker(LatLng::new(-23.551, -46.631), MarkerIcon::pin(RouteColor::new("#b71c1c")));

        render_map(&canvas(), MapView::new(center, 15.0), &layer, Some(center));
    }
}
