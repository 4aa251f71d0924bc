use js_sys::{Promise, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::PositionOptions;
use crate::error::GeolocationError;
use crate::models::LatLng;

/// Resolve the operator's position once, asking for the best accuracy available
///
/// # Errors
///
/// Returns an error if the browser has no geolocation API, or the lookup is
/// denied or times out.
pub async fn current_position() -> Result<LatLng, GeolocationError> {
    let geolocation = web_sys::window()
        .ok_or(GeolocationError::Unavailable)?
        .navigator()
        .geolocation()
        .map_err(|_| GeolocationError::Unavailable)?;

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(true);

    let mut request_error = None;
    let promise = Promise::new(&mut |resolve, reject| {
        if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(&resolve, Some(&reject), &options) {
            request_error = Some(e);
        }
    });
    if let Some(e) = request_error {
        return Err(GeolocationError::Denied(describe(&e)));
    }

    let position = JsFuture::from(promise)
        .await
        .map_err(|e| GeolocationError::Denied(describe(&e)))?;

    read_coordinates(&position).ok_or_else(|| GeolocationError::Denied("position without coordinates".to_string()))
}

fn read_coordinates(position: &JsValue) -> Option<LatLng> {
    let coords = Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let lat = Reflect::get(&coords, &JsValue::from_str("latitude")).ok()?.as_f64()?;
    let lng = Reflect::get(&coords, &JsValue::from_str("longitude")).ok()?.as_f64()?;
    Some(LatLng::new(lat, lng))
}

fn describe(error: &JsValue) -> String {
    Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{error:?}"))
}
