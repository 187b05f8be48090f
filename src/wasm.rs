use wasm_bindgen::prelude::*;

use crate::ComposeOptions;

/// Compose two SVG strings into vector-drawable XML. `options` is a plain
/// object with the same camelCase fields as the JSON config, or `undefined`.
#[wasm_bindgen]
pub fn compose_svg(base_svg: &str, overlay_svg: &str, options: JsValue) -> Result<String, JsValue> {
    let options: ComposeOptions = if options.is_undefined() || options.is_null() {
        ComposeOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Options parse error: {}", e)))?
    };
    crate::compose(base_svg, overlay_svg, &options)
        .map(|composition| composition.to_xml())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
