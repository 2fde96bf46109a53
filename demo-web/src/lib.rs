#![cfg(target_arch = "wasm32")]
use egui_spotlight::DeviceCapabilities;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures as _; // ensure the crate is linked for wasm_bindgen async
use web_sys::HtmlCanvasElement;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    // Fire and forget: kick off the async runner
    wasm_bindgen_futures::spawn_local(async {
        if let Err(err) = run().await {
            log::error!("demo failed to start: {err:?}");
        }
    });
    Ok(())
}

/// Touch support as reported by the browser.
fn detect_capabilities(window: &web_sys::Window) -> DeviceCapabilities {
    let touch_start_event =
        js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false);
    let max_touch_points = u32::try_from(window.navigator().max_touch_points()).unwrap_or(0);

    DeviceCapabilities {
        touch_start_event,
        max_touch_points,
    }
}

#[wasm_bindgen]
pub async fn run() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id("the_canvas_id")
        .ok_or_else(|| JsValue::from_str("canvas with id 'the_canvas_id' not found"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("failed to cast to HtmlCanvasElement"))?;

    let capabilities = detect_capabilities(&window);
    log::debug!("device capabilities: {capabilities:?}");

    let web_options = eframe::WebOptions::default();
    eframe::WebRunner::new()
        .start(
            canvas,
            web_options,
            Box::new(move |cc| {
                Ok::<Box<dyn eframe::App>, _>(Box::new(demo_core::DemoApp::with_capabilities(
                    cc,
                    capabilities,
                )))
            }),
        )
        .await?;
    Ok(())
}
