#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init();

    eframe::run_native(
        "Portfolio",
        eframe::NativeOptions::default(),
        Box::new(|cc| Ok::<Box<dyn eframe::App>, _>(Box::new(demo_core::DemoApp::new(cc)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
