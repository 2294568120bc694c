use dioxus::prelude::*;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        dioxus::launch(App);
    }
}

#[component]
#[allow(dead_code)]
fn App() -> Element {
    ui::App()
}
