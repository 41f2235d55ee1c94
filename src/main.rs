use dioxus::prelude::*;

mod api;
mod components;
mod db;
mod diagnostics;
mod library;
mod playback;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    if let Err(err) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("logging unavailable: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#0f1115" }
        document::Title { "riffstream" }
        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
