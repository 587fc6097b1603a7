use dioxus::prelude::*;
use dioxus_i18n::prelude::use_init_i18n;

mod error;
mod i18n;
mod screens;
mod settings;

use screens::AddProductScreen;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // dioxus::launch installs the platform logger; `log` records reach it.
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_init_i18n(i18n::init_i18n);

    let (config, settings_error) = use_hook(|| match settings::load_bundled() {
        Ok(settings) => (settings.catalog_config(), None),
        Err(e) => {
            log::error!("Falling back to default backend settings: {}", e);
            (catalog_client::CatalogConfig::default(), Some(e.to_string()))
        }
    });

    let title = dioxus_i18n::t!("app-title");

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Title { "{title}" }

        AddProductScreen { config, settings_error }
    }
}
