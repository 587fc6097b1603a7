use catalog_client::{AddProductForm, CatalogConfig, FormLabels, Notice};
use dioxus::prelude::*;
use dioxus_i18n::t;

fn translated_labels() -> FormLabels {
    FormLabels {
        title: t!("addproduct-title"),
        name: t!("addproduct-name-label"),
        old_price: t!("addproduct-old-price-label"),
        new_price: t!("addproduct-new-price-label"),
        category: t!("addproduct-category-label"),
        image: t!("addproduct-image-label"),
        file_types: t!("addproduct-file-types"),
        placeholder: t!("addproduct-placeholder"),
        thumbnail_alt: t!("addproduct-thumbnail-alt"),
        submit: t!("addproduct-submit"),
        uploading: t!("addproduct-uploading"),
        creating: t!("addproduct-creating"),
    }
}

#[component]
pub fn AddProductScreen(config: CatalogConfig, settings_error: Option<String>) -> Element {
    let mut added_count = use_signal(|| 0u32);

    rsx! {
        div { style: "padding: 16px; max-width: 900px; margin: 0 auto;",
            if let Some(err) = settings_error {
                div { style: "background: #fff3cd; border: 1px solid #ffe69c; color: #664d03; padding: 12px; margin-bottom: 16px; border-radius: 8px; font-size: 14px;",
                    {t!("settings-error", error: err)}
                }
            }

            AddProductForm {
                config,
                labels: Some(translated_labels()),
                on_notice: move |notice: Notice| {
                    log::info!("Add product: {}", notice);
                },
                on_added: move |_| {
                    *added_count.write() += 1;
                    log::debug!("{} products added this session", added_count());
                },
            }
        }
    }
}
