use crate::form::ProductForm;
use crate::models::{CatalogConfig, Category, ImageFile, ProductField, ACCEPTED_IMAGE_EXTENSIONS};
use crate::preview::PreviewRegistry;
use crate::service::CatalogService;
use crate::submission::{Notice, Outcome, SubmitPhase, SubmitRejected};
use dioxus::prelude::*;

const UPLOAD_AREA: Asset = asset!("/assets/upload_area.svg");

/// Props for the AddProductForm
#[derive(Props, Clone, PartialEq)]
pub struct AddProductProps {
    /// Backend the form talks to
    #[props(default)]
    pub config: CatalogConfig,
    /// Called after every submit attempt with the message shown
    #[props(default)]
    pub on_notice: Option<EventHandler<Notice>>,
    /// Called once a product has been created
    #[props(default)]
    pub on_added: Option<EventHandler<()>>,
    /// Custom labels for UI elements (optional)
    #[props(default)]
    pub labels: Option<FormLabels>,
}

/// Custom labels for the add-product UI
#[derive(Clone, PartialEq)]
pub struct FormLabels {
    pub title: String,
    pub name: String,
    pub old_price: String,
    pub new_price: String,
    pub category: String,
    pub image: String,
    pub file_types: String,
    pub placeholder: String,
    pub thumbnail_alt: String,
    pub submit: String,
    pub uploading: String,
    pub creating: String,
}

impl Default for FormLabels {
    fn default() -> Self {
        Self {
            title: "Add New Product".to_string(),
            name: "Product Title".to_string(),
            old_price: "Price".to_string(),
            new_price: "Offer Price".to_string(),
            category: "Product Category".to_string(),
            image: "Product Image".to_string(),
            file_types: "(file types: .jpeg, .jpg, .png)".to_string(),
            placeholder: "Type here".to_string(),
            thumbnail_alt: "Product Thumbnail".to_string(),
            submit: "ADD".to_string(),
            uploading: "Uploading...".to_string(),
            creating: "Uploading...".to_string(),
        }
    }
}

/// Add-product form
///
/// Collects name, prices and category, previews the picked image and on
/// submit uploads the image and then creates the product.
///
/// # Example
/// ```rust,ignore
/// AddProductForm {
///     config: CatalogConfig::new("http://localhost:4000"),
///     on_added: move |_| log::info!("added"),
/// }
/// ```
#[component]
pub fn AddProductForm(props: AddProductProps) -> Element {
    let mut form = use_signal(|| ProductForm::new(PreviewRegistry::new()));
    let mut phase = use_signal(|| SubmitPhase::Idle);
    let mut notice = use_signal(|| None::<Notice>);

    use_drop(move || {
        if let Ok(mut form) = form.try_write() {
            form.teardown();
        }
    });

    let labels = props.labels.clone().unwrap_or_default();

    let on_image_change = move |evt: FormEvent| {
        let file = evt.files().into_iter().next();
        let selection = form.write().begin_image_selection();
        spawn(async move {
            let image = match file {
                Some(file) => match file.read_bytes().await {
                    Ok(bytes) => Some(ImageFile::new(file.name(), bytes.to_vec())),
                    Err(e) => {
                        log::warn!("Could not read selected image {}: {}", file.name(), e);
                        None
                    }
                },
                None => None,
            };
            form.write().finish_image_selection(selection, image);
        });
    };

    let on_submit = {
        let config = props.config.clone();
        let on_notice = props.on_notice;
        let on_added = props.on_added;

        move |evt: FormEvent| {
            evt.prevent_default();

            let ticket = match form.write().begin_submit() {
                Ok(ticket) => ticket,
                Err(SubmitRejected::Invalid(rejected)) => {
                    notice.set(Some(rejected));
                    if let Some(handler) = on_notice {
                        handler.call(rejected);
                    }
                    return;
                }
                Err(SubmitRejected::InProgress) => return,
            };
            notice.set(None);

            let config = config.clone();
            spawn(async move {
                let outcome = match CatalogService::new(config) {
                    Ok(service) => {
                        ticket
                            .execute_with_progress(&service, |p| phase.set(p))
                            .await
                    }
                    Err(e) => {
                        log::error!("There was an error uploading the product! {}", e);
                        Outcome::Failed(e)
                    }
                };

                let shown = form.write().finish_submit(&outcome);
                phase.set(SubmitPhase::Idle);
                notice.set(Some(shown));

                if let Some(handler) = on_notice {
                    handler.call(shown);
                }
                if shown.is_success() {
                    if let Some(handler) = on_added {
                        handler.call(());
                    }
                }
            });
        }
    };

    let draft = form.read().draft().clone();
    let uploading = form.read().is_uploading();
    let thumbnail = form.read().preview().url_or(&UPLOAD_AREA.to_string());
    let button_label = match phase() {
        SubmitPhase::Creating => labels.creating.clone(),
        _ if uploading => labels.uploading.clone(),
        _ => labels.submit.clone(),
    };

    rsx! {
        div { class: "addproduct",
            h2 { "{labels.title}" }

            if let Some(shown) = notice() {
                if shown.is_success() {
                    div { style: "background: #efe; border: 1px solid #cfc; color: #3a3; padding: 12px; margin-bottom: 16px; border-radius: 8px; font-size: 14px;",
                        "✅ {shown}"
                    }
                } else {
                    div { style: "background: #fee; border: 1px solid #fcc; color: #c33; padding: 12px; margin-bottom: 16px; border-radius: 8px; font-size: 14px;",
                        "⚠️ {shown}"
                    }
                }
            }

            form { onsubmit: on_submit,
                div { class: "addproduct-itemfield",
                    label { "{labels.name}" }
                    input {
                        r#type: "text",
                        name: ProductField::Name.as_str(),
                        value: "{draft.name}",
                        placeholder: "{labels.placeholder}",
                        oninput: move |e| form.write().set_field(ProductField::Name, e.value()),
                        required: true,
                    }
                }

                div { class: "addproduct-price",
                    div { class: "addproduct-itemfield",
                        label { "{labels.old_price}" }
                        input {
                            r#type: "number",
                            name: ProductField::OldPrice.as_str(),
                            value: "{draft.old_price}",
                            placeholder: "{labels.placeholder}",
                            oninput: move |e| form.write().set_field(ProductField::OldPrice, e.value()),
                            required: true,
                        }
                    }
                    div { class: "addproduct-itemfield",
                        label { "{labels.new_price}" }
                        input {
                            r#type: "number",
                            name: ProductField::NewPrice.as_str(),
                            value: "{draft.new_price}",
                            placeholder: "{labels.placeholder}",
                            oninput: move |e| form.write().set_field(ProductField::NewPrice, e.value()),
                            required: true,
                        }
                    }
                }

                div { class: "addproduct-itemfield",
                    label { "{labels.category}" }
                    select {
                        name: ProductField::Category.as_str(),
                        value: draft.category.as_str(),
                        onchange: move |e| form.write().set_field(ProductField::Category, e.value()),
                        required: true,
                        for category in Category::all() {
                            option { value: category.as_str(), "{category.display_name()}" }
                        }
                    }
                }

                div { class: "addproduct-itemfield",
                    label { "{labels.image}" }
                    p { "{labels.file_types}" }
                    label { r#for: "file-input",
                        img {
                            class: "addproduct-thumbnail-img",
                            src: "{thumbnail}",
                            alt: "{labels.thumbnail_alt}",
                        }
                    }
                    input {
                        r#type: "file",
                        name: "image",
                        id: "file-input",
                        accept: ACCEPTED_IMAGE_EXTENSIONS,
                        hidden: true,
                        onchange: on_image_change,
                    }
                }

                button {
                    class: "addproduct-btn",
                    r#type: "submit",
                    disabled: uploading,
                    "{button_label}"
                }
            }
        }
    }
}
