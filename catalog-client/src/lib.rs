//! # Catalog Client
//!
//! Everything behind the shop admin's "Add Product" form.
//!
//! This crate provides:
//! - The draft product model and its JSON shape
//! - A form state holder with field-by-field updates
//! - Scoped image previews that are released when superseded
//! - The upload-then-create submission flow
//! - An HTTP client for the catalog backend
//! - A Dioxus form component (feature `components`)
//!
//! ## Separation of Concerns
//!
//! This crate does **not** validate images server-side, retry failed
//! requests or persist drafts. The backend owns storage and validation.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use catalog_client::{CatalogConfig, CatalogService, ImageFile, ProductField, ProductForm};
//!
//! let service = CatalogService::new(CatalogConfig::default())?;
//! let mut form = ProductForm::default();
//! form.set_field(ProductField::Name, "Shirt");
//! form.set_field(ProductField::OldPrice, "20");
//! form.set_field(ProductField::NewPrice, "15");
//! form.select_image(Some(ImageFile::new("shirt.png", bytes)));
//!
//! if let Some(notice) = form.submit(&service).await {
//!     println!("{}", notice);
//! }
//! ```

pub mod form;
pub mod models;
pub mod preview;
pub mod service;
pub mod submission;

#[cfg(feature = "components")]
pub mod component;

pub use form::{ImageSelection, ProductForm};
pub use models::{
    AddProductResponse, CatalogConfig, Category, DraftProduct, ImageFile, ProductField,
    UploadResponse, ACCEPTED_IMAGE_EXTENSIONS,
};
pub use preview::{PreviewHandle, PreviewManager, PreviewRegistry, PreviewSource};
pub use service::{CatalogApi, CatalogService, ClientError};
pub use submission::{Notice, Outcome, SubmitPhase, SubmitRejected, SubmitTicket};

#[cfg(feature = "components")]
pub use component::{AddProductForm, AddProductProps, FormLabels};
