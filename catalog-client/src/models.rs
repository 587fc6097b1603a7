use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog section a product is listed under
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Women,
    Men,
    Kid,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Women => "women",
            Category::Men => "men",
            Category::Kid => "kid",
        }
    }

    /// Parses the wire value; anything outside the three sections is `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "women" => Some(Category::Women),
            "men" => Some(Category::Men),
            "kid" => Some(Category::Kid),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Women => "Women",
            Category::Men => "Men",
            Category::Kid => "Kid",
        }
    }

    pub fn all() -> &'static [Category] {
        static ALL: [Category; 3] = [Category::Women, Category::Men, Category::Kid];
        &ALL
    }
}

/// The unsaved product record edited by the form.
///
/// Also the body of the create request once `image` holds the uploaded URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DraftProduct {
    pub name: String,
    pub image: String,
    pub category: Category,
    pub new_price: String,
    pub old_price: String,
}

impl DraftProduct {
    /// Copy of the draft pointing at an uploaded image
    pub fn with_image(&self, image_url: &str) -> Self {
        Self {
            image: image_url.to_string(),
            ..self.clone()
        }
    }
}

/// User-editable fields of a [`DraftProduct`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Category,
    NewPrice,
    OldPrice,
}

impl ProductField {
    /// Field name as used in form inputs and in the JSON body
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Category => "category",
            ProductField::NewPrice => "new_price",
            ProductField::OldPrice => "old_price",
        }
    }
}

/// An image picked by the user, held in memory until it is uploaded
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Builds an image file, inferring the MIME type from the extension
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for_file_name(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }
}

// Keeps image payloads out of log lines.
impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Extensions offered by the file picker
pub const ACCEPTED_IMAGE_EXTENSIONS: &str = ".jpeg,.jpg,.png";

fn mime_for_file_name(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

/// Response from the upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UploadResponse {
    /// URL of the stored image, only when the server reported success
    pub fn uploaded_url(&self) -> Option<&str> {
        if self.success {
            self.image_url.as_deref()
        } else {
            None
        }
    }
}

/// Response from the product creation endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AddProductResponse {
    #[serde(default)]
    pub success: bool,
}

/// Where the catalog backend lives and how to talk to it
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Base URL of the backend, without trailing slash
    pub api_base_url: String,
    pub upload_path: String,
    pub add_product_path: String,
    /// Multipart field carrying the image
    pub upload_field_name: String,
    /// Per-request timeout; `None` waits for the server indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:4000".to_string(),
            upload_path: "/upload".to_string(),
            add_product_path: "/addproduct".to_string(),
            upload_field_name: "product".to_string(),
            request_timeout: None,
        }
    }
}

impl CatalogConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    pub fn upload_url(&self) -> String {
        join_url(&self.api_base_url, &self.upload_path)
    }

    pub fn add_product_url(&self) -> String {
        join_url(&self.api_base_url, &self.add_product_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
