use crate::models::{AddProductResponse, CatalogConfig, DraftProduct, ImageFile, UploadResponse};

/// Error type for catalog requests
#[derive(Debug)]
pub enum ClientError {
    /// Request could not be sent or the connection broke
    Network(String),
    /// Response body was not the expected JSON
    Json(String),
    /// Request could not be assembled (client setup, multipart part)
    Build(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Json(msg) => write!(f, "JSON error: {}", msg),
            ClientError::Build(msg) => write!(f, "Request error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

/// The two backend calls the add-product flow depends on.
///
/// Implementations report the server's verdict in the response types; only
/// transport and parse problems become `Err`.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    async fn upload_image(&self, image: &ImageFile) -> Result<UploadResponse, ClientError>;

    async fn add_product(&self, product: &DraftProduct) -> Result<AddProductResponse, ClientError>;
}

/// HTTP client for the catalog backend
#[derive(Debug, Clone)]
pub struct CatalogService {
    config: CatalogConfig,
    client: reqwest::Client,
}

impl CatalogService {
    pub fn new(config: CatalogConfig) -> Result<Self, ClientError> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &CatalogConfig) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder().user_agent("ShopAdmin/0.1.0");
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ClientError::Build(format!("Client build failed: {}", e)))
}

#[cfg(target_arch = "wasm32")]
fn build_client(_config: &CatalogConfig) -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| ClientError::Build(format!("Client build failed: {}", e)))
}

impl CatalogApi for CatalogService {
    async fn upload_image(&self, image: &ImageFile) -> Result<UploadResponse, ClientError> {
        let url = self.config.upload_url();

        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| ClientError::Build(format!("Invalid MIME type: {}", e)))?;
        let form =
            reqwest::multipart::Form::new().part(self.config.upload_field_name.clone(), part);

        log::debug!("Uploading {:?} to {}", image, url);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            log::warn!("Upload endpoint returned status {}", response.status());
        }

        response
            .json::<UploadResponse>()
            .await
            .map_err(|e| ClientError::Json(format!("Failed to parse upload response: {}", e)))
    }

    async fn add_product(&self, product: &DraftProduct) -> Result<AddProductResponse, ClientError> {
        let url = self.config.add_product_url();

        log::debug!("Creating product '{}' at {}", product.name, url);

        // .json() sets Content-Type
        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(product)
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("Add product request failed: {}", e)))?;

        if !response.status().is_success() {
            log::warn!("Add product endpoint returned status {}", response.status());
        }

        response
            .json::<AddProductResponse>()
            .await
            .map_err(|e| ClientError::Json(format!("Failed to parse add product response: {}", e)))
    }
}
