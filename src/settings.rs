use crate::error::AppError;
use catalog_client::CatalogConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BUNDLED_SETTINGS: &str = include_str!("../shop-admin.toml");

/// Backend settings bundled with the app
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminSettings {
    pub api_base_url: String,
    #[serde(default = "default_upload_path")]
    pub upload_path: String,
    #[serde(default = "default_add_product_path")]
    pub add_product_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_upload_path() -> String {
    CatalogConfig::default().upload_path
}

fn default_add_product_path() -> String {
    CatalogConfig::default().add_product_path
}

impl Default for AdminSettings {
    fn default() -> Self {
        let config = CatalogConfig::default();
        Self {
            api_base_url: config.api_base_url,
            upload_path: config.upload_path,
            add_product_path: config.add_product_path,
            request_timeout_secs: None,
        }
    }
}

impl AdminSettings {
    pub fn from_toml(s: &str) -> Result<Self, AppError> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    #[allow(dead_code)]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn validate(&self) -> Result<(), AppError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Validation(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(AppError::Validation(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            api_base_url: self.api_base_url.trim().to_string(),
            upload_path: self.upload_path.clone(),
            add_product_path: self.add_product_path.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..CatalogConfig::default()
        }
    }
}

/// Settings shipped in `shop-admin.toml`
pub fn load_bundled() -> Result<AdminSettings, AppError> {
    AdminSettings::from_toml(BUNDLED_SETTINGS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_settings_parse() {
        let settings = load_bundled().unwrap();
        assert_eq!(settings.api_base_url, "http://localhost:4000");
        assert_eq!(settings.catalog_config(), CatalogConfig::default());
    }

    #[test]
    fn test_paths_default_when_missing() {
        let settings =
            AdminSettings::from_toml("api_base_url = \"https://shop.example.com\"").unwrap();
        let config = settings.catalog_config();
        assert_eq!(config.upload_url(), "https://shop.example.com/upload");
        assert_eq!(config.add_product_url(), "https://shop.example.com/addproduct");
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_timeout_is_carried_over() {
        let settings = AdminSettings::from_toml(
            "api_base_url = \"http://localhost:4000\"\nrequest_timeout_secs = 30",
        )
        .unwrap();
        assert_eq!(
            settings.catalog_config().request_timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(matches!(
            AdminSettings::from_toml("api_base_url = \"localhost:4000\""),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            AdminSettings::from_toml(
                "api_base_url = \"http://localhost:4000\"\nrequest_timeout_secs = 0"
            ),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            AdminSettings::from_toml("api_base_url = 4000"),
            Err(AppError::Settings(_))
        ));
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let text = AdminSettings::default().to_toml().unwrap();
        assert_eq!(AdminSettings::from_toml(&text).unwrap(), AdminSettings::default());
    }
}
