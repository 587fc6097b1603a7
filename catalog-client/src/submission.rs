//! Upload-then-create submission flow
//!
//! A submission runs in three steps so that the form never stays locked:
//!
//! 1. [`ProductForm::begin_submit`] validates and sets the uploading flag,
//!    returning a [`SubmitTicket`] with a snapshot of the draft and image.
//! 2. [`SubmitTicket::execute`] performs the two requests. It never fails;
//!    every error is folded into an [`Outcome`].
//! 3. [`ProductForm::finish_submit`] clears the flag, resets the form on
//!    success and returns the [`Notice`] to show.

use crate::form::ProductForm;
use crate::models::{DraftProduct, ImageFile};
use crate::service::{CatalogApi, ClientError};

/// Message shown to the user after a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    MissingFields,
    ProductAdded,
    UploadFailed,
    CreateFailed,
    RequestFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::MissingFields => "Please fill out all fields and upload an image.",
            Notice::ProductAdded => "Product Added",
            Notice::UploadFailed => "Failed to upload image",
            Notice::CreateFailed => "Failed to add product",
            Notice::RequestFailed => "Error uploading product. Please try again.",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::ProductAdded)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Why a submit did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Required field empty or no image; shown to the user
    Invalid(Notice),
    /// A submission is already running; ignored silently
    InProgress,
}

/// How a submission ended
#[derive(Debug)]
pub enum Outcome {
    Added,
    UploadRejected,
    CreateRejected,
    Failed(ClientError),
}

impl Outcome {
    pub fn notice(&self) -> Notice {
        match self {
            Outcome::Added => Notice::ProductAdded,
            Outcome::UploadRejected => Notice::UploadFailed,
            Outcome::CreateRejected => Notice::CreateFailed,
            Outcome::Failed(_) => Notice::RequestFailed,
        }
    }
}

/// Request currently in flight, for progress display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Uploading,
    Creating,
}

enum Step {
    Upload,
    Create { image_url: String },
    Done(Outcome),
}

/// Snapshot of the form taken when a submission starts.
///
/// Only [`ProductForm::begin_submit`] hands one out, and it cannot be
/// duplicated to run the same submission twice:
///
/// ```compile_fail
/// use catalog_client::{ImageFile, ProductField, ProductForm};
///
/// let mut form = ProductForm::default();
/// form.set_field(ProductField::Name, "Shirt");
/// form.set_field(ProductField::OldPrice, "20");
/// form.set_field(ProductField::NewPrice, "15");
/// form.select_image(Some(ImageFile::new("shirt.png", vec![1])));
///
/// let ticket = form.begin_submit().unwrap();
/// let again = ticket.clone();
/// ```
#[derive(Debug)]
pub struct SubmitTicket {
    draft: DraftProduct,
    image: ImageFile,
}

impl SubmitTicket {
    pub fn draft(&self) -> &DraftProduct {
        &self.draft
    }

    pub fn image(&self) -> &ImageFile {
        &self.image
    }

    /// Run upload then create against `api`
    pub async fn execute<A: CatalogApi>(&self, api: &A) -> Outcome {
        self.execute_with_progress(api, |_| {}).await
    }

    /// Like [`execute`](Self::execute), reporting each phase as it starts
    /// and `Idle` once done.
    pub async fn execute_with_progress<A, F>(&self, api: &A, mut on_phase: F) -> Outcome
    where
        A: CatalogApi,
        F: FnMut(SubmitPhase),
    {
        let mut step = Step::Upload;
        loop {
            step = match step {
                Step::Upload => {
                    on_phase(SubmitPhase::Uploading);
                    match api.upload_image(&self.image).await {
                        Ok(resp) => match resp.uploaded_url() {
                            Some(url) => Step::Create {
                                image_url: url.to_string(),
                            },
                            None => {
                                log::warn!(
                                    "Upload of {} rejected by server",
                                    self.image.file_name
                                );
                                Step::Done(Outcome::UploadRejected)
                            }
                        },
                        Err(e) => Step::Done(Outcome::Failed(e)),
                    }
                }
                Step::Create { image_url } => {
                    on_phase(SubmitPhase::Creating);
                    let product = self.draft.with_image(&image_url);
                    match api.add_product(&product).await {
                        Ok(resp) if resp.success => {
                            log::info!("Product '{}' added with image {}", product.name, image_url);
                            Step::Done(Outcome::Added)
                        }
                        Ok(_) => {
                            log::warn!("Server refused to add product '{}'", product.name);
                            Step::Done(Outcome::CreateRejected)
                        }
                        Err(e) => Step::Done(Outcome::Failed(e)),
                    }
                }
                Step::Done(outcome) => {
                    if let Outcome::Failed(e) = &outcome {
                        log::error!("There was an error uploading the product! {}", e);
                    }
                    on_phase(SubmitPhase::Idle);
                    return outcome;
                }
            };
        }
    }
}

impl ProductForm {
    /// Validate and lock the form for submission
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitRejected> {
        if self.uploading {
            log::debug!("Submit ignored, upload already in progress");
            return Err(SubmitRejected::InProgress);
        }

        let draft = self.draft();
        let image = match self.image() {
            Some(image)
                if !draft.name.is_empty()
                    && !draft.new_price.is_empty()
                    && !draft.old_price.is_empty() =>
            {
                image.clone()
            }
            _ => return Err(SubmitRejected::Invalid(Notice::MissingFields)),
        };

        let ticket = SubmitTicket {
            draft: draft.clone(),
            image,
        };
        self.uploading = true;
        Ok(ticket)
    }

    /// Unlock the form and apply the outcome
    pub fn finish_submit(&mut self, outcome: &Outcome) -> Notice {
        self.uploading = false;
        if let Outcome::Added = outcome {
            self.reset();
        }
        outcome.notice()
    }

    /// Whole submission in one call, for callers that own the form across
    /// the await. `None` when a submission is already running.
    pub async fn submit<A: CatalogApi>(&mut self, api: &A) -> Option<Notice> {
        let ticket = match self.begin_submit() {
            Ok(ticket) => ticket,
            Err(SubmitRejected::Invalid(notice)) => return Some(notice),
            Err(SubmitRejected::InProgress) => return None,
        };
        let outcome = ticket.execute(api).await;
        Some(self.finish_submit(&outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddProductResponse, Category, ProductField, UploadResponse};
    use crate::preview::{PreviewRegistry, PreviewSource};
    use std::cell::RefCell;

    enum Reply<T> {
        Ok(T),
        NetworkError,
        BadJson,
    }

    impl<T: Clone> Reply<T> {
        fn get(&self) -> Result<T, ClientError> {
            match self {
                Reply::Ok(v) => Ok(v.clone()),
                Reply::NetworkError => Err(ClientError::Network("connection refused".into())),
                Reply::BadJson => Err(ClientError::Json("expected value".into())),
            }
        }
    }

    struct FakeCatalog {
        upload: Reply<UploadResponse>,
        create: Reply<AddProductResponse>,
        uploads: RefCell<Vec<ImageFile>>,
        creates: RefCell<Vec<DraftProduct>>,
    }

    impl FakeCatalog {
        fn new(upload: Reply<UploadResponse>, create: Reply<AddProductResponse>) -> Self {
            Self {
                upload,
                create,
                uploads: RefCell::new(Vec::new()),
                creates: RefCell::new(Vec::new()),
            }
        }

        fn ok() -> Self {
            Self::new(upload_ok(), Reply::Ok(AddProductResponse { success: true }))
        }

        fn calls(&self) -> (usize, usize) {
            (self.uploads.borrow().len(), self.creates.borrow().len())
        }
    }

    impl CatalogApi for FakeCatalog {
        async fn upload_image(&self, image: &ImageFile) -> Result<UploadResponse, ClientError> {
            self.uploads.borrow_mut().push(image.clone());
            self.upload.get()
        }

        async fn add_product(
            &self,
            product: &DraftProduct,
        ) -> Result<AddProductResponse, ClientError> {
            self.creates.borrow_mut().push(product.clone());
            self.create.get()
        }
    }

    fn upload_ok() -> Reply<UploadResponse> {
        Reply::Ok(UploadResponse {
            success: true,
            image_url: Some("/img/1.png".to_string()),
        })
    }

    fn shirt_form(registry: &PreviewRegistry) -> ProductForm {
        let mut form = ProductForm::new(registry.clone());
        form.set_field(ProductField::Name, "Shirt");
        form.set_field(ProductField::OldPrice, "20");
        form.set_field(ProductField::NewPrice, "15");
        form.select_image(Some(ImageFile::new("shirt.png", vec![0x89, b'P', b'N', b'G'])));
        form
    }

    #[tokio::test]
    async fn test_product_added_resets_form() {
        let registry = PreviewRegistry::new();
        let mut form = shirt_form(&registry);
        let api = FakeCatalog::ok();

        let notice = form.submit(&api).await.unwrap();

        assert_eq!(notice, Notice::ProductAdded);
        assert_eq!(notice.message(), "Product Added");
        assert_eq!(form.draft(), &DraftProduct::default());
        assert!(form.image().is_none());
        assert_eq!(form.preview(), PreviewSource::Placeholder);
        assert_eq!(registry.live_count(), 0);
        assert!(!form.is_uploading());

        let creates = api.creates.borrow();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].image, "/img/1.png");
        assert_eq!(creates[0].name, "Shirt");
        assert_eq!(creates[0].category, Category::Women);
        assert_eq!(api.uploads.borrow()[0].file_name, "shirt.png");
    }

    #[tokio::test]
    async fn test_upload_rejected_skips_create() {
        let registry = PreviewRegistry::new();
        let mut form = shirt_form(&registry);
        let before = form.draft().clone();
        let api = FakeCatalog::new(
            Reply::Ok(UploadResponse {
                success: false,
                image_url: None,
            }),
            Reply::Ok(AddProductResponse { success: true }),
        );

        let notice = form.submit(&api).await.unwrap();

        assert_eq!(notice.message(), "Failed to upload image");
        assert_eq!(api.calls(), (1, 0));
        assert_eq!(form.draft(), &before);
        assert!(form.image().is_some());
        assert_eq!(registry.live_count(), 1);
        assert!(!form.is_uploading());
    }

    #[tokio::test]
    async fn test_upload_success_without_url_is_rejected() {
        let mut form = shirt_form(&PreviewRegistry::new());
        let api = FakeCatalog::new(
            Reply::Ok(UploadResponse {
                success: true,
                image_url: None,
            }),
            Reply::Ok(AddProductResponse { success: true }),
        );

        assert_eq!(form.submit(&api).await.unwrap(), Notice::UploadFailed);
        assert_eq!(api.calls(), (1, 0));
    }

    #[tokio::test]
    async fn test_create_rejected_preserves_form() {
        let registry = PreviewRegistry::new();
        let mut form = shirt_form(&registry);
        let before = form.draft().clone();
        let api = FakeCatalog::new(upload_ok(), Reply::Ok(AddProductResponse { success: false }));

        let notice = form.submit(&api).await.unwrap();

        assert_eq!(notice.message(), "Failed to add product");
        assert_eq!(api.calls(), (1, 1));
        assert_eq!(form.draft(), &before);
        assert!(form.draft().image.is_empty());
        assert!(form.image().is_some());
        assert!(!form.is_uploading());
    }

    #[tokio::test]
    async fn test_network_error_preserves_form() {
        let mut form = shirt_form(&PreviewRegistry::new());
        let before = form.draft().clone();
        let api = FakeCatalog::new(
            Reply::NetworkError,
            Reply::Ok(AddProductResponse { success: true }),
        );

        let notice = form.submit(&api).await.unwrap();

        assert_eq!(notice.message(), "Error uploading product. Please try again.");
        assert_eq!(api.calls(), (1, 0));
        assert_eq!(form.draft(), &before);
        assert!(!form.is_uploading());
    }

    #[tokio::test]
    async fn test_bad_json_on_create_is_generic_error() {
        let mut form = shirt_form(&PreviewRegistry::new());
        let api = FakeCatalog::new(upload_ok(), Reply::BadJson);

        assert_eq!(form.submit(&api).await.unwrap(), Notice::RequestFailed);
        assert_eq!(api.calls(), (1, 1));
        assert!(form.image().is_some());
        assert!(!form.is_uploading());
    }

    #[tokio::test]
    async fn test_missing_fields_make_no_requests() {
        let cases: [(ProductField, bool); 4] = [
            (ProductField::Name, false),
            (ProductField::NewPrice, false),
            (ProductField::OldPrice, false),
            (ProductField::Name, true),
        ];

        for (field, drop_image) in cases {
            let mut form = shirt_form(&PreviewRegistry::new());
            if drop_image {
                form.select_image(None);
            } else {
                form.set_field(field, "");
            }
            let before = form.draft().clone();
            let api = FakeCatalog::ok();

            let notice = form.submit(&api).await.unwrap();

            assert_eq!(notice, Notice::MissingFields);
            assert_eq!(
                notice.message(),
                "Please fill out all fields and upload an image."
            );
            assert_eq!(api.calls(), (0, 0));
            assert_eq!(form.draft(), &before);
            assert!(!form.is_uploading());
        }
    }

    #[test]
    fn test_second_begin_while_uploading_is_ignored() {
        let mut form = shirt_form(&PreviewRegistry::new());

        let ticket = form.begin_submit().unwrap();
        assert!(form.is_uploading());
        assert_eq!(ticket.draft().name, "Shirt");

        assert_eq!(form.begin_submit().unwrap_err(), SubmitRejected::InProgress);

        form.finish_submit(&Outcome::CreateRejected);
        assert!(!form.is_uploading());
        assert!(form.begin_submit().is_ok());
    }

    #[tokio::test]
    async fn test_phases_reported_in_order() {
        let form_registry = PreviewRegistry::new();
        let mut form = shirt_form(&form_registry);
        let ticket = form.begin_submit().unwrap();
        let api = FakeCatalog::ok();
        let mut phases = Vec::new();

        let outcome = ticket
            .execute_with_progress(&api, |phase| phases.push(phase))
            .await;

        assert!(matches!(outcome, Outcome::Added));
        assert_eq!(
            phases,
            vec![SubmitPhase::Uploading, SubmitPhase::Creating, SubmitPhase::Idle]
        );
    }

    #[tokio::test]
    async fn test_edits_during_flight_do_not_change_request() {
        let mut form = shirt_form(&PreviewRegistry::new());
        let ticket = form.begin_submit().unwrap();
        form.set_field(ProductField::Name, "Jacket");
        let api = FakeCatalog::ok();

        let outcome = ticket.execute(&api).await;
        assert_eq!(form.finish_submit(&outcome), Notice::ProductAdded);
        assert_eq!(api.creates.borrow()[0].name, "Shirt");
    }
}
