use crate::models::{Category, DraftProduct, ImageFile, ProductField};
use crate::preview::{PreviewManager, PreviewRegistry, PreviewSource};

/// State behind the add-product form: draft fields, selected image and its
/// preview, and whether a submission is in flight.
#[derive(Debug, Default)]
pub struct ProductForm {
    draft: DraftProduct,
    image: Option<ImageFile>,
    preview: PreviewManager,
    selection: u64,
    pub(crate) uploading: bool,
}

/// Marks a pending image read started by [`ProductForm::begin_image_selection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSelection(u64);

impl ProductForm {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            draft: DraftProduct::default(),
            image: None,
            preview: PreviewManager::new(registry),
            selection: 0,
            uploading: false,
        }
    }

    pub fn draft(&self) -> &DraftProduct {
        &self.draft
    }

    pub fn image(&self) -> Option<&ImageFile> {
        self.image.as_ref()
    }

    pub fn preview(&self) -> PreviewSource {
        self.preview.source()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Replace one field of the draft, keeping the others
    pub fn set_field(&mut self, field: ProductField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProductField::Name => self.draft.name = value,
            ProductField::NewPrice => self.draft.new_price = value,
            ProductField::OldPrice => self.draft.old_price = value,
            ProductField::Category => match Category::parse(&value) {
                Some(category) => self.draft.category = category,
                None => log::warn!("Ignoring unknown category '{}'", value),
            },
        }
    }

    /// Replace the selected image; the preview follows in the same step.
    ///
    /// Any image read still pending from an earlier picker change is
    /// superseded.
    pub fn select_image(&mut self, image: Option<ImageFile>) {
        self.selection += 1;
        self.preview.select(image.as_ref());
        self.image = image;
    }

    /// Start reading a newly picked file; earlier pending reads go stale
    pub fn begin_image_selection(&mut self) -> ImageSelection {
        self.selection += 1;
        ImageSelection(self.selection)
    }

    /// Install the image read for `selection`, unless something newer was
    /// picked or the form was reset in the meantime
    pub fn finish_image_selection(
        &mut self,
        selection: ImageSelection,
        image: Option<ImageFile>,
    ) -> bool {
        if selection.0 != self.selection {
            log::debug!("Dropping stale image read {:?}", image);
            return false;
        }
        self.select_image(image);
        true
    }

    /// Back to an empty draft with no image
    pub fn reset(&mut self) {
        self.draft = DraftProduct::default();
        self.select_image(None);
    }

    /// Release the preview when the form goes away
    pub fn teardown(&mut self) {
        self.preview.clear();
    }
}
