//! Local preview URLs for the selected image
//!
//! A preview is acquired from a [`PreviewRegistry`] and handed out as a
//! [`PreviewHandle`]. Dropping the handle releases it, so a preview lives
//! exactly as long as the selection it was derived from.

use crate::models::ImageFile;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use uuid::Uuid;

/// Tracks which preview URLs are still live
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    live: Rc<RefCell<HashSet<Uuid>>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a preview URL for `file`
    pub fn acquire(&self, file: &ImageFile) -> PreviewHandle {
        use base64::{engine::general_purpose, Engine as _};

        let id = Uuid::new_v4();
        let encoded = general_purpose::STANDARD.encode(&file.bytes);
        let url: Rc<str> = format!("data:{};base64,{}", file.mime_type, encoded).into();

        self.live.borrow_mut().insert(id);
        log::debug!("Preview {} acquired for {}", id, file.file_name);

        PreviewHandle {
            id,
            url,
            registry: self.clone(),
        }
    }

    pub fn is_live(&self, id: Uuid) -> bool {
        self.live.borrow().contains(&id)
    }

    pub fn live_count(&self) -> usize {
        self.live.borrow().len()
    }

    fn release(&self, id: Uuid) {
        if self.live.borrow_mut().remove(&id) {
            log::debug!("Preview {} released", id);
        } else {
            log::warn!("Preview {} released twice", id);
        }
    }
}

/// A live preview URL; released on drop
pub struct PreviewHandle {
    id: Uuid,
    url: Rc<str>,
    registry: PreviewRegistry,
}

impl PreviewHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Shared copy of the URL; the payload itself is not duplicated
    pub fn shared_url(&self) -> Rc<str> {
        Rc::clone(&self.url)
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

impl std::fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewHandle").field("id", &self.id).finish()
    }
}

/// What the thumbnail should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewSource {
    /// No image selected; show the static upload placeholder
    Placeholder,
    /// Preview URL of the selected image, shared with its handle
    Derived(Rc<str>),
}

impl PreviewSource {
    /// URL to render, falling back to `placeholder`
    pub fn url_or(&self, placeholder: &str) -> Rc<str> {
        match self {
            PreviewSource::Placeholder => placeholder.into(),
            PreviewSource::Derived(url) => Rc::clone(url),
        }
    }
}

/// Keeps at most one preview alive, matching the current selection
#[derive(Debug)]
pub struct PreviewManager {
    registry: PreviewRegistry,
    current: Option<PreviewHandle>,
}

impl PreviewManager {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            registry,
            current: None,
        }
    }

    /// Replace the preview with one for `file`, or the placeholder for `None`.
    ///
    /// The previous handle is released before the next one is acquired.
    pub fn select(&mut self, file: Option<&ImageFile>) {
        self.current = None;
        self.current = file.map(|f| self.registry.acquire(f));
    }

    pub fn clear(&mut self) {
        self.select(None);
    }

    pub fn source(&self) -> PreviewSource {
        match &self.current {
            Some(handle) => PreviewSource::Derived(handle.shared_url()),
            None => PreviewSource::Placeholder,
        }
    }

    pub fn current_id(&self) -> Option<Uuid> {
        self.current.as_ref().map(PreviewHandle::id)
    }

    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }
}

impl Default for PreviewManager {
    fn default() -> Self {
        Self::new(PreviewRegistry::new())
    }
}

impl std::fmt::Debug for PreviewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}
