//! In-process display host.
//!
//! [`MemoryPage`] keeps mounted surfaces in a map keyed by identifier.
//! Surfaces can be mounted and unmounted at any time; the listener sees
//! the change on the next message because lookups are never cached.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::surface::{DisplayHost, DisplaySurface};
use crate::error::RenderError;

/// A display host backed by a map of mounted surfaces.
#[derive(Debug, Default)]
pub struct MemoryPage {
    surfaces: RwLock<HashMap<String, Arc<dyn DisplaySurface>>>,
}

impl MemoryPage {
    /// Creates a page with no surfaces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts `surface` under `id`, replacing any previous surface.
    pub fn mount(&self, id: impl Into<String>, surface: Arc<dyn DisplaySurface>) {
        self.surfaces.write().insert(id.into(), surface);
    }

    /// Creates a [`MemorySurface`], mounts it under `id` and returns it.
    pub fn mount_memory(&self, id: impl Into<String>) -> Arc<MemorySurface> {
        let surface = Arc::new(MemorySurface::new());
        self.mount(id, Arc::clone(&surface) as Arc<dyn DisplaySurface>);
        surface
    }

    /// Removes the surface mounted under `id`. Returns `true` if one was
    /// present.
    pub fn unmount(&self, id: &str) -> bool {
        self.surfaces.write().remove(id).is_some()
    }

    /// Returns `true` if a surface is mounted under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.surfaces.read().contains_key(id)
    }
}

impl DisplayHost for MemoryPage {
    fn lookup(&self, id: &str) -> Result<Option<Arc<dyn DisplaySurface>>, RenderError> {
        Ok(self.surfaces.read().get(id).map(Arc::clone))
    }
}

#[derive(Debug, Default)]
struct SurfaceState {
    content: String,
    writes: u64,
    detached: bool,
}

/// A surface that stores its content in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: RwLock<SurfaceState>,
}

impl MemorySurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current content.
    #[must_use]
    pub fn content(&self) -> String {
        self.state.read().content.clone()
    }

    /// Returns how many times the content has been replaced.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.state.read().writes
    }

    /// Marks the surface as detached; later writes fail with
    /// [`RenderError::Detached`].
    pub fn detach(&self) {
        self.state.write().detached = true;
    }

    /// Re-attaches a detached surface.
    pub fn reattach(&self) {
        self.state.write().detached = false;
    }
}

impl DisplaySurface for MemorySurface {
    fn replace_content(&self, content: &str) -> Result<(), RenderError> {
        let mut state = self.state.write();
        if state.detached {
            return Err(RenderError::Detached(
                "memory surface is detached".to_string(),
            ));
        }
        content.clone_into(&mut state.content);
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn lookup_missing_is_none() {
        let page = MemoryPage::new();
        let Ok(found) = page.lookup("testWebSocket") else {
            panic!("lookup failed");
        };
        assert!(found.is_none());
    }

    #[test]
    fn mounted_surface_is_found_and_written() {
        let page = MemoryPage::new();
        let surface = page.mount_memory("testWebSocket");

        let Ok(Some(found)) = page.lookup("testWebSocket") else {
            panic!("surface not found");
        };
        assert!(found.replace_content("hello").is_ok());
        assert_eq!(surface.content(), "hello");
        assert_eq!(surface.write_count(), 1);
    }

    #[test]
    fn unmount_removes_surface() {
        let page = MemoryPage::new();
        let _surface = page.mount_memory("a");
        assert!(page.contains("a"));
        assert!(page.unmount("a"));
        assert!(!page.contains("a"));
        assert!(!page.unmount("a"));
    }

    #[test]
    fn mount_replaces_previous_surface() {
        let page = MemoryPage::new();
        let first = page.mount_memory("a");
        let second = page.mount_memory("a");

        let Ok(Some(found)) = page.lookup("a") else {
            panic!("surface not found");
        };
        assert!(found.replace_content("x").is_ok());
        assert_eq!(first.content(), "");
        assert_eq!(second.content(), "x");
    }

    #[test]
    fn detached_surface_rejects_writes() {
        let surface = MemorySurface::new();
        assert!(surface.replace_content("one").is_ok());
        surface.detach();
        assert!(matches!(
            surface.replace_content("two"),
            Err(RenderError::Detached(_))
        ));
        assert_eq!(surface.content(), "one");
        surface.reattach();
        assert!(surface.replace_content("three").is_ok());
        assert_eq!(surface.content(), "three");
        assert_eq!(surface.write_count(), 2);
    }
}
