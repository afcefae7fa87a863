//! Display host and surface abstractions.
//!
//! A [`DisplayHost`] plays the role of the page document: it resolves a
//! surface by identifier at the moment a message arrives. A
//! [`DisplaySurface`] is the element whose content gets replaced.

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::RenderError;

/// A sink whose whole content is replaced on every render.
pub trait DisplaySurface: Send + Sync + Debug {
    /// Replaces the surface content with `content`.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the content could not be written.
    fn replace_content(&self, content: &str) -> Result<(), RenderError>;
}

/// Resolves display surfaces by identifier.
///
/// Lookups happen once per message and must not be cached by callers:
/// surfaces may appear or disappear between messages.
pub trait DisplayHost: Send + Sync + Debug {
    /// Looks up the surface with the given identifier.
    ///
    /// `Ok(None)` means the surface is simply not present, which is a
    /// normal state.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Lookup`] if the host itself failed.
    fn lookup(&self, id: &str) -> Result<Option<Arc<dyn DisplaySurface>>, RenderError>;
}

/// A host with no surfaces at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyHost;

impl DisplayHost for EmptyHost {
    fn lookup(&self, _id: &str) -> Result<Option<Arc<dyn DisplaySurface>>, RenderError> {
        Ok(None)
    }
}
