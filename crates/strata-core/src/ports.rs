//! Ports to external collaborators.
//!
//! The engine never touches the filesystem or spawns processes; callers
//! inject these interfaces instead. The CLI crate provides the real
//! implementations (a JSON file loader and a Graphviz adapter); tests supply
//! in-memory fakes.

use std::path::Path;

use crate::error::{CommandError, Error, ValidationError};
use crate::model::WorkItem;

/// Supplies the raw work-item list from wherever it is stored.
pub trait ItemSource {
    /// Load all work items.
    ///
    /// # Errors
    ///
    /// [`Error::FileOperation`] when the channel fails (unreadable or
    /// unparsable source), [`Error::Validation`] when the content is not a
    /// collection of item records.
    fn load(&self) -> Result<Vec<WorkItem>, Error>;
}

/// Output formats the external renderer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    /// The format name passed to the external tool (`-T<name>`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// Turns DOT text into an image file. Implementations run an external tool
/// under an explicit timeout and classify failures as not-found, non-zero
/// exit, or timeout.
pub trait ImageRenderer {
    /// Render `graph_text` to `output` in the given format.
    ///
    /// # Errors
    ///
    /// A [`CommandError`] describing which way the external tool failed.
    fn render(
        &self,
        graph_text: &str,
        format: ImageFormat,
        output: &Path,
    ) -> Result<(), CommandError>;
}

/// Validate DOT text and hand it to the renderer.
///
/// The emptiness check happens *before* the external tool is invoked, so a
/// blank graph never reaches it.
///
/// # Errors
///
/// [`Error::Validation`] for blank text; [`Error::Command`] when the
/// renderer itself fails.
pub fn render_image(
    renderer: &dyn ImageRenderer,
    graph_text: &str,
    format: ImageFormat,
    output: &Path,
) -> Result<(), Error> {
    if graph_text.trim().is_empty() {
        return Err(ValidationError::EmptyGraphText.into());
    }
    renderer.render(graph_text, format, output)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
