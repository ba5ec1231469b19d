//! Text renderings of an analyzed snapshot.
//!
//! Two textual outputs: the ASCII level report ([`ascii`]) and the DOT
//! graph-description ([`dot`]). Image generation is *not* done here — the
//! DOT text is handed to an [`crate::ports::ImageRenderer`].

pub mod ascii;
pub mod dot;

pub use ascii::render_report;
pub use dot::render_dot;
