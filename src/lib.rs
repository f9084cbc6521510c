//! whittle - a lossless SVG path data shortener
//!
//! whittle rewrites the `d` attribute mini-language into the shortest text
//! that draws the identical path. It never moves a point, changes a curve,
//! or drops a segment; it only respells command letters and coordinates:
//! absolute commands become relative (or back) when that saves bytes,
//! axis-aligned lines become `H`/`V`, and every number loses its redundant
//! characters.
//!
//! ```
//! assert_eq!(whittle::shorten_str("M10 10 L20 10"), "M10 10H20");
//! ```

mod error;
mod number;
mod path;

pub use error::*;
pub use number::*;
pub use path::*;

/// Shorten path data with a fresh context and the default precision.
///
/// Callers shortening many paths should hold on to a [`PathShortener`]
/// instead, so its scratch buffers get reused.
pub fn shorten(path_data: &[u8]) -> Vec<u8> {
    PathShortener::new().shorten(path_data)
}

/// [`shorten`] for string-typed callers. The output is always ASCII.
pub fn shorten_str(path_data: &str) -> String {
    String::from_utf8_lossy(&shorten(path_data.as_bytes())).into_owned()
}
