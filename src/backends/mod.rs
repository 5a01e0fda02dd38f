//! Backend contract and built-in implementations.
//!
//! A backend is a named adapter for one external data source. The core only
//! knows the two points of its contract:
//!
//! - a [`BackendDescriptor`] carrying the canonical name and a factory that
//!   builds the command from the raw forwarded tokens, and
//! - the zero-argument [`Backend::run`] entry point invoked once after
//!   construction.
//!
//! Everything else — argument grammar, fetching, pagination, output shape —
//! belongs to the backend itself. Backends parse their forwarded tokens with
//! their own `clap` grammar and emit one JSON document per fetched item on
//! stdout; diagnostics go to the logging layer on stderr.
//!
//! Adding a backend means exporting a `descriptor()` from a new module here
//! and listing it in [`registry::builtin_backends`]. Names must be unique;
//! the registry refuses to start on a duplicate.

pub mod git;
pub mod github;
pub mod registry;

use crate::error::Result;

/// A constructed, ready-to-run backend command.
pub trait Backend {
    /// Perform the fetch. Blocks until the backend is done or fails.
    fn run(&mut self) -> Result<()>;
}

/// Constructor receiving the verbatim forwarded tokens.
pub type BackendFactory = fn(&[String]) -> Result<Box<dyn Backend>>;

/// Registry entry for one backend.
pub struct BackendDescriptor {
    /// Unique canonical identifier, as typed on the command line.
    pub name: &'static str,
    /// One-line description for hint text.
    pub summary: &'static str,
    /// Builds the backend from the forwarded arguments.
    pub factory: BackendFactory,
}

/// Argv for a backend's own parser: the backend name in position zero,
/// then the forwarded tokens unchanged.
pub(crate) fn backend_argv<'a>(
    name: &'static str,
    forwarded: &'a [String],
) -> impl Iterator<Item = String> + 'a {
    std::iter::once(name.to_string()).chain(forwarded.iter().cloned())
}
