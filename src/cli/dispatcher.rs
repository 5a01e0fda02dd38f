//! Command dispatcher
//!
//! Resolves the requested backend name against the registry and hands the
//! forwarded arguments to the backend it names. The dispatcher never looks
//! inside those arguments.

use clap::CommandFactory;

use crate::backends::registry::Registry;
use crate::cli::args::{BackendInvocation, Cli};
use crate::error::{QuarryError, Result};
use crate::ui as output;

/// Dispatch the parsed CLI to exactly one backend execution.
pub fn dispatch(args: &Cli) -> Result<()> {
    // A bare `quarry` is a usage error, answered before the registry is
    // even built.
    let Some(BackendInvocation::Backend(tokens)) = &args.backend else {
        return usage_error();
    };
    let Some((name, forwarded)) = tokens.split_first() else {
        return usage_error();
    };

    let registry = Registry::discover()?;
    tracing::debug!(backends = registry.len(), "backend registry ready");

    launch(&registry, name, forwarded)
}

fn launch(registry: &Registry, name: &str, forwarded: &[String]) -> Result<()> {
    let Some(descriptor) = registry.lookup(name) else {
        output::info("Available backends:");
        for descriptor in registry.descriptors() {
            output::indent(&format!("{:<10} {}", descriptor.name, descriptor.summary), 1);
        }
        return Err(QuarryError::UnknownBackend {
            name: name.to_string(),
        });
    };

    tracing::debug!(backend = descriptor.name, args = ?forwarded, "resolved backend");

    let mut backend = (descriptor.factory)(forwarded)?;
    backend.run()
}

fn usage_error() -> Result<()> {
    Cli::command().print_help()?;
    Err(QuarryError::Usage)
}

#[cfg(test)]
mod tests;
