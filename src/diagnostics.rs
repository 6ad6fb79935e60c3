//! Operator-facing diagnostics.
//!
//! Non-fatal platform failures are reported as one `[tightloop]`-prefixed
//! line on stderr and never surface as errors. Set `TIGHTLOOP_DEBUG=1` to
//! also echo run progress there; structured events go through `tracing`
//! regardless.

use std::fmt;
use std::io::{self, Write};

/// Prefix for every diagnostic line.
pub const PREFIX: &str = "[tightloop]";

/// Write one diagnostic line to `out`, ignoring write failures.
pub fn warn_to<W: Write + ?Sized>(out: &mut W, args: fmt::Arguments<'_>) {
    let _ = writeln!(out, "{PREFIX} {args}");
}

/// Write one diagnostic line to stderr.
///
/// The same message is emitted as a `debug` event, so a subscriber writing to
/// stderr at the usual levels does not print it twice.
pub fn warn(args: fmt::Arguments<'_>) {
    tracing::debug!(target: "tightloop", "{}", args);
    warn_to(&mut io::stderr().lock(), args);
}

/// Whether progress lines should be echoed to stderr.
pub fn debug_enabled() -> bool {
    matches!(
        std::env::var("TIGHTLOOP_DEBUG").as_deref(),
        Ok("1") | Ok("true")
    )
}
