//! View command - interactive hue remap viewer.

use anyhow::Result;
use hueshift_view::{BackendChoice, ViewerConfig};
use tracing::trace;

use crate::ViewArgs;

/// Run the view command.
pub fn run(args: ViewArgs, verbose: u8) -> Result<()> {
    trace!(input = ?args.input, cpu = args.cpu, "view::run");

    let config = ViewerConfig {
        backend: args.cpu.then_some(BackendChoice::Cpu),
        verbose,
    };

    let exit_code = hueshift_view::run_opt(args.input, config);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
