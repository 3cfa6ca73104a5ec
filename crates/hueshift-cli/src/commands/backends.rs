//! Backends command - report compute backend availability.

use anyhow::Result;
use hueshift_compute::{describe_backends, select_best_backend};
use tracing::trace;

pub fn run(verbose: u8) -> Result<()> {
    trace!("backends::run");
    print!("{}", describe_backends());
    if verbose > 0 {
        println!("auto selects: {}", select_best_backend().name());
    }
    Ok(())
}
