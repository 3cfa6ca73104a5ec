//! # hueshift-view
//!
//! Interactive viewer for hue remapping.
//!
//! Features:
//! - Input dial: drag the start/end handles to select a hue arc
//! - Output dial: drag the needle to pick the target hue
//! - Palette dots for the dominant saturated colors of the image
//! - CPU / GPU backend toggle (GPU re-renders while dragging, CPU on release)
//! - Drag & drop, persistent settings
//!
//! # Quick Start
//!
//! ```ignore
//! use hueshift_view::{run, ViewerConfig};
//!
//! let exit_code = run("image.png", ViewerConfig::default());
//! ```
//!
//! # Keyboard Shortcuts
//!
//! | Key | Action |
//! |-----|--------|
//! | `O` | Open file |
//! | `Esc` | Exit |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod app;
mod dial;
mod state;

pub use app::{ViewerApp, ViewerConfig};
pub use state::{BackendChoice, DialEdit, ViewerPersistence, ViewerState};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Run the viewer with an optional initial file.
///
/// Without a path, reopens the last file from persistence if it still exists.
/// Returns the process exit code: 0 for success, 1 for error.
pub fn run_opt(path: Option<PathBuf>, config: ViewerConfig) -> i32 {
    let resolved_path = path.or_else(|| {
        load_persistence().and_then(|p| p.last_file).filter(|f| f.exists())
    });

    if config.verbose > 0 {
        match &resolved_path {
            Some(p) => eprintln!("[viewer] Starting: {}", p.display()),
            None => eprintln!("[viewer] Starting empty viewer"),
        }
    }

    run_internal(resolved_path, config)
}

/// Run the viewer on `path`.
///
/// Returns 1 without opening a window if the file does not exist.
pub fn run<P: AsRef<Path>>(path: P, config: ViewerConfig) -> i32 {
    let path = path.as_ref();
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        return 1;
    }
    run_internal(Some(path.to_path_buf()), config)
}

fn window_title(path: Option<&Path>) -> String {
    path.and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .map(|n| format!("hueshift - {n}"))
        .unwrap_or_else(|| "hueshift".into())
}

fn run_internal(path: Option<PathBuf>, config: ViewerConfig) -> i32 {
    let title = window_title(path.as_deref());
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 520.0])
            .with_drag_and_drop(true),
        persistence_path: persistence_path(),
        ..Default::default()
    };

    let verbose = config.verbose;
    let result = eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, path, config)))),
    );

    match result {
        Ok(()) => {
            if verbose > 0 {
                eprintln!("[viewer] Exited normally");
            }
            0
        }
        Err(e) => {
            eprintln!("Viewer error: {e}");
            1
        }
    }
}

/// Platform-specific persistence file.
fn persistence_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hueshift").join("viewer").join("app.ron"))
}

fn load_persistence() -> Option<ViewerPersistence> {
    load_persistence_from(&persistence_path()?)
}

/// Read viewer settings from an eframe storage file (a RON map of RON strings).
fn load_persistence_from(path: &Path) -> Option<ViewerPersistence> {
    let text = std::fs::read_to_string(path).ok()?;
    let map: HashMap<String, String> = ron::from_str(&text).ok()?;
    ron::from_str(map.get(app::STORAGE_KEY)?).ok()
}
