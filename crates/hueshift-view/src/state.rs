//! Viewer state and persistence.
//!
//! Stores UI state that persists between sessions via eframe storage, and the
//! dial gesture logic that turns pointer angles into remap edits.

use hueshift_compute::Backend;
use hueshift_core::angle::{pick_handle, Handle};
use hueshift_core::{HueRemap, PaletteEntry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Degrees around a handle that still grab it.
pub const HANDLE_TOLERANCE: f64 = 10.0;

/// Which backend renders the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackendChoice {
    /// CPU kernel; re-renders when a drag ends.
    Cpu,
    /// wgpu fragment pass; re-renders on every drag move.
    #[default]
    Gpu,
}

impl BackendChoice {
    /// Display label for UI.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
        }
    }

    /// Compute backend behind this choice.
    pub const fn backend(self) -> Backend {
        match self {
            Self::Cpu => Backend::Cpu,
            Self::Gpu => Backend::Wgpu,
        }
    }
}

/// A single change to the remap produced by a dial gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialEdit {
    /// New arc start.
    Start(f64),
    /// New arc end.
    End(f64),
    /// New output hue.
    Output(f64),
}

/// Persistent viewer settings (saved between sessions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerPersistence {
    /// Last opened file path.
    pub last_file: Option<PathBuf>,
    /// Last remap angles.
    pub remap: HueRemap,
    /// Last used backend.
    pub backend: BackendChoice,
}

impl Default for ViewerPersistence {
    fn default() -> Self {
        Self {
            last_file: None,
            remap: HueRemap::default(),
            backend: BackendChoice::default(),
        }
    }
}

/// Runtime viewer state.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    /// Current remap; mirrored into the renderer on every edit.
    pub remap: HueRemap,
    /// Active backend.
    pub backend: BackendChoice,
    /// Image file path.
    pub image_path: Option<PathBuf>,
    /// Image dimensions.
    pub image_dims: Option<(u32, u32)>,
    /// Dominant colors of the loaded image.
    pub palette: Vec<PaletteEntry>,
    /// Input dial handle held by the current drag.
    pub grabbed: Option<Handle>,
}

impl ViewerState {
    /// Creates state from persistence and CLI args.
    pub fn from_persistence(persistence: &ViewerPersistence, backend_override: Option<BackendChoice>) -> Self {
        Self {
            remap: persistence.remap,
            backend: backend_override.unwrap_or(persistence.backend),
            ..Default::default()
        }
    }

    /// Converts to persistence for saving.
    pub fn to_persistence(&self) -> ViewerPersistence {
        ViewerPersistence {
            last_file: self.image_path.clone(),
            remap: self.remap,
            backend: self.backend,
        }
    }

    /// Press on the input dial: grab the nearer handle if within tolerance.
    pub fn press_input(&mut self, angle: f64) -> Option<Handle> {
        self.grabbed = pick_handle(angle, &self.remap.arc, HANDLE_TOLERANCE);
        self.grabbed
    }

    /// Move on the input dial: drag the grabbed handle, if any.
    pub fn drag_input(&mut self, angle: f64) -> Option<DialEdit> {
        let edit = match self.grabbed? {
            Handle::Start => DialEdit::Start(angle),
            Handle::End => DialEdit::End(angle),
        };
        self.apply(edit);
        Some(edit)
    }

    /// Release on the input dial. True if a handle was being dragged.
    pub fn release_input(&mut self) -> bool {
        self.grabbed.take().is_some()
    }

    /// Press or move on the output dial.
    pub fn set_output(&mut self, angle: f64) -> DialEdit {
        let edit = DialEdit::Output(angle);
        self.apply(edit);
        edit
    }

    /// Apply an edit to the held remap.
    pub fn apply(&mut self, edit: DialEdit) {
        self.remap = match edit {
            DialEdit::Start(a) => self.remap.with_start(a),
            DialEdit::End(a) => self.remap.with_end(a),
            DialEdit::Output(a) => self.remap.with_output(a),
        };
    }

    /// GPU passes are cheap enough to run on every move.
    pub const fn renders_on_move(&self) -> bool {
        matches!(self.backend, BackendChoice::Gpu)
    }
}
