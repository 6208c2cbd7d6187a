use gitrelay_core::domain::SurfaceId;
use gitrelay_core::ports::StatusSink;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, warn};

/// Status sink that renders surfaces as structured log lines. Tracks
/// which surfaces are ongoing so stray updates against unknown ids are
/// flagged instead of silently rendered.
pub struct LogSurface {
    ongoing: Mutex<HashMap<SurfaceId, String>>,
}

impl LogSurface {
    pub fn new() -> Self {
        Self {
            ongoing: Mutex::new(HashMap::new()),
        }
    }

    /// Number of surfaces still in the ongoing state.
    pub fn active(&self) -> usize {
        self.ongoing.lock().unwrap().len()
    }
}

impl Default for LogSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for LogSurface {
    fn begin(&self, surface: SurfaceId, title: &str) {
        self.ongoing
            .lock()
            .unwrap()
            .insert(surface, title.to_string());
        info!(%surface, title, "operation started");
    }

    fn update(&self, surface: SurfaceId, text: &str, percent: u8) {
        let ongoing = self.ongoing.lock().unwrap();
        match ongoing.get(&surface) {
            Some(title) => info!(%surface, %title, text, percent, "progress"),
            None => warn!(%surface, text, "update for unknown surface"),
        }
    }

    fn dismiss(&self, surface: SurfaceId) {
        match self.ongoing.lock().unwrap().remove(&surface) {
            Some(title) => info!(%surface, %title, "operation succeeded"),
            None => warn!(%surface, "dismiss for unknown surface"),
        }
    }

    fn fail(&self, surface: SurfaceId, summary: &str) {
        // The failure stays visible: only the ongoing marker is cleared.
        match self.ongoing.lock().unwrap().remove(&surface) {
            Some(title) => warn!(%surface, %title, summary, "operation failed"),
            None => warn!(%surface, summary, "failure for unknown surface"),
        }
    }
}
