use std::sync::Arc;

use services::PracticeService;

pub trait UiApp: Send + Sync {
    fn practice(&self) -> Arc<PracticeService>;
}

#[derive(Clone)]
pub struct AppContext {
    practice: Arc<PracticeService>,
    tutor_enabled: bool,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let practice = app.practice();
        let tutor_enabled = practice.tutor_enabled();
        Self {
            practice,
            tutor_enabled,
        }
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    /// Whether an API key was configured at launch.
    #[must_use]
    pub fn tutor_enabled(&self) -> bool {
        self.tutor_enabled
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
