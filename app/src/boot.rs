//! Page bootstrap gate.
//!
//! Sections render immediately underneath the loading screen but hold their
//! animations and listeners until the preloader completes. Sections then
//! start in render order, which follows `BOOT_ORDER`.

use dioxus::prelude::*;
use folio_core::bootstrap::Section;

#[derive(Clone, Copy)]
pub struct BootGate {
    ready: Signal<bool>,
}

impl BootGate {
    pub fn new() -> Self {
        Self {
            ready: Signal::new(false),
        }
    }

    /// Reactive: effects reading this re-run when the gate opens.
    pub fn is_ready(&self) -> bool {
        *self.ready.read()
    }

    pub fn open(&mut self) {
        if !*self.ready.peek() {
            tracing::info!("Preloader finished, starting sections");
            self.ready.set(true);
        }
    }

    /// Log a section start once the gate is open.
    pub fn started(&self, section: Section) {
        tracing::debug!(?section, "Section initialized");
    }
}

impl Default for BootGate {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_boot_gate() -> BootGate {
    use_context::<BootGate>()
}
