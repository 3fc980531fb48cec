//! Loading screen: typewriter label plus the fixed-delay gate that holds
//! back the rest of the page.

use std::time::Duration;

use folio_types::PreloaderConfig;

/// Reveals a label one character per tick.
#[derive(Debug, Clone)]
pub struct Typewriter {
    label: String,
    /// Byte offset of the revealed prefix; always on a char boundary.
    revealed: usize,
}

impl Typewriter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            revealed: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.label[..self.revealed]
    }

    pub fn is_done(&self) -> bool {
        self.revealed >= self.label.len()
    }

    /// Reveal the next character. Returns false once the label is complete.
    pub fn tick(&mut self) -> bool {
        match self.label[self.revealed..].chars().next() {
            Some(c) => {
                self.revealed += c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Show the whole label at once (reduced motion).
    pub fn finish(&mut self) {
        self.revealed = self.label.len();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadPhase {
    /// Label typing, gate not yet reached
    Typing,
    /// `loaded` class applied, waiting for the CSS transition
    FadingOut,
    Done,
}

/// Gate that runs registered callbacks once the loading screen is gone.
pub struct Preloader {
    phase: PreloadPhase,
    typewriter: Typewriter,
    char_interval: Duration,
    gate: Duration,
    fade_out: Duration,
    callbacks: Vec<Box<dyn FnOnce()>>,
}

impl Preloader {
    pub fn new(config: &PreloaderConfig) -> Self {
        Self {
            phase: PreloadPhase::Typing,
            typewriter: Typewriter::new(config.label.clone()),
            char_interval: Duration::from_millis(config.char_interval_ms.into()),
            gate: Duration::from_millis(config.gate_ms.into()),
            fade_out: Duration::from_millis(config.fade_out_ms.into()),
            callbacks: Vec::new(),
        }
    }

    pub fn phase(&self) -> PreloadPhase {
        self.phase
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn typewriter_mut(&mut self) -> &mut Typewriter {
        &mut self.typewriter
    }

    pub fn char_interval(&self) -> Duration {
        self.char_interval
    }

    pub fn gate(&self) -> Duration {
        self.gate
    }

    pub fn fade_out(&self) -> Duration {
        self.fade_out
    }

    /// Register a callback for completion. Callbacks registered after
    /// completion run immediately.
    pub fn on_complete(&mut self, callback: impl FnOnce() + 'static) {
        if self.phase == PreloadPhase::Done {
            callback();
        } else {
            self.callbacks.push(Box::new(callback));
        }
    }

    /// The gate delay elapsed.
    pub fn gate_elapsed(&mut self) {
        if self.phase == PreloadPhase::Typing {
            self.phase = PreloadPhase::FadingOut;
        }
    }

    /// The fade-out finished: run callbacks in registration order.
    pub fn complete(&mut self) {
        if self.phase == PreloadPhase::Done {
            return;
        }
        self.phase = PreloadPhase::Done;
        tracing::debug!(callbacks = self.callbacks.len(), "Preloader complete");
        for callback in self.callbacks.drain(..) {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_typewriter_reveals_one_char_per_tick() {
        let mut tw = Typewriter::new("Hi!");
        assert_eq!(tw.text(), "");
        assert!(tw.tick());
        assert_eq!(tw.text(), "H");
        assert!(tw.tick());
        assert!(tw.tick());
        assert_eq!(tw.text(), "Hi!");
        assert!(tw.is_done());
        assert!(!tw.tick());
    }

    #[test]
    fn test_typewriter_respects_char_boundaries() {
        let mut tw = Typewriter::new("né✓");
        tw.tick();
        tw.tick();
        assert_eq!(tw.text(), "né");
        tw.tick();
        assert_eq!(tw.text(), "né✓");
    }

    #[test]
    fn test_timings_from_config() {
        let preloader = Preloader::new(&PreloaderConfig::default());
        assert_eq!(preloader.gate(), Duration::from_millis(2500));
        assert_eq!(preloader.char_interval(), Duration::from_millis(100));
        assert_eq!(preloader.fade_out(), Duration::from_millis(500));
    }

    #[test]
    fn test_callbacks_run_in_order_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut preloader = Preloader::new(&PreloaderConfig::default());

        for n in 0..3 {
            let log = log.clone();
            preloader.on_complete(move || log.borrow_mut().push(n));
        }
        preloader.gate_elapsed();
        assert_eq!(preloader.phase(), PreloadPhase::FadingOut);
        assert!(log.borrow().is_empty());

        preloader.complete();
        preloader.complete();
        assert_eq!(*log.borrow(), vec![0, 1, 2]);

        let late = log.clone();
        preloader.on_complete(move || late.borrow_mut().push(9));
        assert_eq!(*log.borrow(), vec![0, 1, 2, 9]);
    }
}
