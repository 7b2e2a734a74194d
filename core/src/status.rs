//! Shared status indicator and generate-trigger state.

use std::fmt;

pub const OUTLINE_IN_PROGRESS: &str = "Generating outline...";
pub const GENERATION_IN_PROGRESS: &str = "Generating presentation...";
pub const DOWNLOAD_STARTED: &str = "Download started";
pub const GENERATE_LABEL: &str = "Generate PPT";
pub const GENERATING_LABEL: &str = "Generating...";

pub fn outline_summary(total: usize) -> String {
    format!("Outline {total} slides")
}

type StatusSink = Box<dyn FnMut(&str) + Send>;

/// Single status line. Every write replaces the previous text and is
/// forwarded to the sink, if any.
#[derive(Default)]
pub struct StatusReporter {
    current: String,
    sink: Option<StatusSink>,
}

impl StatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: impl FnMut(&str) + Send + 'static) -> Self {
        Self {
            current: String::new(),
            sink: Some(Box::new(sink)),
        }
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.current = text.into();
        tracing::debug!(status = %self.current, "status changed");
        if let Some(sink) = self.sink.as_mut() {
            sink(&self.current);
        }
    }

    pub fn clear(&mut self) {
        self.set(String::new());
    }

    pub fn current(&self) -> &str {
        &self.current
    }
}

impl fmt::Debug for StatusReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusReporter")
            .field("current", &self.current)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

/// Enabled flag and label of the generate trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerControl {
    pub enabled: bool,
    pub label: String,
}

impl Default for TriggerControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: GENERATE_LABEL.to_string(),
        }
    }
}

/// Holds the trigger disabled for as long as it lives.
///
/// Dropping the guard re-enables the control and restores its label, so every
/// exit path (including unwinding) leaves the control usable.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    control: &'a mut TriggerControl,
    idle_label: String,
}

impl<'a> BusyGuard<'a> {
    /// Returns `None` when the control is already disabled.
    pub fn acquire(control: &'a mut TriggerControl, busy_label: &str) -> Option<Self> {
        if !control.enabled {
            return None;
        }
        let idle_label = std::mem::replace(&mut control.label, busy_label.to_string());
        control.enabled = false;
        Some(Self {
            control,
            idle_label,
        })
    }

    pub fn control(&self) -> &TriggerControl {
        &*self.control
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.control.enabled = true;
        self.control.label = std::mem::take(&mut self.idle_label);
    }
}

/// Mutable interface state shared by both workflows.
#[derive(Debug, Default)]
pub struct WorkflowState {
    pub status: StatusReporter,
    pub generate_control: TriggerControl,
}

impl WorkflowState {
    pub fn new(status: StatusReporter) -> Self {
        Self {
            status,
            generate_control: TriggerControl::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_status_overwrites_and_forwards() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let mut status = StatusReporter::with_sink(move |text| {
            sink_seen.lock().unwrap().push(text.to_string());
        });

        status.set(OUTLINE_IN_PROGRESS);
        status.set(outline_summary(3));
        status.clear();

        assert_eq!(status.current(), "");
        assert_eq!(
            *seen.lock().unwrap(),
            vec![OUTLINE_IN_PROGRESS, "Outline 3 slides", ""]
        );
    }

    #[test]
    fn test_guard_disables_then_restores() {
        let mut control = TriggerControl::default();
        {
            let guard = BusyGuard::acquire(&mut control, GENERATING_LABEL).unwrap();
            assert!(!guard.control().enabled);
            assert_eq!(guard.control().label, GENERATING_LABEL);
        }
        assert_eq!(control, TriggerControl::default());
    }

    #[test]
    fn test_guard_refuses_when_busy() {
        let mut control = TriggerControl {
            enabled: false,
            label: GENERATING_LABEL.to_string(),
        };
        assert!(BusyGuard::acquire(&mut control, GENERATING_LABEL).is_none());
        assert!(!control.enabled);
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        fn failing(control: &mut TriggerControl) -> Result<(), &'static str> {
            let _busy = BusyGuard::acquire(control, GENERATING_LABEL).ok_or("busy")?;
            Err("request failed")
        }

        let mut control = TriggerControl::default();
        assert!(failing(&mut control).is_err());
        assert!(control.enabled);
        assert_eq!(control.label, GENERATE_LABEL);
    }
}
