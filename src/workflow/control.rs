use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use gpui::SharedString;

#[derive(Clone, Debug, Eq, PartialEq)]
struct SubmitControlState {
    idle_label: SharedString,
    loading_label: SharedString,
    disabled: bool,
}

/// State of the form's submit button. While a [`SubmitGuard`] is alive the
/// control is disabled and shows its loading label; no second guard can be
/// taken.
#[derive(Clone)]
pub struct SubmitControl {
    state: Arc<RwLock<SubmitControlState>>,
}

impl SubmitControl {
    pub fn new(idle_label: impl Into<SharedString>, loading_label: impl Into<SharedString>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SubmitControlState {
                idle_label: idle_label.into(),
                loading_label: loading_label.into(),
                disabled: false,
            })),
        }
    }

    pub fn label(&self) -> SharedString {
        let state = self.read();
        if state.disabled {
            state.loading_label.clone()
        } else {
            state.idle_label.clone()
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.read().disabled
    }

    pub fn set_labels(
        &self,
        idle_label: impl Into<SharedString>,
        loading_label: impl Into<SharedString>,
    ) {
        let mut state = self.write();
        state.idle_label = idle_label.into();
        state.loading_label = loading_label.into();
    }

    /// Disables the control, or returns `None` if it already is.
    pub fn try_begin(&self) -> Option<SubmitGuard> {
        let mut state = self.write();
        if state.disabled {
            return None;
        }
        state.disabled = true;
        Some(SubmitGuard {
            control: self.clone(),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, SubmitControlState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, SubmitControlState> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Re-enables the control and restores its label when dropped, including
/// during unwinding.
#[must_use = "the submit control is re-enabled as soon as the guard is dropped"]
pub struct SubmitGuard {
    control: SubmitControl,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.control.write().disabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_is_exclusive_and_restores_on_drop() {
        let control = SubmitControl::new("Send", "Sending...");
        assert_eq!(control.label().to_string(), "Send");

        let guard = control.try_begin().expect("idle control must be available");
        assert!(control.is_disabled());
        assert_eq!(control.label().to_string(), "Sending...");
        assert!(control.try_begin().is_none());

        drop(guard);
        assert!(!control.is_disabled());
        assert_eq!(control.label().to_string(), "Send");
    }

    #[test]
    fn guard_restores_while_unwinding() {
        let control = SubmitControl::new("Send", "Sending...");
        let inner = control.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = inner.try_begin();
            panic!("endpoint blew up");
        }));
        assert!(result.is_err());
        assert!(!control.is_disabled());
    }
}
