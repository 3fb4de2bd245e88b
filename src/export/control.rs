//! Busy state of the export trigger.

/// A control that can be disabled while an export is running.
pub trait BusyControl {
    fn set_busy(&self, busy: bool, label: &str);
}

/// Marks a control busy on creation and restores it when dropped, on every
/// path out of the export.
pub struct BusyGuard<C: BusyControl> {
    control: C,
    idle_label: String,
}

impl<C: BusyControl> BusyGuard<C> {
    pub fn new(control: C, busy_label: &str, idle_label: &str) -> Self {
        control.set_busy(true, busy_label);
        Self {
            control,
            idle_label: idle_label.to_string(),
        }
    }
}

impl<C: BusyControl> Drop for BusyGuard<C> {
    fn drop(&mut self) {
        self.control.set_busy(false, &self.idle_label);
    }
}
