use std::time::Duration;

/// Fixed pause taken before each GitHub request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Throttle(Duration);

impl Throttle {
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.0
    }

    pub fn wait(&self) {
        if !self.0.is_zero() {
            std::thread::sleep(self.0);
        }
    }
}
