use std::time::{Duration, Instant};

/// One debounced input: the value being typed (`pending`) and the value the
/// rest of the engine sees (`committed`). Every edit restarts the quiet
/// window; `poll` commits once the window has elapsed.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    pending: T,
    committed: T,
    deadline: Option<Instant>,
    delay: Duration,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            pending: initial.clone(),
            committed: initial,
            deadline: None,
            delay,
        }
    }

    pub fn set(&mut self, value: T, now: Instant) {
        self.deadline = if value == self.committed {
            None
        } else {
            Some(now + self.delay)
        };
        self.pending = value;
    }

    /// Commits the pending value if its window has elapsed. Returns whether
    /// the committed value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => self.commit(),
            _ => false,
        }
    }

    /// Commits immediately, regardless of the window.
    pub fn flush(&mut self) -> bool {
        self.commit()
    }

    pub fn pending(&self) -> &T {
        &self.pending
    }

    pub fn committed(&self) -> &T {
        &self.committed
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    fn commit(&mut self) -> bool {
        self.deadline = None;
        if self.pending == self.committed {
            return false;
        }
        self.committed = self.pending.clone();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn test_commits_after_quiet_window() {
        let start = Instant::now();
        let mut name = Debounced::new(String::new(), WINDOW);

        name.set("rep".to_string(), start);
        assert!(!name.poll(start + Duration::from_millis(499)));
        assert_eq!(name.committed(), "");
        assert_eq!(name.pending(), "rep");

        assert!(name.poll(start + WINDOW));
        assert_eq!(name.committed(), "rep");
        assert!(name.deadline().is_none());
    }

    #[test]
    fn test_each_edit_restarts_window() {
        let start = Instant::now();
        let mut name = Debounced::new(String::new(), WINDOW);

        name.set("r".to_string(), start);
        name.set("re".to_string(), start + Duration::from_millis(400));
        assert!(!name.poll(start + Duration::from_millis(600)));
        assert!(name.poll(start + Duration::from_millis(900)));
        assert_eq!(name.committed(), "re");
    }

    #[test]
    fn test_reverting_cancels_pending_commit() {
        let start = Instant::now();
        let mut name = Debounced::new("a".to_string(), WINDOW);

        name.set("ab".to_string(), start);
        name.set("a".to_string(), start + Duration::from_millis(100));
        assert!(name.deadline().is_none());
        assert!(!name.poll(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_flush_commits_immediately() {
        let mut name = Debounced::new(String::new(), WINDOW);
        name.set("report".to_string(), Instant::now());
        assert!(name.flush());
        assert_eq!(name.committed(), "report");
        assert!(!name.flush());
    }
}
