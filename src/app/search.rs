// src/app/search.rs — debounced search input
use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Raw keystroke buffer with a single quiet-period deadline.
///
/// The buffer is what the text box edits every frame; the committed query
/// lives in `FilterState` and only changes when `poll` reports a commit.
/// Driven by explicit `Instant`s so the frame loop (and tests) own time.
#[derive(Debug, Default)]
pub struct SearchDebounce {
    buffer: String,
    deadline: Option<Instant>,
}

impl SearchDebounce {
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Restart the quiet period; every keystroke lands here.
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + SEARCH_DEBOUNCE);
    }

    /// Immediate wipe (reset / leaving search mode) — never debounced, so the
    /// visible input reflects the reset without delay.
    pub fn clear_now(&mut self) {
        self.buffer.clear();
        self.deadline = None;
    }

    /// Time left before the pending commit, for scheduling a wake-up frame.
    pub fn time_until_deadline(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// If the quiet period elapsed and the trimmed buffer differs from the
    /// trimmed committed query, hand back the text to commit. At most one
    /// commit per deadline.
    pub fn poll(&mut self, now: Instant, committed: &str) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                let trimmed = self.buffer.trim();
                if trimmed == committed.trim() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use std::time::Instant;

    use super::{SearchDebounce, SEARCH_DEBOUNCE};

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn commits_only_after_the_quiet_period() {
        let t0 = Instant::now();
        let mut d = SearchDebounce::default();

        // keystrokes at 0, 50, 100, 250 ms building "matrix"
        for (offset, text) in [(0, "m"), (50, "mat"), (100, "matr"), (250, "matrix")] {
            let now = t0 + MS * offset;
            d.buffer_mut().clear();
            d.buffer_mut().push_str(text);
            d.touch(now);
        }

        // quiet period restarts from the LAST keystroke
        assert_eq!(d.poll(t0 + MS * 250 + SEARCH_DEBOUNCE - MS, ""), None);

        let commit_at = t0 + MS * 250 + SEARCH_DEBOUNCE;
        assert_eq!(d.poll(commit_at, ""), Some("matrix".to_string()));

        // exactly one commit per deadline
        assert_eq!(d.poll(commit_at + MS * 100, ""), None);
    }

    #[test]
    fn identical_text_does_not_recommit() {
        let t0 = Instant::now();
        let mut d = SearchDebounce::default();
        d.buffer_mut().push_str("  matrix ");
        d.touch(t0);

        // trimmed buffer equals the trimmed committed query: nothing to do
        assert_eq!(d.poll(t0 + SEARCH_DEBOUNCE, "matrix"), None);
    }

    #[test]
    fn emptied_buffer_commits_an_unset_query() {
        let t0 = Instant::now();
        let mut d = SearchDebounce::default();
        d.buffer_mut().push_str("matrix");
        d.touch(t0);
        let _ = d.poll(t0 + SEARCH_DEBOUNCE, "");

        d.buffer_mut().clear();
        d.touch(t0 + SEARCH_DEBOUNCE + MS);
        assert_eq!(
            d.poll(t0 + SEARCH_DEBOUNCE * 2 + MS, "matrix"),
            Some(String::new())
        );
    }

    #[test]
    fn clear_now_is_immediate_and_cancels_the_deadline() {
        let t0 = Instant::now();
        let mut d = SearchDebounce::default();
        d.buffer_mut().push_str("mat");
        d.touch(t0);

        d.clear_now();
        assert_eq!(d.buffer(), "");
        assert_eq!(d.time_until_deadline(t0), None);
        assert_eq!(d.poll(t0 + SEARCH_DEBOUNCE * 2, "previous"), None);
    }
}
