/// Session-scoped counters for the console status line. Single-writer: only
/// the shell's update loop records into them.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisCounters {
    completed: usize,
    failed: usize,
}

impl AnalysisCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_completed(&mut self) {
        self.completed += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    pub fn snapshot(&self) -> (usize, usize) {
        (self.completed, self.failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_track_both_outcomes() {
        let mut counters = AnalysisCounters::new();
        counters.record_completed();
        counters.record_completed();
        counters.record_failed();
        assert_eq!(counters.snapshot(), (2, 1));
    }
}
