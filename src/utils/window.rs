//! Hour-count window filters such as `"12h"`.

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteWindow {
    hours: u32,
}

impl VoteWindow {
    /// Parses `<positive-integer>h`. Anything else yields `None`, which
    /// callers treat as "no time bound".
    pub fn parse(filter: &str) -> Option<Self> {
        let hours = filter.strip_suffix('h')?.parse::<u32>().ok()?;
        (hours > 0).then_some(Self { hours })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    /// Lower bound (exclusive) in epoch milliseconds for a window ending at `now_ms`.
    pub fn since(&self, now_ms: i64) -> i64 {
        now_ms - i64::from(self.hours) * MILLIS_PER_HOUR
    }
}
