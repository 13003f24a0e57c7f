use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::lead_id::date_stamp;

/// Counter shared between request handlers.
///
/// `SequenceCounter` itself is not synchronised; every generation must hold
/// the lock for the whole read-reset-increment step.
pub type SharedSequence = Arc<Mutex<SequenceCounter>>;

/// Daily sequence counter for Lead IDs.
///
/// The count is scoped to a `YYMMDD` date stamp and starts over from zero
/// whenever a different date stamp is requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceCounter {
    date: String,
    count: u64,
}

/// Serialisable snapshot of a `SequenceCounter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceState {
    pub date_stamp: String,
    pub count: u64,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a fresh counter for use across handlers.
    pub fn shared() -> SharedSequence {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Date stamp the current count belongs to (empty before first use).
    pub fn date_stamp(&self) -> &str {
        &self.date
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn state(&self) -> SequenceState {
        SequenceState {
            date_stamp: self.date.clone(),
            count: self.count,
        }
    }

    /// Returns the next sequence number for `date_stamp`.
    ///
    /// Saturates at `u64::MAX` instead of wrapping back to low numbers.
    pub fn next(&mut self, date_stamp: &str) -> u64 {
        if self.date != date_stamp {
            self.date = date_stamp.to_string();
            self.count = 0;
        }
        self.count = self.count.saturating_add(1);
        self.count
    }

    /// Restores the counter from IDs that are already persisted.
    ///
    /// Only IDs whose date segment equals `today` contribute; the counter is
    /// set to the highest sequence found among them. An empty list leaves the
    /// counter untouched, and a count already held for `today` never goes
    /// backwards.
    pub fn initialize<I, S>(&mut self, existing_ids: I, today: NaiveDate)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let today_stamp = date_stamp(today);
        let mut seen_any = false;
        let mut max_seq = 0;

        for id in existing_ids {
            seen_any = true;
            let id = id.as_ref();
            if id.is_empty() {
                continue;
            }

            let parts: Vec<&str> = id.split('-').collect();
            if parts.len() < 5 || parts[3] != today_stamp {
                continue;
            }

            if let Some(seq) = leading_number(parts[4]) {
                max_seq = max_seq.max(seq);
            }
        }

        if !seen_any {
            return;
        }

        if self.date == today_stamp {
            max_seq = max_seq.max(self.count);
        }
        self.date = today_stamp;
        self.count = max_seq;

        tracing::info!(
            "📊 Lead ID sequence initialized: {} @ {}",
            self.date,
            self.count
        );
    }
}

/// Parses the leading run of ASCII digits ("005x" -> 5), clamping values
/// too large for a `u64`.
fn leading_number(segment: &str) -> Option<u64> {
    let digits: String = segment
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Initializes `counter` against the local calendar date.
pub fn initialize_sequence<I, S>(counter: &mut SequenceCounter, existing_ids: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    counter.initialize(existing_ids, chrono::Local::now().date_naive());
}
