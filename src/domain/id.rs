use super::contact::{ContactId, Utc};
use crate::prelude::AppError;

/// Hands out strictly increasing ids: the current time in milliseconds,
/// bumped past the last id whenever two requests land in the same tick.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Starts above every id already in use.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a ContactId>) -> Self {
        IdGenerator {
            last: existing.into_iter().map(|id| id.0).max().unwrap_or_default(),
        }
    }

    /// Fails once the last id handed out is `u64::MAX`.
    pub fn next_id(&mut self) -> Result<ContactId, AppError> {
        let bumped = self
            .last
            .checked_add(1)
            .ok_or(AppError::IdsExhausted(ContactId(self.last)))?;

        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.last = now.max(bumped);
        Ok(ContactId(self.last))
    }
}
