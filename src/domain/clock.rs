use time::OffsetDateTime;

/// Source of the current instant for token issuance and expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}
