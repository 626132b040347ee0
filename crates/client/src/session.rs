//! Session identity provider.
//!
//! Establishes the durable per-browser session identifier that scopes the
//! server-side cart. The identifier is read from a priority-ordered list of
//! storage slots and written to all of them for redundancy; a returning
//! payment redirect can override it wholesale via [`SessionProvider::adopt`].

use std::sync::Arc;

use goal_tickets_core::SessionId;

use crate::storage::KeyValueStorage;

/// Storage key holding the session identifier in every slot.
pub const SESSION_KEY: &str = "cart_session_id";

/// Owns the current session identity and its persistence fan-out.
pub struct SessionProvider {
    slots: Vec<Arc<dyn KeyValueStorage>>,
    current: SessionId,
}

impl SessionProvider {
    /// Resolve the session identifier from `slots`, in priority order.
    ///
    /// The first slot holding a value wins. When no slot has one, a fresh
    /// identifier is generated and written everywhere. With no usable slots
    /// at all this degrades to a fresh identifier per construction.
    #[must_use]
    pub fn new(slots: Vec<Arc<dyn KeyValueStorage>>) -> Self {
        if let Some(existing) = slots.iter().find_map(|slot| slot.load(SESSION_KEY)) {
            return Self {
                slots,
                current: SessionId::from(existing),
            };
        }

        let current = SessionId::generate();
        let provider = Self { slots, current };
        provider.write_all();
        provider
    }

    /// The session identifier in effect.
    #[must_use]
    pub fn current(&self) -> &SessionId {
        &self.current
    }

    /// Switch to `candidate` (a returning-payment override).
    ///
    /// When it differs from the current identifier, every slot is rewritten
    /// and the in-memory identifier switches immediately, so subsequent cart
    /// calls address the correct server-side cart. Returns whether a switch
    /// happened.
    pub fn adopt(&mut self, candidate: SessionId) -> bool {
        if candidate == self.current {
            return false;
        }

        tracing::info!(session_id = %candidate, "Switching to payment session id");
        self.current = candidate;
        self.write_all();
        true
    }

    fn write_all(&self) {
        for slot in &self.slots {
            slot.store(SESSION_KEY, self.current.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn slot() -> Arc<MemoryStorage> {
        Arc::new(MemoryStorage::new())
    }

    #[test]
    fn test_generates_and_persists_when_all_slots_empty() {
        let primary = slot();
        let fallback = slot();
        let provider = SessionProvider::new(vec![primary.clone(), fallback.clone()]);

        let id = provider.current().as_str().to_owned();
        assert!(id.starts_with("session_"));
        assert_eq!(primary.load(SESSION_KEY), Some(id.clone()));
        assert_eq!(fallback.load(SESSION_KEY), Some(id));
    }

    #[test]
    fn test_priority_order_first_hit_wins() {
        let primary = slot();
        let fallback = slot();
        primary.store(SESSION_KEY, "session_1_primary");
        fallback.store(SESSION_KEY, "session_1_fallback");

        let provider = SessionProvider::new(vec![primary, fallback]);
        assert_eq!(provider.current().as_str(), "session_1_primary");
    }

    #[test]
    fn test_fallback_slot_used_when_primary_empty() {
        let primary = slot();
        let fallback = slot();
        fallback.store(SESSION_KEY, "session_1_fallback");

        let provider = SessionProvider::new(vec![primary, fallback]);
        assert_eq!(provider.current().as_str(), "session_1_fallback");
    }

    #[test]
    fn test_identifier_stable_across_reloads() {
        let primary = slot();
        let first = SessionProvider::new(vec![primary.clone()])
            .current()
            .clone();
        let second = SessionProvider::new(vec![primary]).current().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_adopt_overwrites_every_slot() {
        let primary = slot();
        let fallback = slot();
        let mut provider = SessionProvider::new(vec![primary.clone(), fallback.clone()]);

        assert!(provider.adopt(SessionId::new("session_2_returned")));
        assert_eq!(provider.current().as_str(), "session_2_returned");
        assert_eq!(primary.load(SESSION_KEY).as_deref(), Some("session_2_returned"));
        assert_eq!(fallback.load(SESSION_KEY).as_deref(), Some("session_2_returned"));
    }

    #[test]
    fn test_adopt_same_id_is_noop() {
        let mut provider = SessionProvider::new(vec![slot()]);
        let current = provider.current().clone();
        assert!(!provider.adopt(current));
    }

    #[test]
    fn test_no_slots_degrades_to_fresh_identifier() {
        let provider = SessionProvider::new(Vec::new());
        assert!(provider.current().as_str().starts_with("session_"));
    }
}
