use crate::models::Session;

/// Ordered collection of loaded sessions.
///
/// Append order is source enumeration order; `recent(n)` therefore means
/// "last n by load order". Appending only happens during the load phase.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
  sessions: Vec<Session>,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn append(&mut self, session: Session) {
    self.sessions.push(session);
  }

  /// Read-only snapshot in store order
  pub fn all(&self) -> &[Session] {
    &self.sessions
  }

  /// The last `n` sessions, oldest first
  pub fn recent(&self, n: usize) -> &[Session] {
    let start = self.sessions.len().saturating_sub(n);
    &self.sessions[start..]
  }

  pub fn get(&self, index: usize) -> Option<&Session> {
    self.sessions.get(index)
  }

  pub fn len(&self) -> usize {
    self.sessions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.sessions.is_empty()
  }

  /// Drop everything ahead of a full reload
  pub fn reset(&mut self) {
    self.sessions.clear();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::*;

  fn tagged(tag: i64) -> Session {
    session_from(vec![time_event(tag)])
  }

  #[test]
  fn test_append_preserves_order() {
    let mut store = SessionStore::new();
    for tag in 0..4 {
      store.append(tagged(tag));
    }
    let tags: Vec<Option<i64>> = store.all().iter().map(|s| s.events[0].start_time).collect();
    assert_eq!(tags, vec![Some(0), Some(1), Some(2), Some(3)]);
  }

  #[test]
  fn test_recent_returns_tail() {
    let mut store = SessionStore::new();
    for tag in 0..7 {
      store.append(tagged(tag));
    }
    let recent = store.recent(5);
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].events[0].start_time, Some(2));
    assert_eq!(recent[4].events[0].start_time, Some(6));
  }

  #[test]
  fn test_recent_larger_than_store() {
    let mut store = SessionStore::new();
    store.append(tagged(0));
    assert_eq!(store.recent(5).len(), 1);
    assert!(SessionStore::new().recent(5).is_empty());
    assert!(store.recent(0).is_empty());
  }

  #[test]
  fn test_reset_empties_store() {
    let mut store = SessionStore::new();
    store.append(tagged(0));
    store.reset();
    assert!(store.is_empty());
    assert!(store.get(0).is_none());
  }
}
