/// Flat key-value persistence, the shape of browser-local storage.
///
/// Injected into anything that persists state so tests can hand in an
/// in-memory fake. Semantics are single-writer, last-write-wins; values are
/// opaque strings (JSON where structured).
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}
