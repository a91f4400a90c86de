//! Engine configuration.

/// Options fixed at engine construction.
///
/// ```ignore
/// let engine = Engine::with_config(backend, modules, Config {
///     check_duplicate_keys: true,
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Warn when a new sibling list repeats a key. Duplicate keys stay
    /// undefined behavior; this only reports them. Defaults to on in debug
    /// builds.
    pub check_duplicate_keys: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            check_duplicate_keys: cfg!(debug_assertions),
        }
    }
}
