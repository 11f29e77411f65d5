//! Locale preference persistence.

use lip_glaze_core::Locale;

use super::Listeners;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Persisted UI language plus its subscribers.
#[derive(Debug)]
pub struct LocaleStore<S> {
    storage: S,
    key: String,
    default: Locale,
    listeners: Listeners<Locale>,
}

impl<S: KeyValueStore> LocaleStore<S> {
    pub fn new(storage: S, key: impl Into<String>, default: Locale) -> Self {
        Self {
            storage,
            key: key.into(),
            default,
            listeners: Listeners::new(),
        }
    }

    /// Register a view to redraw whenever the locale changes.
    pub fn subscribe(&self, listener: impl Fn(&Locale) + 'static) {
        self.listeners.subscribe(listener);
    }

    /// The persisted locale, or the default when absent or unrecognized.
    #[must_use]
    pub fn current(&self) -> Locale {
        match self.storage.get(&self.key) {
            Ok(Some(code)) => code.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Unrecognized stored locale, using default");
                self.default
            }),
            Ok(None) => self.default,
            Err(e) => {
                tracing::warn!(error = %e, "Locale storage unreadable, using default");
                self.default
            }
        }
    }

    /// Persist `locale` and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference cannot be stored.
    pub fn set(&self, locale: Locale) -> Result<()> {
        self.storage.set(&self.key, locale.as_str())?;
        tracing::info!(%locale, "Locale changed");
        self.listeners.notify(&locale);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_when_absent_or_invalid() {
        let storage = MemoryStore::new();
        let locales = LocaleStore::new(storage.clone(), "lang", Locale::En);
        assert_eq!(locales.current(), Locale::En);

        storage.set("lang", "klingon").unwrap();
        assert_eq!(locales.current(), Locale::En);

        let indonesian_first = LocaleStore::new(MemoryStore::new(), "lang", Locale::Id);
        assert_eq!(indonesian_first.current(), Locale::Id);
    }

    #[test]
    fn test_set_persists_and_notifies() {
        let storage = MemoryStore::new();
        let locales = LocaleStore::new(storage.clone(), "lang", Locale::En);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        locales.subscribe(move |l| sink.borrow_mut().push(*l));

        locales.set(Locale::Id).unwrap();

        assert_eq!(storage.raw("lang").as_deref(), Some("id"));
        assert_eq!(*seen.borrow(), vec![Locale::Id]);

        let reloaded = LocaleStore::new(storage, "lang", Locale::En);
        assert_eq!(reloaded.current(), Locale::Id);
    }
}
