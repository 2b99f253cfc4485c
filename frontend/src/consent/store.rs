use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::bus::{EventBus, SiteEvent};
use crate::config::{CONSENT_GIVEN_KEY, COOKIE_SETTINGS_KEY};
use crate::consent::storage::PreferenceStorage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CookieCategory {
    Essential,
    Analytics,
    Marketing,
}

impl CookieCategory {
    pub const ALL: [CookieCategory; 3] = [
        CookieCategory::Essential,
        CookieCategory::Analytics,
        CookieCategory::Marketing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CookieCategory::Essential => "Essential",
            CookieCategory::Analytics => "Analytics",
            CookieCategory::Marketing => "Marketing",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CookieCategory::Essential => "Required for sign-in, security and remembering this choice.",
            CookieCategory::Analytics => "Anonymous usage statistics that help us improve the site.",
            CookieCategory::Marketing => "Lets partners measure campaigns and show relevant offers.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieSettings {
    pub essential: bool,
    pub analytics: bool,
    pub marketing: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            essential: true,
            analytics: false,
            marketing: false,
        }
    }
}

impl CookieSettings {
    pub fn get(&self, category: CookieCategory) -> bool {
        match category {
            CookieCategory::Essential => self.essential,
            CookieCategory::Analytics => self.analytics,
            CookieCategory::Marketing => self.marketing,
        }
    }

    fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(essential) = patch.essential {
            self.essential = essential;
        }
        if let Some(analytics) = patch.analytics {
            self.analytics = analytics;
        }
        if let Some(marketing) = patch.marketing {
            self.marketing = marketing;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsentRecord {
    pub settings: CookieSettings,
    pub has_chosen: bool,
}

/// Partial update; `None` leaves the current value alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub essential: Option<bool>,
    pub analytics: Option<bool>,
    pub marketing: Option<bool>,
}

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, category: CookieCategory, enabled: bool) -> Self {
        match category {
            CookieCategory::Essential => self.essential = Some(enabled),
            CookieCategory::Analytics => self.analytics = Some(enabled),
            CookieCategory::Marketing => self.marketing = Some(enabled),
        }
        self
    }

    pub fn analytics(self, enabled: bool) -> Self {
        self.set(CookieCategory::Analytics, enabled)
    }

    pub fn marketing(self, enabled: bool) -> Self {
        self.set(CookieCategory::Marketing, enabled)
    }

    pub fn from_settings(settings: CookieSettings) -> Self {
        Self {
            essential: Some(settings.essential),
            analytics: Some(settings.analytics),
            marketing: Some(settings.marketing),
        }
    }
}

/// Cookie consent preferences for the page session.
///
/// The store mirrors the persisted record in memory and is the only writer
/// while the page is open. Every mutation persists the full record and then
/// publishes [`SiteEvent::ConsentChanged`] so all consumers converge on the
/// same value. Persistence is best effort: failures are logged and the
/// mirror keeps serving the latest choice.
#[derive(Clone)]
pub struct ConsentStore {
    storage: Rc<dyn PreferenceStorage>,
    bus: EventBus,
    current: Rc<RefCell<ConsentRecord>>,
}

impl ConsentStore {
    pub fn new(storage: Rc<dyn PreferenceStorage>, bus: EventBus) -> Self {
        let current = load_record(storage.as_ref());
        Self {
            storage,
            bus,
            current: Rc::new(RefCell::new(current)),
        }
    }

    pub fn get_settings(&self) -> ConsentRecord {
        *self.current.borrow()
    }

    pub fn is_enabled(&self, category: CookieCategory) -> bool {
        self.current.borrow().settings.get(category)
    }

    pub fn update_settings(&self, patch: SettingsPatch) -> ConsentRecord {
        let record = {
            let mut current = self.current.borrow_mut();
            current.settings.apply(&patch);
            current.has_chosen = true;
            *current
        };
        self.persist(&record);
        info!(
            "cookie preferences saved (analytics: {}, marketing: {})",
            record.settings.analytics, record.settings.marketing
        );
        self.bus.publish(SiteEvent::ConsentChanged(record));
        record
    }

    pub fn accept_all(&self) -> ConsentRecord {
        self.update_settings(SettingsPatch::new().analytics(true).marketing(true))
    }

    pub fn reject_optional(&self) -> ConsentRecord {
        self.update_settings(SettingsPatch::new().analytics(false).marketing(false))
    }

    pub fn reset_consent(&self) {
        for key in [CONSENT_GIVEN_KEY, COOKIE_SETTINGS_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!("failed to clear {}: {}", key, e);
            }
        }
        let record = ConsentRecord::default();
        *self.current.borrow_mut() = record;
        info!("cookie consent reset");
        self.bus.publish(SiteEvent::ConsentChanged(record));
    }

    pub fn open_consent_modal(&self) {
        self.bus.publish(SiteEvent::OpenConsentModal);
    }

    fn persist(&self, record: &ConsentRecord) {
        let json = match serde_json::to_string(&record.settings) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to encode cookie settings: {}", e);
                return;
            }
        };
        let writes = [
            (COOKIE_SETTINGS_KEY, json),
            (CONSENT_GIVEN_KEY, record.has_chosen.to_string()),
        ];
        for (key, value) in writes.iter() {
            if let Err(e) = self.storage.set(key, value) {
                warn!("cookie preference not persisted: {}", e);
            }
        }
    }
}

impl PartialEq for ConsentStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.current, &other.current)
    }
}

fn load_record(storage: &dyn PreferenceStorage) -> ConsentRecord {
    let has_chosen = match storage.get(CONSENT_GIVEN_KEY) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            warn!("{}", e);
            false
        }
    };
    let settings = match storage.get(COOKIE_SETTINGS_KEY) {
        Ok(Some(raw)) => serde_json::from_str::<CookieSettings>(&raw).unwrap_or_else(|e| {
            warn!("ignoring corrupt cookie settings: {}", e);
            CookieSettings::default()
        }),
        Ok(None) => CookieSettings::default(),
        Err(e) => {
            warn!("{}", e);
            CookieSettings::default()
        }
    };
    ConsentRecord { settings, has_chosen }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consent::storage::{MemoryStorage, StorageError};
    use std::cell::Cell;

    fn store_with(storage: MemoryStorage) -> ConsentStore {
        ConsentStore::new(Rc::new(storage), EventBus::new())
    }

    fn default_record() -> ConsentRecord {
        ConsentRecord {
            settings: CookieSettings {
                essential: true,
                analytics: false,
                marketing: false,
            },
            has_chosen: false,
        }
    }

    #[test]
    fn fresh_session_returns_defaults() {
        let store = store_with(MemoryStorage::new());
        assert_eq!(store.get_settings(), default_record());
        assert!(store.is_enabled(CookieCategory::Essential));
        assert!(!store.is_enabled(CookieCategory::Analytics));
    }

    #[test]
    fn update_merges_and_marks_chosen() {
        let store = store_with(MemoryStorage::new());
        store.update_settings(SettingsPatch::new().marketing(true));
        store.update_settings(SettingsPatch::new().analytics(true));

        let record = store.get_settings();
        assert!(record.has_chosen);
        assert!(record.settings.analytics);
        assert!(record.settings.marketing);
        assert!(record.settings.essential);
    }

    #[test]
    fn update_is_persisted_for_the_next_session() {
        let storage = MemoryStorage::new();
        store_with(storage.clone()).update_settings(SettingsPatch::new().analytics(true));

        assert_eq!(
            storage.get(CONSENT_GIVEN_KEY).unwrap().as_deref(),
            Some("true")
        );
        let reloaded = store_with(storage);
        assert!(reloaded.get_settings().has_chosen);
        assert!(reloaded.is_enabled(CookieCategory::Analytics));
    }

    #[test]
    fn reset_reverts_to_defaults_and_clears_storage() {
        let storage = MemoryStorage::new();
        let store = store_with(storage.clone());
        store.accept_all();
        store.reset_consent();

        assert_eq!(store.get_settings(), default_record());
        assert_eq!(storage.get(COOKIE_SETTINGS_KEY).unwrap(), None);
        assert_eq!(storage.get(CONSENT_GIVEN_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_record_falls_back_to_defaults() {
        let storage = MemoryStorage::new();
        storage.set(COOKIE_SETTINGS_KEY, "{not json").unwrap();
        let store = store_with(storage);
        assert_eq!(store.get_settings().settings, CookieSettings::default());
    }

    #[test]
    fn every_subscriber_sees_the_update() {
        let bus = EventBus::new();
        let store = ConsentStore::new(Rc::new(MemoryStorage::new()), bus.clone());
        let seen: Rc<RefCell<Vec<ConsentRecord>>> = Rc::new(RefCell::new(Vec::new()));

        let subs: Vec<_> = (0..2)
            .map(|_| {
                let seen = seen.clone();
                bus.subscribe(move |event| {
                    if let SiteEvent::ConsentChanged(record) = event {
                        seen.borrow_mut().push(*record);
                    }
                })
            })
            .collect();

        let record = store.update_settings(SettingsPatch::new().analytics(true));
        assert_eq!(seen.borrow().as_slice(), &[record, record]);
        drop(subs);
    }

    #[test]
    fn open_modal_does_not_touch_settings() {
        let bus = EventBus::new();
        let store = ConsentStore::new(Rc::new(MemoryStorage::new()), bus.clone());
        let opened = Rc::new(Cell::new(false));
        let _sub = {
            let opened = opened.clone();
            bus.subscribe(move |event| {
                if *event == SiteEvent::OpenConsentModal {
                    opened.set(true);
                }
            })
        };

        store.open_consent_modal();
        assert!(opened.get());
        assert_eq!(store.get_settings(), default_record());
    }

    struct BrokenStorage;

    impl PreferenceStorage for BrokenStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_string(),
                reason: "SecurityError".to_string(),
            })
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "QuotaExceededError".to_string(),
            })
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn blocked_storage_still_serves_the_session() {
        let store = ConsentStore::new(Rc::new(BrokenStorage), EventBus::new());
        assert_eq!(store.get_settings(), default_record());

        store.update_settings(SettingsPatch::new().analytics(true));
        assert!(store.is_enabled(CookieCategory::Analytics));

        store.reset_consent();
        assert_eq!(store.get_settings(), default_record());
    }
}
