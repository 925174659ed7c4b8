//! An interned, read-only timestamp wrapper.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, Weak},
    time::SystemTime,
};

use once_cell::sync::Lazy;

use crate::date;

/// Live wrappers, keyed by their epoch-millisecond value.
struct Cache {
    map: HashMap<i64, Weak<SystemTime>>,
    /// Sweep dead entries once the map grows past this.
    sweep_at: usize,
}

static CACHE: Lazy<Mutex<Cache>> = Lazy::new(|| {
    Mutex::new(Cache {
        map: HashMap::new(),
        sweep_at: 64,
    })
});

/// A read-only timestamp at millisecond precision.
///
/// Converting a [`SystemTime`] yields a snapshot that no later change to any
/// clock or source value can affect. Wrappers are interned: while a wrapper
/// for some millisecond is alive, converting an equal `SystemTime` returns a
/// handle to the same shared storage, and the intern table entry is released
/// once the last wrapper for it is dropped.
///
/// Comparison, equality and hashing follow the wrapped instant's value.
///
/// ```
/// use std::time::SystemTime;
/// use http_kit::date::ImmutableDate;
///
/// let now = SystemTime::now();
/// let frozen = ImmutableDate::from(now);
/// assert_eq!(SystemTime::from(&frozen), frozen.as_system_time());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImmutableDate {
    at: Arc<SystemTime>,
}

impl ImmutableDate {
    /// The wrapped point in time.
    pub fn as_system_time(&self) -> SystemTime {
        *self.at
    }
}

impl From<SystemTime> for ImmutableDate {
    fn from(at: SystemTime) -> ImmutableDate {
        let millis = date::epoch_millis(at);

        let mut cache = CACHE.lock().unwrap();

        if let Some(shared) = cache.map.get(&millis).and_then(Weak::upgrade) {
            return ImmutableDate { at: shared };
        }

        let shared = Arc::new(date::system_time_from_millis(millis));
        cache.map.insert(millis, Arc::downgrade(&shared));

        if cache.map.len() > cache.sweep_at {
            cache.map.retain(|_, slot| slot.strong_count() > 0);
            cache.sweep_at = usize::max(cache.map.len() * 2, 64);
        }

        ImmutableDate { at: shared }
    }
}

impl From<ImmutableDate> for SystemTime {
    fn from(date: ImmutableDate) -> SystemTime {
        *date.at
    }
}

impl From<&ImmutableDate> for SystemTime {
    fn from(date: &ImmutableDate) -> SystemTime {
        *date.at
    }
}

impl fmt::Display for ImmutableDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        date::write_rfc1123(f, *self.at)
    }
}
