use crate::erx;
use redis::Commands;

pub type Facade<T> = erx::ResultE<T>;

/// Get/set/invalidate contract for list-response caching.
///
/// Keys come from `Envelope::cache_key()`; the payload is the serialized
/// response. The store is an external collaborator — anything honoring this
/// contract plugs in.
pub trait Cache {
    fn get(&self, key: &str) -> Facade<Option<String>>;
    fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Facade<()>;
    fn invalidate(&self, key: &str) -> Facade<bool>;
}

/// Redis-backed cache facade.
pub struct RedisCache {
    client: redis::Client,
}

impl RedisCache {
    pub fn new(client: redis::Client) -> Self {
        RedisCache { client }
    }

    pub fn open(connect: &str) -> Facade<RedisCache> {
        let client = redis::Client::open(connect).map_err(erx::smp)?;
        Ok(RedisCache { client })
    }

    fn connection(&self) -> erx::ResultE<redis::Connection> {
        self.client.get_connection().map_err(erx::smp)
    }
}

impl Cache for RedisCache {
    fn get(&self, key: &str) -> Facade<Option<String>> {
        self.connection()?.get(key).map_err(erx::smp)
    }

    fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Facade<()> {
        self.connection()?.set_ex(key, value, ttl_seconds).map_err(erx::smp)
    }

    fn invalidate(&self, key: &str) -> Facade<bool> {
        self.connection()?.del(key).map_err(erx::smp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct MemoryCache {
        entries: RefCell<HashMap<String, String>>,
    }

    impl Cache for MemoryCache {
        fn get(&self, key: &str) -> Facade<Option<String>> {
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str, _ttl_seconds: u64) -> Facade<()> {
            self.entries.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn invalidate(&self, key: &str) -> Facade<bool> {
            Ok(self.entries.borrow_mut().remove(key).is_some())
        }
    }

    #[test]
    fn cache_contract_keyed_by_envelope() {
        use crate::query::envelope::Envelope;

        let cache = MemoryCache { entries: RefCell::new(HashMap::new()) };
        let env = Envelope { take: 20, filters: Some("Status::Active::eq".to_string()), ..Default::default() };

        let key = env.cache_key();
        assert_eq!(cache.get(&key).unwrap(), None);
        cache.set(&key, r#"{"isSuccess":true}"#, 60).unwrap();
        assert_eq!(cache.get(&key).unwrap().as_deref(), Some(r#"{"isSuccess":true}"#));

        // identical logical request, identical key
        let again = env.copy();
        assert_eq!(cache.get(&again.cache_key()).unwrap().is_some(), true);

        assert!(cache.invalidate(&key).unwrap());
        assert_eq!(cache.get(&key).unwrap(), None);
    }
}
