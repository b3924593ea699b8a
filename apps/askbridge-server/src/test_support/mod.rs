use std::path::Path;

use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};

use crate::config::Config;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// A config with every provider disabled and the shared secret set to
/// `"secret"`; tests override the pieces they need.
pub(crate) fn base_config(upload_dir: &Path) -> Config {
    Config {
        inference: None,
        embedding: None,
        tools: None,
        app_api_key: Some("secret".into()),
        bind: "127.0.0.1".into(),
        port: 0,
        upload_dir: upload_dir.to_path_buf(),
    }
}

pub(crate) mod env {
    use super::*;
    use std::collections::HashMap;

    pub(crate) struct EnvGuard {
        _lock: MutexGuard<'static, ()>,
        saved: HashMap<String, Option<String>>,
    }

    pub(crate) fn guard() -> EnvGuard {
        EnvGuard {
            _lock: ENV_LOCK.lock().expect("env lock poisoned"),
            saved: HashMap::new(),
        }
    }

    impl EnvGuard {
        fn remember(&mut self, key: &str) {
            self.saved
                .entry(key.to_string())
                .or_insert_with(|| std::env::var(key).ok());
        }

        pub(crate) fn set(&mut self, key: &str, value: impl AsRef<str>) {
            self.remember(key);
            std::env::set_var(key, value.as_ref());
        }

        pub(crate) fn remove(&mut self, key: &str) {
            self.remember(key);
            std::env::remove_var(key);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in self.saved.drain() {
                match value {
                    Some(val) => std::env::set_var(&key, val),
                    None => std::env::remove_var(&key),
                }
            }
        }
    }
}
