//! # Key-Case Detection
//!
//! Classifies the dominant key-naming convention of an arbitrary JSON value.
//!
//! Keys are gathered by a depth-first walk: objects contribute their keys
//! (each key before the subtree under it), arrays are walked element-wise
//! without contributing anything, and scalars end the walk. Collection stops
//! once the detector's key limit is reached, which bounds the cost on very
//! large payloads.
//!
//! Classification is a precedence ladder over the collected keys, first
//! match wins:
//!
//! 1. any key containing `-` is `dash`
//! 2. any key containing `_` is `snake`
//! 3. any key with an ASCII lowercase letter directly followed by an ASCII
//!    uppercase letter is `camel`
//! 4. otherwise `unknown`
//!
//! A single dash key therefore outranks any number of camel keys.

use schemagate_core::{KeyCase, DEFAULT_KEY_SCAN_LIMIT};
use serde_json::Value;

/// Depth-first key scanner with a bounded key budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCaseDetector {
    key_limit: usize,
}

impl Default for KeyCaseDetector {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_SCAN_LIMIT)
    }
}

impl KeyCaseDetector {
    pub fn new(key_limit: usize) -> Self {
        Self { key_limit }
    }

    pub fn key_limit(&self) -> usize {
        self.key_limit
    }

    /// Collect up to `key_limit` keys in depth-first discovery order.
    pub fn collect_keys<'a>(&self, value: &'a Value) -> Vec<&'a str> {
        let mut keys = Vec::new();
        self.walk(value, &mut keys);
        keys
    }

    /// Classify the key set of `value`.
    pub fn detect(&self, value: &Value) -> KeyCase {
        let keys = self.collect_keys(value);
        let verdict = classify(keys.iter().copied());
        tracing::debug!(keys = keys.len(), %verdict, "classified key case");
        verdict
    }

    fn walk<'a>(&self, value: &'a Value, keys: &mut Vec<&'a str>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    if keys.len() >= self.key_limit {
                        return;
                    }
                    keys.push(key.as_str());
                    self.walk(child, keys);
                }
            }
            Value::Array(items) => {
                for item in items {
                    if keys.len() >= self.key_limit {
                        return;
                    }
                    self.walk(item, keys);
                }
            }
            _ => {}
        }
    }
}

/// Apply the precedence ladder to a key set.
pub fn classify<'a, I>(keys: I) -> KeyCase
where
    I: IntoIterator<Item = &'a str>,
{
    let mut has_snake = false;
    let mut has_camel = false;

    for key in keys {
        if key.contains('-') {
            return KeyCase::Dash;
        }
        has_snake |= key.contains('_');
        has_camel |= is_camel_hump(key);
    }

    if has_snake {
        KeyCase::Snake
    } else if has_camel {
        KeyCase::Camel
    } else {
        KeyCase::Unknown
    }
}

fn is_camel_hump(key: &str) -> bool {
    key.as_bytes()
        .windows(2)
        .any(|w| w[0].is_ascii_lowercase() && w[1].is_ascii_uppercase())
}
