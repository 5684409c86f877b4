//! Ordered `KEY=VALUE` lists handed to process launchers.

use serde::{Deserialize, Serialize};

/// DNS resolver override applied to every Fabric process.
pub const GODEBUG_NETDNS: &str = "GODEBUG=netdns=go";

/// Ordered list of `KEY=VALUE` entries.
///
/// Entries are kept exactly as pushed: no deduplication, no reordering, no
/// validation. A launcher that re-parses the list decides how duplicate keys
/// resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentList(Vec<String>);

impl EnvironmentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `{key}={value}`.
    pub fn push(&mut self, key: &str, value: impl std::fmt::Display) {
        self.0.push(format!("{key}={value}"));
    }

    /// Append a preformatted `KEY=VALUE` entry.
    pub fn push_raw(&mut self, entry: impl Into<String>) {
        self.0.push(entry.into());
    }

    pub fn extend(&mut self, other: EnvironmentList) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Values of every entry for `key`, in order.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0.iter().filter_map(move |entry| {
            entry
                .split_once('=')
                .filter(|(k, _)| *k == key)
                .map(|(_, v)| v)
        })
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find_map(|entry| {
            entry
                .split_once('=')
                .filter(|(k, _)| *k == key)
                .map(|(_, v)| v)
        })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for EnvironmentList {
    fn from(entries: Vec<String>) -> Self {
        Self(entries)
    }
}

impl IntoIterator for EnvironmentList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_duplicates_in_order() {
        let mut env = EnvironmentList::new();
        env.push("A", 1);
        env.push("B", "x");
        env.push("A", 2);
        assert_eq!(env.as_slice(), ["A=1", "B=x", "A=2"]);
        assert_eq!(env.values("A").collect::<Vec<_>>(), ["1", "2"]);
        assert_eq!(env.get("A"), Some("1"));
    }

    #[test]
    fn test_get_outlives_key() {
        let mut env = EnvironmentList::new();
        env.push("CORE_PEER_ID", "peer0.org1.example.com");

        let value = {
            let key = String::from("CORE_PEER_ID");
            env.get(&key)
        };

        assert_eq!(value, Some("peer0.org1.example.com"));
    }

    #[test]
    fn test_values_split_on_first_equals() {
        let env = EnvironmentList::from(vec![GODEBUG_NETDNS.to_string()]);
        assert_eq!(env.get("GODEBUG"), Some("netdns=go"));
        assert_eq!(env.get("netdns"), None);
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let mut env = EnvironmentList::new();
        env.push("KEY", "value");
        assert_eq!(serde_json::to_string(&env).unwrap(), r#"["KEY=value"]"#);
    }
}
