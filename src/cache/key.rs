//! Cache Key Module
//!
//! Canonical cache keys for parameterised queries.
//!
//! Two queries with the same parameters map to the same key no matter the
//! order their fields were set in: names are sorted before joining.

use std::collections::BTreeMap;

/// Builds `prefix:name1=value1&name2=value2` with names sorted lexicographically.
///
/// A name given more than once keeps its last value.
pub fn generate_cache_key<I, K, V>(prefix: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToString,
{
    let sorted: BTreeMap<String, String> = params
        .into_iter()
        .map(|(name, value)| (name.into(), value.to_string()))
        .collect();

    canonical_key(prefix, &sorted)
}

/// Paging variant: folds `page` and `size` into the parameters under the
/// prefix `<prefix>_page`. Filters named `page` or `size` override them.
pub fn generate_page_cache_key<I, K, V>(prefix: &str, page: u64, size: u64, filters: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToString,
{
    let mut sorted = BTreeMap::new();
    sorted.insert("page".to_string(), page.to_string());
    sorted.insert("size".to_string(), size.to_string());
    for (name, value) in filters {
        sorted.insert(name.into(), value.to_string());
    }

    canonical_key(&format!("{}_page", prefix), &sorted)
}

fn canonical_key(prefix: &str, sorted: &BTreeMap<String, String>) -> String {
    let joined = sorted
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}:{}", prefix, joined)
}
