//! Deep merge of JSON documents.

use serde_json::Value;

/// How arrays present on both sides of a merge are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArrayMergePolicy {
    /// Append the source elements to the target array.
    #[default]
    Concat,
    /// Replace the target array with the source array wholesale.
    Replace,
}

/// Merges `source` into `target`.
///
/// Objects on both sides merge key by key, recursively. Arrays on both sides
/// combine per `policy`. A `null` source value never overwrites. Any other
/// combination (scalars, mismatched kinds) takes the source value.
pub fn merge_values(target: &mut Value, source: &Value, policy: ArrayMergePolicy) {
    match (target, source) {
        (_, Value::Null) => {}
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, value) in source_map {
                if value.is_null() {
                    continue;
                }
                match target_map.get_mut(key) {
                    Some(existing) if !existing.is_null() => merge_values(existing, value, policy),
                    _ => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target_items), Value::Array(source_items)) => match policy {
            ArrayMergePolicy::Concat => target_items.extend(source_items.iter().cloned()),
            ArrayMergePolicy::Replace => *target_items = source_items.clone(),
        },
        (target, source) => *target = source.clone(),
    }
}
