use std::collections::HashMap;

/// Collapse raw query pairs into a map, keeping the first value of a
/// repeated key.
pub fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut query = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        query.entry(key).or_insert(value);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn first_occurrence_wins() {
        let query = first_values(pairs(&[
            ("graphType", "app"),
            ("namespaces", "bookinfo"),
            ("graphType", "bogus"),
        ]));

        assert_eq!(query.len(), 2);
        assert_eq!(query["graphType"], "app");
        assert_eq!(query["namespaces"], "bookinfo");
    }

    #[test]
    fn empty_first_value_still_shadows_later_ones() {
        let query = first_values(pairs(&[("duration", ""), ("duration", "5m")]));
        assert_eq!(query["duration"], "");
    }
}
