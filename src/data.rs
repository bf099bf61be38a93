use std::collections::HashMap;
use std::sync::LazyLock;

static IRREGULAR_VERBS: LazyLock<HashMap<String, String>> = LazyLock::new(load_irregular_verbs);

/// Irregular surface form -> base form, e.g. `"went" -> "go"`.
pub fn irregular_verbs() -> &'static HashMap<String, String> {
    &IRREGULAR_VERBS
}

fn load_irregular_verbs() -> HashMap<String, String> {
    let data = include_str!("../data/irregular_verbs.json");
    serde_json::from_str(data).unwrap_or_else(|e| {
        tracing::warn!("irregular verb table is malformed, continuing without it: {e}");
        HashMap::new()
    })
}
