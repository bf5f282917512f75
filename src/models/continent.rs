use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Continent {
    pub code: String,
    pub name: String,
    /// Continent name keyed by language code, e.g. `"es" -> "África"`.
    #[serde(
        rename = "altLangName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub alt_lang_name: Option<BTreeMap<String, String>>,
}
