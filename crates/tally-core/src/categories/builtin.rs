use crate::categories::schema::CategorySetDef;
use crate::error::TallyError;

const DEFAULT_CATEGORIES_JSON: &str = include_str!("../../../../categories/default.json");

/// Load the embedded default category set.
pub fn default_categories() -> Result<CategorySetDef, TallyError> {
    let set: CategorySetDef = serde_json::from_str(DEFAULT_CATEGORIES_JSON)?;
    Ok(set)
}
