use serde::Deserialize;

use crate::domain::category::Category as DomainCategory;

/// Category payload as served by the catalog backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    #[serde(default)]
    pub parent_id: Option<i32>,
    pub name: String,
}

impl From<Category> for DomainCategory {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            parent_id: value.parent_id,
            name: value.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_payload() {
        let payload = r#"{"id": 2, "parentId": 1, "name": "Android"}"#;

        let category: Category = serde_json::from_str(payload).expect("payload should parse");
        let domain = DomainCategory::from(category);

        assert_eq!(domain.id, 2);
        assert_eq!(domain.parent_id, Some(1));
        assert_eq!(domain.name, "Android");
    }

    #[test]
    fn missing_parent_defaults_to_root() {
        let payload = r#"{"id": 1, "name": "Phones"}"#;

        let category: Category = serde_json::from_str(payload).expect("payload should parse");

        assert_eq!(category.parent_id, None);
    }
}
