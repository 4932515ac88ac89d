use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One vacancy as delivered by the upstream catalog.
///
/// Every field is explicitly nullable: the upstream omits fields freely and
/// occasionally sends numbers where strings are expected, so deserialization
/// stringifies scalars instead of failing. Items are never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct VacancyItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub work_schedule: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub requirement: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub opening_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_time: Option<String>,
}

/// One normalized page of the catalog, regardless of which response shape
/// the upstream used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResult {
    pub items: Vec<VacancyItem>,
    pub total_pages: u32,
    pub total_items: u32,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_fields_are_stringified() {
        let item: VacancyItem = serde_json::from_str(
            r#"{"id": 17, "position": "Lecturer", "salary": 3500000, "department": null}"#,
        )
        .expect("item decodes");

        assert_eq!(item.id.as_deref(), Some("17"));
        assert_eq!(item.position.as_deref(), Some("Lecturer"));
        assert_eq!(item.salary.as_deref(), Some("3500000"));
        assert_eq!(item.department, None);
        assert_eq!(item.requirement, None);
    }
}
