//! Person record.

use serde::{Deserialize, Serialize};

/// Storage-assigned identity of a person record.
pub type PersonId = i32;

/// One person as stored in the `Person` table and exchanged over HTTP.
///
/// Wire names follow the table's column names (`ID`, `FirstName`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonInfo {
    #[serde(rename = "ID", default)]
    pub id: PersonId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: i32,
}

impl PersonInfo {
    /// Builds an unsaved record; storage assigns the id on insert.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: impl Into<String>,
        age: i32,
    ) -> Self {
        Self {
            id: 0,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            gender: Some(gender.into()),
            age,
        }
    }

    /// Overwrites every mutable field from `source`. The id is left alone.
    pub fn overwrite_details(&mut self, source: &PersonInfo) {
        self.first_name = source.first_name.clone();
        self.last_name = source.last_name.clone();
        self.gender = source.gender.clone();
        self.age = source.age;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_column_names() {
        let mut person = PersonInfo::new("Ann", "Lee", "F", 30);
        person.id = 1;

        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ID": 1,
                "FirstName": "Ann",
                "LastName": "Lee",
                "Gender": "F",
                "Age": 30
            })
        );
    }

    #[test]
    fn missing_names_serialize_as_null() {
        let json = serde_json::to_value(PersonInfo::default()).unwrap();
        assert!(json["FirstName"].is_null());
        assert_eq!(json["Age"], 0);
    }

    #[test]
    fn overwrite_keeps_identity() {
        let mut stored = PersonInfo::new("Ann", "Lee", "F", 30);
        stored.id = 7;
        let mut incoming = PersonInfo::new("Anne", "Li", "F", 31);
        incoming.id = 99;

        stored.overwrite_details(&incoming);

        assert_eq!(stored.id, 7);
        assert_eq!(stored.first_name.as_deref(), Some("Anne"));
        assert_eq!(stored.last_name.as_deref(), Some("Li"));
        assert_eq!(stored.age, 31);
    }
}
