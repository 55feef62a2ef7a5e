use serde::{Deserialize, Serialize};

use super::ReferenceError;

/// One entry of the static condition reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub common_symptoms: Vec<String>,
    pub risk_factors: Vec<String>,
    pub basic_treatment: String,
}

/// The condition reference table: loaded once at startup, immutable
/// thereafter, safe for unsynchronized concurrent reads.
#[derive(Debug)]
pub struct ConditionTable {
    conditions: Vec<ConditionRef>,
}

impl ConditionTable {
    /// Load the table bundled into the binary.
    pub fn bundled() -> Result<Self, ReferenceError> {
        Self::parse(include_str!("../../resources/conditions.json"), "conditions.json")
    }

    /// Load the table from an external JSON file.
    pub fn load(path: &std::path::Path) -> Result<Self, ReferenceError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ReferenceError::Load(path.display().to_string(), e.to_string()))?;
        Self::parse(&json, &path.display().to_string())
    }

    fn parse(json: &str, source: &str) -> Result<Self, ReferenceError> {
        let conditions: Vec<ConditionRef> = serde_json::from_str(json)
            .map_err(|e| ReferenceError::Parse(source.to_string(), e.to_string()))?;
        Ok(Self { conditions })
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Look up a condition by its id.
    pub fn find(&self, id: &str) -> Option<&ConditionRef> {
        self.conditions.iter().find(|c| c.id == id)
    }

    /// All conditions whose `common_symptoms` overlap the given symptom
    /// ids. Both sides are normalized to one key space (trimmed,
    /// lowercased, underscores folded to spaces) so a caller id like
    /// `runny_nose` matches the reference name "Runny Nose".
    pub fn match_symptoms(&self, symptom_ids: &[String]) -> Vec<&ConditionRef> {
        let wanted: Vec<String> = symptom_ids.iter().map(|s| normalize_key(s)).collect();
        self.conditions
            .iter()
            .filter(|condition| {
                condition
                    .common_symptoms
                    .iter()
                    .any(|symptom| wanted.contains(&normalize_key(symptom)))
            })
            .collect()
    }
}

/// Fold a symptom id or display name into the shared matching key space.
fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase().replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_has_seven_conditions() {
        let table = ConditionTable::bundled().unwrap();
        assert_eq!(table.len(), 7);
        assert!(!table.is_empty());
        for id in [
            "common_cold",
            "influenza",
            "strep_throat",
            "gastroenteritis",
            "allergy",
            "migraine",
            "covid_19",
        ] {
            assert!(table.find(id).is_some(), "missing reference entry {id}");
        }
    }

    #[test]
    fn every_entry_is_fully_populated() {
        let table = ConditionTable::bundled().unwrap();
        for id in ["common_cold", "influenza", "covid_19"] {
            let entry = table.find(id).unwrap();
            assert!(!entry.description.is_empty());
            assert!(!entry.common_symptoms.is_empty());
            assert!(!entry.risk_factors.is_empty());
            assert!(!entry.basic_treatment.is_empty());
        }
    }

    #[test]
    fn find_unknown_id_returns_none() {
        let table = ConditionTable::bundled().unwrap();
        assert!(table.find("c_55").is_none());
    }

    #[test]
    fn match_is_case_insensitive() {
        let table = ConditionTable::bundled().unwrap();
        let matches = table.match_symptoms(&["COUGH".to_string()]);
        let ids: Vec<&str> = matches.iter().map(|c| c.id.as_str()).collect();
        assert!(ids.contains(&"common_cold"));
        assert!(ids.contains(&"influenza"));
        assert!(ids.contains(&"covid_19"));
    }

    #[test]
    fn underscored_ids_match_spaced_names() {
        let table = ConditionTable::bundled().unwrap();
        let matches =
            table.match_symptoms(&["sneezing".to_string(), "runny_nose".to_string()]);
        let ids: Vec<&str> = matches.iter().map(|c| c.id.as_str()).collect();
        assert!(ids.contains(&"allergy"));
        assert!(ids.contains(&"common_cold"));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn no_overlap_yields_empty() {
        let table = ConditionTable::bundled().unwrap();
        assert!(table.match_symptoms(&["levitation".to_string()]).is_empty());
        assert!(table.match_symptoms(&[]).is_empty());
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let err = ConditionTable::load(std::path::Path::new("/nonexistent/conditions.json"))
            .unwrap_err();
        assert!(matches!(err, ReferenceError::Load(..)));
    }

    #[test]
    fn load_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = ConditionTable::load(&path).unwrap_err();
        assert!(matches!(err, ReferenceError::Parse(..)));
    }
}
