use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============ Lead Models ============

/// An existing lead as supplied by the caller.
///
/// Only the fields used for matching are typed; everything else is kept in
/// `extra` so matched leads are echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    /// Row identifier in the system of record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Lead ID (`MH-NE-SR-250101-001-7X`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enquiry_code: Option<String>,
    /// Phone number, loosely formatted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_number: Option<String>,
    /// Company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_company: Option<String>,
    /// Any other lead columns.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LeadRecord {
    /// Identifier reported for a match: `id`, else `enquiry_code`.
    pub fn reference(&self) -> Option<&str> {
        self.id.as_deref().or(self.enquiry_code.as_deref())
    }
}

/// The candidate lead being checked for duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLead {
    #[serde(default)]
    pub client_number: Option<String>,
    #[serde(default)]
    pub client_company: Option<String>,
}

// ============ Detection Results ============

/// Outcome of a phone-number lookup against existing leads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturningCustomer {
    pub is_returning: bool,
    pub existing_lead_ids: Vec<String>,
    pub existing_leads: Vec<LeadRecord>,
}

/// Kind of duplicate found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKind {
    #[default]
    None,
    PhoneMatch,
    CompanyMatch,
}

/// What the caller should do with a flagged lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestedAction {
    /// Merge into the first match or keep as a separate lead.
    MergeOrNew,
    /// Have a person review the candidate matches.
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchConfidence {
    Medium,
}

/// Result of `detect_duplicate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCheckResult {
    pub is_duplicate: bool,
    #[serde(rename = "type")]
    pub kind: DuplicateKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub existing_leads: Vec<LeadRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<SuggestedAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_candidate: Option<LeadRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<MatchConfidence>,
}

impl DuplicateCheckResult {
    pub fn not_duplicate() -> Self {
        Self::default()
    }

    pub fn phone_match(matches: Vec<LeadRecord>) -> Self {
        Self {
            is_duplicate: true,
            kind: DuplicateKind::PhoneMatch,
            message: Some("Phone number already exists in system".to_string()),
            merge_candidate: matches.first().cloned(),
            existing_leads: matches,
            suggested_action: Some(SuggestedAction::MergeOrNew),
            confidence: None,
        }
    }

    pub fn company_match(matches: Vec<LeadRecord>) -> Self {
        Self {
            is_duplicate: true,
            kind: DuplicateKind::CompanyMatch,
            message: Some("Similar company name found".to_string()),
            existing_leads: matches,
            suggested_action: Some(SuggestedAction::Review),
            merge_candidate: None,
            confidence: Some(MatchConfidence::Medium),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lead_record_keeps_unknown_fields() {
        let lead: LeadRecord = serde_json::from_value(json!({
            "id": "42",
            "client_number": "9876543210",
            "client_name": "Priya",
            "status": "Hot"
        }))
        .unwrap();

        assert_eq!(lead.id.as_deref(), Some("42"));
        assert_eq!(lead.extra.get("client_name"), Some(&json!("Priya")));

        let back = serde_json::to_value(&lead).unwrap();
        assert_eq!(back["status"], "Hot");
        assert!(back.get("client_company").is_none());
    }

    #[test]
    fn test_reference_falls_back_to_enquiry_code() {
        let lead = LeadRecord {
            enquiry_code: Some("MH-NE-SR-250101-001-7X".to_string()),
            ..Default::default()
        };
        assert_eq!(lead.reference(), Some("MH-NE-SR-250101-001-7X"));
        assert_eq!(LeadRecord::default().reference(), None);
    }

    #[test]
    fn test_not_duplicate_serialization() {
        let value = serde_json::to_value(DuplicateCheckResult::not_duplicate()).unwrap();
        assert_eq!(value, json!({ "isDuplicate": false, "type": "none" }));
    }

    #[test]
    fn test_phone_match_serialization() {
        let lead = LeadRecord {
            id: Some("7".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(DuplicateCheckResult::phone_match(vec![lead])).unwrap();

        assert_eq!(value["isDuplicate"], true);
        assert_eq!(value["type"], "phone_match");
        assert_eq!(value["suggestedAction"], "MERGE_OR_NEW");
        assert_eq!(value["mergeCandidate"]["id"], "7");
        assert!(value.get("confidence").is_none());
    }

    #[test]
    fn test_company_match_serialization() {
        let value = serde_json::to_value(DuplicateCheckResult::company_match(vec![
            LeadRecord::default(),
        ]))
        .unwrap();

        assert_eq!(value["type"], "company_match");
        assert_eq!(value["suggestedAction"], "REVIEW");
        assert_eq!(value["confidence"], "MEDIUM");
        assert!(value.get("mergeCandidate").is_none());
    }
}
