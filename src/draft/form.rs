//! Attestation form draft.
//!
//! Field names on the wire are the form's French keys (`nom`, `poste`,
//! `dateDebut`, ...) because stored drafts and the webhook both use them.

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_DOCUMENT_TYPE: &str = "employer_attestation";

/// Fields of the employment attestation form. Missing keys in a stored
/// draft fall back to their defaults; `null` text fields read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttestationDraft {
    #[serde(deserialize_with = "null_as_empty")]
    pub document_type: String,
    #[serde(rename = "nom", deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(rename = "prenom", deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(rename = "poste", deserialize_with = "null_as_empty")]
    pub role: String,
    #[serde(rename = "entreprise", deserialize_with = "null_as_empty")]
    pub employer: String,
    #[serde(rename = "dateDebut", deserialize_with = "null_as_empty")]
    pub start_date: String,
    /// Empty while the employment is ongoing.
    #[serde(rename = "dateFin", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Default for AttestationDraft {
    fn default() -> Self {
        Self {
            document_type: DEFAULT_DOCUMENT_TYPE.to_owned(),
            last_name: String::new(),
            first_name: String::new(),
            email: String::new(),
            role: String::new(),
            employer: String::new(),
            start_date: String::new(),
            end_date: None,
        }
    }
}

impl AttestationDraft {
    /// Wire names of required fields that are still blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("documentType", &self.document_type),
            ("nom", &self.last_name),
            ("prenom", &self.first_name),
            ("email", &self.email),
            ("poste", &self.role),
            ("entreprise", &self.employer),
            ("dateDebut", &self.start_date),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
