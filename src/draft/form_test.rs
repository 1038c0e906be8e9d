use super::*;
use serde_json::json;

fn filled() -> AttestationDraft {
    AttestationDraft {
        document_type: DEFAULT_DOCUMENT_TYPE.into(),
        last_name: "Dupont".into(),
        first_name: "Jean".into(),
        email: "j@x.fr".into(),
        role: "Dev".into(),
        employer: "Acme".into(),
        start_date: "2024-01-01".into(),
        end_date: None,
    }
}

#[test]
fn serializes_with_form_keys() {
    let value = serde_json::to_value(filled()).unwrap();
    assert_eq!(
        value,
        json!({
            "documentType": "employer_attestation",
            "nom": "Dupont",
            "prenom": "Jean",
            "email": "j@x.fr",
            "poste": "Dev",
            "entreprise": "Acme",
            "dateDebut": "2024-01-01"
        })
    );
}

#[test]
fn deserializes_partial_draft_with_defaults() {
    let draft: AttestationDraft = serde_json::from_value(json!({"nom": "Dupont"})).unwrap();
    assert_eq!(draft.last_name, "Dupont");
    assert_eq!(draft.document_type, DEFAULT_DOCUMENT_TYPE);
    assert!(draft.end_date.is_none());
}

#[test]
fn end_date_round_trips_when_present() {
    let mut draft = filled();
    draft.end_date = Some("2024-12-31".into());
    let value = serde_json::to_value(&draft).unwrap();
    assert_eq!(value["dateFin"], "2024-12-31");
}

#[test]
fn default_draft_is_missing_every_person_field() {
    assert_eq!(
        AttestationDraft::default().missing_fields(),
        vec!["nom", "prenom", "email", "poste", "entreprise", "dateDebut"]
    );
}

#[test]
fn whitespace_counts_as_missing() {
    let mut draft = filled();
    draft.email = "  ".into();
    assert_eq!(draft.missing_fields(), vec!["email"]);
    assert!(!draft.is_complete());
}

#[test]
fn filled_draft_is_complete() {
    assert!(filled().is_complete());
}

#[test]
fn null_text_fields_read_as_empty() {
    let draft: AttestationDraft =
        serde_json::from_value(json!({"nom": null, "prenom": "Jean", "dateFin": null})).unwrap();
    assert_eq!(draft.last_name, "");
    assert_eq!(draft.first_name, "Jean");
    assert!(draft.end_date.is_none());
    assert_eq!(draft.missing_fields(), vec!["nom", "email", "poste", "entreprise", "dateDebut"]);
}
