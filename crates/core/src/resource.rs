//! Resource model and classification engine.
//!
//! A [`ResourceDraft`] holds in-progress form state. [`derive_record`]
//! validates the cross-field taxonomy constraints and produces the
//! [`ResourceRecord`] that is sent to the storage collaborator, deriving
//! the storage columns and the denormalized tag set from the partial
//! user input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::taxonomy;

/// Placeholder stored when a taxonomy-dependent column has no applicable
/// value (e.g. first-year resources carry no degree).
pub const NONE_SENTINEL: &str = "None";

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Academic year a resource belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Year {
    #[serde(rename = "1st Year")]
    First,
    #[serde(rename = "2nd Year")]
    Second,
    #[serde(rename = "3rd Year")]
    Third,
}

impl Year {
    /// The display label, which is also the stored column value.
    pub fn as_str(self) -> &'static str {
        match self {
            Year::First => "1st Year",
            Year::Second => "2nd Year",
            Year::Third => "3rd Year",
        }
    }

    /// All valid year labels, in form order.
    pub const LABELS: &'static [&'static str] = &["1st Year", "2nd Year", "3rd Year"];
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Year {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1st Year" => Ok(Year::First),
            "2nd Year" => Ok(Year::Second),
            "3rd Year" => Ok(Year::Third),
            other => Err(CoreError::Validation(format!(
                "Invalid year '{other}'. Must be one of: {}",
                Year::LABELS.join(", ")
            ))),
        }
    }
}

/// Whether the free-text subject names a core subject or an
/// elective/language, which decides the destination column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectType {
    #[default]
    #[serde(rename = "Subject")]
    Subject,
    #[serde(rename = "Elective/Language")]
    ElectiveLanguage,
}

impl SubjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            SubjectType::Subject => "Subject",
            SubjectType::ElectiveLanguage => "Elective/Language",
        }
    }
}

impl FromStr for SubjectType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Subject" => Ok(SubjectType::Subject),
            "Elective/Language" => Ok(SubjectType::ElectiveLanguage),
            other => Err(CoreError::Validation(format!(
                "Invalid subject type '{other}'. Must be one of: Subject, Elective/Language"
            ))),
        }
    }
}

/// Kind of material being catalogued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "CT Paper")]
    CtPaper,
    #[serde(rename = "Sem Paper")]
    SemPaper,
    #[serde(rename = "Study Material")]
    StudyMaterial,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::CtPaper => "CT Paper",
            ResourceType::SemPaper => "Sem Paper",
            ResourceType::StudyMaterial => "Study Material",
        }
    }

    /// All valid resource type labels, in form order.
    pub const LABELS: &'static [&'static str] = &["CT Paper", "Sem Paper", "Study Material"];
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CT Paper" => Ok(ResourceType::CtPaper),
            "Sem Paper" => Ok(ResourceType::SemPaper),
            "Study Material" => Ok(ResourceType::StudyMaterial),
            other => Err(CoreError::Validation(format!(
                "Invalid resource type '{other}'. Must be one of: {}",
                ResourceType::LABELS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Draft (transient form state)
// ---------------------------------------------------------------------------

/// An in-progress, unvalidated resource submission.
///
/// Created empty, mutated field-by-field, consumed exactly once by
/// [`derive_record`]. Use [`set_year`](Self::set_year) rather than writing
/// the `year` field directly when handling a year change: selecting
/// "1st Year" must clear any previously chosen degree and specialisation
/// so stale taxonomy state cannot leak into the submitted record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceDraft {
    pub year: Option<Year>,
    pub degree: Option<String>,
    pub specialisation: Option<String>,
    pub subject: String,
    pub subject_type: SubjectType,
    pub resource_type: Option<ResourceType>,
    /// Raw comma-delimited URL list as typed into the form.
    pub file_urls: String,
    pub title: String,
    pub description: String,
}

impl ResourceDraft {
    /// Select a year, clearing degree and specialisation for first-year
    /// drafts (those fields do not apply and must not retain old values).
    pub fn set_year(&mut self, year: Year) {
        self.year = Some(year);
        if year == Year::First {
            self.degree = None;
            self.specialisation = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Record (persisted shape)
// ---------------------------------------------------------------------------

/// A validated, derived resource as sent to the storage collaborator.
///
/// Field names serialize to the collaborator's column names. Exactly one
/// of `subject` / `elective` is non-null, chosen by the draft's subject
/// type. Records are insert-only; this core never edits or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRecord {
    pub title: String,
    pub description: String,
    pub year: Year,
    /// Degree label, or [`NONE_SENTINEL`] for first-year resources.
    pub degree: String,
    /// Specialisation label, or [`NONE_SENTINEL`] for first-year resources.
    pub specialisation: String,
    pub subject: Option<String>,
    pub elective: Option<String>,
    /// Denormalized search aid: `[year, degree, subject, resource_type]`
    /// with empty entries removed, order preserved.
    pub tags: Vec<String>,
    pub resource_type: ResourceType,
    pub file_urls: Vec<String>,
}

// ---------------------------------------------------------------------------
// Classification engine
// ---------------------------------------------------------------------------

/// Split the raw comma-delimited URL input into individual URLs.
///
/// Segments are trimmed but empty segments are kept, so `"a.pdf,"` yields
/// `["a.pdf", ""]`. This matches the stored derivation rule; whether empty
/// segments should be dropped instead is an open policy question tracked in
/// DESIGN.md.
pub fn split_file_urls(input: &str) -> Vec<String> {
    input.split(',').map(|s| s.trim().to_string()).collect()
}

/// Validate a draft and derive the storable record.
///
/// All checks are local; this runs before any network call. Rules:
///
/// - `year`, `resource_type`, `title`, `description`, and `file_urls` are
///   required.
/// - For any year other than "1st Year", `degree` must be a known degree
///   and `specialisation` must belong to that degree's taxonomy entry.
/// - For "1st Year", degree and specialisation are forced to
///   [`NONE_SENTINEL`] regardless of what the draft still carries.
/// - The subject text lands in exactly one of the `subject` / `elective`
///   columns. Empty subject text becomes [`NONE_SENTINEL`] in the subject
///   column; an empty elective is rejected instead.
pub fn derive_record(draft: &ResourceDraft) -> Result<ResourceRecord, CoreError> {
    let year = draft
        .year
        .ok_or_else(|| CoreError::Validation("year is required".into()))?;
    let resource_type = draft
        .resource_type
        .ok_or_else(|| CoreError::Validation("resource type is required".into()))?;

    if draft.title.is_empty() {
        return Err(CoreError::Validation("title is required".into()));
    }
    if draft.description.is_empty() {
        return Err(CoreError::Validation("description is required".into()));
    }
    if draft.file_urls.trim().is_empty() {
        return Err(CoreError::Validation("at least one file URL is required".into()));
    }

    // Degree/specialisation gating. First-year drafts are forced to the
    // sentinel even if the draft still carries stale selections.
    let effective_degree = if year == Year::First {
        None
    } else {
        let degree = draft
            .degree
            .as_deref()
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                CoreError::Validation(format!("degree is required for {}", year.as_str()))
            })?;
        if !taxonomy::is_known_degree(degree) {
            return Err(CoreError::Validation(format!("Unknown degree '{degree}'")));
        }
        let specialisation = draft
            .specialisation
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                CoreError::Validation(format!("specialisation is required for {degree}"))
            })?;
        if !taxonomy::is_valid_specialisation(degree, specialisation) {
            return Err(CoreError::Validation(format!(
                "'{specialisation}' is not a specialisation of {degree}"
            )));
        }
        Some((degree, specialisation))
    };

    // Subject/elective exclusivity: the subject type selects exactly one
    // destination column.
    let (subject, elective) = match draft.subject_type {
        SubjectType::Subject => {
            let value = if draft.subject.is_empty() {
                NONE_SENTINEL.to_string()
            } else {
                draft.subject.clone()
            };
            (Some(value), None)
        }
        SubjectType::ElectiveLanguage => {
            if draft.subject.is_empty() {
                return Err(CoreError::Validation(
                    "subject text is required for an elective/language entry".into(),
                ));
            }
            (None, Some(draft.subject.clone()))
        }
    };

    // Tag derivation: order-preserving, empty entries removed. The degree
    // contribution is the effective degree, never the stored sentinel, so
    // first-year records do not acquire a "None" tag.
    let tags: Vec<String> = [
        year.as_str(),
        effective_degree.map(|(d, _)| d).unwrap_or(""),
        draft.subject.as_str(),
        resource_type.as_str(),
    ]
    .into_iter()
    .filter(|t| !t.is_empty())
    .map(str::to_string)
    .collect();

    let (degree, specialisation) = match effective_degree {
        Some((d, s)) => (d.to_string(), s.to_string()),
        None => (NONE_SENTINEL.to_string(), NONE_SENTINEL.to_string()),
    };

    Ok(ResourceRecord {
        title: draft.title.clone(),
        description: draft.description.clone(),
        year,
        degree,
        specialisation,
        subject,
        elective,
        tags,
        resource_type,
        file_urls: split_file_urls(&draft.file_urls),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::DEGREES;

    /// The concrete second-year mechanical draft used across tests.
    fn mechanical_draft() -> ResourceDraft {
        ResourceDraft {
            year: Some(Year::Second),
            degree: Some("Mechanical".into()),
            specialisation: Some("Robotics".into()),
            subject: "Thermo".into(),
            subject_type: SubjectType::Subject,
            resource_type: Some(ResourceType::CtPaper),
            file_urls: "a.pdf, b.pdf".into(),
            title: "T".into(),
            description: "D".into(),
        }
    }

    // -- label parsing -------------------------------------------------------

    #[test]
    fn year_labels_round_trip() {
        for label in Year::LABELS {
            assert_eq!(label.parse::<Year>().unwrap().as_str(), *label);
        }
        assert!("4th Year".parse::<Year>().is_err());
    }

    #[test]
    fn resource_type_labels_round_trip() {
        for label in ResourceType::LABELS {
            assert_eq!(label.parse::<ResourceType>().unwrap().as_str(), *label);
        }
        assert!("Notes".parse::<ResourceType>().is_err());
    }

    #[test]
    fn subject_type_defaults_to_subject() {
        assert_eq!(SubjectType::default(), SubjectType::Subject);
    }

    #[test]
    fn enum_serialization_uses_display_labels() {
        assert_eq!(
            serde_json::to_value(Year::Second).unwrap(),
            serde_json::json!("2nd Year")
        );
        assert_eq!(
            serde_json::to_value(ResourceType::CtPaper).unwrap(),
            serde_json::json!("CT Paper")
        );
    }

    // -- file URL parsing ----------------------------------------------------

    #[test]
    fn file_urls_split_and_trimmed() {
        assert_eq!(split_file_urls("a.pdf, b.pdf"), vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn trailing_comma_preserves_empty_segment() {
        assert_eq!(split_file_urls("a.pdf,"), vec!["a.pdf", ""]);
    }

    // -- draft year handling -------------------------------------------------

    #[test]
    fn selecting_first_year_clears_taxonomy_fields() {
        let mut draft = mechanical_draft();
        draft.set_year(Year::First);
        assert_eq!(draft.degree, None);
        assert_eq!(draft.specialisation, None);
    }

    #[test]
    fn selecting_other_years_keeps_taxonomy_fields() {
        let mut draft = mechanical_draft();
        draft.set_year(Year::Third);
        assert_eq!(draft.degree.as_deref(), Some("Mechanical"));
        assert_eq!(draft.specialisation.as_deref(), Some("Robotics"));
    }

    // -- derivation: happy path ----------------------------------------------

    #[test]
    fn derives_second_year_mechanical_record() {
        let record = derive_record(&mechanical_draft()).unwrap();
        assert_eq!(record.year, Year::Second);
        assert_eq!(record.degree, "Mechanical");
        assert_eq!(record.specialisation, "Robotics");
        assert_eq!(record.subject.as_deref(), Some("Thermo"));
        assert_eq!(record.elective, None);
        assert_eq!(record.file_urls, vec!["a.pdf", "b.pdf"]);
        assert_eq!(record.tags, vec!["2nd Year", "Mechanical", "Thermo", "CT Paper"]);
    }

    #[test]
    fn first_year_forces_sentinel_even_with_stale_degree() {
        // The draft still carries a degree/specialisation (e.g. it was built
        // by hand rather than through set_year).
        let mut draft = mechanical_draft();
        draft.year = Some(Year::First);
        let record = derive_record(&draft).unwrap();
        assert_eq!(record.degree, NONE_SENTINEL);
        assert_eq!(record.specialisation, NONE_SENTINEL);
        // No degree tag and certainly no "None" tag.
        assert_eq!(record.tags, vec!["1st Year", "Thermo", "CT Paper"]);
    }

    // -- derivation: taxonomy rejection --------------------------------------

    #[test]
    fn rejects_specialisation_outside_degree_for_every_degree() {
        for degree in DEGREES {
            let mut draft = mechanical_draft();
            draft.degree = Some((*degree).into());
            draft.specialisation = Some("Not A Real Specialisation".into());
            let err = derive_record(&draft).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "degree {degree}");
        }
    }

    #[test]
    fn rejects_specialisation_borrowed_from_another_degree() {
        let mut draft = mechanical_draft();
        draft.degree = Some("Computer Science".into());
        // "Robotics" is valid for Mechanical only.
        assert!(derive_record(&draft).is_err());
    }

    #[test]
    fn rejects_unknown_degree() {
        let mut draft = mechanical_draft();
        draft.degree = Some("Astrology".into());
        assert!(derive_record(&draft).is_err());
    }

    #[test]
    fn rejects_missing_degree_for_upper_years() {
        let mut draft = mechanical_draft();
        draft.degree = None;
        assert!(derive_record(&draft).is_err());
    }

    #[test]
    fn rejects_empty_specialisation() {
        let mut draft = mechanical_draft();
        draft.specialisation = Some(String::new());
        assert!(derive_record(&draft).is_err());
    }

    // -- derivation: required fields -----------------------------------------

    #[test]
    fn rejects_missing_required_fields() {
        let mut draft = mechanical_draft();
        draft.year = None;
        assert!(derive_record(&draft).is_err());

        let mut draft = mechanical_draft();
        draft.resource_type = None;
        assert!(derive_record(&draft).is_err());

        let mut draft = mechanical_draft();
        draft.title.clear();
        assert!(derive_record(&draft).is_err());

        let mut draft = mechanical_draft();
        draft.description.clear();
        assert!(derive_record(&draft).is_err());

        let mut draft = mechanical_draft();
        draft.file_urls.clear();
        assert!(derive_record(&draft).is_err());
    }

    // -- derivation: subject/elective exclusivity ----------------------------

    #[test]
    fn subject_branch_nulls_elective() {
        let record = derive_record(&mechanical_draft()).unwrap();
        assert!(record.subject.is_some() && record.elective.is_none());
    }

    #[test]
    fn elective_branch_nulls_subject() {
        let mut draft = mechanical_draft();
        draft.subject = "French".into();
        draft.subject_type = SubjectType::ElectiveLanguage;
        let record = derive_record(&draft).unwrap();
        assert_eq!(record.elective.as_deref(), Some("French"));
        assert_eq!(record.subject, None);
        // The elective text still contributes to tags.
        assert!(record.tags.contains(&"French".to_string()));
    }

    #[test]
    fn empty_subject_becomes_sentinel_in_subject_branch() {
        let mut draft = mechanical_draft();
        draft.subject.clear();
        let record = derive_record(&draft).unwrap();
        assert_eq!(record.subject.as_deref(), Some(NONE_SENTINEL));
        // An empty subject contributes no tag.
        assert_eq!(record.tags, vec!["2nd Year", "Mechanical", "CT Paper"]);
    }

    #[test]
    fn empty_subject_rejected_in_elective_branch() {
        let mut draft = mechanical_draft();
        draft.subject.clear();
        draft.subject_type = SubjectType::ElectiveLanguage;
        assert!(derive_record(&draft).is_err());
    }

    // -- tag derivation ------------------------------------------------------

    #[test]
    fn tags_preserve_input_order() {
        let record = derive_record(&mechanical_draft()).unwrap();
        assert_eq!(record.tags, vec!["2nd Year", "Mechanical", "Thermo", "CT Paper"]);
    }

    #[test]
    fn tags_equal_filtered_source_fields_for_any_valid_draft() {
        for (subject, subject_type) in [
            ("Thermo", SubjectType::Subject),
            ("", SubjectType::Subject),
            ("German", SubjectType::ElectiveLanguage),
        ] {
            let mut draft = mechanical_draft();
            draft.subject = subject.into();
            draft.subject_type = subject_type;
            let record = derive_record(&draft).unwrap();
            let expected: Vec<String> = ["2nd Year", "Mechanical", subject, "CT Paper"]
                .iter()
                .filter(|t| !t.is_empty())
                .map(|t| t.to_string())
                .collect();
            assert_eq!(record.tags, expected);
        }
    }

    // -- record serialization ------------------------------------------------

    #[test]
    fn record_serializes_to_collaborator_columns() {
        let record = derive_record(&mechanical_draft()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["year"], "2nd Year");
        assert_eq!(value["resource_type"], "CT Paper");
        assert_eq!(value["file_urls"], serde_json::json!(["a.pdf", "b.pdf"]));
        assert_eq!(value["elective"], serde_json::Value::Null);
    }
}
