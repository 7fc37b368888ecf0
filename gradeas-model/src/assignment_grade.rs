use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, NoneAsEmptyString, serde_as};
use tracing::{debug, trace};

use crate::location::Location;
use crate::paths::gradeas_path;
use crate::types::GraderType;

/// The grading type assigned to a piece of course content, along with where that content lives.
///
/// Serializes to the body sent to the content's `gradeas` endpoint, see [`Self::url_root`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentGrade {
    grader_type: Option<GraderType>,
    location: Option<Location>,
}

impl AssignmentGrade {
    pub fn new(grader_type: Option<GraderType>, location: Option<Location>) -> Self {
        Self {
            grader_type,
            location,
        }
    }

    /// Builds a grade from its initial attributes. An `assignment_url` takes precedence over a
    /// `location` given alongside it.
    #[tracing::instrument(level = "debug")]
    pub fn from_attributes(attributes: GradeAttributes) -> Result<Self> {
        let GradeAttributes {
            grader_type,
            assignment_url,
            location,
        } = attributes;

        let location = match assignment_url.filter(|url| !url.is_empty()) {
            Some(url) => {
                let parsed = url
                    .parse::<Location>()
                    .with_context(|| format!("could not parse assignment URL `{url}`"))?;
                debug!(%parsed, "parsed location from assignment URL");
                Some(parsed)
            }
            None => location,
        };

        Ok(Self::new(grader_type, location))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let attributes: GradeAttributes =
            serde_json::from_str(json).context("could not read grade attributes")?;
        Self::from_attributes(attributes)
    }

    pub fn grader_type(&self) -> Option<&GraderType> {
        self.grader_type.as_ref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    pub fn set_grader_type(&mut self, grader_type: Option<GraderType>) {
        self.grader_type = grader_type;
    }

    pub fn set_location(&mut self, location: Option<Location>) {
        self.location = location;
    }

    pub fn clear_location(&mut self) {
        self.set_location(None);
    }

    /// The endpoint grading data for this content is exchanged with, or an empty string when the
    /// location is not known.
    pub fn url_root(&self) -> String {
        let url_root = self.location.as_ref().map(gradeas_path).unwrap_or_default();
        trace!(%url_root);
        url_root
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("could not serialize assignment grade")
    }
}

/// The attribute mapping an [`AssignmentGrade`] is constructed from. Every key is optional, and an
/// empty `assignmentUrl` is treated as missing.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeAttributes {
    #[serde(default)]
    pub grader_type: Option<GraderType>,
    #[serde_as(as = "DefaultOnNull<NoneAsEmptyString>")]
    #[serde(default)]
    pub assignment_url: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl GradeAttributes {
    pub fn with_grader_type(mut self, grader_type: GraderType) -> Self {
        self.grader_type = Some(grader_type);
        self
    }

    pub fn with_assignment_url(mut self, assignment_url: String) -> Self {
        self.assignment_url = Some(assignment_url);
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade_for(url: &str) -> AssignmentGrade {
        let attributes = GradeAttributes::default().with_assignment_url(url.to_owned());
        AssignmentGrade::from_attributes(attributes).unwrap()
    }

    #[test]
    fn not_graded_without_location_has_empty_url_root() {
        let attributes = GradeAttributes::default().with_grader_type(GraderType::not_graded());
        let grade = AssignmentGrade::from_attributes(attributes).unwrap();

        assert!(!grade.has_location());
        assert_eq!(grade.url_root(), "");
    }

    #[test]
    fn assignment_url_becomes_location() {
        let grade = grade_for("org1/course1/cat1/name1");
        assert_eq!(grade.url_root(), "/org1/course1/cat1/name1/gradeas/");
        assert_eq!(grade.grader_type(), None);
    }

    #[test]
    fn url_root_is_idempotent() {
        let grade = grade_for("org1/course1/cat1/name1");
        assert_eq!(grade.url_root(), grade.url_root());
    }

    #[test]
    fn clearing_location_empties_url_root() {
        let mut grade = grade_for("org1/course1/cat1/name1");
        grade.clear_location();
        assert_eq!(grade.url_root(), "");
    }

    #[test]
    fn empty_assignment_url_is_ignored() {
        let grade = grade_for("");
        assert!(!grade.has_location());
    }

    #[test]
    fn assignment_url_wins_over_location() {
        let attributes = GradeAttributes::default()
            .with_location("a/b/c/d".parse().unwrap())
            .with_assignment_url("w/x/y/z".to_owned());
        let grade = AssignmentGrade::from_attributes(attributes).unwrap();
        assert_eq!(grade.url_root(), "/w/x/y/z/gradeas/");
    }

    #[test]
    fn location_is_used_without_assignment_url() {
        let attributes = GradeAttributes::default().with_location("a/b/c/d".parse().unwrap());
        let grade = AssignmentGrade::from_attributes(attributes).unwrap();
        assert_eq!(grade.url_root(), "/a/b/c/d/gradeas/");
    }

    #[test]
    fn malformed_assignment_url_is_an_error() {
        let attributes = GradeAttributes::default().with_assignment_url("a/b/c".to_owned());
        let err = AssignmentGrade::from_attributes(attributes).unwrap_err();
        assert!(format!("{err:#}").contains("could not parse assignment URL `a/b/c`"));
    }

    #[test]
    fn setters_replace_attributes() {
        let mut grade = AssignmentGrade::default();
        grade.set_location(Some("o/c/cat/n".parse().unwrap()));
        grade.set_grader_type(Some(GraderType::new("Lab".to_owned())));

        assert_eq!(grade.url_root(), "/o/c/cat/n/gradeas/");
        assert_eq!(grade.grader_type().map(GraderType::as_str), Some("Lab"));
    }

    #[test]
    fn reads_attributes_from_json() {
        let grade = AssignmentGrade::from_json(
            r#"{"graderType": "Not Graded", "assignmentUrl": "i4x://o/c/cat/n"}"#,
        )
        .unwrap();
        assert_eq!(grade.url_root(), "/o/c/cat/n/gradeas/");
        assert_eq!(grade.grader_type(), Some(&GraderType::not_graded()));
    }

    #[test]
    fn null_and_empty_assignment_urls_are_missing() {
        for json in [r#"{"assignmentUrl": null}"#, r#"{"assignmentUrl": ""}"#, "{}"] {
            let grade = AssignmentGrade::from_json(json).unwrap();
            assert!(!grade.has_location(), "{json}");
        }
    }

    #[test]
    fn serializes_unset_fields_as_null() {
        let json = AssignmentGrade::default().to_json().unwrap();
        assert_eq!(json, r#"{"graderType":null,"location":null}"#);
    }

    #[test]
    fn serializes_payload() {
        let mut grade = grade_for("o/c/cat/n");
        grade.set_grader_type(Some(GraderType::new("Homework".to_owned())));
        assert_eq!(
            grade.to_json().unwrap(),
            r#"{"graderType":"Homework","location":"i4x://o/c/cat/n"}"#
        );
    }
}
