use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Transportation value meaning the family brings the student themselves.
pub const SELF_ARRANGE: &str = "自行前往";

/// Transportation and pickup point picked for one course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseSelection {
    #[serde(deserialize_with = "null_as_default")]
    pub transportation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
}

impl CourseSelection {
    pub fn is_self_arranged(&self) -> bool {
        self.transportation == SELF_ARRANGE
    }
}

/// Survey form as sent by a client. Absent and `null` fields decode as
/// empty. Course keys must still be integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewSubmission {
    #[serde(deserialize_with = "null_as_default")]
    pub student_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub school_grade: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub branch: String,
    #[serde(deserialize_with = "null_as_default")]
    pub diet: String,
    /// Catalog index -> choices for that course.
    #[serde(deserialize_with = "null_as_default")]
    pub selected_courses: BTreeMap<usize, CourseSelection>,
}

impl NewSubmission {
    pub fn stamp(self, submitted_at: DateTime<Utc>) -> Submission {
        Submission {
            student_name: self.student_name,
            school_grade: self.school_grade,
            parent_phone: self.parent_phone,
            branch: self.branch,
            diet: self.diet,
            selected_courses: self.selected_courses,
            submitted_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub student_name: String,
    pub school_grade: String,
    pub parent_phone: String,
    pub branch: String,
    pub diet: String,
    pub selected_courses: BTreeMap<usize, CourseSelection>,
    #[serde(with = "iso_millis")]
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// The submitted form without its timestamp.
    pub fn form(&self) -> NewSubmission {
        NewSubmission {
            student_name: self.student_name.clone(),
            school_grade: self.school_grade.clone(),
            parent_phone: self.parent_phone.clone(),
            branch: self.branch.clone(),
            diet: self.diet.clone(),
            selected_courses: self.selected_courses.clone(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `2025-06-01T08:30:00.123Z`, the shape browsers produce with `toISOString`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn missing_fields_decode_as_empty() {
        let form: NewSubmission = serde_json::from_value(json!({ "studentName": "Amy" })).unwrap();
        assert_eq!(form.student_name, "Amy");
        assert!(form.branch.is_empty());
        assert!(form.selected_courses.is_empty());
    }

    #[test]
    fn null_fields_decode_as_empty() {
        let form: NewSubmission = serde_json::from_value(json!({
            "studentName": null,
            "diet": "葷食",
            "selectedCourses": { "2": { "transportation": null, "location": null } }
        }))
        .unwrap();
        assert!(form.student_name.is_empty());
        assert_eq!(form.diet, "葷食");
        assert_eq!(form.selected_courses[&2], CourseSelection::default());

        let form: NewSubmission =
            serde_json::from_value(json!({ "selectedCourses": null })).unwrap();
        assert!(form.selected_courses.is_empty());
    }

    #[test]
    fn non_integer_course_key_is_rejected() {
        let result = serde_json::from_value::<NewSubmission>(json!({
            "selectedCourses": { "x": {} }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn client_timestamp_is_ignored() {
        let form: NewSubmission = serde_json::from_value(json!({
            "studentName": "Amy",
            "submittedAt": "1999-01-01T00:00:00.000Z",
        }))
        .unwrap();
        let stamped = form.stamp(Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap());
        assert_eq!(stamped.submitted_at.to_rfc3339(), "2025-06-01T08:30:00+00:00");
    }

    #[test]
    fn course_keys_are_string_encoded_indices() {
        let form: NewSubmission = serde_json::from_value(json!({
            "selectedCourses": { "3": { "transportation": SELF_ARRANGE, "location": "" } }
        }))
        .unwrap();
        assert!(form.selected_courses[&3].is_self_arranged());

        let back = serde_json::to_value(&form).unwrap();
        assert!(back["selectedCourses"]["3"].is_object());
    }

    #[test]
    fn timestamp_serializes_with_millis() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
        let value = serde_json::to_value(NewSubmission::default().stamp(at)).unwrap();
        assert_eq!(value["submittedAt"], "2025-06-01T08:30:00.000Z");
    }
}
