use crate::models::{Catalog, Course, NewSubmission};
use crate::submission::conflict;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicField {
    StudentName,
    SchoolGrade,
    ParentPhone,
    Branch,
    Diet,
}

impl BasicField {
    pub fn label(self) -> &'static str {
        match self {
            BasicField::StudentName => "學生姓名",
            BasicField::SchoolGrade => "學校年級",
            BasicField::ParentPhone => "手機號碼",
            BasicField::Branch => "所屬分校",
            BasicField::Diet => "飲食習慣",
        }
    }
}

/// Why a form may not be sent yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(BasicField),
    NoCourseSelected,
    /// Selected index has no catalog entry.
    UnknownCourse(usize),
    MissingTransportation { index: usize, course: String },
    MissingLocation { index: usize, course: String },
    /// The chosen pickup point is not offered for this course.
    UnavailableLocation {
        index: usize,
        course: String,
        location: String,
    },
    /// Deliberately does not say which sessions clash.
    ScheduleConflict,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "請填寫{}！", field.label()),
            ValidationError::NoCourseSelected => write!(f, "請至少選擇一門課程！"),
            ValidationError::UnknownCourse(index) => write!(f, "課程 #{index} 不存在！"),
            ValidationError::MissingTransportation { course, .. } => {
                write!(f, "請為 {course} 選擇交通方式！")
            }
            ValidationError::MissingLocation { course, .. } => {
                write!(f, "請為 {course} 選擇上課地點！")
            }
            ValidationError::UnavailableLocation {
                course, location, ..
            } => write!(f, "{course} 沒有開放「{location}」地點，請重新選擇！"),
            ValidationError::ScheduleConflict => write!(f, "所選課程時間衝突，請重新選擇！"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Gate run before every submission attempt. Checks, in order: basic
/// fields, course count, per-course choices, then same-day time clashes.
/// A pickup point must be one the course offers.
pub fn validate(form: &NewSubmission, catalog: &Catalog) -> Result<(), ValidationError> {
    let basics = [
        (BasicField::StudentName, &form.student_name),
        (BasicField::SchoolGrade, &form.school_grade),
        (BasicField::ParentPhone, &form.parent_phone),
        (BasicField::Branch, &form.branch),
        (BasicField::Diet, &form.diet),
    ];
    if let Some((field, _)) = basics.iter().find(|(_, value)| value.is_empty()) {
        return Err(ValidationError::MissingField(*field));
    }

    if form.selected_courses.is_empty() {
        return Err(ValidationError::NoCourseSelected);
    }

    let mut chosen: Vec<&Course> = Vec::with_capacity(form.selected_courses.len());
    for (&index, selection) in &form.selected_courses {
        let course = catalog
            .get(index)
            .ok_or(ValidationError::UnknownCourse(index))?;

        if selection.transportation.is_empty() {
            return Err(ValidationError::MissingTransportation {
                index,
                course: course.label(),
            });
        }
        if !selection.is_self_arranged() {
            if selection.location.is_empty() {
                return Err(ValidationError::MissingLocation {
                    index,
                    course: course.label(),
                });
            }
            if !course
                .available_locations()
                .any(|offered| offered == selection.location)
            {
                return Err(ValidationError::UnavailableLocation {
                    index,
                    course: course.label(),
                    location: selection.location.clone(),
                });
            }
        }

        chosen.push(course);
    }

    if conflict::find_conflict(&chosen).is_some() {
        return Err(ValidationError::ScheduleConflict);
    }

    Ok(())
}
