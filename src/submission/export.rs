use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::{Catalog, Course, CourseSelection, Submission};

const CSV_HEADER: [&str; 7] = [
    "學生姓名",
    "學校年級",
    "手機號碼",
    "所屬分校",
    "飲食習慣",
    "報名課程",
    "提交時間",
];

/// `date｜subject｜name - transportation（location）`; the location is left
/// off for self-arranged transport.
pub fn describe_selection(course: Option<&Course>, index: usize, selection: &CourseSelection) -> String {
    let mut line = match course {
        Some(c) => format!("{}｜{}｜{} - {}", c.date, c.subject, c.name, selection.transportation),
        None => format!("#{index} - {}", selection.transportation),
    };
    if !selection.is_self_arranged() {
        let _ = write!(line, "（{}）", selection.location);
    }
    line
}

/// UTC, whole seconds: `2025-06-01T08:30:00Z`. Shared by the CSV and the
/// dashboard so both show the same instant the same way.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn describe_courses(submission: &Submission, catalog: &Catalog) -> Vec<String> {
    submission
        .selected_courses
        .iter()
        .map(|(&index, selection)| describe_selection(catalog.get(index), index, selection))
        .collect()
}

/// One quoted row per submission, in the order given.
pub fn export_csv(submissions: &[Submission], catalog: &Catalog) -> String {
    let mut csv = String::new();
    push_row(&mut csv, CSV_HEADER.iter().copied());

    for sub in submissions {
        let courses = describe_courses(sub, catalog).join("\n");
        let submitted_at = format_timestamp(&sub.submitted_at);
        push_row(
            &mut csv,
            [
                sub.student_name.as_str(),
                sub.school_grade.as_str(),
                sub.parent_phone.as_str(),
                sub.branch.as_str(),
                sub.diet.as_str(),
                courses.as_str(),
                submitted_at.as_str(),
            ],
        );
    }

    csv
}

fn push_row<'a>(csv: &mut String, cells: impl IntoIterator<Item = &'a str>) {
    let row: Vec<String> = cells.into_iter().map(csv_quote).collect();
    let _ = writeln!(csv, "{}", row.join(","));
}

fn csv_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewSubmission, SELF_ARRANGE};
    use chrono::{TimeZone, Utc};

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[{ "date": "7/1", "timeStart": "09:00", "timeEnd": "10:00",
                  "subject": "數學", "name": "分數", "lecturer": "A" }]"#,
        )
        .unwrap()
    }

    fn submission(name: &str, selections: &[(usize, &str, &str)]) -> Submission {
        let form = NewSubmission {
            student_name: name.to_string(),
            school_grade: "五福二".to_string(),
            parent_phone: "0912".to_string(),
            branch: "站前".to_string(),
            diet: "素食".to_string(),
            selected_courses: selections
                .iter()
                .map(|(i, t, l)| {
                    (
                        *i,
                        CourseSelection {
                            transportation: t.to_string(),
                            location: l.to_string(),
                        },
                    )
                })
                .collect(),
        };
        form.stamp(Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap())
    }

    #[test]
    fn timestamps_render_in_utc_without_fraction() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap() + chrono::Duration::milliseconds(123);
        assert_eq!(format_timestamp(&at), "2025-06-01T08:30:00Z");

        let taipei = chrono::FixedOffset::east_opt(8 * 3600).unwrap();
        let local = taipei.with_ymd_and_hms(2025, 6, 1, 16, 30, 0).unwrap();
        assert_eq!(format_timestamp(&local.with_timezone(&Utc)), "2025-06-01T08:30:00Z");
    }

    #[test]
    fn self_arranged_omits_location() {
        let catalog = catalog();
        let sel = CourseSelection {
            transportation: SELF_ARRANGE.to_string(),
            location: "站前".to_string(),
        };
        assert_eq!(
            describe_selection(catalog.get(0), 0, &sel),
            "7/1｜數學｜分數 - 自行前往"
        );
    }

    #[test]
    fn bus_includes_location_and_unknown_index_falls_back() {
        let sel = CourseSelection {
            transportation: "搭乘交通車 - 來回".to_string(),
            location: "站前".to_string(),
        };
        assert_eq!(
            describe_selection(None, 9, &sel),
            "#9 - 搭乘交通車 - 來回（站前）"
        );
    }

    #[test]
    fn csv_quotes_every_cell() {
        let rows = [submission("Amy \"A\"", &[(0, SELF_ARRANGE, "")])];
        let csv = export_csv(&rows, &catalog());
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("\"學生姓名\",\"學校年級\",\"手機號碼\",\"所屬分校\",\"飲食習慣\",\"報名課程\",\"提交時間\"")
        );
        assert_eq!(
            lines.next(),
            Some("\"Amy \"\"A\"\"\",\"五福二\",\"0912\",\"站前\",\"素食\",\"7/1｜數學｜分數 - 自行前往\",\"2025-06-01T08:30:00Z\"")
        );
    }

    #[test]
    fn multiple_courses_share_one_cell() {
        let rows = [submission("Amy", &[(0, SELF_ARRANGE, ""), (5, "搭乘交通車 - 去程", "楠梓")])];
        let csv = export_csv(&rows, &catalog());
        assert!(csv.contains("\"7/1｜數學｜分數 - 自行前往\n#5 - 搭乘交通車 - 去程（楠梓）\""));
    }
}
