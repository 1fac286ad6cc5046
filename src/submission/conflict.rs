use crate::models::Course;

/// Half-open `[start, end)` overlap, so back-to-back sessions do not clash.
pub fn overlaps(a: &Course, b: &Course) -> bool {
    a.time_start < b.time_end && a.time_end > b.time_start
}

/// Two sessions clash when they share a date and their windows overlap.
pub fn clashes(a: &Course, b: &Course) -> bool {
    a.date == b.date && overlaps(a, b)
}

/// First clashing pair among `courses`, as positions into the slice.
pub fn find_conflict(courses: &[&Course]) -> Option<(usize, usize)> {
    for (i, a) in courses.iter().enumerate() {
        for (j, b) in courses.iter().enumerate().skip(i + 1) {
            if clashes(a, b) {
                return Some((i, j));
            }
        }
    }
    None
}
