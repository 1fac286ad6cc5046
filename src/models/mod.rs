pub mod course;
pub mod submission;

pub use course::{Catalog, CatalogError, Course};
pub use submission::{CourseSelection, NewSubmission, Submission, SELF_ARRANGE};
