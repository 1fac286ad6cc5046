use chrono::{SubsecRound, Utc};

use crate::db::{Store, StoreError};
use crate::models::{NewSubmission, Submission};

/// Stamp the form with the current time and add it to the end of the file.
pub async fn append(store: &Store, form: NewSubmission) -> Result<Submission, StoreError> {
    // Millisecond precision is all the file keeps.
    let submission = form.stamp(Utc::now().trunc_subsecs(3));

    let mut existing = store.read_all().await?;
    existing.push(submission.clone());
    store.write_all(&existing).await?;

    tracing::debug!(
        total = existing.len(),
        path = %store.path().display(),
        "Submission appended"
    );

    Ok(submission)
}

/// All submissions, oldest first.
pub async fn list(store: &Store) -> Result<Vec<Submission>, StoreError> {
    store.read_all().await
}
