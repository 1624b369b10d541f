//! Combinators for issuing more than one fetch.
//!
//! Awaiting independent requests one after the other forms a request
//! waterfall, where the total latency is the sum of every request.
//! [`sequential`] does exactly that and is kept around for comparison;
//! [`concurrent`] should be used instead whenever the requests don't
//! depend on each other, and [`dependent`] when they truly do.

use std::future::Future;

use crate::{course::Course, error::FetchError, fetcher::CourseSource};

/// Await `a`, then `b`.
pub async fn sequential<A, B, TA, TB, E>(a: A, b: B) -> Result<(TA, TB), E>
where
    A: Future<Output = Result<TA, E>>,
    B: Future<Output = Result<TB, E>>,
{
    let a = a.await?;
    let b = b.await?;
    Ok((a, b))
}

/// Await `a` and `b` together; the first error is returned.
pub async fn concurrent<A, B, TA, TB, E>(a: A, b: B) -> Result<(TA, TB), E>
where
    A: Future<Output = Result<TA, E>>,
    B: Future<Output = Result<TB, E>>,
{
    futures::try_join!(a, b)
}

/// Await `first`, then build and await the second request from its
/// result.
pub async fn dependent<A, F, B, TA, TB, E>(first: A, then: F) -> Result<TB, E>
where
    A: Future<Output = Result<TA, E>>,
    F: FnOnce(TA) -> B,
    B: Future<Output = Result<TB, E>>,
{
    let value = first.await?;
    then(value).await
}

/// Fetch the listing, then the full record of its first course.
///
/// An empty listing resolves to `None` without a second request.
pub async fn first_course_detail<S>(source: &S) -> Result<Option<Course>, FetchError>
where
    S: CourseSource + ?Sized,
{
    dependent(source.fetch_courses(), |courses| async move {
        match courses.first() {
            Some(course) => source.fetch_course(&course.id).await.map(Some),
            None => Ok(None),
        }
    })
    .await
}
