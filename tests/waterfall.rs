mod common;

use std::time::Duration;

use common::{course, StubSource};
use leptos_fetch_lifecycle::{
    fetcher::CourseSource,
    waterfall::{concurrent, dependent, first_course_detail, sequential},
    FetchError,
};
use tokio::time::Instant;

const LATENCY: Duration = Duration::from_millis(100);

fn assert_latency(elapsed: Duration, expected: Duration) {
    assert!(
        elapsed >= expected && elapsed < expected + LATENCY / 2,
        "took {elapsed:?}, expected about {expected:?}",
    );
}

fn source() -> StubSource {
    StubSource::ok(vec![course("1", "A"), course("2", "B")]).with_delay(LATENCY)
}

#[tokio::test(start_paused = true)]
async fn sequential_adds_up_latency() -> anyhow::Result<()> {
    let source = source();
    let start = Instant::now();
    let (courses, detail) = sequential(source.fetch_courses(), source.fetch_course("2")).await?;
    assert_latency(start.elapsed(), LATENCY * 2);
    assert_eq!(courses.len(), 2);
    assert_eq!(detail.title, "B");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn concurrent_takes_the_longest() -> anyhow::Result<()> {
    let source = source();
    let start = Instant::now();
    let (courses, detail) = concurrent(source.fetch_courses(), source.fetch_course("2")).await?;
    assert_latency(start.elapsed(), LATENCY);
    assert_eq!(courses.len(), 2);
    assert_eq!(detail.title, "B");
    Ok(())
}

#[tokio::test]
async fn concurrent_propagates_failure() {
    let source = StubSource::ok(vec![course("1", "A")]);
    let result = concurrent(source.fetch_courses(), source.fetch_course("missing")).await;
    assert!(matches!(result, Err(FetchError::Network(_))));
}

#[tokio::test(start_paused = true)]
async fn dependent_chain() -> anyhow::Result<()> {
    let source = source();
    let start = Instant::now();
    let detail = first_course_detail(&source).await?;
    assert_latency(start.elapsed(), LATENCY * 2);
    assert_eq!(detail.map(|course| course.title), Some("A".to_string()));
    Ok(())
}

#[tokio::test]
async fn dependent_chain_stops_on_empty_listing() -> anyhow::Result<()> {
    let source = StubSource::ok(vec![]);
    assert_eq!(first_course_detail(&source).await?, None);
    Ok(())
}

#[tokio::test]
async fn dependent_chain_stops_on_error() {
    let result = dependent(
        async { Err::<u32, _>(FetchError::auth("expired")) },
        |_| async { Ok::<_, FetchError>("unreachable") },
    )
    .await;
    assert_eq!(result, Err(FetchError::auth("expired")));
}
