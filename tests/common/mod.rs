#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use leptos_fetch_lifecycle::{
    fetcher::{CourseSource, HttpRequest, HttpResponse, Transport},
    Course, FetchError,
};
use tokio::sync::Notify;

pub fn course(id: &str, title: &str) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("All about {title}"),
        image_link: format!("https://img.example.com/{id}.png"),
    }
}

/// A transport that answers every request with the same canned outcome
/// and records the requests it was given.
#[derive(Clone)]
pub struct CannedTransport {
    outcome: Result<HttpResponse, FetchError>,
    delay: Duration,
    pub requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl CannedTransport {
    pub fn ok(status: u16, body: &str) -> Self {
        Self {
            outcome: Ok(HttpResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
            delay: Duration::ZERO,
            requests: Default::default(),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            outcome: Err(FetchError::network("connection refused")),
            delay: Duration::ZERO,
            requests: Default::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push(request);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }
}

/// A course source with a fixed result, optionally held back until
/// released or delayed by some duration.
#[derive(Clone)]
pub struct StubSource {
    result: Result<Vec<Course>, FetchError>,
    delay: Duration,
    gate: Option<Arc<Notify>>,
}

impl StubSource {
    pub fn ok(courses: Vec<Course>) -> Self {
        Self {
            result: Ok(courses),
            delay: Duration::ZERO,
            gate: None,
        }
    }

    pub fn err(error: FetchError) -> Self {
        Self {
            result: Err(error),
            delay: Duration::ZERO,
            gate: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Hold the fetch until the returned `Notify` is notified.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }
}

#[async_trait]
impl CourseSource for StubSource {
    async fn fetch_courses(&self) -> Result<Vec<Course>, FetchError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }

    async fn fetch_course(&self, id: &str) -> Result<Course, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let courses = self.result.clone()?;
        courses
            .into_iter()
            .find(|course| course.id == id)
            .ok_or_else(|| FetchError::network(format!("status 404: no course {id}")))
    }
}

/// A course source that holds every fetch until released, counting how
/// many fetches were started and how many ran to completion.
#[derive(Clone)]
pub struct CountingSource {
    courses: Vec<Course>,
    gate: Arc<Notify>,
    started: Arc<AtomicUsize>,
    finished: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            gate: Arc::new(Notify::new()),
            started: Default::default(),
            finished: Default::default(),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CourseSource for CountingSource {
    async fn fetch_courses(&self) -> Result<Vec<Course>, FetchError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(self.courses.clone())
    }

    async fn fetch_course(&self, id: &str) -> Result<Course, FetchError> {
        Err(FetchError::network(format!("status 404: no course {id}")))
    }
}
