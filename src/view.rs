use leptos::prelude::*;

use crate::{course::Course, lifecycle::CourseState, state::FetchState};

/// Everything a single course card displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardModel {
    /// Stable key for keyed rendering; always the course identifier.
    pub key: String,
    pub title: String,
    pub description: String,
    pub image: String,
    /// Where the card's action navigates to.
    pub href: String,
}

impl From<&Course> for CourseCardModel {
    fn from(course: &Course) -> Self {
        Self {
            key: course.id.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            image: course.image_link.clone(),
            href: course.detail_path(),
        }
    }
}

/// One card per course, in the order given.
pub fn compose(courses: &[Course]) -> Vec<CourseCardModel> {
    courses.iter().map(CourseCardModel::from).collect()
}

#[component]
pub fn CourseCard(card: CourseCardModel) -> impl IntoView {
    let CourseCardModel {
        title,
        description,
        image,
        href,
        ..
    } = card;
    view! {
        <div class="course-card">
            <img class="course-card-image" src=image alt=title.clone()/>
            <h3 class="course-card-title">{title}</h3>
            <p class="course-card-description">{description}</p>
            <a class="course-card-action" href=href>"View course"</a>
        </div>
    }
}

#[component]
pub fn CourseCards(courses: Vec<Course>) -> impl IntoView {
    if courses.is_empty() {
        return view! { <p class="course-empty">"No courses available."</p> }.into_any();
    }
    let cards = compose(&courses);
    view! {
        <div class="course-cards">
            <For
                each=move || cards.clone()
                key=|card: &CourseCardModel| card.key.clone()
                children=|card: CourseCardModel| view! { <CourseCard card=card/> }
            />
        </div>
    }
    .into_any()
}

#[component]
pub fn Loading() -> impl IntoView {
    view! { <p class="course-loading">"Loading courses..."</p> }
}

#[component]
pub fn FetchFailed(message: String) -> impl IntoView {
    view! {
        <p class="course-error" role="alert">
            "Unable to load courses: "{message}
        </p>
    }
}

/// The view for any point in the fetch lifecycle.
///
/// Failures get their own view, never the loading one, so a failed
/// fetch can't be mistaken for one that is still in flight.
pub fn render_state(state: CourseState) -> AnyView {
    match state {
        FetchState::Unstarted | FetchState::Pending => view! { <Loading/> }.into_any(),
        FetchState::Succeeded(courses) => view! { <CourseCards courses=courses/> }.into_any(),
        FetchState::Failed(error) => {
            view! { <FetchFailed message=error.to_string()/> }.into_any()
        }
    }
}
