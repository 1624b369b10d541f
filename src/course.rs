use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

/// The route prefix for the per-course detail page.
pub const COURSE_ROUTE_PREFIX: &str = "/course";

/// Bytes escaped within a single path segment; `/`, `?`, `#` and `%`
/// included, so a segment can never alter the rest of the path.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode `segment` for use as exactly one path segment.
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// A single course record as returned by the admin API.
///
/// Records are produced by the remote service and are never modified
/// once fetched; any fields on the wire that aren't listed here (such
/// as pricing or publication status) are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "imageLink")]
    pub image_link: String,
}

impl Course {
    /// The path to the detail page for this course, i.e. `/course/<id>`,
    /// with the id encoded as a single path segment.
    pub fn detail_path(&self) -> String {
        format!("{COURSE_ROUTE_PREFIX}/{}", encode_path_segment(&self.id))
    }
}

/// Envelope for the course listing endpoint.
///
/// The `courses` field is required - a body without it is a malformed
/// response and not an empty listing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CoursesPayload {
    pub courses: Vec<Course>,
}

/// Envelope for the single course endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CoursePayload {
    pub course: Course,
}
