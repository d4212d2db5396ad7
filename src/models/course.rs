/// Course documents with embedded, ordered steps.
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::review::ReviewDetail;
use super::user::UserSummary;
use super::validation::Schema;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_number: Option<i32>,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Owning user
    pub user: ObjectId,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials_needed: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub reviews: Vec<ObjectId>,
}

/// Projection used when listing courses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StepPayload {
    pub step_number: Option<i32>,
    #[validate(required, length(min = 1, code = "required"))]
    pub title: Option<String>,
    #[validate(required, length(min = 1, code = "required"))]
    pub description: Option<String>,
}

/// POST and PUT /api/courses body. Any `user` or `reviews` in the body are
/// ignored: ownership comes from the credentials and reviews have their own
/// route.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    #[validate(required, length(min = 1, code = "required"))]
    pub title: Option<String>,
    #[validate(required, length(min = 1, code = "required"))]
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub steps: Vec<StepPayload>,
}

impl Schema for CoursePayload {
    const MODEL: &'static str = "Course";
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("user", "user"),
        ("title", "title"),
        ("description", "description"),
        ("estimated_time", "estimatedTime"),
        ("materials_needed", "materialsNeeded"),
        ("steps", "steps"),
        ("step_number", "stepNumber"),
        ("reviews", "reviews"),
    ];
}

impl CoursePayload {
    /// Builds the document. Call only after [`Schema::check`] succeeded.
    pub fn into_course(self, owner: ObjectId, reviews: Vec<ObjectId>) -> Course {
        Course {
            id: None,
            user: owner,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            estimated_time: self.estimated_time,
            materials_needed: self.materials_needed,
            steps: self
                .steps
                .into_iter()
                .map(|step| Step {
                    step_number: step.step_number,
                    title: step.title.unwrap_or_default(),
                    description: step.description.unwrap_or_default(),
                })
                .collect(),
            reviews,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseListItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
}

impl From<CourseSummary> for CourseListItem {
    fn from(summary: CourseSummary) -> Self {
        CourseListItem {
            id: summary.id.to_hex(),
            title: summary.title,
        }
    }
}

/// Course as returned after a write, with references left as ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials_needed: Option<String>,
    pub steps: Vec<Step>,
    pub reviews: Vec<String>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        CourseResponse {
            id: course.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            user: course.user.to_hex(),
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
            steps: course.steps,
            reviews: course.reviews.into_iter().map(|id| id.to_hex()).collect(),
        }
    }
}

/// Course with owner and reviews populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    #[serde(rename = "_id")]
    pub id: String,
    /// `None` when the owner document no longer exists
    pub user: Option<UserSummary>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials_needed: Option<String>,
    pub steps: Vec<Step>,
    pub reviews: Vec<ReviewDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> CoursePayload {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_payload_ignores_user_and_unknown_fields() {
        let p = payload(serde_json::json!({
            "title": "My first title!",
            "description": "My course description",
            "user": { "_id": "57029ed4795118be119cc437" },
            "extra": true,
            "steps": [{ "title": "step 1", "description": "My first Step" }]
        }));
        assert!(p.check().is_ok());

        let owner = ObjectId::new();
        let course = p.into_course(owner, Vec::new());
        assert_eq!(course.user, owner);
        assert_eq!(course.steps.len(), 1);
        assert_eq!(course.steps[0].step_number, None);
    }

    #[test]
    fn test_missing_title() {
        let err = payload(serde_json::json!({ "description": "d" }))
            .check()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Course validation failed: title: Path `title` is required."
        );
    }

    #[test]
    fn test_empty_body_reports_title_then_description() {
        let err = payload(serde_json::json!({})).check().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Course validation failed: title: Path `title` is required., \
             description: Path `description` is required."
        );
    }

    #[test]
    fn test_invalid_step_reports_nested_path() {
        let err = payload(serde_json::json!({
            "title": "t",
            "description": "d",
            "steps": [
                { "title": "one", "description": "first" },
                { "stepNumber": 2, "description": "second" }
            ]
        }))
        .check()
        .unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].path, "steps.1.title");
        assert_eq!(err.errors[0].message, "Path `title` is required.");
    }

    #[test]
    fn test_response_uses_hex_ids() {
        let owner = ObjectId::parse_str("57029ed4795118be119cc437").unwrap();
        let review = ObjectId::parse_str("57029ed4795118be119cc43e").unwrap();
        let course = Course {
            id: Some(ObjectId::parse_str("57029ed4795118be119cc43d").unwrap()),
            user: owner,
            title: "Build a Basic Bookcase".into(),
            description: "d".into(),
            estimated_time: None,
            materials_needed: None,
            steps: Vec::new(),
            reviews: vec![review],
        };
        let json = serde_json::to_value(CourseResponse::from(course)).unwrap();
        assert_eq!(json["_id"], "57029ed4795118be119cc43d");
        assert_eq!(json["user"], "57029ed4795118be119cc437");
        assert_eq!(json["reviews"][0], "57029ed4795118be119cc43e");
        assert!(json.get("estimatedTime").is_none());
    }
}
