use common::types::Post;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Outcome of a gateway operation.
///
/// Serialises as `{"success": true, ..payload}` or
/// `{"success": false, "message": ".."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult<T> {
    Success(T),
    Failure { status: u16, message: String },
}

impl<T> ActionResult<T> {
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self::Failure { status, message: message.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Success(_) => 200,
            Self::Failure { status, .. } => *status,
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure { .. } => None,
        }
    }
}

#[derive(Serialize)]
struct SuccessBody<'a, T> {
    success: bool,
    #[serde(flatten)]
    payload: &'a T,
}

#[derive(Serialize)]
struct FailureBody<'a> {
    success: bool,
    message: &'a str,
}

impl<T: Serialize> Serialize for ActionResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(payload) => SuccessBody { success: true, payload }.serialize(serializer),
            Self::Failure { message, .. } => FailureBody { success: false, message }.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostList {
    pub posts: Vec<Post>,
}

/// The upstream echo of a created post, exactly as parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedPost {
    #[serde(rename = "newPost")]
    pub new_post: Value,
}

/// The upstream echo of an updated post, exactly as parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedPost {
    #[serde(rename = "updatedPost")]
    pub updated_post: Value,
}

/// `id` is `None` (JSON `null`) when the submitted id has no numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedPost {
    pub id: Option<Number>,
}
