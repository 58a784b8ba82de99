use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// A blog post as held by the upstream service.
///
/// `id` is assigned upstream. Some backends echo it back as a numeric
/// string, so both forms are accepted when decoding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub id: i64,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId", deserialize_with = "int_or_numeric_string")]
    pub user_id: i64,
}

fn int_or_numeric_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid integer: {s:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_uses_upstream_field_names() {
        let post: Post = serde_json::from_value(json!({
            "id": 1, "title": "a", "body": "b", "userId": 1
        }))
        .unwrap();
        assert_eq!(post.user_id, 1);
        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({"id": 1, "title": "a", "body": "b", "userId": 1})
        );
    }

    #[test]
    fn post_accepts_numeric_string_id() {
        let post: Post = serde_json::from_value(json!({
            "id": "5", "title": "t", "body": "b", "userId": 1
        }))
        .unwrap();
        assert_eq!(post.id, 5);
    }

    #[test]
    fn post_rejects_non_numeric_id() {
        let res = serde_json::from_value::<Post>(json!({
            "id": "abc", "title": "t", "body": "b", "userId": 1
        }));
        assert!(res.is_err());
    }

    #[test]
    fn post_rejects_missing_fields() {
        assert!(serde_json::from_value::<Post>(json!({})).is_err());
    }
}
