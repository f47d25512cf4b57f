//! Remote REST records.
//!
//! Records are stored verbatim: fields this crate doesn't model are kept in
//! `extra` so a fetched record serializes back to what the server sent.
//! Modelled fields that are missing or null decode to their defaults, so a
//! partial record never fails a whole list.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// address, phone, website, company, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /posts`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_keeps_unmodelled_fields() {
        let raw = json!({
            "id": 3,
            "name": "Clementine Bauch",
            "username": "Samantha",
            "email": "Nathan@yesenia.net",
            "phone": "1-463-123-4447",
            "company": { "name": "Romaguera-Jacobson" }
        });

        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.extra["phone"], "1-463-123-4447");
        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn post_uses_camel_case_user_id() {
        let post: Post =
            serde_json::from_value(json!({"id": 1, "userId": 7, "title": "t", "body": "b"}))
                .unwrap();
        assert_eq!(post.user_id, 7);
        assert!(post.extra.is_empty());

        let body = serde_json::to_value(NewPost {
            user_id: 7,
            title: "t".into(),
            body: "b".into(),
        })
        .unwrap();
        assert_eq!(body, json!({"userId": 7, "title": "t", "body": "b"}));
    }

    #[test]
    fn partial_records_decode_with_defaults() {
        let users: Vec<User> = serde_json::from_value(json!([
            {"id": 1, "username": "bret"},
            {"id": 2, "name": "Ervin", "email": null}
        ]))
        .unwrap();
        assert_eq!(users[0].name, "");
        assert_eq!(users[0].username, "bret");
        assert_eq!(users[1].name, "Ervin");
        assert_eq!(users[1].email, "");

        let post: Post = serde_json::from_value(json!({"id": 5, "userId": null})).unwrap();
        assert_eq!(post.user_id, 0);
        assert!(post.extra.is_empty());
    }

    #[test]
    fn non_record_items_still_fail() {
        assert!(serde_json::from_value::<Vec<User>>(json!(["bret"])).is_err());
    }
}
