use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// A record from the placeholder `/posts` collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub body: String,
}

/// A record from the placeholder `/comments` collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: u32,
    pub id: u32,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// One entry of the local `users.json` record set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: u32,
    pub id: u32,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// What the placeholder echoes back after a form-encoded create.
///
/// Form values travel as strings, so `userId` comes back as a string while
/// `id` is assigned by the remote side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPost {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_record_round_trips_field_for_field() {
        let rec = UserRecord {
            user_id: 1,
            id: 7,
            name: "Leanne Graham".into(),
            email: "Sincere@april.biz".into(),
            body: "quia et suscipit".into(),
        };
        let js = serde_json::to_string(&rec).unwrap();
        assert!(js.contains("\"userId\":1"));
        let back: UserRecord = serde_json::from_str(&js).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn comment_uses_camel_case_post_id() {
        let raw = r#"{"postId":2,"id":6,"name":"et fugit","email":"Presley.Mueller@myrl.com","body":"doloribus"}"#;
        let c: Comment = serde_json::from_str(raw).unwrap();
        assert_eq!(c.post_id, 2);
        assert_eq!(c.name, "et fugit");
    }

    #[test]
    fn created_post_accepts_string_user_id() {
        let raw = r#"{"title":"t","body":"b","userId":"999","id":101}"#;
        let p: CreatedPost = serde_json::from_str(raw).unwrap();
        assert_eq!(p.user_id, "999");
        assert_eq!(p.id, 101);
        assert_eq!(p.title, "t");
    }
}
