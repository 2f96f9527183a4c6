//! Assigned-users cell payload

use serde::Deserialize;
use serde::Serialize;

/// Users assigned to a cell, with a precomputed display string.
///
/// The individual user records are kept exactly as the sheet service sent
/// them; only their `user` field is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserList {
    /// Comma-separated user names.
    pub text: String,
    /// The original user records.
    pub users: Vec<serde_json::Value>,
}

impl UserList {
    /// Builds a user list from raw user records, joining their `user` names.
    ///
    /// Records without a string `user` field contribute an empty name.
    pub fn from_records(users: Vec<serde_json::Value>) -> Self {
        let text = users
            .iter()
            .map(|u| u.get("user").and_then(|n| n.as_str()).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(", ");
        Self { text, users }
    }

    /// Returns the number of users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if no users are assigned.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_records_joins_names() {
        let list = UserList::from_records(vec![
            json!({"user": "Ann", "id": 1}),
            json!({"user": "Bo", "id": 2}),
        ]);
        assert_eq!(list.text, "Ann, Bo");
        assert_eq!(list.len(), 2);
        assert_eq!(list.users[0]["id"], 1);
    }
}
