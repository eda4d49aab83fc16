//! User domain models.

use serde::Deserialize;

/// City reference as returned by the API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct City {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A user record as returned by the user-info call.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub screen_name: Option<String>,
    #[serde(default)]
    pub sex: Option<i64>,
    #[serde(default)]
    pub home_town: Option<String>,
    #[serde(default)]
    pub city: Option<City>,
}

impl UserInfo {
    /// Display name: first and last name joined by a space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// The attributes stored on a `User` node.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub screen_name: Option<String>,
    pub sex: Option<i64>,
    pub home_town: Option<String>,
    pub city: Option<String>,
}

impl From<&UserInfo> for UserRecord {
    fn from(info: &UserInfo) -> Self {
        Self {
            id: info.id,
            name: info.display_name(),
            screen_name: info.screen_name.clone(),
            sex: info.sex,
            home_town: info.home_town.clone(),
            city: info.city.as_ref().and_then(|c| c.title.clone()),
        }
    }
}
