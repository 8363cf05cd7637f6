use ee_core::User;

use serde::Serialize;

/// Public view of a user; never includes the password hash
#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserOut {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}
