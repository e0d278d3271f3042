use serde::Serialize;

/// A registered account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub is_staff: bool,
    pub is_active: bool,
}

/// Values needed to create an account; the password is already hashed
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// Public view of a user, never exposing the password hash
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Lower-cases the domain part of an email address, leaving the local part untouched
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_lowercases_domain_only() {
        assert_eq!(normalize_email("Jane.Doe@Example.COM"), "Jane.Doe@example.com");
    }

    #[test]
    fn test_normalize_email_without_at_sign() {
        assert_eq!(normalize_email(" nobody "), "nobody");
    }

    #[test]
    fn test_profile_hides_password_hash() {
        let user = User {
            id: 1,
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            is_admin: false,
            is_staff: false,
            is_active: true,
        };

        let json = serde_json::to_value(UserProfile::from(&user)).unwrap();
        assert_eq!(json["username"], "jane");
        assert!(json.get("password_hash").is_none());
    }
}
