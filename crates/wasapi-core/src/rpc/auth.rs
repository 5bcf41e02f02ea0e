use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};

/// `Authorization` header value for the configured credentials.
///
/// Returns `None` when no password is set; the username alone never
/// produces a header.
pub fn basic_auth_header(username: &str, password: &str) -> Option<String> {
    if password.is_empty() {
        return None;
    }
    let encoded = BASE64_STANDARD.encode(format!("{username}:{password}"));
    Some(format!("Basic {encoded}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_header_without_password() {
        assert_eq!(basic_auth_header("", ""), None);
        assert_eq!(basic_auth_header("bob", ""), None);
    }

    #[test]
    fn header_encodes_user_and_password() {
        assert_eq!(
            basic_auth_header("bob", "secret").as_deref(),
            Some("Basic Ym9iOnNlY3JldA==")
        );
    }

    #[test]
    fn password_without_username_still_authenticates() {
        assert_eq!(
            basic_auth_header("", "secret").as_deref(),
            Some("Basic OnNlY3JldA==")
        );
    }
}
