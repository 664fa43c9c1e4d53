//! 门户凭据测试

use crate::internal::auth::structs::portal_credentials::PortalCredentials;

#[test]
fn base_url_gets_trailing_slash() {
    let credentials = PortalCredentials::new("user", "pwd", "https://portal.test/v1").unwrap();
    assert_eq!(credentials.base_url.as_str(), "https://portal.test/v1/");
    assert_eq!(credentials.username(), "user");
}

#[test]
fn rejects_empty_input() {
    assert!(PortalCredentials::new("", "pwd", "https://portal.test/").is_err());
    assert!(PortalCredentials::new("user", "pwd", "").is_err());
    assert!(PortalCredentials::new("user", "pwd", "not a url").is_err());
}

#[test]
fn equality_rules() {
    let a = PortalCredentials::new("user", "pwd", "https://a.test/").unwrap();
    let b = PortalCredentials::new("user", "pwd", "https://b.test/").unwrap();
    let c = PortalCredentials::new("user", "other", "https://a.test/").unwrap();

    assert_ne!(a, b);
    assert!(a.eq_only_account(&b));
    assert_ne!(a, c);
    assert!(!a.eq_only_account(&c));
    assert_eq!(a, a.clone());
}

#[test]
fn debug_hides_password() {
    let credentials = PortalCredentials::new("user", "hunter2", "https://a.test/").unwrap();
    assert!(!format!("{credentials:?}").contains("hunter2"));
}
