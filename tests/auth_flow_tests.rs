//! Tests for the account and session flows.

use studyplan_rust::db::repositories::LocalRepository;
use studyplan_rust::db::repository::RepositoryError;
use studyplan_rust::services::users;

#[tokio::test]
async fn test_register_login_roundtrip() {
    let repo = LocalRepository::new();

    let id = users::register(&repo, "ada", "hunter2", "ada@example.com")
        .await
        .unwrap();

    assert_eq!(users::login(&repo, "ada", "hunter2").await.unwrap(), Some(id));
    assert_eq!(users::login(&repo, "ada", "nope").await.unwrap(), None);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let repo = LocalRepository::new();
    users::register(&repo, "ada", "hunter2", "ada@example.com")
        .await
        .unwrap();

    // Same username
    let err = users::register(&repo, "ada", "other", "other@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict { .. }));

    // Same email
    let err = users::register(&repo, "other", "other", "ada@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict { .. }));
}

#[tokio::test]
async fn test_google_account_lifecycle() {
    let repo = LocalRepository::new();

    // Strict login refuses unknown accounts.
    assert_eq!(
        users::login_google_strict(&repo, "g-1", "ada@example.com")
            .await
            .unwrap(),
        None
    );

    // Combined flow registers a fresh account.
    let id = users::login_or_register_google(&repo, "g-1", "ada@example.com", "Ada")
        .await
        .unwrap();

    // Now strict login succeeds via the Google id.
    assert_eq!(
        users::login_google_strict(&repo, "g-1", "ada@example.com")
            .await
            .unwrap(),
        Some(id)
    );
}

#[cfg(feature = "http-server")]
mod sessions {
    use studyplan_rust::api::UserId;
    use studyplan_rust::http::SessionStore;

    #[test]
    fn test_session_token_lifecycle() {
        let store = SessionStore::new();

        let token = store.create(UserId::new(42));
        assert_eq!(store.resolve(&token), Some(UserId::new(42)));

        // Tokens are unguessable one-off values.
        let other = store.create(UserId::new(42));
        assert_ne!(token, other);

        assert!(store.revoke(&token));
        assert_eq!(store.resolve(&token), None);
        // The second session is unaffected.
        assert_eq!(store.resolve(&other), Some(UserId::new(42)));
    }
}
