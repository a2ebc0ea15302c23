//! Use case and router tests for the account crate
//!
//! In-memory repository, fixed clock, fixed signing key, minimal Argon2 cost.

#[cfg(test)]
mod support {
    use chrono::{DateTime, TimeZone, Utc};
    use platform::password::HashCost;
    use std::sync::Arc;

    use crate::application::{AccountConfig, FixedClock, RegisterInput};
    use crate::domain::value_object::{
        account_password::RawPassword, account_role::AccountRole, email::Email,
        full_name::FullName, user_name::UserName,
    };
    use crate::infra::memory::InMemoryAccountRepository;
    use crate::presentation::handlers::AccountAppState;

    pub fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    pub fn test_config() -> AccountConfig {
        AccountConfig {
            token_secret: b"test-signing-key-test-signing-key".to_vec(),
            hash_cost: HashCost::minimal(),
            ..Default::default()
        }
    }

    pub fn test_state() -> (AccountAppState<InMemoryAccountRepository>, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(t0()));
        let state = AccountAppState::with_clock(
            InMemoryAccountRepository::new(),
            test_config(),
            clock.clone(),
        );
        (state, clock)
    }

    pub fn register_input(email: &str, user_name: &str, role: AccountRole) -> RegisterInput {
        RegisterInput {
            email: Email::new(email).unwrap(),
            user_name: UserName::new(user_name).unwrap(),
            full_name: FullName::new("Test User").unwrap(),
            password: RawPassword::new("longenough1".to_string()).unwrap(),
            role,
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use chrono::Duration;
    use platform::password::HashCost;
    use std::sync::Arc;

    use super::support::*;
    use crate::application::{
        AccountConfig, AdminUseCase, ChangePasswordInput, ProfileUseCase, RegisterUseCase,
        SessionUseCase, SignInInput, SignInUseCase,
    };
    use crate::domain::entity::account::ProfilePatch;
    use crate::domain::policy::{ADMIN_ROLES, require_role};
    use crate::domain::repository::AccountRepository;
    use crate::domain::value_object::{
        AccountId, account_password::RawPassword, account_role::AccountRole, email::Email,
        full_name::FullName,
    };
    use crate::error::AccountError;
    use crate::infra::memory::InMemoryAccountRepository;
    use crate::presentation::handlers::AccountAppState;

    fn register(state: &AccountAppState<InMemoryAccountRepository>) -> RegisterUseCase<InMemoryAccountRepository> {
        RegisterUseCase::new(state.repo.clone(), state.credentials.clone(), state.clock.clone())
    }

    fn sign_in(state: &AccountAppState<InMemoryAccountRepository>) -> SignInUseCase<InMemoryAccountRepository> {
        SignInUseCase::new(state.repo.clone(), state.credentials.clone())
    }

    fn session(state: &AccountAppState<InMemoryAccountRepository>) -> SessionUseCase<InMemoryAccountRepository> {
        SessionUseCase::new(
            state.repo.clone(),
            state.config.clone(),
            state.credentials.clone(),
            state.clock.clone(),
        )
    }

    fn profile(state: &AccountAppState<InMemoryAccountRepository>) -> ProfileUseCase<InMemoryAccountRepository> {
        ProfileUseCase::new(state.repo.clone(), state.credentials.clone(), state.clock.clone())
    }

    fn admin(state: &AccountAppState<InMemoryAccountRepository>) -> AdminUseCase<InMemoryAccountRepository> {
        AdminUseCase::new(state.repo.clone(), state.config.clone(), state.clock.clone())
    }

    fn credentials(email: &str, password: &str) -> SignInInput {
        SignInInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_active_account() {
        let (state, _clock) = test_state();

        let account = register(&state)
            .execute(register_input("a@x.com", "alice", AccountRole::Participant))
            .await
            .unwrap();

        assert!(account.is_active);
        assert_eq!(account.points, 0);
        assert_eq!(account.role, AccountRole::Participant);
        assert_eq!(account.created_at, t0());
        assert!(account.password_hash.as_phc_string().starts_with("$argon2id$"));
        assert_eq!(state.repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts_without_new_row() {
        let (state, _clock) = test_state();
        let use_case = register(&state);

        use_case
            .execute(register_input("a@x.com", "alice", AccountRole::Participant))
            .await
            .unwrap();

        let err = use_case
            .execute(register_input("A@X.COM", "bob", AccountRole::Participant))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::EmailTaken));
        assert_eq!(err.kind(), crate::ErrorKind::Conflict);
        assert_eq!(state.repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_user_name_conflicts() {
        let (state, _clock) = test_state();
        let use_case = register(&state);

        use_case
            .execute(register_input("a@x.com", "alice", AccountRole::Participant))
            .await
            .unwrap();

        let err = use_case
            .execute(register_input("b@x.com", "Alice", AccountRole::Participant))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::UserNameTaken));
    }

    #[tokio::test]
    async fn test_register_double_collision_reports_email() {
        let (state, _clock) = test_state();
        let use_case = register(&state);

        use_case
            .execute(register_input("a@x.com", "alice", AccountRole::Participant))
            .await
            .unwrap();

        let err = use_case
            .execute(register_input("a@x.com", "alice", AccountRole::Participant))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::EmailTaken));
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_indistinguishable() {
        let (state, _clock) = test_state();
        register(&state)
            .execute(register_input("a@x.com", "alice", AccountRole::Participant))
            .await
            .unwrap();

        let wrong_password = sign_in(&state)
            .execute(credentials("a@x.com", "wrongpassword"))
            .await
            .unwrap_err();
        let unknown_email = sign_in(&state)
            .execute(credentials("nobody@x.com", "longenough1"))
            .await
            .unwrap_err();
        let malformed_email = sign_in(&state)
            .execute(credentials("nobody", "longenough1"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AccountError::InvalidCredentials));
        assert!(matches!(unknown_email, AccountError::InvalidCredentials));
        assert!(matches!(malformed_email, AccountError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_authenticate_email_is_case_insensitive() {
        let (state, _clock) = test_state();
        register(&state)
            .execute(register_input("a@x.com", "alice", AccountRole::Participant))
            .await
            .unwrap();

        assert!(
            sign_in(&state)
                .execute(credentials("  A@X.com", "longenough1"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_sign_in_upgrades_stale_hash() {
        let (state, _clock) = test_state();
        register(&state)
            .execute(register_input("a@x.com", "alice", AccountRole::Participant))
            .await
            .unwrap();
        let email = Email::new("a@x.com").unwrap();
        let original = state.repo.find_by_email(&email).await.unwrap().unwrap();

        let stronger = Arc::new(
            AccountConfig {
                hash_cost: HashCost {
                    memory_kib: 16,
                    ..HashCost::minimal()
                },
                ..test_config()
            }
            .credential_engine(),
        );
        assert!(stronger.needs_rehash(&original.password_hash));

        // Wrong password leaves the stored hash alone
        assert!(
            SignInUseCase::new(state.repo.clone(), stronger.clone())
                .execute(credentials("a@x.com", "wrongpassword"))
                .await
                .is_err()
        );
        let unchanged = state.repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(unchanged.password_hash, original.password_hash);

        SignInUseCase::new(state.repo.clone(), stronger.clone())
            .execute(credentials("a@x.com", "longenough1"))
            .await
            .unwrap();

        let upgraded = state.repo.find_by_email(&email).await.unwrap().unwrap();
        assert_ne!(upgraded.password_hash, original.password_hash);
        assert!(upgraded.password_hash.as_phc_string().contains("m=16"));
        assert!(!stronger.needs_rehash(&upgraded.password_hash));
        assert_eq!(upgraded.updated_at, original.updated_at);

        // Still the same password under the new parameters
        SignInUseCase::new(state.repo.clone(), stronger.clone())
            .execute(credentials("a@x.com", "longenough1"))
            .await
            .unwrap();
        let again = state.repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(again.password_hash, upgraded.password_hash);
    }

    #[tokio::test]
    async fn test_toggle_active_blocks_and_restores_sign_in() {
        let (state, _clock) = test_state();
        let account = register(&state)
            .execute(register_input("a@x.com", "alice", AccountRole::Participant))
            .await
            .unwrap();

        let toggled = admin(&state).toggle_active(&account.account_id).await.unwrap();
        assert!(!toggled.is_active);

        let err = sign_in(&state)
            .execute(credentials("a@x.com", "longenough1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::AccountInactive));

        // Inactive accounts still answer wrong passwords with 401
        let err = sign_in(&state)
            .execute(credentials("a@x.com", "wrongpassword"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));

        let restored = admin(&state).toggle_active(&account.account_id).await.unwrap();
        assert!(restored.is_active);
        assert!(
            sign_in(&state)
                .execute(credentials("a@x.com", "longenough1"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_session_round_trip_and_expiry() {
        let (state, clock) = test_state();
        let account = register(&state)
            .execute(register_input("o@x.com", "owner", AccountRole::ProjectOwner))
            .await
            .unwrap();

        let issued = session(&state).issue(&account).unwrap();
        assert_eq!(issued.expires_at, t0() + Duration::minutes(30));

        let resolved = session(&state).resolve(&issued.token).await.unwrap();
        assert_eq!(resolved.account_id, account.account_id);
        assert_eq!(resolved.role, AccountRole::ProjectOwner);

        clock.advance(Duration::minutes(29));
        assert!(session(&state).resolve(&issued.token).await.is_ok());

        clock.advance(Duration::minutes(1));
        let err = session(&state).resolve(&issued.token).await.unwrap_err();
        assert!(matches!(err, AccountError::SessionInvalid));
    }

    #[tokio::test]
    async fn test_session_for_missing_account_is_invalid() {
        let (state, _clock) = test_state();
        let token = state
            .credentials
            .issue_token(&AccountId::new(), AccountRole::SuperAdmin, t0(), Duration::minutes(5))
            .unwrap();

        let err = session(&state).resolve(&token.token).await.unwrap_err();
        assert!(matches!(err, AccountError::SessionInvalid));
    }

    #[tokio::test]
    async fn test_require_role_gates_admin_operations() {
        let (state, _clock) = test_state();
        let participant = register(&state)
            .execute(register_input("p@x.com", "participant", AccountRole::Participant))
            .await
            .unwrap();
        let root = register(&state)
            .execute(register_input("r@x.com", "root", AccountRole::SuperAdmin))
            .await
            .unwrap();

        let err = require_role(participant, ADMIN_ROLES).unwrap_err();
        assert!(matches!(err, AccountError::InsufficientRole));
        assert_eq!(err.kind(), crate::ErrorKind::Forbidden);

        let allowed = require_role(root.clone(), ADMIN_ROLES).unwrap();
        assert_eq!(allowed.account_id, root.account_id);
    }

    #[tokio::test]
    async fn test_update_profile_applies_present_fields() {
        let (state, clock) = test_state();
        let account = register(&state)
            .execute(register_input("a@x.com", "alice", AccountRole::Participant))
            .await
            .unwrap();

        clock.advance(Duration::minutes(10));
        let updated = profile(&state)
            .update_profile(
                &account.account_id,
                ProfilePatch {
                    full_name: Some(FullName::new("Alice Updated").unwrap()),
                    avatar_url: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.full_name.as_str(), "Alice Updated");
        assert_eq!(updated.avatar_url, None);
        assert_eq!(updated.updated_at, t0() + Duration::minutes(10));
        assert_eq!(updated.created_at, t0());

        let stored = state.repo.find_by_id(&account.account_id).await.unwrap().unwrap();
        assert_eq!(stored.full_name.as_str(), "Alice Updated");
    }

    #[tokio::test]
    async fn test_update_profile_missing_account() {
        let (state, _clock) = test_state();
        let err = profile(&state)
            .update_profile(&AccountId::new(), ProfilePatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::AccountNotFound));
    }

    #[tokio::test]
    async fn test_change_password_flow() {
        let (state, _clock) = test_state();
        let account = register(&state)
            .execute(register_input("a@x.com", "alice", AccountRole::Participant))
            .await
            .unwrap();

        let err = profile(&state)
            .change_password(
                &account.account_id,
                ChangePasswordInput {
                    current_password: "notmypassword".to_string(),
                    new_password: RawPassword::new("brandnewpass".to_string()).unwrap(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::IncorrectPassword));
        assert_eq!(err.kind(), crate::ErrorKind::BadRequest);

        profile(&state)
            .change_password(
                &account.account_id,
                ChangePasswordInput {
                    current_password: "longenough1".to_string(),
                    new_password: RawPassword::new("brandnewpass".to_string()).unwrap(),
                },
            )
            .await
            .unwrap();

        assert!(
            sign_in(&state)
                .execute(credentials("a@x.com", "longenough1"))
                .await
                .is_err()
        );
        assert!(
            sign_in(&state)
                .execute(credentials("a@x.com", "brandnewpass"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_list_accounts_paging() {
        let (state, _clock) = test_state();
        for i in 0..3 {
            register(&state)
                .execute(register_input(
                    &format!("u{i}@x.com"),
                    &format!("user{i}"),
                    AccountRole::Participant,
                ))
                .await
                .unwrap();
        }

        let all = admin(&state).list_accounts(None, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].user_name.as_str(), "user0");

        let page = admin(&state).list_accounts(Some(1), Some(1)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].user_name.as_str(), "user1");

        assert!(admin(&state).list_accounts(None, Some(0)).await.unwrap().is_empty());
        assert!(admin(&state).list_accounts(Some(10), None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_and_toggle_unknown_account() {
        let (state, _clock) = test_state();
        assert!(matches!(
            admin(&state).get_account(&AccountId::new()).await,
            Err(AccountError::AccountNotFound)
        ));
        assert!(matches!(
            admin(&state).toggle_active(&AccountId::new()).await,
            Err(AccountError::AccountNotFound)
        ));
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use chrono::Duration;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    use super::support::*;
    use crate::application::FixedClock;
    use crate::presentation::router::account_router_with_state;

    fn app() -> (Router, Arc<FixedClock>) {
        let (state, clock) = test_state();
        (account_router_with_state(state), clock)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    fn alice() -> Value {
        json!({
            "email": "a@x.com",
            "username": "alice",
            "full_name": "Alice A",
            "password": "longenough1",
            "role": "participant"
        })
    }

    async fn register_and_login(app: &Router, body: Value) -> String {
        let email = body["email"].as_str().unwrap().to_string();
        let password = body["password"].as_str().unwrap().to_string();

        let (status, _) = send(app, "POST", "/register", None, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, login) = send(
            app,
            "POST",
            "/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        login["access_token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_end_to_end_flow() {
        let (app, _clock) = app();

        let (status, account) = send(&app, "POST", "/register", None, Some(alice())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(account["points"], 0);
        assert_eq!(account["is_active"], true);
        assert_eq!(account["username"], "alice");
        assert_eq!(account["role"], "participant");
        assert!(account.get("password_hash").is_none());
        assert!(account.get("hashed_password").is_none());

        let (status, login) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "longenough1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(login["token_type"], "bearer");
        assert_eq!(login["user"]["id"], account["id"]);
        let token = login["access_token"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "POST",
            "/change-password",
            Some(&token),
            Some(json!({ "old_password": "wrongwrong", "new_password": "brandnewpass" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Incorrect current password");

        let (status, body) = send(
            &app,
            "POST",
            "/change-password",
            Some(&token),
            Some(json!({ "old_password": "longenough1", "new_password": "brandnewpass" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Password changed successfully");

        let (status, _) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "longenough1" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "brandnewpass" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register_conflict_is_bad_request() {
        let (app, _clock) = app();
        send(&app, "POST", "/register", None, Some(alice())).await;

        let (status, body) = send(&app, "POST", "/register", None, Some(alice())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Email already registered");

        let mut other = alice();
        other["email"] = json!("b@x.com");
        let (status, body) = send(&app, "POST", "/register", None, Some(other)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Username already taken");
    }

    #[tokio::test]
    async fn test_register_validation_is_bad_request() {
        let (app, _clock) = app();
        let mut short = alice();
        short["password"] = json!("short");

        let (status, _) = send(&app, "POST", "/register", None, Some(short)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_password_policy_is_length_only() {
        let (app, _clock) = app();
        let mut spaces = alice();
        spaces["password"] = json!("        ");

        let token = register_and_login(&app, spaces).await;
        let (status, _) = send(&app, "GET", "/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_me_requires_bearer_token() {
        let (app, clock) = app();

        let (status, _) = send(&app, "GET", "/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "GET", "/me", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = register_and_login(&app, alice()).await;
        let (status, me) = send(&app, "GET", "/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["email"], "a@x.com");
        assert!(me.get("updated_at").is_some());

        clock.advance(Duration::minutes(30));
        let (status, _) = send(&app, "GET", "/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unauthorized_carries_bearer_challenge() {
        let (app, _clock) = app();
        let request = Request::builder()
            .method("GET")
            .uri("/me")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[tokio::test]
    async fn test_update_me() {
        let (app, _clock) = app();
        let token = register_and_login(&app, alice()).await;

        let (status, me) = send(
            &app,
            "PUT",
            "/me",
            Some(&token),
            Some(json!({ "avatar_url": "https://cdn.example.com/a.png" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["avatar_url"], "https://cdn.example.com/a.png");
        assert_eq!(me["full_name"], "Alice A");

        // Omitting the field keeps the avatar
        let (status, me) = send(
            &app,
            "PUT",
            "/me",
            Some(&token),
            Some(json!({ "full_name": "Alice B" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["avatar_url"], "https://cdn.example.com/a.png");

        // An explicit null clears it
        let (status, me) = send(
            &app,
            "PUT",
            "/me",
            Some(&token),
            Some(json!({ "avatar_url": null })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(me["avatar_url"].is_null());
        assert_eq!(me["full_name"], "Alice B");

        let (_, me) = send(&app, "GET", "/me", Some(&token), None).await;
        assert!(me["avatar_url"].is_null());

        let (status, _) = send(
            &app,
            "PUT",
            "/me",
            Some(&token),
            Some(json!({ "full_name": "A" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_routes_are_role_gated() {
        let (app, _clock) = app();
        let participant = register_and_login(&app, alice()).await;
        let admin = register_and_login(
            &app,
            json!({
                "email": "root@x.com",
                "username": "root",
                "full_name": "Root Admin",
                "password": "longenough1",
                "role": "super_admin"
            }),
        )
        .await;

        let (status, body) = send(&app, "GET", "/users", Some(&participant), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "You don't have permission to access this resource");

        let (status, users) = send(&app, "GET", "/users", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        let users = users.as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["username"], "alice");

        let (status, page) = send(&app, "GET", "/users?skip=1&limit=1", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page.as_array().unwrap().len(), 1);
        assert_eq!(page[0]["username"], "root");

        let alice_id = users[0]["id"].as_str().unwrap().to_string();

        let (status, profile) =
            send(&app, "GET", &format!("/users/{alice_id}"), Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["email"], "a@x.com");

        let (status, _) =
            send(&app, "GET", &format!("/users/{alice_id}"), Some(&participant), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "GET", "/users/not-a-uuid", Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &app,
            "GET",
            "/users/00000000-0000-4000-8000-000000000000",
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "User not found");
    }

    #[tokio::test]
    async fn test_toggle_active_over_http() {
        let (app, _clock) = app();
        let _participant = register_and_login(&app, alice()).await;
        let admin = register_and_login(
            &app,
            json!({
                "email": "root@x.com",
                "username": "root",
                "full_name": "Root Admin",
                "password": "longenough1",
                "role": "super_admin"
            }),
        )
        .await;

        let (_, users) = send(&app, "GET", "/users", Some(&admin), None).await;
        let alice_id = users[0]["id"].as_str().unwrap().to_string();

        let (status, toggled) = send(
            &app,
            "PATCH",
            &format!("/users/{alice_id}/toggle-active"),
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(toggled["is_active"], false);

        let (status, body) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "longenough1" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "Account is inactive. Please contact support.");
    }
}
