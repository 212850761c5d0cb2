//! 用户服务
//!
//! 注册与登录。密码使用 bcrypt 哈希，令牌为 HS256 JWT。

use std::sync::Arc;

use tracing::info;

use crate::auth::{JwtManager, hash_password, verify_password};
use crate::error::{ApiError, Result};
use crate::models::User;
use crate::repository::UserRepositoryTrait;

/// 用户服务
pub struct UserService {
    users: Arc<dyn UserRepositoryTrait>,
    jwt: Arc<JwtManager>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepositoryTrait>, jwt: Arc<JwtManager>) -> Self {
        Self { users, jwt }
    }

    /// 注册新用户并签发令牌
    pub async fn register(&self, login: &str, password: &str) -> Result<(User, String)> {
        if self.users.find_by_login(login).await?.is_some() {
            return Err(ApiError::LoginTaken(login.to_string()));
        }

        let password_hash = hash_password(password)?;
        let user = self.users.save(login, &password_hash).await?;
        let token = self.jwt.issue(user.id)?;

        info!(login, user_id = %user.id, "用户注册成功");
        Ok((user, token))
    }

    /// 校验登录名与密码，签发新令牌
    pub async fn login(&self, login: &str, password: &str) -> Result<(User, String)> {
        let user = self
            .users
            .find_by_login(login)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }

        let token = self.jwt.issue(user.id)?;

        info!(login, user_id = %user.id, "用户登录成功");
        Ok((user, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use crate::repository::MockUserRepositoryTrait;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_user(login: &str, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            login: login.to_string(),
            password_hash: hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn make_service(users: MockUserRepositoryTrait) -> UserService {
        UserService::new(
            Arc::new(users),
            Arc::new(JwtManager::new(JwtConfig::default())),
        )
    }

    #[tokio::test]
    async fn test_register_rejects_taken_login() {
        let existing = make_user("alice", "pw");
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_login()
            .returning(move |_| Ok(Some(existing.clone())));

        let service = make_service(users);
        let result = service.register("alice", "new-password").await;

        assert!(matches!(result, Err(ApiError::LoginTaken(_))));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let existing = make_user("alice", "right-password");
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_login()
            .returning(move |_| Ok(Some(existing.clone())));

        let service = make_service(users);
        let result = service.login("alice", "wrong-password").await;

        assert!(matches!(result, Err(ApiError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut users = MockUserRepositoryTrait::new();
        users.expect_find_by_login().returning(|_| Ok(None));

        let service = make_service(users);
        let result = service.login("nobody", "pw").await;

        assert!(matches!(result, Err(ApiError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let existing = make_user("alice", "pw");
        let user_id = existing.id;
        let mut users = MockUserRepositoryTrait::new();
        users
            .expect_find_by_login()
            .returning(move |_| Ok(Some(existing.clone())));

        let jwt = Arc::new(JwtManager::new(JwtConfig::default()));
        let service = UserService::new(Arc::new(users), jwt.clone());

        let (user, token) = service.login("alice", "pw").await.unwrap();
        assert_eq!(user.id, user_id);

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }
}
