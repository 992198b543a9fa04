use crate::config::AdminConfig;
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest, RefreshTokenRequest};
use crate::utils::{JwtService, verify_password};

/// 单管理员登录：凭据来自配置，不落数据库
#[derive(Clone)]
pub struct AuthService {
    admin: AdminConfig,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(admin: AdminConfig, jwt_service: JwtService) -> Self {
        Self { admin, jwt_service }
    }

    pub fn login(&self, req: &LoginRequest) -> AppResult<AuthResponse> {
        if self.admin.password_hash.is_empty() {
            return Err(AppError::AuthError(
                "Admin login is not configured".to_string(),
            ));
        }

        if req.username != self.admin.username
            || !verify_password(&req.password, &self.admin.password_hash)?
        {
            return Err(AppError::AuthError(
                "Invalid username or password".to_string(),
            ));
        }

        let access_token = self.jwt_service.generate_access_token(&req.username)?;
        let refresh_token = self.jwt_service.generate_refresh_token(&req.username)?;

        Ok(AuthResponse {
            access_token,
            refresh_token: Some(refresh_token),
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }

    pub fn refresh(&self, req: &RefreshTokenRequest) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(&req.refresh_token)?;
        let access_token = self.jwt_service.generate_access_token(&claims.sub)?;

        Ok(AuthResponse {
            access_token,
            refresh_token: None,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hash_password;

    fn service() -> AuthService {
        let admin = AdminConfig {
            username: "admin".to_string(),
            password_hash: hash_password("Secret123").unwrap(),
        };
        AuthService::new(admin, JwtService::new("test-secret", 3600, 86400))
    }

    #[test]
    fn test_login_with_valid_credentials() {
        let response = service()
            .login(&LoginRequest {
                username: "admin".to_string(),
                password: "Secret123".to_string(),
            })
            .unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert!(response.refresh_token.is_some());
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let service = service();
        assert!(service
            .login(&LoginRequest {
                username: "admin".to_string(),
                password: "wrong".to_string(),
            })
            .is_err());
        assert!(service
            .login(&LoginRequest {
                username: "root".to_string(),
                password: "Secret123".to_string(),
            })
            .is_err());
    }

    #[test]
    fn test_refresh_issues_new_access_token() {
        let service = service();
        let login = service
            .login(&LoginRequest {
                username: "admin".to_string(),
                password: "Secret123".to_string(),
            })
            .unwrap();

        let refreshed = service
            .refresh(&RefreshTokenRequest {
                refresh_token: login.refresh_token.unwrap(),
            })
            .unwrap();
        assert!(refreshed.refresh_token.is_none());
    }
}
