//! 认证模块 - JWT 校验与角色门禁
//!
//! 后台所有操作要求已登录用户且角色为 SuperAdmin 或 Admin。
//! 令牌由外部身份服务签发，本服务只做验证。
//!
//! - [`JwtService`] - JWT 令牌验证服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_admin`] - 角色门禁中间件

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::require_admin;

use shared::{AppError, ErrorCode};
use std::fmt;
use std::str::FromStr;

/// 后台管理角色
///
/// 对应身份服务侧的两种特权角色，其余角色一律拒绝。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRole {
    SuperAdmin,
    Admin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "SuperAdmin",
            AdminRole::Admin => "Admin",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SuperAdmin" => Ok(AdminRole::SuperAdmin),
            "Admin" => Ok(AdminRole::Admin),
            _ => Err(()),
        }
    }
}

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求处理函数
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 用户 ID
    pub id: String,
    /// 用户名
    pub username: String,
    /// 后台角色
    pub role: AdminRole,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = claims.role.parse::<AdminRole>().map_err(|_| {
            AppError::with_message(
                ErrorCode::AdminRequired,
                format!("Role '{}' cannot access the back office", claims.role),
            )
        })?;

        Ok(Self {
            id: claims.sub,
            username: claims.username,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_role_parse() {
        assert_eq!("SuperAdmin".parse::<AdminRole>(), Ok(AdminRole::SuperAdmin));
        assert_eq!("Admin".parse::<AdminRole>(), Ok(AdminRole::Admin));
        assert!("Editor".parse::<AdminRole>().is_err());
        assert!("admin".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_current_user_from_claims_rejects_unknown_role() {
        let claims = Claims {
            sub: "user:1".to_string(),
            username: "alice".to_string(),
            role: "Member".to_string(),
            exp: 0,
            iat: 0,
            iss: "allup-admin".to_string(),
            aud: "allup-backoffice".to_string(),
        };

        let result = CurrentUser::try_from(claims);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::AdminRequired);
    }
}
