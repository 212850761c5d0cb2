//! 认证模块
//!
//! JWT 令牌签发/验证与密码哈希

mod jwt;
mod password;

pub use jwt::{Claims, JwtConfig, JwtManager};
pub use password::{hash_password, verify_password};
