//! 仓储集成测试
//!
//! 使用真实 PostgreSQL 验证唯一约束映射、聚合查询和
//! 提现事务的持锁余额校验（这些行为无法通过纯 mock 覆盖）。
//!
//! ## 运行方式
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test repository_pg_test -- --ignored
//! ```

use loyalty_service::models::OrderStatus;
use loyalty_service::repository::{
    OrderRepository, OrderRepositoryTrait, UserRepository, UserRepositoryTrait,
    WithdrawalRepository, WithdrawalRepositoryTrait,
};
use loyalty_shared::error::LoyaltyError;
use sqlx::PgPool;
use uuid::Uuid;

/// 从环境变量读取数据库 URL，未设置则 panic
fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests")
}

async fn setup_pool() -> PgPool {
    let pool = PgPool::connect(&database_url())
        .await
        .expect("database connection failed");
    sqlx::migrate!().run(&pool).await.expect("migrations failed");
    pool
}

/// 插入一个随机登录名的测试用户
async fn seed_user(pool: &PgPool) -> Uuid {
    let users = UserRepository::new(pool.clone());
    let login = format!("integ-{}", Uuid::new_v4());
    users.save(&login, "not-a-real-hash").await.unwrap().id
}

/// 生成随机的 Luhn 合法订单号（随机前缀 + 校验位）
fn luhn_number() -> String {
    let body: String = Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(12)
        .collect();

    let sum: u32 = body
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let mut digit = u32::from(b - b'0');
            // 校验位占据最右侧，主体部分从奇数位开始翻倍
            if i % 2 == 0 {
                digit *= 2;
                if digit > 9 {
                    digit -= 9;
                }
            }
            digit
        })
        .sum();

    format!("{}{}", body, (10 - sum % 10) % 10)
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_order_unique_constraint_maps_to_already_exists() {
    let pool = setup_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let user_id = seed_user(&pool).await;
    let number = luhn_number();

    let order = orders.save(user_id, &number).await.unwrap();
    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.accrual, None);

    let result = orders.save(user_id, &number).await;
    assert!(matches!(result, Err(LoyaltyError::AlreadyExists { .. })));
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_update_by_number_and_accrual_sum() {
    let pool = setup_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let user_id = seed_user(&pool).await;

    // 没有任何订单时总和是 0 而非"未找到"
    assert_eq!(orders.sum_accruals_by_user(user_id).await.unwrap(), 0.0);

    let number = luhn_number();
    orders.save(user_id, &number).await.unwrap();
    orders
        .update_by_number(&number, OrderStatus::Processed, Some(729.98))
        .await
        .unwrap();

    let order = orders.find_by_number(&number).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Processed);
    assert_eq!(order.accrual, Some(729.98));

    // 同一终态重复应用没有额外效果
    orders
        .update_by_number(&number, OrderStatus::Processed, Some(729.98))
        .await
        .unwrap();
    let total = orders.sum_accruals_by_user(user_id).await.unwrap();
    assert!((total - 729.98).abs() < 1e-9);
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_find_by_user_ascending() {
    let pool = setup_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let user_id = seed_user(&pool).await;

    let first = luhn_number();
    let second = luhn_number();
    orders.save(user_id, &first).await.unwrap();
    orders.save(user_id, &second).await.unwrap();

    let listed = orders.find_by_user(user_id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].number, first);
    assert_eq!(listed[1].number, second);
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_save_checked_rejects_insufficient_funds() {
    let pool = setup_pool().await;
    let withdrawals = WithdrawalRepository::new(pool.clone());
    let user_id = seed_user(&pool).await;

    let result = withdrawals
        .save_checked(user_id, "2377225624", 10.0)
        .await;
    assert!(matches!(
        result,
        Err(LoyaltyError::InsufficientFunds { .. })
    ));

    // 拒绝的提现不留下任何记录
    assert!(withdrawals.find_by_user(user_id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore] // 需要数据库连接
async fn test_save_checked_inserts_within_balance() {
    let pool = setup_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let withdrawals = WithdrawalRepository::new(pool.clone());
    let user_id = seed_user(&pool).await;

    let number = luhn_number();
    orders.save(user_id, &number).await.unwrap();
    orders
        .update_by_number(&number, OrderStatus::Processed, Some(100.0))
        .await
        .unwrap();

    let withdrawal = withdrawals
        .save_checked(user_id, "2377225624", 40.0)
        .await
        .unwrap();
    assert_eq!(withdrawal.order_number, "2377225624");

    let total = withdrawals.sum_amounts_by_user(user_id).await.unwrap();
    assert!((total - 40.0).abs() < 1e-9);

    // 余额只剩 60，再提 70 必须被持锁重查拒绝
    let result = withdrawals.save_checked(user_id, "2377225624", 70.0).await;
    assert!(matches!(
        result,
        Err(LoyaltyError::InsufficientFunds { .. })
    ));
}
