//! 业务服务层
//!
//! 订单提交/查询、余额推导、积分提现和用户注册登录

mod balance_service;
mod order_service;
mod user_service;
mod withdrawal_service;

pub use balance_service::{Balance, BalanceService};
pub use order_service::{OrderService, OrderSubmission};
pub use user_service::UserService;
pub use withdrawal_service::WithdrawalService;
