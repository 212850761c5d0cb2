//! HTTP 处理器
//!
//! 状态码约定：
//! - 订单提交: 202 新订单 / 200 本人重复提交 / 409 他人已提交 / 422 校验失败
//! - 列表查询: 200 有数据 / 204 无数据
//! - 提现: 200 成功 / 402 余额不足 / 422 校验失败

pub mod balance;
pub mod order;
pub mod user;
pub mod withdrawal;
