//! 积分订单对账服务
//!
//! 用户提交购物订单号后异步向外部核算服务查询应得积分，
//! 订单经历 NEW -> PROCESSING -> PROCESSED/INVALID 的状态流转，
//! 余额由订单累计积分减去提现总额实时推导。
//! 同时提供注册/登录、订单查询、余额查询和积分提现的 REST API。

pub mod accrual;
pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod luhn;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{ApiError, Result};
