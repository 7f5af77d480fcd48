//! # Part Enricher
//!
//! 按批次调用产品目录 API，为器件编号补全详细数据
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 凭据、批次、响应结构、输出行与失败记录
//! - `models/loaders` - 读取 `keys.json`、扫描批次目录、提取编号
//!
//! ### ② 能力层（Clients / Services）
//! - `clients/` - 令牌交换与产品详情查询（reqwest）
//! - `services/` - 响应映射、批次文件写入、固定间隔限速
//!
//! ### ③ 流程层（Workflow）
//! - `ProductFlow` - 一个编号：查询 → 追加输出行 / 追加失败记录
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/pipeline` - 凭据轮询，顺序处理所有批次
//! - `orchestrator/batch_processor` - 单个批次的状态流转
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Batch, CredentialPair, FailureRecord, OutputRow};
pub use orchestrator::{App, BatchOutcome, BatchState, RunReport};
pub use workflow::{BatchCtx, ProcessResult, ProductFlow};
