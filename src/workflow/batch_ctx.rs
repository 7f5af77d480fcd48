//! 批次处理上下文
//!
//! 封装"我正在用哪组凭据处理哪个批次"这一信息

use crate::clients::AccessToken;
use std::fmt::Display;

/// 批次处理上下文
///
/// 令牌只在本批次内有效，批次结束后随上下文丢弃，不跨批次复用
#[derive(Debug, Clone)]
pub struct BatchCtx {
    /// 批次编号（决定输出文件名）
    pub batch_index: u64,

    /// 批次在本次运行中的轮询位置（从 0 开始）
    pub position: usize,

    /// 凭据 ID，同时作为请求头发送
    pub client_id: String,

    /// 本批次的令牌
    pub token: AccessToken,
}

impl BatchCtx {
    /// 创建新的批次上下文
    pub fn new(batch_index: u64, position: usize, client_id: String, token: AccessToken) -> Self {
        Self {
            batch_index,
            position,
            client_id,
            token,
        }
    }
}

impl Display for BatchCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[批次 #{} 位置#{} client_id#{}]",
            self.batch_index, self.position, self.client_id
        )
    }
}
