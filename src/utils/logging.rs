/// 日志工具模块
///
/// 提供启动、批次和最终统计的日志输出
use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `resume_offset`: 起始批次编号
/// - `credentials`: 凭据数量
/// - `delay_secs`: 请求间隔（秒）
pub fn log_startup(resume_offset: u64, credentials: usize, delay_secs: u64) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 产品数据补全");
    info!("📍 起始批次编号: {}", resume_offset);
    info!("🔑 凭据数量: {} (按批次轮询)", credentials);
    info!("⏳ 请求间隔: {} 秒", delay_secs);
    info!("{}", "=".repeat(60));
}

/// 记录批次加载信息
pub fn log_batches_loaded(total: usize, first: u64, last: u64) {
    info!("✓ 找到 {} 个待处理的批次 (编号 {}-{})", total, first, last);
    info!("💡 批次逐个处理，编号逐个查询\n");
}

/// 记录批次开始信息
///
/// # 参数
/// - `position`: 批次在本次运行中的位置（从 0 开始）
/// - `total`: 批次总数
/// - `batch_index`: 批次编号
pub fn log_batch_start(position: usize, total: usize, batch_index: u64) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 个批次 (编号 {})", position + 1, total, batch_index);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
///
/// # 参数
/// - `batch_index`: 批次编号
/// - `state`: 终止状态
/// - `appended`: 成功追加的行数
/// - `total`: 编号总数
pub fn log_batch_complete(batch_index: u64, state: &str, appended: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 批次 {} 结束 [{}]: 成功 {}/{}", batch_index, state, appended, total);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(done: usize, skipped: usize, appended: usize, failed: usize, output_dir: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部批次处理完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📦 完成批次: {}，跳过批次: {}", done, skipped);
    info!("✅ 追加行数: {}", appended);
    info!("❌ 失败编号: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n输出已保存至: {}", output_dir);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("产品详情查询失败", 4), "产品详情...");
    }
}
