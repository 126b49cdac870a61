//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化 tracing 订阅者
///
/// 优先使用 `RUST_LOG`；未设置时 `verbose` 决定 debug / info。
/// 给出 `log_file_path` 时先写入文件头，之后的日志同时追加到该文件。
/// 重复调用是安全的（测试里会多次调用）
pub fn init(verbose: bool, log_file_path: Option<&str>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = match log_file_path {
        Some(path) => {
            init_log_file(path)?;
            let file = OpenOptions::new()
                .append(true)
                .open(path)
                .with_context(|| format!("无法打开日志文件: {}", path))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init();
    Ok(())
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n成绩单生成日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `data_dir`: 数据目录
/// - `current_period`: 当前学期
pub fn log_startup(data_dir: &str, current_period: u8) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 成绩单批量生成模式");
    info!("📁 数据目录: {}", data_dir);
    info!("📅 当前学期: T{}", current_period);
    info!("{}", "=".repeat(60));
}

/// 记录名单加载信息
pub fn log_roster_loaded(total: usize) {
    info!("✓ 找到 {} 名学生", total);
    info!("💡 逐个生成，单个失败不影响其他学生\n");
}

/// 记录单个学生开始处理
///
/// # 参数
/// - `index`: 当前序号（从 1 开始）
/// - `total`: 学生总数
/// - `student_id`: 学生 ID
pub fn log_student_start(index: usize, total: usize, student_id: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📄 [{}/{}] 正在生成: {}", index, total, student_id);
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败的学生 ID
/// - `total`: 总数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(success: usize, failed: &[String], total: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed.len());
    if !failed.is_empty() {
        info!("   失败学生: {}", failed.join(", "));
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
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
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("Niño", 10), "Niño");
        assert_eq!(truncate_text("Comunicación", 4), "Comu...");
    }

    #[test]
    fn test_init_log_file_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let path = path.to_str().unwrap();

        init_log_file(path).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("成绩单生成日志"));
    }

    #[test]
    fn test_init_mirrors_events_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mirror.log");
        let path = path.to_str().unwrap();

        init(false, Some(path)).unwrap();
        tracing::warn!("写入日志文件的标记行");

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("成绩单生成日志"));
        assert!(content.contains("写入日志文件的标记行"));
    }
}
