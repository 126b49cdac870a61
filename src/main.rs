use anyhow::Result;
use bulletin_engine::utils::logging;
use bulletin_engine::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging, Some(&config.output_log_file))?;

    // 初始化并运行应用
    let outcome = App::initialize(config).await?.run().await?;

    if !outcome.failed_student_ids.is_empty() {
        tracing::warn!(
            "⚠️ {} 名学生未能生成成绩单",
            outcome.failed_student_ids.len()
        );
    }

    Ok(())
}
