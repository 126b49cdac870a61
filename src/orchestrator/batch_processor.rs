//! 批量成绩单处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责资源初始化和整班成绩单的输出。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：日志文件、数据目录、排版覆盖文件
//! 2. **名单加载**：从数据源读取班级名单
//! 3. **批量生成**：委托 `roster_processor` 逐个生成
//! 4. **结果输出**：每个学生一个 JSON 文件，交给渲染端
//! 5. **全局统计**：汇总成功与失败（写文件失败也计为失败）
//! 6. **评价编辑**：按配置的当前学期打开评价编辑器

use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::{BulletinDataSource, TomlDataSource};
use crate::models::{Period, StudentBulletin};
use crate::orchestrator::roster_processor::{generate_bulletins_for_roster, RosterOutcome};
use crate::services::{BulletinEngine, LayoutRegistry};
use crate::utils::logging::{log_roster_loaded, log_startup, print_final_stats};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::workflow::{BulletinFlow, MarkEditor};

/// 应用主结构
pub struct App {
    config: Config,
    flow: BulletinFlow<TomlDataSource>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config.data_dir, config.current_period);

        let mut layouts = LayoutRegistry::builtin();
        if let Some(path) = &config.layout_overrides_file {
            let count = layouts
                .apply_overrides_file(Path::new(path))
                .await
                .with_context(|| format!("加载排版覆盖文件失败: {}", path))?;
            info!("✓ 已应用 {} 个年级的排版覆盖", count);
        }

        let source = TomlDataSource::open(&config.data_dir)
            .await
            .with_context(|| format!("打开数据目录失败: {}", config.data_dir))?;

        let flow = BulletinFlow::new(source, BulletinEngine::with_layouts(layouts))
            .with_verbose_logging(config.verbose_logging);

        Ok(Self { config, flow })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RosterOutcome> {
        info!("\n📁 正在读取班级名单...");
        let roster = self.flow.source().roster_ids().await?;

        if roster.is_empty() {
            warn!("⚠️ 名单为空，程序结束");
            return Ok(RosterOutcome::default());
        }
        log_roster_loaded(roster.len());

        let mut outcome = generate_bulletins_for_roster(&self.flow, &roster).await;

        self.write_outputs(&mut outcome).await?;

        print_final_stats(
            outcome.succeeded.len(),
            &outcome.failed_student_ids,
            outcome.total(),
            &self.config.output_log_file,
        );

        Ok(outcome)
    }

    /// 配置中的当前学期
    pub fn current_period(&self) -> Result<Period> {
        let period = Period::try_from(self.config.current_period).map_err(AppError::from)?;
        Ok(period)
    }

    /// 为学生打开评价编辑器，只有配置的当前学期可写
    pub async fn open_mark_editor(
        &self,
        student_id: &str,
    ) -> Result<MarkEditor<'_, TomlDataSource>> {
        let period = self.current_period()?;
        let editor = MarkEditor::open(self.flow.source(), student_id, period)
            .await
            .with_context(|| format!("打开评价编辑器失败: {}", student_id))?;
        info!("✏️ {} 的评价编辑器已打开 (当前学期: {})", student_id, period);
        Ok(editor)
    }

    /// 每个学生写一个 `<id>.json`
    ///
    /// 写入失败的学生从成功列表移到失败列表
    async fn write_outputs(&self, outcome: &mut RosterOutcome) -> Result<()> {
        let output_dir = PathBuf::from(&self.config.output_dir);
        tokio::fs::create_dir_all(&output_dir)
            .await
            .with_context(|| format!("无法创建输出目录: {}", output_dir.display()))?;

        for bulletin in std::mem::take(&mut outcome.succeeded) {
            let path = output_dir.join(format!("{}.json", bulletin.student_id));
            match write_bulletin(&path, &bulletin).await {
                Ok(()) => outcome.succeeded.push(bulletin),
                Err(e) => {
                    error!("❌ 写入 {} 失败: {:#}", path.display(), e);
                    outcome.failed_student_ids.push(bulletin.student_id);
                }
            }
        }

        info!("✓ 成绩单已输出至: {}", output_dir.display());
        Ok(())
    }
}

async fn write_bulletin(path: &Path, bulletin: &StudentBulletin) -> Result<()> {
    let json = serde_json::to_string_pretty(bulletin)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
