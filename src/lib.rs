//! # Bulletin Engine
//!
//! 幼儿园成绩单（boletín）指标分类与排版引擎
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 指标、年级、评价记录、成绩单输出结构；TOML 读写
//!
//! ### ② 规则表（Rules）
//! - `rules/` - 每个年级的领域名称、白名单、缩写表、排版策略，彼此独立
//!
//! ### ③ 业务能力层（Services）
//! - `normalize` / `dedupe` - 文本归一化与去重
//! - `ClassifierRegistry` - 年级 → 分类策略（可信标签 / 白名单）
//! - `summarize` - 显示文本缩写
//! - `Paginator` - 左栏 / 右栏 / 续页
//! - `overlay` / `EvaluationSheet` - 评价叠加与幽灵标记
//! - `BulletinEngine` - 以上步骤的组合，纯同步
//!
//! ### ④ 基础设施层（Infrastructure）
//! - `BulletinDataSource` / `MarkStore` - 数据访问端口
//! - `TomlDataSource` / `InMemoryDataSource` - 实现
//!
//! ### ⑤ 流程层（Workflow）
//! - `BulletinFlow` - 一个学生：读取 → 排版 → 叠加
//! - `MarkEditor` - 当前学期的评价编辑
//!
//! ### ⑥ 编排层（Orchestration）
//! - `generate_bulletins_for_roster` - 整班生成，部分成功
//! - `App` - 应用生命周期

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod rules;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{BulletinDataSource, InMemoryDataSource, MarkStore, TomlDataSource};
pub use models::{GradeContext, GradeLevel, Indicator, PaginatedBulletin, StudentBulletin};
pub use orchestrator::{generate_bulletins_for_roster, App, RosterOutcome};
pub use services::BulletinEngine;
pub use workflow::{BulletinFlow, MarkEditor, StudentCtx};
