//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 持有数据源和排版引擎
//! - 输出 JSON 和全局统计
//!
//! ### `roster_processor` - 名单处理器
//! - 遍历班级名单，逐个生成成绩单
//! - 单个失败不影响其他学生
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (App)
//!     ↓
//! roster_processor (处理 Vec<学生>)
//!     ↓
//! workflow::BulletinFlow (处理单个学生)
//!     ↓
//! services (排版引擎、评价叠加)
//!     ↓
//! infrastructure (数据源)
//! ```

pub mod batch_processor;
pub mod roster_processor;

pub use batch_processor::App;
pub use roster_processor::{generate_bulletins_for_roster, RosterOutcome};
