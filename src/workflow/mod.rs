pub mod bulletin_ctx;
pub mod bulletin_flow;
pub mod mark_editor;

pub use bulletin_ctx::StudentCtx;
pub use bulletin_flow::BulletinFlow;
pub use mark_editor::MarkEditor;
