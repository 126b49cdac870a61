pub mod bulletin_engine;
pub mod classifier;
pub mod deduplicator;
pub mod normalizer;
pub mod overlay;
pub mod paginator;
pub mod summarizer;

pub use bulletin_engine::{BulletinEngine, RenderedLayout};
pub use classifier::{
    classify, AllowListBucket, AllowListStrategy, Classification, ClassifierRegistry,
    ClassifyStrategy, TrustedTagStrategy, UNCATEGORIZED_LABEL,
};
pub use deduplicator::dedupe;
pub use normalizer::normalize;
pub use overlay::{ghost_flags, ghost_marks, overlay, EditOutcome, EvaluationSheet};
pub use paginator::{
    paginate, paginate_with, LayoutPolicy, LayoutRegistry, Paginator, Placement, PlacementRule,
};
pub use summarizer::{apply_summaries, summarize};
