pub mod bulletin;
pub mod evaluation;
pub mod grade;
pub mod indicator;
pub mod loaders;

pub use bulletin::{
    BucketItem, BulletinRow, Destination, DomainBucket, EvaluationGrid, GridCell, GridRow,
    LayoutEntry, PaginatedBulletin, StudentBulletin, StudentRecord,
};
pub use evaluation::{EvaluationMark, MarkValue, Observation, Period, PeriodObservation};
pub use grade::{GradeContext, GradeLevel};
pub use indicator::Indicator;
pub use loaders::{load_indicator_file, load_student_file, StudentFile};
