//! 3 岁班规则表
//!
//! 标签可信，按标准领域分类；Ciencia y Tecnología 只有前 4 条放在主页

use crate::models::Destination;
use crate::services::paginator::{LayoutPolicy, PlacementRule};

pub fn layout() -> LayoutPolicy {
    use Destination::{Continuation, Left, Right};

    LayoutPolicy::new(vec![
        PlacementRule::whole("Personal Social", Left),
        PlacementRule::whole("Psicomotriz", Left),
        PlacementRule::whole("Comunicación", Right),
        PlacementRule::whole("Matemática", Right),
        PlacementRule::head("Ciencia y Tecnología", 4, Right, Continuation),
    ])
}
