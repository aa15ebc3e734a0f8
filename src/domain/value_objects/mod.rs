//! Value objects - Immutable objects defined by their attributes

mod category_map;
mod category_rule;
mod category_settings;
mod ids;
mod template;

pub use category_map::CategoryMap;
pub use category_rule::{CategoryRule, NumericRange, RuleError, RuleKind, RuleParams};
pub use category_settings::CategorySettings;
pub use ids::*;
pub use template::TemplateOption;

/// Ordered mapping from category name to its rule
pub type GenerationConfig = CategoryMap<CategoryRule>;
