//! Application services - Use case implementations
//!
//! Each service works on one page through its [`PageHandle`] and reaches the
//! oracle only through the outbound port.

pub mod command_dispatcher;
pub mod generation_service;
pub mod page_context;
pub mod render;
pub mod reroll_service;
pub mod template_service;

pub use command_dispatcher::CommandDispatcher;
pub use generation_service::GenerationService;
pub use page_context::{BusyControl, PageContext, PageHandle};
#[allow(unused_imports)]
pub use reroll_service::{RerollService, SETTINGS_PLAYER_INDEX};
#[allow(unused_imports)]
pub use template_service::TemplateService;
