//! Vacancy core: pure browse-session state machine and view-model helpers.
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{PageResult, VacancyItem};
pub use msg::Msg;
pub use state::{BrowseState, RequestId, SessionPhase, StaleSelection};
pub use update::update;
pub use view_model::{BrowseView, Notice, VacancyRowView};
