//! The signed-in user's documents: wire model, presentation and controllers.

mod actions;
mod format;
mod list_view;
mod model;
mod status;

pub use actions::{Confirm, DocumentActions};
pub use format::format_file_size_in_mb;
pub use list_view::{DocumentListView, ListScreen, ListState, RenderedRow, RetryAction};
pub use model::{ApiDocument, DocumentRow};
pub use status::{DocumentStatus, StatusPresentation};
