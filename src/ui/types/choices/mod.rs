mod schema;
mod settings;
mod task_choice;
mod ui_choice;
mod voter_choice;

pub use schema::*;
pub use settings::*;
pub use task_choice::*;
pub use ui_choice::UIChoice;
pub use voter_choice::*;
