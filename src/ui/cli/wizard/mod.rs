mod wizard;

pub use wizard::{prompt_choice, prompt_config, prompt_settings};
