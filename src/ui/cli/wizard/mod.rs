mod wizard;

pub use wizard::{prompt_form, prompt_model, prompt_section};
