//! Default value functions for configuration.

pub fn default_prompt() -> String {
    "> ".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_suggestion_limit() -> usize {
    20
}

pub fn default_operator() -> bool {
    true
}

pub fn default_name() -> String {
    "console".to_string()
}
