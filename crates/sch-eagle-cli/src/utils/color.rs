/// `NO_COLOR` set to a non-empty value turns colored output off
pub fn color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

pub fn init_color() {
    if color_disabled() {
        colored::control::set_override(false);
    }
}
