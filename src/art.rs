const BANNER: &str = r#"
  _                _
 | | ___ _ __ ___ | |__   __ _ _ __
 | |/ _ \ '_ ` _ \| '_ \ / _` | '__|
 | |  __/ | | | | | |_) | (_| | |
 |_|\___|_| |_| |_|_.__/ \__,_|_|
"#;

pub fn welcome_message(name: &str) -> String {
    format!(
        "{}\n Welcome to {} v{}\n Type 'help' for commands, 'exit' to quit.\n",
        BANNER,
        name,
        env!("CARGO_PKG_VERSION")
    )
}
