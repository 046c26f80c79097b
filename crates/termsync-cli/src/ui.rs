// Macros for console output. Logs go through `tracing`; these are the
// human-facing lines.

#[macro_export]
macro_rules! ui_ok {
    ($($arg:tt)*) => {{
        println!("✔ {}", format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! ui_info {
    ($($arg:tt)*) => {{
        eprintln!("ℹ {}", format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! ui_warn {
    ($($arg:tt)*) => {{
        use std::io::IsTerminal;
        let show_icon = std::io::stderr().is_terminal() && std::env::var_os("NO_ICONS").is_none();
        if show_icon {
            eprintln!("⚠ {}", format!($($arg)*));
        } else {
            eprintln!("{}", format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! ui_err {
    ($($arg:tt)*) => {{
        eprintln!("✖ {}", format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! ui_out {
    ($($arg:tt)*) => {{
        println!("{}", format!($($arg)*));
    }};
}

/// Apply a colour only when the terminal wants it.
pub fn paint<F>(use_color: bool, text: impl std::fmt::Display, style: F) -> String
where
    F: FnOnce(&str) -> String,
{
    let plain = text.to_string();
    if use_color {
        style(&plain)
    } else {
        plain
    }
}

pub const RULE: &str = "--------------------";
