use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Level
///

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug, // least severe
    Info,
    Ok,
    Warn,
    Error, // most severe
}

///
/// Topic
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum Topic {
    Attribute,
    Config,
    Endpoint,
    Session,
}

#[macro_export]
macro_rules! log {
    // =========================================
    // (1) With topic (normal + trailing comma)
    // =========================================
    ($topic:expr, $level:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        $crate::log!(@inner Some(&$topic.to_string()), $crate::log::Level::$level, $fmt $(, $arg)*);
    }};

    // =========================================
    // (2) No topic (normal + trailing comma)
    // =========================================
    ($level:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        $crate::log!(@inner None::<&str>, $crate::log::Level::$level, $fmt $(, $arg)*);
    }};

    // =========================================
    // INTERNAL
    // =========================================
    (@inner $topic:expr, $level:expr, $fmt:expr $(, $arg:expr)*) => {{
        let level = $level;
        if $crate::log::__enabled(level) {
            let topic_opt: Option<&str> = $topic;
            let message = format!($fmt $(, $arg)*);
            let line = $crate::log::__format_line(env!("CARGO_PKG_NAME"), topic_opt, level, &message);

            if level >= $crate::log::Level::Warn {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        }
    }};
}

///
/// Helpers
///

#[doc(hidden)]
#[must_use]
pub fn __enabled(level: Level) -> bool {
    level >= min_level()
}

/// Minimum level that reaches the output; `Info` until a config is loaded.
#[must_use]
pub fn min_level() -> Level {
    crate::config::Config::try_get().map_or(Level::Info, |cfg| cfg.log.level)
}

#[doc(hidden)]
#[must_use]
pub fn __format_line(crate_name: &str, topic: Option<&str>, level: Level, message: &str) -> String {
    let final_msg = if let Some(t) = topic {
        format!("[{t}] {message}")
    } else {
        message.to_string()
    };

    let (color, reset) = match level {
        Level::Ok => ("\x1b[32m", "\x1b[0m"),
        Level::Info => ("\x1b[34m", "\x1b[0m"),
        Level::Warn => ("\x1b[33m", "\x1b[0m"),
        Level::Error => ("\x1b[31m", "\x1b[0m"),
        Level::Debug => ("", ""),
    };

    let label = format!("{color}{:^5}{reset}", level.to_string().to_uppercase());

    format!("{label}|{crate_name:^13}| {final_msg}")
}

///
/// TESTS
///
