use std::io::Write;

use colored::*;
use log::{Level, LevelFilter};

fn wrap(level: Level) -> ColoredString {
    let label = match level {
        Level::Error => "Error",
        Level::Warn => "Warning",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };

    match level {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.blue(),
        Level::Debug => label.magenta(),
        Level::Trace => label.normal(),
    }
}

/// 初始化日志，静默模式只输出警告和错误，`RUST_LOG`可覆盖级别
pub fn init_logger(silent: bool) {
    let level = if silent {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format(|buf, record| writeln!(buf, "[{}] {}", wrap(record.level()), record.args()))
        .try_init();
}
