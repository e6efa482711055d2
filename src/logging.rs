/// Progress reporting on stdout as `[tag]\tmessage` lines
///
/// Info records are tagged with their log target (`status` or `execute`),
/// everything else with the level name.
use anyhow::Result;
use env_logger::{Builder, Env, Target};
use log::{Level, Record};
use std::io::Write;

pub const STATUS: &str = "status";
pub const EXECUTE: &str = "execute";

fn tag(record: &Record) -> &'static str {
    match record.level() {
        Level::Error => "error",
        Level::Warn => "warning",
        Level::Info if record.target() == EXECUTE => EXECUTE,
        Level::Info => STATUS,
        Level::Debug | Level::Trace => "debug",
    }
}

/// Install the global logger; `RUST_LOG` overrides the default level
pub fn init(quiet: bool) -> Result<()> {
    let default_level = if quiet { "error" } else { "info" };

    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Stdout)
        .format(|buf, record| writeln!(buf, "[{}]\t{}", tag(record), record.args()))
        .try_init()?;

    Ok(())
}
