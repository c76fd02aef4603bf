//! Built-in commands and the name -> handler registry.
//!
//! Each handler writes its own user-visible messages to the output sink
//! and reports success as exit code 0, precondition failures as 1. Only
//! `exit` escapes through the error channel, as a harvestable
//! [`VshError::Exit`] the engine turns into a terminal state. No handler
//! performs process-level I/O beyond the sink.

use std::collections::HashMap;

use crate::error::{VshError, VshResult};
use crate::output::Output;
use crate::session::Session;

/// Signature shared by every builtin.
pub type BuiltinFn = fn(&mut Session, &[String], &mut Output) -> VshResult<i32>;

/// Maps a command name to its handler.
pub struct Registry {
    commands: HashMap<&'static str, BuiltinFn>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Registry {
    /// The standard command set.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            commands: HashMap::new(),
        };
        registry.register("ls", cmd_ls);
        registry.register("cd", cmd_cd);
        registry.register("wc", cmd_wc);
        registry.register("history", cmd_history);
        registry.register("chown", cmd_chown);
        registry.register("vfs-load", cmd_vfs_load);
        registry.register("conf-dump", cmd_conf_dump);
        registry.register("exit", cmd_exit);
        registry
    }

    pub fn register(&mut self, name: &'static str, handler: BuiltinFn) {
        self.commands.insert(name, handler);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<BuiltinFn> {
        self.commands.get(name).copied()
    }
}

fn cmd_ls(session: &mut Session, args: &[String], out: &mut Output) -> VshResult<i32> {
    let path = args
        .first()
        .map_or_else(|| session.store.current_dir().to_string(), Clone::clone);

    match session.store.list(&path) {
        Some(items) => {
            if !items.is_empty() {
                out.writeln(&items.join("  "))?;
            }
            Ok(0)
        }
        None => {
            out.writeln(&format!(
                "ls: cannot access '{path}': No such file or directory"
            ))?;
            Ok(1)
        }
    }
}

fn cmd_cd(session: &mut Session, args: &[String], out: &mut Output) -> VshResult<i32> {
    let path = args.first().map_or("/", String::as_str);

    if session.store.change_dir(path) {
        Ok(0)
    } else {
        out.writeln(&format!("cd: {path}: No such file or directory"))?;
        Ok(1)
    }
}

fn cmd_wc(session: &mut Session, args: &[String], out: &mut Output) -> VshResult<i32> {
    let Some(path) = args.first() else {
        out.writeln("wc: missing file operand")?;
        return Ok(1);
    };

    let Some(content) = session.store.read_file(path) else {
        out.writeln(&format!("wc: {path}: No such file or directory"))?;
        return Ok(1);
    };

    // A non-empty body without a trailing newline still counts as a line
    let newlines = content.matches('\n').count();
    let lines = newlines + usize::from(!content.is_empty() && !content.ends_with('\n'));
    let words = content.split_whitespace().count();
    let chars = content.chars().count();

    out.writeln(&format!("  {lines}  {words}  {chars} {path}"))?;
    Ok(0)
}

fn cmd_history(session: &mut Session, _args: &[String], out: &mut Output) -> VshResult<i32> {
    if session.history.is_empty() {
        out.writeln("History is empty")?;
        return Ok(0);
    }

    for (idx, line) in session.history.iter().enumerate() {
        out.writeln(&format!("  {}  {}", idx + 1, line))?;
    }
    Ok(0)
}

fn cmd_chown(session: &mut Session, args: &[String], out: &mut Output) -> VshResult<i32> {
    if args.len() < 2 {
        out.writeln("chown: missing operand")?;
        out.writeln("Usage: chown [OWNER][:GROUP] FILE")?;
        return Ok(1);
    }

    let spec = &args[0];
    let path = &args[1];
    let (owner, group) = spec
        .split_once(':')
        .map_or((spec.as_str(), None), |(owner, group)| (owner, Some(group)));

    if !session.store.set_owner(path, owner, group) {
        out.writeln(&format!(
            "chown: cannot access '{path}': No such file or directory"
        ))?;
        return Ok(1);
    }

    let group_suffix = group
        .filter(|g| !g.is_empty())
        .map(|g| format!(":{g}"))
        .unwrap_or_default();
    out.writeln(&format!("Changed owner of '{path}' to {owner}{group_suffix}"))?;
    Ok(0)
}

fn cmd_vfs_load(session: &mut Session, args: &[String], out: &mut Output) -> VshResult<i32> {
    let Some(path) = args.first() else {
        out.writeln("vfs-load: missing file operand")?;
        out.writeln("Usage: vfs-load <path_to_vfs.xml>")?;
        return Ok(1);
    };

    out.writeln(&format!("Loading new VFS from: {path}"))?;
    let user = session.user().to_string();
    match session.store.load_path(path, &user) {
        Ok(()) => {
            out.writeln(&format!(
                "VFS '{}' loaded successfully from {path}",
                session.store.name()
            ))?;
            session.config.vfs_path = Some(path.clone());
            out.writeln("VFS loaded successfully. Current directory reset to root.")?;
            Ok(0)
        }
        Err(err) => {
            out.writeln(&format!("ERROR: {err}"))?;
            Ok(1)
        }
    }
}

fn cmd_conf_dump(session: &mut Session, _args: &[String], out: &mut Output) -> VshResult<i32> {
    out.writeln("Configuration parameters:")?;
    out.writeln(&format!(
        "vfs_path = {}",
        session.config.vfs_path.as_deref().unwrap_or("None")
    ))?;
    out.writeln(&format!(
        "startup_script = {}",
        session.config.startup_script.as_deref().unwrap_or("None")
    ))?;
    out.writeln(&format!("vfs_name = {}", session.store.name()))?;
    out.writeln(&format!("current_dir = {}", session.store.current_dir()))?;
    out.writeln(&format!(
        "commands_in_history = {}",
        session.history.len()
    ))?;
    Ok(0)
}

fn cmd_exit(_session: &mut Session, _args: &[String], _out: &mut Output) -> VshResult<i32> {
    Err(VshError::Exit(0))
}
