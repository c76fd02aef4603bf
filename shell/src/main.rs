use clap::Parser;
use tracing_subscriber::EnvFilter;
use vsh::{Engine, ErrorPolicy, LineOutcome, Output, Session, SessionConfig};

/// vsh - shell session emulator over an in-memory VFS
#[derive(Parser, Debug)]
#[command(name = "vsh", version, about)]
struct Args {
    /// Path to the VFS XML image to preload
    #[arg(long, env = "VSH_VFS")]
    vfs: Option<String>,

    /// Startup script to replay before the interactive session
    #[arg(long, env = "VSH_STARTUP")]
    startup: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = SessionConfig {
        vfs_path: args.vfs,
        startup_script: args.startup,
    };

    println!("Configuration:");
    println!(
        "VFS Path: {}",
        config.vfs_path.as_deref().unwrap_or("None")
    );
    println!(
        "Startup Script: {}",
        config.startup_script.as_deref().unwrap_or("None")
    );
    println!("{}", "-".repeat(50));
    println!();

    let mut session = Session::new(config);
    if let Some(path) = session.config.vfs_path.clone() {
        let user = session.user().to_string();
        match session.store.load_path(&path, &user) {
            Ok(()) => println!(
                "VFS '{}' loaded successfully from {path}",
                session.store.name()
            ),
            Err(err) => println!("ERROR: {err}"),
        }
    } else {
        println!("No VFS specified. Using empty VFS.");
    }
    println!();

    let mut engine = Engine::new(session);

    if let Some(script_path) = engine.session().config.startup_script.clone() {
        run_startup_script(&mut engine, &script_path);
    }

    run_repl(&mut engine)
}

fn run_startup_script(engine: &mut Engine, path: &str) {
    let banner = "=".repeat(50);
    println!("\n{banner}");
    println!("Executing startup script: {path}");
    println!("{banner}\n");

    match std::fs::read_to_string(path) {
        Ok(text) => {
            let mut out = Output::Stdout;
            engine.run_script(&text, &mut out, ErrorPolicy::ContinueOnError);
            println!("\n{banner}");
            println!("Startup script execution completed");
            println!("{banner}\n");
        }
        Err(err) => {
            tracing::warn!(path, %err, "startup script unreadable");
            println!("ERROR: Startup script not found: {path}");
        }
    }
}

fn run_repl(engine: &mut Engine) -> Result<(), Box<dyn std::error::Error>> {
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    let mut rl = DefaultEditor::new()?;
    let mut out = Output::Stdout;

    loop {
        match rl.readline(&engine.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match engine.eval_line(line, &mut out) {
                    LineOutcome::Terminated(_) => {
                        println!("Exiting shell emulator...");
                        break;
                    }
                    LineOutcome::Skipped | LineOutcome::Done(_) => {}
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Use 'exit' command to quit");
            }
            Err(ReadlineError::Eof) => {
                println!("Exiting shell emulator...");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err:?}");
                break;
            }
        }
    }

    Ok(())
}
