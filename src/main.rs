use std::io::stdout;

use crossterm::{execute, terminal::SetTitle};

use rowdb::cli::Cli;
use rowdb::db::DatabaseManager;
use rowdb::repl;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    // best-effort: ignored when stdout is not a terminal
    let _ = execute!(stdout(), SetTitle("RowDB"));

    let mut manager = DatabaseManager::new();
    for file in &cli.files {
        match manager.load_table(&file.to_string_lossy()) {
            Ok((name, path)) => println!(
                "Table '{}' loaded successfully from '{}'.",
                name,
                path.display()
            ),
            Err(e) => eprintln!("Warning: Failed to load {}: {}", file.display(), e),
        }
    }

    if let Some(command) = &cli.command {
        repl::dispatch(&mut manager, command);
    } else {
        repl::run(&mut manager)?;
    }

    Ok(())
}
