//! Interactive command loop. Thin glue over [`DatabaseManager`]: every core
//! error is caught here, printed, and the loop keeps accepting input.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::db::DatabaseManager;

const SOFTWARE_NAME: &str = "RowDB";
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run(manager: &mut DatabaseManager) -> Result<(), Box<dyn std::error::Error>> {
    println!("{SOFTWARE_NAME} {VERSION}");
    println!("Type 'help' for commands or 'exit' to quit.");

    let mut editor = DefaultEditor::new()?;
    loop {
        let prompt = match manager.current_name() {
            Some(name) => format!("{SOFTWARE_NAME}/{name} >> "),
            None => format!("{SOFTWARE_NAME} >> "),
        };
        match editor.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                if dispatch(manager, &line) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Executes one command line. Returns `true` when the loop should exit.
pub fn dispatch(manager: &mut DatabaseManager, line: &str) -> bool {
    let args: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = args.first() else {
        return false;
    };

    match first.to_lowercase().as_str() {
        "exit" | "quit" => return true,
        "help" => print_help(),
        "version" => println!("{SOFTWARE_NAME} version {VERSION}"),
        "-c" | "--create" => {
            if args.len() < 3 {
                println!("Error: Table name and at least one column required.");
            } else {
                let name = args[1];
                let columns = to_owned(&args[2..]);
                match manager.create_table(name, &columns) {
                    Ok(()) => println!("Table '{name}' created successfully."),
                    Err(e) => println!("Error: {e}"),
                }
            }
        }
        "-e" | "--edit" => {
            if args.len() < 3 {
                println!("Error: Cell reference and value required.");
            } else {
                let cell_ref = args[1];
                let value = args[2..].join(" ");
                match manager.edit_cell(cell_ref, &value) {
                    Ok(()) => println!("Cell {cell_ref} updated to: {value}"),
                    Err(e) => println!("Error: {e}"),
                }
            }
        }
        "-v" | "--view" => match manager.current_table() {
            Some(table) => println!("{}", table.render_ascii()),
            None => println!("Error: No table selected"),
        },
        "-s" | "--select" => {
            if args.len() < 2 {
                println!("Error: Table name required.");
            } else {
                match manager.select_table(args[1]) {
                    Ok(()) => println!("Selected table: {}", args[1]),
                    Err(e) => println!("Error: {e}"),
                }
            }
        }
        "-l" | "--load" => {
            if args.len() < 2 {
                println!("Error: Filename required.");
            } else {
                match manager.load_table(args[1]) {
                    Ok((name, path)) => println!(
                        "Table '{}' loaded successfully from '{}'.",
                        name,
                        path.display()
                    ),
                    Err(e) => println!("Error: {e}"),
                }
            }
        }
        "-sv" | "--save" => {
            if args.len() < 2 {
                println!("Error: Filename required.");
            } else {
                match manager.save_table(args[1]) {
                    Ok(()) => println!("Table saved to '{}' successfully.", args[1]),
                    Err(e) => println!("Error: {e}"),
                }
            }
        }
        "-a" | "--addrow" => {
            if args.len() < 2 {
                println!("Error: At least one value required.");
            } else {
                match manager.add_row(&to_owned(&args[1..])) {
                    Ok(()) => println!("Row added successfully."),
                    Err(e) => println!("Error: {e}"),
                }
            }
        }
        "--list" => {
            let names = manager.list_tables();
            if names.is_empty() {
                println!("No tables loaded.");
            } else {
                println!("Available tables:");
                for name in names {
                    println!("  {name}");
                }
            }
        }
        other => {
            println!("Unknown command: {other}");
            println!("Type 'help' for available commands.");
        }
    }
    false
}

fn to_owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn print_help() {
    println!("{SOFTWARE_NAME} - Personal Data Table Manager");
    println!("Commands:");
    println!("  -c, --create <table> [columns...]  Create a new table");
    println!("  -e, --edit <cellRef> <value>       Edit a cell (e.g., Name5)");
    println!("  -v, --view                         View current table");
    println!("  -s, --select <table>               Select a table");
    println!("  -l, --load <file>                  Load a table from file");
    println!("  -sv, --save <file>                 Save current table to file");
    println!("  -a, --addrow <values...>           Append a row to current table");
    println!("  --list                             List all loaded tables");
    println!("  help                               Show this help message");
    println!("  version                            Show version information");
    println!("  exit, quit                         Leave the prompt");
    println!();
    println!("Supported Formats:");
    println!("  .odt - Open Data Table (unencrypted)");
}
