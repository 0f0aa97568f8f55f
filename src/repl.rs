//! Interactive question loop.

use crate::context::AppContext;
use crate::types::{AssistantError, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "ask> ";

/// Run the read-eval-print loop until the user exits.
///
/// Each turn is fully synchronous from the user's point of view: read a
/// line, run the pipeline, print the answer. Pipeline errors are printed
/// and the loop continues; only `exit`/`quit` (case-insensitive), Ctrl-D,
/// or a readline failure end it.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| AssistantError::ConfigError(format!("readline initialization failed: {}", e)))?;

    print_banner(ctx);

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let question = line.trim();
                if question.is_empty() {
                    continue;
                }

                if is_exit_command(question) {
                    break;
                }

                let _ = editor.add_history_entry(question);

                match ctx.ask(question).await {
                    Ok(answer) => println!("\n{}\n", answer),
                    Err(e) => eprintln!("error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C (type exit to quit)");
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => {
                return Err(AssistantError::ConfigError(format!(
                    "readline failure: {}",
                    e
                )));
            }
        }
    }

    Ok(())
}

/// Exit keyword check, performed before a turn starts.
fn is_exit_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

fn print_banner(ctx: &AppContext) {
    let mut tables = ctx.dictionary().table_names();
    tables.sort_unstable();

    println!(
        "Ask a question about the data in {} (type 'exit' to quit)",
        ctx.executor().db_path().display()
    );
    println!("Tables: {}", tables.join(", "));
}
