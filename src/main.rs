// Interactive terminal session for the task list
//
// Thin presentation layer over the store: reads commands from stdin,
// forwards the user's intent to the store operations, and re-renders the
// visible list after every mutation. Task numbers shown in the list are
// positions in the currently visible subsequence; they are resolved to
// task ids before any store call.

use clap::Parser;
use colored::Colorize;
use eyre::{Result, eyre};
use std::io::{BufRead, Write};
use tasktracker::{Filter, TaskStore};

#[derive(Parser)]
#[command(name = "tasktracker")]
#[command(about = "Task tracker - keep track of your daily tasks and progress")]
#[command(version)]
struct Cli {
    /// Initial filter for the visible list (all, active or completed)
    #[arg(short, long, default_value = "all")]
    filter: String,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut store = TaskStore::new();
    store.set_filter(cli.filter.parse()?);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(&mut store, stdin.lock(), stdout.lock())
}

#[derive(Debug, PartialEq)]
enum Command {
    Add(String),
    Toggle(usize),
    Delete(usize),
    SetFilter(Filter),
    List,
    Json,
    Help,
    Quit,
}

/// Drive the store from a line-oriented command stream until EOF or `quit`
fn run_session<R: BufRead, W: Write>(store: &mut TaskStore, mut input: R, mut out: W) -> Result<()> {
    render(store, &mut out)?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(store, command, &mut out)?,
            Err(e) => writeln!(out, "{}", e.to_string().red())?,
        }
    }

    Ok(())
}

fn execute<W: Write>(store: &mut TaskStore, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Add(text) => {
            store.add(&text);
            render(store, out)?;
        }
        Command::Toggle(index) => match visible_id(store, index) {
            Some(id) => {
                store.toggle(&id);
                render(store, out)?;
            }
            None => writeln!(out, "{}", format!("No visible task #{}", index).red())?,
        },
        Command::Delete(index) => match visible_id(store, index) {
            Some(id) => {
                store.delete(&id);
                render(store, out)?;
            }
            None => writeln!(out, "{}", format!("No visible task #{}", index).red())?,
        },
        Command::SetFilter(filter) => {
            store.set_filter(filter);
            render(store, out)?;
        }
        Command::List => render(store, out)?,
        Command::Json => {
            let json = serde_json::to_string_pretty(&store.visible_tasks())?;
            writeln!(out, "{}", json)?;
        }
        Command::Help => print_help(out)?,
        Command::Quit => {}
    }
    Ok(())
}

fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::List);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "add" => Ok(Command::Add(rest.to_string())),
        "toggle" | "done" => Ok(Command::Toggle(parse_index(rest)?)),
        "delete" | "rm" => Ok(Command::Delete(parse_index(rest)?)),
        "filter" => Ok(Command::SetFilter(rest.parse()?)),
        "list" | "ls" => Ok(Command::List),
        "json" => Ok(Command::Json),
        "help" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(eyre!("Unknown command: {} (type 'help' for the command list)", other)),
    }
}

fn parse_index(arg: &str) -> Result<usize> {
    let index: usize = arg
        .parse()
        .map_err(|_| eyre!("Expected a task number, got: {:?}", arg))?;
    if index == 0 {
        return Err(eyre!("Task numbers start at 1"));
    }
    Ok(index)
}

/// Resolve a 1-based position in the visible list to a task id
fn visible_id(store: &TaskStore, index: usize) -> Option<String> {
    store.visible_tasks().get(index - 1).map(|t| t.id.clone())
}

fn render<W: Write>(store: &TaskStore, out: &mut W) -> Result<()> {
    let visible = store.visible_tasks();

    writeln!(out)?;
    writeln!(out, "{} ({})", "Tasks".bold(), store.filter())?;

    if visible.is_empty() {
        writeln!(out, "  {}", "No tasks to display".dimmed())?;
    } else {
        for (i, task) in visible.iter().enumerate() {
            let check = if task.completed { "x".green() } else { " ".normal() };
            let text = if task.completed {
                task.text.as_str().strikethrough().dimmed()
            } else {
                task.text.as_str().normal()
            };
            let date = format_date(task.created_at);
            writeln!(out, "{:3}. [{}] {}  {}", i + 1, check, text, date.dimmed())?;
        }
    }

    let counts = store.counts();
    let footer = format!(
        "Total: {}  Completed: {}  Active: {}",
        counts.total, counts.completed, counts.active
    );
    writeln!(out, "{}", footer.dimmed())?;

    Ok(())
}

/// Local date for display; the store only deals in raw epoch-ms
fn format_date(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|utc| utc.with_timezone(&chrono::Local).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn print_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  add <text>                    add a task")?;
    writeln!(out, "  toggle <n>                    flip completion of visible task n")?;
    writeln!(out, "  delete <n> (alias: rm)        remove visible task n")?;
    writeln!(out, "  filter all|active|completed   change the visible set")?;
    writeln!(out, "  list                          show the visible tasks")?;
    writeln!(out, "  json                          visible tasks as JSON")?;
    writeln!(out, "  quit                          end the session")?;
    Ok(())
}
