/// Command handlers. Each returns the text to print on success.
use chrono::{Local, NaiveDate};
use std::fs;
use std::io::{self, Read};

use markban_core::{generate, parse, KanbanBoard};

use crate::args::Commands;
use crate::config::CliConfig;
use crate::error::CliError;

const STDIN: &str = "-";

pub fn run(command: &Commands, config: &CliConfig) -> Result<String, CliError> {
    match command {
        Commands::Parse { file } => parse_to_json(&read_input(file)?, config),
        Commands::Format { file, write } => format_board(file, *write, config),
        Commands::Check { file } => check_board(file, &read_input(file)?),
        Commands::Summary { file } => {
            summarize(&read_input(file)?, Local::now().date_naive())
        }
        Commands::Generate { file } => generate_from_json(&read_input(file)?),
    }
}

fn read_input(file: &str) -> Result<String, CliError> {
    if file == STDIN {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(fs::read_to_string(file)?)
}

fn parse_to_json(markdown: &str, config: &CliConfig) -> Result<String, CliError> {
    let board = parse(markdown)?;
    let mut json = if config.pretty_json {
        serde_json::to_string_pretty(&board)?
    } else {
        serde_json::to_string(&board)?
    };
    json.push('\n');
    Ok(json)
}

/// `generate(parse(text))`, plus the second pass when `verify` is set.
fn normalize(file: &str, markdown: &str, verify: bool) -> Result<String, CliError> {
    let board = parse(markdown)?;
    let first = generate(&board);
    if verify && generate(&parse(&first)?) != first {
        return Err(CliError::RoundTrip(file.to_string()));
    }
    Ok(first)
}

fn format_board(file: &str, write: bool, config: &CliConfig) -> Result<String, CliError> {
    let original = read_input(file)?;
    let formatted = normalize(file, &original, config.check_before_write)?;

    if !write || file == STDIN {
        return Ok(formatted);
    }
    if formatted == original {
        log::info!("[markban.cli] {} already formatted", file);
    } else {
        fs::write(file, &formatted)?;
        log::info!("[markban.cli] rewrote {}", file);
    }
    Ok(String::new())
}

fn check_board(file: &str, markdown: &str) -> Result<String, CliError> {
    normalize(file, markdown, true)?;
    let board = parse(markdown)?;
    Ok(format!(
        "{}: ok ({} columns, {} cards)\n",
        file,
        board.columns.len(),
        board.cards().count()
    ))
}

fn summarize(markdown: &str, today: NaiveDate) -> Result<String, CliError> {
    let board = parse(markdown)?;
    let mut out = String::new();
    for col in board.summary() {
        out.push_str(&format!(
            "{}\t{}\t{} cards\t{} done\n",
            col.index, col.title, col.card_count, col.completed_count
        ));
    }
    for (column, card) in board.cards().filter(|(_, card)| card.is_overdue(today)) {
        out.push_str(&format!(
            "overdue\t{}\t{}\t{}\n",
            card.due_date.as_deref().unwrap_or_default(),
            column,
            card.text
        ));
    }
    Ok(out)
}

fn generate_from_json(json: &str) -> Result<String, CliError> {
    let board: KanbanBoard = serde_json::from_str(json)?;
    Ok(generate(&board))
}
