//! Interactive terminal front end for the Arash finance assistant
//!
//! Two views share one session: free-form chat, and an analysis view that
//! loads a ticker over a date range, prints window statistics, and
//! answers questions grounded in the loaded series.
//!
//! # Usage
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."
//! cargo run --bin arash -- --language en
//! ```

use anyhow::Context;
use arash_core::config::AssistantConfig;
use arash_core::i18n::{self, Label, text};
use arash_core::{Assistant, ChatSession, Language};
use chrono::NaiveDate;
use clap::Parser;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "arash")]
#[command(about = "Conversational finance assistant with market analysis", long_about = None)]
struct Args {
    /// Display language (pt or en)
    #[arg(short, long, default_value = "pt")]
    language: String,

    /// Chat model identifier
    #[arg(short, long)]
    model: Option<String>,

    /// Custom LLM API base URL (OpenAI-compatible)
    #[arg(long)]
    api_base: Option<String>,
}

fn print_banner(language: Language) {
    println!();
    println!("=== {} ===", text(language, Label::PageTitle));
    println!("{}", text(language, Label::PageCaption));
    println!();
    println!("Commands:");
    println!("  /load <TICKER> <START> <END>  - load OHLCV data (dates as YYYY-MM-DD)");
    println!("  /ask <question>               - ask about the loaded series");
    println!("  /chart [file.json]            - export the price/volume chart figure");
    println!("  /lang <pt|en>                 - switch display language");
    println!("  /clear                        - clear conversation history");
    println!("  /exit                         - quit");
    println!();
    println!("{}", text(language, Label::ChatPlaceholder));
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,arash_core=info".to_string()),
        )
        .init();

    let args = Args::parse();
    let language = Language::from_code(&args.language);

    let mut builder = AssistantConfig::builder().language(language);
    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        builder = builder.api_key(key);
    }
    if let Some(model) = args.model {
        builder = builder.model(model);
    } else if let Ok(model) = std::env::var("OPENAI_MODEL") {
        builder = builder.model(model);
    }
    if let Some(base) = args.api_base {
        builder = builder.api_base(base);
    } else if let Ok(base) = std::env::var("OPENAI_API_BASE") {
        builder = builder.api_base(base);
    }

    let config = builder
        .build()
        .with_context(|| text(language, Label::ConfigureApi).to_string())?;

    let assistant = Assistant::new(config)?;
    let mut session = assistant.new_session();

    print_banner(session.language());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input == "/exit" || input == "/quit" {
            break;
        }

        if let Some(command) = input.strip_prefix('/') {
            if let Err(e) = run_command(&assistant, &mut session, command).await {
                eprintln!("{}", i18n::error_message(session.language(), &e.to_string()));
            }
            continue;
        }

        println!("{}", text(session.language(), Label::Analyzing));
        let answer = assistant.chat(&mut session, input).await;
        println!("\n{answer}\n");
    }

    Ok(())
}

async fn run_command(
    assistant: &Assistant,
    session: &mut ChatSession,
    command: &str,
) -> anyhow::Result<()> {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    match name {
        "load" => {
            let [ticker, start, end] = rest.as_slice() else {
                anyhow::bail!("usage: /load <TICKER> <START> <END>");
            };
            let start: NaiveDate = start.parse().context("invalid start date")?;
            let end: NaiveDate = end.parse().context("invalid end date")?;

            println!("{}", text(session.language(), Label::LoadingData));
            let stats = assistant.load_analysis(session, ticker, start, end).await?;

            println!(
                "{}",
                i18n::data_loaded(session.language(), stats.rows)
            );
            print_metrics(session, &stats);
            print_recent_rows(session);
        }
        "ask" => {
            if rest.is_empty() {
                anyhow::bail!(
                    "usage: /ask <question>  ({})",
                    text(session.language(), Label::QuestionPlaceholder)
                );
            }
            let question = rest.join(" ");

            println!("{}", text(session.language(), Label::Analyzing));
            let answer = assistant.analysis_answer(session, &question).await?;
            println!("\n{}\n{answer}\n", text(session.language(), Label::Answer));
        }
        "chart" => {
            let figure = assistant.chart_figure(session)?;
            let payload = serde_json::to_string_pretty(&figure)?;

            match rest.first() {
                Some(path) => {
                    std::fs::write(path, payload)
                        .with_context(|| format!("cannot write {path}"))?;
                    println!("{}: {path}", figure.title);
                }
                None => println!("{payload}"),
            }
        }
        "lang" => {
            let code = rest.first().copied().unwrap_or_default();
            if code.is_empty() {
                anyhow::bail!("usage: /lang <pt|en>");
            }
            session.set_language(Language::from_code(code));
            println!("{}", session.language().name());
        }
        "clear" => {
            session.clear_history();
            println!("{}", text(session.language(), Label::HistoryCleared));
        }
        "help" => print_banner(session.language()),
        other => anyhow::bail!("unknown command: /{other}"),
    }

    Ok(())
}

/// Metrics row for the loaded window
fn print_metrics(session: &ChatSession, stats: &arash_core::SeriesStats) {
    let language = session.language();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        text(language, Label::LastClose),
        text(language, Label::PeriodChange),
        text(language, Label::Maximum),
        text(language, Label::Minimum),
    ]);
    table.add_row(vec![
        format!("${:.2}", stats.last_close),
        format!("{:.2}%", stats.percent_change),
        format!("${:.2}", stats.high),
        format!("${:.2}", stats.low),
    ]);

    println!("{table}");
}

/// Tail of the loaded series, newest rows last
fn print_recent_rows(session: &ChatSession) {
    let Some(state) = session.analysis() else {
        return;
    };

    println!("{}:", text(session.language(), Label::RecentRows));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["date", "open", "high", "low", "close", "volume"]);

    for row in state.series.tail(10) {
        table.add_row(vec![
            row.date.to_string(),
            format!("{:.2}", row.open),
            format!("{:.2}", row.high),
            format!("{:.2}", row.low),
            format!("{:.2}", row.close),
            row.volume.to_string(),
        ]);
    }

    println!("{table}");
}
