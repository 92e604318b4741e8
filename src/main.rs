//! Resolve a log message template from the command line.
//!
//! ```bash
//! logexpr 'Hello {p0.toUpperCase()}, you have {p1.length()} letters' bob bob
//! logexpr --result none 'Found {r}'
//! RUST_LOG=logexpr=info logexpr --emit --level info 'Saved {p0}' 42
//! ```

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logexpr::{Level, LogSink, TracingSink, Value};

#[derive(Parser)]
#[command(name = "logexpr")]
#[command(version)]
#[command(about = "Resolve a log message template against literal call arguments")]
struct Cli {
    /// Message template, e.g. "Hello {p0.toUpperCase()}"
    template: String,

    /// Call arguments, bound to p0, p1, … in order
    args: Vec<String>,

    /// Value the call returned, bound to r (unbound when omitted)
    #[arg(long, short)]
    result: Option<String>,

    /// Level used with --emit: error, warning, info or debug
    #[arg(long, short, default_value = "debug")]
    level: Level,

    /// Emit through the tracing backend instead of printing the resolution
    #[arg(long)]
    emit: bool,
}

/// `null`, `none` (empty optional), booleans and numbers; anything else is a
/// string.
fn parse_literal(text: &str) -> Value {
    match text {
        "null" => Value::Null,
        "none" => Value::empty_optional(),
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Ok(i) = text.parse::<i64>() {
                return Value::Int(i);
            }
            if text.chars().any(|c| c.is_ascii_digit()) {
                if let Ok(x) = text.parse::<f64>() {
                    return Value::Float(x);
                }
            }
            Value::from(text)
        }
    }
}

/// Filter used when `RUST_LOG` is not set: this crate's events down to `level`.
fn default_filter(level: Level) -> String {
    format!("logexpr={}", tracing::Level::from(level).as_str().to_ascii_lowercase())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(cli.level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<Value> = cli.args.iter().map(|a| parse_literal(a)).collect();
    let result = cli.result.as_deref().map(parse_literal);

    let resolution = logexpr::resolve(&cli.template, &args, result)
        .with_context(|| format!("could not resolve '{}'", cli.template))?;

    if cli.emit {
        TracingSink::new("logexpr").emit(cli.level, &resolution.template, &resolution.values);
        return Ok(());
    }

    println!("{}", resolution.template);
    for (i, value) in resolution.values.iter().enumerate() {
        println!("  {{{}}} = {}", i, value);
    }
    println!("{}", resolution.render());
    Ok(())
}
