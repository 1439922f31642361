use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use clap_verbosity_flag::Verbosity;
use is_terminal::IsTerminal;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use xstash::{App, Value};

use crate::cli::formats::{OutputFormat, SerializationFormat};

mod cli {
    pub mod formats;
}

#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Args {
    /// Commands to run, separated by newlines or `;`
    script: Option<String>,

    /// Read the commands from a file instead
    #[clap(short, long, conflicts_with = "script", value_hint = ValueHint::FilePath)]
    from_file: Option<PathBuf>,

    /// Document whose keys become the application's properties, stdin if omitted
    #[clap(short, long, value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    #[clap(long, value_enum, default_value = "json")]
    input_format: SerializationFormat,

    #[clap(long, value_enum, default_value = "json")]
    output_format: SerializationFormat,

    /// Print each value on a single line
    #[clap(short, long)]
    compact_output: bool,

    /// Print only the values asked for by `show`
    #[clap(short, long)]
    shown_only: bool,

    #[clap(flatten)]
    verbosity: Verbosity,
}

fn init_log(verbosity: &Verbosity) -> Result<()> {
    TermLogger::init(
        verbosity.log_level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}

fn read_script(args: &Args) -> Result<String> {
    match (&args.script, &args.from_file) {
        (Some(script), _) => Ok(script.clone()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read the script from {:?}", path)),
        (None, None) => Ok(String::new()),
    }
}

fn read_document(args: &Args) -> Result<Value> {
    let mut reader: Box<dyn Read> = match &args.input {
        Some(path) => {
            Box::new(File::open(path).with_context(|| format!("Unable to open {:?}", path))?)
        }
        None if io::stdin().is_terminal() => return Ok(Value::object()),
        None => Box::new(io::stdin()),
    };
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    if text.trim().is_empty() {
        return Ok(Value::object());
    }
    let document = match args.input_format {
        SerializationFormat::Json => serde_json::from_str(&text).context("Parse JSON input")?,
        SerializationFormat::Yaml => serde_yaml::from_str(&text).context("Parse YAML input")?,
    };
    Ok(document)
}

fn print_value(value: &Value, format: OutputFormat) -> Result<()> {
    let text = match format {
        OutputFormat::Compact(SerializationFormat::Json) => serde_json::to_string(value)?,
        OutputFormat::Pretty(SerializationFormat::Json) => {
            colored_json::to_colored_json_auto(&serde_json::to_value(value)?)?
        }
        OutputFormat::Compact(SerializationFormat::Yaml)
        | OutputFormat::Pretty(SerializationFormat::Yaml) => serde_yaml::to_string(value)?,
    };
    println!("{}", text.trim_end());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_log(&args.verbosity)?;

    let script = read_script(&args)?;
    let document = read_document(&args)?;
    log::debug!("Loaded document {:?}", document);

    let mut app = App::from_document(document).context("Unable to load properties")?;
    xstash::install(&mut app);
    let shown = xstash::run_script(&mut app, &script).context("Script failed")?;

    let format = OutputFormat::new(args.output_format, args.compact_output);
    for value in &shown {
        print_value(value, format)?;
    }
    if !args.shown_only {
        print_value(&app.to_document(), format)?;
    }
    Ok(())
}
