use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use url::Url;

use crate::compression::CompressionTransport;
use crate::config::SmithConfig;
use crate::document::{parse, DocumentFormatter};
use crate::error::{PromptError, Result};
use crate::record::{OutputFormat, PromptRecord, CONSTRAINT_SUGGESTIONS, ROLE_SUGGESTIONS};
use crate::session::PromptSession;
use crate::shortlink::{has_shortlink, ShortlinkCodec, SECURITY_WARNING};

/// Read a document from `file`, or from stdin when it is piped.
fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            if atty::is(atty::Stream::Stdin) {
                return Err(PromptError::NoInput);
            }
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

/// Single-threaded runtime; compression yields cooperatively on it.
fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

fn codec(config: &SmithConfig) -> ShortlinkCodec {
    ShortlinkCodec::new(CompressionTransport::from_config(&config.compression))
}

fn print_record(record: &PromptRecord, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("Role:          {}", record.role);
    println!("Goal:          {}", record.goal);
    println!("Constraints:   {}", record.constraints);
    println!("Output format: {}", record.output_format);
    if record.examples.is_empty() {
        println!("Examples:      (none)");
    } else {
        println!("Examples:");
        for (i, example) in record.examples.iter().enumerate() {
            println!("  {}. {}", i + 1, example.content);
        }
    }
    Ok(())
}

pub fn handle_build(
    role: String,
    goal: String,
    constraints: String,
    format: OutputFormat,
    examples: Vec<String>,
    json: bool,
) -> Result<()> {
    let mut session = PromptSession::default();
    session.edit(|record| {
        record.role = role;
        record.goal = goal;
        record.constraints = constraints;
        record.output_format = format;
        for example in examples {
            record.add_example_with(example);
        }
    });
    // Without a role or goal the edit does not regenerate on its own.
    if session.generated_prompt().is_empty() {
        session.generate();
    }

    if json {
        print_record(session.record(), true)
    } else {
        println!("{}", session.generated_prompt());
        Ok(())
    }
}

pub fn handle_parse(file: Option<PathBuf>, json: bool) -> Result<()> {
    let document = read_input(file)?;
    let record = parse(&document)?;
    print_record(&record, json)
}

pub fn handle_format(file: Option<PathBuf>) -> Result<()> {
    let document = read_input(file)?;
    let mut formatter = DocumentFormatter::new();
    let formatted = formatter.format(&document);
    println!("{}", formatted);

    match formatter.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub fn handle_share(config: &SmithConfig, file: Option<PathBuf>, base_url: Option<String>) -> Result<()> {
    let document = read_input(file)?;
    let location = match base_url {
        Some(raw) => Url::parse(&raw)?,
        None => config.base_url()?,
    };

    let codec = codec(config);
    let link = runtime()?.block_on(codec.encode(&document, &location))?;

    println!("{}", link);
    eprintln!("\n{}", SECURITY_WARNING);
    Ok(())
}

pub fn handle_open(config: &SmithConfig, url: String, json: bool) -> Result<()> {
    let codec = codec(config);
    let document = runtime()?.block_on(codec.decode(&url))?;

    if json {
        let record = parse(&document)?;
        print_record(&record, true)
    } else {
        println!("{}", document);
        Ok(())
    }
}

/// Prints the verdict and reports whether a shortlink was found.
pub fn handle_check(url: &str) -> bool {
    let found = has_shortlink(url);
    if found {
        println!("shortlink found");
    } else {
        println!("no shortlink");
    }
    found
}

pub fn handle_download(config: &SmithConfig, file: Option<PathBuf>, dir: &Path) -> Result<()> {
    let document = read_input(file)?;
    let mut session = PromptSession::default().with_download_config(&config.download);
    session.load_document(&document)?;
    if session.generated_prompt().is_empty() {
        session.generate();
    }

    match session.download_to(dir)? {
        Some(path) => println!("Saved {}", path.display()),
        None => println!("Nothing to save"),
    }
    Ok(())
}

pub fn handle_suggestions(json: bool) -> Result<()> {
    let formats: Vec<String> = OutputFormat::ALL.iter().map(|f| f.to_string()).collect();

    if json {
        let value = serde_json::json!({
            "outputFormats": formats,
            "roles": ROLE_SUGGESTIONS,
            "constraints": CONSTRAINT_SUGGESTIONS,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Output formats:");
    for format in &formats {
        println!("  {}", format);
    }
    println!("\nRoles:");
    for role in ROLE_SUGGESTIONS {
        println!("  {}", role);
    }
    println!("\nConstraints:");
    for constraint in CONSTRAINT_SUGGESTIONS {
        println!("  {}", constraint);
    }
    Ok(())
}
