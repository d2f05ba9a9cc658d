//! lite-youtube - rewrite YouTube links in HTML
//!
//! Reads a document from a file or stdin and writes the rewritten HTML to
//! stdout.

use lite_youtube::renderer::{HtmlParser, serialize_body, serialize_document};
use lite_youtube::{NAME, PageSession, Result, RewriterConfig, VERSION};
use std::env;
use std::io::{self, Read, Write};

const USAGE: &str = "\
Usage: lite-youtube [OPTIONS] [INPUT]

Options:
  --config FILE       Load settings from a JSON file
  --post-class NAME   Class of post containers (default: post-content)
  --base-url URL      Resolve relative links against URL
  --nocookie          Use the privacy-enhanced player domain
  --no-prerender      Do not render poster and play button
  --fragment          Print only the body contents
  -h, --help          Show this help
  -V, --version       Show version";

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<String>,
    post_class: Option<String>,
    base_url: Option<String>,
    nocookie: bool,
    no_prerender: bool,
    fragment: bool,
    input: Option<String>,
}

enum Command {
    Run(CliArgs),
    Help,
    Version,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("{}: {}\n\n{}", NAME, msg, USAGE);
            std::process::exit(2);
        }
    };

    match command {
        Command::Help => println!("{}", USAGE),
        Command::Version => println!("{} v{}", NAME, VERSION),
        Command::Run(cli) => {
            if let Err(e) = run(cli) {
                eprintln!("{}: {}", NAME, e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> std::result::Result<Command, String> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--config" => cli.config = Some(value_for(arg, iter.next())?),
            "--post-class" => cli.post_class = Some(value_for(arg, iter.next())?),
            "--base-url" => cli.base_url = Some(value_for(arg, iter.next())?),
            "--nocookie" => cli.nocookie = true,
            "--no-prerender" => cli.no_prerender = true,
            "--fragment" => cli.fragment = true,
            "-" => cli.input = None,
            other if other.starts_with('-') => return Err(format!("unknown option {}", other)),
            other => {
                if cli.input.is_some() {
                    return Err("only one input file may be given".to_string());
                }
                cli.input = Some(other.to_string());
            }
        }
    }

    Ok(Command::Run(cli))
}

fn value_for(flag: &str, value: Option<&String>) -> std::result::Result<String, String> {
    value
        .cloned()
        .ok_or_else(|| format!("{} requires a value", flag))
}

fn build_config(cli: &CliArgs) -> Result<RewriterConfig> {
    let mut config = match &cli.config {
        Some(path) => RewriterConfig::from_json_file(path)?,
        None => RewriterConfig::default(),
    };
    if let Some(class) = &cli.post_class {
        config.post_class = class.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if cli.nocookie {
        config = config.with_nocookie(true);
    }
    if cli.no_prerender {
        config = config.with_prerender(false);
    }
    Ok(config)
}

fn run(cli: CliArgs) -> Result<()> {
    let config = build_config(&cli)?;

    let html = match &cli.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut document = HtmlParser::new().parse(&html)?;
    let mut session = PageSession::new(config)?;
    if let Some(report) = session.run(&mut document) {
        log::debug!(
            "Embedded {} video(s), skipped {} link(s)",
            report.embedded(),
            report.skipped.len()
        );
    }

    let output = if cli.fragment {
        serialize_body(&document)?
    } else {
        serialize_document(&document)?
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}
