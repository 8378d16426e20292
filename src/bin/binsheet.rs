//! # CLI Entry Point
//!
//! Binary entry point for the interactive structure-file editor.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive editing, in place (requires -o to save over the file)
//! binsheet lights.bin -o
//!
//! # Edit and save to a new file
//! binsheet lights.bin -d edited.bin
//!
//! # One-shot field edit, no prompt
//! binsheet lights.bin -o -s lamp -i 3 -k effect -v 1.5
//! ```

use eyre::{Result, WrapErr, bail};
use std::env;
use std::path::PathBuf;

use binsheet::adapter::LightSet;
use binsheet::cli::{Repl, render_table};
use binsheet::session::Session;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let mut source: Option<PathBuf> = None;
    let mut dest: Option<PathBuf> = None;
    let mut overwrite = false;
    let mut section: Option<String> = None;
    let mut index: Option<String> = None;
    let mut key: Option<String> = None;
    let mut value: Option<String> = None;
    let mut element: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" => {
                println!("binsheet {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "-o" => overwrite = true,
            "-d" => dest = Some(PathBuf::from(take_param(&args, &mut i, "-d")?)),
            "-s" => section = Some(take_param(&args, &mut i, "-s")?),
            "-i" => index = Some(take_param(&args, &mut i, "-i")?),
            "-k" => key = Some(take_param(&args, &mut i, "-k")?),
            "-v" => value = Some(take_param(&args, &mut i, "-v")?),
            "-e" => element = Some(take_param(&args, &mut i, "-e")?),
            arg if arg.starts_with('-') => {
                bail!("Unknown option: {}", arg);
            }
            path => {
                if source.is_some() {
                    bail!("Multiple input files specified");
                }
                source = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    let source = match source {
        Some(p) => p,
        None => {
            print_usage();
            return Ok(());
        }
    };
    let dest = dest.unwrap_or_else(|| source.clone());

    let one_shot = section.is_some()
        || index.is_some()
        || key.is_some()
        || value.is_some()
        || element.is_some();
    if one_shot {
        let key = match key {
            Some(key) => key,
            None => bail!("Key is required for a one-shot edit (-k)"),
        };
        let value = match value {
            Some(value) => value,
            None => bail!("Value is required for a one-shot edit (-v)"),
        };
        let index = match index {
            Some(raw) => parse_index(&raw)?,
            None => bail!("Index is required for a one-shot edit (-i)"),
        };
        let section = section.unwrap_or_else(|| "lamp".to_string());
        let element = match element {
            Some(raw) => raw
                .parse::<usize>()
                .wrap_err_with(|| format!("'{}' is not an element index", raw))?,
            None => 0,
        };

        let mut session = Session::open(Box::new(LightSet), &source)?;
        session.set_field(&section, index, &key, element, &value)?;
        println!("{}", render_table(session.table())?);
        session.save(&dest, overwrite)?;
        println!("Saved '{}'", dest.display());
        return Ok(());
    }

    let session = Session::open(Box::new(LightSet), &source)?;
    let mut repl = Repl::new(session, dest, overwrite)?;
    repl.run()?;

    Ok(())
}

fn take_param(args: &[String], i: &mut usize, flag: &str) -> Result<String> {
    *i += 1;
    match args.get(*i) {
        Some(param) if !param.starts_with('-') => Ok(param.clone()),
        _ => bail!("Flag {} requires a parameter", flag),
    }
}

fn parse_index(raw: &str) -> Result<usize> {
    if raw.eq_ignore_ascii_case("a") || raw.eq_ignore_ascii_case("all") {
        bail!("Index 'all' is not supported; give a numeric instance index");
    }
    raw.parse::<usize>()
        .wrap_err_with(|| format!("'{}' is not an instance index", raw))
}

fn print_usage() {
    println!("binsheet - Schema-driven binary table editor");
    println!();
    println!("USAGE:");
    println!("    binsheet <FILE> [OPTIONS]");
    println!();
    println!("ARGS:");
    println!("    <FILE>    Light-set file to edit");
    println!();
    println!("OPTIONS:");
    println!("    -o              Allow overwriting an existing destination file");
    println!("    -d <PATH>       Destination file (defaults to <FILE>)");
    println!("    -s <SECTION>    Section name for a one-shot edit (default: lamp)");
    println!("    -i <INDEX>      Section instance index for a one-shot edit");
    println!("    -k <KEY>        Field name for a one-shot edit");
    println!("    -v <VALUE>      Value text for a one-shot edit");
    println!("    -e <ELEMENT>    Element index within the field (default: 0)");
    println!("    -h, --help      Print help information");
    println!("        --version   Print version information");
    println!();
    println!("Without -k and -v, the interactive editor starts.");
    println!();
    println!("EXAMPLES:");
    println!("    binsheet lights.bin -o                  Edit in place");
    println!("    binsheet lights.bin -d edited.bin       Edit, save elsewhere");
    println!("    binsheet lights.bin -o -s lamp -i 3 -k effect -v 1.5");
}
