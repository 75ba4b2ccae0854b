#[macro_use]
extern crate clap;

use clap::Arg;
use hp67asm::{listing, publics, rom, AssembleOptions};
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use util::ParseEnumError;

/// Which of the three mutually exclusive ROM serializations (spec.md §6) to
/// write for `--output`. Hand-rolled `FromStr` in `vcpu`'s `OpCode`/`ALUFunct`
/// style rather than pulling in a derive for three variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Binary,
    Octal,
    Header,
}

impl std::str::FromStr for OutputFormat {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<OutputFormat, ParseEnumError> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "bin" => Ok(OutputFormat::Binary),
            "octal" | "rom" => Ok(OutputFormat::Octal),
            "header" | "c" => Ok(OutputFormat::Header),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                enum_name: "OutputFormat",
            }),
        }
    }
}

#[derive(Debug)]
enum IOErrorContext {
    ReadInput,
    WriteOutput,
}

#[derive(Debug)]
enum Error {
    Assemble(hp67asm::AssembleError),
    Io(std::io::Error, IOErrorContext, PathBuf),
    BadFormat(ParseEnumError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, context, path) => writeln!(
                f,
                "{} file \"{}\" failed: {}",
                match context {
                    IOErrorContext::ReadInput => "Reading input",
                    IOErrorContext::WriteOutput => "Writing output",
                },
                path.display(),
                err
            ),
            Error::Assemble(err) => {
                writeln!(f, "Assembling input failed:")?;
                write!(f, "{}", err)
            }
            Error::BadFormat(err) => write!(f, "{}", err),
        }
    }
}

impl From<hp67asm::AssembleError> for Error {
    fn from(err: hp67asm::AssembleError) -> Error {
        Error::Assemble(err)
    }
}

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Assembly source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("OUTPUT")
                .help("Base path for the ROM output(s); defaults to INPUT's stem"),
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .takes_value(true)
                .value_name("FORMAT")
                .possible_values(&["binary", "octal", "header"])
                .default_value("binary")
                .help("ROM output format: two binary bank files, flat octal text, or a C header"),
        )
        .arg(
            Arg::with_name("listing")
                .short("l")
                .long("listing")
                .takes_value(true)
                .value_name("LISTING")
                .help("Path to write the assembly listing (.lst) to"),
        )
        .arg(
            Arg::with_name("publics")
                .short("p")
                .long("publics")
                .takes_value(true)
                .value_name("PUBLICS")
                .help("Path to write the public-symbol #define stream to"),
        )
        .arg(
            Arg::with_name("mirror")
                .long("mirror")
                .help("Mirror bank 0 into bank 1's reserved regions instead of requiring them to be hand-written"),
        )
        .get_matches();

    let input = matches.value_of("INPUT").unwrap();
    let output = matches.value_of("output");
    let format = matches.value_of("format").unwrap();
    let listing_path = matches.value_of("listing");
    let publics_path = matches.value_of("publics");
    let mirror = matches.is_present("mirror");

    if let Err(err) = run(input, output, format, listing_path, publics_path, mirror) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn run(
    input: &str,
    output: Option<&str>,
    format: &str,
    listing_path: Option<&str>,
    publics_path: Option<&str>,
    mirror: bool,
) -> Result<(), Error> {
    let format: OutputFormat = format.parse().map_err(Error::BadFormat)?;
    let input_path = Path::new(input);

    let input_file = File::open(input_path)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, input_path.to_owned()))?;
    let mut source = String::new();
    BufReader::new(input_file)
        .read_to_string(&mut source)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, input_path.to_owned()))?;

    let options = AssembleOptions { mirror };
    let result = hp67asm::assemble(&source, &options)?;

    for diagnostic in &result.diagnostics {
        eprintln!("{}", diagnostic);
    }

    let output_base: PathBuf = output
        .map(PathBuf::from)
        .unwrap_or_else(|| input_path.with_extension(""));

    match format {
        OutputFormat::Binary => {
            let bank0_path = with_suffix(&output_base, "_bank0.bin");
            let bank1_path = with_suffix(&output_base, "_bank1.bin");
            let bank0_file = create_file(&bank0_path)?;
            let bank1_file = create_file(&bank1_path)?;
            rom::write_binary_banks(&result.rom, bank0_file, bank1_file)
                .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, bank0_path))?;
        }
        OutputFormat::Octal => {
            let path = with_suffix(&output_base, ".rom");
            write_string(&path, &rom::flat_rom_text(&result.rom))?;
        }
        OutputFormat::Header => {
            let path = with_suffix(&output_base, ".h");
            write_string(&path, &rom::c_header(&result.rom))?;
        }
    }

    if let Some(path) = listing_path {
        write_string(Path::new(path), &listing::render(&result.listing))?;
    }

    if let Some(path) = publics_path {
        write_string(Path::new(path), &publics::render(&result.publics))?;
    }

    Ok(())
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s = base.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

fn create_file(path: &Path) -> Result<File, Error> {
    File::create(path).map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, path.to_owned()))
}

fn write_string(path: &Path, contents: &str) -> Result<(), Error> {
    let mut file = create_file(path)?;
    file.write_all(contents.as_bytes())
        .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, path.to_owned()))
}
