use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::info;

use crate::error::CodecError;

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

/// Encode one file, decode one file, or ask the user what to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Encode(String),
    Decode(String),
    Interactive,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug)]
pub struct CodecOpts {
    /// Directory holding the input files and their artifacts
    pub resource_dir: PathBuf,
    /// Encode/Decode/Interactive
    pub op_mode: Mode,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl CodecOpts {
    pub fn new() -> Self {
        Self {
            resource_dir: PathBuf::from(DEFAULT_RESOURCE_DIR),
            op_mode: Mode::Interactive,
            verbose: Verbosity::Errors,
        }
    }

    /// Default options working out of a different directory
    pub fn with_resource_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            resource_dir: dir.into(),
            ..Self::new()
        }
    }
}

impl Default for CodecOpts {
    fn default() -> Self {
        Self::new()
    }
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_RESOURCE_DIR: &str = "resources";

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman and LZ78 text encoder",
    long_about = "
    Encodes a text file twice: once with a static Huffman code and once with an LZ78
    dictionary code. Whitespace is replaced by #SP#, #NL# and #TAB# markers first.
    Files are looked up as <resources>/<name>.txt. Encoding writes <name>-huffman.txt and
    <name>-lz78.txt; decoding reads them back and writes <name>-decoded.txt.

    Without --encode or --decode an interactive menu is shown."
)]
pub struct Args {
    /// Encode <resources>/<NAME>.txt
    #[clap(short = 'e', long = "encode", value_name = "NAME", conflicts_with = "decode")]
    encode: Option<String>,

    /// Decode the artifacts of <NAME>
    #[clap(short = 'd', long = "decode", value_name = "NAME")]
    decode: Option<String>,

    /// Directory holding inputs and artifacts
    #[clap(short = 'r', long = "resources", default_value = DEFAULT_RESOURCE_DIR)]
    resources: PathBuf,

    /// Sets verbosity. Errors are always shown and -v adds warnings. Release builds stop there,
    /// -vv (info) and up only take effect in debug builds
    #[clap(short = 'v', parse(from_occurrences))]
    v: u64,

    /// Suppress all log messages. Failed encodes and decodes are still reported
    #[clap(short = 'q', long = "quiet", conflicts_with = "v")]
    quiet: bool,
}

impl Args {
    /// Copy the parsed command line into our internal structure
    pub fn into_opts(self) -> CodecOpts {
        let op_mode = match (self.encode, self.decode) {
            (Some(name), _) => Mode::Encode(name),
            (None, Some(name)) => Mode::Decode(name),
            (None, None) => Mode::Interactive,
        };
        let verbose = match self.v {
            _ if self.quiet => Verbosity::Quiet,
            0 => Verbosity::Errors,
            1 => Verbosity::Warnings,
            2 => Verbosity::Info,
            3 => Verbosity::Debug,
            _ => Verbosity::Trace,
        };
        CodecOpts {
            resource_dir: self.resources,
            op_mode,
            verbose,
        }
    }
}

/// Parse the command line, print the opening line and set the log level.
pub fn codec_opts_init() -> CodecOpts {
    // Print opening line
    println!("huffman-lz78, a two-stage text encoder. Rust version {}", VERSION);

    let opts = Args::parse().into_opts();
    set_log_level(opts.verbose);

    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Resource directory is {}", opts.resource_dir.display());
    opts
}

/// Set the log level
pub fn set_log_level(verbose: Verbosity) {
    match verbose {
        Verbosity::Quiet => log::set_max_level(log::LevelFilter::Off),
        Verbosity::Errors => log::set_max_level(log::LevelFilter::Error),
        Verbosity::Warnings => log::set_max_level(log::LevelFilter::Warn),
        Verbosity::Info => log::set_max_level(log::LevelFilter::Info),
        Verbosity::Debug => log::set_max_level(log::LevelFilter::Debug),
        Verbosity::Trace => log::set_max_level(log::LevelFilter::Trace),
    };
}

/// One pass through the interactive menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Encode(String),
    Decode(String),
    Exit,
}

const MENU: &str = "Choose an option:
1. Encode a file
2. Decode a file
3. Exit";

/// Show the menu and read choices until we get a usable one. End of input counts as Exit.
pub fn prompt_choice<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<MenuChoice> {
    loop {
        writeln!(out, "{}", MENU)?;
        let choice = match read_trimmed(input)? {
            Some(line) => line,
            None => return Ok(MenuChoice::Exit),
        };
        match choice.as_str() {
            "1" | "2" => {
                let verb = if choice == "1" { "encode" } else { "decode" };
                writeln!(out, "Enter the name of the file to {}:", verb)?;
                let name = match read_trimmed(input)? {
                    Some(name) => name,
                    None => return Ok(MenuChoice::Exit),
                };
                if name.is_empty() {
                    writeln!(out, "No file name given.")?;
                    continue;
                }
                return Ok(if choice == "1" {
                    MenuChoice::Encode(name)
                } else {
                    MenuChoice::Decode(name)
                });
            }
            "3" => return Ok(MenuChoice::Exit),
            other => writeln!(out, "Invalid choice: '{}'", other)?,
        }
    }
}

/// Tell the user how one encode or decode went. Success goes to `out` and failure to `err`,
/// whatever the log level, so `-q` still shows what went wrong.
pub fn report<O: Write, E: Write>(
    outcome: Result<String, CodecError>,
    action: &str,
    name: &str,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    match outcome {
        Ok(message) => writeln!(out, "{}", message),
        Err(e) => writeln!(err, "Could not {} '{}': {}", action, name, e),
    }
}

/// Read one line without its line ending. None at end of input.
fn read_trimmed<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn opts_from(args: &[&str]) -> CodecOpts {
        Args::try_parse_from(args.iter().copied())
            .unwrap()
            .into_opts()
    }

    #[test]
    fn defaults_test() {
        let opts = opts_from(&["huffman-lz78"]);
        assert_eq!(opts.op_mode, Mode::Interactive);
        assert_eq!(opts.resource_dir, PathBuf::from("resources"));
        assert_eq!(opts.verbose, Verbosity::Errors);
    }

    #[test]
    fn encode_args_test() {
        let opts = opts_from(&["huffman-lz78", "-e", "story", "-r", "/tmp/texts", "-vv"]);
        assert_eq!(opts.op_mode, Mode::Encode("story".to_string()));
        assert_eq!(opts.resource_dir, PathBuf::from("/tmp/texts"));
        assert_eq!(opts.verbose, Verbosity::Info);
    }

    #[test]
    fn decode_args_test() {
        let opts = opts_from(&["huffman-lz78", "--decode", "story", "-vvvvvv"]);
        assert_eq!(opts.op_mode, Mode::Decode("story".to_string()));
        assert_eq!(opts.verbose, Verbosity::Trace);
    }

    #[test]
    fn quiet_test() {
        let opts = opts_from(&["huffman-lz78", "-q"]);
        assert_eq!(opts.verbose, Verbosity::Quiet);
    }

    #[test]
    fn conflicting_modes_test() {
        assert!(Args::try_parse_from(["huffman-lz78", "-e", "a", "-d", "b"]).is_err());
    }

    #[test]
    fn report_success_test() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        report(Ok("Decoding finished".to_string()), "decode", "story", &mut out, &mut err).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Decoding finished\n");
        assert!(err.is_empty());
    }

    #[test]
    fn report_failure_when_quiet_test() {
        set_log_level(Verbosity::Quiet);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let missing = CodecError::MissingArtifact(PathBuf::from("res/missing-lz78.txt"));
        report(Err(missing), "decode", "missing", &mut out, &mut err).unwrap();
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "Could not decode 'missing': artifact file res/missing-lz78.txt is missing\n"
        );
    }

    #[test]
    fn menu_encode_test() {
        let mut input = Cursor::new("1\nstory\n");
        let mut out = Vec::new();
        let choice = prompt_choice(&mut input, &mut out).unwrap();
        assert_eq!(choice, MenuChoice::Encode("story".to_string()));
        assert!(String::from_utf8(out).unwrap().contains("file to encode"));
    }

    #[test]
    fn menu_retry_test() {
        let mut input = Cursor::new("7\n2\n\n2\n  story \n");
        let mut out = Vec::new();
        let choice = prompt_choice(&mut input, &mut out).unwrap();
        assert_eq!(choice, MenuChoice::Decode("story".to_string()));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Invalid choice: '7'"));
        assert!(printed.contains("No file name given."));
    }

    #[test]
    fn menu_exit_test() {
        let mut out = Vec::new();
        assert_eq!(
            prompt_choice(&mut Cursor::new("3\n"), &mut out).unwrap(),
            MenuChoice::Exit
        );
        assert_eq!(
            prompt_choice(&mut Cursor::new(""), &mut out).unwrap(),
            MenuChoice::Exit
        );
        assert_eq!(
            prompt_choice(&mut Cursor::new("1\n"), &mut out).unwrap(),
            MenuChoice::Exit
        );
    }
}
