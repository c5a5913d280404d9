//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::io::{self, Write};

use huffman_lz78::tools::cli::{
    codec_opts_init, prompt_choice, report, CodecOpts, MenuChoice, Mode,
};
use huffman_lz78::{decode_file, encode_file};

use log::{info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};
use tikv_jemallocator::Jemalloc;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() -> Result<(), std::io::Error> {
    // Available log levels are Error, Warn, Info, Debug, Trace. The cli options narrow this down.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }

    let options = codec_opts_init();

    //----- Figure how what we need to do and go do it
    match &options.op_mode {
        Mode::Encode(name) => encode(&options, name)?,
        Mode::Decode(name) => decode(&options, name)?,
        Mode::Interactive => interactive(&options)?,
    }

    info!("Done.");
    Ok(())
}

/// Keep offering the menu until the user exits. Failed encodes and decodes are reported and the
/// loop goes on.
fn interactive(options: &CodecOpts) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    loop {
        match prompt_choice(&mut input, &mut out)? {
            MenuChoice::Encode(name) => encode(options, &name)?,
            MenuChoice::Decode(name) => decode(options, &name)?,
            MenuChoice::Exit => return Ok(()),
        }
        out.flush()?;
    }
}

fn encode(options: &CodecOpts, name: &str) -> io::Result<()> {
    let outcome = encode_file(options, name).map(|paths| {
        format!(
            "Encoding finished: {} and {}",
            paths.huffman.display(),
            paths.lz78.display()
        )
    });
    report(outcome, "encode", name, &mut io::stdout(), &mut io::stderr())
}

fn decode(options: &CodecOpts, name: &str) -> io::Result<()> {
    let outcome = decode_file(options, name)
        .map(|paths| format!("Decoding finished: {}", paths.decoded.display()));
    report(outcome, "decode", name, &mut io::stdout(), &mut io::stderr())
}
