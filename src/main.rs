// agda_keydict.rs: Generate the Agda input method key dictionary.
// Copyright (C) 2015  Kenny Chan
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

#[macro_use] extern crate lazy_static;
#[macro_use] extern crate tracing;

mod agda;
mod dict;
mod error;
mod escape;
mod json;
mod marks;
mod quail;
mod ucd;

use docopt::Docopt;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

use dict::DictBuilder;
use error::{Error, Result};
use marks::MarkTable;
use ucd::Registry;

const USAGE: &str = "
Usage: agda_keydict [-d] [-u FILE] [-q FILE] [-a FILE] [-o FILE]
       agda_keydict --help

Generate the key dictionary of the Agda input method. Keys are derived from
the character names in UnicodeData.txt and taken from the Quail package
latin-ltx.el, as agda-input.el inherits them, then merged with the
translations of agda-input.el itself. The result is a JSON object mapping each
key to the characters it produces, e.g.

{
\"alpha\": [\"α\"],
\"bN\": [\"ℕ\",\"𝐍\"]
}

Options:
    -u FILE, --ucd FILE         UnicodeData.txt [default: data/UnicodeData.txt].
    -q FILE, --quail FILE       Quail rules to inherit [default: data/latin-ltx.el].
    -a FILE, --agda FILE        agda-input.el [default: data/agda-input.el].
    -o FILE, --output FILE      Where to write the dictionary [default: out/dict.json].
    -d, --debug                 Log every key derived from a character name.
";

#[derive(Debug, Deserialize)]
struct Args {
    flag_ucd: String,
    flag_quail: String,
    flag_agda: String,
    flag_output: String,
    flag_debug: bool,
}

fn read(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::Io { path: path.into(), source: e })
}

fn run(args: &Args) -> Result<()> {
    // Read everything before producing anything.
    let ucd_data = read(&args.flag_ucd)?;
    let quail_data = read(&args.flag_quail)?;
    let agda_data = read(&args.flag_agda)?;

    let registry = Registry::parse(ucd_data.lines())?;
    info!("{} names in {}", registry.names().len(), args.flag_ucd);
    let ucd_entries = ucd::classify(&registry, &MarkTable::latin_ltx())?;
    info!("{} keys derived from character names", ucd_entries.len());

    let quail_entries = quail::parse(quail_data.lines())?;
    info!("{} rules in {}", quail_entries.len(), args.flag_quail);

    let mut builder = DictBuilder::new();
    let inherited = builder.add_inherited(ucd_entries.into_iter().chain(quail_entries));
    info!("{} entries inherited", inherited);

    let agda_entries = agda::parse(agda_data.lines())?;
    info!("{} translations in {}", agda_entries.len(), args.flag_agda);
    builder.add_translations(agda_entries);

    let dict = builder.build();
    let output = json::to_json(&dict)?;

    let path = Path::new(&args.flag_output);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::Io { path: parent.into(), source: e })?;
        }
    }
    fs::write(path, output).map_err(|e| Error::Io { path: path.into(), source: e })?;
    info!("{} keys written to {}", dict.len(), args.flag_output);

    Ok(())
}

pub fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let filter = if args.flag_debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
