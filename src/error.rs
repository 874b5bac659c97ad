// error.rs: Failures that abort a dictionary build.
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

use std::io;
use std::path::PathBuf;

/// Everything here is fatal. Recognition misses in the classifier are not
/// errors and never reach this type.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid code point in UnicodeData record {line:?}")]
    BadCodePoint { line: String },

    /// A name pattern matched but one of the groups it always captures is
    /// absent: the pattern and the data disagree.
    #[error("pattern #{rule} matched [{name}] without its required groups")]
    MissingCapture { rule: usize, name: String },

    #[error("malformed value for key {key:?}")]
    MalformedValue { key: String },

    #[error("invalid string literal {fragment}")]
    BadString { fragment: String },

    #[error("cannot serialize dictionary: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
