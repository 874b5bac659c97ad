// escape.rs: String literals and comments of the Emacs Lisp input tables.
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

use regex::Regex;
use std::char;

use crate::error::{Error, Result};

lazy_static! {
    static ref ESCAPE_REGEX: Regex =
        Regex::new(r#"\\(?:u(?P<hex>[0-9a-fA-F]{4})|(?P<special>[\\"/nrt])|(?P<bad>.?))"#).unwrap();
}

/// Cuts a line at the first `;;`. We assume no string literal contains one.
pub fn strip_comment(line: &str) -> &str {
    match line.find(";;") {
        Some(index) => &line[..index],
        None => line,
    }
}

/// Decodes a double-quoted literal such as `"\\\"o"`, quotes included.
pub fn unquote(literal: &str) -> Result<String> {
    let bad_string = || Error::BadString { fragment: literal.to_owned() };

    let inner = literal.strip_prefix('"')
                       .and_then(|s| s.strip_suffix('"'))
                       .ok_or_else(bad_string)?;

    let mut result = String::with_capacity(inner.len());
    let mut last = 0;
    for captures in ESCAPE_REGEX.captures_iter(inner) {
        let whole = captures.get(0).ok_or_else(bad_string)?;
        push_plain(&mut result, &inner[last..whole.start()]).ok_or_else(bad_string)?;
        last = whole.end();

        let c = if let Some(hex) = captures.name("hex") {
            u32::from_str_radix(hex.as_str(), 16).ok()
                                                 .and_then(char::from_u32)
                                                 .ok_or_else(bad_string)?
        } else if let Some(special) = captures.name("special") {
            match special.as_str() {
                "n" => '\n',
                "r" => '\r',
                "t" => '\t',
                s => s.chars().next().ok_or_else(bad_string)?,
            }
        } else {
            return Err(bad_string());
        };
        result.push(c);
    }
    push_plain(&mut result, &inner[last..]).ok_or_else(bad_string)?;

    Ok(result)
}

/// Unescaped text between escapes. A bare quote would have ended the literal.
fn push_plain(result: &mut String, plain: &str) -> Option<()> {
    if plain.contains('"') {
        return None;
    }
    result.push_str(plain);
    Some(())
}

#[test]
fn test_unquote() {
    assert_eq!(unquote(r#""\\\"o""#).unwrap(), "\\\"o");
    assert_eq!(unquote(r#""^l""#).unwrap(), "^l");
    assert_eq!(unquote(r#""\u00e9\u2200""#).unwrap(), "\u{e9}\u{2200}");
    assert_eq!(unquote(r#""ét\n""#).unwrap(), "\u{e9}t\n");
    assert_eq!(unquote(r#""／＼""#).unwrap(), "／＼");
}

#[test]
fn test_unquote_invalid() {
    assert!(unquote(r#""\q""#).is_err());
    assert!(unquote(r#""abc\""#).is_err());
    assert!(unquote(r#""\ud800""#).is_err());
    assert!(unquote("abc").is_err());
}

#[test]
fn test_strip_comment() {
    assert_eq!(strip_comment(r#" ("\\'" ?\u) ;; hook"#), r#" ("\\'" ?\u) "#);
    assert_eq!(strip_comment(";;; whole line"), "");
    assert_eq!(strip_comment("no comment"), "no comment");
}
