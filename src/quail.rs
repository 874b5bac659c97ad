// quail.rs: Extract the rules of a Quail package such as latin-ltx.el.
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

use crate::error::Result;
use crate::escape::{strip_comment, unquote};

lazy_static! {
    // ("\\'a" ?á) or ("\\\"" ?\")
    static ref RULE_REGEX: Regex = Regex::new(r#"\(("(?:[^"\\]|\\.)+") +\?\\?(.)\)"#).unwrap();
}

/// Every `("KEY" ?c)` group on every line, in order.
pub fn parse<'a, I>(lines: I) -> Result<Vec<(String, String)>>
    where I: IntoIterator<Item = &'a str>
{
    let mut entries = Vec::new();
    for line in lines {
        for captures in RULE_REGEX.captures_iter(strip_comment(line)) {
            let key = unquote(&captures[1])?;
            entries.push((key, captures[2].to_owned()));
        }
    }
    Ok(entries)
}

#[test]
fn test_parse_quail() {
    let source = r#"
(quail-define-rules
 ("\\'a" ?á) ("\\'{a}" ?á)
 ("\\\"o" ?ö)  ;; ("\\\"x" ?x) is commented out
 ("\\\"" ?\")
 ("\\\\" ?\\)
 ;; ("\\ignored" ?i)
 ("^l" ?ˡ)
 ("\\geq" ?≥) ("\\par" ?¶)
 ("no char")
)
"#;

    let entries = parse(source.lines()).unwrap();
    let expected: Vec<(String, String)> = vec![
        ("\\'a", "á"),
        ("\\'{a}", "á"),
        ("\\\"o", "ö"),
        ("\\\"", "\""),
        ("\\\\", "\\"),
        ("^l", "ˡ"),
        ("\\geq", "≥"),
        ("\\par", "¶"),
    ].into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();
    assert_eq!(entries, expected);
}

#[test]
fn test_parse_quail_bad_key() {
    assert!(parse(vec![r#"("\q" ?x)"#]).is_err());
}
