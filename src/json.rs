// json.rs: Write the dictionary as dict.json.
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

use regex::{Captures, Regex};

use crate::dict::Dictionary;
use crate::error::Result;

lazy_static! {
    static ref INVISIBLE_REGEX: Regex = Regex::new(r"[\p{M}\p{C}\p{Z}]").unwrap();
}

/// Marks, controls, format characters and separators become `\uXXXX` so the
/// file shows what it contains in any viewer.
fn escape_invisible(s: &str) -> String {
    INVISIBLE_REGEX.replace_all(s, |captures: &Captures| {
        let mut units = [0u16; 2];
        let mut result = String::with_capacity(12);
        for c in captures[0].chars() {
            for unit in c.encode_utf16(&mut units) {
                result.push_str(&format!("\\u{:04x}", unit));
            }
        }
        result
    }).into_owned()
}

#[test]
fn test_escape_invisible() {
    assert_eq!(escape_invisible("[\"a\",\"\u{301}\"]"), r#"["a","\u0301"]"#);
    assert_eq!(escape_invisible("\u{200b}\u{a0}\u{7f} "), r"\u200b\u00a0\u007f\u0020");
    assert_eq!(escape_invisible("\u{e0001}"), r"\udb40\udc01");
    assert_eq!(escape_invisible("\u{3b1}\u{2265}\u{1d539}"), "\u{3b1}\u{2265}\u{1d539}");
}

/// One `"key": [values]` line per key, in dictionary order.
pub fn to_json(dict: &Dictionary) -> Result<String> {
    let mut result = String::from("{\n");
    let mut first = true;
    for (key, values) in dict {
        if !first {
            result.push_str(",\n");
        }
        first = false;

        let key = serde_json::to_string(key)?;
        let values = escape_invisible(&serde_json::to_string(values)?);
        result.push_str(&format!("{}: {}", key, values));
    }
    result.push_str("\n}\n");
    Ok(result)
}

#[cfg(test)]
fn test_dict() -> Dictionary {
    vec![
        ("'", vec!["\u{301}", "\u{b4}"]),
        ("\"\\={u}", vec!["\u{1d6}"]),
        ("_k", vec!["\u{2096}"]),
        ("nbsp", vec!["\u{a0}"]),
        ("sp", vec![" ", "\u{3000}"]),
        ("zwsp", vec!["\u{200b}"]),
    ].into_iter()
     .map(|(k, vs)| (k.to_owned(), vs.into_iter().map(|v| v.to_owned()).collect()))
     .collect()
}

#[test]
fn test_to_json() {
    let expected = concat!(
        "{\n",
        r#""\"\\={u}": ["#, "\"\u{1d6}\"],\n",
        r#""'": ["\u0301","#, "\"\u{b4}\"],\n",
        r#""_k": ["#, "\"\u{2096}\"],\n",
        r#""nbsp": ["\u00a0"],"#, "\n",
        r#""sp": ["\u0020","\u3000"],"#, "\n",
        r#""zwsp": ["\u200b"]"#, "\n",
        "}\n",
    );
    assert_eq!(to_json(&test_dict()).unwrap(), expected);
}

#[test]
fn test_to_json_empty() {
    assert_eq!(to_json(&Dictionary::new()).unwrap(), "{\n\n}\n");
}

#[test]
fn test_to_json_round_trip() {
    let dict = test_dict();
    let parsed: Dictionary = serde_json::from_str(&to_json(&dict).unwrap()).unwrap();
    assert_eq!(parsed, dict);
}
