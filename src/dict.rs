// dict.rs: Merge the extracted entries into the final key dictionary.
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

use std::collections::{BTreeMap, HashMap, HashSet};

/// Key -> characters, keys in code point order.
pub type Dictionary = BTreeMap<String, Vec<String>>;

//{{{ Prefix conversion

/// agda-input.el already defines these with different characters.
const REMAPPED_KEYS: &[&str] = &["geq", "leq", "bullet", "qed", "par"];

/// The key a latin-ltx/UnicodeData entry gets in agda-input, mirroring
/// `agda-input-inherit`: `_x` and `^x` are kept (except `^l`, `^o`, `^r` and
/// `^v`), `\x` loses its backslash, everything else is dropped.
pub fn convert_prefix(key: &str) -> Option<&str> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some('_'), _) => Some(key),
        (Some('^'), Some(c)) if !"lorv".contains(c) => Some(key),
        (Some('\\'), _) => {
            let stripped = &key[1..];
            if REMAPPED_KEYS.contains(&stripped) {
                None
            } else {
                Some(stripped)
            }
        }
        _ => None,
    }
}

#[test]
fn test_convert_prefix() {
    assert_eq!(convert_prefix("_k"), Some("_k"));
    assert_eq!(convert_prefix("_"), Some("_"));
    assert_eq!(convert_prefix("^1"), Some("^1"));
    assert_eq!(convert_prefix(r"^\Barred B"), Some(r"^\Barred B"));
    assert_eq!(convert_prefix("^l"), None);
    assert_eq!(convert_prefix("^o"), None);
    assert_eq!(convert_prefix("^r"), None);
    assert_eq!(convert_prefix("^v"), None);
    assert_eq!(convert_prefix("^"), None);
    assert_eq!(convert_prefix(r"\alpha"), Some("alpha"));
    assert_eq!(convert_prefix(r#"\"\={u}"#), Some(r#""\={u}"#));
    assert_eq!(convert_prefix("\\"), Some(""));
    assert_eq!(convert_prefix(r"\geq"), None);
    assert_eq!(convert_prefix(r"\qed"), None);
    assert_eq!(convert_prefix(r"\geqq"), Some("geqq"));
    assert_eq!(convert_prefix("geq"), None);
    assert_eq!(convert_prefix(""), None);
}

//}}}

//{{{ Merging

fn uniq(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(values.len());
    values.into_iter().filter(|v| seen.insert(v.clone())).collect()
}

#[test]
fn test_uniq() {
    let values = vec!["b", "a", "b", "c", "a"].into_iter().map(|s| s.to_owned()).collect();
    assert_eq!(uniq(values), vec!["b", "a", "c"]);
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DictBuilder {
    entries: HashMap<String, Vec<String>>,
}

impl DictBuilder {
    pub fn new() -> Self {
        DictBuilder::default()
    }

    /// Adds entries from UnicodeData or latin-ltx, keeping only those with an
    /// agda-input key. Returns how many were kept.
    pub fn add_inherited<I>(&mut self, entries: I) -> usize
        where I: IntoIterator<Item = (String, String)>
    {
        let mut count = 0;
        for (key, value) in entries {
            if let Some(key) = convert_prefix(&key) {
                self.entries.entry(key.to_owned()).or_insert_with(Vec::new).push(value);
                count += 1;
            }
        }
        count
    }

    /// Adds entries from agda-input itself, with the keys taken as they are.
    pub fn add_translations<I>(&mut self, entries: I)
        where I: IntoIterator<Item = (String, Vec<String>)>
    {
        for (key, values) in entries {
            self.entries.entry(key).or_insert_with(Vec::new).extend(values);
        }
    }

    pub fn build(self) -> Dictionary {
        self.entries.into_iter().map(|(key, values)| (key, uniq(values))).collect()
    }
}

#[cfg(test)]
fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries.iter().map(|&(k, v)| (k.to_owned(), v.to_owned())).collect()
}

#[cfg(test)]
fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|&s| s.to_owned()).collect()
}

#[test]
fn test_build() {
    let mut builder = DictBuilder::new();
    let kept = builder.add_inherited(pairs(&[
        (r"\alpha", "α"),
        (r"\geq", "≥"),
        ("^l", "ˡ"),
        ("^1", "¹"),
        (r"\'a", "á"),
        (r"\'{a}", "á"),
        ("'a", "á"),
        (r"\alpha", "α"),
    ]));
    assert_eq!(kept, 5);

    builder.add_translations(vec![
        ("geq".to_owned(), strings(&["≥", "⩾"])),
        ("alpha".to_owned(), strings(&["α", "⍺"])),
        ("^l".to_owned(), strings(&["ˡ"])),
    ]);

    let dict = builder.build();
    let expected: Dictionary = vec![
        ("'a", strings(&["á"])),
        ("'{a}", strings(&["á"])),
        ("^1", strings(&["¹"])),
        ("^l", strings(&["ˡ"])),
        ("alpha", strings(&["α", "⍺"])),
        ("geq", strings(&["≥", "⩾"])),
    ].into_iter().map(|(k, v)| (k.to_owned(), v)).collect();
    assert_eq!(dict, expected);

    let keys: Vec<&String> = dict.keys().collect();
    assert_eq!(keys, vec!["'a", "'{a}", "^1", "^l", "alpha", "geq"]);
}

#[test]
fn test_build_order_independent() {
    let ucd = pairs(&[(r"\Alpha", "Α"), (r"\registered", "®"), ("_k", "ₖ")]);
    let quail = pairs(&[(r"\registered", "®"), (r"\Alpha", "𝚨"), (r"\Alpha", "Α")]);

    let mut forward = DictBuilder::new();
    forward.add_inherited(ucd.clone());
    forward.add_inherited(quail.clone());

    let mut backward = DictBuilder::new();
    backward.add_inherited(quail);
    backward.add_inherited(ucd);

    let as_sets = |dict: Dictionary| -> BTreeMap<String, Vec<String>> {
        dict.into_iter().map(|(k, mut v)| { v.sort(); (k, v) }).collect()
    };
    assert_eq!(as_sets(forward.build()), as_sets(backward.build()));
}

//}}}
