// marks.rs: Diacritic names and the keys that type them.
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

use std::collections::HashMap;

/// The mark table of latin-ltx.el, minus the entries it leaves unsupported.
pub const LATIN_LTX_MARKS: &[(&str, &str)] = &[
    ("DOT BELOW", "d"),
    ("DOT ABOVE", "."),
    ("OGONEK", "k"),
    ("CEDILLA", "c"),
    ("CARON", "v"),
    // ("HOOK ABOVE", ??),
    ("MACRON", "="),
    ("BREVE", "u"),
    ("TILDE", "~"),
    ("GRAVE", "`"),
    ("CIRCUMFLEX", "^"),
    ("DIAERESIS", "\""),
    ("DOUBLE ACUTE", "H"),
    ("ACUTE", "'"),
];

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MarkTable {
    tokens: HashMap<&'static str, &'static str>,
}

impl MarkTable {
    pub fn new(pairs: &[(&'static str, &'static str)]) -> Self {
        MarkTable { tokens: pairs.iter().cloned().collect() }
    }

    pub fn latin_ltx() -> Self {
        MarkTable::new(LATIN_LTX_MARKS)
    }

    pub fn is_mark(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    pub fn token_for(&self, name: &str) -> Option<&'static str> {
        self.tokens.get(name).cloned()
    }
}

#[test]
fn test_mark_table() {
    let marks = MarkTable::latin_ltx();
    for &(name, token) in LATIN_LTX_MARKS {
        assert!(marks.is_mark(name), "{} should be a mark", name);
        assert_eq!(marks.token_for(name), Some(token));
    }

    for name in &["HOOK ABOVE", "ACUTE ACCENT", "acute", "", "LATIN SMALL LETTER A"] {
        assert!(!marks.is_mark(name));
        assert_eq!(marks.token_for(name), None);
    }
}

#[test]
fn test_custom_mark_table() {
    let marks = MarkTable::new(&[("HOOK ABOVE", "?")]);
    assert!(marks.is_mark("HOOK ABOVE"));
    assert!(!marks.is_mark("MACRON"));
}
