// ucd.rs: Derive input keys from the character names in UnicodeData.txt.
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
use std::char;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{Error, Result};
use crate::marks::MarkTable;

//{{{ Registry

/// The parsed UnicodeData.txt: every (character, name) pair to classify, and
/// the name index used to look characters up by name.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    names: Vec<(char, String)>,
    index: HashMap<String, u32>,
}

impl Registry {
    /// Field 0 is the code point in hex, field 1 the name and field 10 the
    /// Unicode 1.0 name. uni-name in Emacs still recognizes the old names, so
    /// they are classified as well.
    pub fn parse<'a, I>(lines: I) -> Result<Registry>
        where I: IntoIterator<Item = &'a str>
    {
        let mut registry = Registry::default();

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }

            let cols: Vec<&str> = line.split(';').collect();
            let code = u32::from_str_radix(cols[0].trim(), 16)
                .map_err(|_| Error::BadCodePoint { line: line.to_owned() })?;
            let name = cols.get(1).cloned().unwrap_or("");
            let old_name = cols.get(10).cloned().unwrap_or("");

            registry.index.insert(name.to_owned(), code);
            if !old_name.is_empty() {
                if let Entry::Vacant(vac) = registry.index.entry(old_name.to_owned()) {
                    vac.insert(code);
                }
            }

            // Surrogates have names but are not characters.
            let c = match char::from_u32(code) {
                Some(c) => c,
                None => continue,
            };
            registry.names.push((c, name.to_owned()));
            if !old_name.is_empty() {
                registry.names.push((c, old_name.to_owned()));
            }
        }

        Ok(registry)
    }

    pub fn names(&self) -> &[(char, String)] {
        &self.names
    }

    pub fn char_by_name(&self, name: &str) -> Option<char> {
        self.index.get(name).and_then(|&code| char::from_u32(code))
    }
}

#[cfg(test)]
const TEST_UNICODE_DATA: &str = "\
0020;SPACE;Zs;0;WS;;;;;N;;;;;
0027;APOSTROPHE;Po;0;ON;;;;;N;APOSTROPHE-QUOTE;;;;
0031;DIGIT ONE;Nd;0;EN;;1;1;1;N;;;;;
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;
0061;LATIN SMALL LETTER A;Ll;0;L;;;;;N;;;;;
006B;LATIN SMALL LETTER K;Ll;0;L;;;;;N;;;;;
007E;TILDE;Sm;0;ON;;;;;N;;;;;
00AC;NOT SIGN;Sm;0;ON;;;;;N;;;;;
00AE;REGISTERED SIGN;So;0;ON;;;;;N;REGISTERED TRADE MARK SIGN;;;;
00AF;MACRON;Sk;0;ON;<compat> 0020 0304;;;;N;SPACING MACRON;;;;
00B9;SUPERSCRIPT ONE;No;0;EN;<super> 0031;;1;1;N;SUPERSCRIPT DIGIT ONE;;;;
01D6;LATIN SMALL LETTER U WITH DIAERESIS AND MACRON;Ll;0;L;00FC 0304;;;;N;LATIN SMALL LETTER U DIAERESIS MACRON;;01D5;;01D5
02B1;MODIFIER LETTER SMALL H WITH HOOK;Lm;0;L;<super> 0266;;;;N;MODIFIER LETTER SMALL H HOOK;;;;
02B7;MODIFIER LETTER SMALL W;Lm;0;L;<super> 0077;;;;N;;;;;
0300;COMBINING GRAVE ACCENT;Mn;230;NSM;;;;;N;NON-SPACING GRAVE;;;;
0391;GREEK CAPITAL LETTER ALPHA;Lu;0;L;;;;;N;;;;03B1;
03B1;GREEK SMALL LETTER ALPHA;Ll;0;L;;;;;N;;;0391;;0391
03B5;GREEK SMALL LETTER EPSILON;Ll;0;L;;;;;N;;;0395;;0395
03C6;GREEK SMALL LETTER PHI;Ll;0;L;;;;;N;;;03A6;;03A6
03D0;GREEK BETA SYMBOL;Ll;0;L;<compat> 03B2;;;;N;GREEK SMALL LETTER CURLED BETA;;0392;;0392
03D5;GREEK PHI SYMBOL;Ll;0;L;<compat> 03C6;;;;N;GREEK SMALL LETTER SCRIPT PHI;;03A6;;03A6
1D2F;MODIFIER LETTER CAPITAL BARRED B;Lm;0;L;;;;;N;;;;;
1E05;LATIN SMALL LETTER B WITH DOT BELOW;Ll;0;L;0062 0323;;;;N;;;1E04;;1E04
1EA1;LATIN SMALL LETTER A WITH DOT BELOW;Ll;0;L;0061 0323;;;;N;;;1EA0;;1EA0
1EAD;LATIN SMALL LETTER A WITH CIRCUMFLEX AND DOT BELOW;Ll;0;L;1EA1 0302;;;;N;;;1EAC;;1EAC
1EE3;LATIN SMALL LETTER O WITH HORN AND DOT BELOW;Ll;0;L;01A1 0323;;;;N;;;1EE2;;1EE2
2096;LATIN SUBSCRIPT SMALL LETTER K;Lm;0;L;<sub> 006B;;;;N;;;;;
D800;<Non Private Use High Surrogate, First>;Cs;0;L;;;;;N;;;;;
";

#[test]
fn test_parse_registry() {
    let registry = Registry::parse(TEST_UNICODE_DATA.lines()).unwrap();

    assert_eq!(registry.char_by_name("LATIN SMALL LETTER K"), Some('k'));
    assert_eq!(registry.char_by_name("SUPERSCRIPT DIGIT ONE"), Some('\u{b9}'));
    assert_eq!(registry.char_by_name("APOSTROPHE-QUOTE"), Some('\''));
    assert_eq!(registry.char_by_name("LATIN SMALL LETTER Q"), None);
    assert_eq!(registry.char_by_name("<Non Private Use High Surrogate, First>"), None);

    // Old names are listed right after the current name of the same character.
    let names = registry.names();
    let position = names.iter().position(|n| n.1 == "SUPERSCRIPT ONE").unwrap();
    assert_eq!(names[position + 1], ('\u{b9}', "SUPERSCRIPT DIGIT ONE".to_owned()));
    assert!(names.iter().all(|n| !n.1.starts_with("<Non")));
}

#[test]
fn test_current_name_beats_old_name() {
    let registry = Registry::parse(vec![
        "0001;FIRST;Cc;0;BN;;;;;N;SECOND;;;;",
        "0002;SECOND;Cc;0;BN;;;;;N;FIRST;;;;",
    ]).unwrap();
    assert_eq!(registry.char_by_name("FIRST"), Some('\u{1}'));
    assert_eq!(registry.char_by_name("SECOND"), Some('\u{2}'));
}

#[test]
fn test_parse_registry_bad_code_point() {
    match Registry::parse(vec!["zz41;LATIN CAPITAL LETTER A;Lu;;;;;;;;;;;;"]) {
        Err(Error::BadCodePoint { line }) => assert!(line.starts_with("zz41")),
        r => panic!("unexpected result {:?}", r),
    }
}

//}}}

//{{{ Name patterns

fn capitalize(s: &str) -> String {
    s.split(' ').map(|word| {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => String::new(),
        }
    }).collect::<Vec<String>>().join(" ")
}

#[test]
fn test_capitalize() {
    assert_eq!(capitalize("BARRED B"), "Barred B");
    assert_eq!(capitalize("ALPHA"), "Alpha");
    assert_eq!(capitalize("A  B"), "A  B");
}

/// Everything a pattern may consult besides the name itself.
pub struct Context<'a> {
    pub code: char,
    pub marks: &'a MarkTable,
    pub registry: &'a Registry,
}

/// One way to read a character name. All patterns are tried on every name, so
/// a name may yield keys from several of them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Pattern {
    /// `LATIN SMALL LETTER U WITH DIAERESIS AND MACRON` -> `\"\={u}`, `\"\=u`
    LetterWithMarks,
    /// `COMBINING GRAVE ACCENT` -> `` \` ``
    CombiningMark,
    /// `SPACING MACRON` -> `\={}`
    SpacingMark,
    /// `LATIN SUBSCRIPT SMALL LETTER K` -> `_k`
    Script,
    /// `MODIFIER LETTER SMALL W` -> `^w`, `MODIFIER LETTER CAPITAL BARRED B` -> `^\Barred B`
    ModifierLetter,
    /// `REGISTERED SIGN` -> `\registered`
    Sign,
    /// `GREEK CAPITAL LETTER ALPHA` -> `\Alpha`
    GreekLetter,
    /// `GREEK BETA SYMBOL` -> `\varbeta`
    GreekSymbol,
}

pub const PATTERNS: [Pattern; 8] = [
    Pattern::LetterWithMarks,
    Pattern::CombiningMark,
    Pattern::SpacingMark,
    Pattern::Script,
    Pattern::ModifierLetter,
    Pattern::Sign,
    Pattern::GreekLetter,
    Pattern::GreekSymbol,
];

lazy_static! {
    static ref LETTER_WITH_MARKS: Regex =
        Regex::new(r"^LATIN (?:CAPITAL|SMAL(L)) LETTER (.) WITH (.+?)(?: AND (.+))?$").unwrap();
    static ref COMBINING_MARK: Regex = Regex::new(r"^COMBINING (.+?)(?: ACCENT)?$").unwrap();
    static ref SPACING_MARK: Regex = Regex::new(r"^(?:SPACING )?(.+?)(?: ACCENT)?$").unwrap();
    static ref SCRIPT: Regex = Regex::new(r"(.*)SU(?:B|(PER))SCRIPT (.*)").unwrap();
    static ref MODIFIER_LETTER: Regex =
        Regex::new(r"^MODIFIER LETTER (?:SMALL|CAPITA(L)) ([\x20-\x7f]+)$").unwrap();
    static ref SIGN: Regex = Regex::new(r"^([^- ]+) SIGN$").unwrap();
    static ref GREEK_LETTER: Regex =
        Regex::new(r"^GREEK (?:SMALL|CAPITA(L)) LETTER ([^- ]+)$").unwrap();
    static ref GREEK_SYMBOL: Regex = Regex::new(r"^GREEK ([^- ]+) SYMBOL$").unwrap();
}

impl Pattern {
    fn regex(self) -> &'static Regex {
        match self {
            Pattern::LetterWithMarks => &*LETTER_WITH_MARKS,
            Pattern::CombiningMark => &*COMBINING_MARK,
            Pattern::SpacingMark => &*SPACING_MARK,
            Pattern::Script => &*SCRIPT,
            Pattern::ModifierLetter => &*MODIFIER_LETTER,
            Pattern::Sign => &*SIGN,
            Pattern::GreekLetter => &*GREEK_LETTER,
            Pattern::GreekSymbol => &*GREEK_SYMBOL,
        }
    }

    fn group<'t>(self, captures: &Captures<'t>, i: usize, name: &str) -> Result<&'t str> {
        captures.get(i).map(|m| m.as_str()).ok_or_else(|| Error::MissingCapture {
            rule: self as usize,
            name: name.to_owned(),
        })
    }

    /// Keys for `name`, or nothing if the name does not fit this pattern.
    pub fn keys(self, name: &str, ctx: &Context) -> Result<Vec<String>> {
        let captures = match self.regex().captures(name) {
            Some(captures) => captures,
            None => return Ok(Vec::new()),
        };

        let required = |i: usize| self.group(&captures, i, name);
        let is_set = |captures: &Captures, i: usize| captures.get(i).is_some();

        let marks = ctx.marks;
        let keys = match self {
            Pattern::LetterWithMarks => {
                let base = required(2)?;
                let mark1 = required(3)?;
                let mark2 = captures.get(4).map(|m| m.as_str());

                if !marks.is_mark(mark1) || mark2.map_or(false, |m| !marks.is_mark(m)) {
                    return Ok(Vec::new());
                }

                let base = if is_set(&captures, 1) { base.to_lowercase() } else { base.to_owned() };
                // Two marks apply one inside the other: \"\={u}
                let tokens = Some(mark1).into_iter()
                                        .chain(mark2)
                                        .filter_map(|m| marks.token_for(m))
                                        .collect::<Vec<&str>>()
                                        .join("\\");

                let mut keys = vec![format!("\\{}{{{}}}", tokens, base)];
                // "\d" only ever takes its argument in braces.
                if mark2.unwrap_or(mark1) != "DOT BELOW" {
                    keys.push(format!("\\{}{}", tokens, base));
                }
                keys
            }

            Pattern::CombiningMark => {
                match marks.token_for(required(1)?) {
                    Some(token) => vec![format!("\\{}", token)],
                    None => Vec::new(),
                }
            }

            Pattern::SpacingMark => {
                match marks.token_for(required(1)?) {
                    Some(token) if ctx.code as u32 >= 128 => vec![format!("\\{}{{}}", token)],
                    _ => Vec::new(),
                }
            }

            Pattern::Script => {
                let base = format!("{}{}", required(1)?, required(3)?);
                match ctx.registry.char_by_name(&base) {
                    Some(c) if c.is_ascii() => {
                        let prefix = if is_set(&captures, 2) { '^' } else { '_' };
                        vec![format!("{}{}", prefix, c)]
                    }
                    _ => Vec::new(),
                }
            }

            Pattern::ModifierLetter => {
                let base = required(2)?;
                let base = if is_set(&captures, 1) { capitalize(base) } else { base.to_lowercase() };
                if base.chars().count() > 1 {
                    vec![format!("^\\{}", base)]
                } else {
                    vec![format!("^{}", base)]
                }
            }

            Pattern::Sign => {
                let base = required(1)?;
                if (ctx.code as u32) < 128 || base == "NOT" {
                    Vec::new()
                } else {
                    vec![format!("\\{}", base.to_lowercase())]
                }
            }

            Pattern::GreekLetter => {
                let base = required(2)?;
                if is_set(&captures, 1) {
                    vec![format!("\\{}", capitalize(base))]
                } else if base.contains("EPSILON") || base.contains("PHI") {
                    // \epsilon and \phi are the variant forms in agda-input.
                    Vec::new()
                } else {
                    vec![format!("\\{}", base.to_lowercase())]
                }
            }

            Pattern::GreekSymbol => {
                let base = required(1)?;
                if base == "PHI" {
                    Vec::new()
                } else {
                    vec![format!("\\var{}", base.to_lowercase())]
                }
            }
        };

        Ok(keys)
    }
}

#[test]
fn test_missing_group() {
    let name = "LATIN SMALL LETTER A WITH ACUTE";
    let captures = LETTER_WITH_MARKS.captures(name).unwrap();
    assert_eq!(Pattern::LetterWithMarks.group(&captures, 3, name).unwrap(), "ACUTE");
    match Pattern::LetterWithMarks.group(&captures, 4, name) {
        Err(e @ Error::MissingCapture { .. }) => {
            assert_eq!(e.to_string(),
                       "pattern #0 matched [LATIN SMALL LETTER A WITH ACUTE] without its required groups");
        }
        r => panic!("unexpected result {:?}", r),
    }
}

//}}}

//{{{ Classify the whole registry

/// Runs every pattern over every name in the registry, producing
/// `(key, character)` entries in registry order.
pub fn classify(registry: &Registry, marks: &MarkTable) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::new();

    for &(code, ref name) in registry.names() {
        let ctx = Context { code, marks, registry };
        for (i, pattern) in PATTERNS.iter().enumerate() {
            let keys = pattern.keys(name, &ctx)?;
            if keys.is_empty() {
                continue;
            }
            debug!("Matched U+{:04X} [{}] with pattern idx={} keys={:?}", code as u32, name, i, keys);
            entries.extend(keys.into_iter().map(|key| (key, code.to_string())));
        }
    }

    Ok(entries)
}

#[cfg(test)]
fn keys_of(name: &str, code: char) -> Vec<String> {
    let registry = Registry::parse(TEST_UNICODE_DATA.lines()).unwrap();
    let marks = MarkTable::latin_ltx();
    let ctx = Context { code, marks: &marks, registry: &registry };
    PATTERNS.iter().flat_map(|p| p.keys(name, &ctx).unwrap()).collect()
}

#[test]
fn test_letter_with_marks() {
    assert_eq!(keys_of("LATIN SMALL LETTER U WITH DIAERESIS AND MACRON", '\u{1d6}'),
               vec![r#"\"\={u}"#, r#"\"\=u"#]);
    assert_eq!(keys_of("LATIN CAPITAL LETTER A WITH ACUTE", '\u{c1}'),
               vec![r"\'{A}", r"\'A"]);
    assert_eq!(keys_of("LATIN SMALL LETTER O WITH HOOK ABOVE", '\u{1ecf}'), Vec::<String>::new());
    assert_eq!(keys_of("LATIN SMALL LETTER O WITH HORN AND DOT BELOW", '\u{1ee3}'),
               Vec::<String>::new());
}

#[test]
fn test_letter_with_dot_below() {
    assert_eq!(keys_of("LATIN SMALL LETTER B WITH DOT BELOW", '\u{1e05}'), vec![r"\d{b}"]);
    assert_eq!(keys_of("LATIN SMALL LETTER A WITH CIRCUMFLEX AND DOT BELOW", '\u{1ead}'),
               vec![r"\^\d{a}"]);
    // Only the last mark counts.
    assert_eq!(keys_of("LATIN SMALL LETTER A WITH DOT BELOW AND MACRON", '\u{1ead}'),
               vec![r"\d\={a}", r"\d\=a"]);
}

#[test]
fn test_marks() {
    assert_eq!(keys_of("COMBINING GRAVE ACCENT", '\u{300}'), vec![r"\`"]);
    assert_eq!(keys_of("COMBINING HORN", '\u{31b}'), Vec::<String>::new());
    assert_eq!(keys_of("SPACING MACRON", '\u{af}'), vec![r"\={}"]);
    assert_eq!(keys_of("MACRON", '\u{af}'), vec![r"\={}"]);
    assert_eq!(keys_of("ACUTE ACCENT", '\u{b4}'), vec![r"\'{}"]);
    // ASCII punctuation shares the names.
    assert_eq!(keys_of("TILDE", '~'), Vec::<String>::new());
}

#[test]
fn test_script() {
    assert_eq!(keys_of("LATIN SUBSCRIPT SMALL LETTER K", '\u{2096}'), vec!["_k"]);
    assert_eq!(keys_of("SUPERSCRIPT DIGIT ONE", '\u{b9}'), vec!["^1"]);
    assert_eq!(keys_of("SUPERSCRIPT ONE", '\u{b9}'), Vec::<String>::new());
    assert_eq!(keys_of("SUPERSCRIPT LATIN SMALL LETTER Q", '\u{a7f9}'), Vec::<String>::new());
    assert_eq!(keys_of("SUPERSCRIPT GREEK SMALL LETTER ALPHA", '\u{1d45}'), Vec::<String>::new());
}

#[test]
fn test_modifier_letter() {
    assert_eq!(keys_of("MODIFIER LETTER SMALL W", '\u{2b7}'), vec!["^w"]);
    assert_eq!(keys_of("MODIFIER LETTER SMALL H WITH HOOK", '\u{2b1}'), vec![r"^\h with hook"]);
    assert_eq!(keys_of("MODIFIER LETTER CAPITAL BARRED B", '\u{1d2f}'), vec![r"^\Barred B"]);
}

#[test]
fn test_sign() {
    assert_eq!(keys_of("REGISTERED SIGN", '\u{ae}'), vec![r"\registered"]);
    assert_eq!(keys_of("NOT SIGN", '\u{ac}'), Vec::<String>::new());
    assert_eq!(keys_of("PLUS SIGN", '+'), Vec::<String>::new());
    assert_eq!(keys_of("REGISTERED TRADE MARK SIGN", '\u{ae}'), Vec::<String>::new());
}

#[test]
fn test_greek() {
    assert_eq!(keys_of("GREEK CAPITAL LETTER ALPHA", '\u{391}'), vec![r"\Alpha"]);
    assert_eq!(keys_of("GREEK SMALL LETTER ALPHA", '\u{3b1}'), vec![r"\alpha"]);
    assert_eq!(keys_of("GREEK CAPITAL LETTER EPSILON", '\u{395}'), vec![r"\Epsilon"]);
    assert_eq!(keys_of("GREEK SMALL LETTER EPSILON", '\u{3b5}'), Vec::<String>::new());
    assert_eq!(keys_of("GREEK SMALL LETTER PHI", '\u{3c6}'), Vec::<String>::new());
    assert_eq!(keys_of("GREEK BETA SYMBOL", '\u{3d0}'), vec![r"\varbeta"]);
    assert_eq!(keys_of("GREEK PHI SYMBOL", '\u{3d5}'), Vec::<String>::new());
}

#[test]
fn test_classify() {
    let registry = Registry::parse(TEST_UNICODE_DATA.lines()).unwrap();
    let entries = classify(&registry, &MarkTable::latin_ltx()).unwrap();

    let expected: Vec<(String, String)> = vec![
        (r"\registered", "\u{ae}"),
        (r"\={}", "\u{af}"),
        (r"\={}", "\u{af}"),
        ("^1", "\u{b9}"),
        (r#"\"\={u}"#, "\u{1d6}"),
        (r#"\"\=u"#, "\u{1d6}"),
        (r"^\h with hook", "\u{2b1}"),
        (r"^\h hook", "\u{2b1}"),
        ("^w", "\u{2b7}"),
        (r"\`", "\u{300}"),
        (r"\Alpha", "\u{391}"),
        (r"\alpha", "\u{3b1}"),
        (r"\varbeta", "\u{3d0}"),
        (r"^\Barred B", "\u{1d2f}"),
        (r"\d{b}", "\u{1e05}"),
        (r"\d{a}", "\u{1ea1}"),
        (r"\^\d{a}", "\u{1ead}"),
        ("_k", "\u{2096}"),
    ].into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();

    assert_eq!(entries, expected);
}

//}}}
