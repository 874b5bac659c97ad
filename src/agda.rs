// agda.rs: Extract the translation alist of agda-input.el.
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

use crate::error::{Error, Result};
use crate::escape::{strip_comment, unquote};

lazy_static! {
    // ("~~~" . ("≋")) or ("/" . ,(agda-input-to-string-list "／＼"))
    static ref ENTRY_REGEX: Regex = Regex::new(concat!(
        r#"\( *(?P<key>"(?:[^"\\]|\\.)+") *\. *"#,
        r#"(?:\((?P<list>(?:"(?:[^"\\]|\\.)+"\s*)+)\)"#,
        r#"|(?P<expand>,\(agda-input-to-string-list *"(?P<chars>[^"]+?)" *\)))"#,
        r#" *\)"#,
    )).unwrap();

    static ref STRING_REGEX: Regex = Regex::new(r#""(?:[^"\\]|\\.)+""#).unwrap();
}

/// Every `("KEY" . VALUES)` entry of the document, in order. The lines are
/// joined first since a value may span several of them.
pub fn parse<'a, I>(lines: I) -> Result<Vec<(String, Vec<String>)>>
    where I: IntoIterator<Item = &'a str>
{
    let doc = lines.into_iter().map(strip_comment).collect::<Vec<&str>>().join("\n");

    let mut entries = Vec::new();
    for captures in ENTRY_REGEX.captures_iter(&doc) {
        let key = unquote(&captures["key"])?;

        let values = if let Some(list) = captures.name("list") {
            parse_list(list.as_str()).map_err(|_| Error::MalformedValue { key: key.clone() })?
        } else if let (Some(expand), Some(chars)) = (captures.name("expand"), captures.name("chars")) {
            let chars = chars.as_str().replace('\n', "");
            match unquote(&format!("\"{}\"", chars)) {
                Ok(s) => s.chars().filter(|&c| c != ' ').map(|c| c.to_string()).collect(),
                Err(e) => {
                    warn!("Error parsing agda-input-to-string-list [{}]", expand.as_str());
                    return Err(e);
                }
            }
        } else {
            return Err(Error::MalformedValue { key });
        };

        entries.push((key, values));
    }

    Ok(entries)
}

fn parse_list(list: &str) -> Result<Vec<String>> {
    STRING_REGEX.find_iter(list).map(|m| unquote(m.as_str())).collect()
}

#[cfg(test)]
fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|&s| s.to_owned()).collect()
}

#[test]
fn test_parse_agda() {
    let source = r#"
(defcustom agda-input-translations
  (let ((max-lisp-eval-depth 2800)) `(

  ;; Equality and similar symbols.

  ("eq"  . ,(agda-input-to-string-list "=∼∽≈≋∻∾∿≀≃⋍≂≅ ≌≊≡≣≐≑≒≓≔≕≖≗≘≙≚≛≜≝≞≟≍≎≏≬⋕＝"))
  ("~~~" . ("≋"))  ;; ("~~" . ("≈"))
  ("leq" . ("≤" "≦"))
  ("\\"  . ("\\"))
  ("/"   . ,(agda-input-to-string-list "／＼
   ∕"))

  ("bb" . ("𝔹"
           "𝕓"))
  ))
"#;

    let entries = parse(source.lines()).unwrap();
    assert_eq!(entries, vec![
        ("eq".to_owned(), strings(&["=", "∼", "∽", "≈", "≋", "∻", "∾", "∿", "≀", "≃", "⋍", "≂", "≅",
                                    "≌", "≊", "≡", "≣", "≐", "≑", "≒", "≓", "≔", "≕", "≖", "≗", "≘",
                                    "≙", "≚", "≛", "≜", "≝", "≞", "≟", "≍", "≎", "≏", "≬", "⋕", "＝"])),
        ("~~~".to_owned(), strings(&["≋"])),
        ("leq".to_owned(), strings(&["≤", "≦"])),
        ("\\".to_owned(), strings(&["\\"])),
        ("/".to_owned(), strings(&["／", "＼", "∕"])),
        ("bb".to_owned(), strings(&["𝔹", "𝕓"])),
    ]);
}

#[test]
fn test_parse_agda_bad_expansion() {
    let source = vec![r#"("x" . ,(agda-input-to-string-list "a\qb"))"#];
    match parse(source) {
        Err(Error::BadString { fragment }) => assert_eq!(fragment, r#""a\qb""#),
        r => panic!("unexpected result {:?}", r),
    }
}

#[test]
fn test_parse_agda_bad_list() {
    let source = vec![r#"("y" . ("\q"))"#];
    match parse(source) {
        Err(Error::MalformedValue { key }) => assert_eq!(key, "y"),
        r => panic!("unexpected result {:?}", r),
    }
}
