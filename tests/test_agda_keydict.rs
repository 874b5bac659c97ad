// test_agda_keydict.rs: Run the dictionary builder on small input files.
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

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const TEST_UNICODE_DATA: &str = "\
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;
0061;LATIN SMALL LETTER A;Ll;0;L;;;;;N;;;0041;;0041
006B;LATIN SMALL LETTER K;Ll;0;L;;;;;N;;;004B;;004B
00AE;REGISTERED SIGN;So;0;ON;;;;;N;REGISTERED TRADE MARK SIGN;;;;
00C1;LATIN CAPITAL LETTER A WITH ACUTE;Lu;0;L;0041 0301;;;;N;LATIN CAPITAL LETTER A ACUTE;;;00E1;
0301;COMBINING ACUTE ACCENT;Mn;230;NSM;;;;;N;NON-SPACING ACUTE;;;;
03B1;GREEK SMALL LETTER ALPHA;Ll;0;L;;;;;N;;;0391;;0391
2096;LATIN SUBSCRIPT SMALL LETTER K;Lm;0;L;<sub> 006B;;;;N;;;;;
2265;GREATER-THAN OR EQUAL TO;Sm;0;ON;;;;;Y;GREATER THAN OR EQUAL TO;;;;
";

const TEST_QUAIL: &str = r#"
(quail-define-package
 "LaTeX" "UTF-8" "\\" t
 "LaTeX-like input method for many characters.")

(quail-define-rules
 ("\\geq" ?≥) ("\\ge" ?≥)
 ("\\'A" ?Á) ;; ("\\'Z" ?Z)
 ("^l" ?ˡ)
 ("\\alpha" ?α)
)
"#;

const TEST_AGDA: &str = r#"
(defcustom agda-input-translations
  `(
  ;; Ordering.
  ("geq" . ("≥" "⩾"))
  ("alpha" . ("α"))
  ("registered" . ("®"))
  ("r" . ,(agda-input-to-string-list "→ ⇒"))
  ))
"#;

const TEST_RESULT: &str = r#"{
"'": ["\u0301"],
"'A": ["Á"],
"'{A}": ["Á"],
"_k": ["ₖ"],
"alpha": ["α"],
"ge": ["≥"],
"geq": ["≥","⩾"],
"r": ["→","⇒"],
"registered": ["®"]
}
"#;

fn write_inputs(dir: &Path, agda: &str) {
    fs::write(dir.join("UnicodeData.txt"), TEST_UNICODE_DATA).unwrap();
    fs::write(dir.join("latin-ltx.el"), TEST_QUAIL).unwrap();
    fs::write(dir.join("agda-input.el"), agda).unwrap();
}

fn run(dir: &Path, output: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_agda_keydict"))
        .arg("--ucd").arg(dir.join("UnicodeData.txt"))
        .arg("--quail").arg(dir.join("latin-ltx.el"))
        .arg("--agda").arg(dir.join("agda-input.el"))
        .arg("--output").arg(output)
        .output()
        .unwrap()
}

fn output_path(dir: &Path, name: &str) -> PathBuf {
    dir.join("out").join(name)
}

#[test]
fn test_invocation() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), TEST_AGDA);

    let output = output_path(dir.path(), "dict.json");
    let result = run(dir.path(), &output);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    assert_eq!(fs::read_to_string(&output).unwrap(), TEST_RESULT);
}

#[test]
fn test_rerun_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), TEST_AGDA);

    let first = output_path(dir.path(), "first.json");
    let second = output_path(dir.path(), "second.json");
    assert!(run(dir.path(), &first).status.success());
    assert!(run(dir.path(), &second).status.success());

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_output_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), TEST_AGDA);

    let output = output_path(dir.path(), "dict.json");
    assert!(run(dir.path(), &output).status.success());

    let parsed: BTreeMap<String, Vec<String>> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(parsed["'"], vec!["\u{301}"]);
    assert_eq!(parsed["r"], vec!["\u{2192}", "\u{21d2}"]);
    assert_eq!(parsed.len(), 9);
}

#[test]
fn test_malformed_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), r#"("r" . ,(agda-input-to-string-list "\q"))"#);

    let output = output_path(dir.path(), "dict.json");
    let result = run(dir.path(), &output);
    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    let output = output_path(dir.path(), "dict.json");
    let result = run(dir.path(), &output);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("UnicodeData.txt"));
    assert!(!output.exists());
}
