//! Splitting a command line into arguments.
//!
//! Whitespace separates arguments except inside quotes or inside a JSON
//! object/array, so `--data {"name": "Ada Lovelace"}` stays one argument.
//! Quotes wrapping an argument at top level are removed; quotes inside
//! JSON are kept verbatim.

use graphlens_core::{Error, Result};

pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut in_json_string = false;
    let mut escaped = false;

    for c in line.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            } else {
                current.push(c);
            }
            continue;
        }

        if depth > 0 {
            current.push(c);
            if in_json_string {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_json_string = false;
                }
                continue;
            }
            match c {
                '"' => in_json_string = true,
                '{' | '[' => depth += 1,
                '}' | ']' => depth -= 1,
                _ => {}
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                in_token = true;
            }
            '{' | '[' => {
                depth = 1;
                current.push(c);
                in_token = true;
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(Error::Command("unterminated quote".to_string()));
    }
    if depth > 0 {
        return Err(Error::Command("unbalanced brackets".to_string()));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_words() {
        assert_eq!(
            tokenize("  delete-node   --id A ").unwrap(),
            vec!["delete-node", "--id", "A"]
        );
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_json_object_is_one_token() {
        assert_eq!(
            tokenize(r#"add-node --id A --data {"name": "Ada Lovelace", "tags": [1, 2]}"#).unwrap(),
            vec![
                "add-node",
                "--id",
                "A",
                "--data",
                r#"{"name": "Ada Lovelace", "tags": [1, 2]}"#
            ]
        );
    }

    #[test]
    fn test_braces_inside_json_strings() {
        assert_eq!(
            tokenize(r#"--data {"a": "}{ \"x\" "}"#).unwrap(),
            vec!["--data", r#"{"a": "}{ \"x\" "}"#]
        );
    }

    #[test]
    fn test_quotes_are_stripped() {
        assert_eq!(
            tokenize(r#"add-node --id "New York" --data '{"k": 1}'"#).unwrap(),
            vec!["add-node", "--id", "New York", "--data", r#"{"k": 1}"#]
        );
        assert_eq!(tokenize("--id ''").unwrap(), vec!["--id", ""]);
    }

    #[test]
    fn test_unbalanced_input() {
        assert!(tokenize("--id 'open").is_err());
        assert!(tokenize(r#"--data {"a": 1"#).is_err());
    }
}
