//! Minimal tokenizers for end-to-end tests, producing the scope streams a
//! TextMate grammar would for the constructs the scanners consume.

use mathsight_scan::Token;

fn col(line: &str, byte_idx: usize) -> u32 {
    line[..byte_idx].chars().count() as u32
}

fn push(tokens: &mut Vec<Token>, line_no: u32, start: u32, text: &str, scopes: &[&str]) {
    tokens.push(Token::new(line_no, start, text, scopes));
}

pub fn cpp_tokens(source: &str) -> Vec<Token> {
    let line_scope = "punctuation.definition.comment.documentation.cpp";
    let begin_scope = "punctuation.definition.comment.begin.documentation.cpp";
    let end_scope = "punctuation.definition.comment.end.documentation.cpp";

    let mut tokens = Vec::new();
    let mut inside_block = false;
    for (line_no, line) in source.lines().enumerate() {
        let line_no = line_no as u32;
        if line.is_empty() {
            push(&mut tokens, line_no, 0, "", &[]);
            continue;
        }
        if inside_block {
            if let Some(idx) = line.find("*/") {
                if idx > 0 {
                    push(&mut tokens, line_no, 0, &line[..idx], &[]);
                }
                push(&mut tokens, line_no, col(line, idx), "*/", &[end_scope]);
                let rest = &line[idx + 2..];
                if !rest.is_empty() {
                    push(&mut tokens, line_no, col(line, idx + 2), rest, &[]);
                }
                inside_block = false;
            } else {
                push(&mut tokens, line_no, 0, line, &[]);
            }
        } else if let Some(idx) = line.find("///") {
            if idx > 0 {
                push(&mut tokens, line_no, 0, &line[..idx], &[]);
            }
            push(&mut tokens, line_no, col(line, idx), "///", &[line_scope]);
            let rest = &line[idx + 3..];
            if !rest.is_empty() {
                push(&mut tokens, line_no, col(line, idx + 3), rest, &[]);
            }
        } else if let Some(idx) = line.find("/**") {
            if idx > 0 {
                push(&mut tokens, line_no, 0, &line[..idx], &[]);
            }
            push(&mut tokens, line_no, col(line, idx), "/**", &[begin_scope]);
            let after = idx + 3;
            if let Some(close) = line[after..].find("*/") {
                let close = after + close;
                if close > after {
                    push(&mut tokens, line_no, col(line, after), &line[after..close], &[]);
                }
                push(&mut tokens, line_no, col(line, close), "*/", &[end_scope]);
                let rest = &line[close + 2..];
                if !rest.is_empty() {
                    push(&mut tokens, line_no, col(line, close + 2), rest, &[]);
                }
            } else {
                let rest = &line[after..];
                if !rest.is_empty() {
                    push(&mut tokens, line_no, col(line, after), rest, &[]);
                }
                inside_block = true;
            }
        } else {
            push(&mut tokens, line_no, 0, line, &[]);
        }
    }
    tokens
}

pub fn python_tokens(source: &str) -> Vec<Token> {
    let begin_scope = "punctuation.definition.string.begin.python";
    let end_scope = "punctuation.definition.string.end.python";
    let doc_scope = "string.quoted.docstring.multi.python";
    let raw_doc_scope = "string.quoted.docstring.raw.multi.python";

    let mut tokens = Vec::new();
    let mut inside_doc = false;
    for (line_no, line) in source.lines().enumerate() {
        let line_no = line_no as u32;
        if line.is_empty() {
            push(&mut tokens, line_no, 0, "", &[]);
            continue;
        }
        if inside_doc {
            if let Some(idx) = line.find("\"\"\"") {
                if idx > 0 {
                    push(&mut tokens, line_no, 0, &line[..idx], &[]);
                }
                push(&mut tokens, line_no, col(line, idx), "\"\"\"", &[end_scope, doc_scope]);
                inside_doc = false;
            } else {
                push(&mut tokens, line_no, 0, line, &[]);
            }
            continue;
        }

        let trimmed = line.trim_start();
        let indent_len = line.len() - trimmed.len();
        if trimmed.starts_with("\"\"\"") || trimmed.starts_with("r\"\"\"") {
            let raw = trimmed.starts_with('r');
            if indent_len > 0 {
                push(&mut tokens, line_no, 0, &line[..indent_len], &[]);
            }
            let mut at = indent_len;
            if raw {
                push(&mut tokens, line_no, col(line, at), "r", &[]);
                at += 1;
            }
            let scope = if raw { raw_doc_scope } else { doc_scope };
            push(&mut tokens, line_no, col(line, at), "\"\"\"", &[begin_scope, scope]);
            at += 3;
            if let Some(close) = line[at..].find("\"\"\"") {
                let close = at + close;
                if close > at {
                    push(&mut tokens, line_no, col(line, at), &line[at..close], &[]);
                }
                push(&mut tokens, line_no, col(line, close), "\"\"\"", &[end_scope, scope]);
            } else {
                let rest = &line[at..];
                if !rest.is_empty() {
                    push(&mut tokens, line_no, col(line, at), rest, &[]);
                }
                inside_doc = true;
            }
        } else {
            push(&mut tokens, line_no, 0, line, &[]);
        }
    }
    tokens
}
