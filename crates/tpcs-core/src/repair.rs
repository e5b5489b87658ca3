//! Best-effort repair of hand-edited reference table JSON.
//!
//! Reference tables are maintained by hand and have historically shipped
//! with a small set of recurring defects:
//!
//! - a trailing comma before a closing bracket (`"a": "b",}` or `["x",]`)
//! - a missing comma after a closing bracket, before the next key or value
//!   (`["x"]\n  "Stage IV": ...`)
//! - missing closing brackets at the end of the file
//!
//! [`repair_json`] rewrites those structurally. It walks the input as a
//! token stream and copies string literals through untouched, so text inside
//! criteria and stage definitions is never altered. The output is not
//! guaranteed to be valid JSON; callers still parse it and fall back when
//! the defect is of some other kind.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

impl Container {
    fn closer(self) -> char {
        match self {
            Container::Object => '}',
            Container::Array => ']',
        }
    }
}

/// The most recent significant token written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    Start,
    Open,
    Comma,
    Colon,
    Close,
    Key,
    Value,
}

/// Repair the known bracket/comma defects in `input`.
pub fn repair_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 16);
    let mut stack: Vec<Container> = Vec::new();
    let mut last = Last::Start;
    let mut in_literal = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c == '"' {
            in_literal = false;
            let is_value = match stack.last() {
                Some(Container::Object) => last == Last::Colon,
                _ => true,
            };
            if needs_comma(last, &stack) {
                out.push(',');
            }
            out.push('"');

            let mut escaped = false;
            let mut closed = false;
            for s in chars.by_ref() {
                out.push(s);
                if escaped {
                    escaped = false;
                } else if s == '\\' {
                    escaped = true;
                } else if s == '"' {
                    closed = true;
                    break;
                }
            }
            if !closed {
                out.push('"');
            }

            last = if is_value { Last::Value } else { Last::Key };
            continue;
        }

        if c.is_whitespace() {
            in_literal = false;
            out.push(c);
            continue;
        }

        match c {
            '{' | '[' => {
                in_literal = false;
                if needs_comma(last, &stack) {
                    out.push(',');
                }
                stack.push(if c == '{' {
                    Container::Object
                } else {
                    Container::Array
                });
                out.push(c);
                last = Last::Open;
            }
            '}' | ']' => {
                in_literal = false;
                // Stray closers past the root are dropped.
                let Some(container) = stack.pop() else {
                    continue;
                };
                strip_trailing_comma(&mut out);
                out.push(container.closer());
                last = Last::Close;
            }
            ',' => {
                in_literal = false;
                if matches!(last, Last::Comma | Last::Open | Last::Start) {
                    continue;
                }
                out.push(',');
                last = Last::Comma;
            }
            ':' => {
                in_literal = false;
                out.push(':');
                last = Last::Colon;
            }
            _ => {
                if !in_literal {
                    if needs_comma(last, &stack) {
                        out.push(',');
                    }
                    in_literal = true;
                }
                out.push(c);
                last = Last::Value;
            }
        }
    }

    while let Some(container) = stack.pop() {
        strip_trailing_comma(&mut out);
        out.push(container.closer());
    }

    out
}

fn needs_comma(last: Last, stack: &[Container]) -> bool {
    !stack.is_empty() && matches!(last, Last::Close | Last::Value)
}

fn strip_trailing_comma(out: &mut String) {
    let trimmed_len = out.trim_end().len();
    if out[..trimmed_len].ends_with(',') {
        out.remove(trimmed_len - 1);
    }
}
