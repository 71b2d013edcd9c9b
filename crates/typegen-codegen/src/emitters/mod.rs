pub mod csharp;
pub mod java;
pub mod kotlin;
pub mod typescript;

use std::collections::HashSet;

use crate::registry::Target;
use crate::traits::LanguageEmitter;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "Code generated by typegen. DO NOT EDIT.";

/// Emitter instance for a built-in target.
pub fn create_emitter(target: Target) -> Box<dyn LanguageEmitter> {
    match target {
        Target::TypeScript => Box::new(typescript::TypeScriptEmitter),
        Target::Kotlin => Box::new(kotlin::KotlinEmitter),
        Target::Java => Box::new(java::JavaEmitter),
        Target::CSharp => Box::new(csharp::CSharpEmitter),
    }
}

/// `/** ... */` documentation block, one ` * ` line per source line.
pub(crate) fn block_doc(text: &str, indent: &str) -> String {
    let text = text.replace("*/", "*\\/");
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    if lines.len() <= 1 {
        return format!("{indent}/** {} */\n", lines.first().copied().unwrap_or(""));
    }
    let mut out = format!("{indent}/**\n");
    for line in lines {
        if line.is_empty() {
            out.push_str(&format!("{indent} *\n"));
        } else {
            out.push_str(&format!("{indent} * {line}\n"));
        }
    }
    out.push_str(&format!("{indent} */\n"));
    out
}

/// C# `/// <summary>` documentation block.
pub(crate) fn xml_doc(text: &str, indent: &str) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    let mut out = format!("{indent}/// <summary>\n");
    for line in escaped.lines() {
        out.push_str(&format!("{indent}/// {}\n", line.trim_end()));
    }
    out.push_str(&format!("{indent}/// </summary>\n"));
    out
}

/// Escape a value for a double-quoted string literal.
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Turn an arbitrary enum value into an upper snake case member name.
pub(crate) fn constant_name(value: &str) -> String {
    let mut out = String::new();
    let mut prev_lower = false;
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_uppercase());
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        } else {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        }
    }
    let out = out.trim_end_matches('_').to_string();
    match out.chars().next() {
        None => "_".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{out}"),
        Some(_) => out,
    }
}

/// Capitalize the first character (`tabId` -> `TabId`).
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Turn an arbitrary enum value into a PascalCase member name.
pub(crate) fn pascal_name(value: &str) -> String {
    let out: String = value
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect();
    match out.chars().next() {
        None => "_".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{out}"),
        Some(_) => out,
    }
}

/// Enum member names, unique within one enum and in value order.
///
/// Values accepted by `keep` stay verbatim; the rest go through `rename`.
/// A name already taken gets a `_2`, `_3`, ... suffix.
pub(crate) fn member_names(
    values: &[String],
    keep: fn(&str) -> bool,
    rename: fn(&str) -> String,
) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(values.len());
    let mut slots: Vec<Option<String>> = values
        .iter()
        .map(|value| {
            if keep(value) && taken.insert(value.clone()) {
                Some(value.clone())
            } else {
                None
            }
        })
        .collect();

    for (slot, value) in slots.iter_mut().zip(values) {
        if slot.is_some() {
            continue;
        }
        let base = if keep(value) { value.clone() } else { rename(value) };
        let mut candidate = base.clone();
        let mut n = 2;
        while taken.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        taken.insert(candidate.clone());
        *slot = Some(candidate);
    }

    slots.into_iter().flatten().collect()
}
