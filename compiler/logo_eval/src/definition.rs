//! Procedure definitions: the `TO` header, body lines, tags, and the
//! list forms used by DEFINE and TEXT.
//!
//! A header reads `TO name :a :b [:c default...] [:rest] N`. Required
//! inputs come first, then optional inputs with their default
//! expressions, then at most one rest input. A trailing number
//! overrides the default input count.

use rustc_hash::FxHashMap;

use logo_value::{
    doesnt_like, fold_name, not_enough_inputs, Arity, Body, Constants, EntryPoint, Handle,
    OptionalParam, Procedure, PrintFlags, PrintLimits, Unwind,
};

use crate::reader::read_line;

const TO: &str = "to";
const MACRO: &str = ".macro";
const END: &str = "end";
const TAG: &str = "tag";

fn first_word(line: &Handle) -> Option<String> {
    line.as_list_node()
        .and_then(|node| node.head().text().map(fold_name))
}

/// Does this instruction line start a `TO` or `.MACRO` definition?
pub fn is_definition_start(line: &Handle) -> bool {
    matches!(first_word(line).as_deref(), Some(TO | MACRO))
}

/// Is this line the `END` closing a definition?
pub fn is_end_line(line: &Handle) -> bool {
    let items = line.to_vec();
    items.len() == 1 && items[0].text().map(fold_name).as_deref() == Some(END)
}

/// A parsed procedure header.
#[derive(Clone, Debug)]
pub struct Header {
    pub name: String,
    pub required: Vec<String>,
    pub optional: Vec<OptionalParam>,
    pub rest: Option<String>,
    pub arity: Arity,
    pub is_macro: bool,
}

impl Header {
    /// Attach a body.
    pub fn into_procedure(
        self,
        body: Body,
        tags: FxHashMap<String, EntryPoint>,
        source: String,
    ) -> Procedure {
        Procedure {
            name: self.name,
            required: self.required,
            optional: self.optional,
            rest: self.rest,
            arity: self.arity,
            tags,
            is_macro: self.is_macro,
            source,
            body,
        }
    }
}

fn param_name(word: &Handle, who: &str) -> Result<String, Unwind> {
    let text = word.text().ok_or_else(|| doesnt_like(who, word))?;
    let name = text.strip_prefix(':').unwrap_or(text);
    if name.is_empty() || word.as_number().is_some() {
        return Err(doesnt_like(who, word));
    }
    Ok(fold_name(name))
}

#[derive(PartialEq, PartialOrd)]
enum Stage {
    Required,
    Optional,
    Rest,
    Count,
}

/// Parse a header line (`TO name inputs...`).
pub fn parse_header(constants: &Constants, line: &Handle) -> Result<Header, Unwind> {
    let items = line.to_vec();
    let keyword = items
        .first()
        .and_then(|w| w.text().map(fold_name))
        .unwrap_or_default();
    let is_macro = keyword == MACRO;
    let who = if is_macro { MACRO } else { TO };
    let name_word = items.get(1).ok_or_else(|| not_enough_inputs(who))?;
    let name = match name_word.text() {
        Some(text) if name_word.as_number().is_none() && !text.is_empty() => fold_name(text),
        _ => return Err(doesnt_like(who, name_word)),
    };
    parse_inputs(constants, name, is_macro, &items[2..], who)
}

/// Parse input specifications, written either as header words (`:a`) or
/// as DEFINE's bare names (`a`).
fn parse_inputs(
    constants: &Constants,
    name: String,
    is_macro: bool,
    specs: &[Handle],
    who: &str,
) -> Result<Header, Unwind> {
    let mut required = Vec::new();
    let mut optional = Vec::new();
    let mut rest = None;
    let mut count = None;
    let mut stage = Stage::Required;

    for spec in specs {
        if let Some(node) = spec.as_list_node() {
            let var = param_name(&node.head(), who)?;
            let default = node.tail();
            if default.is_empty_list() {
                if stage >= Stage::Rest {
                    return Err(doesnt_like(who, spec));
                }
                rest = Some(var);
                stage = Stage::Rest;
            } else {
                if stage > Stage::Optional {
                    return Err(doesnt_like(who, spec));
                }
                optional.push(OptionalParam {
                    name: var,
                    default: constants.list(default.to_vec()),
                });
                stage = Stage::Optional;
            }
        } else if let Some(n) = spec.as_number() {
            if stage == Stage::Count || n < 0.0 || n.fract() != 0.0 {
                return Err(doesnt_like(who, spec));
            }
            count = Some(n as usize);
            stage = Stage::Count;
        } else {
            if stage > Stage::Required {
                return Err(doesnt_like(who, spec));
            }
            required.push(param_name(spec, who)?);
        }
    }

    let max = if rest.is_some() {
        None
    } else {
        Some(required.len() + optional.len())
    };
    let default = count.unwrap_or(required.len());
    let arity = Arity::new(required.len(), default, max);
    if !arity.accepts(default) {
        return Err(doesnt_like(who, &Handle::number(default as f64)));
    }
    Ok(Header {
        name,
        required,
        optional,
        rest,
        arity,
        is_macro,
    })
}

/// The label of a `TAG "label` line.
fn label(line: &Handle) -> Option<String> {
    let node = line.as_list_node()?;
    if node.head().text().map(fold_name).as_deref() != Some(TAG) {
        return None;
    }
    let word = node.tail().as_list_node()?.head();
    let text = word.text()?;
    Some(fold_name(text.strip_prefix('"').unwrap_or(text)))
}

/// Map each `TAG "label` line to its line index.
pub fn scan_tags(lines: &[Handle]) -> Result<FxHashMap<String, EntryPoint>, Unwind> {
    let mut tags = FxHashMap::default();
    for (index, line) in lines.iter().enumerate() {
        if let Some(tag) = label(line) {
            if tags.insert(tag.clone(), EntryPoint::Line(index)).is_some() {
                return Err(doesnt_like(TAG, &Handle::word(tag)));
            }
        }
    }
    Ok(tags)
}

/// Build a procedure from source lines: the header, the body, and `END`.
///
/// Lines after `END` are ignored. A missing `END` is accepted.
pub fn from_source(constants: &Constants, lines: &[String]) -> Result<Procedure, Unwind> {
    let Some((header_text, body_text)) = lines.split_first() else {
        return Err(not_enough_inputs(TO));
    };
    let header = parse_header(constants, &read_line(constants, header_text)?)?;
    let mut source = vec![header_text.trim_end().to_string()];
    let mut body = Vec::new();
    for text in body_text {
        let line = read_line(constants, text)?;
        if is_end_line(&line) {
            break;
        }
        source.push(text.trim_end().to_string());
        if !line.is_empty_list() {
            body.push(line);
        }
    }
    source.push("end".to_string());
    let tags = scan_tags(&body)?;
    Ok(header.into_procedure(Body::Interpreted(body), tags, source.join("\n")))
}

/// Build a procedure from DEFINE's list form: `[[inputs] [line] ...]`.
pub fn from_list(
    constants: &Constants,
    name: &Handle,
    text: &Handle,
    is_macro: bool,
) -> Result<Procedure, Unwind> {
    let who = if is_macro { ".defmacro" } else { "define" };
    let proc_name = match name.text() {
        Some(t) if !t.is_empty() && name.as_number().is_none() => fold_name(t),
        _ => return Err(doesnt_like(who, name)),
    };
    let node = text.as_list_node().ok_or_else(|| doesnt_like(who, text))?;
    let inputs = node.head();
    if !inputs.is_list() {
        return Err(doesnt_like(who, text));
    }
    let header = parse_inputs(constants, proc_name, is_macro, &inputs.to_vec(), who)?;
    let body = node.tail().to_vec();
    if let Some(bad) = body.iter().find(|l| !l.is_list()) {
        return Err(doesnt_like(who, bad));
    }
    let body: Vec<Handle> = body.into_iter().filter(|l| !l.is_empty_list()).collect();
    let tags = scan_tags(&body)?;
    let source = render_source(&header, &body);
    Ok(header.into_procedure(Body::Interpreted(body), tags, source))
}

fn plain(value: &Handle) -> String {
    value.to_logo_string(PrintFlags::empty(), PrintLimits::NONE, None)
}

fn header_line(header: &Header) -> String {
    let keyword = if header.is_macro { ".macro" } else { "to" };
    let mut line = format!("{keyword} {}", header.name);
    for name in &header.required {
        line.push_str(&format!(" :{name}"));
    }
    for param in &header.optional {
        line.push_str(&format!(" [:{} {}]", param.name, plain(&param.default)));
    }
    if let Some(rest) = &header.rest {
        line.push_str(&format!(" [:{rest}]"));
    }
    if header.arity.default != header.required.len() {
        line.push_str(&format!(" {}", header.arity.default));
    }
    line
}

/// Source text for a procedure built from lists.
fn render_source(header: &Header, body: &[Handle]) -> String {
    let mut lines = vec![header_line(header)];
    lines.extend(body.iter().map(plain));
    lines.push("end".to_string());
    lines.join("\n")
}

/// TEXT's list form of a procedure: `[[inputs] [line] ...]`.
///
/// Compiled procedures have no body lines; their text is re-read from
/// the source.
pub fn to_list(constants: &Constants, procedure: &Procedure) -> Result<Handle, Unwind> {
    let mut inputs: Vec<Handle> = procedure
        .required
        .iter()
        .map(|n| Handle::word(n.as_str()))
        .collect();
    for param in &procedure.optional {
        inputs.push(constants.list_onto(
            [Handle::word(param.name.as_str())],
            param.default.clone(),
        ));
    }
    if let Some(rest) = &procedure.rest {
        inputs.push(constants.list([Handle::word(rest.as_str())]));
    }
    if procedure.arity.default != procedure.required.len() {
        inputs.push(Handle::number(procedure.arity.default as f64));
    }
    let mut items = vec![constants.list(inputs)];
    match &procedure.body {
        Body::Interpreted(lines) => items.extend(lines.iter().cloned()),
        Body::Compiled(_) => {
            let lines: Vec<String> = procedure.source.lines().map(str::to_string).collect();
            for text in lines.iter().skip(1) {
                let line = read_line(constants, text)?;
                if is_end_line(&line) {
                    break;
                }
                if !line.is_empty_list() {
                    items.push(line);
                }
            }
        }
    }
    Ok(constants.list(items))
}

#[cfg(test)]
mod tests;
