use std::fmt;

// One simple selector inside a compound: "div", "#id", ".class", "*"
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Universal,
    Type(String),  // element/tag selector
    Id(String),    // #id selector
    Class(String), // .class selector
}

// Simple selectors that must all hold for one element: "li.slide.hero"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compound {
    pub parts: Vec<Selector>,
}

// Compounds joined by the descendant combinator: "ul.track li"
// The last compound is the subject; the others must match ancestors in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<Compound>,
}

// Comma separated group: "li.slide, figure"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorError {
    pub input: String,
    pub reason: &'static str,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selector {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for SelectorError {}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

// input: "div.slide, #hero .item"
// output: SelectorList with two complex selectors
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let err = |reason| SelectorError {
        input: input.to_string(),
        reason,
    };
    if input.trim().is_empty() {
        return Err(err("empty selector"));
    }
    let selectors = input
        .split(',')
        .map(|part| parse_complex(part).map_err(err))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SelectorList { selectors })
}

fn parse_complex(s: &str) -> Result<ComplexSelector, &'static str> {
    let compounds = s
        .split_whitespace()
        .map(parse_compound)
        .collect::<Result<Vec<_>, _>>()?;
    if compounds.is_empty() {
        return Err("empty selector in list");
    }
    Ok(ComplexSelector { compounds })
}

// input: "li.slide#first"
// output: Compound { parts: [Type("li"), Class("slide"), Id("first")] }
fn parse_compound(s: &str) -> Result<Compound, &'static str> {
    let mut parts = Vec::new();
    let mut rest = s;

    if let Some(after) = rest.strip_prefix('*') {
        parts.push(Selector::Universal);
        rest = after;
    } else {
        let end = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
        if end > 0 {
            parts.push(Selector::Type(rest[..end].to_ascii_lowercase()));
            rest = &rest[end..];
        }
    }

    while let Some(marker) = rest.chars().next() {
        let body = &rest[marker.len_utf8()..];
        let end = body.find(|c: char| !is_ident_char(c)).unwrap_or(body.len());
        if end == 0 {
            return Err("expected a name after '#' or '.'");
        }
        let name = body[..end].to_string();
        match marker {
            '#' => parts.push(Selector::Id(name)),
            '.' => parts.push(Selector::Class(name)),
            _ => return Err("unsupported selector syntax"),
        }
        rest = &body[end..];
    }

    if parts.is_empty() {
        return Err("empty compound selector");
    }
    Ok(Compound { parts })
}
