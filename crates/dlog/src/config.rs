//! crates/dlog/src/config.rs
//! Logger settings and the `DLOG` directive syntax.

use std::borrow::Cow;
use std::env::{self, VarError};
use std::fmt;
use std::str::FromStr;

use dlog_sink::ColorToken;

use crate::error::DlogError;
use crate::namespace::DEFAULT_FALLBACK_COLOR;
use crate::palette::DEFAULT_PALETTE;

/// Environment variable read by [`DlogConfig::from_env`].
pub const ENV_VAR: &str = "DLOG";

/// Settings that can be applied to a [`Dlog`](crate::Dlog) in one step.
///
/// Directive strings such as `"silent=off; only=db,cache; trace"` parse into
/// this type; [`Display`](fmt::Display) renders it back into directives that
/// parse to an equal value.
///
/// List items and the fallback color may be written in double quotes, with
/// `\"` and `\\` escapes. A quoted item is taken verbatim: it may contain
/// separators, and a quoted color is not validated.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DlogConfig {
    /// Global silence flag.
    pub silenced: bool,
    /// Namespaces shown exclusively; empty disables the allow-list.
    pub allow_list: Vec<String>,
    /// Whether new namespaces take palette colors.
    pub use_color: bool,
    /// Color for new namespaces while palette colors are off.
    pub fallback_color: String,
    /// Rotation palette for new namespaces.
    pub palette: Vec<String>,
    /// Whether a stack excerpt follows each emitted record.
    pub stack_trace: bool,
}

impl Default for DlogConfig {
    fn default() -> Self {
        Self {
            silenced: false,
            allow_list: Vec::new(),
            use_color: true,
            fallback_color: DEFAULT_FALLBACK_COLOR.to_owned(),
            palette: DEFAULT_PALETTE.iter().map(|&color| color.to_owned()).collect(),
            stack_trace: false,
        }
    }
}

impl DlogConfig {
    /// Parses `directives` on top of the defaults.
    pub fn parse(directives: &str) -> Result<Self, DlogError> {
        let mut config = Self::default();
        config.apply_directives(directives)?;
        Ok(config)
    }

    /// Reads the `DLOG` environment variable. Unset means defaults.
    pub fn from_env() -> Result<Self, DlogError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Like [`from_env`](Self::from_env) with a caller-supplied lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DlogError>
    where
        F: FnOnce(&str) -> Result<String, VarError>,
    {
        match lookup(ENV_VAR) {
            Ok(value) => Self::parse(&value),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(error) => Err(DlogError::Environment(error)),
        }
    }

    /// Applies every directive in `directives`, separated by `;` or
    /// whitespace outside quotes. Stops at the first invalid directive.
    pub fn apply_directives(&mut self, directives: &str) -> Result<(), DlogError> {
        split_unquoted(directives, |c| c == ';' || c.is_whitespace())?
            .into_iter()
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_directive(token))
    }

    /// Applies a single directive such as `only=db,cache` or `trace`.
    pub fn apply_directive(&mut self, token: &str) -> Result<(), DlogError> {
        let (key, value) = match token.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (token, None),
        };
        let key = key.to_ascii_lowercase();

        match key.as_str() {
            "silent" => self.silenced = optional_switch(&key, value)?,
            "trace" => self.stack_trace = optional_switch(&key, value)?,
            "color" => {
                let value = required(&key, value)?;
                self.use_color = parse_switch(&key, value)?;
            }
            "only" => {
                let value = required(&key, value)?;
                self.allow_list = read_list(value)?.into_iter().map(Value::into_string).collect();
            }
            "fallback" => {
                let value = required(&key, value)?;
                let color = read_value(value)?.ok_or_else(|| DlogError::MissingValue(key.clone()))?;
                self.fallback_color = read_color(color)?;
            }
            "palette" => {
                let value = required(&key, value)?;
                self.palette = read_list(value)?
                    .into_iter()
                    .map(read_color)
                    .collect::<Result<_, _>>()?;
            }
            _ => return Err(DlogError::UnknownDirective(key)),
        }
        Ok(())
    }
}

impl FromStr for DlogConfig {
    type Err = DlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DlogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "silent={}; only={}; color={}; fallback={}; palette={}; trace={}",
            on_off(self.silenced),
            render_list(&self.allow_list, is_plain_name),
            on_off(self.use_color),
            render_item(&self.fallback_color, is_plain_color),
            render_list(&self.palette, is_plain_color),
            on_off(self.stack_trace),
        )
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn required<'a>(key: &str, value: Option<&'a str>) -> Result<&'a str, DlogError> {
    value.ok_or_else(|| DlogError::MissingValue(key.to_owned()))
}

fn optional_switch(key: &str, value: Option<&str>) -> Result<bool, DlogError> {
    value.map_or(Ok(true), |value| parse_switch(key, value))
}

fn parse_switch(key: &str, value: &str) -> Result<bool, DlogError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(DlogError::InvalidSwitch {
            directive: key.to_owned(),
            value: value.to_owned(),
        }),
    }
}

/// A value as written: bare text, or the decoded contents of a quoted item.
enum Value<'a> {
    Bare(&'a str),
    Quoted(String),
}

impl Value<'_> {
    fn into_string(self) -> String {
        match self {
            Value::Bare(text) => text.to_owned(),
            Value::Quoted(text) => text,
        }
    }
}

/// Splits `input` at every `is_separator` character outside double quotes.
fn split_unquoted(input: &str, is_separator: impl Fn(char) -> bool) -> Result<Vec<&str>, DlogError> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;
    for (index, c) in input.char_indices() {
        if escaped {
            escaped = false;
        } else if quoted {
            match c {
                '\\' => escaped = true,
                '"' => quoted = false,
                _ => {}
            }
        } else if c == '"' {
            quoted = true;
        } else if is_separator(c) {
            pieces.push(&input[start..index]);
            start = index + c.len_utf8();
        }
    }
    if quoted {
        return Err(DlogError::MalformedQuote(input.to_owned()));
    }
    pieces.push(&input[start..]);
    Ok(pieces)
}

/// Reads one item. Blank bare text yields `None`.
fn read_value(raw: &str) -> Result<Option<Value<'_>>, DlogError> {
    let raw = raw.trim();
    let Some(inner) = raw.strip_prefix('"') else {
        if raw.contains('"') {
            return Err(DlogError::MalformedQuote(raw.to_owned()));
        }
        return Ok((!raw.is_empty()).then_some(Value::Bare(raw)));
    };

    let mut text = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) => text.push(next),
                None => break,
            },
            '"' if chars.as_str().is_empty() => return Ok(Some(Value::Quoted(text))),
            '"' => break,
            _ => text.push(c),
        }
    }
    Err(DlogError::MalformedQuote(raw.to_owned()))
}

/// Reads a comma-separated list, dropping blank bare items.
fn read_list(value: &str) -> Result<Vec<Value<'_>>, DlogError> {
    split_unquoted(value, |c| c == ',')?
        .into_iter()
        .filter_map(|raw| read_value(raw).transpose())
        .collect()
}

fn read_color(value: Value<'_>) -> Result<String, DlogError> {
    if let Value::Bare(token) = &value {
        ColorToken::from_str(token)?;
    }
    Ok(value.into_string())
}

fn is_plain_name(item: &str) -> bool {
    !item.is_empty() && !item.chars().any(|c| c.is_whitespace() || matches!(c, ';' | ',' | '"'))
}

fn is_plain_color(item: &str) -> bool {
    is_plain_name(item) && ColorToken::from_str(item).is_ok()
}

fn render_item(item: &str, is_plain: fn(&str) -> bool) -> Cow<'_, str> {
    if is_plain(item) {
        Cow::Borrowed(item)
    } else {
        Cow::Owned(format!("\"{}\"", item.replace('\\', "\\\\").replace('"', "\\\"")))
    }
}

fn render_list(items: &[String], is_plain: fn(&str) -> bool) -> String {
    items
        .iter()
        .map(|item| render_item(item, is_plain))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DlogConfig::default();
        assert!(!config.silenced);
        assert!(config.allow_list.is_empty());
        assert!(config.use_color);
        assert_eq!(config.fallback_color, "#63666A");
        assert_eq!(config.palette.len(), 5);
        assert!(!config.stack_trace);
    }

    #[test]
    fn bare_switches_enable() {
        let config = DlogConfig::parse("silent trace").expect("valid");
        assert!(config.silenced);
        assert!(config.stack_trace);
    }

    #[test]
    fn switch_spellings() {
        for (value, expected) in [("on", true), ("YES", true), ("1", true), ("off", false), ("no", false), ("0", false)] {
            let config = DlogConfig::parse(&format!("color={value}")).expect("valid");
            assert_eq!(config.use_color, expected, "{value}");
        }
    }

    #[test]
    fn only_splits_and_trims() {
        let config = DlogConfig::parse("only=db,,cache").expect("valid");
        assert_eq!(config.allow_list, vec!["db", "cache"]);
    }

    #[test]
    fn empty_only_clears() {
        let config = DlogConfig::parse("only=db;only=").expect("valid");
        assert!(config.allow_list.is_empty());
    }

    #[test]
    fn quoted_items_keep_separators() {
        let config = DlogConfig::parse(r#"only="my ns","a,b;c",,plain;trace"#).expect("valid");
        assert_eq!(config.allow_list, vec!["my ns", "a,b;c", "plain"]);
        assert!(config.stack_trace);
    }

    #[test]
    fn quoted_escapes_decode() {
        let config = DlogConfig::parse(r#"only="say \"hi\"","back\\slash""#).expect("valid");
        assert_eq!(config.allow_list, vec![r#"say "hi""#, r"back\slash"]);
    }

    #[test]
    fn quoted_color_is_taken_verbatim() {
        let config = DlogConfig::parse(r#"fallback="rebeccapurple" palette="",red"#).expect("valid");
        assert_eq!(config.fallback_color, "rebeccapurple");
        assert_eq!(config.palette, vec!["", "red"]);
    }

    #[test]
    fn empty_palette_is_allowed() {
        let config = DlogConfig::parse("palette=").expect("valid");
        assert!(config.palette.is_empty());
    }

    #[test]
    fn malformed_quotes() {
        for input in [r#"only="open"#, r#"only="a"b"#, r#"only=a"b""#] {
            let error = DlogConfig::parse(input).expect_err(input);
            assert!(matches!(error, DlogError::MalformedQuote(_)), "{input}: {error}");
        }
    }

    #[test]
    fn rendering_quotes_only_when_needed() {
        assert_eq!(render_item("db", is_plain_name), "db");
        assert_eq!(render_item("my ns", is_plain_name), r#""my ns""#);
        assert_eq!(render_item(r#"a"b"#, is_plain_name), r#""a\"b""#);
        assert_eq!(render_item("", is_plain_name), r#""""#);
        assert_eq!(render_item("#fff", is_plain_color), "#fff");
        assert_eq!(render_item("rebeccapurple", is_plain_color), r#""rebeccapurple""#);
    }

    #[test]
    fn missing_value() {
        let error = DlogConfig::parse("fallback").expect_err("needs a value");
        assert!(matches!(error, DlogError::MissingValue(ref key) if key == "fallback"));
    }

    #[test]
    fn missing_lookup_means_defaults() {
        let config = DlogConfig::from_lookup(|_| Err(VarError::NotPresent)).expect("defaults");
        assert_eq!(config, DlogConfig::default());
    }

    #[test]
    fn lookup_reads_dlog() {
        let config = DlogConfig::from_lookup(|key| {
            assert_eq!(key, "DLOG");
            Ok("silent".to_owned())
        })
        .expect("valid");
        assert!(config.silenced);
    }
}
