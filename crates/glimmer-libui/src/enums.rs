//! Symbolic names for the toolkit's integer enum constants.
//!
//! Constants are named `<Family><Member>` in upper camel case
//! (`DrawLineCapRound`). A family is addressed in snake case
//! (`draw_line_cap`) and its members by their snake-cased remainder
//! (`round`).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glimmer_toolkit::Toolkit;

use crate::error::{ProxyError, ProxyResult};

/// A symbol or an already-resolved integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumValue {
    Int(i64),
    Symbol(String),
}

impl From<i64> for EnumValue {
    fn from(v: i64) -> Self {
        EnumValue::Int(v)
    }
}

impl From<i32> for EnumValue {
    fn from(v: i32) -> Self {
        EnumValue::Int(i64::from(v))
    }
}

impl From<&str> for EnumValue {
    fn from(v: &str) -> Self {
        EnumValue::Symbol(v.to_string())
    }
}

impl From<String> for EnumValue {
    fn from(v: String) -> Self {
        EnumValue::Symbol(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSymbol {
    pub name: String,
    pub value: i64,
}

/// Per-family cache of scanned constants.
///
/// Filled lazily, one family at a time, and never invalidated: a toolkit's
/// constant table is fixed for the life of the process.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    families: RefCell<HashMap<String, Rc<[EnumSymbol]>>>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Members of `family`, in the toolkit's declaration order.
    pub fn symbols(&self, toolkit: &dyn Toolkit, family: &str) -> Rc<[EnumSymbol]> {
        let family = underscore(family);
        if let Some(cached) = self.families.borrow().get(&family) {
            return cached.clone();
        }

        let prefix = camelize(&family);
        let scanned: Rc<[EnumSymbol]> = toolkit
            .constants()
            .iter()
            .filter_map(|(name, value)| {
                let rest = name.strip_prefix(prefix.as_str())?;
                // `At` must not claim `AttributeType...`.
                let first = rest.chars().next()?;
                if !(first.is_ascii_uppercase() || first.is_ascii_digit()) {
                    return None;
                }
                Some(EnumSymbol { name: underscore(rest), value: *value })
            })
            .collect();
        log::debug!("enum family {family}: {} symbols", scanned.len());

        self.families.borrow_mut().insert(family, scanned.clone());
        scanned
    }

    /// Resolves `value` within `family`.
    ///
    /// Integers pass through untouched. Unknown symbols fall back to the
    /// member at `default_index`. Fails only when the family has no members
    /// (or `default_index` is past its end).
    pub fn symbol_to_value(
        &self,
        toolkit: &dyn Toolkit,
        family: &str,
        value: impl Into<EnumValue>,
        default_index: usize,
    ) -> ProxyResult<i64> {
        let symbol = match value.into() {
            EnumValue::Int(v) => return Ok(v),
            EnumValue::Symbol(s) => underscore(&s),
        };
        let symbols = self.symbols(toolkit, family);
        if let Some(found) = symbols.iter().find(|s| s.name == symbol) {
            return Ok(found.value);
        }
        match symbols.get(default_index) {
            Some(fallback) => {
                log::debug!("{family}: unknown symbol '{symbol}', using '{}'", fallback.name);
                Ok(fallback.value)
            }
            None => Err(ProxyError::UnknownEnum { family: family.to_string() }),
        }
    }

    #[cfg(test)]
    fn cached_families(&self) -> usize {
        self.families.borrow().len()
    }
}

/// `ExtKeyPageUp` → `ext_key_page_up`, `N0` → `n0`. Snake case input is
/// returned unchanged.
pub fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                let prev = chars[i - 1];
                let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
                let boundary = prev.is_ascii_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_ascii_uppercase() && next_lower);
                if boundary {
                    out.push('_');
                }
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `ext_key` → `ExtKey`.
pub fn camelize(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimmer_toolkit::testing::RecordingToolkit;

    // ── name conversion ───────────────────────────────────────────────────

    #[test]
    fn underscore_handles_acronyms_and_digits() {
        assert_eq!(underscore("ExtKeyPageUp"), "ext_key_page_up");
        assert_eq!(underscore("N0"), "n0");
        assert_eq!(underscore("NDot"), "n_dot");
        assert_eq!(underscore("HTTPServer"), "http_server");
        assert_eq!(underscore("draw_line_cap"), "draw_line_cap");
    }

    #[test]
    fn camelize_joins_parts() {
        assert_eq!(camelize("draw_line_cap"), "DrawLineCap");
        assert_eq!(camelize("ext_key"), "ExtKey");
    }

    // ── symbols ───────────────────────────────────────────────────────────

    #[test]
    fn symbols_follow_declaration_order() {
        let tk = RecordingToolkit::new();
        let reg = EnumRegistry::new();
        let names: Vec<String> = reg.symbols(&tk, "draw_line_cap").iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, ["flat", "round", "square"]);
    }

    #[test]
    fn family_prefix_must_end_on_a_word_boundary() {
        let tk = RecordingToolkit::new();
        let reg = EnumRegistry::new();
        let names: Vec<String> = reg.symbols(&tk, "at").iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, ["leading", "top", "trailing", "bottom"]);
    }

    #[test]
    fn families_are_cached_once() {
        let tk = RecordingToolkit::new();
        let reg = EnumRegistry::new();
        let first = reg.symbols(&tk, "align");
        let second = reg.symbols(&tk, "Align");
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(reg.cached_families(), 1);
    }

    // ── symbol_to_value ───────────────────────────────────────────────────

    #[test]
    fn integers_pass_through() {
        let tk = RecordingToolkit::new();
        let reg = EnumRegistry::new();
        assert_eq!(reg.symbol_to_value(&tk, "draw_line_cap", 42, 0), Ok(42));
        assert_eq!(reg.symbol_to_value(&tk, "no_such_family", 7, 0), Ok(7));
    }

    #[test]
    fn symbols_resolve_to_constants() {
        let tk = RecordingToolkit::new();
        let reg = EnumRegistry::new();
        assert_eq!(reg.symbol_to_value(&tk, "ext_key", "page_up", 0), Ok(6));
        assert_eq!(reg.symbol_to_value(&tk, "text_weight", "UltraLight", 0), Ok(200));
    }

    #[test]
    fn unknown_symbol_falls_back_to_default_index() {
        let tk = RecordingToolkit::new();
        let reg = EnumRegistry::new();
        assert_eq!(reg.symbol_to_value(&tk, "draw_line_join", "wobbly", 2), Ok(2));
    }

    #[test]
    fn unknown_family_fails() {
        let tk = RecordingToolkit::new();
        let reg = EnumRegistry::new();
        assert_eq!(
            reg.symbol_to_value(&tk, "no_such_family", "x", 0),
            Err(ProxyError::UnknownEnum { family: "no_such_family".to_string() })
        );
    }
}
