//! Binding header parameters onto a generator's declared signature.

use std::collections::VecDeque;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::generator::signature::{FillMode, ParamValue, Signature};
use crate::params::{Keywords, ParamSet};

/// Whether a bound value travels to the generator positionally or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Positional,
    Keyword,
}

/// A declared parameter together with the value bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub name: String,
    pub value: ParamValue,
    pub kind: SlotKind,
}

/// The arguments a generator is called with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdaptedCall {
    slots: Vec<Slot>,
    rest: Vec<String>,
    extra: Keywords<ParamValue>,
}

impl AdaptedCall {
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.slots.iter().find(|s| s.name == name).map(|s| &s.value)
    }

    /// Text bound to `name`. `None` when unbound, or bound to a flag or to no value.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_text)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(ParamValue::is_truthy)
    }

    /// Positional values caught by a variadic parameter.
    pub fn rest(&self) -> &[String] {
        &self.rest
    }

    /// Keywords caught by a variadic parameter.
    pub fn extra(&self) -> &Keywords<ParamValue> {
        &self.extra
    }

    pub fn take_extra(&mut self, key: &str) -> Option<ParamValue> {
        self.extra.remove(key)
    }

    /// The positional argument list: positional slots in order, then the rest.
    pub fn positional(&self) -> Vec<ParamValue> {
        self.slots
            .iter()
            .filter(|s| s.kind == SlotKind::Positional)
            .map(|s| s.value.clone())
            .chain(self.rest.iter().cloned().map(ParamValue::Text))
            .collect()
    }

    /// The keyword argument map: keyword slots, then the extra keywords.
    pub fn keywords(&self) -> Keywords<ParamValue> {
        self.slots
            .iter()
            .filter(|s| s.kind == SlotKind::Keyword)
            .map(|s| (s.name.clone(), s.value.clone()))
            .chain(self.extra.iter().map(|(k, v)| (k.to_string(), v.clone())))
            .collect()
    }
}

/// Bind `params` to `signature`.
///
/// Bare `name`/`noname` tokens are first turned into boolean keywords for flag
/// parameters. Each declared parameter then takes, in order: its keyword (if
/// it may be named), the next positional value (if it may be positional), its
/// default, or an empty string with a missing-attribute diagnostic. Unmatched
/// values go to the variadic parameters when declared and are reported
/// otherwise. Binding never fails.
pub fn adapt(
    signature: &Signature,
    block_type: &str,
    params: ParamSet,
) -> (AdaptedCall, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut warn = |kind| diagnostics.push(Diagnostic::in_block(block_type, kind));

    let mut positional = params.positional;
    let mut keywords: Keywords<ParamValue> = params
        .keywords
        .into_iter()
        .map(|(k, v)| (k, ParamValue::Text(v)))
        .collect();

    for param in signature.params().iter().filter(|p| p.is_flag()) {
        if let Some(index) = positional.iter().position(|v| *v == param.name) {
            positional.remove(index);
            keywords.insert(param.name.as_str(), ParamValue::Flag(true));
        }
        let negated = format!("no{}", param.name);
        if let Some(index) = positional.iter().position(|v| *v == negated) {
            positional.remove(index);
            keywords.insert(param.name.as_str(), ParamValue::Flag(false));
        }
    }

    let mut positional = VecDeque::from(positional);
    let mut call = AdaptedCall::default();
    let mut takes_rest = false;
    let mut takes_extra = false;

    for param in signature.params() {
        if param.is_context() {
            continue;
        }

        let kind = match param.mode {
            FillMode::VarPositional => {
                takes_rest = true;
                continue;
            }
            FillMode::VarKeyword => {
                takes_extra = true;
                continue;
            }
            FillMode::KeywordOnly => SlotKind::Keyword,
            _ => SlotKind::Positional,
        };

        let by_keyword = if param.accepts_keyword() {
            keywords.remove(&param.name)
        } else {
            None
        };
        let by_position = || {
            if param.accepts_position() {
                positional.pop_front().map(ParamValue::Text)
            } else {
                None
            }
        };

        let value = match by_keyword.or_else(by_position).or_else(|| param.default.clone()) {
            Some(value) => value,
            None => {
                warn(DiagnosticKind::MissingAttribute(param.name.clone()));
                ParamValue::Text(String::new())
            }
        };

        call.slots.push(Slot {
            name: param.name.clone(),
            value,
            kind,
        });
    }

    if takes_rest {
        call.rest.extend(positional);
    } else {
        for value in positional {
            warn(DiagnosticKind::ExtraAttribute(value));
        }
    }

    if takes_extra {
        call.extra = keywords;
    } else {
        for (key, _) in keywords {
            warn(DiagnosticKind::UnexpectedParameter(key));
        }
    }

    log::debug!(
        "bound block '{}': {} slot(s), {} extra positional, {} extra keyword",
        block_type,
        call.slots.len(),
        call.rest.len(),
        call.extra.len()
    );

    (call, diagnostics)
}
