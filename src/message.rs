//! Countable messages and capitalization.
//!
//! A message leaf is either plain text or a [`Message`] carrying alternate
//! forms for different counts. [`message`] and [`noun`] render a leaf for
//! the active locale preference; the capitalization and pluralization rules
//! they use are themselves locale-resolved items, so a locale with different
//! grammar can override them with [`set_ucfirst_rule`] and
//! [`set_plural_rule`].

use std::sync::{
    LazyLock,
    PoisonError,
    RwLock,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::item::{
    FALLBACK_KEY,
    TranslatableItem,
};

/// Count value requesting the plural form without a specific number.
pub const MULTIPLE: i64 = -1;

/// A message with per-count forms.
///
/// Any form may contain `{n}`; the first occurrence is replaced with the
/// rendered count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Message {
    /// Base (singular) form.
    pub v: String,

    /// Form used when the count is zero, e.g. "no messages".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,

    /// Plural form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,

    /// Plural form preferred when an exact count is rendered, e.g.
    /// "{n} messages".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pc: Option<String>,
}

impl Message {
    /// Creates a message with only the base form.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            v: base.into(),
            ..Self::default()
        }
    }

    /// Sets the zero-count form.
    #[must_use]
    pub fn zero(mut self, form: impl Into<String>) -> Self {
        self.n = Some(form.into());
        self
    }

    /// Sets the plural form.
    #[must_use]
    pub fn plural(mut self, form: impl Into<String>) -> Self {
        self.p = Some(form.into());
        self
    }

    /// Sets the counted plural form.
    #[must_use]
    pub fn counted(mut self, form: impl Into<String>) -> Self {
        self.pc = Some(form.into());
        self
    }
}

/// A message leaf: plain text, or a [`Message`] with per-count forms.
///
/// Deserializes untagged, so translation documents may mix bare strings with
/// `{"v": ..., "p": ...}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MessageValue {
    /// Plain text without count forms.
    Text(String),
    /// Structured message with count forms.
    Message(Message),
}

impl MessageValue {
    /// The base text of the value.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Message(message) => &message.v,
        }
    }
}

impl From<&str> for MessageValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for MessageValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Message> for MessageValue {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

/// Rule turning a message value into capitalized text.
pub type UcfirstRule = fn(&MessageValue) -> String;

/// Rule selecting and rendering the form of a message for a count.
pub type PluralRule = fn(&Message, i64) -> String;

/// Locale-resolved capitalization rules.
static UCFIRST_RULES: LazyLock<RwLock<TranslatableItem<UcfirstRule>>> = LazyLock::new(|| {
    let mut item = TranslatableItem::new();
    item.set(FALLBACK_KEY, default_ucfirst as UcfirstRule);
    RwLock::new(item)
});

/// Locale-resolved pluralization rules.
static PLURAL_RULES: LazyLock<RwLock<TranslatableItem<PluralRule>>> = LazyLock::new(|| {
    let mut item = TranslatableItem::new();
    item.set(FALLBACK_KEY, default_plural as PluralRule);
    RwLock::new(item)
});

/// Installs a capitalization rule for one locale tag.
pub fn set_ucfirst_rule<S: Into<String>>(locale: S, rule: UcfirstRule) {
    UCFIRST_RULES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .set(locale, rule);
}

/// Installs a pluralization rule for one locale tag.
pub fn set_plural_rule<S: Into<String>>(locale: S, rule: PluralRule) {
    PLURAL_RULES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .set(locale, rule);
}

fn resolve_rule<R: Copy>(rules: &RwLock<TranslatableItem<R>>, default: R) -> R {
    let guard = rules.read().unwrap_or_else(PoisonError::into_inner);
    guard.resolve_preferred().copied().unwrap_or(default)
}

/// Renders a message leaf for the active locale preference.
///
/// With `ucfirst` the locale's capitalization rule is applied. Returns
/// `None` when the item resolves to nothing.
#[must_use]
pub fn message(item: &TranslatableItem<MessageValue>, ucfirst: bool) -> Option<String> {
    let value = item.resolve_preferred()?;
    if ucfirst {
        Some(resolve_rule(&UCFIRST_RULES, default_ucfirst)(value))
    } else {
        Some(value.text().to_owned())
    }
}

/// Renders a countable message leaf for `count`.
///
/// Structured messages go through the locale's pluralization rule; plain
/// text passes through unchanged. [`MULTIPLE`] requests the plural form
/// without rendering a number.
#[must_use]
pub fn noun(item: &TranslatableItem<MessageValue>, count: i64, ucfirst: bool) -> Option<String> {
    let value = item.resolve_preferred()?;
    let rendered = match value {
        MessageValue::Message(structured) => {
            resolve_rule(&PLURAL_RULES, default_plural)(structured, count)
        }
        MessageValue::Text(text) => text.clone(),
    };
    if ucfirst {
        let rule = resolve_rule(&UCFIRST_RULES, default_ucfirst);
        Some(rule(&MessageValue::Text(rendered)))
    } else {
        Some(rendered)
    }
}

/// Default capitalization: uppercase the first letter of every word.
fn default_ucfirst(value: &MessageValue) -> String {
    value
        .text()
        .split(' ')
        .map(ucfirst_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn ucfirst_word(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        format!("{}{}", first.to_uppercase(), chars.as_str())
    })
}

/// Default pluralization over the forms of a [`Message`].
fn default_plural(message: &Message, count: i64) -> String {
    let mut form = message.v.as_str();
    if count == 0 && let Some(zero) = &message.n {
        form = zero;
    }
    if count == MULTIPLE && let Some(plural) = &message.p {
        form = plural;
    }
    if count > 1 {
        if let Some(counted) = &message.pc {
            form = counted;
        } else if let Some(plural) = &message.p {
            form = plural;
        }
    }
    form.replacen("{n}", &count.to_string(), 1)
}
