//! Locale-aware number and date-time formatting.
//!
//! Formatting itself is a platform capability: the host registers a
//! [`LocaleFormatter`] (typically backed by ICU or an `Intl`-style runtime)
//! and this module routes the active locale preference, the option bags,
//! and the resolved presets to it. The date-time presets are ordinary
//! translatable items, so a locale can override what e.g. `"short"` means.

use std::sync::{
    LazyLock,
    PoisonError,
    RwLock,
};

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    item::{FALLBACK_KEY, TranslatableItem},
    locales::preferred_locales,
};

/// One styled fragment of formatted output, mirroring the shape of
/// `Intl`'s `formatToParts`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormatPart {
    /// Part kind, e.g. `"integer"`, `"decimal"`, `"weekday"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The fragment text.
    pub value: String,
}

/// Number formatting options, a subset of `Intl.NumberFormatOptions`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberFormatOptions {
    /// Formatting style, e.g. `"decimal"`, `"currency"`, `"percent"`.
    pub style: Option<String>,
    /// ISO 4217 currency code for the `"currency"` style.
    pub currency: Option<String>,
    /// Minimum fraction digits.
    pub minimum_fraction_digits: Option<u8>,
    /// Maximum fraction digits.
    pub maximum_fraction_digits: Option<u8>,
    /// Whether to use grouping separators.
    pub use_grouping: Option<bool>,
}

/// Overall date or time style, as in `Intl.DateTimeFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTimeStyle {
    /// Fullest form, usually including the weekday.
    Full,
    /// Long month and year forms.
    Long,
    /// Abbreviated forms.
    Medium,
    /// The most compact form.
    Short,
}

/// Date-time formatting options, a subset of `Intl.DateTimeFormatOptions`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateTimeFormatOptions {
    /// Style for the date portion.
    pub date_style: Option<DateTimeStyle>,
    /// Style for the time portion.
    pub time_style: Option<DateTimeStyle>,
    /// IANA time zone name, e.g. `"Europe/Amsterdam"`.
    pub time_zone: Option<String>,
    /// Force 12-hour or 24-hour rendering.
    pub hour12: Option<bool>,
}

impl DateTimeFormatOptions {
    /// Returns these options with `extra`'s set fields taking precedence.
    #[must_use]
    pub fn merge(&self, extra: &Self) -> Self {
        Self {
            date_style: extra.date_style.or(self.date_style),
            time_style: extra.time_style.or(self.time_style),
            time_zone: extra
                .time_zone
                .clone()
                .or_else(|| self.time_zone.clone()),
            hour12: extra.hour12.or(self.hour12),
        }
    }
}

/// Platform formatting capability supplied by the host.
///
/// `locales` is the active preference list, most specific first;
/// implementations pick the first locale they support.
pub trait LocaleFormatter: Send + Sync {
    /// Formats a number.
    fn format_number(
        &self,
        locales: &[String],
        value: f64,
        options: &NumberFormatOptions,
    ) -> String;

    /// Formats a number into styled parts.
    fn number_parts(
        &self,
        locales: &[String],
        value: f64,
        options: &NumberFormatOptions,
    ) -> Vec<FormatPart>;

    /// Formats a point in time.
    fn format_datetime(
        &self,
        locales: &[String],
        moment: DateTime<Utc>,
        options: &DateTimeFormatOptions,
    ) -> String;

    /// Formats a point in time into styled parts.
    fn datetime_parts(
        &self,
        locales: &[String],
        moment: DateTime<Utc>,
        options: &DateTimeFormatOptions,
    ) -> Vec<FormatPart>;
}

/// The registered platform formatter, if any.
static FORMATTER: LazyLock<RwLock<Option<Box<dyn LocaleFormatter>>>> =
    LazyLock::new(|| RwLock::new(None));

/// Locale-resolved date-time presets, keyed by mode name.
static DATE_TIME_FORMATS: LazyLock<RwLock<Vec<(String, TranslatableItem<DateTimeFormatOptions>)>>> =
    LazyLock::new(|| {
        let preset = |style: DateTimeStyle| {
            TranslatableItem::from_entries([(
                FALLBACK_KEY,
                DateTimeFormatOptions {
                    date_style: Some(style),
                    ..DateTimeFormatOptions::default()
                },
            )])
        };
        RwLock::new(vec![
            ("full".to_string(), preset(DateTimeStyle::Full)),
            ("long".to_string(), preset(DateTimeStyle::Long)),
            ("medium".to_string(), preset(DateTimeStyle::Medium)),
            ("short".to_string(), preset(DateTimeStyle::Short)),
        ])
    });

/// Registers the process-wide platform formatter.
pub fn set_formatter(formatter: Box<dyn LocaleFormatter>) {
    *FORMATTER
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(formatter);
}

/// Installs date-time options for a preset mode under one locale tag.
///
/// Unknown modes are created, so hosts may define presets of their own next
/// to `full`, `long`, `medium` and `short`.
pub fn set_date_time_format<M, L>(mode: M, locale: L, options: DateTimeFormatOptions)
where
    M: Into<String>,
    L: Into<String>,
{
    let mode = mode.into();
    let mut guard = DATE_TIME_FORMATS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(item) = guard
        .iter_mut()
        .find_map(|(name, item)| (*name == mode).then_some(item))
    {
        item.set(locale, options);
    } else {
        guard.push((mode, TranslatableItem::from_entries([(locale.into(), options)])));
    }
}

/// Resolves the option bag of a preset mode for the active preference.
///
/// Unknown modes yield empty options, matching a formatter's defaults.
#[must_use]
pub fn date_time_format(mode: &str) -> DateTimeFormatOptions {
    let guard = DATE_TIME_FORMATS
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    guard
        .iter()
        .find_map(|(name, item)| (name == mode).then_some(item))
        .and_then(|item| item.resolve_preferred().cloned())
        .unwrap_or_default()
}

/// Formats a number with the registered formatter.
///
/// Returns `None` when no formatter has been registered.
#[must_use]
pub fn number(value: f64, options: &NumberFormatOptions) -> Option<String> {
    let guard = FORMATTER.read().unwrap_or_else(PoisonError::into_inner);
    let formatter = guard.as_ref()?;
    Some(formatter.format_number(&preferred_locales(), value, options))
}

/// Formats a number into styled parts with the registered formatter.
#[must_use]
pub fn number_parts(value: f64, options: &NumberFormatOptions) -> Option<Vec<FormatPart>> {
    let guard = FORMATTER.read().unwrap_or_else(PoisonError::into_inner);
    let formatter = guard.as_ref()?;
    Some(formatter.number_parts(&preferred_locales(), value, options))
}

/// Formats a point in time using a preset mode plus overrides.
///
/// The preset resolved for `mode` is merged with `extra`, `extra` winning
/// field by field. Returns `None` when no formatter has been registered.
#[must_use]
pub fn datetime(
    moment: DateTime<Utc>,
    mode: &str,
    extra: &DateTimeFormatOptions,
) -> Option<String> {
    let options = date_time_format(mode).merge(extra);
    let guard = FORMATTER.read().unwrap_or_else(PoisonError::into_inner);
    let formatter = guard.as_ref()?;
    Some(formatter.format_datetime(&preferred_locales(), moment, &options))
}

/// Formats a point in time into styled parts, see [`datetime`].
#[must_use]
pub fn datetime_parts(
    moment: DateTime<Utc>,
    mode: &str,
    extra: &DateTimeFormatOptions,
) -> Option<Vec<FormatPart>> {
    let options = date_time_format(mode).merge(extra);
    let guard = FORMATTER.read().unwrap_or_else(PoisonError::into_inner);
    let formatter = guard.as_ref()?;
    Some(formatter.datetime_parts(&preferred_locales(), moment, &options))
}
