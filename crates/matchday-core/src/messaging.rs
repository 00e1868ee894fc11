use crate::domain::{with_country_prefix, MatchRecord, MessageKind};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

pub const WHATSAPP_BASE: &str = "https://wa.me/";

pub const DEFAULT_CONFIRMATION_TEMPLATE: &str = "Hola {team}, por favor confirma tu asistencia al partido del día {day} a las {time} en {field}. Responde SI o NO.";
pub const DEFAULT_REMINDER_TEMPLATE: &str = "Recordatorio: Partido hoy {day} a las {time} en {field}. Requisitos: puntualidad, uniforme completo. ¡Te esperamos!";

/// Digits of a national mobile number without country code.
pub const DEFAULT_LOCAL_PHONE_DIGITS: usize = 10;

/// Placeholders understood by message templates.
pub const PLACEHOLDERS: [&str; 4] = ["{team}", "{day}", "{time}", "{field}"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplates {
    pub confirmation: String,
    pub reminder: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            confirmation: DEFAULT_CONFIRMATION_TEMPLATE.to_string(),
            reminder: DEFAULT_REMINDER_TEMPLATE.to_string(),
        }
    }
}

impl MessageTemplates {
    pub fn template(&self, kind: MessageKind) -> &str {
        match kind {
            MessageKind::Confirmation => &self.confirmation,
            MessageKind::Reminder => &self.reminder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOptions {
    pub country_prefix: Option<String>,
    pub local_phone_digits: usize,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            country_prefix: None,
            local_phone_digits: DEFAULT_LOCAL_PHONE_DIGITS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLink {
    pub kind: MessageKind,
    pub text: String,
    pub url: String,
    pub sent: bool,
}

/// Fills the template in one pass, so placeholder-shaped text inside record
/// values is copied as written.
pub fn render_message(template: &str, record: &MatchRecord) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match placeholder_value(tail, record) {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn placeholder_value<'r>(
    tail: &str,
    record: &'r MatchRecord,
) -> Option<(&'static str, &'r str)> {
    let placeholder = PLACEHOLDERS
        .into_iter()
        .find(|placeholder| tail.starts_with(*placeholder))?;
    let value = match placeholder {
        "{team}" => record.team_name.as_str(),
        "{day}" => record.match_day.as_str(),
        "{time}" => record.match_time.as_str(),
        _ => record.field_name.as_str(),
    };
    Some((placeholder, value))
}

/// Builds a `wa.me` deep link that opens a chat with `phone` prefilled with
/// `text`. Spaces are encoded as `%20`.
pub fn whatsapp_link(phone: &str, text: &str) -> Result<Url, CoreError> {
    if phone.is_empty() || !phone.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(CoreError::InvalidLink(format!(
            "phone must be digits only: {phone:?}"
        )));
    }
    let mut url = Url::parse(WHATSAPP_BASE).map_err(|err| CoreError::InvalidLink(err.to_string()))?;
    url.set_path(phone);
    let encoded: String = form_urlencoded::byte_serialize(text.as_bytes()).collect();
    url.set_query(Some(&format!("text={}", encoded.replace('+', "%20"))));
    Ok(url)
}

pub fn message_link(
    record: &MatchRecord,
    kind: MessageKind,
    templates: &MessageTemplates,
    options: &LinkOptions,
) -> Result<MessageLink, CoreError> {
    let text = render_message(templates.template(kind), record);
    let phone = with_country_prefix(
        &record.phone,
        options.country_prefix.as_deref(),
        options.local_phone_digits,
    );
    let url = whatsapp_link(&phone, &text)?;
    Ok(MessageLink {
        kind,
        text,
        url: url.to_string(),
        sent: record.messages.is_sent(kind),
    })
}

/// Confirmation request followed by the reminder.
pub fn message_links(
    record: &MatchRecord,
    templates: &MessageTemplates,
    options: &LinkOptions,
) -> Result<Vec<MessageLink>, CoreError> {
    [MessageKind::Confirmation, MessageKind::Reminder]
        .into_iter()
        .map(|kind| message_link(record, kind, templates, options))
        .collect()
}
