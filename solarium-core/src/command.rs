//! Remote command parsing
//!
//! The command channel delivers opaque JSON payloads of the form
//!
//! ```json
//! {"cmd": "message", "value": [{"font": "butterfly", "msg": "hello"}]}
//! ```
//!
//! A valid `message` command composes a fresh [`MessageTrack`] that
//! replaces the active one wholesale. Malformed payloads are reported as
//! errors and never touch the current track.

use heapless::Vec;
use serde::Deserialize;

use crate::style::StyleRegistry;
use crate::text::{GlyphMetrics, MessageTrack, TextRun, MAX_RUNS};

/// Errors from command handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Payload is not valid JSON or does not match the schema
    Json,
    /// The `cmd` field names an unsupported command
    UnknownCommand,
    /// Message exceeds run or track capacity
    Capacity,
}

/// One styled piece of a message command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MessagePart<'a> {
    /// Style name, resolved fail-closed against the registry
    #[serde(borrow)]
    pub font: &'a str,
    /// Text of this part
    #[serde(borrow)]
    pub msg: &'a str,
}

#[derive(Deserialize)]
struct Envelope<'a> {
    #[serde(borrow)]
    cmd: &'a str,
    #[serde(borrow)]
    value: Vec<MessagePart<'a>, MAX_RUNS>,
}

/// A parsed remote command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Replace the scrolling message
    Message(Vec<MessagePart<'a>, MAX_RUNS>),
}

/// Parse a raw command payload
pub fn parse(payload: &[u8]) -> Result<Command<'_>, CommandError> {
    let (envelope, _rest) =
        serde_json_core::de::from_slice::<Envelope>(payload).map_err(|_| CommandError::Json)?;
    match envelope.cmd {
        "message" => Ok(Command::Message(envelope.value)),
        _ => Err(CommandError::UnknownCommand),
    }
}

/// Compose a replacement track from message parts
///
/// Returns the track and whether any font name was substituted with the
/// default style, so the caller can log the fallback.
pub fn compose_track<M: GlyphMetrics>(
    parts: &[MessagePart<'_>],
    registry: &StyleRegistry<'_, M>,
) -> Result<(MessageTrack, bool), CommandError> {
    let mut track = MessageTrack::new();
    let mut substituted = false;
    for part in parts {
        let resolved = registry.resolve(part.font);
        substituted |= resolved.substituted;
        let run = TextRun::measure(part.msg, resolved.id, registry.metrics(resolved.id))
            .map_err(|_| CommandError::Capacity)?;
        track.push(run).map_err(|_| CommandError::Capacity)?;
    }
    Ok((track, substituted))
}

/// Parse a payload and build the replacement track in one step
pub fn track_from_payload<M: GlyphMetrics>(
    payload: &[u8],
    registry: &StyleRegistry<'_, M>,
) -> Result<(MessageTrack, bool), CommandError> {
    let Command::Message(parts) = parse(payload)?;
    compose_track(&parts, registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleId;
    use crate::text::tests::FixedMetrics;

    fn registry() -> StyleRegistry<'static, FixedMetrics> {
        static ENTRIES: &[(&str, FixedMetrics)] = &[
            ("status", FixedMetrics(8)),
            ("message", FixedMetrics(6)),
            ("butterfly", FixedMetrics(10)),
        ];
        StyleRegistry::new(ENTRIES, 1)
    }

    #[test]
    fn message_command_composes_a_track() {
        let payload =
            br#"{"cmd":"message","value":[{"font":"butterfly","msg":"hi"},{"font":"message","msg":"there"}]}"#;
        let (track, substituted) = track_from_payload(payload, &registry()).unwrap();
        assert!(!substituted);
        assert_eq!(track.runs().len(), 2);
        assert_eq!(track.runs()[0].style(), StyleId::new(2));
        assert_eq!(track.runs()[0].pixel_width(), 20);
        assert_eq!(track.runs()[1].pixel_width(), 30);
    }

    #[test]
    fn malformed_json_leaves_active_track_unchanged() {
        let reg = registry();
        let (active, _) = track_from_payload(
            br#"{"cmd":"message","value":[{"font":"message","msg":"keep me"}]}"#,
            &reg,
        )
        .unwrap();

        let before = active.clone();
        let err = track_from_payload(b"{not json", &reg);
        assert_eq!(err, Err(CommandError::Json));
        // The caller only swaps on Ok, so the active track is untouched.
        assert_eq!(active, before);
    }

    #[test]
    fn unknown_command_is_rejected() {
        let payload = br#"{"cmd":"reboot","value":[]}"#;
        assert_eq!(parse(payload), Err(CommandError::UnknownCommand));
    }

    #[test]
    fn unknown_font_substitutes_the_default() {
        let payload = br#"{"cmd":"message","value":[{"font":"comic-sans","msg":"x"}]}"#;
        let reg = registry();
        let (track, substituted) = track_from_payload(payload, &reg).unwrap();
        assert!(substituted);
        assert_eq!(track.runs()[0].style(), reg.default_id());
    }

    #[test]
    fn missing_value_field_is_a_schema_error() {
        let payload = br#"{"cmd":"message"}"#;
        assert_eq!(parse(payload), Err(CommandError::Json));
    }

    #[test]
    fn overlong_run_is_a_capacity_error() {
        let mut payload = std::string::String::from(r#"{"cmd":"message","value":[{"font":"message","msg":""#);
        for _ in 0..80 {
            payload.push('x');
        }
        payload.push_str(r#""}]}"#);
        let err = track_from_payload(payload.as_bytes(), &registry());
        assert_eq!(err, Err(CommandError::Capacity));
    }
}
