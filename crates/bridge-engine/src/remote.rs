//! Remote-control (AVRCP passthrough) command interpretation.

/// Logical buttons reported by the wireless sink.
///
/// Codes are the AVRCP passthrough operation ids the sink stack delivers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteKey {
    Play,
    Pause,
    Rewind,
    FastForward,
    Forward,
    Backward,
}

impl RemoteKey {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x44 => Some(Self::Play),
            0x46 => Some(Self::Pause),
            0x48 => Some(Self::Rewind),
            0x49 => Some(Self::FastForward),
            0x4B => Some(Self::Forward),
            0x4C => Some(Self::Backward),
            _ => None,
        }
    }
}

/// What a released button should do to the bridge.
///
/// The bridge has no track or seek concept (the host stream is a plain PCM
/// pipe), so everything except the pause proxy is diagnostics only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteAction {
    /// Play/pause: toggle the mute flag as the pause proxy.
    TogglePause,
    /// Next/previous/seek buttons: acknowledged in the log, no effect.
    LogOnly(RemoteKey),
    /// Unrecognized code: logged and ignored.
    Ignore,
}

/// Map a button event to an action, debouncing on the release edge.
///
/// Press events (`released == false`) are absorbed so a held button cannot
/// repeat-fire; the action happens once, when the button is let go.
pub fn interpret(code: u8, released: bool) -> Option<RemoteAction> {
    if !released {
        return None;
    }
    Some(match RemoteKey::from_code(code) {
        Some(RemoteKey::Play) | Some(RemoteKey::Pause) => RemoteAction::TogglePause,
        Some(key) => RemoteAction::LogOnly(key),
        None => RemoteAction::Ignore,
    })
}
