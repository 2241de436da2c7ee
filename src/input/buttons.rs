//! Linux input button codes used by tablet tools and emulated pointers,
//! and the lookup that turns one into the other.

pub const BTN_LEFT: u32 = 0x110;
pub const BTN_RIGHT: u32 = 0x111;
pub const BTN_MIDDLE: u32 = 0x112;
pub const BTN_SIDE: u32 = 0x113;
pub const BTN_EXTRA: u32 = 0x114;
pub const BTN_FORWARD: u32 = 0x115;
pub const BTN_BACK: u32 = 0x116;
pub const BTN_TASK: u32 = 0x117;

/// Reported by the tip of a pen. Tip events carry no code of their own, so this is
/// the key they are looked up under.
pub const BTN_TOOL_PEN: u32 = 0x140;
pub const BTN_STYLUS3: u32 = 0x149;
pub const BTN_STYLUS: u32 = 0x14b;
pub const BTN_STYLUS2: u32 = 0x14c;

/// Resolves a raw tool button into the pointer button it should emulate.
///
/// `None` means the button is unmapped and its events are dropped.
pub trait ButtonMapper {
    fn mapped_button(&self, raw: u32) -> Option<u32>;
}

impl<F> ButtonMapper for F
where
    F: Fn(u32) -> Option<u32>,
{
    fn mapped_button(&self, raw: u32) -> Option<u32> {
        self(raw)
    }
}

/// Parses the name of a tablet tool button, as written in the config.
pub fn parse_tool_button(name: &str) -> Option<u32> {
    match name.trim().to_ascii_lowercase().as_str() {
        "tip" | "pen" => Some(BTN_TOOL_PEN),
        "stylus" => Some(BTN_STYLUS),
        "stylus2" => Some(BTN_STYLUS2),
        "stylus3" => Some(BTN_STYLUS3),
        _ => None,
    }
}

/// The name the config uses for a tool button, inverse of [`parse_tool_button`].
pub fn tool_button_name(raw: u32) -> Option<&'static str> {
    match raw {
        BTN_TOOL_PEN => Some("Tip"),
        BTN_STYLUS => Some("Stylus"),
        BTN_STYLUS2 => Some("Stylus2"),
        BTN_STYLUS3 => Some("Stylus3"),
        _ => None,
    }
}

/// Parses the name of an emulated pointer button.
pub fn parse_pointer_button(name: &str) -> Option<u32> {
    match name.trim().to_ascii_lowercase().as_str() {
        "left" => Some(BTN_LEFT),
        "right" => Some(BTN_RIGHT),
        "middle" => Some(BTN_MIDDLE),
        "side" => Some(BTN_SIDE),
        "extra" => Some(BTN_EXTRA),
        "forward" => Some(BTN_FORWARD),
        "back" => Some(BTN_BACK),
        "task" => Some(BTN_TASK),
        _ => None,
    }
}
