// Platform-free models behind the page interactions (header, navigation,
// reveal delays, toasts). The DOM wiring in `site.rs` only reads and writes
// classes based on what these return.

use crate::constants::HEADER_SCROLL_OFFSET;

#[inline]
pub fn header_scrolled(scroll_y: f64) -> bool {
    scroll_y > HEADER_SCROLL_OFFSET
}

/// Leading integer of `s` the way `parseInt(s, 10)` reads it.
pub fn parse_js_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Delay before a revealed element gets its class; missing, invalid or
/// negative values mean "now".
pub fn reveal_delay_ms(attr: Option<&str>) -> i32 {
    attr.and_then(parse_js_int)
        .map(|v| v.clamp(0, i32::MAX as i64) as i32)
        .unwrap_or(0)
}

/// Fragment id for an in-page anchor, or `None` for a bare `#`.
pub fn anchor_target_id(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some("") | None => None,
        Some(id) => Some(id),
    }
}

/// Document scroll offset that lands the target just below the fixed header.
#[inline]
pub fn anchor_scroll_top(target_rect_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    target_rect_top + scroll_y - header_height
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Id of the section containing `probe_y`; when sections overlap the last
/// one in document order wins.
pub fn active_section(probe_y: f64, sections: &[SectionBounds]) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| probe_y >= s.top && probe_y < s.top + s.height)
        .map(|s| s.id.as_str())
}

/// Open/closed state of the mobile navigation menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Close the menu; returns true when it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Keyboard handling: only Escape on an open menu does anything.
    pub fn on_key(&mut self, key: &str) -> bool {
        key == "Escape" && self.close()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notification notification-success",
            NoticeKind::Error => "notification notification-error",
            NoticeKind::Info => "notification notification-info",
        }
    }
}

/// `id` of the `<style>` element carrying [`NOTIFICATION_STYLES`].
pub const NOTIFICATION_STYLES_ID: &str = "notification-styles";

/// Inline animation applied to a toast before it is removed.
pub const SLIDE_OUT_ANIMATION: &str = "animation: slideOut 0.3s ease forwards";

/// Toast layout and keyframes, injected once per document.
pub const NOTIFICATION_STYLES: &str = r#"
.notification {
    position: fixed;
    bottom: 24px;
    right: 24px;
    max-width: 400px;
    padding: 16px 20px;
    background: white;
    border-radius: 12px;
    box-shadow: 0 10px 40px rgba(0, 0, 0, 0.15);
    display: flex;
    align-items: center;
    gap: 12px;
    z-index: 1000;
    animation: slideIn 0.3s ease;
}
.notification-success { border-left: 4px solid #10b981; }
.notification-error { border-left: 4px solid #ef4444; }
.notification-info { border-left: 4px solid #63b3ed; }
.notification-content {
    display: flex;
    align-items: center;
    gap: 12px;
    flex: 1;
}
.notification-icon {
    width: 24px;
    height: 24px;
    flex-shrink: 0;
}
.notification-success .notification-icon { color: #10b981; }
.notification-error .notification-icon { color: #ef4444; }
.notification-info .notification-icon { color: #63b3ed; }
.notification-close {
    background: none;
    border: none;
    font-size: 24px;
    color: #94a3b8;
    cursor: pointer;
    padding: 0;
    line-height: 1;
}
.notification-close:hover { color: #64748b; }
@keyframes slideIn {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
@keyframes slideOut {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}
"#;

/// Tracks which toast is on screen. Showing a new toast replaces the old one,
/// so pending dismissals for earlier toasts must become no-ops.
#[derive(Clone, Debug, Default)]
pub struct Toaster {
    next_id: u64,
    current: Option<u64>,
}

impl Toaster {
    /// Register a new toast; returns its id and the id it replaces, if any.
    pub fn show(&mut self) -> (u64, Option<u64>) {
        self.next_id += 1;
        let id = self.next_id;
        (id, self.current.replace(id))
    }

    #[inline]
    pub fn current(&self) -> Option<u64> {
        self.current
    }

    /// Returns true when `id` was the toast on screen.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
