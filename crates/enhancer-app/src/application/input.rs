//! Button state delivered to the screens once per frame.
//!
//! The console reports input as two bitmasks per poll: the buttons that went
//! down since the previous poll (`pressed`) and the buttons currently held
//! (`held`).  The screens only react to `pressed` today; `held` is carried so
//! a future repeat-on-hold slider does not need a new port.

/// Bitmask of console buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons(pub u16);

impl Buttons {
    pub const A: u16 = 1 << 0;
    pub const B: u16 = 1 << 1;
    pub const X: u16 = 1 << 2;
    pub const Y: u16 = 1 << 3;
    pub const L: u16 = 1 << 4;
    pub const R: u16 = 1 << 5;
    pub const START: u16 = 1 << 6;
    pub const SELECT: u16 = 1 << 7;
    pub const UP: u16 = 1 << 8;
    pub const DOWN: u16 = 1 << 9;
    pub const LEFT: u16 = 1 << 10;
    pub const RIGHT: u16 = 1 << 11;

    pub const NONE: Buttons = Buttons(0);

    /// Returns `true` if every bit of `mask` is set.
    pub fn contains(&self, mask: u16) -> bool {
        mask != 0 && self.0 & mask == mask
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn with(self, mask: u16) -> Self {
        Buttons(self.0 | mask)
    }

    /// Looks up a button by its lowercase name (`"a"`, `"start"`, `"left"`, …).
    pub fn mask_for_name(name: &str) -> Option<u16> {
        let mask = match name {
            "a" => Self::A,
            "b" => Self::B,
            "x" => Self::X,
            "y" => Self::Y,
            "l" => Self::L,
            "r" => Self::R,
            "start" => Self::START,
            "select" => Self::SELECT,
            "up" => Self::UP,
            "down" => Self::DOWN,
            "left" => Self::LEFT,
            "right" => Self::RIGHT,
            _ => return None,
        };
        Some(mask)
    }
}

/// One poll worth of input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Buttons that went down since the previous poll.
    pub pressed: Buttons,
    /// Buttons currently held down.
    pub held: Buttons,
}

impl InputFrame {
    /// A frame in which `mask` was just pressed (and is therefore held).
    pub fn pressed(mask: u16) -> Self {
        Self {
            pressed: Buttons(mask),
            held: Buttons(mask),
        }
    }

    /// A frame with no input.
    pub fn idle() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_requires_all_bits() {
        let buttons = Buttons(Buttons::A | Buttons::L);
        assert!(buttons.contains(Buttons::A));
        assert!(buttons.contains(Buttons::A | Buttons::L));
        assert!(!buttons.contains(Buttons::A | Buttons::B));
    }

    #[test]
    fn test_contains_empty_mask_is_false() {
        assert!(!Buttons(Buttons::A).contains(0));
    }

    #[test]
    fn test_mask_for_name_covers_every_button() {
        let names = [
            "a", "b", "x", "y", "l", "r", "start", "select", "up", "down", "left", "right",
        ];
        let combined = names
            .iter()
            .map(|n| Buttons::mask_for_name(n).expect("known button"))
            .fold(0u16, |acc, m| {
                assert_eq!(acc & m, 0, "button masks must not overlap");
                acc | m
            });
        assert_eq!(combined.count_ones(), 12);
        assert_eq!(Buttons::mask_for_name("home"), None);
    }

    #[test]
    fn test_pressed_frame_marks_button_held() {
        let frame = InputFrame::pressed(Buttons::START);
        assert!(frame.pressed.contains(Buttons::START));
        assert!(frame.held.contains(Buttons::START));
        assert!(InputFrame::idle().pressed.is_empty());
    }
}
