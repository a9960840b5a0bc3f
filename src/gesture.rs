//! Gesture classes and their on-disk labels.

use std::fmt;

/// Directory labels, indexed by class id.
const LABELS: [&str; GestureClass::COUNT] = [
    "0_finger",
    "1_finger",
    "2_fingers",
    "3_fingers",
    "4_fingers",
    "5_fingers",
];

/// Hand gesture class, identified by the number of raised fingers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum GestureClass {
    #[default]
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
}

impl GestureClass {
    /// Number of known classes.
    pub const COUNT: usize = 6;

    /// All classes in id order.
    pub const ALL: [GestureClass; Self::COUNT] = [
        GestureClass::Zero,
        GestureClass::One,
        GestureClass::Two,
        GestureClass::Three,
        GestureClass::Four,
        GestureClass::Five,
    ];

    /// Look up a class by its numeric id (0-5).
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Look up a class from a keyboard digit ('0'-'5').
    pub fn from_digit(c: char) -> Option<Self> {
        let id = c.to_digit(10)?;
        Self::from_id(id as u8)
    }

    /// Numeric id of this class.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Stable directory label, e.g. `"2_fingers"`.
    pub fn label(self) -> &'static str {
        LABELS[self as usize]
    }
}

impl fmt::Display for GestureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_ids() {
        assert_eq!(GestureClass::Zero.label(), "0_finger");
        assert_eq!(GestureClass::One.label(), "1_finger");
        assert_eq!(GestureClass::Two.label(), "2_fingers");
        assert_eq!(GestureClass::Five.label(), "5_fingers");
    }

    #[test]
    fn test_all_is_in_id_order() {
        for (i, class) in GestureClass::ALL.iter().enumerate() {
            assert_eq!(class.id() as usize, i);
        }
    }

    #[test]
    fn test_from_digit_accepts_zero_through_five() {
        assert_eq!(GestureClass::from_digit('0'), Some(GestureClass::Zero));
        assert_eq!(GestureClass::from_digit('3'), Some(GestureClass::Three));
        assert_eq!(GestureClass::from_digit('5'), Some(GestureClass::Five));
    }

    #[test]
    fn test_from_digit_rejects_out_of_range() {
        assert_eq!(GestureClass::from_digit('6'), None);
        assert_eq!(GestureClass::from_digit('9'), None);
        assert_eq!(GestureClass::from_digit('a'), None);
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(GestureClass::default(), GestureClass::Zero);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(format!("{}", GestureClass::Four), "4_fingers");
    }
}
