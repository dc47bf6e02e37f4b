use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumString;

/// Which rule sees the exam weeks first.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RuleOrder {
    /// Easter is detected on the exam days left after the holiday shift.
    #[default]
    HolidayShiftFirst,
    /// Easter is detected on the nominal Monday to Friday week.
    EasterDeferralFirst,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Rules {
    pub rule_order: RuleOrder,
    pub easter_deferral: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            rule_order: RuleOrder::HolidayShiftFirst,
            easter_deferral: true,
        }
    }
}
