use chrono::NaiveTime;

use super::items::{ItemId, WorldItem};

pub(crate) const PHOTO_TEXT: &str = "My family.";
const CLOCK_FORMAT: &str = "%I:%M:%S %p";

/// Upper hour bound (inclusive) paired with the bed's reply, checked in order.
const BED_BANDS: [(u32, &str); 7] = [
    (4, "Why are you still up? Working? Let's continue tomorrow."),
    (
        7,
        "I just woke up and immediately realized there was another morning person.",
    ),
    (12, "Seriously? at this time?"),
    (14, "Still working."),
    (16, "It's too late to take a nap."),
    (20, "Sleepy yet?"),
    (23, "I'll sleep after you."),
];

/// What pressing the interact key does for the focused item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interaction {
    ExternalAction,
    TimeDisplay,
    HourBands,
    FixedText(&'static str),
    Unrecognized,
}

impl Interaction {
    pub(crate) fn for_item(item: &WorldItem) -> Self {
        if !item.is_text {
            return Interaction::ExternalAction;
        }
        match item.unique_id {
            ItemId::Clock => Interaction::TimeDisplay,
            ItemId::Bed => Interaction::HourBands,
            ItemId::Photo => Interaction::FixedText(PHOTO_TEXT),
            _ => Interaction::Unrecognized,
        }
    }

    pub(crate) const fn name(self) -> &'static str {
        match self {
            Interaction::ExternalAction => "external_action",
            Interaction::TimeDisplay => "time_display",
            Interaction::HourBands => "hour_bands",
            Interaction::FixedText(_) => "fixed_text",
            Interaction::Unrecognized => "unrecognized",
        }
    }
}

/// Empty for hours past 23.
pub(crate) fn bed_response(hour: u32) -> &'static str {
    BED_BANDS
        .iter()
        .find(|(upper, _)| hour <= *upper)
        .map(|(_, text)| *text)
        .unwrap_or("")
}

/// `hh:mm:ss AM/PM`, zero padded.
pub(crate) fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}
