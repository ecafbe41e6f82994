//! Named bulk actions offered on the admin list views

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    /// Reset the generic host record and unpublish the item
    ResendGenericHost,
    /// Reset the video-sharing host record (videos only)
    ResendVideoHost,
    /// Drop media box entries whose end date has passed
    CleanEndedEntries,
}

impl AdminAction {
    pub const ALL: [AdminAction; 3] = [
        AdminAction::ResendGenericHost,
        AdminAction::ResendVideoHost,
        AdminAction::CleanEndedEntries,
    ];

    /// Identifier the scaffolding submits when the operator picks the action.
    pub fn name(self) -> &'static str {
        match self {
            AdminAction::ResendGenericHost => "resend_generic_host",
            AdminAction::ResendVideoHost => "resend_video_host",
            AdminAction::CleanEndedEntries => "clean_ended_entries",
        }
    }

    /// Operator-facing label in the action dropdown.
    pub fn label(self) -> &'static str {
        match self {
            AdminAction::ResendGenericHost => "Resend generic host media",
            AdminAction::ResendVideoHost => "Resend video-sharing host video",
            AdminAction::CleanEndedEntries => "Clean ended media",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

impl Display for AdminAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}
