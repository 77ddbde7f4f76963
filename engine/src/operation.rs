//! User commands against the local order.
//!
//! The presentation layer expresses every change to the order or to
//! visibility as a [`Command`]. Commands address photos by their current
//! sort position, except visibility which addresses a photo by id.

use crate::{Catalog, PhotoId, SortValue};
use serde::{Deserialize, Serialize};

/// A user command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Exchange the photos at two positions
    Swap {
        selected: SortValue,
        target: SortValue,
    },
    /// Move the photo at `selected` to `target`, shifting the rest
    InsertAt {
        selected: SortValue,
        target: SortValue,
    },
    /// Show or hide a photo
    #[serde(rename_all = "camelCase")]
    SetVisibility { photo_id: PhotoId, hidden: bool },
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Swap { .. } => "swap",
            Command::InsertAt { .. } => "insertAt",
            Command::SetVisibility { .. } => "setVisibility",
        }
    }
}

impl Catalog {
    /// Apply a command, returning whether anything changed.
    pub fn apply(&mut self, command: &Command) -> bool {
        match *command {
            Command::Swap { selected, target } => self.swap(selected, target),
            Command::InsertAt { selected, target } => self.insert_at_sort(selected, target),
            Command::SetVisibility { photo_id, hidden } => self.set_visibility(photo_id, hidden),
        }
    }
}
