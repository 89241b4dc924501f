//! Status classification tags and their presentation.
//!
//! [`Status`] is a closed set; the label/colour pair for each variant lives
//! in a `const` table so the mapping is total and allocation-free.

use core::fmt;

use serde::Serialize;

/// Classification outcome for a single sensor.
///
/// Variant order is severity order: `Normal < Warning < Danger < Unavailable`.
/// A failed read ranks worst because it means the operator has no
/// visibility at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Status {
    Normal,
    Warning,
    Danger,
    Unavailable,
}

/// Display label and colour for a [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDescriptor {
    pub label: &'static str,
    pub color: &'static str,
}

const DESCRIPTORS: [StatusDescriptor; 4] = [
    StatusDescriptor {
        label: "Normal",
        color: "green",
    },
    StatusDescriptor {
        label: "Warning",
        color: "orange",
    },
    StatusDescriptor {
        label: "Danger",
        color: "red",
    },
    StatusDescriptor {
        label: "Unavailable",
        color: "gray",
    },
];

impl Status {
    /// Every variant, in severity order.
    pub const ALL: [Status; 4] = [Self::Normal, Self::Warning, Self::Danger, Self::Unavailable];

    pub const fn descriptor(self) -> StatusDescriptor {
        DESCRIPTORS[self as usize]
    }

    pub const fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub const fn color(self) -> &'static str {
        self.descriptor().color
    }

    /// Worst status of a sequence; an empty sequence is `Normal`.
    pub fn worst(statuses: impl IntoIterator<Item = Status>) -> Status {
        statuses.into_iter().max().unwrap_or(Self::Normal)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
