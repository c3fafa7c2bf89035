//! Status helper enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data in the corresponding
//! `*_statuses` table; the ids themselves are owned by `doneit_core`.

use doneit_core::accounts::{APPROVAL_ID_APPROVED, APPROVAL_ID_PENDING, APPROVAL_ID_REJECTED};
use doneit_core::request_lifecycle::{
    STATUS_ID_ASSIGNED, STATUS_ID_CANCELLED, STATUS_ID_COMPLETED, STATUS_ID_PENDING,
};

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Return the seed name of this status.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Look up a status by database ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( x if x == $val => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Service request lifecycle status.
    RequestStatus {
        Pending = STATUS_ID_PENDING => "pending",
        Assigned = STATUS_ID_ASSIGNED => "assigned",
        Completed = STATUS_ID_COMPLETED => "completed",
        Cancelled = STATUS_ID_CANCELLED => "cancelled",
    }
}

define_status_enum! {
    /// Serviceman application review status.
    ApprovalStatus {
        Pending = APPROVAL_ID_PENDING => "pending",
        Approved = APPROVAL_ID_APPROVED => "approved",
        Rejected = APPROVAL_ID_REJECTED => "rejected",
    }
}
