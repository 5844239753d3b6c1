//! Status-like enums and their badge presentation.
//!
//! Each enum is stored as an upper-snake string (`IN_PROGRESS`) and maps to a
//! human label, a Bootstrap contextual colour and a Bootstrap Icons class.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Display properties of a status value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Maps a status value to its display properties.
pub trait StatusBadge {
    fn label(&self) -> &'static str;
    fn color(&self) -> &'static str;
    fn icon(&self) -> &'static str;

    fn badge(&self) -> Badge {
        Badge {
            label: self.label(),
            color: self.color(),
            icon: self.icon(),
        }
    }
}

/// Generates a stored-string enum with its badge mapping.
///
/// Every variant lists `"STORED" => (label, color, icon)`; the generated
/// `match` arms have no wildcard so a new variant cannot miss a mapping.
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $stored:literal, $label:literal, $color:literal, $icon:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every variant in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Value stored in the database and used in forms.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $stored,)+
                }
            }
        }

        impl StatusBadge for $name {
            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            fn color(&self) -> &'static str {
                match self {
                    $($name::$variant => $color,)+
                }
            }

            fn icon(&self) -> &'static str {
                match self {
                    $($name::$variant => $icon,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($stored => Ok($name::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(format!(
                        "unknown {}: {other}",
                        stringify!($name)
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }
    };
}

status_enum! {
    /// Role stored on the user record.
    UserRole {
        Admin => "ADMIN", "Administrator", "danger", "bi-shield-lock";
        Client => "CLIENT", "Client", "primary", "bi-person";
    }
}

status_enum! {
    ProjectStatus {
        Pending => "PENDING", "Pending", "secondary", "bi-hourglass";
        InProgress => "IN_PROGRESS", "In progress", "primary", "bi-play-circle";
        Review => "REVIEW", "In review", "info", "bi-eye";
        OnHold => "ON_HOLD", "On hold", "warning", "bi-pause-circle";
        Completed => "COMPLETED", "Completed", "success", "bi-check-circle";
        Cancelled => "CANCELLED", "Cancelled", "danger", "bi-x-circle";
    }
}

status_enum! {
    ProposalStatus {
        Draft => "DRAFT", "Draft", "secondary", "bi-pencil";
        Sent => "SENT", "Sent", "info", "bi-send";
        Accepted => "ACCEPTED", "Accepted", "success", "bi-check-circle";
        Rejected => "REJECTED", "Rejected", "danger", "bi-x-circle";
        Expired => "EXPIRED", "Expired", "warning", "bi-clock-history";
    }
}

status_enum! {
    EstimationStatus {
        Draft => "DRAFT", "Draft", "secondary", "bi-pencil";
        Sent => "SENT", "Sent", "info", "bi-send";
        Approved => "APPROVED", "Approved", "success", "bi-check-circle";
        Rejected => "REJECTED", "Rejected", "danger", "bi-x-circle";
    }
}

status_enum! {
    InvoiceStatus {
        Draft => "DRAFT", "Draft", "secondary", "bi-pencil";
        Sent => "SENT", "Sent", "info", "bi-send";
        Paid => "PAID", "Paid", "success", "bi-check-circle";
        Overdue => "OVERDUE", "Overdue", "danger", "bi-exclamation-triangle";
        Cancelled => "CANCELLED", "Cancelled", "dark", "bi-x-circle";
    }
}

status_enum! {
    PaymentStatus {
        Pending => "PENDING", "Pending", "warning", "bi-hourglass";
        Completed => "COMPLETED", "Completed", "success", "bi-check-circle";
        Failed => "FAILED", "Failed", "danger", "bi-x-circle";
        Refunded => "REFUNDED", "Refunded", "secondary", "bi-arrow-counterclockwise";
    }
}

status_enum! {
    PaymentMethod {
        BankTransfer => "BANK_TRANSFER", "Bank transfer", "primary", "bi-bank";
        Card => "CARD", "Card", "info", "bi-credit-card";
        Cash => "CASH", "Cash", "success", "bi-cash";
        Paypal => "PAYPAL", "PayPal", "primary", "bi-paypal";
        Other => "OTHER", "Other", "secondary", "bi-three-dots";
    }
}

status_enum! {
    TaskStatus {
        Todo => "TODO", "To do", "secondary", "bi-circle";
        InProgress => "IN_PROGRESS", "In progress", "primary", "bi-play-circle";
        Review => "REVIEW", "In review", "info", "bi-eye";
        Done => "DONE", "Done", "success", "bi-check-circle";
    }
}

status_enum! {
    TaskPriority {
        Low => "LOW", "Low", "secondary", "bi-arrow-down";
        Medium => "MEDIUM", "Medium", "info", "bi-dash";
        High => "HIGH", "High", "warning", "bi-arrow-up";
        Urgent => "URGENT", "Urgent", "danger", "bi-exclamation-octagon";
    }
}

status_enum! {
    /// Processing state of a contact-form message.
    ContactStatus {
        New => "NEW", "New", "primary", "bi-envelope";
        Read => "READ", "Read", "secondary", "bi-envelope-open";
        Replied => "REPLIED", "Replied", "success", "bi-reply";
        Archived => "ARCHIVED", "Archived", "dark", "bi-archive";
    }
}

status_enum! {
    BillingPeriod {
        OneTime => "ONE_TIME", "One-time", "secondary", "bi-1-circle";
        Monthly => "MONTHLY", "Monthly", "primary", "bi-calendar-month";
        Yearly => "YEARLY", "Yearly", "success", "bi-calendar-check";
    }
}

impl TaskStatus {
    /// Tasks still requiring work.
    pub const fn is_open(self) -> bool {
        !matches!(self, TaskStatus::Done)
    }
}

impl InvoiceStatus {
    /// Invoices a client still has to pay.
    pub const UNPAID: &'static [InvoiceStatus] = &[InvoiceStatus::Sent, InvoiceStatus::Overdue];
}

/// Option entry for status `<select>` elements in templates.
#[derive(Debug, Serialize)]
pub struct StatusOption {
    pub value: &'static str,
    pub badge: Badge,
}

/// Lists every variant of a status enum as select options.
pub fn status_options<T>(all: &[T]) -> Vec<StatusOption>
where
    T: StatusBadge + Copy + Into<&'static str>,
{
    all.iter()
        .map(|status| StatusOption {
            value: (*status).into(),
            badge: status.badge(),
        })
        .collect()
}
