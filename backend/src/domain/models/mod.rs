//! Plain domain models, decoupled from the storage rows and the REST DTOs.

pub mod contributor;
pub mod payment_schedule;
pub mod project;

pub use contributor::{Contributor, ContributorStatus};
pub use payment_schedule::{PaymentMethod, PaymentSchedule, ScheduleWithContributor};
pub use project::{PaymentFrequency, Project};
