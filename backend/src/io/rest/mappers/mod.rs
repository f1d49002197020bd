pub mod contributor_mapper;
pub mod insights_mapper;
pub mod payment_mapper;
pub mod project_mapper;

pub use contributor_mapper::ContributorMapper;
pub use insights_mapper::InsightsMapper;
pub use payment_mapper::PaymentMapper;
pub use project_mapper::ProjectMapper;
