pub mod loan;
pub mod plan;
pub mod projection;
pub mod scenario;
