pub mod conversion;
pub mod risk_assessment;
pub mod settlement;
pub mod tax;
pub mod transaction;

pub use conversion::*;
pub use risk_assessment::*;
pub use settlement::*;
pub use tax::*;
pub use transaction::*;
