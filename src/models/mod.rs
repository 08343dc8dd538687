pub mod offer;
pub mod order_line;
pub mod request;
pub mod status;

pub use offer::OfferExtractionResult;
pub use order_line::OrderLine;
pub use request::{ProcurementRequest, ProcurementRequestCreate, StatusUpdate};
pub use status::RequestStatus;
