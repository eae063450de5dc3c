pub mod composer;
pub mod coordinator;
pub mod passengers;
pub mod validation;

pub use composer::SearchPage;
pub use coordinator::{SearchExecutor, SearchForm};
pub use passengers::{update_passengers, PassengerField};
pub use validation::{validate, FormError};
