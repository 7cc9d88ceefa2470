pub mod clock;
pub mod history;
pub mod session;
pub mod store;

pub use clock::{Clock, StepClock, SystemClock};
pub use history::{HISTORY_LIMIT, History};
pub use session::{Session, SessionError, open_backend, open_session};
pub use store::{Export, Store, StoreError};
