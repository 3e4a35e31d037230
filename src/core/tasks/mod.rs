pub mod debounce;
pub mod status;
pub mod types;

pub use debounce::Debouncer;
pub use status::{
    BusyGuard,
    StatusFlag,
};
pub use types::SessionEvent;
