pub use crate::cli::{command, run_app};
pub use crate::book::{ContactBook, ContactForm};
pub use crate::config::Config;
pub use crate::domain::{
    ContactStore,
    contact::{self, Contact, ContactFields, ContactId, ContactPatch},
    search::{View, count},
};
pub use crate::errors::AppError;
pub use crate::presenter::{NoticeKind, Presenter};
pub use crate::storage::{
    self, FileStorage, KeyValueStorage, MemoryStorage, StorageMedium, parse_storage_type,
};
