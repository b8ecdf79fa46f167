pub mod contact;
pub mod id;
pub mod manager;
pub mod search;

use crate::prelude::AppError;
use contact::{Contact, ContactFields, ContactId, ContactPatch};
use id::IdGenerator;
use search::View;

pub use manager::ContactStore;
