use log::debug;

use crate::prelude::{
    AppError, Contact, ContactFields, ContactId, ContactPatch, ContactStore, NoticeKind, Presenter,
};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";
pub const ADDED_MESSAGE: &str = "Contact added successfully!";
pub const UPDATED_MESSAGE: &str = "Contact updated successfully!";
pub const DELETED_MESSAGE: &str = "Contact deleted successfully!";

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<ContactForm> for ContactFields {
    fn from(form: ContactForm) -> Self {
        ContactFields {
            name: form.name,
            email: form.email,
            phone: form.phone,
            address: Some(form.address),
        }
    }
}

impl From<&Contact> for ContactForm {
    fn from(contact: &Contact) -> Self {
        ContactForm {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            address: contact.address.clone().unwrap_or_default(),
        }
    }
}

/// Form-driven front end logic over an injected [`ContactStore`].
///
/// Tracks whether the form is editing an existing contact and which contact
/// is awaiting delete confirmation, and reports every outcome to the
/// [`Presenter`].
pub struct ContactBook<P: Presenter> {
    store: ContactStore,
    presenter: P,
    editing: Option<ContactId>,
    pending_delete: Option<ContactId>,
}

impl<P: Presenter> ContactBook<P> {
    pub fn new(store: ContactStore, presenter: P) -> Self {
        let book = ContactBook {
            store,
            presenter,
            editing: None,
            pending_delete: None,
        };
        book.refresh();
        book
    }

    /// Creates a contact, or updates the one being edited.
    pub fn submit(&mut self, form: ContactForm) -> Result<Contact, AppError> {
        let fields = ContactFields::from(form).trimmed();

        let missing = fields.missing_required();
        if !missing.is_empty() {
            self.presenter
                .notify(REQUIRED_FIELDS_MESSAGE, NoticeKind::Error);
            return Err(AppError::missing_fields(&missing));
        }

        let (result, message) = match self.editing {
            Some(id) => (self.store.update(id, ContactPatch::from(fields)), UPDATED_MESSAGE),
            None => (self.store.create(fields), ADDED_MESSAGE),
        };

        match result {
            Ok(contact) => {
                self.presenter.notify(message, NoticeKind::Success);
                self.editing = None;
                self.refresh();
                Ok(contact)
            }
            Err(e) => {
                if e.is_not_found() {
                    self.editing = None;
                }
                self.presenter.notify(&e.to_string(), NoticeKind::Error);
                Err(e)
            }
        }
    }

    /// Switches the form to editing `id` and returns its current values.
    pub fn begin_edit(&mut self, id: ContactId) -> Result<ContactForm, AppError> {
        let contact = self.store.get(id).ok_or(AppError::NotFound(id))?;
        let form = ContactForm::from(contact);

        debug!("Editing contact {}", id);
        self.editing = Some(id);
        Ok(form)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<ContactId> {
        self.editing
    }

    /// Marks `id` for deletion. Nothing is removed until [`Self::confirm_delete`].
    pub fn request_delete(&mut self, id: ContactId) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<ContactId> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the pending contact. Returns `false` when nothing was pending.
    pub fn confirm_delete(&mut self) -> Result<bool, AppError> {
        let Some(id) = self.pending_delete else {
            return Ok(false);
        };

        if let Err(e) = self.store.delete(id) {
            self.presenter.notify(&e.to_string(), NoticeKind::Error);
            return Err(e);
        }

        self.pending_delete = None;
        if self.editing == Some(id) {
            self.editing = None;
        }

        self.refresh();
        self.presenter.notify(DELETED_MESSAGE, NoticeKind::Success);
        Ok(true)
    }

    /// Renders the contacts matching `term` and returns how many there are.
    pub fn filter(&self, term: &str) -> usize {
        let view = self.store.search(term);
        self.presenter.render(&view);
        ContactStore::count(&view)
    }

    pub fn refresh(&self) {
        self.presenter.render(&self.store.get_all());
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_store(self) -> ContactStore {
        self.store
    }
}
