use crate::prelude::Contact;

/// Ordered, borrowed subset of the collection.
#[derive(Debug, Clone, Default)]
pub struct View<'a> {
    contacts: Vec<&'a Contact>,
}

impl<'a> View<'a> {
    pub fn new(contacts: Vec<&'a Contact>) -> Self {
        View { contacts }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Contact> + '_ {
        self.contacts.iter().copied()
    }

    pub fn contacts(&self) -> &[&'a Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

impl<'a> FromIterator<&'a Contact> for View<'a> {
    fn from_iter<T: IntoIterator<Item = &'a Contact>>(iter: T) -> Self {
        View::new(iter.into_iter().collect())
    }
}

/// Contacts whose name, email or phone contains `term`.
///
/// Name and email are compared case-insensitively. Phone numbers are matched
/// as stored against the lower-cased term, since they are mostly digits.
/// An empty term keeps everything. Relative order is preserved.
pub fn filter<'a>(contacts: &'a [Contact], term: &str) -> View<'a> {
    if term.is_empty() {
        return contacts.iter().collect();
    }

    let term = term.to_lowercase();

    contacts
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&term)
                || c.email.to_lowercase().contains(&term)
                || c.phone.contains(&term)
        })
        .collect()
}

pub fn count(view: &View<'_>) -> usize {
    view.len()
}
