use crate::prelude::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Rendering and notification surface supplied by whatever front end drives
/// the contact book. Implementations own escaping for their medium.
pub trait Presenter {
    /// Shows the given contacts. The total shown is `view.len()`.
    fn render(&self, view: &View<'_>);

    fn notify(&self, message: &str, kind: NoticeKind);
}

impl<P: Presenter + ?Sized> Presenter for &P {
    fn render(&self, view: &View<'_>) {
        (**self).render(view)
    }

    fn notify(&self, message: &str, kind: NoticeKind) {
        (**self).notify(message, kind)
    }
}
