/// Blocking user-facing surface supplied by the host.
///
/// `alert` shows a message the user must acknowledge; `confirm` asks a
/// yes/no question and blocks until answered.
pub trait Prompt {
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn alert(&mut self, message: &str) {
        (**self).alert(message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }
}
