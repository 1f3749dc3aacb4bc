//! Contact-message triage states.
//!
//! A message starts as `new`, is advanced to `read` the first time an admin
//! views it, and is moved to `responded` explicitly. Explicit status updates
//! may move a message to any state, including backwards.

define_text_enum! {
    /// Triage status of an inbound contact message.
    ContactStatus ("contact status") {
        New => "new",
        Read => "read",
        Responded => "responded",
    }
}

impl Default for ContactStatus {
    fn default() -> Self {
        ContactStatus::New
    }
}

impl ContactStatus {
    fn rank(self) -> u8 {
        match self {
            ContactStatus::New => 0,
            ContactStatus::Read => 1,
            ContactStatus::Responded => 2,
        }
    }

    /// The status an admin view moves this message to, if any.
    ///
    /// Only `new` advances (to `read`); every other status is left alone, so
    /// repeated views are idempotent.
    pub fn next_on_view(self) -> Option<ContactStatus> {
        match self {
            ContactStatus::New => Some(ContactStatus::Read),
            ContactStatus::Read | ContactStatus::Responded => None,
        }
    }

    /// Whether moving to `target` follows the normal `new -> read -> responded`
    /// order. Staying in place counts as forward.
    pub fn is_forward_to(self, target: ContactStatus) -> bool {
        target.rank() >= self.rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_the_default() {
        assert_eq!(ContactStatus::default(), ContactStatus::New);
    }

    #[test]
    fn only_new_advances_on_view() {
        assert_eq!(ContactStatus::New.next_on_view(), Some(ContactStatus::Read));
        assert_eq!(ContactStatus::Read.next_on_view(), None);
        assert_eq!(ContactStatus::Responded.next_on_view(), None);
    }

    #[test]
    fn forward_order() {
        assert!(ContactStatus::New.is_forward_to(ContactStatus::Read));
        assert!(ContactStatus::New.is_forward_to(ContactStatus::Responded));
        assert!(ContactStatus::Read.is_forward_to(ContactStatus::Read));
        assert!(!ContactStatus::Responded.is_forward_to(ContactStatus::New));
        assert!(!ContactStatus::Read.is_forward_to(ContactStatus::New));
    }

    #[test]
    fn parses_wire_values() {
        assert_eq!("responded".parse::<ContactStatus>(), Ok(ContactStatus::Responded));
        assert!("archived".parse::<ContactStatus>().is_err());
        assert_eq!(serde_json::to_string(&ContactStatus::Read).unwrap(), r#""read""#);
        let parsed: ContactStatus = serde_json::from_str(r#""new""#).unwrap();
        assert_eq!(parsed, ContactStatus::New);
    }
}
