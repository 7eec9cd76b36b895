//! Expiration digest rendering and delivery transports.

pub mod digest;
pub mod mailer;
pub mod test_mail;

pub use digest::{DigestEntry, ExpirationDigest};
pub use mailer::{HttpMailTransport, LogTransport, build_transport};
pub use test_mail::{TEST_MAIL_SUBJECT, send_test_mail};
