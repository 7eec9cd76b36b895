//! Fixed message used to check that digest delivery reaches an address.

use tracing::info;
use validator::ValidateEmail;

use freshtrack_core::error::AppError;
use freshtrack_core::result::AppResult;
use freshtrack_core::traits::NotificationTransport;

/// Subject of the delivery check message.
pub const TEST_MAIL_SUBJECT: &str = "[FreshTrack] Notification address check";

/// The delivery check body.
pub fn render_test_mail() -> String {
    r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: Arial, sans-serif; margin: 0; padding: 20px; background-color: #f6f6f6;">
  <div style="max-width: 600px; margin: 0 auto; background: #ffffff; border-radius: 8px; overflow: hidden;">
    <div style="background: #2196F3; color: white; padding: 20px; text-align: center;">
      <h2 style="margin: 0;">Notification address check</h2>
    </div>
    <div style="padding: 30px 20px; text-align: center;">
      <p style="font-size: 16px; color: #333;">This address is set up to receive FreshTrack expiration reminders.</p>
    </div>
    <div style="background: #f9f9f9; padding: 15px; text-align: center; font-size: 12px; color: #888;">
      <p style="margin: 0;">This message was sent automatically. Please do not reply.</p>
      <p style="margin: 5px 0 0;">FreshTrack</p>
    </div>
  </div>
</body>
</html>
"#
    .to_string()
}

/// Send the delivery check message to `to` through `transport`.
pub async fn send_test_mail(transport: &dyn NotificationTransport, to: &str) -> AppResult<()> {
    let to = to.trim();
    if !to.validate_email() {
        return Err(AppError::validation(format!("Invalid email address: {to}")));
    }

    transport
        .send(to, TEST_MAIL_SUBJECT, &render_test_mail())
        .await?;

    info!(to = %to, transport = transport.transport_type(), "Test mail sent");
    Ok(())
}
