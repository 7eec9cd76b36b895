//! The per-user expiration digest email.

use chrono::NaiveDate;

use freshtrack_entity::food::{FoodItem, Freshness};
use freshtrack_entity::user::User;

const EXPIRED_COLOR: &str = "#e74c3c";
const EXPIRING_COLOR: &str = "#f39c12";

/// One line of the digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEntry {
    /// Food name.
    pub name: String,
    /// Food category.
    pub category: String,
    /// Expiration date.
    pub expiration_date: NaiveDate,
    /// Status relative to the digest day.
    pub status: Freshness,
}

impl DigestEntry {
    /// Build an entry for `food` as of `today`.
    pub fn new(food: &FoodItem, today: NaiveDate) -> Self {
        Self {
            name: food.name.clone(),
            category: food.category.clone(),
            expiration_date: food.expiration_date,
            status: Freshness::from_days_left(food.days_left(today)),
        }
    }
}

/// Foods of one user that are expired or about to expire.
#[derive(Debug, Clone)]
pub struct ExpirationDigest {
    username: String,
    entries: Vec<DigestEntry>,
}

impl ExpirationDigest {
    /// Collect the entries for `foods`, soonest expiration first.
    pub fn new<'a>(user: &User, foods: impl IntoIterator<Item = &'a FoodItem>, today: NaiveDate) -> Self {
        let mut entries: Vec<DigestEntry> = foods
            .into_iter()
            .map(|food| DigestEntry::new(food, today))
            .collect();
        entries.sort_by(|a, b| {
            a.expiration_date
                .cmp(&b.expiration_date)
                .then_with(|| a.name.cmp(&b.name))
        });

        Self {
            username: user.username.clone(),
            entries,
        }
    }

    /// The digest lines.
    pub fn entries(&self) -> &[DigestEntry] {
        &self.entries
    }

    /// Whether there is nothing to send.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of listed foods.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Render the HTML body.
    pub fn render_html(&self) -> String {
        let items: String = self.entries.iter().map(render_entry).collect();

        format!(
            r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: Arial, sans-serif; margin: 0; padding: 20px; background-color: #f6f6f6;">
  <div style="max-width: 600px; margin: 0 auto; background: #ffffff; border-radius: 8px; overflow: hidden;">
    <div style="background: #FF9800; color: white; padding: 20px; text-align: center;">
      <h2 style="margin: 0;">Food expiration reminder</h2>
    </div>
    <div style="padding: 30px 20px;">
      <p style="font-size: 16px; color: #333;">Hello {username},</p>
      <p style="font-size: 14px; color: #666;">The following items are about to expire or have already expired:</p>
      <ul style="padding-left: 0; list-style-type: none;">
{items}      </ul>
    </div>
    <div style="background: #f9f9f9; padding: 15px; text-align: center; font-size: 12px; color: #888;">
      <p style="margin: 0;">This message was sent automatically. Please do not reply.</p>
      <p style="margin: 5px 0 0;">FreshTrack</p>
    </div>
  </div>
</body>
</html>
"#,
            username = escape_html(&self.username),
            items = items,
        )
    }
}

fn render_entry(entry: &DigestEntry) -> String {
    let color = if entry.status.is_expired() {
        EXPIRED_COLOR
    } else {
        EXPIRING_COLOR
    };

    format!(
        concat!(
            "        <li style=\"margin-bottom: 10px; padding: 10px; background: #f9f9f9; border-radius: 4px;\">",
            "<b style=\"color: #333;\">{name}</b> ",
            "<span style=\"color: #666; font-size: 0.9em;\">({category})</span><br/>",
            "<span style=\"color: {color}; font-weight: bold;\">{status}</span> ",
            "<span style=\"color: #999; font-size: 0.9em;\"> - {date}</span></li>\n"
        ),
        name = escape_html(&entry.name),
        category = escape_html(&entry.category),
        color = color,
        status = entry.status.label(),
        date = entry.expiration_date.format("%Y-%m-%d"),
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
