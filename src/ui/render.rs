use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::app::console::{Console, Tab};
use crate::app::notices::NoticeLevel;
use crate::domain::notification::{EmailNotification, InAppNotification, SmsLog};

pub fn print_header(console: &Console) {
    println!("notification console, connected to {}", console.api().base_url());
    println!("type `help` for commands");
}

pub fn print_notices(console: &mut Console) {
    for notice in console.notices.drain() {
        match notice.level {
            NoticeLevel::Success => println!("  ok: {}", notice.text),
            NoticeLevel::Error => println!("  error: {}", notice.text),
        }
    }
}

pub fn print_toast(console: &Console) {
    if let Some(active) = console.toast.current() {
        println!();
        println!(
            "  >> [{}] {}",
            active.entry.notification_type.as_str(),
            active.entry.title
        );
        println!("     {}", active.entry.message);
        println!(
            "     {} (auto-hides in {}s, `dismiss` to clear)",
            format_ts(&active.entry.created_at),
            active.ttl.as_secs()
        );
    }
}

pub fn print_view(console: &Console) {
    println!();
    match console.active_tab {
        Tab::Email => print_email_form(console),
        Tab::Sms => print_sms_form(console),
        Tab::InApp => print_inapp_form(console),
        Tab::History => print_history(console),
    }
}

pub fn print_help() {
    println!("  user <id>                select the user the console operates on");
    println!("  tab <email|sms|inapp|history>");
    println!("  set <field> <value...>   edit a field of the active view's draft");
    println!("  send                     submit the active view's draft");
    println!("  read <id>                mark one in-app notification read");
    println!("  read-all                 mark every in-app notification read");
    println!("  dismiss                  hide the toast banner");
    println!("  refresh                  refetch all notification history");
    println!("  show                     reprint the active view");
    println!("  quit");
}

fn print_email_form(console: &Console) {
    println!("send email notification (user {})", console.user_id);
    println!("  email   : {}", console.email_form.email);
    println!("  subject : {}", console.email_form.subject);
    println!("  body    : {}", console.email_form.body);
}

fn print_sms_form(console: &Console) {
    println!("send SMS notification (user {})", console.user_id);
    println!("  to      : {}", console.sms_form.phone_number);
    println!("  message : {}", console.sms_form.message);
}

fn print_inapp_form(console: &Console) {
    println!("send in-app notification (user {})", console.user_id);
    println!("  title   : {}", console.inapp_form.title);
    println!("  message : {}", console.inapp_form.message);
    println!(
        "  type    : {}",
        console.inapp_form.notification_type.as_str()
    );
}

fn print_history(console: &Console) {
    println!("notification history (user {})", console.user_id);

    println!();
    println!("email notifications");
    print_email_table(&console.lists.email);

    println!();
    println!("SMS notifications");
    print_sms_table(&console.lists.sms);

    println!();
    println!("in-app notifications (`read <id>` / `read-all`)");
    print_inapp_table(&console.lists.inapp);
}

fn print_email_table(rows: &[EmailNotification]) {
    if rows.is_empty() {
        println!("  no email notifications found");
        return;
    }
    println!(
        "  {:<6} {:<28} {:<28} {}",
        "ID", "RECIPIENT", "SUBJECT", "DATE"
    );
    for row in rows {
        println!(
            "  {:<6} {:<28} {:<28} {}",
            row.id,
            truncate(&row.email_to, 28),
            truncate(&row.subject, 28),
            format_ts(&row.created_at)
        );
    }
}

fn print_sms_table(rows: &[SmsLog]) {
    if rows.is_empty() {
        println!("  no SMS notifications found");
        return;
    }
    println!("  {:<6} {:<18} {:<38} {}", "ID", "RECIPIENT", "MESSAGE", "DATE");
    for row in rows {
        println!(
            "  {:<6} {:<18} {:<38} {}",
            row.id,
            truncate(&row.to, 18),
            truncate(&row.body, 38),
            format_ts(&row.created_at)
        );
    }
}

fn print_inapp_table(rows: &[InAppNotification]) {
    if rows.is_empty() {
        println!("  no in-app notifications found");
        return;
    }
    println!(
        "  {:<10} {:<20} {:<30} {:<8} {:<6} {}",
        "ID", "TITLE", "MESSAGE", "TYPE", "READ", "DATE"
    );
    for row in rows {
        println!(
            "  {:<10} {:<20} {:<30} {:<8} {:<6} {}",
            short_id(&row.id),
            truncate(&row.title, 20),
            truncate(&row.message, 30),
            row.notification_type.as_str(),
            if row.read { "yes" } else { "NO" },
            format_ts(&row.created_at)
        );
    }
}

fn format_ts(ts: &OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| "-".to_string())
}

fn short_id(id: &str) -> String {
    truncate(id, 10)
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let mut out: String = value.chars().take(max.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}
