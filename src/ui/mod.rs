mod render;

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::app::console::{Console, Tab};
use crate::app::toast::{ScheduledDismiss, ToastToken};
use crate::domain::notification::NotificationType;

enum Dispatch {
    Handled(Option<ScheduledDismiss>),
    Quit,
}

/// Line-oriented event loop: commands from stdin, toast expiries from the
/// timer channel. One command is processed at a time; timers fire between
/// commands.
pub async fn run(console: &mut Console) -> Result<()> {
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel::<ToastToken>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render::print_header(console);
    render::print_view(console);
    prompt(console);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match dispatch(console, line.trim()).await {
                    Dispatch::Quit => break,
                    Dispatch::Handled(dismiss) => {
                        if let Some(dismiss) = dismiss {
                            arm_timer(&timer_tx, dismiss);
                        }
                    }
                }
                render::print_notices(console);
                render::print_toast(console);
                prompt(console);
            }
            Some(token) = timer_rx.recv() => {
                if console.expire_toast(token) {
                    println!();
                    println!("  (toast hidden)");
                    prompt(console);
                }
            }
        }
    }

    Ok(())
}

fn arm_timer(tx: &mpsc::UnboundedSender<ToastToken>, dismiss: ScheduledDismiss) {
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(dismiss.after).await;
        // The receiver only goes away when the loop exits.
        let _ = tx.send(dismiss.token);
    });
}

async fn dispatch(console: &mut Console, line: &str) -> Dispatch {
    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim();

    let mut dismiss = None;
    match command {
        "" => {}
        "help" => render::print_help(),
        "quit" | "exit" => return Dispatch::Quit,
        "tab" => match parse_tab(rest) {
            Some(tab) => {
                console.select_tab(tab);
                render::print_view(console);
            }
            None => console
                .notices
                .error(format!("unknown tab: {} (email, sms, inapp, history)", rest)),
        },
        "user" => match rest.parse::<u64>() {
            Ok(id) if id > 0 => {
                console.select_user(id).await;
                render::print_view(console);
            }
            _ => console.notices.error("user takes a positive number"),
        },
        "set" => set_field(console, rest),
        "send" => dismiss = submit(console).await,
        "read" => {
            if rest.is_empty() {
                console.notices.error("read takes a notification id");
            } else {
                console.mark_read(rest).await;
            }
        }
        "read-all" => console.mark_all_read().await,
        "dismiss" => console.dismiss_toast(),
        "refresh" => {
            console.refresh().await;
            render::print_view(console);
        }
        "show" => render::print_view(console),
        other => console
            .notices
            .error(format!("unknown command: {} (try `help`)", other)),
    }

    Dispatch::Handled(dismiss)
}

async fn submit(console: &mut Console) -> Option<ScheduledDismiss> {
    if console.active_tab == Tab::History {
        console.notices.error("nothing to send on the history view");
        return None;
    }
    if console.sending {
        console.notices.error("a send is already in flight");
        return None;
    }
    println!("  sending...");
    match console.active_tab {
        Tab::Email => console.send_email().await,
        Tab::Sms => console.send_sms().await,
        Tab::InApp => console.send_inapp().await,
        Tab::History => None,
    }
}

fn set_field(console: &mut Console, rest: &str) {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let field = parts.next().unwrap_or("");
    let value = parts.next().unwrap_or("").trim().to_string();

    match (console.active_tab, field) {
        (Tab::Email, "email") => console.email_form.email = value,
        (Tab::Email, "subject") => console.email_form.subject = value,
        (Tab::Email, "body") => console.email_form.body = value,
        (Tab::Sms, "to") => console.sms_form.phone_number = value,
        (Tab::Sms, "message") => console.sms_form.message = value,
        (Tab::InApp, "title") => console.inapp_form.title = value,
        (Tab::InApp, "message") => console.inapp_form.message = value,
        (Tab::InApp, "type") => match NotificationType::parse(&value) {
            Some(kind) => console.inapp_form.notification_type = kind,
            None => console
                .notices
                .error("type is one of info, success, warning, error"),
        },
        _ => console.notices.error(format!(
            "no field `{}` on the {} view",
            field,
            console.active_tab.as_str()
        )),
    }
}

fn parse_tab(value: &str) -> Option<Tab> {
    match value {
        "email" => Some(Tab::Email),
        "sms" => Some(Tab::Sms),
        "inapp" => Some(Tab::InApp),
        "history" => Some(Tab::History),
        _ => None,
    }
}

fn prompt(console: &Console) {
    print!("{}:{}> ", console.user_id, console.active_tab.as_str());
    let _ = std::io::stdout().flush();
}
