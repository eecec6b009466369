use std::fmt::Write as _;

use portfolio_core::{PageViewModel, RevealPhase, SubmissionStatus};

use super::constants::SITE_OWNER;

const BAR_WIDTH: usize = 20;

/// One-line header summary, printed whenever the view changes.
pub(crate) fn status_line(view: &PageViewModel) -> String {
    let header = &view.header;
    let nav = header
        .nav_items
        .iter()
        .map(|item| {
            if item.active {
                format!("*{}*", item.label)
            } else {
                item.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut line = format!(
        "[{}] {} {:>3.0}%",
        nav,
        progress_bar(header.progress_bar, BAR_WIDTH),
        header.progress_ratio * 100.0
    );
    if header.backdrop {
        line.push_str(" backdrop");
    }
    if header.menu_open {
        line.push_str(" menu");
    }
    if let Some(target) = &header.navigating_to {
        let _ = write!(line, " -> {target}");
    }
    line
}

/// Full text rendering of the page.
pub(crate) fn render_page(view: &PageViewModel, year: i32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", status_line(view));
    for group in &view.reveals {
        match group.phase {
            RevealPhase::Hidden => {
                let _ = writeln!(out, "  {:<11} hidden", group.id);
            }
            RevealPhase::Visible { .. } => {
                let opacities = group
                    .children
                    .iter()
                    .map(|child| format!("{:.2}", child.opacity))
                    .collect::<Vec<_>>()
                    .join(" ");
                let _ = writeln!(out, "  {:<11} {}", group.id, opacities);
            }
        }
    }

    let contact = &view.contact;
    let _ = writeln!(out, "  name:    {}", contact.fields.name);
    let _ = writeln!(out, "  email:   {}", contact.fields.email);
    let _ = writeln!(out, "  message: {}", contact.fields.message);
    let button = if contact.submit_enabled {
        format!("[{}]", contact.submit_label)
    } else {
        format!("({})", contact.submit_label)
    };
    let _ = writeln!(out, "  {button}");
    match contact.status {
        SubmissionStatus::Succeeded | SubmissionStatus::Failed => {
            let _ = writeln!(out, "  {}", contact.status_message);
        }
        SubmissionStatus::Idle | SubmissionStatus::Validating | SubmissionStatus::Sending => {}
    }
    let _ = write!(out, "(c) {year} {SITE_OWNER}");
    out
}

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use portfolio_core::{update, AppState, ContactField, Msg};

    use super::{progress_bar, render_page, status_line};

    #[test]
    fn progress_bar_is_clamped() {
        assert_eq!(progress_bar(0.5, 4), "##--");
        assert_eq!(progress_bar(1.7, 4), "####");
        assert_eq!(progress_bar(-1.0, 4), "----");
    }

    #[test]
    fn status_line_marks_active_section_and_menu() {
        let (state, _) = update(AppState::new(), Msg::MenuToggled);
        let line = status_line(&state.view());
        assert!(line.starts_with("[*Home* Skills Experience Projects Goals Contact]"));
        assert!(line.ends_with(" menu"));
    }

    #[test]
    fn page_shows_validation_message_and_footer_year() {
        let (state, _) = update(
            AppState::new(),
            Msg::ContactFieldEdited {
                field: ContactField::Name,
                value: "Ada".to_string(),
            },
        );
        let (state, _) = update(state, Msg::ContactSubmitted);
        let page = render_page(&state.view(), 2026);
        assert!(page.contains("[Send Message]"));
        assert!(page.contains("Please enter your email"));
        assert!(page.contains("skills      hidden"));
        assert!(page.ends_with("(c) 2026 Portfolio"));
    }
}
