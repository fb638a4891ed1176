use contact_core::{AppViewModel, Notice, NoticeSeverity};

pub fn notice_line(notice: &Notice) -> String {
    let tag = match notice.severity {
        NoticeSeverity::Success => "sent",
        NoticeSeverity::Error => "error",
    };
    format!("[{tag}] {}", notice.text)
}

pub fn status_line(view: &AppViewModel) -> String {
    format!(
        "theme: {} ({}) | modal: {} | submit: {} ({})",
        view.theme.as_str(),
        view.theme_icon,
        if view.modal_open { "open" } else { "closed" },
        view.submit_label,
        if view.submit_enabled {
            "enabled"
        } else {
            "disabled"
        },
    )
}
