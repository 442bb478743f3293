//! HTML rendering of the editor page.

use html_escape::{encode_double_quoted_attribute, encode_text};
use jsonedit_content::{EditorView, NotifyKind};
use std::fmt::Write;

fn notify_class(kind: NotifyKind) -> &'static str {
    match kind {
        NotifyKind::Success => "alert alert-success",
        NotifyKind::Information => "alert alert-info",
        NotifyKind::Warning => "alert alert-warning",
        NotifyKind::Error => "alert alert-danger",
    }
}

/// Renders the editor page: pending notifications, the JSON document in a
/// text area and the save/publish buttons.
pub fn render_editor(view: &EditorView) -> String {
    let mut html = String::with_capacity(view.json.len() + 2048);
    let title = encode_text(&view.title);

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );

    for notification in &view.notifications {
        let _ = writeln!(
            html,
            "<div class=\"{}\" role=\"alert\">{}</div>",
            notify_class(notification.kind),
            encode_text(&notification.message)
        );
    }

    if let Some(definition) = &view.definition {
        let hints: Vec<_> = definition
            .json_fields()
            .filter_map(|(part, field)| {
                field
                    .settings
                    .hint
                    .as_deref()
                    .map(|hint| {
                        format!(
                            "<li>{}.{}: {}</li>",
                            encode_text(part),
                            encode_text(&field.name),
                            encode_text(hint)
                        )
                    })
            })
            .collect();
        if !hints.is_empty() {
            let _ = writeln!(html, "<ul class=\"hints\">\n{}\n</ul>", hints.join("\n"));
        }
    }

    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"{}\">",
        encode_double_quoted_attribute(&view.form_action)
    );
    let _ = writeln!(
        html,
        "<textarea name=\"json\" rows=\"30\" cols=\"100\" data-content-type=\"{}\">{}</textarea>",
        encode_double_quoted_attribute(&view.content_type),
        encode_text(&view.json)
    );
    if let Some(return_url) = &view.return_url {
        let _ = writeln!(
            html,
            "<input type=\"hidden\" name=\"returnUrl\" value=\"{}\">",
            encode_double_quoted_attribute(return_url)
        );
    }
    html.push_str(concat!(
        "<button type=\"submit\" name=\"submit.Save\" value=\"submit.Save\">Save Draft</button>\n",
        "<button type=\"submit\" name=\"submit.Publish\" value=\"submit.Publish\">Publish</button>\n",
        "<button type=\"submit\" name=\"submit.Publish\" value=\"submit.PublishAndContinue\">Publish and Continue</button>\n",
        "</form>\n</body>\n</html>\n",
    ));
    html
}
