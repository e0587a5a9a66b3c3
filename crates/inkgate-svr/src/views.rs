//! Minimal inline HTML views. The provider payloads are passed through
//! opaquely; only `templateId` and `name` are picked out for the list.

use axum::response::Html;
use serde_json::Value;

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub(crate) fn templates_page(templates: &Value) -> Html<String> {
    let rows: String = templates["envelopeTemplates"]
        .as_array()
        .map(|list| {
            list.iter()
                .map(|t| {
                    let id = t["templateId"].as_str().unwrap_or_default();
                    let name = t["name"].as_str().unwrap_or("(unnamed)");
                    format!(
                        "<li><code>{}</code> — {}</li>\n",
                        escape(id),
                        escape(name)
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Templates</title></head>
<body>
  <h1>Envelope Templates</h1>
  <ul>
{rows}  </ul>
  <h2>Send an envelope</h2>
  <form method="post" action="/envelope">
    <label>Template ID <input name="templateId" required></label><br>
    <label>Recipient email <input name="email" type="email" required></label><br>
    <label>Recipient name <input name="name" required></label><br>
    <label>Role name <input name="roleName" required></label><br>
    <button type="submit">Send</button>
  </form>
</body>
</html>
"#
    ))
}

pub(crate) fn envelope_page(envelope: &Value) -> Html<String> {
    let envelope_id = envelope["envelopeId"].as_str().unwrap_or("(unknown)");
    let status = envelope["status"].as_str().unwrap_or("(unknown)");
    let raw = serde_json::to_string_pretty(envelope).unwrap_or_default();

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Envelope</title></head>
<body>
  <h1>Envelope sent</h1>
  <p>Envelope <code>{}</code> is <strong>{}</strong>.</p>
  <pre>{}</pre>
  <p><a href="/templates">Back to templates</a></p>
</body>
</html>
"#,
        escape(envelope_id),
        escape(status),
        escape(&raw)
    ))
}
