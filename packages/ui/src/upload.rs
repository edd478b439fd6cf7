//! Browser file picking and upload to the asset endpoint.
//!
//! The chosen `File` is posted by the page itself as multipart form data to
//! [`api::UPLOAD_ROUTE`], so large files never pass through the script bridge.

use dioxus::prelude::*;
use serde::Deserialize;

use api::AssetInfo;

/// What the page script reports back after a pick-and-upload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UploadReply {
    /// The dialog was dismissed.
    Cancelled,
    Stored { asset: AssetInfo },
    Failed { error: String },
}

impl UploadReply {
    pub fn into_result(self) -> Result<Option<AssetInfo>, String> {
        match self {
            UploadReply::Cancelled => Ok(None),
            UploadReply::Stored { asset } => Ok(Some(asset)),
            UploadReply::Failed { error } => Err(error),
        }
    }
}

fn pick_and_upload_script(accept: &str) -> String {
    let accept = serde_json::to_string(accept).unwrap_or_else(|_| "\"\"".to_string());
    let route = serde_json::to_string(api::UPLOAD_ROUTE).unwrap_or_else(|_| "\"\"".to_string());
    let field = serde_json::to_string(api::UPLOAD_FIELD).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
        var input = document.createElement('input');
        input.type = 'file';
        input.accept = {accept};
        input.onchange = function() {{
            var file = input.files && input.files[0];
            if (!file) {{ dioxus.send({{ status: 'cancelled' }}); return; }}
            var form = new FormData();
            form.append({field}, file, file.name);
            fetch({route}, {{ method: 'POST', body: form }}).then(function(res) {{
                if (res.ok) {{
                    return res.json().then(function(asset) {{
                        dioxus.send({{ status: 'stored', asset: asset }});
                    }});
                }}
                return res.text().then(function(text) {{
                    dioxus.send({{ status: 'failed', error: text || ('HTTP ' + res.status) }});
                }});
            }}).catch(function(err) {{
                dioxus.send({{ status: 'failed', error: String(err) }});
            }});
        }};
        input.oncancel = function() {{ dioxus.send({{ status: 'cancelled' }}); }};
        input.click();
        "#
    )
}

/// Open the browser's file dialog and upload the chosen file.
/// `Ok(None)` when the dialog is dismissed.
pub async fn pick_and_upload(accept: &str) -> Result<Option<AssetInfo>, String> {
    let mut eval = document::eval(&pick_and_upload_script(accept));
    let result = match eval.recv::<UploadReply>().await {
        Ok(reply) => reply.into_result(),
        Err(e) => Err(format!("file picker failed: {e:?}")),
    };
    if let Err(e) = &result {
        tracing::warn!("upload failed: {e}");
    }
    result
}
