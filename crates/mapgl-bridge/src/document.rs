//! The HTML document loaded into the embedded rendering surface.

use crate::config::{BridgeConfig, Injections};
use crate::embedded::MAP_CONTAINER;
use crate::mirror;

/// Selection, touch-callout and drag suppression, always included.
const BASE_CSS: &str = r#"
html,
body {
    overflow: hidden;
    height: 100vh;
    width: 100vw;
    margin: 0;
    padding: 0;
    background: transparent;
}
* {
    -webkit-user-select: none;
    user-select: none;
    -webkit-touch-callout: none;
    touch-callout: none;
    -webkit-user-drag: none;
    user-drag: none;
}
"#;

const LISTENERS: &str = r#"
window.onload = function () {
    document.addEventListener('message', function (event) {
        receiveMessage(event.data);
    });
    window.addEventListener('message', function (event) {
        receiveMessage(event.data);
    });
};
"#;

/// Builder for the bootstrap document.
///
/// A non-empty SDK script is inlined, so the document works without network
/// access to the SDK host. With an empty script the page loads the SDK from
/// `sdk_url` instead.
#[derive(Debug, Clone)]
pub struct WebContent {
    sdk_script: String,
    sdk_url: String,
    inject: Injections,
    post_message: String,
}

impl WebContent {
    pub fn new(sdk_script: impl Into<String>) -> Self {
        WebContent {
            sdk_script: sdk_script.into(),
            sdk_url: crate::config::DEFAULT_SDK_URL.to_string(),
            inject: Injections::default(),
            post_message: crate::config::DEFAULT_POST_MESSAGE.to_string(),
        }
    }

    pub fn from_config(config: &BridgeConfig, sdk_script: impl Into<String>) -> Self {
        WebContent::new(sdk_script)
            .sdk_url(config.sdk_url.clone())
            .inject(config.inject.clone())
            .post_message(config.post_message.clone())
    }

    pub fn sdk_url(mut self, url: impl Into<String>) -> Self {
        self.sdk_url = url.into();
        self
    }

    pub fn inject(mut self, inject: Injections) -> Self {
        self.inject = inject;
        self
    }

    /// JS function expression that receives each outbound event string.
    pub fn post_message(mut self, target: impl Into<String>) -> Self {
        self.post_message = target.into();
        self
    }

    pub fn render(&self) -> String {
        let mut doc = String::new();
        doc.push_str("<!DOCTYPE html>\n<html lang=\"\">\n<head>\n");
        doc.push_str("<meta charset=\"utf-8\" />\n");
        doc.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1, maximum-scale=1, user-scalable=no\">\n",
        );
        doc.push_str("<title></title>\n");
        if self.sdk_script.trim().is_empty() {
            doc.push_str(&format!(
                "<script src=\"{}\"></script>\n",
                self.sdk_url.replace('"', "&quot;")
            ));
        } else {
            doc.push_str("<script>");
            doc.push_str(&escape_script(&self.sdk_script));
            doc.push_str("</script>\n");
        }
        doc.push_str("</head>\n<body>\n");
        doc.push_str(&format!(
            "<div id=\"{MAP_CONTAINER}\" style=\"width: 100vw; height: 100vh\"></div>\n"
        ));
        if let Some(html) = &self.inject.html {
            doc.push_str(html);
            doc.push('\n');
        }
        doc.push_str("</body>\n<script>\n");
        doc.push_str(LISTENERS.trim_start());
        doc.push_str(&format!(
            "function postToHost(payload) {{\n    {}(JSON.stringify(payload));\n}}\n",
            self.post_message
        ));
        doc.push_str(&mirror::runtime_prelude());
        doc.push_str("function receiveMessage(message) {\n");
        doc.push_str("    var data;\n");
        doc.push_str("    try {\n");
        doc.push_str("        data = JSON.parse(message);\n");
        doc.push_str("    } catch (e) {\n");
        doc.push_str("        return;\n");
        doc.push_str("    }\n");
        doc.push_str("    if (!data || typeof data.function !== 'string') {\n");
        doc.push_str("        return;\n");
        doc.push_str("    }\n");
        doc.push_str("    var functionName = data.function;\n");
        doc.push_str("    var params = data.params || {};\n");
        doc.push_str("    try {\n");
        doc.push_str("        if (functionName !== 'init' && !map) {\n");
        doc.push_str("            throw new Error('map is not created');\n");
        doc.push_str("        }\n");
        for line in mirror::dispatch_script().lines() {
            if !line.is_empty() {
                doc.push_str("        ");
                doc.push_str(line);
            }
            doc.push('\n');
        }
        doc.push_str("    } catch (e) {\n");
        doc.push_str(
            "        postToHost({ type: 'error', data: { target: functionName, message: String(e && e.message !== undefined ? e.message : e) } });\n",
        );
        doc.push_str("    }\n}\n");
        if let Some(js) = &self.inject.js {
            doc.push_str(&escape_script(js));
            doc.push('\n');
        }
        doc.push_str("</script>\n<style>");
        doc.push_str(BASE_CSS);
        if let Some(css) = &self.inject.css {
            doc.push_str(css);
            doc.push('\n');
        }
        doc.push_str("</style>\n</html>\n");
        doc
    }
}

/// Keeps inline script text from closing its `<script>` element early.
fn escape_script(text: &str) -> String {
    text.replace("</script", "<\\/script")
}
