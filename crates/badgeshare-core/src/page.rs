//! HTML pages for rendered configurations.
//!
//! Both rendering paths (stored and stateless) go through [`ConfigPage`].
//! The configuration text is always HTML-escaped before it is embedded.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::badge::count_badges;
use crate::record::ConfigRecord;

/// Escape the five HTML-significant characters.
///
/// `&` `<` `>` `"` `'` become `&amp;` `&lt;` `&gt;` `&quot;` `&#039;`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Which set of in-world steps the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instructions {
    /// Create a fresh `badge_config` notecard.
    CreateNotecard,
    /// Replace the contents of the existing `badge_config` notecard.
    ReplaceNotecard,
}

/// Identifier and write time of a stored configuration.
#[derive(Debug, Clone, Copy)]
pub struct RecordMeta<'a> {
    pub id: &'a str,
    pub created: &'a DateTime<Utc>,
}

/// A configuration page ready to render.
#[derive(Debug, Clone)]
pub struct ConfigPage<'a> {
    pub content: &'a str,
    pub badge_count: usize,
    pub meta: Option<RecordMeta<'a>>,
    pub overwrite_notice: bool,
    pub instructions: Instructions,
}

impl<'a> ConfigPage<'a> {
    /// Page for a record loaded from the store.
    pub fn stored(id: &'a str, record: &'a ConfigRecord) -> Self {
        Self {
            content: &record.content,
            badge_count: count_badges(&record.content),
            meta: Some(RecordMeta {
                id,
                created: &record.created,
            }),
            overwrite_notice: false,
            instructions: Instructions::CreateNotecard,
        }
    }

    /// Page for a configuration decoded from a stateless link.
    pub fn inline(content: &'a str) -> Self {
        Self {
            content,
            badge_count: count_badges(content),
            meta: None,
            overwrite_notice: true,
            instructions: Instructions::ReplaceNotecard,
        }
    }

    /// Render the full HTML document.
    pub fn render(&self) -> String {
        let escaped = escape_html(self.content);
        let mut html = String::with_capacity(PAGE_HEAD.len() + escaped.len() + 4096);

        html.push_str(PAGE_HEAD);
        html.push_str(
            "<body>\n<div class=\"container\">\n\
             <h1>&#127894;&#65039; Badge Configuration</h1>\n\
             <div class=\"subtitle\">Your badge configuration is ready to copy!</div>\n",
        );

        html.push_str("<div class=\"badge-count\">");
        html.push_str(&self.badge_count.to_string());
        html.push_str(if self.badge_count == 1 {
            " badge configured"
        } else {
            " badges configured"
        });
        html.push_str("</div>\n");

        html.push_str(
            "<div class=\"config-box\">\
             <button class=\"copy-button\" type=\"button\" onclick=\"copyConfig()\">Copy to Clipboard</button>\
             <pre class=\"config-text\" id=\"configContent\">",
        );
        html.push_str(&escaped);
        html.push_str("</pre></div>\n");

        if self.overwrite_notice {
            html.push_str(OVERWRITE_NOTICE);
        }

        html.push_str(match self.instructions {
            Instructions::CreateNotecard => CREATE_STEPS,
            Instructions::ReplaceNotecard => REPLACE_STEPS,
        });

        if let Some(meta) = self.meta {
            html.push_str("<div class=\"metadata\">Configuration ID: ");
            html.push_str(&escape_html(meta.id));
            html.push_str(" | Created: ");
            html.push_str(&meta.created.to_rfc3339_opts(SecondsFormat::Millis, true));
            html.push_str(" | Expires in 24 hours</div>\n");
        }

        html.push_str("</div>\n");
        html.push_str(COPY_SCRIPT);
        html.push_str("</body></html>\n");
        html
    }
}

/// The page shown when a stored configuration is missing or expired.
pub fn render_not_found_page() -> String {
    NOT_FOUND_PAGE.to_owned()
}

/// Document head and styles shared by every configuration page.
const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>Badge Configuration</title>
<style>
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;max-width:900px;margin:30px auto;padding:20px;background:linear-gradient(135deg,#667eea 0%,#764ba2 100%);min-height:100vh}
.container{background:#fff;border-radius:12px;padding:30px;box-shadow:0 20px 40px rgba(0,0,0,.1)}
h1{color:#333;margin-bottom:10px}
.subtitle{color:#666;margin-bottom:30px}
.config-box{background:#f8f9fa;border:2px solid #e9ecef;border-radius:8px;padding:20px;position:relative;margin-bottom:20px}
.config-text{font-family:'Courier New',monospace;font-size:14px;white-space:pre-wrap;word-wrap:break-word;margin:0;padding-right:160px}
.copy-button{position:absolute;top:10px;right:10px;background:#667eea;color:#fff;border:none;padding:8px 16px;border-radius:6px;cursor:pointer;font-size:14px}
.copy-button:hover{background:#5a67d8}
.copy-button.copied{background:#48bb78}
.instructions{background:#f0f7ff;border-left:4px solid #667eea;padding:15px;margin-top:20px;border-radius:4px}
.instructions h3{margin-top:0;color:#667eea}
.instructions ol{margin:10px 0;padding-left:20px}
.instructions li{margin:8px 0;line-height:1.6}
.badge-count{background:#667eea;color:#fff;padding:4px 12px;border-radius:20px;font-size:14px;display:inline-block;margin-bottom:20px}
.important-note{background:#fff3cd;border-left:4px solid #ffc107;padding:12px;margin-bottom:20px;border-radius:4px;color:#856404}
.metadata{margin-top:20px;color:#999;font-size:12px;text-align:center}
</style></head>
"##;

const OVERWRITE_NOTICE: &str = r#"<div class="important-note"><strong>&#9888;&#65039; Important:</strong> The badge_config notecard already exists in your Merit Badge Controller object. You'll be replacing its contents, not creating a new notecard.</div>
"#;

const CREATE_STEPS: &str = r#"<div class="instructions">
<h3>&#128203; How to use this configuration:</h3>
<ol>
<li>Click the "Copy to Clipboard" button above</li>
<li>In Second Life, create a new notecard in your badge system object</li>
<li>Name the notecard exactly: <strong>badge_config</strong></li>
<li>Paste the configuration into the notecard</li>
<li>Save the notecard</li>
<li>Your badge system is now configured!</li>
</ol>
</div>
"#;

const REPLACE_STEPS: &str = r#"<div class="instructions">
<h3>&#128203; How to use this configuration:</h3>
<ol>
<li>Click the <strong>"Copy to Clipboard"</strong> button above</li>
<li>In Second Life, right-click your <strong>Merit Badge Controller</strong> object</li>
<li>Select <strong>Edit</strong> &rarr; Go to the <strong>Content</strong> tab</li>
<li>Double-click the existing <strong>badge_config</strong> notecard to open it</li>
<li>Select all existing text (Ctrl+A) and delete it</li>
<li>Paste the new configuration (Ctrl+V)</li>
<li>Click <strong>Save</strong></li>
<li>Your badge system is now updated with the new badges!</li>
</ol>
</div>
"#;

/// Clipboard API first, hidden-textarea `execCommand` for older browsers.
const COPY_SCRIPT: &str = r"<script>
function markCopied(){
  const button=document.querySelector('.copy-button');
  button.textContent='✓ Copied!';
  button.classList.add('copied');
  setTimeout(()=>{button.textContent='Copy to Clipboard';button.classList.remove('copied');},3000);
}
function copyConfig(){
  const text=document.getElementById('configContent').textContent;
  const fallback=()=>{
    const area=document.createElement('textarea');
    area.value=text;
    document.body.appendChild(area);
    area.select();
    document.execCommand('copy');
    document.body.removeChild(area);
    markCopied();
  };
  if(navigator.clipboard){navigator.clipboard.writeText(text).then(markCopied).catch(fallback);}else{fallback();}
}
</script>
";

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>Configuration Not Found</title>
<style>
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;max-width:600px;margin:100px auto;padding:20px;text-align:center}
.error{background:#fee;border:1px solid #fcc;border-radius:8px;padding:20px;color:#c00}
</style></head>
<body>
<div class="error">
<h1>Configuration Not Found</h1>
<p>This configuration may have expired or the link may be incorrect.</p>
<p>Configurations are kept for 24 hours.</p>
</div>
</body></html>
"#;
