use std::io::Write;

use chat_core::{ChatViewModel, Message, MessageContent, RenderingCollaborator, StatusNotice};
use chat_logging::{chat_debug, chat_warn};

const EMPTY_STATE_TEXT: &str = "Ask for a product recommendation to get started.";

/// Writes the chat panel as HTML fragments, one `div` per message.
///
/// Status changes go out as bracketed lines so a terminal reader can follow along.
pub struct HtmlRenderer<W: Write> {
    out: W,
    submit_enabled: bool,
    typing_visible: bool,
    submit_label: Option<&'static str>,
    empty_state_visible: bool,
}

impl<W: Write> HtmlRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            submit_enabled: true,
            typing_visible: false,
            submit_label: None,
            empty_state_visible: false,
        }
    }

    /// Brings the button label and empty-state placeholder in line with `view`.
    pub fn render_view(&mut self, view: &ChatViewModel) {
        if self.submit_label != Some(view.submit_label) {
            self.submit_label = Some(view.submit_label);
            let line = format!("[button] {}", view.submit_label);
            self.emit(&line);
        }
        match (view.show_empty_state, self.empty_state_visible) {
            (true, false) => {
                let line = format!("[empty] {EMPTY_STATE_TEXT}");
                self.emit(&line);
            }
            (false, true) => chat_debug!("Empty state hidden"),
            _ => {}
        }
        self.empty_state_visible = view.show_empty_state;
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, line: &str) {
        let result = writeln!(self.out, "{line}").and_then(|()| self.out.flush());
        if let Err(err) = result {
            chat_warn!("Failed to write chat output: {}", err);
        }
    }
}

impl<W: Write> RenderingCollaborator for HtmlRenderer<W> {
    fn append_message(&mut self, message: &Message, content: &MessageContent) {
        let (class, body) = match content {
            MessageContent::Plain(text) => ("message-content", escape_html(text)),
            MessageContent::Markup(markup) => ("message-content formatted", markup.clone()),
        };
        let line = format!(
            r#"<div class="chat-message {sender}"><div class="{class}">{body}</div></div>"#,
            sender = message.sender.as_str(),
        );
        self.emit(&line);
    }

    fn set_notice(&mut self, notice: Option<&StatusNotice>) {
        match notice {
            Some(notice) => {
                let line = format!("[{}] {}", notice.kind.as_str(), notice.text);
                self.emit(&line);
            }
            None => chat_debug!("Notice hidden"),
        }
    }

    fn set_submission_affordance(&mut self, enabled: bool) {
        if self.submit_enabled != enabled {
            chat_debug!("Submit affordance enabled={}", enabled);
        }
        self.submit_enabled = enabled;
    }

    fn set_typing_indicator(&mut self, visible: bool) {
        if visible && !self.typing_visible {
            self.emit("[typing] ...");
        }
        self.typing_visible = visible;
    }
}

/// Escapes text for insertion into HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{AppState, NoticeKind, SUBMIT_LABEL_BUSY};

    fn rendered(renderer: &HtmlRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.output().clone()).expect("utf8 output")
    }

    #[test]
    fn plain_text_is_escaped() {
        let mut renderer = HtmlRenderer::new(Vec::new());
        let message = Message::user("<script>alert('x')</script> & co");
        renderer.append_message(&message, &MessageContent::Plain(message.text.clone()));

        assert_eq!(
            rendered(&renderer),
            "<div class=\"chat-message user\"><div class=\"message-content\">\
             &lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co</div></div>\n"
        );
    }

    #[test]
    fn markup_is_written_verbatim() {
        let mut renderer = HtmlRenderer::new(Vec::new());
        let message = Message::bot("### Pick");
        renderer.append_message(
            &message,
            &MessageContent::Markup("<h3>Pick</h3>".to_string()),
        );

        assert_eq!(
            rendered(&renderer),
            "<div class=\"chat-message bot\"><div class=\"message-content formatted\">\
             <h3>Pick</h3></div></div>\n"
        );
    }

    #[test]
    fn notices_and_typing_become_status_lines() {
        let mut renderer = HtmlRenderer::new(Vec::new());
        renderer.set_typing_indicator(true);
        renderer.set_typing_indicator(true);
        renderer.set_notice(Some(&StatusNotice::new(
            NoticeKind::Processing,
            "Processing your request...",
        )));
        renderer.set_notice(None);
        renderer.set_typing_indicator(false);

        assert_eq!(
            rendered(&renderer),
            "[typing] ...\n[processing] Processing your request...\n"
        );
    }

    #[test]
    fn view_label_and_placeholder_render_on_change() {
        let mut renderer = HtmlRenderer::new(Vec::new());
        let idle = AppState::new().view();
        renderer.render_view(&idle);
        renderer.render_view(&idle);

        let busy = ChatViewModel {
            submit_enabled: false,
            submit_label: SUBMIT_LABEL_BUSY,
            typing_visible: true,
            show_empty_state: false,
            messages: vec![Message::user("lamp")],
            ..idle.clone()
        };
        renderer.render_view(&busy);
        renderer.render_view(&busy);
        renderer.render_view(&ChatViewModel {
            submit_enabled: true,
            submit_label: idle.submit_label,
            typing_visible: false,
            ..busy
        });

        assert_eq!(
            rendered(&renderer),
            "[button] Get Recommendations\n\
             [empty] Ask for a product recommendation to get started.\n\
             [button] Processing...\n\
             [button] Get Recommendations\n"
        );
    }
}
