//! Interactive guessing session.
//!
//! Each "page" gets a fresh gate, as a browser page load would. Lines read
//! from stdin are the guess field; a released form is posted to the server
//! and the answer becomes the next page.

use std::{io::Write, rc::Rc};

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
    task::LocalSet,
};
use wordgate_core::{
    ConfettiPlan, ControlState, GateDriver, GateHost, PageAction, PagePlan, PagePresence,
    WordgateConfig,
};

use crate::{error::CliError, http::GameClient, system_env::SystemEnv, terminal::TerminalHost};

/// Session settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Server base URL.
    pub server: String,
    /// Path the guess form posts to.
    pub action: String,
    /// Guess field name.
    pub field: String,
    /// Width of the confetti drawing.
    pub width: usize,
    /// Gate, page and confetti configuration.
    pub config: WordgateConfig,
}

/// Whether a page carries the win marker element.
pub fn has_celebration_marker(page: &str, marker_id: &str) -> bool {
    page.contains(&format!("id=\"{marker_id}\"")) || page.contains(&format!("id='{marker_id}'"))
}

type Driver<W> = GateDriver<SystemEnv, GameClient, TerminalHost<W>>;

/// Run until stdin closes.
pub async fn run<R, W>(settings: Settings, input: R, out: W) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: Write + 'static,
{
    let client = GameClient::new(&settings.server, &settings.config.gate.endpoint)?;
    let (released_tx, mut released_rx) = mpsc::unbounded_channel();
    let host = TerminalHost::new(out, &settings.config.gate.messages.idle_label, released_tx);

    let local = LocalSet::new();
    local
        .run_until(async move {
            let page = client.get_page(&settings.action).await.unwrap_or_else(|e| {
                tracing::warn!("could not load {}: {}", settings.action, e);
                String::new()
            });
            let mut driver = load_page(&settings, &client, &host, &page);
            let mut lines = input.lines();

            loop {
                tokio::select! {
                    line = lines.next_line() => {
                        let Some(line) = line? else { break };
                        submit(&driver, &host, line);
                    },
                    Some(value) = released_rx.recv() => {
                        let page =
                            next_page(&client, &settings.action, &settings.field, &value).await;
                        driver = load_page(&settings, &client, &host, &page);
                    },
                }
            }

            Ok::<(), CliError>(())
        })
        .await
}

/// Post a released form and return the page the server answers with.
///
/// A failed post does not end the session: the form page is loaded again,
/// and an unreachable server leaves a blank page with a fresh form.
async fn next_page(client: &GameClient, action: &str, field: &str, value: &str) -> String {
    match client.post_form(action, field, value).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("posting guess failed: {}", e);
            client.get_page(action).await.unwrap_or_else(|e| {
                tracing::warn!("could not reload {}: {}", action, e);
                String::new()
            })
        },
    }
}

/// Type `line` into the field and submit it without waiting for the attempt.
fn submit<W: Write + 'static>(driver: &Rc<Driver<W>>, host: &TerminalHost<W>, line: String) {
    // Typing into a locked or released form does nothing, as in a browser.
    if !host.control().enabled {
        tracing::debug!("control disabled, ignoring input");
        return;
    }

    host.type_input(&line);
    let driver = Rc::clone(driver);
    tokio::task::spawn_local(async move {
        match driver.submit(&line).await {
            Ok(report) => tracing::debug!(?report, "attempt concluded"),
            Err(e) => tracing::debug!("submission ignored: {}", e),
        }
    });
}

/// Start a page: fresh gate, enabled control, page-load affordances.
fn load_page<W: Write + 'static>(
    settings: &Settings,
    client: &GameClient,
    host: &TerminalHost<W>,
    page: &str,
) -> Rc<Driver<W>> {
    let gate = &settings.config.gate;
    host.type_input("");
    host.set_control(ControlState {
        enabled: true,
        label: gate.messages.idle_label.clone(),
    });

    let presence = PagePresence {
        history: false,
        input: true,
        other_forms: 0,
        celebration_marker: has_celebration_marker(page, &settings.config.page.celebration_marker_id),
    };

    // Celebrate before the prompt so the prompt ends up last.
    let mut actions = PagePlan::on_load(&settings.config.page, &presence);
    actions.sort_by_key(|action| matches!(action, PageAction::FocusInput));
    for action in actions {
        match action {
            PageAction::Celebrate => {
                let plan = ConfettiPlan::generate(&SystemEnv, &settings.config.confetti);
                host.celebrate(&plan, &settings.config.confetti.glyph, settings.width);
            },
            PageAction::FocusInput => host.focus_input(),
            PageAction::ScrollHistoryToBottom | PageAction::LockOnSubmit { .. } => {},
        }
    }

    Rc::new(GateDriver::new(SystemEnv, gate.clone(), client.clone(), host.clone()))
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;

    /// Serve `GET` with a board page and `POST` with `post_status`.
    async fn game_server(post_status: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    let head_end = loop {
                        let n = stream.read(&mut chunk).await.unwrap();
                        if n == 0 {
                            return;
                        }
                        buf.extend_from_slice(&chunk[..n]);
                        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                            break pos + 4;
                        }
                    };

                    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
                    let length = head
                        .lines()
                        .filter_map(|line| line.split_once(':'))
                        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    while buf.len() < head_end + length {
                        let n = stream.read(&mut chunk).await.unwrap();
                        if n == 0 {
                            break;
                        }
                        buf.extend_from_slice(&chunk[..n]);
                    }

                    let (status, body) = if head.starts_with("POST") {
                        (post_status, "<p>answer</p>")
                    } else {
                        ("200 OK", "<p>board</p>")
                    };
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    stream.write_all(response.as_bytes()).await.unwrap();
                    let _ = stream.shutdown().await;
                });
            }
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn accepted_post_becomes_next_page() {
        let base = game_server("200 OK").await;
        let client = GameClient::new(&base, "/check_valid").unwrap();

        assert_eq!(next_page(&client, "/", "user_input", "hello").await, "<p>answer</p>");
    }

    #[tokio::test]
    async fn server_error_on_post_reloads_form_page() {
        let base = game_server("500 Internal Server Error").await;
        let client = GameClient::new(&base, "/check_valid").unwrap();

        assert_eq!(next_page(&client, "/", "user_input", "hello").await, "<p>board</p>");
    }

    #[tokio::test]
    async fn unreachable_server_leaves_blank_page() {
        let client = GameClient::new("http://127.0.0.1:9", "/check_valid").unwrap();

        assert_eq!(next_page(&client, "/", "user_input", "hello").await, "");
    }

    #[test]
    fn marker_detected_with_either_quote() {
        assert!(has_celebration_marker("<div id=\"confetti-trigger\"></div>", "confetti-trigger"));
        assert!(has_celebration_marker("<div id='confetti-trigger'></div>", "confetti-trigger"));
        assert!(!has_celebration_marker("<div class=\"confetti-trigger\"></div>", "confetti-trigger"));
    }
}
