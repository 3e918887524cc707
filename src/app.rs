use std::sync::Arc;

use portfolio_core::{CompletionClient, CompletionError, Config, WidgetController};
use tokio::task::JoinHandle;

type CompletionTask = JoinHandle<Result<String, CompletionError>>;

pub struct App {
    pub should_quit: bool,
    pub widget: WidgetController,

    // Draft editing
    pub cursor: usize, // char index into the draft

    // Completions still in flight, applied as they finish
    pub pending: Vec<CompletionTask>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    pub model: String,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let settings = config.completion_settings();
        let model = settings.model.clone();

        let completion_url = config.completion_url();
        let mut client = CompletionClient::new(&completion_url, settings);
        // Only attach the key when pointed straight at the upstream, bypassing the relay.
        if completion_url == config.upstream_url() {
            if let Some(key) = config.openai_api_key.as_deref() {
                tracing::warn!("calling the completion service directly; prefer the relay");
                client = client.with_api_key(key);
            }
        }

        Self::with_widget(WidgetController::new(config.persona(), Arc::new(client)), model)
    }

    pub fn with_widget(widget: WidgetController, model: String) -> Self {
        Self {
            should_quit: false,
            widget,
            cursor: 0,
            pending: Vec::new(),
            animation_frame: 0,
            model,
        }
    }

    pub fn is_thinking(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Start a send and run the completion on its own task.
    pub fn submit(&mut self) {
        let Some(pending) = self.widget.begin_send() else {
            return;
        };
        self.cursor = 0;

        let client = self.widget.client();
        self.pending.push(tokio::spawn(async move {
            client.complete(&pending.payload).await
        }));
    }

    /// Apply every completion that has finished since the last poll.
    ///
    /// Results are applied poll by poll, so a reply that lands earlier is never
    /// placed after one that lands in a later poll. Handles that finished within
    /// the same poll are applied in the order they were spawned.
    pub async fn collect_finished(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let mut still_running = Vec::with_capacity(self.pending.len());
        for handle in std::mem::take(&mut self.pending) {
            if handle.is_finished() {
                let outcome = handle
                    .await
                    .unwrap_or_else(|e| Err(CompletionError::transport(Some(e.to_string()))));
                self.widget.finish_send(outcome);
            } else {
                still_running.push(handle);
            }
        }
        self.pending = still_running;
    }

    pub fn tick_animation(&mut self) {
        if self.is_thinking() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}
