use std::time::Duration;

use chrono::{DateTime, Utc};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use ratatui::{DefaultTerminal, Frame};

use client::client::Client;

use crate::data::{OnKeyEvent, Screen, ScreenChange};
use crate::home::HomeScreenWidget;
use crate::login::{LoginScreenData, LoginScreenWidget};

pub struct App {
    /// Is the application running?
    running: bool,
    client: Client,
    screen: Screen,
    error_message: Option<ErrorMessage>,
}

struct ErrorMessage {
    message: String,
    expiry_time: DateTime<Utc>,
}

impl ErrorMessage {
    fn is_expired(&self) -> bool {
        Utc::now() > self.expiry_time
    }
}

impl From<String> for ErrorMessage {
    fn from(message: String) -> Self {
        Self {
            message,
            expiry_time: Utc::now() + Duration::from_secs(3),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new() -> Self {
        Self {
            running: true,
            client: Client::new(),
            screen: Screen::Login(LoginScreenData::default()),
            error_message: None,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_crossterm_events().await?;
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        match &mut self.screen {
            Screen::Login(data) => {
                frame.render_stateful_widget(LoginScreenWidget, frame.area(), data);
                if let Some(position) = data.cursor_position {
                    frame.set_cursor_position(position);
                }
            }
            Screen::Home(data) => {
                frame.render_stateful_widget(HomeScreenWidget, frame.area(), data);
            }
        }

        if let Some(error_message) = &self.error_message {
            if error_message.is_expired() {
                self.error_message = None;
            } else {
                let [_, popup_area] =
                    Layout::vertical(Constraint::from_percentages([90, 10])).areas(frame.area());
                let [_, popup_area, _] =
                    Layout::horizontal(Constraint::from_ratios([(1, 3), (1, 3), (1, 3)]))
                        .areas(popup_area);
                frame.render_widget(
                    ErrorPopup {
                        message: error_message.message.clone(),
                    },
                    popup_area,
                );
            }
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    async fn handle_crossterm_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key_event) = event::read()? {
                if let Err(e) = self.on_key_event(key_event).await {
                    self.error_message.replace(e.to_string().into());
                }
            }
        }
        Ok(())
    }

    async fn on_key_event(&mut self, key: KeyEvent) -> Result<()> {
        let change = match &mut self.screen {
            Screen::Login(data) => data.on_key_event(key, &mut self.client).await?,
            Screen::Home(data) => data.on_key_event(key, &mut self.client).await?,
        };
        match change {
            ScreenChange::Quit => self.quit(),
            ScreenChange::Switch(screen) => self.screen = screen,
            ScreenChange::None => {}
        }
        Ok(())
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

pub struct ErrorPopup {
    message: String,
}

impl Widget for ErrorPopup {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Clear.render(area, buf);
        Paragraph::new(self.message)
            .block(
                Block::bordered()
                    .title("Error occurred")
                    .style(Style::default().fg(Color::Red)),
            )
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
