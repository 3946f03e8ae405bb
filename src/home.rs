use client::client::Client;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, StatefulWidget, Widget};

use crate::data::{OnKeyEvent, Screen, ScreenChange};
use crate::login::LoginScreenData;

/// Where a valid submission lands once the platform has accepted it.
#[derive(Debug)]
pub struct HomeScreenData {
    email: String,
}

impl HomeScreenData {
    pub fn new(email: String) -> Self {
        Self { email }
    }
}

impl From<HomeScreenData> for ScreenChange {
    fn from(data: HomeScreenData) -> Self {
        ScreenChange::Switch(Screen::Home(data))
    }
}

pub struct HomeScreenWidget;

impl StatefulWidget for HomeScreenWidget {
    type State = HomeScreenData;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        Paragraph::new(format!("Signed in as {}", state.email))
            .block(
                Block::bordered()
                    .title("Windster")
                    .title_bottom(Line::from("Press Esc to sign out").centered()),
            )
            .centered()
            .render(area, buf);
    }
}

#[async_trait::async_trait]
impl OnKeyEvent for HomeScreenData {
    async fn on_key_event(&mut self, key: KeyEvent, client: &mut Client) -> Result<ScreenChange> {
        let change = match (key.kind, key.modifiers, key.code) {
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Esc) => {
                client.sign_out();
                LoginScreenData::default().into()
            }
            (KeyEventKind::Press, KeyModifiers::CONTROL, KeyCode::Char('c')) => ScreenChange::Quit,
            _ => ScreenChange::None,
        };
        Ok(change)
    }
}
