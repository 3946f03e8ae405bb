use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::prelude::{Color, Masked, Modifier, Span, StatefulWidget, Style, Widget};
use ratatui::widgets::{Block, Paragraph};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use client::client::Client;
use types::domain::LoginRequest;

use crate::data::{highlight, OnKeyEvent, Screen, ScreenChange};
use crate::form::{FieldUpdate, FormData, FormErrors};
use crate::home::HomeScreenData;
use crate::TOKEN_MANAGER;

#[derive(Debug, Default)]
pub struct LoginScreenData {
    email_input: Input,
    password_input: Input,
    form: FormData,
    errors: FormErrors,
    focus: LoginScreenFocus,
    pub(crate) cursor_position: Option<Position>,
}

impl From<LoginScreenData> for ScreenChange {
    fn from(data: LoginScreenData) -> Self {
        ScreenChange::Switch(Screen::Login(data))
    }
}

#[derive(Debug, PartialEq, Default)]
pub enum LoginScreenFocus {
    #[default]
    Email,
    Password,
    RememberMe,
    Login,
}

impl LoginScreenData {
    fn switch_focus(&mut self) {
        match self.focus {
            LoginScreenFocus::Email => {
                self.focus = LoginScreenFocus::Password;
            }
            LoginScreenFocus::Password => {
                self.focus = LoginScreenFocus::RememberMe;
            }
            LoginScreenFocus::RememberMe => {
                self.focus = LoginScreenFocus::Login;
            }
            LoginScreenFocus::Login => {
                self.focus = LoginScreenFocus::Email;
            }
        }
    }

    /// Routes a key press to the focused field. Text keys feed the input
    /// widgets and re-enter the form state through a field update; the
    /// displayed errors stay as they are until the next submit.
    pub(crate) fn handle_input_event(&mut self, key: KeyEvent) {
        match self.focus {
            LoginScreenFocus::Email => {
                self.email_input.handle_event(&Event::Key(key));
                self.dispatch(FieldUpdate::SetEmail(self.email_input.value().to_string()));
            }
            LoginScreenFocus::Password => {
                self.password_input.handle_event(&Event::Key(key));
                self.dispatch(FieldUpdate::SetPassword(
                    self.password_input.value().to_string(),
                ));
            }
            LoginScreenFocus::RememberMe => {
                if key.code == KeyCode::Char(' ') {
                    self.toggle_remember_me();
                }
            }
            LoginScreenFocus::Login => {}
        }
    }

    fn dispatch(&mut self, update: FieldUpdate) {
        self.form = std::mem::take(&mut self.form).apply(update);
    }

    fn toggle_remember_me(&mut self) {
        let next = !self.form.remember_me;
        self.dispatch(FieldUpdate::SetRememberMe(next));
    }

    /// Replaces the displayed errors with a fresh validation result and
    /// reports whether the form may go to the backend.
    fn revalidate(&mut self) -> bool {
        self.errors = self.form.validate();
        self.errors.is_empty()
    }

    async fn handle_enter(&mut self, client: &mut Client) -> color_eyre::Result<ScreenChange> {
        let change = match self.focus {
            LoginScreenFocus::RememberMe => {
                self.toggle_remember_me();
                ScreenChange::None
            }
            LoginScreenFocus::Login => self.submit(client).await?,
            _ => {
                self.switch_focus();
                ScreenChange::None
            }
        };
        Ok(change)
    }

    async fn submit(&mut self, client: &mut Client) -> color_eyre::Result<ScreenChange> {
        if !self.revalidate() {
            debug!("login form has validation errors: {:?}", self.errors);
            return Ok(ScreenChange::None);
        }
        info!("login form valid, submitting for {}", self.form.email);
        let token = client
            .login(LoginRequest {
                email: self.form.email.clone(),
                password: self.form.password.clone(),
                remember_me: self.form.remember_me,
            })
            .await?;
        if self.form.remember_me {
            TOKEN_MANAGER.set_password(&token)?;
        }
        Ok(HomeScreenData::new(self.form.email.clone()).into())
    }

    fn update_cursor_position(&mut self, top: Rect, bottom: Rect) {
        self.cursor_position = match self.focus {
            LoginScreenFocus::Email => Some(
                (
                    top.x + self.email_input.visual_cursor() as u16 + 1,
                    top.y + 1,
                )
                    .into(),
            ),
            LoginScreenFocus::Password => Some(
                (
                    bottom.x + self.password_input.visual_cursor() as u16 + 1,
                    bottom.y + 1,
                )
                    .into(),
            ),
            _ => None,
        };
    }
}

pub struct LoginScreenWidget;

impl StatefulWidget for LoginScreenWidget {
    type State = LoginScreenData;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [all] = Layout::vertical([Constraint::Length(14)])
            .flex(Flex::Center)
            .areas(area);
        let [title, email, email_error, password, password_error, remember, actions, instructions] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .areas(all);

        Paragraph::new("Sign in to Windster")
            .style(Style::default().add_modifier(Modifier::BOLD))
            .centered()
            .render(title, buf);

        let [email] = Layout::horizontal([Constraint::Max(50)])
            .flex(Flex::Center)
            .areas(email);
        Paragraph::new(state.email_input.value())
            .block(Block::bordered().title("Email"))
            .render(email, buf);

        let [email_error] = Layout::horizontal([Constraint::Max(50)])
            .flex(Flex::Center)
            .areas(email_error);
        if let Some(message) = &state.errors.email {
            Paragraph::new(Span::styled(message.as_str(), Color::Red)).render(email_error, buf);
        }

        let [password] = Layout::horizontal([Constraint::Max(50)])
            .flex(Flex::Center)
            .areas(password);
        let password_text =
            Span::styled(Masked::new(state.password_input.value(), '*'), Color::White);
        Paragraph::new(password_text)
            .block(Block::bordered().title("Password"))
            .render(password, buf);

        let [password_error] = Layout::horizontal([Constraint::Max(50)])
            .flex(Flex::Center)
            .areas(password_error);
        if let Some(message) = &state.errors.password {
            Paragraph::new(Span::styled(message.as_str(), Color::Red)).render(password_error, buf);
        }

        let [remember] = Layout::horizontal([Constraint::Max(50)])
            .flex(Flex::Center)
            .areas(remember);
        let marker = if state.form.remember_me {
            "[x] Remember me"
        } else {
            "[ ] Remember me"
        };
        Paragraph::new(highlight(
            marker,
            state.focus == LoginScreenFocus::RememberMe,
        ))
        .render(remember, buf);

        let [_, login, _] =
            Layout::horizontal(Constraint::from_percentages([30, 40, 30])).areas(actions);
        Paragraph::new(highlight(
            "Login to your account",
            state.focus == LoginScreenFocus::Login,
        ))
        .centered()
        .block(Block::bordered())
        .render(login, buf);

        Paragraph::new("Press Tab to switch focus")
            .style(Style::default().add_modifier(Modifier::ITALIC))
            .centered()
            .render(instructions, buf);

        state.update_cursor_position(email, password);
    }
}

#[async_trait::async_trait]
impl OnKeyEvent for LoginScreenData {
    async fn on_key_event(
        &mut self,
        key: KeyEvent,
        client: &mut Client,
    ) -> color_eyre::Result<ScreenChange> {
        match (key.kind, key.modifiers, key.code) {
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Esc)
            | (KeyEventKind::Press, KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                Ok(ScreenChange::Quit)
            }
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Tab) => {
                self.switch_focus();
                Ok(ScreenChange::None)
            }
            (KeyEventKind::Press, KeyModifiers::NONE, KeyCode::Enter) => {
                self.handle_enter(client).await
            }
            _ => {
                self.handle_input_event(key);
                Ok(ScreenChange::None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_one_field_keeps_the_others() {
        let mut data = LoginScreenData::default();
        data.handle_input_event(KeyEvent::from(KeyCode::Char('a')));
        data.switch_focus();
        data.handle_input_event(KeyEvent::from(KeyCode::Char('x')));
        assert_eq!(data.form.email, "a");
        assert_eq!(data.form.password, "x");
        assert!(!data.form.remember_me);
    }

    #[test]
    fn test_space_toggles_remember_me() {
        let mut data = LoginScreenData::default();
        data.switch_focus();
        data.switch_focus();
        assert_eq!(data.focus, LoginScreenFocus::RememberMe);
        data.handle_input_event(KeyEvent::from(KeyCode::Char(' ')));
        assert!(data.form.remember_me);
        data.handle_input_event(KeyEvent::from(KeyCode::Char(' ')));
        assert!(!data.form.remember_me);
    }

    #[test]
    fn test_edits_do_not_clear_displayed_errors() {
        let mut data = LoginScreenData::default();
        assert!(!data.revalidate());
        data.handle_input_event(KeyEvent::from(KeyCode::Char('a')));
        assert_eq!(data.form.email, "a");
        assert_eq!(data.errors.email.as_deref(), Some("Email is required"));
        assert_eq!(
            data.errors.password.as_deref(),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_revalidate_clears_stale_errors() {
        let mut data = LoginScreenData {
            form: FormData {
                email: "a@b.c".to_string(),
                password: "abcdef".to_string(),
                remember_me: false,
            },
            errors: FormErrors {
                email: Some("Email is required".to_string()),
                password: None,
            },
            ..Default::default()
        };
        assert!(data.revalidate());
        assert!(data.errors.is_empty());
    }

    #[tokio::test]
    async fn test_submit_stops_on_validation_errors() -> color_eyre::Result<()> {
        let mut data = LoginScreenData::default();
        data.dispatch(FieldUpdate::SetEmail("bad-email".to_string()));
        data.dispatch(FieldUpdate::SetPassword("abcdef".to_string()));
        let mut client = Client::new();
        let change = data.submit(&mut client).await?;
        assert!(matches!(change, ScreenChange::None));
        assert_eq!(data.errors.email.as_deref(), Some("Email is invalid"));
        assert_eq!(data.errors.password, None);
        Ok(())
    }
}
