use std::sync::mpsc;

use encore_core::{self as ec, SelectionState, Step};

use crate::{
    config::Config,
    log_buffer::LogBuffer,
    ui::{logs::LogsState, members::MembersForm, settings::SettingsForm},
};

pub struct App {
    // Core infrastructure
    pub logic: ec::Logic,
    pub config: Config,
    pub selection_rx: mpsc::Receiver<SelectionState>,
    pub session: ec::Session,

    // Global UI orchestration
    pub show_logs: bool,
    pub quit_confirming: bool,
    pub should_quit: bool,
    pub needs_redraw: bool,
    pub tick_count: u64,

    // Per-screen state (owned by their respective modules)
    pub members: MembersForm,
    pub settings: SettingsForm,
    pub logs: LogsState,
}

impl App {
    pub fn new(
        config: Config,
        logic: ec::Logic,
        selection_rx: mpsc::Receiver<SelectionState>,
        log_buffer: LogBuffer,
    ) -> Self {
        Self {
            session: ec::Session::with_seed(config.general.seed),
            logic,
            config,
            selection_rx,

            show_logs: false,
            quit_confirming: false,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,

            members: MembersForm::new(),
            settings: SettingsForm::new(),
            logs: LogsState::new(log_buffer),
        }
    }

    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);

        // The logic's shared state is what gets drawn; an outcome on the
        // channel means it changed.
        while let Ok(outcome) = self.selection_rx.try_recv() {
            if let Some(request) = outcome.request() {
                tracing::debug!("selection {request} arrived");
            }
            self.needs_redraw = true;
        }

        if self.is_animating() {
            self.needs_redraw = true;
        }
    }

    /// Screens that change without input: the home penguin, the waiting
    /// screen, and the logs panel as entries come in.
    fn is_animating(&self) -> bool {
        if self.show_logs {
            return true;
        }
        match self.session.step() {
            Step::Home => true,
            Step::Result => self.logic.selection_state().is_computing(),
            Step::Members | Step::Settings => false,
        }
    }

    pub fn start(&mut self) {
        if self.session.start() {
            self.members = MembersForm::new();
        }
    }

    /// Add the member in the form. Incomplete input is ignored.
    pub fn add_member(&mut self) {
        match self.session.add_member(&self.members.draft) {
            Some(id) => {
                tracing::info!("added member {id} ({} total)", self.session.roster.len());
                self.members.clear_inputs();
            }
            None => tracing::debug!("ignoring incomplete member"),
        }
    }

    pub fn remove_member(&mut self, id: &ec::encore_state::MemberId) {
        self.session.roster.remove(id);
        self.members.clamp_selection(self.session.roster.len());
        tracing::info!("removed member {id}");
    }

    pub fn complete_members(&mut self) {
        if self.session.complete_members() {
            self.settings = SettingsForm::new();
        }
    }

    pub fn submit_settings(&mut self, preferences: ec::encore_state::Preferences) {
        if self.session.complete_settings(preferences) {
            self.request_selection();
        }
    }

    /// Ask for another song and singers from the same roster and preferences.
    pub fn propose_again(&mut self) {
        if self.session.step() == Step::Result {
            self.request_selection();
        }
    }

    /// Back to the home screen with nothing entered. Any selection still in
    /// flight is cancelled.
    pub fn reset(&mut self) {
        self.logic.cancel();
        self.session.reset();
        self.members = MembersForm::new();
        self.settings = SettingsForm::new();
        tracing::info!("session reset");
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if self.show_logs {
            self.logs.scroll_to_end();
        }
    }

    fn request_selection(&mut self) {
        let Some(preferences) = self.session.preferences().copied() else {
            return;
        };
        self.logic
            .request_selection(self.session.roster.clone(), preferences);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ec::{
        LogicArgs, Strategy,
        encore_state::{Catalog, Gender, MemberDraft},
        selection::LocalStrategy,
    };

    use super::*;

    fn app(min_latency: Duration) -> App {
        let (selection_tx, selection_rx) = mpsc::channel();
        let logic = ec::Logic::new(LogicArgs {
            strategy: Strategy::Local(LocalStrategy::new(Catalog::builtin(), Some(7))),
            min_latency,
            selection_tx,
        })
        .unwrap();
        let mut config = Config::default();
        config.general.seed = Some(7);
        App::new(config, logic, selection_rx, LogBuffer::new())
    }

    fn fill_member(app: &mut App, nickname: &str, age: &str) {
        app.members.draft = MemberDraft {
            nickname: nickname.to_string(),
            gender: Gender::Male,
            age: age.to_string(),
        };
        app.add_member();
    }

    fn wait_until_settled(app: &mut App) -> SelectionState {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            app.tick();
            let state = app.logic.selection_state();
            if !state.is_computing() || Instant::now() > deadline {
                return state;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn full_flow_produces_a_selection() {
        let mut app = app(Duration::from_millis(20));
        app.start();
        fill_member(&mut app, "Taro", "50");
        fill_member(&mut app, "Hanako", "48");
        assert_eq!(app.session.roster.len(), 2);

        app.complete_members();
        assert_eq!(app.session.step(), Step::Settings);

        app.submit_settings(Default::default());
        assert_eq!(app.session.step(), Step::Result);

        let state = wait_until_settled(&mut app);
        let selection = state.selection().expect("selection should be ready");
        assert_eq!(selection.bucket.as_deref(), Some("1990s"));
        assert_eq!(selection.singers.len(), 1);
    }

    #[test]
    fn incomplete_member_is_not_added_and_keeps_the_input() {
        let mut app = app(Duration::ZERO);
        app.start();
        fill_member(&mut app, "   ", "30");
        fill_member(&mut app, "Jiro", "");

        assert!(app.session.roster.is_empty());
        assert_eq!(app.members.draft.nickname, "Jiro");

        app.complete_members();
        assert_eq!(app.session.step(), Step::Members);
    }

    #[test]
    fn propose_again_issues_a_new_request() {
        let mut app = app(Duration::ZERO);
        app.start();
        fill_member(&mut app, "Taro", "22");
        app.complete_members();
        app.submit_settings(Default::default());

        let first = wait_until_settled(&mut app).request();
        app.propose_again();
        let second = wait_until_settled(&mut app).request();
        assert!(second > first);
    }

    #[test]
    fn reset_cancels_and_clears() {
        let mut app = app(Duration::from_secs(1));
        app.start();
        fill_member(&mut app, "Taro", "22");
        app.complete_members();
        app.submit_settings(Default::default());
        assert!(app.logic.selection_state().is_computing());

        app.reset();
        assert_eq!(app.session.step(), Step::Home);
        assert!(app.session.roster.is_empty());
        assert_eq!(app.logic.selection_state(), SelectionState::Idle);
    }

    #[test]
    fn removing_the_last_member_keeps_the_cursor_in_range() {
        let mut app = app(Duration::ZERO);
        app.start();
        fill_member(&mut app, "a", "20");
        fill_member(&mut app, "b", "21");
        app.members.selected = 1;

        let id = app.session.roster.members()[1].id.clone();
        app.remove_member(&id);
        assert_eq!(app.session.roster.len(), 1);
        assert_eq!(app.members.selected, 0);
    }

    #[test]
    fn redraws_only_when_something_changed() {
        let mut app = app(Duration::from_millis(20));
        app.start();
        fill_member(&mut app, "Taro", "30");
        app.needs_redraw = false;
        app.tick();
        assert!(!app.needs_redraw, "members screen is static");

        app.complete_members();
        app.submit_settings(Default::default());
        app.needs_redraw = false;
        app.tick();
        assert!(app.needs_redraw, "waiting screen animates");

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.logic.selection_state().is_computing() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
        // The outcome is sent right after the state is written.
        std::thread::sleep(Duration::from_millis(50));
        app.needs_redraw = false;
        app.tick();
        assert!(app.needs_redraw, "the outcome arriving needs a redraw");

        app.needs_redraw = false;
        app.tick();
        assert!(!app.needs_redraw, "a settled result is static");
    }

    #[test]
    fn seeded_config_gives_reproducible_member_ids() {
        let ids = || {
            let mut app = app(Duration::ZERO);
            app.start();
            fill_member(&mut app, "Taro", "30");
            fill_member(&mut app, "Hanako", "28");
            app.session
                .roster
                .members()
                .iter()
                .map(|m| m.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(), ids());
    }
}
